use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::DisplayConfig;
use crate::display::AnimatedDisplay;
use crate::driver::command::{Command, Flow, Key};
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::render::surface::DrawSurface;

/// Supplies the commands to apply before a given tick.
pub trait CommandSource {
    fn poll(&mut self, tick: u64) -> Vec<Command>;
}

/// Commands scheduled by tick number.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    schedule: BTreeMap<u64, Vec<Command>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, cmd: Command) {
        self.schedule.entry(tick).or_default().push(cmd);
    }

    /// Parses `"<tick>:<key>,<tick>:<key>,..."`; unknown keys are skipped.
    pub fn parse(script: &str, cfg: &DisplayConfig) -> GlyphResult<Self> {
        let mut input = Self::new();
        for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tick, key) = entry.split_once(':').ok_or_else(|| {
                GlyphError::validation(format!("key script entry '{entry}' is not <tick>:<key>"))
            })?;
            let tick: u64 = tick.trim().parse().map_err(|_| {
                GlyphError::validation(format!("key script entry '{entry}' has a bad tick"))
            })?;
            match key.parse::<Key>() {
                Ok(key) => input.push(tick, Command::from_key(key, cfg)),
                Err(err) => tracing::warn!(%err, tick, "ignoring key"),
            }
        }
        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

impl CommandSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> Vec<Command> {
        self.schedule.remove(&tick).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub circles: u64,
    pub stopped: bool,
}

/// Fixed-cadence loop: poll input, render one tick, wait.
#[derive(Clone, Debug)]
pub struct Driver {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl Driver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    pub fn from_config(cfg: &DisplayConfig) -> Self {
        Self::new(Duration::from_millis(cfg.tick_ms))
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Runs until a `Stop` command arrives or `max_ticks` ticks have rendered.
    ///
    /// Without a tick limit this only returns on `Stop` or an error.
    #[tracing::instrument(skip_all, fields(max_ticks = ?self.max_ticks))]
    pub fn run<S, I>(
        &self,
        display: &mut AnimatedDisplay,
        surface: &mut S,
        input: &mut I,
    ) -> GlyphResult<RunStats>
    where
        S: DrawSurface + ?Sized,
        I: CommandSource + ?Sized,
    {
        let mut stats = RunStats::default();
        'ticks: while self.max_ticks.is_none_or(|max| stats.ticks < max) {
            for cmd in input.poll(stats.ticks) {
                if cmd.apply(display)? == Flow::Stop {
                    stats.stopped = true;
                    break 'ticks;
                }
            }

            let tick = display.render_tick(surface)?;
            stats.ticks += 1;
            stats.circles += tick.circles as u64;

            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }
        tracing::info!(ticks = stats.ticks, stopped = stats.stopped, "driver finished");
        Ok(stats)
    }
}
