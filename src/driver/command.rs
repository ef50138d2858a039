use std::str::FromStr;

use crate::config::DisplayConfig;
use crate::display::AnimatedDisplay;
use crate::foundation::core::Point;
use crate::foundation::error::{GlyphError, GlyphResult};

/// Navigation keys understood by the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
}

impl FromStr for Key {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "pageup" | "pgup" => Self::PageUp,
            "pagedown" | "pgdn" => Self::PageDown,
            "home" => Self::Home,
            "end" => Self::End,
            "escape" | "esc" => Self::Escape,
            other => {
                return Err(GlyphError::validation(format!("unknown key '{other}'")));
            }
        };
        Ok(key)
    }
}

/// A mutation of interactive display state, or a request to stop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    MoveRelative(Point),
    Rotate(i32),
    ScaleUp(f64),
    ScaleDown(f64),
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Command {
    /// Maps a key to its command using the configured step sizes.
    pub fn from_key(key: Key, cfg: &DisplayConfig) -> Self {
        let pan = cfg.pan_step;
        match key {
            Key::Left => Self::MoveRelative(Point::new(-pan, 0)),
            Key::Right => Self::MoveRelative(Point::new(pan, 0)),
            Key::Up => Self::MoveRelative(Point::new(0, -pan)),
            Key::Down => Self::MoveRelative(Point::new(0, pan)),
            Key::PageDown => Self::Rotate(cfg.rotate_step_deg),
            Key::PageUp => Self::Rotate(-cfg.rotate_step_deg),
            Key::Home => Self::ScaleUp(cfg.zoom_factor),
            Key::End => Self::ScaleDown(cfg.zoom_factor),
            Key::Escape => Self::Stop,
        }
    }

    pub fn apply(self, display: &mut AnimatedDisplay) -> GlyphResult<Flow> {
        match self {
            Self::MoveRelative(delta) => display.move_relative(delta)?,
            Self::Rotate(delta) => display.rotate(delta),
            Self::ScaleUp(f) => display.scale_up(f)?,
            Self::ScaleDown(f) => display.scale_down(f)?,
            Self::Stop => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }
}
