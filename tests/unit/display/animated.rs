use super::*;
use crate::animation::{FrameSequenceBuilder, TRACK_LEN};
use crate::glyph::{GLYPH_0, GlyphPair};
use crate::render::surface::{DrawCall, RecordingSurface};
use crate::sampler::POINTS_PER_CURVE;

fn display() -> AnimatedDisplay {
    let track = FrameSequenceBuilder::new(&GlyphPair::builtin()).build();
    AnimatedDisplay::new(track).unwrap()
}

struct FailingPresent;

impl DrawSurface for FailingPresent {
    fn draw_circle(&mut self, _center: Point, _radius: f64) -> GlyphResult<()> {
        Ok(())
    }

    fn present(&mut self) -> GlyphResult<()> {
        Err(GlyphError::render("display went away"))
    }
}

#[test]
fn starts_at_rest() {
    let d = display();
    assert_eq!(d.frame_index(), 0);
    assert_eq!(d.scale(), 1.0);
    assert_eq!(d.angle(), 0);
    assert_eq!(d.center(), Point::ORIGIN);
    assert_eq!(d.transforms(), TransformChain::default());
}

#[test]
fn empty_track_is_rejected() {
    let err = AnimatedDisplay::new(FrameTrack::from_frames(vec![])).unwrap_err();
    assert!(matches!(err, GlyphError::Precondition(_)));
}

#[test]
fn rotation_wraps_both_ways() {
    let mut d = display();
    d.rotate(-5);
    assert_eq!(d.angle(), 355);
    d.rotate(10);
    assert_eq!(d.angle(), 5);
    d.rotate(-725);
    assert_eq!(d.angle(), 0);
    for delta in [359, 1, -1, 720, -361, i32::MIN, i32::MAX] {
        d.rotate(delta);
        assert!((0..360).contains(&d.angle()));
    }
}

#[test]
fn rotate_regenerates_transform() {
    let mut d = display();
    d.rotate(90);
    let expected = AffineTransform::rotate(90f64.to_radians());
    assert_eq!(d.transforms().rotate, expected);
    assert_eq!(d.transforms().rotate.apply(Point::new(10, 0)), Point::new(0, 10));
}

#[test]
fn scale_up_and_down_compose() {
    let mut d = display();
    d.scale_up(1.2).unwrap();
    d.scale_up(1.2).unwrap();
    assert!((d.scale() - 1.44).abs() < 1e-12);
    d.scale_down(1.2).unwrap();
    assert!((d.scale() - 1.2).abs() < 1e-12);
    assert_eq!(d.transforms().scale, AffineTransform::scale(d.scale(), Point::ORIGIN));
}

#[test]
fn bad_scale_factors_are_rejected_without_side_effects() {
    let mut d = display();
    for factor in [0.0, -1.2, f64::NAN, f64::INFINITY] {
        assert!(matches!(d.scale_up(factor), Err(GlyphError::Precondition(_))));
        assert!(matches!(d.scale_down(factor), Err(GlyphError::Precondition(_))));
    }
    assert_eq!(d.scale(), 1.0);
    // Finite but huge is accepted here; the overflow surfaces when the tick transforms dots.
    assert!(d.scale_up(f64::MAX).is_ok());
    assert!(d.scale_up(f64::MAX).is_err());
    assert_eq!(d.scale(), f64::MAX);
}

#[test]
fn huge_scale_fails_the_tick_instead_of_clamping() {
    for factor in [1e12, f64::MAX] {
        let mut d = display();
        d.move_to(Point::new(320, 240));
        d.scale_up(factor).unwrap();
        let mut s = RecordingSurface::new();
        let err = d.render_tick(&mut s).unwrap_err();
        assert!(matches!(err, GlyphError::Precondition(_)));
        assert!(s.calls().is_empty());
        assert_eq!(d.frame_index(), 0);

        // Zooming back into range recovers.
        d.set_scale(1.0).unwrap();
        assert_eq!(d.render_tick(&mut s).unwrap().circles, 3 * 2 * POINTS_PER_CURVE);
        assert_eq!(d.frame_index(), 1);
    }
}

#[test]
fn pan_overflow_is_refused() {
    let mut d = display();
    d.move_to(Point::new(i32::MAX - 5, 0));
    let err = d.move_relative(Point::new(10, 0)).unwrap_err();
    assert!(matches!(err, GlyphError::Precondition(_)));
    assert_eq!(d.center(), Point::new(i32::MAX - 5, 0));
    assert_eq!(
        d.transforms().translate,
        AffineTransform::translate(Point::new(i32::MAX - 5, 0))
    );
    d.move_relative(Point::new(5, 0)).unwrap();
    assert_eq!(d.center(), Point::new(i32::MAX, 0));
}

#[test]
fn pan_near_the_edge_fails_the_tick() {
    let mut d = display();
    d.move_to(Point::new(i32::MAX, 0));
    let mut s = RecordingSurface::new();
    assert!(d.render_tick(&mut s).is_err());
    assert_eq!(s.present_count(), 0);
    assert_eq!(d.frame_index(), 0);
}

#[test]
fn moves_are_absolute_or_relative() {
    let mut d = display();
    d.move_to(Point::new(320, 240));
    d.move_relative(Point::new(-10, 0)).unwrap();
    d.move_relative(Point::new(0, 10)).unwrap();
    assert_eq!(d.center(), Point::new(310, 250));
    assert_eq!(d.transforms().translate, AffineTransform::translate(Point::new(310, 250)));
}

#[test]
fn interaction_never_moves_the_frame_cursor() {
    let mut d = display();
    let mut s = RecordingSurface::new();
    d.render_tick(&mut s).unwrap();
    d.rotate(5);
    d.move_relative(Point::new(3, 3)).unwrap();
    d.scale_up(2.0).unwrap();
    assert_eq!(d.frame_index(), 1);
}

#[test]
fn one_tick_draws_every_dot_then_presents_once() {
    let mut d = display();
    d.move_to(Point::new(320, 240));
    let mut s = RecordingSurface::new();
    let stats = d.render_tick(&mut s).unwrap();

    let expected = 3 * 2 * POINTS_PER_CURVE;
    assert_eq!(stats, TickStats { frame: 0, circles: expected });
    assert_eq!(s.circle_count(), expected);
    assert_eq!(s.present_count(), 1);
    assert_eq!(s.calls().last(), Some(&DrawCall::Present));
    assert_eq!(d.frame_index(), 1);
}

#[test]
fn dots_follow_glyph_curve_sample_order() {
    let mut d = display();
    d.move_to(Point::new(320, 240));
    let mut s = RecordingSurface::new();
    d.render_tick(&mut s).unwrap();

    let chain = d.transforms();
    let mut expected = Vec::new();
    for origin in DIGIT_ORIGINS {
        for curve in GLYPH_0.curves() {
            for p in sampler::sample(curve, origin, chain) {
                expected.push(p.unwrap());
            }
        }
    }
    assert_eq!(s.circles_in_frame(0), expected);
    // First dot: start of the first curve, offset then panned.
    assert_eq!(
        expected[0],
        GLYPH_0.curves()[0].start() + DIGIT_ORIGINS[0] + Point::new(320, 240)
    );
}

#[test]
fn radius_tracks_scale() {
    let mut d = display();
    d.scale_up(1.5).unwrap();
    let mut s = RecordingSurface::new();
    d.render_tick(&mut s).unwrap();
    assert!(s.calls().iter().all(|c| match c {
        DrawCall::Circle { radius, .. } => *radius == 3.0,
        DrawCall::Present => true,
    }));
}

#[test]
fn full_cycle_returns_to_start() {
    let mut d = display();
    let mut s = RecordingSurface::new();
    for i in 0..TRACK_LEN {
        assert_eq!(d.render_tick(&mut s).unwrap().frame, i);
    }
    assert_eq!(d.frame_index(), 0);
    assert_eq!(s.present_count(), TRACK_LEN);
}

#[test]
fn failed_present_keeps_cursor() {
    let mut d = display();
    let err = d.render_tick(&mut FailingPresent).unwrap_err();
    assert!(matches!(err, GlyphError::Render(_)));
    assert_eq!(d.frame_index(), 0);
}

#[test]
fn works_through_trait_objects() {
    let mut d = display();
    let mut s = RecordingSurface::new();
    let dyn_surface: &mut dyn DrawSurface = &mut s;
    d.render_tick(dyn_surface).unwrap();
    assert_eq!(s.present_count(), 1);
}

#[test]
fn from_config_applies_pan_and_origins() {
    let cfg = DisplayConfig {
        center: Point::new(5, 6),
        digit_origins: [Point::ORIGIN; 3],
        ..DisplayConfig::default()
    };
    let track = FrameSequenceBuilder::new(&GlyphPair::builtin()).build();
    let mut d = AnimatedDisplay::from_config(track, &cfg).unwrap();
    assert_eq!(d.center(), Point::new(5, 6));

    let mut s = RecordingSurface::new();
    d.render_tick(&mut s).unwrap();
    assert_eq!(
        s.circles_in_frame(0)[0],
        GLYPH_0.curves()[0].start() + Point::new(5, 6)
    );
}
