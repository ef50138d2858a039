use super::*;
use crate::transform::AffineTransform;

fn curve(pts: [(i32, i32); 4]) -> Curve {
    Curve(pts.map(Point::from))
}

fn exact_bezier(c: &Curve, t: f64) -> (f64, f64) {
    let p = c.points().map(|p| (f64::from(p.x), f64::from(p.y)));
    let mt = 1.0 - t;
    let w = [mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t];
    (
        (0..4).map(|i| w[i] * p[i].0).sum(),
        (0..4).map(|i| w[i] * p[i].1).sum(),
    )
}

fn points(c: &Curve, origin: Point, chain: TransformChain) -> Vec<Point> {
    sample(c, origin, chain)
        .collect::<GlyphResult<Vec<_>>>()
        .unwrap()
}

#[test]
fn emits_twenty_one_points() {
    let c = curve([(0, 0), (10, 40), (50, 40), (60, 0)]);
    assert_eq!(
        sample(&c, Point::ORIGIN, TransformChain::default()).count(),
        POINTS_PER_CURVE
    );
}

#[test]
fn degenerate_curve_never_drifts() {
    let c = curve([(5, 5); 4]);
    let pts = points(&c, Point::ORIGIN, TransformChain::default());
    assert_eq!(pts.len(), 21);
    assert!(pts.iter().all(|&p| p == Point::new(5, 5)));

    for step in 0..20 {
        assert_eq!(rounded_casteljau(&c, step as f64 * SAMPLE_STEP), Point::new(5, 5));
    }
}

#[test]
fn first_two_points_are_the_start() {
    let c = curve([(3, -7), (100, 0), (0, 100), (90, 90)]);
    let pts = points(&c, Point::ORIGIN, TransformChain::default());
    assert_eq!(pts[0], Point::new(3, -7));
    assert_eq!(pts[1], Point::new(3, -7));
    // t never reaches 1, so the end point is not emitted.
    assert_ne!(*pts.last().unwrap(), Point::new(90, 90));
}

#[test]
fn straight_line_steps_evenly() {
    let c = curve([(0, 0), (20, 0), (40, 0), (60, 0)]);
    let xs: Vec<_> = points(&c, Point::ORIGIN, TransformChain::default())
        .iter()
        .map(|p| p.x)
        .collect();
    assert_eq!(&xs[..4], &[0, 0, 3, 6]);
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn per_level_rounding_differs_from_exact_bezier() {
    let c = curve([(0, 0), (7, 31), (29, -13), (41, 17)]);
    let mut differs = false;
    for step in 0..20 {
        let t = step as f64 * SAMPLE_STEP;
        let got = rounded_casteljau(&c, t);
        let (ex, ey) = exact_bezier(&c, t);
        // Drift stays within one unit per reduction level.
        assert!((f64::from(got.x) - ex).abs() <= 3.0);
        assert!((f64::from(got.y) - ey).abs() <= 3.0);
        if got.x != ex.round() as i32 || got.y != ey.round() as i32 {
            differs = true;
        }
    }
    assert!(differs);
}

#[test]
fn hand_computed_midpoint() {
    // (5,0) (10,5) (10,10) -> (7,2) (10,7) -> (8,4); every 2.5 offset rounds down to 2.
    // Exact evaluation gives (8.75, 5.0).
    let c = curve([(0, 0), (10, 0), (10, 10), (10, 10)]);
    assert_eq!(rounded_casteljau(&c, 0.5), Point::new(8, 4));
}

#[test]
fn origin_and_chain_are_applied() {
    let c = curve([(-10, -10); 4]);
    let chain = TransformChain {
        scale: AffineTransform::scale(2.0, Point::ORIGIN),
        rotate: AffineTransform::IDENTITY,
        translate: AffineTransform::translate(Point::new(320, 240)),
    };
    let pts = points(&c, Point::new(30, 30), chain);
    assert!(pts.iter().all(|&p| p == Point::new(360, 280)));
}

#[test]
fn exhausted_iterator_stays_exhausted() {
    let c = curve([(0, 0); 4]);
    let mut it = sample(&c, Point::ORIGIN, TransformChain::default());
    for _ in 0..POINTS_PER_CURVE {
        assert!(it.next().is_some());
    }
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn overflowing_scale_is_an_error_not_a_clamp() {
    let c = curve([(-40, -120), (0, 0), (10, 10), (20, 20)]);
    let chain = TransformChain {
        scale: AffineTransform::scale(1e12, Point::ORIGIN),
        ..TransformChain::default()
    };
    let mut it = sample(&c, Point::new(30, 30), chain);
    assert!(matches!(it.next(), Some(Err(GlyphError::Precondition(_)))));
    assert!(it.next().is_none());
}

#[test]
fn placement_overflow_is_an_error() {
    let c = curve([(10, 0); 4]);
    let mut it = sample(&c, Point::new(i32::MAX - 5, 0), TransformChain::default());
    let err = it.next().unwrap().unwrap_err();
    assert!(err.to_string().contains("overflows at origin"));
    assert!(it.next().is_none());
}

#[test]
fn extreme_control_points_do_not_overflow() {
    let (lo, hi) = (i32::MIN, i32::MAX);
    let c = curve([(lo, hi), (hi, lo), (lo, hi), (hi, lo)]);
    for step in 0..20 {
        // Differences between control points exceed i32; this must not panic.
        let _ = rounded_casteljau(&c, step as f64 * SAMPLE_STEP);
    }
    assert_eq!(rounded_casteljau(&c, 0.0), Point::new(lo, hi));
}
