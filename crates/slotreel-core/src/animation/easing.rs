//! Bezier easing curves
//!
//! Maps normalized time [0, 1] to normalized progress [0, 1] by reducing a
//! list of control points pair by pair until a single point remains.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A control point in time/progress space: `[time, progress]`
pub type Point = [f64; 2];

const LINEAR: &[Point] = &[[0.0, 0.0], [1.0, 1.0]];
const EASE_IN: &[Point] = &[[0.0, 0.0], [0.42, 0.0], [1.0, 1.0], [1.0, 1.0]];
const EASE_OUT: &[Point] = &[[0.0, 0.0], [0.0, 0.0], [0.58, 1.0], [1.0, 1.0]];
// Same control points as ease-out. Kept identical on purpose so existing
// animations look the same.
const EASE_IN_OUT: &[Point] = &[[0.0, 0.0], [0.0, 0.0], [0.58, 1.0], [1.0, 1.0]];

/// Easing curve used by an animation task
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EasingCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// User supplied control points, used as-is
    Custom(Vec<Point>),
}

impl EasingCurve {
    /// Resolve a timing name. Unknown names fall back to `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "ease-in" => EasingCurve::EaseIn,
            "ease-out" => EasingCurve::EaseOut,
            "ease-in-out" => EasingCurve::EaseInOut,
            _ => EasingCurve::Linear,
        }
    }

    /// Preset name, `None` for custom curves
    pub fn name(&self) -> Option<&'static str> {
        match self {
            EasingCurve::Linear => Some("linear"),
            EasingCurve::EaseIn => Some("ease-in"),
            EasingCurve::EaseOut => Some("ease-out"),
            EasingCurve::EaseInOut => Some("ease-in-out"),
            EasingCurve::Custom(_) => None,
        }
    }

    /// Control points of this curve
    pub fn pivot_points(&self) -> &[Point] {
        match self {
            EasingCurve::Linear => LINEAR,
            EasingCurve::EaseIn => EASE_IN,
            EasingCurve::EaseOut => EASE_OUT,
            EasingCurve::EaseInOut => EASE_IN_OUT,
            EasingCurve::Custom(points) => points,
        }
    }

    /// Progress at normalized time `t` (clamped to [0, 1])
    ///
    /// The endpoints are exact: t = 0 gives the first control point's
    /// progress and t = 1 the last one's. A custom curve without points
    /// yields 0.
    pub fn progress(&self, t: f64) -> f64 {
        let points = self.pivot_points();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let exact = if t <= 0.0 {
            points.first()
        } else if t >= 1.0 {
            points.last()
        } else {
            None
        };
        match exact {
            Some(p) => p[1],
            None => evaluate(points, t).map(|p| p[1]).unwrap_or(0.0),
        }
    }
}

impl fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "custom({} points)", self.pivot_points().len()),
        }
    }
}

/// Reduce `points` at time `t` to a single point
///
/// Each level replaces every consecutive pair with the point lying `t` of the
/// way along the segment, measured as a percentage of its length. Empty input
/// gives `None`; a single point is returned unchanged.
pub fn evaluate(points: &[Point], t: f64) -> Option<Point> {
    let mut level: Vec<Point> = points.to_vec();
    if level.len() < 2 {
        return level.first().copied();
    }

    let percent = t * 100.0;
    while level.len() > 1 {
        for i in 1..level.len() {
            level[i - 1] = point_on_segment(level[i - 1], level[i], percent);
        }
        level.pop();
    }

    level.first().copied()
}

#[inline]
fn segment_length([x1, y1]: Point, [x2, y2]: Point) -> f64 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Point `percent`% along the segment from `p1` to `p2`
///
/// A zero-length segment yields `p1`.
#[inline]
fn point_on_segment(p1: Point, p2: Point, percent: f64) -> Point {
    let length = segment_length(p1, p2);
    let covered = length / 100.0 * percent;
    let k = covered / length;
    let k = if k.is_nan() { 0.0 } else { k };

    [p1[0] + (p2[0] - p1[0]) * k, p1[1] + (p2[1] - p1[1]) * k]
}

impl Serialize for EasingCurve {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            EasingCurve::Custom(points) => points.serialize(serializer),
            preset => serializer.serialize_str(preset.name().unwrap_or("linear")),
        }
    }
}

// Accept either a preset name or a list of [x, y] control points
impl<'de> Deserialize<'de> for EasingCurve {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};

        struct EasingCurveVisitor;

        impl<'de> Visitor<'de> for EasingCurveVisitor {
            type Value = EasingCurve;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an easing name or a list of [x, y] control points")
            }

            fn visit_str<E>(self, value: &str) -> Result<EasingCurve, E>
            where
                E: de::Error,
            {
                Ok(EasingCurve::from_name(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<EasingCurve, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut points = Vec::new();
                while let Some(point) = seq.next_element::<Point>()? {
                    points.push(point);
                }
                if points.len() < 2 {
                    return Err(de::Error::invalid_length(points.len(), &"at least 2 points"));
                }
                Ok(EasingCurve::Custom(points))
            }
        }

        deserializer.deserialize_any(EasingCurveVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: [EasingCurve; 4] = [
        EasingCurve::Linear,
        EasingCurve::EaseIn,
        EasingCurve::EaseOut,
        EasingCurve::EaseInOut,
    ];

    #[test]
    fn test_preset_endpoints() {
        for curve in PRESETS {
            let points = curve.pivot_points();
            let first = evaluate(points, 0.0).unwrap();
            let last = evaluate(points, 1.0).unwrap();
            assert!((first[1] - points[0][1]).abs() < 1e-9, "{} at t=0", curve);
            assert!((last[1] - points[points.len() - 1][1]).abs() < 1e-9, "{} at t=1", curve);
        }
    }

    #[test]
    fn test_preset_monotonic() {
        for curve in PRESETS {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f64 / 100.0;
                let v = curve.progress(t);
                assert!(v + 1e-12 >= prev, "{} not monotonic at t={}", curve, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((EasingCurve::Linear.progress(t) - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ease_out_matches_ease_in_out() {
        assert_eq!(
            EasingCurve::EaseOut.pivot_points(),
            EasingCurve::EaseInOut.pivot_points()
        );
        assert!((EasingCurve::EaseOut.progress(0.3) - EasingCurve::EaseInOut.progress(0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_cubic_presets_follow_progress_polynomial() {
        // Only the y coordinates matter: y(t) = 3(1-t)t^2 + t^3
        for curve in [EasingCurve::EaseIn, EasingCurve::EaseOut] {
            assert!((curve.progress(0.5) - 0.5).abs() < 1e-9, "{}", curve);
            assert!((curve.progress(0.25) - 0.15625).abs() < 1e-9, "{}", curve);
            assert!((curve.progress(0.75) - 0.84375).abs() < 1e-9, "{}", curve);
        }
    }

    #[test]
    fn test_short_inputs_passthrough() {
        assert_eq!(evaluate(&[], 0.5), None);
        assert_eq!(evaluate(&[[0.3, 0.7]], 0.5), Some([0.3, 0.7]));
    }

    #[test]
    fn test_coincident_points_do_not_produce_nan() {
        let points = [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]];
        let p = evaluate(&points, 0.5).unwrap();
        assert_eq!(p, [0.0, 0.0]);
    }

    #[test]
    fn test_unknown_name_is_linear() {
        assert_eq!(EasingCurve::from_name("bounce"), EasingCurve::Linear);
        assert_eq!(EasingCurve::from_name("Ease-Out"), EasingCurve::EaseOut);
    }

    #[test]
    fn test_progress_clamps_time() {
        assert!((EasingCurve::Linear.progress(-1.0)).abs() < 1e-12);
        assert!((EasingCurve::Linear.progress(2.0) - 1.0).abs() < 1e-12);
        assert!((EasingCurve::Linear.progress(f64::NAN)).abs() < 1e-12);
        assert_eq!(EasingCurve::Custom(Vec::new()).progress(0.5), 0.0);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        easing: EasingCurve,
    }

    #[test]
    fn test_deserialize_name_and_points() {
        let named: Holder = toml::from_str("easing = \"ease-in\"").unwrap();
        assert_eq!(named.easing, EasingCurve::EaseIn);

        let custom: Holder = toml::from_str("easing = [[0.0, 0.0], [1.0, 1.0]]").unwrap();
        assert_eq!(custom.easing, EasingCurve::Custom(vec![[0.0, 0.0], [1.0, 1.0]]));

        assert!(toml::from_str::<Holder>("easing = [[0.0, 0.0]]").is_err());
    }

    #[test]
    fn test_serialize_round_trip_preset() {
        let text = toml::to_string(&Holder { easing: EasingCurve::EaseOut }).unwrap();
        assert!(text.contains("ease-out"));
    }
}
