use crate::models::{Decision, Feedback, SwipeDirection};

/// Tunable gesture parameters, in the presentation layer's distance units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureParams {
    /// Offset beyond which a release commits
    pub swipe_threshold: f64,
    /// Offset below which no overlay is shown
    pub feedback_dead_zone: f64,
    /// Offset at which the overlay is fully opaque
    pub feedback_saturation: f64,
    pub max_tilt_degrees: f64,
    /// Offset at which the tilt reaches its maximum
    pub tilt_range: f64,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            swipe_threshold: 120.0,
            feedback_dead_zone: 20.0,
            feedback_saturation: 100.0,
            max_tilt_degrees: 10.0,
            tilt_range: 200.0,
        }
    }
}

/// Maps a horizontal drag offset to a swipe decision and overlay feedback
#[derive(Debug, Clone, Copy)]
pub struct GestureResolver {
    params: GestureParams,
}

impl GestureResolver {
    pub fn new(params: GestureParams) -> Self {
        Self { params }
    }

    pub fn with_default_params() -> Self {
        Self::new(GestureParams::default())
    }

    pub fn threshold(&self) -> f64 {
        self.params.swipe_threshold.abs()
    }

    /// Decide what a release at `offset` means
    ///
    /// Total over every `f64`: NaN fails both comparisons and snaps back.
    #[inline]
    pub fn resolve(&self, offset: f64) -> Decision {
        let threshold = self.threshold();
        if offset > threshold {
            Decision::Commit(SwipeDirection::Right)
        } else if offset < -threshold {
            Decision::Commit(SwipeDirection::Left)
        } else {
            Decision::SnapBack
        }
    }

    /// Overlay intensities and card tilt while dragging
    pub fn feedback(&self, offset: f64) -> Feedback {
        if offset.is_nan() {
            return Feedback::default();
        }

        Feedback {
            left: self.lean_intensity(-offset),
            right: self.lean_intensity(offset),
            tilt_degrees: self.tilt(offset),
        }
    }

    /// 0 up to the dead zone, linear to 1 at saturation
    #[inline]
    fn lean_intensity(&self, lean: f64) -> f64 {
        let dead_zone = self.params.feedback_dead_zone.max(0.0);
        let span = self.params.feedback_saturation - dead_zone;

        if lean <= dead_zone {
            return 0.0;
        }
        if span <= 0.0 {
            return 1.0;
        }

        ((lean - dead_zone) / span).min(1.0)
    }

    #[inline]
    fn tilt(&self, offset: f64) -> f64 {
        let max = self.params.max_tilt_degrees.abs();
        if self.params.tilt_range <= 0.0 {
            return 0.0;
        }

        (offset / self.params.tilt_range * max).clamp(-max, max)
    }
}

impl Default for GestureResolver {
    fn default() -> Self {
        Self::with_default_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_threshold() {
        let resolver = GestureResolver::with_default_params();

        assert_eq!(resolver.resolve(0.0), Decision::SnapBack);
        assert_eq!(resolver.resolve(120.0), Decision::SnapBack);
        assert_eq!(resolver.resolve(-120.0), Decision::SnapBack);
        assert_eq!(resolver.resolve(120.001), Decision::Commit(SwipeDirection::Right));
        assert_eq!(resolver.resolve(-120.001), Decision::Commit(SwipeDirection::Left));
    }

    #[test]
    fn test_resolve_non_finite() {
        let resolver = GestureResolver::with_default_params();

        assert_eq!(resolver.resolve(f64::NAN), Decision::SnapBack);
        assert_eq!(resolver.resolve(f64::INFINITY), Decision::Commit(SwipeDirection::Right));
        assert_eq!(resolver.resolve(f64::NEG_INFINITY), Decision::Commit(SwipeDirection::Left));
    }

    #[test]
    fn test_negative_threshold_treated_as_magnitude() {
        let resolver = GestureResolver::new(GestureParams {
            swipe_threshold: -50.0,
            ..GestureParams::default()
        });

        assert_eq!(resolver.resolve(10.0), Decision::SnapBack);
        assert_eq!(resolver.resolve(51.0), Decision::Commit(SwipeDirection::Right));
    }

    #[test]
    fn test_feedback_dead_zone_and_saturation() {
        let resolver = GestureResolver::with_default_params();

        let centered = resolver.feedback(0.0);
        assert_eq!(centered.left, 0.0);
        assert_eq!(centered.right, 0.0);

        let halfway = resolver.feedback(60.0);
        assert!((halfway.right - 0.5).abs() < 1e-9);
        assert_eq!(halfway.left, 0.0);

        assert_eq!(resolver.feedback(100.0).right, 1.0);
        assert_eq!(resolver.feedback(500.0).right, 1.0);
        assert_eq!(resolver.feedback(-500.0).left, 1.0);
    }

    #[test]
    fn test_feedback_nan_is_neutral() {
        let resolver = GestureResolver::with_default_params();
        assert_eq!(resolver.feedback(f64::NAN), Feedback::default());
    }

    #[test]
    fn test_tilt_is_clamped() {
        let resolver = GestureResolver::with_default_params();

        assert_eq!(resolver.feedback(0.0).tilt_degrees, 0.0);
        assert!((resolver.feedback(100.0).tilt_degrees - 5.0).abs() < 1e-9);
        assert_eq!(resolver.feedback(1_000.0).tilt_degrees, 10.0);
        assert_eq!(resolver.feedback(-1_000.0).tilt_degrees, -10.0);
    }

    #[test]
    fn test_collapsed_span_is_step() {
        let resolver = GestureResolver::new(GestureParams {
            feedback_dead_zone: 50.0,
            feedback_saturation: 50.0,
            ..GestureParams::default()
        });

        assert_eq!(resolver.feedback(50.0).right, 0.0);
        assert_eq!(resolver.feedback(50.5).right, 1.0);
    }
}
