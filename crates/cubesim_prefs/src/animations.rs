use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

/// Timing of face-turn animations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Whether to speed up turns when several are queued.
    pub dynamic_twist_speed: bool,
    /// Duration of a single turn, in seconds.
    pub twist_duration: f32,
    /// Easing curve applied to turn progress.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            dynamic_twist_speed: false,
            twist_duration: 0.3,
            twist_interpolation: InterpolateFn::default(),
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        VariantArray,
        Display,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    #[allow(missing_docs)]
    pub enum InterpolateFn {
        Lerp,
        #[default]
        QuadInOut,
        Cosine,
        Cubic,
        Circular,
        Bounce,
        Overshoot,
        Underdamped,
        CriticallyDamped,
        CriticallyDried,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        ///
        /// Some curves leave the range briefly before settling at 1.
        pub fn interpolate(self, mut t: f32) -> f32 {
            match self {
                Self::Lerp => t,

                Self::QuadInOut => {
                    // https://easings.net/#easeInOutQuad
                    if t < 0.5 {
                        2.0 * t * t
                    } else {
                        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                    }
                }

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::Circular => {
                    if t < 0.5 {
                        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) * 0.5
                    } else {
                        (1.0 + (1.0 - (-2.0 * t + 2.0).powi(2)).sqrt()) * 0.5
                    }
                }

                Self::Bounce => {
                    // https://easings.net/#easeOutBounce
                    let n1 = 7.5625;
                    let d1 = 2.75;

                    if t < 1.0 / d1 {
                        n1 * t * t
                    } else if t < 2.0 / d1 {
                        t -= 1.5 / d1;
                        n1 * t * t + 0.75
                    } else if t < 2.5 / d1 {
                        t -= 2.25 / d1;
                        n1 * t * t + 0.9375
                    } else {
                        t -= 2.625 / d1;
                        n1 * t * t + 0.984375
                    }
                }
                Self::Overshoot => {
                    // https://easings.net/#easeOutBack
                    let c1 = 1.70158;
                    let c3 = c1 + 1.0;
                    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
                }
                Self::Underdamped => {
                    // https://easings.net/#easeOutElastic
                    let c4 = (2.0 * PI) / 3.0;
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
                Self::CriticallyDamped => (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0,
                Self::CriticallyDried => 1.0 - Self::CriticallyDamped.interpolate(1.0 - t),
            }
        }
    }
}
