//! Easing curves over normalized time.
//!
//! Every curve maps `t` in `[0, 1]` to a progress value, with `f(0) = 0` and
//! `f(1) = 1`. Inputs outside the unit range are clamped first. Back and
//! elastic curves overshoot in between; that is their point.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownEasing;

const BACK_OVERSHOOT: f32 = 1.70158;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    /// t^2
    QuadIn,
    QuadOut,
    QuadInOut,
    /// t^3
    CubicIn,
    CubicOut,
    CubicInOut,
    /// t^4
    QuartIn,
    QuartOut,
    QuartInOut,
    /// t^5
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// 2^t
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// sqrt(1 - t^2)
    CircIn,
    CircOut,
    CircInOut,
    /// Exponentially decaying sine wave.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Overshooting cubic: (s + 1) t^3 - s t^2.
    BackIn,
    BackOut,
    BackInOut,
    /// Exponentially decaying parabolic bounce.
    BounceIn,
    BounceOut,
    BounceInOut,
    /// sin^2(t * pi / 2)
    SineSquare,
    /// Logistic curve centered on 0.5.
    Exponential,
    Schubring1,
    Schubring2,
    Schubring3,
    SinPi2,
    AccelBreak,
}

impl Easing {
    pub const ALL: [Easing; 38] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::SineSquare,
        Easing::Exponential,
        Easing::Schubring1,
        Easing::Schubring2,
        Easing::Schubring3,
        Easing::SinPi2,
        Easing::AccelBreak,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::QuartIn => "quart_in",
            Easing::QuartOut => "quart_out",
            Easing::QuartInOut => "quart_in_out",
            Easing::QuintIn => "quint_in",
            Easing::QuintOut => "quint_out",
            Easing::QuintInOut => "quint_in_out",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::SineInOut => "sine_in_out",
            Easing::ExpoIn => "expo_in",
            Easing::ExpoOut => "expo_out",
            Easing::ExpoInOut => "expo_in_out",
            Easing::CircIn => "circ_in",
            Easing::CircOut => "circ_out",
            Easing::CircInOut => "circ_in_out",
            Easing::ElasticIn => "elastic_in",
            Easing::ElasticOut => "elastic_out",
            Easing::ElasticInOut => "elastic_in_out",
            Easing::BackIn => "back_in",
            Easing::BackOut => "back_out",
            Easing::BackInOut => "back_in_out",
            Easing::BounceIn => "bounce_in",
            Easing::BounceOut => "bounce_out",
            Easing::BounceInOut => "bounce_in_out",
            Easing::SineSquare => "sine_square",
            Easing::Exponential => "exponential",
            Easing::Schubring1 => "schubring1",
            Easing::Schubring2 => "schubring2",
            Easing::Schubring3 => "schubring3",
            Easing::SinPi2 => "sin_pi2",
            Easing::AccelBreak => "accel_break",
        }
    }

    /// Evaluates the curve at `t`. `t <= 0` (and NaN) gives 0, `t >= 1` gives 1.
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => (2.0 - t) * t,
            Easing::QuadInOut => in_out(t, |x| 0.5 * x * x, |u| -0.5 * (u * (u - 2.0) - 1.0), 1.0),

            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 + (t - 1.0).powi(3),
            Easing::CubicInOut => in_out(t, |x| 0.5 * x.powi(3), |u| 0.5 * (u.powi(3) + 2.0), 2.0),

            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (t - 1.0).powi(4),
            Easing::QuartInOut => in_out(t, |x| 0.5 * x.powi(4), |u| -0.5 * (u.powi(4) - 2.0), 2.0),

            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 + (t - 1.0).powi(5),
            Easing::QuintInOut => in_out(t, |x| 0.5 * x.powi(5), |u| 0.5 * (u.powi(5) + 2.0), 2.0),

            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -0.5 * ((PI * t).cos() - 1.0),

            Easing::ExpoIn => 2f32.powf(10.0 * (t - 1.0)),
            Easing::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Easing::ExpoInOut => in_out(
                t,
                |x| 0.5 * 2f32.powf(10.0 * (x - 1.0)),
                |u| 0.5 * (2.0 - 2f32.powf(-10.0 * u)),
                1.0,
            ),

            Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Easing::CircOut => {
                let u = t - 1.0;
                (1.0 - u * u).sqrt()
            }
            Easing::CircInOut => in_out(
                t,
                |x| -0.5 * ((1.0 - x * x).sqrt() - 1.0),
                |u| 0.5 * ((1.0 - u * u).sqrt() + 1.0),
                2.0,
            ),

            Easing::ElasticIn => {
                let (p, s) = (0.3, 0.3 / 4.0);
                let u = t - 1.0;
                -(2f32.powf(10.0 * u) * ((u - s) * (2.0 * PI) / p).sin())
            }
            Easing::ElasticOut => {
                let (p, s) = (0.3, 0.3 / 4.0);
                2f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / p).sin() + 1.0
            }
            Easing::ElasticInOut => {
                let (p, s) = (0.45, 0.45 / 4.0);
                let u = t * 2.0 - 1.0;
                let wave = ((u - s) * (2.0 * PI) / p).sin();
                if u < 0.0 {
                    -0.5 * 2f32.powf(10.0 * u) * wave
                } else {
                    0.5 * 2f32.powf(-10.0 * u) * wave + 1.0
                }
            }

            Easing::BackIn => {
                let s = BACK_OVERSHOOT;
                t * t * ((s + 1.0) * t - s)
            }
            Easing::BackOut => {
                let s = BACK_OVERSHOOT;
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Easing::BackInOut => {
                let s = BACK_OVERSHOOT * 1.525;
                in_out(
                    t,
                    |x| 0.5 * (x * x * ((s + 1.0) * x - s)),
                    |u| 0.5 * (u * u * ((s + 1.0) * u + s) + 2.0),
                    2.0,
                )
            }

            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - t * 2.0)) * 0.5
                } else {
                    bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }

            Easing::SineSquare => {
                let a = (0.5 * t * PI).sin();
                a * a
            }
            Easing::Exponential => 1.0 / (1.0 + (6.0 - 12.0 * t).exp()),
            Easing::Schubring1 => schubring(t),
            Easing::Schubring2 => schubring(schubring(t)),
            Easing::Schubring3 => {
                let first = schubring(t);
                (first + schubring(first)) / 2.0
            }
            Easing::SinPi2 => (t * 0.5 * PI).sin(),
            Easing::AccelBreak => ((t * PI - PI * 0.5).sin() + 1.0) * 0.5,
        }
    }
}

/// Splits the unit interval at 0.5: `first` sees `2t` in `[0, 1)`, `second`
/// sees `2t - back`.
fn in_out(t: f32, first: impl Fn(f32) -> f32, second: impl Fn(f32) -> f32, back: f32) -> f32 {
    let x = t * 2.0;
    if x < 1.0 {
        first(x)
    } else {
        second(x - back)
    }
}

fn bounce_out(t: f32) -> f32 {
    const K: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        K * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        K * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        K * u * u + 0.984375
    }
}

fn schubring(t: f32) -> f32 {
    2.0 * (t + (0.5 - t) * (0.5 - t).abs()) - 0.5
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

/// Precomputed samples of one curve, for hot loops where a nearest-lower
/// sample is accurate enough.
#[derive(Debug, Clone)]
pub struct EasingTable {
    easing: Easing,
    samples: Vec<f32>,
}

impl EasingTable {
    pub const SLOTS: usize = 256;

    pub fn new(easing: Easing) -> Self {
        let last = (Self::SLOTS - 1) as f32;
        let samples = (0..Self::SLOTS)
            .map(|i| easing.apply(i as f32 / last))
            .collect();
        Self { easing, samples }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn sample(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let slot = (t * (Self::SLOTS - 1) as f32) as usize;
        self.samples[slot.min(Self::SLOTS - 1)]
    }
}

/// Identity ramp.
pub fn ping(t: f32) -> f32 {
    t
}

/// Descending ramp.
pub fn pong(t: f32) -> f32 {
    1.0 - t
}

/// Up then down: 0 at both ends, 1 at the midpoint.
pub fn pingpong(t: f32) -> f32 {
    if t < 0.5 {
        t + t
    } else {
        2.0 - t - t
    }
}

/// Triangle wave over one period: 0, up to 1, down to -1, back to 0.
pub fn sinus(t: f32) -> f32 {
    let x4 = t * 4.0;
    if x4 >= 3.0 {
        x4 - 4.0
    } else if x4 < 1.0 {
        x4
    } else {
        2.0 - x4
    }
}

pub fn linear(t: f32) -> f32 {
    Easing::Linear.apply(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{}", easing);
            assert_eq!(easing.apply(-3.0), 0.0, "{}", easing);
            assert_eq!(easing.apply(7.0), 1.0, "{}", easing);
            assert_eq!(easing.apply(f32::NAN), 0.0, "{}", easing);
        }
    }

    #[test]
    fn test_near_endpoints_are_continuous() {
        for easing in Easing::ALL {
            let lo = easing.apply(1e-6);
            let hi = easing.apply(1.0 - 1e-6);
            assert!(lo.abs() < 0.01, "{} at 0+: {}", easing, lo);
            assert!((hi - 1.0).abs() < 0.01, "{} at 1-: {}", easing, hi);
        }
    }

    #[rstest]
    #[case(Easing::Linear, 0.5, 0.5)]
    #[case(Easing::QuadIn, 0.5, 0.25)]
    #[case(Easing::QuadOut, 0.5, 0.75)]
    #[case(Easing::QuadInOut, 0.5, 0.5)]
    #[case(Easing::QuadInOut, 0.25, 0.125)]
    #[case(Easing::CubicIn, 0.5, 0.125)]
    #[case(Easing::CubicOut, 0.5, 0.875)]
    #[case(Easing::CubicInOut, 0.5, 0.5)]
    #[case(Easing::QuartIn, 0.5, 0.0625)]
    #[case(Easing::QuartOut, 0.5, 0.9375)]
    #[case(Easing::QuintIn, 0.5, 0.03125)]
    #[case(Easing::QuintOut, 0.5, 0.96875)]
    #[case(Easing::SineInOut, 0.5, 0.5)]
    #[case(Easing::ExpoIn, 0.5, 0.03125)]
    #[case(Easing::ExpoOut, 0.5, 0.96875)]
    #[case(Easing::ExpoInOut, 0.5, 0.5)]
    #[case(Easing::CircInOut, 0.5, 0.5)]
    #[case(Easing::BounceOut, 0.5, 0.765625)]
    #[case(Easing::BounceInOut, 0.5, 0.5)]
    #[case(Easing::SineSquare, 0.5, 0.5)]
    #[case(Easing::Exponential, 0.5, 0.5)]
    #[case(Easing::Schubring1, 0.5, 0.5)]
    #[case(Easing::Schubring2, 0.5, 0.5)]
    #[case(Easing::Schubring3, 0.5, 0.5)]
    #[case(Easing::AccelBreak, 0.5, 0.5)]
    fn test_known_values(#[case] easing: Easing, #[case] t: f32, #[case] expected: f32) {
        let got = easing.apply(t);
        assert!((got - expected).abs() < EPS, "{}({}) = {}", easing, t, got);
    }

    #[test]
    fn test_back_overshoots() {
        assert!(Easing::BackIn.apply(0.2) < 0.0);
        assert!(Easing::BackOut.apply(0.8) > 1.0);
    }

    #[test]
    fn test_in_out_symmetry() {
        for easing in [Easing::QuadInOut, Easing::CubicInOut, Easing::SineInOut] {
            for i in 1..50 {
                let t = i as f32 / 100.0;
                let sum = easing.apply(t) + easing.apply(1.0 - t);
                assert!((sum - 1.0).abs() < EPS, "{} at {}", easing, t);
            }
        }
    }

    #[test]
    fn test_names_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert_eq!(
            "wobble".parse::<Easing>(),
            Err(UnknownEasing("wobble".to_string()))
        );
    }

    #[test]
    fn test_table_tracks_curve() {
        let table = EasingTable::new(Easing::QuadIn);
        assert_eq!(table.easing(), Easing::QuadIn);
        assert_eq!(table.sample(0.0), 0.0);
        assert_eq!(table.sample(1.0), 1.0);
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert!((table.sample(t) - Easing::QuadIn.apply(t)).abs() < 0.01);
        }
    }

    #[test]
    fn test_waves() {
        assert_eq!(ping(0.3), 0.3);
        assert!((pong(0.3) - 0.7).abs() < EPS);
        assert_eq!(pingpong(0.25), 0.5);
        assert_eq!(pingpong(0.75), 0.5);
        assert_eq!(pingpong(0.5), 1.0);
        assert_eq!(sinus(0.0), 0.0);
        assert_eq!(sinus(0.25), 1.0);
        assert_eq!(sinus(0.5), 0.0);
        assert_eq!(sinus(0.75), -1.0);
        assert_eq!(linear(0.4), 0.4);
    }
}
