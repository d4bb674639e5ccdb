//! Floating-point transforms over any [`BitSource`]
//!
//! Every transform reads the raw sample as a signed 32-bit integer:
//!
//! - [`uniform01`]: negative values divided by `i32::MIN`, positive values by
//!   `i32::MAX`, zero stays zero. Result in `[0, 1)`.
//! - [`uniform_signed`]: same, except negative values are negated before the
//!   division by `i32::MIN`. Result in `(-1, 1)`.
//! - [`gaussian_polar`]: Marsaglia's polar form of Box-Muller on
//!   [`uniform_signed`] pairs (Knuth TAOCP vol. 2, 3.4.1 C, algorithm P).
//!
//! The two raw extremes (`i32::MIN`, `i32::MAX`) divide to exactly ±1.0;
//! those are pulled in to the nearest representable value inside the
//! interval.

use crate::rng::BitSource;

/// Largest f64 strictly below 1.0
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

const INT_MIN: f64 = i32::MIN as f64;
const INT_MAX: f64 = i32::MAX as f64;

/// Uniform sample in `[0.0, 1.0)`
pub fn uniform01<S: BitSource + ?Sized>(source: &mut S) -> f64 {
    let value = f64::from(source.next_i32());

    let unit = if value < 0.0 {
        value / INT_MIN
    } else if value > 0.0 {
        value / INT_MAX
    } else {
        0.0
    };

    unit.min(ONE_BELOW)
}

/// Uniform sample in `(-1.0, 1.0)`
pub fn uniform_signed<S: BitSource + ?Sized>(source: &mut S) -> f64 {
    let value = f64::from(source.next_i32());

    // Inherited arithmetic: negation followed by division by i32::MIN.
    // The two sign flips cancel, so negative raw values stay negative.
    let unit = if value < 0.0 {
        -value / INT_MIN
    } else if value > 0.0 {
        value / INT_MAX
    } else {
        0.0
    };

    unit.clamp(-ONE_BELOW, ONE_BELOW)
}

/// Standard normal sample (mean 0, variance 1)
///
/// Rejection loop without an iteration cap; each attempt is rejected with
/// probability about 1 - π/4. See [`gaussian_polar_bounded`] for a capped
/// variant.
pub fn gaussian_polar<S: BitSource + ?Sized>(source: &mut S) -> f64 {
    loop {
        if let Some(value) = polar_attempt(source) {
            return value;
        }
    }
}

/// [`gaussian_polar`] giving up after `max_attempts` rejected pairs
pub fn gaussian_polar_bounded<S: BitSource + ?Sized>(
    source: &mut S,
    max_attempts: usize,
) -> Option<f64> {
    (0..max_attempts).find_map(|_| polar_attempt(source))
}

fn polar_attempt<S: BitSource + ?Sized>(source: &mut S) -> Option<f64> {
    let v1 = uniform_signed(source);
    let v2 = uniform_signed(source);
    let s = v1 * v1 + v2 * v2;

    if s >= 1.0 || s == 0.0 {
        return None;
    }

    Some(v1 * (-2.0 * s.ln() / s).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of raw samples
    struct Scripted {
        values: Vec<u32>,
        position: usize,
    }

    impl Scripted {
        fn new(values: &[i32]) -> Self {
            Self {
                values: values.iter().map(|&v| v as u32).collect(),
                position: 0,
            }
        }
    }

    impl BitSource for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.position % self.values.len()];
            self.position += 1;
            value
        }
    }

    #[test]
    fn test_uniform01_mapping() {
        let mut src = Scripted::new(&[0, i32::MAX / 2, -(1 << 30)]);

        assert_eq!(uniform01(&mut src), 0.0);
        assert!((uniform01(&mut src) - 0.5).abs() < 1e-9);
        assert_eq!(uniform01(&mut src), 0.5);
    }

    #[test]
    fn test_uniform01_extremes_stay_below_one() {
        let mut src = Scripted::new(&[i32::MAX, i32::MIN]);

        let a = uniform01(&mut src);
        let b = uniform01(&mut src);
        assert!(a < 1.0 && a > 0.999_999);
        assert!(b < 1.0 && b > 0.999_999);
    }

    #[test]
    fn test_uniform_signed_keeps_sign() {
        let mut src = Scripted::new(&[-(1 << 30), 1 << 30, 0]);

        assert_eq!(uniform_signed(&mut src), -0.5);
        assert!((uniform_signed(&mut src) - 0.5).abs() < 1e-9);
        assert_eq!(uniform_signed(&mut src), 0.0);
    }

    #[test]
    fn test_uniform_signed_extremes_stay_open() {
        let mut src = Scripted::new(&[i32::MIN, i32::MAX]);

        let low = uniform_signed(&mut src);
        let high = uniform_signed(&mut src);
        assert!(low > -1.0 && low < -0.999_999);
        assert!(high < 1.0 && high > 0.999_999);
    }

    #[test]
    fn test_polar_rejects_zero_and_outside_unit_disc() {
        // (0, 0) gives s == 0, (MAX, MAX) gives s ≈ 2; both are rejected
        let mut src = Scripted::new(&[0, 0, i32::MAX, i32::MAX]);
        assert_eq!(gaussian_polar_bounded(&mut src, 2), None);
    }

    #[test]
    fn test_polar_accepts_inside_unit_disc() {
        // v1 = v2 = 0.5, s = 0.5
        let half = 1 << 30;
        let mut src = Scripted::new(&[half, half]);

        let value = gaussian_polar(&mut src);
        let v1 = f64::from(half) / INT_MAX;
        let s = 2.0 * v1 * v1;
        let expected = v1 * (-2.0 * s.ln() / s).sqrt();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_polar_bounded_zero_attempts() {
        let mut src = Scripted::new(&[1 << 30]);
        assert_eq!(gaussian_polar_bounded(&mut src, 0), None);
        assert_eq!(src.position, 0);
    }
}
