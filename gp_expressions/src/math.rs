//! Scalar kernels behind the built-in functions.
//!
//! Every kernel is total: division, inversion and logarithm are protected so
//! that arbitrary evolved trees can always be evaluated.

/// Magnitude below which a denominator (or logarithm argument) is treated as zero.
pub const PROTECTION_EPSILON: f64 = 1e-10;

#[inline]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[inline]
pub fn cos(x: f64) -> f64 {
    x.cos()
}

#[inline]
pub fn exp(x: f64) -> f64 {
    x.exp()
}

/// `1 / x`, or `1` when `|x|` is below [`PROTECTION_EPSILON`].
#[inline]
pub fn inv(x: f64) -> f64 {
    if x.abs() < PROTECTION_EPSILON {
        1.0
    } else {
        1.0 / x
    }
}

/// `ln(|x|)`, or `0` when `|x|` is below [`PROTECTION_EPSILON`].
#[inline]
pub fn log(x: f64) -> f64 {
    if x.abs() < PROTECTION_EPSILON {
        0.0
    } else {
        x.abs().ln()
    }
}

#[inline]
pub fn neg(x: f64) -> f64 {
    -x
}

#[inline]
pub fn sin(x: f64) -> f64 {
    x.sin()
}

#[inline]
pub fn square(x: f64) -> f64 {
    x * x
}

#[inline]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[inline]
pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

#[inline]
pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// `a / b`, or `1` when `|b|` is below [`PROTECTION_EPSILON`].
#[inline]
pub fn div(a: f64, b: f64) -> f64 {
    if b.abs() < PROTECTION_EPSILON {
        1.0
    } else {
        a / b
    }
}

#[inline]
pub fn max(a: f64, b: f64) -> f64 {
    if a > b {
        a
    } else {
        b
    }
}

#[inline]
pub fn min(a: f64, b: f64) -> f64 {
    if a < b {
        a
    } else {
        b
    }
}

#[inline]
pub fn pow(a: f64, b: f64) -> f64 {
    a.powf(b)
}

/// `hi` when the condition is strictly positive, else `lo`.
#[inline]
pub fn select(cond: f64, lo: f64, hi: f64) -> f64 {
    if cond > 0.0 {
        hi
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_kernels_return_sentinels_near_zero() {
        assert_eq!(div(3.0, 0.0), 1.0);
        assert_eq!(div(3.0, 1e-12), 1.0);
        assert_eq!(div(3.0, 2.0), 1.5);
        assert_eq!(inv(0.0), 1.0);
        assert_eq!(inv(-4.0), -0.25);
        assert_eq!(log(0.0), 0.0);
        assert_eq!(log(-1.0), 0.0);
        assert!((log(-std::f64::consts::E) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn select_uses_strict_positivity() {
        assert_eq!(select(0.0, 1.0, 2.0), 1.0);
        assert_eq!(select(1e-300, 1.0, 2.0), 2.0);
        assert_eq!(select(f64::NAN, 1.0, 2.0), 1.0);
    }
}
