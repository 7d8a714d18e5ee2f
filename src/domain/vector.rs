//! 2D point / displacement value type.
//!
//! `Vector` is `Copy`, so `plus` and `times` can never mutate their operands.

use crate::error::{KernelError, Result};

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };
    pub const ONE: Vector = Vector { x: 1.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// Component-wise sum. Returns a new vector.
    pub fn plus(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    /// Scale both components by `k`. Returns a new vector.
    pub fn times(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Reject NaN / infinite components. `what` names the argument in the error.
    pub(crate) fn check_finite(self, what: &'static str) -> Result<Vector> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(KernelError::NonFinite { what, x: self.x, y: self.y })
        }
    }

    /// A size must be finite and have no negative component.
    pub(crate) fn check_size(self) -> Result<Vector> {
        self.check_finite("size")?;
        if self.x < 0.0 || self.y < 0.0 {
            return Err(KernelError::NegativeSize { x: self.x, y: self.y });
        }
        Ok(self)
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        self.plus(other)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.times(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_adds_components() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -5.0);
        let c = a.plus(b);
        assert_eq!(c, Vector::new(4.0, -3.0));
        // operands untouched
        assert_eq!(a, Vector::new(1.0, 2.0));
        assert_eq!(b, Vector::new(3.0, -5.0));
    }

    #[test]
    fn times_scales_components() {
        let a = Vector::new(2.0, -1.5);
        assert_eq!(a.times(2.0), Vector::new(4.0, -3.0));
        assert_eq!(a.times(0.0), Vector::ZERO);
        assert_eq!(a, Vector::new(2.0, -1.5));
    }

    #[test]
    fn operators_match_methods() {
        let a = Vector::new(1.0, 1.0);
        let b = Vector::new(0.5, 2.0);
        assert_eq!(a + b, a.plus(b));
        assert_eq!(b * 3.0, b.times(3.0));
    }

    #[test]
    fn default_is_origin() {
        assert_eq!(Vector::default(), Vector::ZERO);
    }

    #[test]
    fn non_finite_rejected() {
        let err = Vector::new(f64::NAN, 0.0).check_finite("pos").unwrap_err();
        assert!(matches!(err, KernelError::NonFinite { what: "pos", .. }));
        assert!(Vector::new(1.0, f64::INFINITY).check_finite("speed").is_err());
        assert!(Vector::new(1.0, 2.0).check_finite("pos").is_ok());
    }

    #[test]
    fn negative_size_rejected() {
        assert_eq!(
            Vector::new(-1.0, 1.0).check_size(),
            Err(KernelError::NegativeSize { x: -1.0, y: 1.0 })
        );
        assert!(Vector::ZERO.check_size().is_ok());
    }
}
