//! Native quaternion math.
//!
//! [`Quat`] stores its components as `(x, y, z, w)` with `w` as the scalar
//! part.  Every operation returns a fresh value; nothing here mutates its
//! operands.

use std::fmt;
use std::ops::{Add, Mul};

/// A four-component quaternion `xi + yj + zk + w`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Components in constructor order: `[x, y, z, w]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Four-dimensional dot product.
    pub fn dot(self, other: Quat) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Euclidean norm.
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Angle between `self` and `other` viewed as 4-vectors, in radians.
    ///
    /// The cosine is clamped to `[-1, 1]` so that rounding on (anti)parallel
    /// inputs cannot push it out of `acos`'s domain.  A zero-magnitude
    /// operand has no direction and yields `NaN`.
    pub fn angle_rad(self, other: Quat) -> f64 {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 {
            return f64::NAN;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Same as [`Quat::angle_rad`], in degrees.
    pub fn angle_deg(self, other: Quat) -> f64 {
        self.angle_rad(other).to_degrees()
    }
}

impl From<[f64; 4]> for Quat {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

/// Hamilton product.
impl Mul for Quat {
    type Output = Quat;

    fn mul(self, b: Quat) -> Quat {
        let a = self;
        Quat {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }
}

impl Add for Quat {
    type Output = Quat;

    fn add(self, b: Quat) -> Quat {
        Quat::new(self.x + b.x, self.y + b.y, self.z + b.z, self.w + b.w)
    }
}

/// One component at three decimals; infinities print as `+Inf` / `-Inf`.
fn write_component(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_infinite() {
        f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{v:.3}")
    }
}

/// `[x y z w]`, three decimals per component.
impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.to_array().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_component(f, v)?;
        }
        f.write_str("]")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
