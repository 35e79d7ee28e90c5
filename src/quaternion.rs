//! Quaternion rotation algebra on top of the vector layer.
//!
//! A [`Quaternion`] is representationally a [`Vector`] — (x, y, z) the
//! imaginary part, w the real part — wrapped in a newtype so a rotation can't
//! be fed where a point is expected by accident. The wrapper is
//! `#[repr(transparent)]` and costs nothing at runtime.
//!
//! Rotation operations assume unit norm (x² + y² + z² + w² = 1). That is a
//! caller obligation: nothing here checks or renormalizes, and a non-unit
//! quaternion silently produces scaled results.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use crate::backend::{Active, QuaternionKernels};
use crate::vector::Vector;

/// Rotation quaternion (x, y, z | w), stored exactly like a [`Vector`].
///
/// # Example
/// ```
/// use ganita::{Quaternion, Vector};
///
/// let v = Vector::new(1.0, 2.0, 3.0, 0.0);
/// let r = Quaternion::identity().rotate(v);
/// assert_eq!(r.to_array(), [1.0, 2.0, 3.0, 1.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Quaternion(Vector);

impl Quaternion {
    /// Build a quaternion from its four lanes.
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(Vector::new(x, y, z, w))
    }

    /// Reinterpret a vector as a quaternion.
    #[inline(always)]
    pub const fn from_vector(v: Vector) -> Self {
        Self(v)
    }

    /// The underlying vector value.
    #[inline(always)]
    pub const fn into_vector(self) -> Vector {
        self.0
    }

    /// The identity rotation (0, 0, 0, 1).
    #[inline(always)]
    pub const fn identity() -> Self {
        Self(Vector::origo())
    }

    /// The zero quaternion.
    #[inline(always)]
    pub const fn zero() -> Self {
        Self(Vector::zero())
    }

    /// Read four contiguous floats from a 16-byte-aligned location.
    ///
    /// # Safety
    ///
    /// Same contract as [`Vector::load_aligned`].
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self(Vector::load_aligned(ptr))
    }

    /// Read four contiguous floats with no alignment requirement.
    ///
    /// # Safety
    ///
    /// Same contract as [`Vector::load_unaligned`].
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self(Vector::load_unaligned(ptr))
    }

    /// The x lane.
    #[inline(always)]
    pub const fn x(self) -> f32 {
        self.0.x()
    }

    /// The y lane.
    #[inline(always)]
    pub const fn y(self) -> f32 {
        self.0.y()
    }

    /// The z lane.
    #[inline(always)]
    pub const fn z(self) -> f32 {
        self.0.z()
    }

    /// The w (scalar) lane.
    #[inline(always)]
    pub const fn w(self) -> f32 {
        self.0.w()
    }

    /// Negate the imaginary part: (-x, -y, -z, w).
    #[inline(always)]
    pub fn conjugate(self) -> Self {
        Active::quat_conjugate(self)
    }

    /// The multiplicative inverse, conjugate / norm².
    ///
    /// A zero quaternion divides by zero and yields infinities — the vector
    /// layer's unguarded division policy applies here too.
    #[inline(always)]
    pub fn inverse(self) -> Self {
        Active::quat_inverse(self)
    }

    /// Renormalize to unit length via [`Vector::normalize`].
    #[inline(always)]
    pub fn normalize(self) -> Self {
        Self(self.0.normalize())
    }

    /// Spherical linear interpolation toward `to`.
    ///
    /// Takes the short arc: when the quaternions lie in opposite hemispheres
    /// the target is negated first, since `q` and `-q` are the same rotation.
    /// Coincident and zero-angle pairs return the (possibly negated) target
    /// without interpolating.
    #[inline]
    pub fn slerp(self, to: Quaternion, factor: f32) -> Self {
        Active::quat_slerp(self, to, factor)
    }

    /// Rotate a vector by this quaternion (which must be unit norm).
    ///
    /// The result's w lane is forced to 1, so the output reads as an affine
    /// point regardless of the input's w lane.
    #[inline(always)]
    pub fn rotate(self, v: Vector) -> Vector {
        Active::quat_rotate(self, v)
    }

    /// Approximate equality, 100 ULP per lane — see [`Vector::approx_eq`].
    #[inline]
    pub fn approx_eq(self, other: Quaternion) -> bool {
        self.0.approx_eq(other.0)
    }
}

impl Default for Quaternion {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    /// Hamilton product; `q0 * q1` is "q1 acting on q0". Non-commutative.
    ///
    /// # Example
    /// ```
    /// use ganita::Quaternion;
    /// use approx::assert_relative_eq;
    ///
    /// let q = Quaternion::new(1.0, -2.0, 3.0, -4.0);
    /// let p = q * q.inverse();
    /// assert_relative_eq!(p.into_vector(), Quaternion::identity().into_vector(), epsilon = 1e-5);
    /// ```
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Active::quat_mul(self, rhs)
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        Vector::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        Vector::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

impl UlpsEq for Quaternion {
    fn default_max_ulps() -> u32 {
        Vector::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
        self.0.ulps_eq(&other.0, epsilon, max_ulps)
    }
}
