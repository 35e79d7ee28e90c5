//! Backend layering and compile-time selection.
//!
//! Every operation in the catalogue is a method on one of three kernel traits,
//! and every method has a default body that runs the portable reference kernel.
//! An accelerated backend claims an operation by overriding the method; whatever
//! it leaves alone falls through to the reference implementation. After the two
//! layers combine, each operation has exactly one definition and the whole
//! catalogue stays callable no matter which subset a backend accelerates.
//!
//! Selection happens once, at build configuration time, through the
//! [`Active`] alias below. There is no runtime dispatch: every call site
//! monomorphizes against the selected backend and inlines.
//!
//! ```text
//! vector.rs / quaternion.rs / matrix.rs
//!            |
//!            v
//!     backend::Active  --(claimed ops)-->  sse.rs / neon.rs
//!            |
//!            +---------(everything else)-> portable.rs
//! ```

pub(crate) mod portable;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod sse;

#[cfg(target_arch = "aarch64")]
mod neon;

use crate::matrix::Matrix;
use crate::quaternion::Quaternion;
use crate::vector::Vector;

/// Vector operation kernels. Defaults are the portable reference.
pub(crate) trait VectorKernels {
    #[inline(always)]
    fn add(v0: Vector, v1: Vector) -> Vector {
        portable::add(v0, v1)
    }
    #[inline(always)]
    fn sub(v0: Vector, v1: Vector) -> Vector {
        portable::sub(v0, v1)
    }
    #[inline(always)]
    fn mul(v0: Vector, v1: Vector) -> Vector {
        portable::mul(v0, v1)
    }
    #[inline(always)]
    fn div(v0: Vector, v1: Vector) -> Vector {
        portable::div(v0, v1)
    }
    #[inline(always)]
    fn neg(v: Vector) -> Vector {
        portable::neg(v)
    }
    #[inline(always)]
    fn scale(v: Vector, s: f32) -> Vector {
        portable::scale(v, s)
    }
    #[inline(always)]
    fn muladd(v: Vector, m: Vector, a: Vector) -> Vector {
        portable::muladd(v, m, a)
    }
    #[inline(always)]
    fn dot(v0: Vector, v1: Vector) -> Vector {
        portable::dot(v0, v1)
    }
    #[inline(always)]
    fn dot3(v0: Vector, v1: Vector) -> Vector {
        portable::dot3(v0, v1)
    }
    #[inline(always)]
    fn cross3(v0: Vector, v1: Vector) -> Vector {
        portable::cross3(v0, v1)
    }
    #[inline(always)]
    fn length(v: Vector) -> Vector {
        portable::length(v)
    }
    #[inline(always)]
    fn length_fast(v: Vector) -> Vector {
        portable::length_fast(v)
    }
    #[inline(always)]
    fn length_sqr(v: Vector) -> Vector {
        portable::length_sqr(v)
    }
    #[inline(always)]
    fn length3(v: Vector) -> Vector {
        portable::length3(v)
    }
    #[inline(always)]
    fn length3_fast(v: Vector) -> Vector {
        portable::length3_fast(v)
    }
    #[inline(always)]
    fn length3_sqr(v: Vector) -> Vector {
        portable::length3_sqr(v)
    }
    #[inline(always)]
    fn normalize(v: Vector) -> Vector {
        portable::normalize(v)
    }
    #[inline(always)]
    fn normalize3(v: Vector) -> Vector {
        portable::normalize3(v)
    }
    #[inline(always)]
    fn lerp(from: Vector, to: Vector, factor: f32) -> Vector {
        portable::lerp(from, to, factor)
    }
    #[inline(always)]
    fn reflect(v: Vector, at: Vector) -> Vector {
        portable::reflect(v, at)
    }
    #[inline(always)]
    fn min(v0: Vector, v1: Vector) -> Vector {
        portable::min(v0, v1)
    }
    #[inline(always)]
    fn max(v0: Vector, v1: Vector) -> Vector {
        portable::max(v0, v1)
    }
}

/// Quaternion operation kernels. Defaults are the portable reference.
pub(crate) trait QuaternionKernels {
    #[inline(always)]
    fn quat_conjugate(q: Quaternion) -> Quaternion {
        portable::quat_conjugate(q)
    }
    #[inline(always)]
    fn quat_inverse(q: Quaternion) -> Quaternion {
        portable::quat_inverse(q)
    }
    #[inline(always)]
    fn quat_mul(q0: Quaternion, q1: Quaternion) -> Quaternion {
        portable::quat_mul(q0, q1)
    }
    #[inline(always)]
    fn quat_slerp(q0: Quaternion, q1: Quaternion, factor: f32) -> Quaternion {
        portable::quat_slerp(q0, q1, factor)
    }
    #[inline(always)]
    fn quat_rotate(q: Quaternion, v: Vector) -> Vector {
        portable::quat_rotate(q, v)
    }
}

/// Matrix operation kernels. Defaults are the portable reference.
pub(crate) trait MatrixKernels {
    #[inline(always)]
    fn mat_transpose(m: Matrix) -> Matrix {
        portable::mat_transpose(m)
    }
    #[inline(always)]
    fn mat_mul(m0: Matrix, m1: Matrix) -> Matrix {
        portable::mat_mul(m0, m1)
    }
    #[inline(always)]
    fn mat_add(m0: Matrix, m1: Matrix) -> Matrix {
        portable::mat_add(m0, m1)
    }
    #[inline(always)]
    fn mat_sub(m0: Matrix, m1: Matrix) -> Matrix {
        portable::mat_sub(m0, m1)
    }
    #[inline(always)]
    fn mat_rotate(m: Matrix, v: Vector) -> Vector {
        portable::mat_rotate(m, v)
    }
    #[inline(always)]
    fn mat_transform(m: Matrix, v: Vector) -> Vector {
        portable::mat_transform(m, v)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use sse::Sse as Active;

#[cfg(target_arch = "aarch64")]
pub(crate) use neon::Neon as Active;

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "aarch64"
)))]
pub(crate) use portable::Portable as Active;

/// Name of the backend selected for this build.
///
/// # Example
/// ```
/// let name = ganita::backend::active();
/// assert!(["sse", "neon", "portable"].contains(&name));
/// ```
pub fn active() -> &'static str {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        "sse"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "neon"
    }
    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64"
    )))]
    {
        "portable"
    }
}
