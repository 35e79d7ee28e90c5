//! Portable reference kernels.
//!
//! Every operation in the catalogue has exactly one reference definition here,
//! written as plain lane arithmetic with no architecture assumptions. The kernel
//! traits in [`super`] default to these functions, so an accelerated backend
//! only ever replaces a subset and the remainder stays on this path.
//!
//! Precision notes: `normalize` and the `length` family use exact square roots;
//! accelerated backends are allowed to substitute reciprocal-sqrt estimates
//! within the tolerance documented on the public API.

use crate::matrix::Matrix;
use crate::quaternion::Quaternion;
use crate::vector::Vector;

/// Backend that overrides nothing and runs the whole catalogue on this module.
///
/// Selected as [`super::Active`] on targets without a SIMD backend; also
/// instantiable from unit tests on any target for reference comparisons.
#[cfg(any(
    test,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
pub(crate) struct Portable;

#[cfg(any(
    test,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
impl super::VectorKernels for Portable {}

#[cfg(any(
    test,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
impl super::QuaternionKernels for Portable {}

#[cfg(any(
    test,
    not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))
))]
impl super::MatrixKernels for Portable {}

// ---------------------------------------------------------------------------
// Vector kernels
// ---------------------------------------------------------------------------

#[inline(always)]
pub(crate) fn add(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0 + x1, y0 + y1, z0 + z1, w0 + w1)
}

#[inline(always)]
pub(crate) fn sub(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0 - x1, y0 - y1, z0 - z1, w0 - w1)
}

#[inline(always)]
pub(crate) fn mul(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0 * x1, y0 * y1, z0 * z1, w0 * w1)
}

/// Lanewise division. Not guarded: zero divisors propagate IEEE-754
/// infinities and NaNs exactly as the scalar divide would.
#[inline(always)]
pub(crate) fn div(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0 / x1, y0 / y1, z0 / z1, w0 / w1)
}

/// Lanewise negation, computed as `0 - v`.
#[inline(always)]
pub(crate) fn neg(v: Vector) -> Vector {
    sub(Vector::zero(), v)
}

#[inline(always)]
pub(crate) fn scale(v: Vector, s: f32) -> Vector {
    mul(v, Vector::splat(s))
}

/// Fused `v * m + a`, lanewise.
#[inline(always)]
pub(crate) fn muladd(v: Vector, m: Vector, a: Vector) -> Vector {
    let [x0, y0, z0, w0] = v.to_array();
    let [x1, y1, z1, w1] = m.to_array();
    let [x2, y2, z2, w2] = a.to_array();
    Vector::new(
        x0.mul_add(x1, x2),
        y0.mul_add(y1, y2),
        z0.mul_add(z1, z2),
        w0.mul_add(w1, w2),
    )
}

/// 4-D dot product, broadcast to all four lanes.
#[inline(always)]
pub(crate) fn dot(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::splat(x0 * x1 + y0 * y1 + z0 * z1 + w0 * w1)
}

/// 3-D dot product ignoring the w lane, broadcast to all four lanes.
#[inline(always)]
pub(crate) fn dot3(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, _] = v0.to_array();
    let [x1, y1, z1, _] = v1.to_array();
    Vector::splat(x0 * x1 + y0 * y1 + z0 * z1)
}

/// 3-D cross product on (x, y, z). The w lane of the result is zero.
#[inline(always)]
pub(crate) fn cross3(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, _] = v0.to_array();
    let [x1, y1, z1, _] = v1.to_array();
    Vector::new(
        y0 * z1 - z0 * y1,
        z0 * x1 - x0 * z1,
        x0 * y1 - y0 * x1,
        0.0,
    )
}

#[inline(always)]
pub(crate) fn length_sqr(v: Vector) -> Vector {
    dot(v, v)
}

#[inline(always)]
pub(crate) fn length(v: Vector) -> Vector {
    Vector::splat(length_sqr(v).x().sqrt())
}

/// Reference `length_fast` is the exact length; accelerated backends may
/// substitute an estimate.
#[inline(always)]
pub(crate) fn length_fast(v: Vector) -> Vector {
    length(v)
}

#[inline(always)]
pub(crate) fn length3_sqr(v: Vector) -> Vector {
    dot3(v, v)
}

#[inline(always)]
pub(crate) fn length3(v: Vector) -> Vector {
    Vector::splat(length3_sqr(v).x().sqrt())
}

#[inline(always)]
pub(crate) fn length3_fast(v: Vector) -> Vector {
    length3(v)
}

/// Normalize using the full 4-D length. A zero vector divides by zero and
/// propagates the resulting non-finite lanes.
#[inline(always)]
pub(crate) fn normalize(v: Vector) -> Vector {
    scale(v, 1.0 / length(v).x())
}

/// Normalize the (x, y, z) sub-vector, preserving the w lane unchanged.
#[inline(always)]
pub(crate) fn normalize3(v: Vector) -> Vector {
    let inv = 1.0 / length3(v).x();
    let [x, y, z, w] = v.to_array();
    Vector::new(x * inv, y * inv, z * inv, w)
}

/// Linear interpolation, exact at both endpoints.
///
/// Written as `to * factor + (from - from * factor)` so that factor 0 returns
/// `from` and factor 1 returns `to` bit-for-bit. The factor is unconstrained
/// and extrapolates outside [0, 1].
#[inline(always)]
pub(crate) fn lerp(from: Vector, to: Vector, factor: f32) -> Vector {
    let s = Vector::splat(factor);
    add(mul(s, to), sub(from, mul(s, from)))
}

/// Reflect `v` about the plane normal `normalize3(at)`: `n * 2(n.v) - v`.
#[inline(always)]
pub(crate) fn reflect(v: Vector, at: Vector) -> Vector {
    let normal = normalize3(at);
    let double_proj = mul(normal, mul(dot3(normal, v), Vector::two()));
    sub(double_proj, v)
}

#[inline(always)]
pub(crate) fn min(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0.min(x1), y0.min(y1), z0.min(z1), w0.min(w1))
}

#[inline(always)]
pub(crate) fn max(v0: Vector, v1: Vector) -> Vector {
    let [x0, y0, z0, w0] = v0.to_array();
    let [x1, y1, z1, w1] = v1.to_array();
    Vector::new(x0.max(x1), y0.max(y1), z0.max(z1), w0.max(w1))
}

// ---------------------------------------------------------------------------
// Quaternion kernels
// ---------------------------------------------------------------------------

#[inline(always)]
pub(crate) fn quat_conjugate(q: Quaternion) -> Quaternion {
    let [x, y, z, w] = q.into_vector().to_array();
    Quaternion::new(-x, -y, -z, w)
}

/// Conjugate scaled by the reciprocal squared norm. A zero quaternion yields
/// infinities, matching the unguarded division policy of the vector layer.
#[inline(always)]
pub(crate) fn quat_inverse(q: Quaternion) -> Quaternion {
    let [x, y, z, w] = q.into_vector().to_array();
    let inv_norm = 1.0 / (x * x + y * y + z * z + w * w);
    Quaternion::new(-x * inv_norm, -y * inv_norm, -z * inv_norm, w * inv_norm)
}

/// Hamilton product, `q1` acting on `q0`. Operand order and signs are
/// load-bearing: the product is non-commutative.
#[inline(always)]
pub(crate) fn quat_mul(q0: Quaternion, q1: Quaternion) -> Quaternion {
    let [x0, y0, z0, w0] = q0.into_vector().to_array();
    let [x1, y1, z1, w1] = q1.into_vector().to_array();
    Quaternion::new(
        w1 * x0 + x1 * w0 + y1 * z0 - z1 * y0,
        w1 * y0 - x1 * z0 + y1 * w0 + z1 * x0,
        w1 * z0 + x1 * y0 - y1 * x0 + z1 * w0,
        w1 * w0 - x1 * x0 - y1 * y0 - z1 * z0,
    )
}

/// Spherical linear interpolation between two quaternions.
///
/// When the cosine of the half-angle is negative the target is negated so the
/// interpolation takes the short arc; `q` and `-q` describe the same rotation
/// and skipping this produces long-way-around spins.
pub(crate) fn quat_slerp(q0: Quaternion, q1: Quaternion, factor: f32) -> Quaternion {
    let mut cosval = q0.into_vector().dot(q1.into_vector()).x();

    let qd = if cosval < 0.0 {
        let qd = -q1;
        cosval = q0.into_vector().dot(qd.into_vector()).x();
        qd
    } else {
        q1
    };

    let angle = if -1.0 < cosval {
        if cosval < 1.0 {
            cosval.acos()
        } else {
            // Coincident orientations, nothing to interpolate.
            return qd;
        }
    } else {
        std::f32::consts::PI
    };

    if angle.abs() <= f32::EPSILON {
        return qd;
    }

    let invsin = 1.0 / angle.sin();
    let c0 = ((1.0 - factor) * angle).sin() * invsin;
    let c1 = (factor * angle).sin() * invsin;

    Quaternion::from_vector(q0.into_vector().scale(c0) + qd.into_vector().scale(c1))
}

/// Rotate `v` by the unit quaternion `q`.
///
/// Uses the double-cross expansion of `q * (0, v) * q'`: with
/// `v1 = cross3(q, v) + v * q.w`, the rotated vector is
/// `q.xyz * dot3(q, v) + v1 * q.w - cross3(v1, q)`. The w lane of the result
/// is forced to 1 so the output reads as an affine point. `q` must be unit
/// norm; a non-unit input silently scales the result.
pub(crate) fn quat_rotate(q: Quaternion, v: Vector) -> Vector {
    let qv = q.into_vector();
    let qw = qv.w();

    let v1 = v.muladd(Vector::splat(qw), qv.cross3(v));
    let v2 = v1.cross3(qv);
    let d = qv.dot3(v).x();

    let r = qv.scale(d) + v1.scale(qw) - v2;
    Vector::new(r.x(), r.y(), r.z(), 1.0)
}

// ---------------------------------------------------------------------------
// Matrix kernels
// ---------------------------------------------------------------------------

#[inline(always)]
pub(crate) fn mat_transpose(m: Matrix) -> Matrix {
    let a = m.to_array();
    let mut t = [[0.0f32; 4]; 4];
    for (row, out) in t.iter_mut().enumerate() {
        for (col, lane) in out.iter_mut().enumerate() {
            *lane = a[col][row];
        }
    }
    Matrix::from_array(t)
}

/// Row-by-column 4x4 product: `r[row][col] = sum_k m0[row][k] * m1[k][col]`.
#[inline(always)]
pub(crate) fn mat_mul(m0: Matrix, m1: Matrix) -> Matrix {
    let a = m0.to_array();
    let b = m1.to_array();
    let mut r = [[0.0f32; 4]; 4];
    for (row, out) in r.iter_mut().enumerate() {
        for (col, lane) in out.iter_mut().enumerate() {
            *lane = a[row][0] * b[0][col]
                + a[row][1] * b[1][col]
                + a[row][2] * b[2][col]
                + a[row][3] * b[3][col];
        }
    }
    Matrix::from_array(r)
}

// The rowwise matrix operations route through the public vector API, so an
// accelerated vector backend carries them without claiming a matrix kernel.

#[inline(always)]
pub(crate) fn mat_add(m0: Matrix, m1: Matrix) -> Matrix {
    Matrix::from_rows([
        m0.row(0) + m1.row(0),
        m0.row(1) + m1.row(1),
        m0.row(2) + m1.row(2),
        m0.row(3) + m1.row(3),
    ])
}

#[inline(always)]
pub(crate) fn mat_sub(m0: Matrix, m1: Matrix) -> Matrix {
    Matrix::from_rows([
        m0.row(0) - m1.row(0),
        m0.row(1) - m1.row(1),
        m0.row(2) - m1.row(2),
        m0.row(3) - m1.row(3),
    ])
}

/// Apply only the upper-left 3x3 block to (x, y, z); the translation row is
/// ignored and w passes through unchanged. For direction vectors.
#[inline(always)]
pub(crate) fn mat_rotate(m: Matrix, v: Vector) -> Vector {
    let a = m.to_array();
    let [x, y, z, w] = v.to_array();
    Vector::new(
        a[0][0] * x + a[1][0] * y + a[2][0] * z,
        a[0][1] * x + a[1][1] * y + a[2][1] * z,
        a[0][2] * x + a[1][2] * y + a[2][2] * z,
        w,
    )
}

/// Full homogeneous transform including the fourth-row translation
/// contribution. For points.
#[inline(always)]
pub(crate) fn mat_transform(m: Matrix, v: Vector) -> Vector {
    let a = m.to_array();
    let [x, y, z, w] = v.to_array();
    Vector::new(
        a[0][0] * x + a[1][0] * y + a[2][0] * z + a[3][0] * w,
        a[0][1] * x + a[1][1] * y + a[2][1] * z + a[3][1] * w,
        a[0][2] * x + a[1][2] * y + a[2][2] * z + a[3][2] * w,
        a[0][3] * x + a[1][3] * y + a[2][3] * z + a[3][3] * w,
    )
}
