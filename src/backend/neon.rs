//! NEON backend for aarch64.
//!
//! Claims the elementwise vector kernels, the fused multiply-add, and the
//! horizontal-add dot/length/normalize family. The shuffle-heavy kernels
//! (`cross3`, `lerp`, `reflect`) and the quaternion and matrix catalogues are
//! left unclaimed and fall through to the reference layer — partial
//! acceleration is exactly what the layering convention is for.

use std::arch::aarch64::*;

use crate::vector::Vector;

use super::{MatrixKernels, QuaternionKernels, VectorKernels};

/// NEON backend marker.
pub(crate) struct Neon;

#[inline(always)]
fn load(v: Vector) -> float32x4_t {
    unsafe { vld1q_f32(v.0.as_ptr()) }
}

#[inline(always)]
fn store(r: float32x4_t) -> Vector {
    let mut out = [0.0f32; 4];
    unsafe { vst1q_f32(out.as_mut_ptr(), r) };
    Vector::from_array(out)
}

/// Horizontal sum of all four lanes.
#[inline(always)]
fn sum_lanes(v: float32x4_t) -> f32 {
    unsafe { vaddvq_f32(v) }
}

/// Horizontal sum of the first three lanes.
#[inline(always)]
fn sum_lanes3(v: float32x4_t) -> f32 {
    unsafe { vaddvq_f32(vsetq_lane_f32::<3>(0.0, v)) }
}

impl VectorKernels for Neon {
    #[inline(always)]
    fn add(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vaddq_f32(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn sub(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vsubq_f32(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn mul(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vmulq_f32(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn div(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vdivq_f32(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn neg(v: Vector) -> Vector {
        store(unsafe { vnegq_f32(load(v)) })
    }

    #[inline(always)]
    fn scale(v: Vector, s: f32) -> Vector {
        store(unsafe { vmulq_n_f32(load(v), s) })
    }

    #[inline(always)]
    fn muladd(v: Vector, m: Vector, a: Vector) -> Vector {
        store(unsafe { vfmaq_f32(load(a), load(v), load(m)) })
    }

    #[inline(always)]
    fn dot(v0: Vector, v1: Vector) -> Vector {
        let s = sum_lanes(unsafe { vmulq_f32(load(v0), load(v1)) });
        Vector::splat(s)
    }

    #[inline(always)]
    fn dot3(v0: Vector, v1: Vector) -> Vector {
        let s = sum_lanes3(unsafe { vmulq_f32(load(v0), load(v1)) });
        Vector::splat(s)
    }

    #[inline(always)]
    fn length(v: Vector) -> Vector {
        let vv = load(v);
        Vector::splat(sum_lanes(unsafe { vmulq_f32(vv, vv) }).sqrt())
    }

    #[inline(always)]
    fn length_fast(v: Vector) -> Vector {
        Self::length(v)
    }

    #[inline(always)]
    fn length_sqr(v: Vector) -> Vector {
        let vv = load(v);
        Vector::splat(sum_lanes(unsafe { vmulq_f32(vv, vv) }))
    }

    #[inline(always)]
    fn length3(v: Vector) -> Vector {
        let vv = load(v);
        Vector::splat(sum_lanes3(unsafe { vmulq_f32(vv, vv) }).sqrt())
    }

    #[inline(always)]
    fn length3_fast(v: Vector) -> Vector {
        Self::length3(v)
    }

    #[inline(always)]
    fn length3_sqr(v: Vector) -> Vector {
        let vv = load(v);
        Vector::splat(sum_lanes3(unsafe { vmulq_f32(vv, vv) }))
    }

    #[inline(always)]
    fn normalize(v: Vector) -> Vector {
        let vv = load(v);
        let inv = 1.0 / sum_lanes(unsafe { vmulq_f32(vv, vv) }).sqrt();
        store(unsafe { vmulq_n_f32(vv, inv) })
    }

    #[inline(always)]
    fn normalize3(v: Vector) -> Vector {
        unsafe {
            let vv = load(v);
            let inv = 1.0 / sum_lanes3(vmulq_f32(vv, vv)).sqrt();
            let norm = vmulq_n_f32(vv, inv);
            store(vsetq_lane_f32::<3>(vgetq_lane_f32::<3>(vv), norm))
        }
    }

    #[inline(always)]
    fn min(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vminq_f32(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn max(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { vmaxq_f32(load(v0), load(v1)) })
    }
}

impl QuaternionKernels for Neon {}

impl MatrixKernels for Neon {}
