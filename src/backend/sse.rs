//! SSE backend for x86 and x86_64.
//!
//! Claims the vector catalogue plus the shuffle-heavy quaternion kernels;
//! `slerp` (scalar trig) and the matrix kernels fall through to the reference
//! layer, with the rowwise matrix operations riding this backend's vector
//! kernels anyway.
//!
//! SSE2 is part of the x86_64 baseline, so the intrinsics here are callable on
//! every build; the horizontal-add dot variant additionally wants SSE3 and is
//! compiled in only when the build enables it (`-C target-feature=+sse3`).
//!
//! Shuffle masks are const-generic parameters. The immediate-operand
//! requirement of `_mm_shuffle_ps` is satisfied by monomorphization, so no
//! macro substitution is involved.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::quaternion::Quaternion;
use crate::vector::Vector;

use super::{MatrixKernels, QuaternionKernels, VectorKernels};

/// SSE backend marker.
pub(crate) struct Sse;

/// Build a `_mm_shuffle_ps` immediate selecting source lanes
/// `(l0, l1, l2, l3)` for result lanes 0..4.
const fn shuf(l0: i32, l1: i32, l2: i32, l3: i32) -> i32 {
    l0 | (l1 << 2) | (l2 << 4) | (l3 << 6)
}

const XXXX: i32 = shuf(0, 0, 0, 0);
const YYYY: i32 = shuf(1, 1, 1, 1);
const ZZZZ: i32 = shuf(2, 2, 2, 2);
const WWWW: i32 = shuf(3, 3, 3, 3);
const YZXW: i32 = shuf(1, 2, 0, 3);
const ZXYW: i32 = shuf(2, 0, 1, 3);
const WZYX: i32 = shuf(3, 2, 1, 0);
const ZWXY: i32 = shuf(2, 3, 0, 1);
const YXWZ: i32 = shuf(1, 0, 3, 2);
const ZZWW: i32 = shuf(2, 2, 3, 3);
const XYXW: i32 = shuf(0, 1, 0, 3);

#[inline(always)]
fn load(v: Vector) -> __m128 {
    // Vector is #[repr(C, align(16))], so the aligned load is always valid.
    unsafe { _mm_load_ps(v.0.as_ptr()) }
}

#[inline(always)]
fn store(r: __m128) -> Vector {
    let mut out = [0.0f32; 4];
    unsafe { _mm_storeu_ps(out.as_mut_ptr(), r) };
    Vector::from_array(out)
}

#[inline(always)]
fn shuffle<const MASK: i32>(v: __m128) -> __m128 {
    unsafe { _mm_shuffle_ps::<MASK>(v, v) }
}

/// 4-D dot product broadcast to all lanes.
#[inline(always)]
fn dot_ps(v0: __m128, v1: __m128) -> __m128 {
    unsafe {
        let p = _mm_mul_ps(v0, v1);
        #[cfg(target_feature = "sse3")]
        {
            let s = _mm_hadd_ps(p, p);
            _mm_hadd_ps(s, s)
        }
        #[cfg(not(target_feature = "sse3"))]
        {
            _mm_add_ps(
                _mm_add_ps(shuffle::<XXXX>(p), shuffle::<YYYY>(p)),
                _mm_add_ps(shuffle::<ZZZZ>(p), shuffle::<WWWW>(p)),
            )
        }
    }
}

/// 3-D dot product broadcast to all lanes.
#[inline(always)]
fn dot3_ps(v0: __m128, v1: __m128) -> __m128 {
    unsafe {
        let p = _mm_mul_ps(v0, v1);
        _mm_add_ps(
            _mm_add_ps(shuffle::<XXXX>(p), shuffle::<YYYY>(p)),
            shuffle::<ZZZZ>(p),
        )
    }
}

#[inline(always)]
fn cross3_ps(v0: __m128, v1: __m128) -> __m128 {
    unsafe {
        let v0yzx = shuffle::<YZXW>(v0);
        let v1yzx = shuffle::<YZXW>(v1);
        let v0zxy = shuffle::<ZXYW>(v0);
        let v1zxy = shuffle::<ZXYW>(v1);
        _mm_sub_ps(_mm_mul_ps(v0yzx, v1zxy), _mm_mul_ps(v0zxy, v1yzx))
    }
}

#[inline(always)]
fn neg_ps(v: __m128) -> __m128 {
    unsafe { _mm_sub_ps(_mm_setzero_ps(), v) }
}

/// Splice `(a.x, a.y, a.z, b.w)` — used to rebuild a result while keeping one
/// input's w lane.
#[inline(always)]
fn with_w_of(a: __m128, b: __m128) -> __m128 {
    unsafe {
        let splice = _mm_shuffle_ps::<ZZWW>(a, b);
        _mm_shuffle_ps::<XYXW>(a, splice)
    }
}

impl VectorKernels for Sse {
    #[inline(always)]
    fn add(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_add_ps(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn sub(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_sub_ps(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn mul(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_mul_ps(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn div(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_div_ps(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn neg(v: Vector) -> Vector {
        store(neg_ps(load(v)))
    }

    #[inline(always)]
    fn scale(v: Vector, s: f32) -> Vector {
        store(unsafe { _mm_mul_ps(load(v), _mm_set1_ps(s)) })
    }

    #[inline(always)]
    fn muladd(v: Vector, m: Vector, a: Vector) -> Vector {
        store(unsafe { _mm_add_ps(_mm_mul_ps(load(v), load(m)), load(a)) })
    }

    #[inline(always)]
    fn dot(v0: Vector, v1: Vector) -> Vector {
        store(dot_ps(load(v0), load(v1)))
    }

    #[inline(always)]
    fn dot3(v0: Vector, v1: Vector) -> Vector {
        store(dot3_ps(load(v0), load(v1)))
    }

    #[inline(always)]
    fn cross3(v0: Vector, v1: Vector) -> Vector {
        store(cross3_ps(load(v0), load(v1)))
    }

    #[inline(always)]
    fn length(v: Vector) -> Vector {
        let vv = load(v);
        store(unsafe { _mm_sqrt_ss(dot_ps(vv, vv)) })
    }

    #[inline(always)]
    fn length_fast(v: Vector) -> Vector {
        Self::length(v)
    }

    #[inline(always)]
    fn length_sqr(v: Vector) -> Vector {
        let vv = load(v);
        store(dot_ps(vv, vv))
    }

    #[inline(always)]
    fn length3(v: Vector) -> Vector {
        let vv = load(v);
        store(unsafe { _mm_sqrt_ss(dot3_ps(vv, vv)) })
    }

    #[inline(always)]
    fn length3_fast(v: Vector) -> Vector {
        Self::length3(v)
    }

    #[inline(always)]
    fn length3_sqr(v: Vector) -> Vector {
        let vv = load(v);
        store(dot3_ps(vv, vv))
    }

    /// Reciprocal-sqrt estimate; agrees with the reference within ~4e-4
    /// relative.
    #[inline(always)]
    fn normalize(v: Vector) -> Vector {
        let vv = load(v);
        store(unsafe { _mm_mul_ps(vv, _mm_rsqrt_ps(dot_ps(vv, vv))) })
    }

    #[inline(always)]
    fn normalize3(v: Vector) -> Vector {
        let vv = load(v);
        let norm = unsafe { _mm_mul_ps(vv, _mm_rsqrt_ps(dot3_ps(vv, vv))) };
        store(with_w_of(norm, vv))
    }

    #[inline(always)]
    fn lerp(from: Vector, to: Vector, factor: f32) -> Vector {
        unsafe {
            let s = _mm_set1_ps(factor);
            let fromv = load(from);
            let tov = load(to);
            store(_mm_add_ps(
                _mm_mul_ps(s, tov),
                _mm_sub_ps(fromv, _mm_mul_ps(s, fromv)),
            ))
        }
    }

    #[inline(always)]
    fn reflect(v: Vector, at: Vector) -> Vector {
        unsafe {
            let vv = load(v);
            let normal = load(Self::normalize3(at));
            let double_proj =
                _mm_mul_ps(normal, _mm_mul_ps(dot3_ps(normal, vv), _mm_set1_ps(2.0)));
            store(_mm_sub_ps(double_proj, vv))
        }
    }

    #[inline(always)]
    fn min(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_min_ps(load(v0), load(v1)) })
    }

    #[inline(always)]
    fn max(v0: Vector, v1: Vector) -> Vector {
        store(unsafe { _mm_max_ps(load(v0), load(v1)) })
    }
}

impl QuaternionKernels for Sse {
    #[inline(always)]
    fn quat_conjugate(q: Quaternion) -> Quaternion {
        let qv = load(q.into_vector());
        Quaternion::from_vector(store(with_w_of(neg_ps(qv), qv)))
    }

    #[inline(always)]
    fn quat_inverse(q: Quaternion) -> Quaternion {
        unsafe {
            let qv = load(q.into_vector());
            let inv_norm = _mm_div_ps(_mm_set1_ps(1.0), dot_ps(qv, qv));
            let r = _mm_mul_ps(qv, inv_norm);
            Quaternion::from_vector(store(with_w_of(neg_ps(r), r)))
        }
    }

    /// Hamilton product via four lane broadcasts of `q1` against shuffled
    /// `q0`, sign patterns applied with XOR masks.
    #[inline(always)]
    fn quat_mul(q0: Quaternion, q1: Quaternion) -> Quaternion {
        unsafe {
            let a = load(q0.into_vector());
            let b = load(q1.into_vector());

            let t0 = _mm_mul_ps(shuffle::<WWWW>(b), a);
            let t1 = _mm_mul_ps(shuffle::<XXXX>(b), shuffle::<WZYX>(a));
            let t2 = _mm_mul_ps(shuffle::<YYYY>(b), shuffle::<ZWXY>(a));
            let t3 = _mm_mul_ps(shuffle::<ZZZZ>(b), shuffle::<YXWZ>(a));

            let s1 = _mm_setr_ps(0.0, -0.0, 0.0, -0.0);
            let s2 = _mm_setr_ps(0.0, 0.0, -0.0, -0.0);
            let s3 = _mm_setr_ps(-0.0, 0.0, 0.0, -0.0);

            let r = _mm_add_ps(
                _mm_add_ps(t0, _mm_xor_ps(t1, s1)),
                _mm_add_ps(_mm_xor_ps(t2, s2), _mm_xor_ps(t3, s3)),
            );
            Quaternion::from_vector(store(r))
        }
    }

    #[inline(always)]
    fn quat_rotate(q: Quaternion, v: Vector) -> Vector {
        unsafe {
            let qv = load(q.into_vector());
            let vv = load(v);

            let qw = shuffle::<WWWW>(qv);
            let v1 = _mm_add_ps(_mm_mul_ps(vv, qw), cross3_ps(qv, vv));
            let v2 = cross3_ps(v1, qv);
            let d = dot3_ps(qv, vv);

            let r = _mm_sub_ps(
                _mm_add_ps(_mm_mul_ps(qv, d), _mm_mul_ps(v1, qw)),
                v2,
            );
            store(with_w_of(r, _mm_set1_ps(1.0)))
        }
    }
}

impl MatrixKernels for Sse {}
