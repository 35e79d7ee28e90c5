//! Backend conformance: whatever backend this build selected, every operation
//! must agree with a straightforward scalar rendition of its contract.
//!
//! The expected values are recomputed here with plain f32 arithmetic, so these
//! tests hold the accelerated shuffle/broadcast/sign-mask sequences to the same
//! mathematical results as the portable reference, within floating-point
//! tolerance. Reciprocal-sqrt based paths get the documented looser bound.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use approx::{assert_relative_eq, assert_ulps_eq};
use ganita::{Quaternion, Vector};

const ROUNDS: usize = 200;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5041_5249)
}

fn random_vector(rng: &mut StdRng) -> Vector {
    Vector::new(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

/// Random vector with every lane pushed away from zero, for division tests.
fn random_nonzero_vector(rng: &mut StdRng) -> Vector {
    let mut lanes = [0.0f32; 4];
    for lane in lanes.iter_mut() {
        let magnitude: f32 = rng.gen_range(0.5..10.0);
        *lane = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
    }
    Vector::from_array(lanes)
}

#[test]
fn elementwise_ops_are_bit_exact() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let a = random_vector(&mut rng);
        let b = random_nonzero_vector(&mut rng);
        let s: f32 = rng.gen_range(-4.0..4.0);

        for i in 0..4 {
            assert_eq!((a + b).component(i), a.component(i) + b.component(i));
            assert_eq!((a - b).component(i), a.component(i) - b.component(i));
            assert_eq!((a * b).component(i), a.component(i) * b.component(i));
            assert_eq!((a / b).component(i), a.component(i) / b.component(i));
            assert_eq!((-a).component(i), 0.0 - a.component(i));
            assert_eq!((a * s).component(i), a.component(i) * s);
            assert_eq!(a.min(b).component(i), a.component(i).min(b.component(i)));
            assert_eq!(a.max(b).component(i), a.component(i).max(b.component(i)));
        }
    }
}

#[test]
fn muladd_matches_scalar_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let v = random_vector(&mut rng);
        let m = random_vector(&mut rng);
        let a = random_vector(&mut rng);
        let r = v.muladd(m, a);
        for i in 0..4 {
            // Fused and unfused backends differ by one rounding.
            assert_relative_eq!(
                r.component(i),
                v.component(i) * m.component(i) + a.component(i),
                epsilon = 1e-3,
                max_relative = 1e-5
            );
        }
    }
}

#[test]
fn dot_products_match_scalar_sums() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let a = random_vector(&mut rng);
        let b = random_vector(&mut rng);

        let expected4 = a.x() * b.x() + a.y() * b.y() + a.z() * b.z() + a.w() * b.w();
        let expected3 = a.x() * b.x() + a.y() * b.y() + a.z() * b.z();

        let d4 = a.dot(b);
        let d3 = a.dot3(b);
        for i in 0..4 {
            assert_relative_eq!(d4.component(i), expected4, epsilon = 1e-3, max_relative = 1e-4);
            assert_relative_eq!(d3.component(i), expected3, epsilon = 1e-3, max_relative = 1e-4);
        }
    }
}

#[test]
fn cross3_matches_scalar_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let a = random_vector(&mut rng);
        let b = random_vector(&mut rng);
        let c = a.cross3(b);
        assert_ulps_eq!(c.x(), a.y() * b.z() - a.z() * b.y(), max_ulps = 100, epsilon = 1e-4);
        assert_ulps_eq!(c.y(), a.z() * b.x() - a.x() * b.z(), max_ulps = 100, epsilon = 1e-4);
        assert_ulps_eq!(c.z(), a.x() * b.y() - a.y() * b.x(), max_ulps = 100, epsilon = 1e-4);
        assert_eq!(c.w(), 0.0);
    }
}

#[test]
fn length_family_matches_scalar_norms() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let v = random_vector(&mut rng);
        let sqr4 = v.x() * v.x() + v.y() * v.y() + v.z() * v.z() + v.w() * v.w();
        let sqr3 = v.x() * v.x() + v.y() * v.y() + v.z() * v.z();

        assert_relative_eq!(v.length_sqr().x(), sqr4, max_relative = 1e-4);
        assert_relative_eq!(v.length3_sqr().x(), sqr3, max_relative = 1e-4);
        assert_relative_eq!(v.length().x(), sqr4.sqrt(), max_relative = 1e-4);
        assert_relative_eq!(v.length3().x(), sqr3.sqrt(), max_relative = 1e-4);
        // The fast variants are allowed the documented looser bound.
        assert_relative_eq!(v.length_fast().x(), sqr4.sqrt(), max_relative = 1e-3);
        assert_relative_eq!(v.length3_fast().x(), sqr3.sqrt(), max_relative = 1e-3);
    }
}

#[test]
fn normalize_matches_scalar_within_rsqrt_tolerance() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let v = random_nonzero_vector(&mut rng);

        let len4 = (v.x() * v.x() + v.y() * v.y() + v.z() * v.z() + v.w() * v.w()).sqrt();
        let n = v.normalize();
        for i in 0..4 {
            assert_relative_eq!(
                n.component(i),
                v.component(i) / len4,
                epsilon = 2e-3,
                max_relative = 2e-3
            );
        }

        let len3 = (v.x() * v.x() + v.y() * v.y() + v.z() * v.z()).sqrt();
        let n3 = v.normalize3();
        for i in 0..3 {
            assert_relative_eq!(
                n3.component(i),
                v.component(i) / len3,
                epsilon = 2e-3,
                max_relative = 2e-3
            );
        }
        // The w lane must come through untouched, not renormalized.
        assert_eq!(n3.w(), v.w());
    }
}

#[test]
fn lerp_matches_scalar_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let a = random_vector(&mut rng);
        let b = random_vector(&mut rng);
        let f: f32 = rng.gen_range(-1.0..2.0);
        let l = a.lerp(b, f);
        for i in 0..4 {
            assert_relative_eq!(
                l.component(i),
                b.component(i) * f + (a.component(i) - a.component(i) * f),
                epsilon = 1e-4,
                max_relative = 1e-5
            );
        }
    }
}

#[test]
fn reflect_matches_scalar_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let v = random_vector(&mut rng);
        let at = random_nonzero_vector(&mut rng);

        let len3 = (at.x() * at.x() + at.y() * at.y() + at.z() * at.z()).sqrt();
        let n = [at.x() / len3, at.y() / len3, at.z() / len3, at.w()];
        let d3 = n[0] * v.x() + n[1] * v.y() + n[2] * v.z();
        let r = v.reflect(at);
        for i in 0..4 {
            // The reciprocal-sqrt normal estimate feeds a dot product that can
            // cancel, so the absolute bound is the loose one here.
            assert_relative_eq!(
                r.component(i),
                n[i] * 2.0 * d3 - v.component(i),
                epsilon = 0.25,
                max_relative = 5e-3
            );
        }
    }
}

#[test]
fn quaternion_mul_matches_the_hamilton_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let q0 = Quaternion::from_vector(random_vector(&mut rng));
        let q1 = Quaternion::from_vector(random_vector(&mut rng));
        let r = q0 * q1;

        let (x0, y0, z0, w0) = (q0.x(), q0.y(), q0.z(), q0.w());
        let (x1, y1, z1, w1) = (q1.x(), q1.y(), q1.z(), q1.w());
        assert_relative_eq!(
            r.x(),
            w1 * x0 + x1 * w0 + y1 * z0 - z1 * y0,
            epsilon = 1e-3,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            r.y(),
            w1 * y0 - x1 * z0 + y1 * w0 + z1 * x0,
            epsilon = 1e-3,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            r.z(),
            w1 * z0 + x1 * y0 - y1 * x0 + z1 * w0,
            epsilon = 1e-3,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            r.w(),
            w1 * w0 - x1 * x0 - y1 * y0 - z1 * z0,
            epsilon = 1e-3,
            max_relative = 1e-4
        );
    }
}

#[test]
fn quaternion_conjugate_and_inverse_match_scalar() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let q = Quaternion::from_vector(random_nonzero_vector(&mut rng));
        let c = q.conjugate();
        assert_eq!(
            c.into_vector().to_array(),
            [-q.x(), -q.y(), -q.z(), q.w()]
        );

        let norm = q.x() * q.x() + q.y() * q.y() + q.z() * q.z() + q.w() * q.w();
        let inv = q.inverse();
        assert_relative_eq!(inv.x(), -q.x() / norm, epsilon = 1e-5, max_relative = 1e-4);
        assert_relative_eq!(inv.y(), -q.y() / norm, epsilon = 1e-5, max_relative = 1e-4);
        assert_relative_eq!(inv.z(), -q.z() / norm, epsilon = 1e-5, max_relative = 1e-4);
        assert_relative_eq!(inv.w(), q.w() / norm, epsilon = 1e-5, max_relative = 1e-4);
    }
}

#[test]
fn quaternion_rotate_matches_the_double_cross_expansion() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        // Unit quaternion built from a normalized axis, unit by construction.
        let (ax, ay, az) = loop {
            let x: f32 = rng.gen_range(-1.0..1.0);
            let y: f32 = rng.gen_range(-1.0..1.0);
            let z: f32 = rng.gen_range(-1.0..1.0);
            let len = (x * x + y * y + z * z).sqrt();
            if len > 1e-3 {
                break (x / len, y / len, z / len);
            }
        };
        let half: f32 = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
        let (s, c) = half.sin_cos();
        let q = Quaternion::new(ax * s, ay * s, az * s, c);
        let v = random_vector(&mut rng);

        // v1 = cross3(q, v) + v * q.w; v2 = cross3(v1, q);
        // r = q.xyz * dot3(q, v) + v1 * q.w - v2, with w forced to 1.
        let (qx, qy, qz, qw) = (q.x(), q.y(), q.z(), q.w());
        let v1 = [
            qy * v.z() - qz * v.y() + v.x() * qw,
            qz * v.x() - qx * v.z() + v.y() * qw,
            qx * v.y() - qy * v.x() + v.z() * qw,
        ];
        let v2 = [
            v1[1] * qz - v1[2] * qy,
            v1[2] * qx - v1[0] * qz,
            v1[0] * qy - v1[1] * qx,
        ];
        let d = qx * v.x() + qy * v.y() + qz * v.z();
        let expected = [
            qx * d + v1[0] * qw - v2[0],
            qy * d + v1[1] * qw - v2[1],
            qz * d + v1[2] * qw - v2[2],
        ];

        let r = q.rotate(v);
        assert_relative_eq!(r.x(), expected[0], epsilon = 1e-3, max_relative = 1e-3);
        assert_relative_eq!(r.y(), expected[1], epsilon = 1e-3, max_relative = 1e-3);
        assert_relative_eq!(r.z(), expected[2], epsilon = 1e-3, max_relative = 1e-3);
        assert_eq!(r.w(), 1.0);
    }
}
