//! Ganita - SIMD-backed vector, quaternion and 4x4 matrix arithmetic
//!
//! A small arithmetic engine built around one mathematical contract and
//! several interchangeable backend implementations. The portable scalar
//! kernels are the reference; per-architecture SIMD backends may claim any
//! subset of the operation catalogue and everything unclaimed falls through to
//! the reference, so the full catalogue is always available and always agrees
//! across backends within floating-point tolerance.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        vector / quaternion / matrix                 │  ← Public catalogue
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 backend::Active                     │  ← Compile-time pick
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌────────────────────────┐  ┌───────────────────────────┐
//! │   sse / neon kernels   │  │    portable reference     │
//! │     (claimed ops)      │  │    (everything else)      │
//! └────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! Backend selection happens once, at build configuration time, from the
//! target architecture and enabled target features. There is no runtime
//! dispatch and no shared state: every operation is a pure function over
//! by-value, stack-resident, 16- or 64-byte records, so calling from many
//! threads at once is trivially safe.
//!
//! # Quick start
//!
//! ```
//! use ganita::{Matrix, Quaternion, Vector};
//!
//! // A quarter turn about z, applied to the x axis.
//! let half = std::f32::consts::FRAC_PI_4;
//! let q = Quaternion::new(0.0, 0.0, half.sin(), half.cos());
//! let turned = q.rotate(Vector::x_axis());
//! assert!(turned.approx_eq(Vector::new(0.0, 1.0, 0.0, 1.0)));
//!
//! // Points go through the full homogeneous transform.
//! let m = Matrix::identity();
//! let p = Vector::new(1.0, 2.0, 3.0, 1.0);
//! assert_eq!(m.transform(p).to_array(), p.to_array());
//! ```
//!
//! # Numeric contract
//!
//! - Dot products and squared lengths broadcast their scalar to all four
//!   lanes; plain lengths are defined in lane 0 only.
//! - Divisions are unguarded: zero-length normalizations and zero-norm
//!   quaternion inverses propagate IEEE-754 infinities and NaNs.
//! - `==` is exact; tolerance comparison goes through the `approx` traits
//!   with a default of 100 units in the last place per lane.

pub mod backend;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use backend::active;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use vector::Vector;
