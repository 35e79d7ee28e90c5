//! 4x4 matrix operations over four vector rows.
//!
//! A [`Matrix`] is four [`Vector`] rows in row-major order, equivalently a
//! flat `[[f32; 4]; 4]`. Nothing is enforced about the contents — a matrix is
//! not required to be orthogonal or invertible, and no decomposition or
//! inversion is offered.
//!
//! Vectors transform as row vectors: [`Matrix::rotate`] applies only the
//! upper-left 3x3 block (directions), [`Matrix::transform`] additionally adds
//! the fourth-row translation weighted by w (points).

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use crate::backend::{Active, MatrixKernels};
use crate::vector::Vector;

/// Row-major 4x4 matrix stored as four [`Vector`] rows.
///
/// # Example
/// ```
/// use ganita::{Matrix, Vector};
///
/// let v = Vector::new(1.0, 2.0, 3.0, 1.0);
/// assert_eq!(Matrix::identity().transform(v).to_array(), v.to_array());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Matrix {
    rows: [Vector; 4],
}

impl Matrix {
    /// Build a matrix from four rows.
    #[inline(always)]
    pub const fn from_rows(rows: [Vector; 4]) -> Self {
        Self { rows }
    }

    /// Build a matrix from a row-major scalar array.
    #[inline]
    pub const fn from_array(m: [[f32; 4]; 4]) -> Self {
        Self {
            rows: [
                Vector::from_array(m[0]),
                Vector::from_array(m[1]),
                Vector::from_array(m[2]),
                Vector::from_array(m[3]),
            ],
        }
    }

    /// Extract the rows as a row-major scalar array.
    #[inline]
    pub const fn to_array(self) -> [[f32; 4]; 4] {
        [
            self.rows[0].to_array(),
            self.rows[1].to_array(),
            self.rows[2].to_array(),
            self.rows[3].to_array(),
        ]
    }

    /// The all-zero matrix.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_rows([Vector::zero(); 4])
    }

    /// The identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_rows([
            Vector::x_axis(),
            Vector::y_axis(),
            Vector::z_axis(),
            Vector::origo(),
        ])
    }

    /// Read sixteen contiguous floats, row-major, from a 16-byte-aligned
    /// location.
    ///
    /// # Safety
    ///
    /// `ptr` must be 16-byte aligned and point to at least sixteen readable
    /// floats.
    #[inline]
    pub unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self::from_rows([
            Vector::load_aligned(ptr),
            Vector::load_aligned(ptr.add(4)),
            Vector::load_aligned(ptr.add(8)),
            Vector::load_aligned(ptr.add(12)),
        ])
    }

    /// Read sixteen contiguous floats, row-major, with no alignment
    /// requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least sixteen readable floats.
    #[inline]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self::from_rows([
            Vector::load_unaligned(ptr),
            Vector::load_unaligned(ptr.add(4)),
            Vector::load_unaligned(ptr.add(8)),
            Vector::load_unaligned(ptr.add(12)),
        ])
    }

    /// Row `index`. An index outside 0..4 is a programmer error and panics.
    #[inline(always)]
    pub fn row(self, index: usize) -> Vector {
        debug_assert!(index < 4, "matrix row index out of range");
        self.rows[index]
    }

    /// The transpose: `result[row][col] = self[col][row]`.
    #[inline]
    pub fn transpose(self) -> Self {
        Active::mat_transpose(self)
    }

    /// Apply the upper-left 3x3 block to (x, y, z), passing w through
    /// unchanged. For direction vectors; the translation row is ignored.
    #[inline]
    pub fn rotate(self, v: Vector) -> Vector {
        Active::mat_rotate(self, v)
    }

    /// Full homogeneous transform including the fourth-row translation
    /// contribution. For points.
    #[inline]
    pub fn transform(self, v: Vector) -> Vector {
        Active::mat_transform(self, v)
    }

    /// Approximate equality, 100 ULP per lane across all rows.
    #[inline]
    pub fn approx_eq(self, other: Matrix) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.approx_eq(*b))
    }
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Matrix {
    type Output = Self;

    /// Row-by-column product: `r[row][col] = sum_k self[row][k] * rhs[k][col]`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Active::mat_mul(self, rhs)
    }
}

impl std::ops::Add for Matrix {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Active::mat_add(self, rhs)
    }
}

impl std::ops::Sub for Matrix {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Active::mat_sub(self, rhs)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        Vector::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f32 {
        Vector::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for Matrix {
    fn default_max_ulps() -> u32 {
        Vector::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
