//! Application of basis transformation matrices to GAMESS quantities.

use anyhow::{self, ensure};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "conversion_tests.rs"]
mod conversion_tests;

/// Structure containing GAMESS quantities re-expressed in the Psi4 basis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvertedMatrices {
    /// The Fock matrix, $`N_{\mathrm{SO}} \times N_{\mathrm{SO}}`$.
    pub fock: Array2<f64>,

    /// The molecular-orbital coefficients, $`N_{\mathrm{SO}} \times N_{\mathrm{MO}}`$.
    pub coefficients: Array2<f64>,
}

/// Expands a row-wise packed lower triangle into a full symmetric matrix.
///
/// The packed elements are ordered $`(0,0), (1,0), (1,1), (2,0), (2,1), (2,2), \ldots`$.
///
/// # Arguments
///
/// * `packed` - The packed lower-triangular elements.
/// * `n` - The dimension of the full matrix.
///
/// # Errors
///
/// Errors if `packed` does not contain exactly $`n(n+1)/2`$ elements.
pub fn unpack_lower_triangle(packed: &[f64], n: usize) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(
        packed.len() == n * (n + 1) / 2,
        "Expected {} packed lower-triangular elements for a {n} × {n} matrix, but found {}.",
        n * (n + 1) / 2,
        packed.len()
    );
    let mut mat = Array2::<f64>::zeros((n, n));
    let mut elements = packed.iter();
    for i in 0..n {
        for j in 0..=i {
            if let Some(&value) = elements.next() {
                mat[(i, j)] = value;
                mat[(j, i)] = value;
            }
        }
    }
    Ok(mat)
}

/// Re-expresses molecular-orbital coefficients in the target basis, $`\mathbf{U}_C \mathbf{C}`$.
///
/// # Arguments
///
/// * `primary` - The transformation matrix for coefficients, $`N_{\mathrm{SO}} \times N_{\mathrm{AO}}`$.
/// * `c_source` - The source coefficients, $`N_{\mathrm{AO}} \times N_{\mathrm{MO}}`$.
///
/// # Errors
///
/// Errors if the inner dimensions do not match.
pub fn convert_mo_coefficients(
    primary: ArrayView2<f64>,
    c_source: ArrayView2<f64>,
) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(
        primary.ncols() == c_source.nrows(),
        "The transformation matrix has {} columns, but the coefficient matrix has {} rows.",
        primary.ncols(),
        c_source.nrows()
    );
    Ok(primary.dot(&c_source))
}

/// Re-expresses a Fock-like operator matrix in the target basis,
/// $`\mathbf{U}_F \mathbf{F} \mathbf{U}_F^{\mathsf{T}}`$.
///
/// # Arguments
///
/// * `secondary` - The transformation matrix for operators, $`N_{\mathrm{SO}} \times N_{\mathrm{AO}}`$.
/// * `f_source` - The source operator matrix, $`N_{\mathrm{AO}} \times N_{\mathrm{AO}}`$.
///
/// # Errors
///
/// Errors if `f_source` is not square or does not match the columns of `secondary`.
pub fn convert_fock(
    secondary: ArrayView2<f64>,
    f_source: ArrayView2<f64>,
) -> Result<Array2<f64>, anyhow::Error> {
    ensure!(
        f_source.nrows() == f_source.ncols(),
        "The operator matrix must be square, but has dimensions {} × {}.",
        f_source.nrows(),
        f_source.ncols()
    );
    ensure!(
        secondary.ncols() == f_source.nrows(),
        "The transformation matrix has {} columns, but the operator matrix has dimension {}.",
        secondary.ncols(),
        f_source.nrows()
    );
    Ok(secondary.dot(&f_source).dot(&secondary.t()))
}
