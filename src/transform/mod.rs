//! Shell-by-shell construction of basis transformation matrices from GAMESS-ordered Cartesian
//! atomic orbitals to Psi4-ordered symmetry orbitals.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use log;
use ndarray::{Array2, ArrayViewMut2};
use serde::{Deserialize, Serialize};

use crate::basis::ao::BasisShell;
use crate::transform::coefficients::{coefficient_block, MAX_TABULATED_L};

pub mod coefficients;
pub mod conversion;

#[cfg(test)]
#[path = "transform_tests.rs"]
mod transform_tests;

// ------
// Errors
// ------

/// Enumerated type for errors arising when constructing or selecting basis transformation
/// matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasisTransformationError {
    /// A shell has an angular momentum for which no coefficient block exists.
    UnsupportedAngularMomentum(u32),

    /// A matrix selector is neither `C` nor `F`.
    InvalidSelector(String),

    /// The dimensions implied by the shells disagree with those declared or supplied.
    DimensionMismatch {
        /// The (row, column) dimensions implied by the shells.
        expected: (usize, usize),

        /// The (row, column) dimensions declared or supplied.
        found: (usize, usize),
    },
}

impl fmt::Display for BasisTransformationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BasisTransformationError::UnsupportedAngularMomentum(l) => write!(
                f,
                "Basis transformation error: angular momentum l = {l} is not supported (maximum l = {MAX_TABULATED_L})."
            ),
            BasisTransformationError::InvalidSelector(selector) => write!(
                f,
                "Basis transformation error: invalid matrix selector `{selector}` (expected `C` or `F`)."
            ),
            BasisTransformationError::DimensionMismatch { expected, found } => write!(
                f,
                "Basis transformation error: expected dimensions {} × {}, but found {} × {}.",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl Error for BasisTransformationError {}

// --------
// Selector
// --------

/// Enumerated type to select one of the two basis transformation matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformSelector {
    /// Selects the matrix to be applied to molecular-orbital coefficients.
    C,

    /// Selects the matrix to be applied to Fock-like operator matrices.
    F,
}

impl FromStr for TransformSelector {
    type Err = BasisTransformationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(TransformSelector::C),
            "F" => Ok(TransformSelector::F),
            _ => Err(BasisTransformationError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for TransformSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransformSelector::C => write!(f, "C"),
            TransformSelector::F => write!(f, "F"),
        }
    }
}

// ------------------
// TransformMatrices
// ------------------

/// Structure containing the pair of basis transformation matrices of a shell sequence.
///
/// Both matrices have dimensions $`N_{\mathrm{SO}} \times N_{\mathrm{AO}}`$ and share the same
/// block-diagonal zero pattern; they differ only in the normalisation convention carried by each
/// nonzero coefficient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformMatrices {
    /// The matrix to be applied to molecular-orbital coefficients.
    pub primary: Array2<f64>,

    /// The matrix to be applied to Fock-like operator matrices.
    pub secondary: Array2<f64>,
}

impl TransformMatrices {
    /// The common (row, column) dimensions of the two matrices.
    pub fn dim(&self) -> (usize, usize) {
        self.primary.dim()
    }

    /// Returns the matrix chosen by a selector.
    pub fn select(&self, selector: TransformSelector) -> &Array2<f64> {
        match selector {
            TransformSelector::C => &self.primary,
            TransformSelector::F => &self.secondary,
        }
    }

    /// Returns the matrix chosen by a selector string.
    ///
    /// # Errors
    ///
    /// Errors with [`BasisTransformationError::InvalidSelector`] if `selector` is neither `C` nor
    /// `F`.
    pub fn select_str(&self, selector: &str) -> Result<&Array2<f64>, BasisTransformationError> {
        selector.parse::<TransformSelector>().map(|sel| self.select(sel))
    }

    /// Consumes the pair and returns the matrix chosen by a selector.
    pub fn into_selected(self, selector: TransformSelector) -> Array2<f64> {
        match selector {
            TransformSelector::C => self.primary,
            TransformSelector::F => self.secondary,
        }
    }
}

// --------------------------
// ShellBlockTransformBuilder
// --------------------------

/// Structure to assemble basis transformation matrices from an ordered sequence of shells.
///
/// Every shell contributes one diagonal block whose rows start at the sum of the row extents of
/// the preceding shells and whose columns start at the sum of their Cartesian extents.
#[derive(Clone, Debug)]
pub struct ShellBlockTransformBuilder<'a> {
    shells: &'a [BasisShell],
}

impl<'a> ShellBlockTransformBuilder<'a> {
    /// Constructs a new builder over a shell sequence.
    pub fn new(shells: &'a [BasisShell]) -> Self {
        Self { shells }
    }

    /// The shells covered by this builder.
    pub fn shells(&self) -> &'a [BasisShell] {
        self.shells
    }

    /// The total number of rows (target functions).
    pub fn n_rows(&self) -> usize {
        self.shells.iter().map(BasisShell::n_rows).sum()
    }

    /// The total number of columns (source functions).
    pub fn n_cols(&self) -> usize {
        self.shells.iter().map(BasisShell::n_cols).sum()
    }

    /// Checks that the dimensions implied by the shells agree with declared ones.
    ///
    /// # Errors
    ///
    /// Errors with [`BasisTransformationError::UnsupportedAngularMomentum`] if any shell has
    /// $`l > 3`$, otherwise with [`BasisTransformationError::DimensionMismatch`] on disagreement.
    pub fn check_dimensions(&self, n_so: usize, n_ao: usize) -> Result<(), BasisTransformationError> {
        self.check_angular_momenta()?;
        let expected = (self.n_rows(), self.n_cols());
        if expected == (n_so, n_ao) {
            Ok(())
        } else {
            Err(BasisTransformationError::DimensionMismatch {
                expected,
                found: (n_so, n_ao),
            })
        }
    }

    /// Checks that every shell has a tabulated angular momentum. This must pass before any
    /// dimension is computed from the shells.
    ///
    /// # Errors
    ///
    /// Errors with [`BasisTransformationError::UnsupportedAngularMomentum`] for the first shell
    /// with $`l > 3`$.
    pub fn check_angular_momenta(&self) -> Result<(), BasisTransformationError> {
        match self.shells.iter().find(|shell| shell.l > MAX_TABULATED_L) {
            Some(shell) => Err(BasisTransformationError::UnsupportedAngularMomentum(shell.l)),
            None => Ok(()),
        }
    }

    /// Allocates and populates the pair of transformation matrices.
    ///
    /// # Errors
    ///
    /// Errors with [`BasisTransformationError::UnsupportedAngularMomentum`] if any shell has
    /// $`l > 3`$.
    pub fn build(&self) -> Result<TransformMatrices, BasisTransformationError> {
        self.check_angular_momenta()?;
        let dim = (self.n_rows(), self.n_cols());
        let mut primary = Array2::<f64>::zeros(dim);
        let mut secondary = Array2::<f64>::zeros(dim);
        self.build_into(primary.view_mut(), secondary.view_mut())?;
        Ok(TransformMatrices { primary, secondary })
    }

    /// Allocates the pair of transformation matrices after checking the shells against declared
    /// dimensions.
    ///
    /// # Errors
    ///
    /// Errors as in [`Self::check_dimensions`].
    pub fn build_with_dims(
        &self,
        n_so: usize,
        n_ao: usize,
    ) -> Result<TransformMatrices, BasisTransformationError> {
        self.check_dimensions(n_so, n_ao)?;
        self.build()
    }

    /// Populates caller-supplied zero-initialised matrices. Only the cells inside the shell
    /// blocks are written.
    ///
    /// Nothing is written if an error is returned.
    ///
    /// # Errors
    ///
    /// Errors with [`BasisTransformationError::UnsupportedAngularMomentum`] if any shell has
    /// $`l > 3`$, or with [`BasisTransformationError::DimensionMismatch`] if either view has the
    /// wrong shape.
    pub fn build_into(
        &self,
        mut primary: ArrayViewMut2<f64>,
        mut secondary: ArrayViewMut2<f64>,
    ) -> Result<(), BasisTransformationError> {
        self.check_angular_momenta()?;
        let expected = (self.n_rows(), self.n_cols());
        for found in [primary.dim(), secondary.dim()] {
            if found != expected {
                return Err(BasisTransformationError::DimensionMismatch { expected, found });
            }
        }

        let (mut row_offset, mut col_offset) = (0, 0);
        for shell in self.shells.iter() {
            let block = coefficient_block(shell.l, shell.representation())
                .ok_or(BasisTransformationError::UnsupportedAngularMomentum(shell.l))?;
            log::debug!(
                "Shell {} at ({row_offset}, {col_offset}): {} entries.",
                shell.label(),
                block.len()
            );
            for cell in block.iter() {
                let index = (row_offset + cell.row, col_offset + cell.col);
                primary[index] = cell.primary;
                secondary[index] = cell.secondary;
            }
            row_offset += shell.n_rows();
            col_offset += shell.n_cols();
        }
        Ok(())
    }
}
