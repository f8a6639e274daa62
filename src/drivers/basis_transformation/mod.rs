//! Driver for constructing basis transformation matrices.

use std::fmt;

use anyhow::{self, format_err, Context};
use derive_builder::Builder;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::basis::ao::{col_boundary_indices, row_boundary_indices, BasisShell};
use crate::drivers::AotransDriver;
use crate::io::format::{
    aotrans_output, log_matrix, log_subtitle, log_title, nice_bool, write_title, AotransOutput,
};
use crate::io::{write_aotrans_binary, AotransFileType};
use crate::transform::{ShellBlockTransformBuilder, TransformMatrices, TransformSelector};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_print() -> u8 {
    1
}

/// A structure containing control parameters for the construction of basis transformation
/// matrices.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct BasisTransformationParams {
    /// The selector of the matrix to be returned: `C` for the matrix to be applied to
    /// molecular-orbital coefficients, or `F` for the matrix to be applied to Fock-like operator
    /// matrices. An unset selector is invalid.
    #[builder(default = "None")]
    #[serde(default)]
    pub trans_mat: Option<String>,

    /// The print level: `0` for a summary only, `1` to also report the parameters and the basis
    /// shells, and `2` to also print the selected matrix.
    #[builder(default = "default_print()")]
    #[serde(default = "default_print")]
    pub print: u8,

    /// Optional name for saving the result as a binary file of type [`AotransFileType::Mat`]. If
    /// `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

impl BasisTransformationParams {
    /// Returns a builder to construct a [`BasisTransformationParams`] structure.
    pub fn builder() -> BasisTransformationParamsBuilder {
        BasisTransformationParamsBuilder::default()
    }
}

impl Default for BasisTransformationParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `BasisTransformationParams`.")
    }
}

impl fmt::Display for BasisTransformationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Selected matrix: {}",
            self.trans_mat.as_deref().unwrap_or("--")
        )?;
        writeln!(f, "Print level: {}", self.print)?;
        writeln!(
            f,
            "Save transformation matrices to file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                format!("{name}.{}", AotransFileType::Mat.ext())
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain basis transformation results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct BasisTransformationResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: BasisTransformationParams,

    /// The shells from which the matrices have been built.
    pub shells: Vec<BasisShell>,

    /// The matrix chosen by the selector in [`Self::parameters`].
    pub selector: TransformSelector,

    /// The pair of transformation matrices.
    pub matrices: TransformMatrices,
}

impl BasisTransformationResult {
    /// Returns a builder to construct a [`BasisTransformationResult`] structure.
    fn builder() -> BasisTransformationResultBuilder {
        BasisTransformationResultBuilder::default()
    }

    /// The matrix chosen by the selector.
    pub fn selected_matrix(&self) -> &Array2<f64> {
        self.matrices.select(self.selector)
    }
}

impl fmt::Display for BasisTransformationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_title(f, "Basis Transformation Summary")?;
        writeln!(f)?;
        let (n_so, n_ao) = self.matrices.dim();
        writeln!(f, "Number of shells: {}", self.shells.len())?;
        writeln!(
            f,
            "  Pure shells: {}",
            self.shells.iter().filter(|shell| shell.pure).count()
        )?;
        writeln!(
            f,
            "  Cartesian shells: {}",
            self.shells.iter().filter(|shell| !shell.pure).count()
        )?;
        writeln!(f, "Matrix dimensions: {n_so} (SO) × {n_ao} (AO)")?;
        writeln!(
            f,
            "Selected matrix: {} ({})",
            self.selector,
            match self.selector {
                TransformSelector::C => "for MO coefficients",
                TransformSelector::F => "for Fock-like matrices",
            }
        )?;
        writeln!(
            f,
            "Nonzero coefficients: {}",
            self.selected_matrix().iter().filter(|x| **x != 0.0).count()
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for the construction of basis transformation matrices.
#[derive(Clone, Builder)]
pub struct BasisTransformationDriver<'a> {
    /// The control parameters for the basis transformation.
    parameters: &'a BasisTransformationParams,

    /// The ordered shells of the basis.
    shells: &'a [BasisShell],

    /// The (SO, AO) dimensions declared by the host, if any. These are checked against the
    /// dimensions implied by [`Self::shells`].
    #[builder(default = "None")]
    dimensions: Option<(usize, usize)>,

    /// The result of the basis transformation.
    #[builder(setter(skip), default = "None")]
    result: Option<BasisTransformationResult>,
}

impl<'a> BasisTransformationDriver<'a> {
    /// Returns a builder to construct a [`BasisTransformationDriver`] structure.
    pub fn builder() -> BasisTransformationDriverBuilder<'a> {
        BasisTransformationDriverBuilder::default()
    }

    /// Logs the shells of the basis in a nicely formatted table.
    fn log_shell_table(&self) {
        log_subtitle("Basis shells");
        aotrans_output!("");
        let order_length = self
            .shells
            .iter()
            .map(|shell| shell.to_string().chars().count())
            .max()
            .unwrap_or(20)
            .max(5);
        let index_length = self.shells.len().to_string().chars().count().max(1);
        let width = index_length + order_length + 36;
        aotrans_output!("{}", "┈".repeat(width));
        aotrans_output!(
            " {:>index_length$}  {:<10}  {:>9}  {:>9}  {:<order_length$}",
            "#",
            "Shell",
            "Rows",
            "Cols",
            "Order"
        );
        aotrans_output!("{}", "┈".repeat(width));
        let row_bounds = row_boundary_indices(self.shells);
        let col_bounds = col_boundary_indices(self.shells);
        for (i, (shell, ((r0, r1), (c0, c1)))) in self
            .shells
            .iter()
            .zip(row_bounds.into_iter().zip(col_bounds))
            .enumerate()
        {
            aotrans_output!(
                " {:>index_length$}  {:<10}  {:>9}  {:>9}  {:<order_length$}",
                i,
                shell.label(),
                format!("{r0}–{}", r1 - 1),
                format!("{c0}–{}", c1 - 1),
                shell.to_string()
            );
        }
        aotrans_output!("{}", "┈".repeat(width));
        aotrans_output!("");
    }

    /// Executes the construction of the basis transformation matrices.
    fn transform_basis(&mut self) -> Result<(), anyhow::Error> {
        let params = self.parameters;
        let builder = ShellBlockTransformBuilder::new(self.shells);
        builder
            .check_angular_momenta()
            .with_context(|| "Unable to construct the basis transformation matrices")?;
        if params.print >= 1 {
            log_title("Basis Transformation");
            aotrans_output!("");
            params.log_output_display();
            self.log_shell_table();
        }

        let selector = params
            .trans_mat
            .as_deref()
            .unwrap_or("")
            .parse::<TransformSelector>()
            .with_context(|| "Unable to determine which transformation matrix is requested")?;

        let matrices = match self.dimensions {
            Some((n_so, n_ao)) => builder.build_with_dims(n_so, n_ao),
            None => builder.build(),
        }
        .with_context(|| "Unable to construct the basis transformation matrices")?;
        log::debug!(
            "Basis transformation matrices constructed with dimensions {:?}.",
            matrices.dim()
        );

        self.result = Some(
            BasisTransformationResult::builder()
                .parameters(params.clone())
                .shells(self.shells.to_vec())
                .selector(selector)
                .matrices(matrices)
                .build()
                .with_context(|| "Unable to construct a basis transformation result structure")?,
        );

        if let Some(bt_res) = self.result.as_ref() {
            bt_res.log_output_display();
            if params.print >= 2 {
                log_subtitle(&format!("Transformation matrix {selector}"));
                aotrans_output!("");
                log_matrix(&bt_res.selected_matrix().view(), 6);
            }

            // Save basis transformation result, if requested
            if let Some(name) = params.result_save_name.as_ref() {
                write_aotrans_binary(name, AotransFileType::Mat, bt_res)?;
                aotrans_output!(
                    "Basis transformation results saved as {name}.{}.",
                    AotransFileType::Mat.ext()
                );
                aotrans_output!("");
            }
        }

        Ok(())
    }
}

impl AotransDriver for BasisTransformationDriver<'_> {
    type Params = BasisTransformationParams;

    type Outcome = BasisTransformationResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No basis transformation results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.transform_basis()
    }
}
