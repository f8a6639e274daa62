//! aotrans interface with binary data files exported from GAMESS.

use std::path::{Path, PathBuf};

use anyhow::{self, ensure, Context};
use byteorder::{BigEndian, LittleEndian};
use derive_builder::Builder;
use ndarray::{Array2, ShapeBuilder};
use serde::{Deserialize, Serialize};

use crate::io::format::{aotrans_output, aotrans_warn, log_matrix, log_subtitle};
use crate::io::numeric::NumericReader;
use crate::io::{write_aotrans_binary, AotransFileType};
use crate::transform::conversion::{
    convert_fock, convert_mo_coefficients, unpack_lower_triangle, ConvertedMatrices,
};
use crate::transform::TransformMatrices;


/// Symmetry deviations of a full Fock matrix above this threshold are reported.
const FOCK_SYMMETRY_THRESHOLD: f64 = 1e-10;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Input target: Fock and MO coefficients; source: binaries
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Serialisable/deserialisable structure containing control parameters for acquiring a GAMESS
/// Fock matrix and molecular-orbital coefficients from binary files and re-expressing them in
/// the Psi4 basis.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct BinariesConversionSource {
    /// Path to a binary file containing the atomic-orbital Fock matrix.
    pub fock: PathBuf,

    /// Path to a binary file containing the atomic-orbital molecular-orbital coefficient matrix,
    /// with atomic orbitals along the rows and molecular orbitals along the columns.
    pub coefficients: PathBuf,

    /// Specification of how the Fock matrix is packed in its binary file.
    #[builder(default)]
    #[serde(default)]
    pub fock_packing: FockPacking,

    /// Specification of the order full matrix elements are packed in binary files.
    #[builder(default)]
    #[serde(default)]
    pub matrix_order: MatrixOrder,

    /// Specification of the byte order numerical values are stored in binary files.
    #[builder(default)]
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl BinariesConversionSource {
    /// Returns a builder to construct a structure for handling binaries conversion source.
    pub fn builder() -> BinariesConversionSourceBuilder {
        BinariesConversionSourceBuilder::default()
    }

    /// Reads all floating-point values from a binary file in the specified byte order.
    ///
    /// # Errors
    ///
    /// Errors if the file cannot be read, or if its length is not a whole number of values.
    fn read_values(&self, path: &Path) -> Result<Vec<f64>, anyhow::Error> {
        let values = match self.byte_order {
            ByteOrder::LittleEndian => NumericReader::<_, LittleEndian, f64>::from_file(path)
                .and_then(|reader| Ok(reader.collect::<Result<Vec<_>, _>>()?)),
            ByteOrder::BigEndian => NumericReader::<_, BigEndian, f64>::from_file(path)
                .and_then(|reader| Ok(reader.collect::<Result<Vec<_>, _>>()?)),
        }
        .with_context(|| format!("Unable to read the binary file `{}`", path.display()))?;
        Ok(values)
    }

    /// Reads in the atomic-orbital Fock matrix.
    ///
    /// # Arguments
    ///
    /// * `n_ao` - The number of atomic orbitals.
    ///
    /// # Returns
    ///
    /// The full $`N_{\mathrm{AO}} \times N_{\mathrm{AO}}`$ Fock matrix.
    pub fn read_fock(&self, n_ao: usize) -> Result<Array2<f64>, anyhow::Error> {
        let fock_v = self.read_values(&self.fock)?;
        let fock = match self.fock_packing {
            FockPacking::LowerTriangle => unpack_lower_triangle(&fock_v, n_ao).with_context(|| {
                "Unable to unpack the read-in lower-triangular Fock matrix when handling binaries conversion source"
            })?,
            FockPacking::Full => {
                let fock = match self.matrix_order {
                    MatrixOrder::RowMajor => Array2::from_shape_vec((n_ao, n_ao), fock_v)
                        .with_context(|| {
                            "Unable to construct a Fock matrix from the read-in row-major binary file when handling binaries conversion source"
                        })?,
                    MatrixOrder::ColMajor => Array2::from_shape_vec((n_ao, n_ao).f(), fock_v)
                        .with_context(|| {
                            "Unable to construct a Fock matrix from the read-in column-major binary file when handling binaries conversion source"
                        })?,
                };
                let asymmetry = (&fock - &fock.t()).iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
                if asymmetry > FOCK_SYMMETRY_THRESHOLD {
                    aotrans_warn!(
                        "The read-in Fock matrix is not symmetric: largest deviation is {asymmetry:.3e}."
                    );
                }
                fock
            }
        };
        Ok(fock)
    }

    /// Reads in the atomic-orbital molecular-orbital coefficient matrix.
    ///
    /// # Arguments
    ///
    /// * `n_ao` - The number of atomic orbitals.
    ///
    /// # Returns
    ///
    /// The $`N_{\mathrm{AO}} \times N_{\mathrm{MO}}`$ coefficient matrix.
    pub fn read_coefficients(&self, n_ao: usize) -> Result<Array2<f64>, anyhow::Error> {
        let c_v = self.read_values(&self.coefficients)?;
        ensure!(n_ao > 0, "No atomic orbitals to read coefficients for.");
        ensure!(
            c_v.len() % n_ao == 0,
            "The number of read-in coefficients, {}, is not a multiple of the number of atomic orbitals, {n_ao}.",
            c_v.len()
        );
        let nmo = c_v.len().div_euclid(n_ao);
        let c = match self.matrix_order {
            MatrixOrder::RowMajor => Array2::from_shape_vec((n_ao, nmo), c_v).with_context(|| {
                "Unable to construct a coefficient matrix from the read-in row-major binary file when handling binaries conversion source"
            })?,
            MatrixOrder::ColMajor => Array2::from_shape_vec((n_ao, nmo).f(), c_v).with_context(|| {
                "Unable to construct a coefficient matrix from the read-in column-major binary file when handling binaries conversion source"
            })?,
        };
        Ok(c)
    }

    /// Reads in the Fock matrix and the coefficients and re-expresses them in the target basis.
    ///
    /// # Arguments
    ///
    /// * `matrices` - The basis transformation matrices.
    pub fn convert(&self, matrices: &TransformMatrices) -> Result<ConvertedMatrices, anyhow::Error> {
        let (_, n_ao) = matrices.dim();
        let fock = self.read_fock(n_ao)?;
        let coefficients = self.read_coefficients(n_ao)?;
        Ok(ConvertedMatrices {
            fock: convert_fock(matrices.secondary.view(), fock.view())?,
            coefficients: convert_mo_coefficients(matrices.primary.view(), coefficients.view())?,
        })
    }

    /// Converts the binary quantities, logs them, and saves them if requested.
    ///
    /// # Arguments
    ///
    /// * `matrices` - The basis transformation matrices.
    /// * `print` - The print level. Converted matrices are printed at level 2 or above.
    /// * `save_name` - Optional name for saving the converted matrices as a binary file of type
    /// [`AotransFileType::Cnv`].
    pub fn conversion_handle(
        &self,
        matrices: &TransformMatrices,
        print: u8,
        save_name: Option<&String>,
    ) -> Result<ConvertedMatrices, anyhow::Error> {
        let converted = self
            .convert(matrices)
            .with_context(|| "Unable to convert GAMESS quantities when handling binaries conversion source")?;
        let (n_so, nmo) = converted.coefficients.dim();
        log_subtitle("Conversion of GAMESS quantities");
        aotrans_output!("");
        aotrans_output!("Fock matrix: {}", self.fock.display());
        aotrans_output!("Coefficients: {}", self.coefficients.display());
        aotrans_output!("Converted Fock matrix dimensions: {n_so} × {n_so}");
        aotrans_output!("Converted coefficient matrix dimensions: {n_so} × {nmo}");
        aotrans_output!("");
        if print >= 2 {
            log_subtitle("Converted Fock matrix");
            aotrans_output!("");
            log_matrix(&converted.fock.view(), 6);
            log_subtitle("Converted coefficient matrix");
            aotrans_output!("");
            log_matrix(&converted.coefficients.view(), 6);
        }
        if let Some(name) = save_name {
            write_aotrans_binary(name, AotransFileType::Cnv, &converted)?;
            aotrans_output!(
                "Converted matrices saved as {name}.{}.",
                AotransFileType::Cnv.ext()
            );
            aotrans_output!("");
        }
        Ok(converted)
    }
}

impl Default for BinariesConversionSource {
    fn default() -> Self {
        BinariesConversionSource::builder()
            .fock(PathBuf::from("path/to/ao/fock/matrix"))
            .coefficients(PathBuf::from("path/to/ao/mo/coefficients"))
            .build()
            .expect("Unable to build a default `BinariesConversionSource`.")
    }
}

/// Enumerated type indicating how a symmetric matrix is packed in a binary file.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum FockPacking {
    /// Row-wise packed lower triangle, $`(0,0), (1,0), (1,1), (2,0), \ldots`$.
    #[default]
    LowerTriangle,

    /// All elements, traversed as given by [`MatrixOrder`].
    Full,
}

/// Enumerated type indicating the order the matrix elements are traversed when stored into or
/// read in from a binary file.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum MatrixOrder {
    #[default]
    RowMajor,
    ColMajor,
}

/// Enumerated type indicating the byte order of numerical values in binary files.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}
