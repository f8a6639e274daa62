//! Input configuration for aotrans.

use anyhow::{self, Context};
use serde::{Deserialize, Serialize};

use crate::drivers::basis_transformation::{BasisTransformationDriver, BasisTransformationParams};
use crate::drivers::AotransDriver;
use crate::interfaces::binaries::BinariesConversionSource;
use crate::interfaces::input::ao_basis::InputBasis;
use crate::interfaces::InputHandle;
use crate::io::format::{aotrans_error, aotrans_output, log_macsec_begin, log_macsec_end};

pub mod ao_basis;

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;

/// A structure containing aotrans input parameters which can be serialised into and deserialised
/// from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// Specification of the ordered shells of the basis.
    pub basis: InputBasis,

    /// Control parameters for the basis transformation. If not specified, no matrix is selected
    /// and the transformation fails.
    #[serde(default)]
    pub transformation: BasisTransformationParams,

    /// Specification of GAMESS quantities in binary files to be re-expressed in the Psi4 basis.
    /// If `None`, only the transformation matrices are constructed.
    ///
    /// If not specified, this will be taken to be `None`.
    #[serde(default)]
    pub conversion: Option<BinariesConversionSource>,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            basis: InputBasis::default(),
            transformation: BasisTransformationParams::builder()
                .trans_mat(Some("C".to_string()))
                .build()
                .expect("Unable to construct default basis transformation parameters."),
            conversion: Some(BinariesConversionSource::default()),
        }
    }
}

impl InputHandle for Input {
    /// Handles the main input structure.
    fn handle(&self) -> Result<(), anyhow::Error> {
        let shells = self
            .basis
            .to_basis_shells()
            .with_context(|| "Unable to digest the input basis shells")?;
        let dimensions = self
            .basis
            .dimensions()
            .with_context(|| "Unable to digest the input basis dimensions")?;

        log_macsec_begin("Basis transformation");
        aotrans_output!("");
        let mut bt_driver = BasisTransformationDriver::builder()
            .parameters(&self.transformation)
            .shells(&shells)
            .dimensions(dimensions)
            .build()
            .with_context(|| "Unable to construct a basis transformation driver while handling input")?;
        let bt_run = bt_driver.run();
        log_macsec_end("Basis transformation");
        aotrans_output!("");
        if let Err(err) = bt_run {
            aotrans_error!("Basis transformation has failed with error:");
            aotrans_error!("  {err:#}");
            return Err(err);
        }

        if let Some(conversion) = self.conversion.as_ref() {
            let bt_res = bt_driver
                .result()
                .with_context(|| "Unable to retrieve the basis transformation result while handling input")?;
            log_macsec_begin("Conversion of GAMESS quantities");
            aotrans_output!("");
            let cnv_run = conversion.conversion_handle(
                &bt_res.matrices,
                self.transformation.print,
                self.transformation.result_save_name.as_ref(),
            );
            log_macsec_end("Conversion of GAMESS quantities");
            aotrans_output!("");
            if let Err(err) = cnv_run {
                aotrans_error!("Conversion of GAMESS quantities has failed with error:");
                aotrans_error!("  {err:#}");
                return Err(err);
            }
        }
        Ok(())
    }
}
