//! Human-readable specification of atomic-orbital basis shells in aotrans input configuration.

use anyhow::{self, ensure, format_err};
use serde::{Deserialize, Serialize};

use crate::angmom::ANGMOM_LABELS;
use crate::basis::ao::BasisShell;

// ---------------
// InputBasisShell
// ---------------

/// Serialisable/deserialisable enumerated type to specify one shell of the basis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputBasisShell {
    /// This variant gives the shell by its angular momentum letter (`S`, `P`, `D`, `F`, ...,
    /// case-insensitive). Its representation is taken from [`InputBasis::pure`].
    Label(String),

    /// This variant gives the shell explicitly by its angular momentum and representation.
    Explicit(BasisShell),
}

impl InputBasisShell {
    /// Converts the [`InputBasisShell`] to a corresponding [`BasisShell`].
    ///
    /// # Arguments
    ///
    /// * `default_pure` - The representation applied to shells given by label.
    ///
    /// # Errors
    ///
    /// Errors if a label does not correspond to any angular momentum.
    pub fn to_basis_shell(&self, default_pure: bool) -> Result<BasisShell, anyhow::Error> {
        match self {
            InputBasisShell::Label(label) => {
                let label_upper = label.trim().to_uppercase();
                let l = ANGMOM_LABELS
                    .iter()
                    .position(|&angmom_label| angmom_label == label_upper)
                    .ok_or_else(|| format_err!("Unrecognised shell label `{label}`."))?;
                Ok(BasisShell::new(u32::try_from(l)?, default_pure))
            }
            InputBasisShell::Explicit(shell) => Ok(*shell),
        }
    }
}

// ----------
// InputBasis
// ----------

fn default_true() -> bool {
    true
}

/// Serialisable/deserialisable structure to specify the ordered shells of a basis together with
/// the dimensions declared by the host program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputBasis {
    /// Boolean indicating if shells given by label are pure. This mirrors the global
    /// pure-angular-momentum flag of the target basis set.
    #[serde(default = "default_true")]
    pub pure: bool,

    /// The ordered shells of the basis.
    pub shells: Vec<InputBasisShell>,

    /// The declared number of target (SO) functions, if any.
    #[serde(default)]
    pub n_so: Option<usize>,

    /// The declared number of source (AO) functions, if any.
    #[serde(default)]
    pub n_ao: Option<usize>,
}

impl InputBasis {
    /// Converts the [`InputBasis`] to an ordered sequence of [`BasisShell`]s.
    pub fn to_basis_shells(&self) -> Result<Vec<BasisShell>, anyhow::Error> {
        self.shells
            .iter()
            .map(|shell| shell.to_basis_shell(self.pure))
            .collect::<Result<Vec<_>, _>>()
    }

    /// Returns the declared (SO, AO) dimensions.
    ///
    /// # Errors
    ///
    /// Errors if only one of the two dimensions is declared.
    pub fn dimensions(&self) -> Result<Option<(usize, usize)>, anyhow::Error> {
        ensure!(
            self.n_so.is_some() == self.n_ao.is_some(),
            "Both or neither of `n_so` and `n_ao` must be declared."
        );
        Ok(self.n_so.zip(self.n_ao))
    }
}

impl Default for InputBasis {
    fn default() -> Self {
        InputBasis {
            pure: true,
            shells: vec![
                InputBasisShell::Label("S".to_string()),
                InputBasisShell::Label("S".to_string()),
                InputBasisShell::Label("P".to_string()),
                InputBasisShell::Explicit(BasisShell::new(2, false)),
            ],
            n_so: None,
            n_ao: None,
        }
    }
}
