//! Reading and writing of aotrans files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{self, format_err, Context};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;
pub(crate) mod numeric;


/// An enumerated type for `aotrans` file types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AotransFileType {
    /// Variant for binary files containing basis transformation matrices.
    Mat,

    /// Variant for binary files containing GAMESS quantities converted into the Psi4 basis.
    Cnv,
}

impl AotransFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            AotransFileType::Mat => "aotrans.mat".to_string(),
            AotransFileType::Cnv => "aotrans.cnv".to_string(),
        }
    }
}

/// Replaces the extension of `name` with `ext`.
fn aotrans_path<P: AsRef<Path>>(name: P, ext: &str) -> PathBuf {
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(ext);
    path
}

/// Reads a bincode-encoded `aotrans` binary file.
///
/// # Arguments
///
/// * `name` - The file name without its `aotrans` extension.
/// * `file_type` - The type of the file, which determines the extension.
pub fn read_aotrans_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: AotransFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let path = aotrans_path(name, &file_type.ext());
    let file = File::open(&path)
        .with_context(|| format!("Unable to open `{}` for reading", path.display()))?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|err| format_err!(err))
}

/// Writes `value` bincode-encoded into an `aotrans` binary file.
///
/// # Arguments
///
/// * `name` - The file name without its `aotrans` extension.
/// * `file_type` - The type of the file, which determines the extension.
/// * `value` - The structure to be written.
pub fn write_aotrans_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: AotransFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let path = aotrans_path(name, &file_type.ext());
    let file = File::create(&path)
        .with_context(|| format!("Unable to create `{}` for writing", path.display()))?;
    bincode::serialize_into(BufWriter::new(file), value).map_err(|err| format_err!(err))
}

/// Reads a YAML configuration file. `name` includes its extension.
pub fn read_aotrans_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let file = File::open(name.as_ref())
        .with_context(|| format!("Unable to open `{}` for reading", name.as_ref().display()))?;
    serde_yaml::from_reader(BufReader::new(file)).map_err(|err| format_err!(err))
}

/// Writes `value` into the YAML file `<name>.yml`.
pub fn write_aotrans_yaml<T, P: AsRef<Path>>(name: P, value: &T) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let path = aotrans_path(name, "yml");
    let file = File::create(&path)
        .with_context(|| format!("Unable to create `{}` for writing", path.display()))?;
    serde_yaml::to_writer(BufWriter::new(file), value).map_err(|err| format_err!(err))
}
