//! Nice aotrans output formatting.

use std::fmt;

use log;
use ndarray::ArrayView2;

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;

const AOTRANS_BANNER_LENGTH: usize = 103;

/// Logs an error to the `aotrans-output` logger.
macro_rules! aotrans_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "aotrans-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `aotrans-output` logger.
macro_rules! aotrans_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "aotrans-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `aotrans-output` logger.
macro_rules! aotrans_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "aotrans-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {aotrans_error, aotrans_output, aotrans_warn};

/// Writes a nicely formatted section title.
pub(crate) fn write_title(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let length = title.chars().count().max(AOTRANS_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    writeln!(f, "┌──{bar}──┐")?;
    writeln!(f, "│§ {title:^length$} §│")?;
    writeln!(f, "└──{bar}──┘")?;
    Ok(())
}

/// Logs a nicely formatted section title to the `aotrans-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(AOTRANS_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    aotrans_output!("┌──{bar}──┐");
    aotrans_output!("│§ {title:^length$} §│");
    aotrans_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `aotrans-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    aotrans_output!("{}", subtitle);
    aotrans_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `aotrans-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = AOTRANS_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    aotrans_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `aotrans-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = AOTRANS_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    aotrans_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// Formats a matrix into lines of at most `ncols_per_block` columns each, with row and column
/// indices as headers.
pub(crate) fn format_matrix_blocks(
    mat: &ArrayView2<f64>,
    ncols_per_block: usize,
    precision: usize,
) -> Vec<String> {
    let ncols_per_block = ncols_per_block.max(1);
    let width = precision + 7;
    let row_index_width = mat.nrows().max(1).to_string().chars().count();
    let mut lines = Vec::new();
    for col_start in (0..mat.ncols()).step_by(ncols_per_block) {
        let col_end = (col_start + ncols_per_block).min(mat.ncols());
        let header = (col_start..col_end)
            .map(|j| format!("{j:>width$}"))
            .collect::<String>();
        lines.push(format!("{:>row_index_width$} {header}", ""));
        for (i, row) in mat.rows().into_iter().enumerate() {
            let values = (col_start..col_end)
                .map(|j| format!("{:>width$.precision$e}", row[j]))
                .collect::<String>();
            lines.push(format!("{i:>row_index_width$} {values}"));
        }
        lines.push(String::new());
    }
    lines
}

/// Logs a matrix nicely to the `aotrans-output` logger.
pub(crate) fn log_matrix(mat: &ArrayView2<f64>, precision: usize) {
    format_matrix_blocks(mat, 8, precision)
        .iter()
        .for_each(|line| {
            aotrans_output!("{line}");
        });
}

/// A trait for logging `aotrans` outputs nicely.
pub(crate) trait AotransOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            aotrans_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> AotransOutput for T where T: fmt::Debug + fmt::Display {}
