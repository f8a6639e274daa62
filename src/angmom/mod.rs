//! Angular momentum conversion between Cartesian and pure Gaussians.

pub mod sh_conversion;

/// Alphabetical labels of angular momenta.
pub static ANGMOM_LABELS: [&str; 7] = ["S", "P", "D", "F", "G", "H", "I"];

/// Returns the alphabetical label of an angular momentum, or the number itself if no label is
/// available.
pub fn angmom_label(l: u32) -> String {
    usize::try_from(l)
        .ok()
        .and_then(|lusize| ANGMOM_LABELS.get(lusize))
        .map(|label| (*label).to_string())
        .unwrap_or_else(|| format!("l={l}"))
}
