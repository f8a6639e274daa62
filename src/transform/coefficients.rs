//! Per-shell coefficient blocks mapping GAMESS-ordered Cartesian functions onto Psi4-ordered
//! functions.
//!
//! Within a block, rows follow the target ordering ([`CartOrder::lex`] for Cartesian shells and
//! [`PureOrder::molden`] for pure shells) and columns follow [`CartOrder::gamess`]. Every source
//! Cartesian function is individually normalised to unity, whereas every target Cartesian
//! function carries the normalisation constant of the axial function $`x^l`$ of its shell.

use crate::angmom::sh_conversion::{cart_norm_ratio, sh_cart2rl_mat, sh_rl2cart_mat};
use crate::basis::ao::{CartOrder, PureOrder, ShellRepresentation};

#[cfg(test)]
#[path = "coefficients_tests.rs"]
mod coefficients_tests;

/// The highest angular momentum for which coefficient blocks are tabulated.
pub const MAX_TABULATED_L: u32 = 3;

/// Coefficients below this magnitude are treated as structural zeros when deriving blocks.
const COEFFICIENT_THRESHOLD: f64 = 1e-12;

/// Structure containing one nonzero cell of a shell coefficient block.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ShellBlockEntry {
    /// The row index of the cell, local to the shell.
    pub row: usize,

    /// The column index of the cell, local to the shell.
    pub col: usize,

    /// The coefficient used for molecular-orbital coefficients.
    pub primary: f64,

    /// The coefficient used for Fock-like operator matrices.
    pub secondary: f64,
}

const fn entry(row: usize, col: usize, primary: f64, secondary: f64) -> ShellBlockEntry {
    ShellBlockEntry {
        row,
        col,
        primary,
        secondary,
    }
}

const SQRT3: f64 = 1.7320508075688772;
const SQRT5: f64 = 2.23606797749979;
const SQRT15: f64 = 3.872983346207417;
const INV_SQRT3: f64 = 0.5773502691896258;
const INV_SQRT5: f64 = 0.4472135954999579;
const INV_SQRT15: f64 = 0.2581988897471611;

// -------
// l = 0
// -------

static S_BLOCK: [ShellBlockEntry; 1] = [entry(0, 0, 1.0, 1.0)];

// -------
// l = 1
// -------

static P_CART_BLOCK: [ShellBlockEntry; 3] = [
    entry(0, 0, 1.0, 1.0),
    entry(1, 1, 1.0, 1.0),
    entry(2, 2, 1.0, 1.0),
];

static P_PURE_BLOCK: [ShellBlockEntry; 3] = [
    entry(0, 2, 1.0, 1.0),
    entry(1, 0, 1.0, 1.0),
    entry(2, 1, 1.0, 1.0),
];

// -------
// l = 2
// -------

static D_CART_BLOCK: [ShellBlockEntry; 6] = [
    entry(0, 0, 1.0, 1.0),
    entry(1, 3, SQRT3, INV_SQRT3),
    entry(2, 4, SQRT3, INV_SQRT3),
    entry(3, 1, 1.0, 1.0),
    entry(4, 5, SQRT3, INV_SQRT3),
    entry(5, 2, 1.0, 1.0),
];

static D_PURE_BLOCK: [ShellBlockEntry; 8] = [
    // d0
    entry(0, 0, -1.0 / 3.0, -0.5),
    entry(0, 1, -1.0 / 3.0, -0.5),
    entry(0, 2, 2.0 / 3.0, 1.0),
    // d1c, d1s
    entry(1, 4, 1.0, 1.0),
    entry(2, 5, 1.0, 1.0),
    // d2c
    entry(3, 0, INV_SQRT3, 0.8660254037844386),
    entry(3, 1, -INV_SQRT3, -0.8660254037844386),
    // d2s
    entry(4, 3, 1.0, 1.0),
];

// -------
// l = 3
// -------

static F_CART_BLOCK: [ShellBlockEntry; 10] = [
    entry(0, 0, 1.0, 1.0),
    entry(1, 3, SQRT5, INV_SQRT5),
    entry(2, 4, SQRT5, INV_SQRT5),
    entry(3, 5, SQRT5, INV_SQRT5),
    entry(4, 9, SQRT15, INV_SQRT15),
    entry(5, 7, SQRT5, INV_SQRT5),
    entry(6, 1, 1.0, 1.0),
    entry(7, 6, SQRT5, INV_SQRT5),
    entry(8, 8, SQRT5, INV_SQRT5),
    entry(9, 2, 1.0, 1.0),
];

static F_PURE_BLOCK: [ShellBlockEntry; 16] = [
    // f0
    entry(0, 2, 0.4, 1.0),
    entry(0, 4, -INV_SQRT5, -0.6708203932499369),
    entry(0, 6, -INV_SQRT5, -0.6708203932499369),
    // f1c
    entry(1, 0, -0.2449489742783178, -0.6123724356957945),
    entry(1, 5, -0.18257418583505539, -0.27386127875258304),
    entry(1, 7, 0.7302967433402215, 1.0954451150103321),
    // f1s
    entry(2, 1, -0.2449489742783178, -0.6123724356957945),
    entry(2, 3, -0.18257418583505539, -0.27386127875258304),
    entry(2, 8, 0.7302967433402215, 1.0954451150103321),
    // f2c
    entry(3, 4, INV_SQRT3, 0.8660254037844386),
    entry(3, 6, -INV_SQRT3, -0.8660254037844386),
    // f2s
    entry(4, 9, 1.0, 1.0),
    // f3c
    entry(5, 0, 0.31622776601683794, 0.7905694150420949),
    entry(5, 5, -0.7071067811865476, -1.0606601717798214),
    // f3s
    entry(6, 1, -0.31622776601683794, -0.7905694150420949),
    entry(6, 3, 0.7071067811865476, 1.0606601717798214),
];

/// Looks up the tabulated coefficient block of a shell.
///
/// # Arguments
///
/// * `l` - The angular momentum of the shell.
/// * `representation` - The representation of the shell on the row side.
///
/// # Returns
///
/// The nonzero cells of the block, or `None` if no block is tabulated for `l`.
pub fn coefficient_block(
    l: u32,
    representation: ShellRepresentation,
) -> Option<&'static [ShellBlockEntry]> {
    match (l, representation) {
        (0, _) => Some(&S_BLOCK),
        (1, ShellRepresentation::Cartesian) => Some(&P_CART_BLOCK),
        (1, ShellRepresentation::Pure) => Some(&P_PURE_BLOCK),
        (2, ShellRepresentation::Cartesian) => Some(&D_CART_BLOCK),
        (2, ShellRepresentation::Pure) => Some(&D_PURE_BLOCK),
        (3, ShellRepresentation::Cartesian) => Some(&F_CART_BLOCK),
        (3, ShellRepresentation::Pure) => Some(&F_PURE_BLOCK),
        _ => None,
    }
}

/// Derives the coefficient block of a shell from the real solid harmonics and the Cartesian
/// normalisation ratios.
///
/// For Cartesian rows, the target function $`x^{l_x} y^{l_y} z^{l_z}`$ is the unit-normalised
/// source function divided by [`cart_norm_ratio`], which gives a primary coefficient $`r`$ and a
/// secondary coefficient $`1/r`$. For pure rows, the secondary coefficients expand each real solid
/// harmonic in the unit-normalised source functions, and the primary coefficients are the
/// corresponding rows of the dual projection, so that contaminants are annihilated.
///
/// # Arguments
///
/// * `l` - The angular momentum of the shell, at most 4.
/// * `representation` - The representation of the shell on the row side.
///
/// # Returns
///
/// The nonzero cells of the block, sorted by row then column.
///
/// # Panics
///
/// Panics if `l` is greater than 4.
pub fn derive_shell_block(l: u32, representation: ShellRepresentation) -> Vec<ShellBlockEntry> {
    let source_order = CartOrder::gamess(l);
    let mut entries = match representation {
        ShellRepresentation::Cartesian => CartOrder::lex(l)
            .iter()
            .enumerate()
            .map(|(row, lcartqns)| {
                let col = source_order
                    .position_of(lcartqns)
                    .expect("Cartesian component missing from the GAMESS order.");
                let r = cart_norm_ratio(*lcartqns);
                entry(row, col, r, 1.0 / r)
            })
            .collect::<Vec<_>>(),
        ShellRepresentation::Pure => {
            let target_order = PureOrder::molden(l);
            let wmat = sh_rl2cart_mat(l, &source_order, &target_order);
            let xmat = sh_cart2rl_mat(l, &source_order, &target_order);
            xmat.indexed_iter()
                .filter_map(|((row, col), &primary)| {
                    let secondary = wmat[(col, row)];
                    if primary.abs() > COEFFICIENT_THRESHOLD
                        || secondary.abs() > COEFFICIENT_THRESHOLD
                    {
                        Some(entry(row, col, primary, secondary))
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
        }
    };
    entries.sort_by_key(|e| (e.row, e.col));
    entries
}
