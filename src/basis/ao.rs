//! Atomic-orbital shells and the orderings of their angular functions.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::slice::Iter;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::angmom::angmom_label;

#[cfg(test)]
#[path = "ao_tests.rs"]
mod ao_tests;

// -------------------
// Shell order structs
// -------------------

// ~~~~~~~~~
// PureOrder
// ~~~~~~~~~

/// Structure to contain the ordering of the real solid harmonics of one shell.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PureOrder {
    /// The $`m`$ values of the real solid harmonics in the order in which they appear.
    mls: Vec<i32>,

    /// The angular momentum of the shell.
    pub lpure: u32,
}

impl PureOrder {
    /// Constructs a new [`PureOrder`] from an explicit sequence of $`m`$ values.
    ///
    /// # Errors
    ///
    /// Errors if the sequence is empty, repeats a value, or does not cover every $`m`$ from
    /// $`-l`$ to $`l`$.
    pub fn new(mls: &[i32]) -> Result<Self, anyhow::Error> {
        let lpure = mls
            .iter()
            .map(|m| m.unsigned_abs())
            .max()
            .ok_or_else(|| format_err!("A pure shell needs at least one m value."))?;
        let pure_order = PureOrder {
            mls: mls.to_vec(),
            lpure,
        };
        ensure!(
            pure_order.verify(),
            "The m values {mls:?} do not make up a complete pure shell with l = {lpure}."
        );
        Ok(pure_order)
    }

    /// Builds the shell of rank `lpure` with a predetermined order.
    fn from_known(lpure: u32, mls: Vec<i32>) -> Self {
        let pure_order = PureOrder { mls, lpure };
        debug_assert!(pure_order.verify());
        pure_order
    }

    fn lpure_i32(lpure: u32) -> i32 {
        i32::try_from(lpure)
            .unwrap_or_else(|_| panic!("Angular momentum {lpure} does not fit in an `i32`."))
    }

    /// The order $`-l, -l+1, \ldots, l`$.
    #[must_use]
    pub fn increasingm(lpure: u32) -> Self {
        let lmax = Self::lpure_i32(lpure);
        Self::from_known(lpure, (-lmax..=lmax).collect_vec())
    }

    /// The Molden order $`0, +1, -1, +2, -2, \ldots`$, in which Psi4 arranges its pure shells.
    #[must_use]
    pub fn molden(lpure: u32) -> Self {
        let lmax = Self::lpure_i32(lpure);
        let mls = std::iter::once(0)
            .chain((1..=lmax).flat_map(|absm| [absm, -absm]))
            .collect_vec();
        Self::from_known(lpure, mls)
    }

    /// Checks that every $`m`$ from $`-l`$ to $`l`$ appears exactly once.
    #[must_use]
    pub fn verify(&self) -> bool {
        let distinct = self.mls.iter().collect::<HashSet<_>>();
        distinct.len() == self.mls.len()
            && self.mls.len() == self.ncomps()
            && self.mls.iter().all(|m| m.unsigned_abs() <= self.lpure)
    }

    /// Iterates over the $`m`$ values in order.
    pub fn iter(&'_ self) -> Iter<'_, i32> {
        self.mls.iter()
    }

    /// The number of functions in the shell, $`2l+1`$.
    pub fn ncomps(&self) -> usize {
        2 * self.lpure as usize + 1
    }

    pub fn get_m_with_index(&self, i: usize) -> Option<i32> {
        self.mls.get(i).copied()
    }

    pub fn position_of(&self, m: i32) -> Option<usize> {
        self.mls.iter().position(|&ml| ml == m)
    }
}

impl fmt::Display for PureOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l = {}: [{}]", self.lpure, self.iter().join(", "))
    }
}

// ~~~~~~~~~
// CartOrder
// ~~~~~~~~~

/// Structure to contain the ordering of the Cartesian functions of one shell.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CartOrder {
    /// The $`(l_x, l_y, l_z)`$ exponents of the Cartesian functions in the order in which they
    /// appear.
    pub cart_tuples: Vec<(u32, u32, u32)>,

    /// The angular momentum of the shell.
    pub lcart: u32,
}

impl CartOrder {
    /// Constructs a new [`CartOrder`] from an explicit sequence of exponent tuples.
    ///
    /// # Errors
    ///
    /// Errors if the sequence is empty, mixes total degrees, repeats a tuple, or misses a
    /// component.
    pub fn new(cart_tuples: &[(u32, u32, u32)]) -> Result<Self, anyhow::Error> {
        let &(lx, ly, lz) = cart_tuples
            .first()
            .ok_or_else(|| format_err!("A Cartesian shell needs at least one component."))?;
        let cart_order = CartOrder {
            cart_tuples: cart_tuples.to_vec(),
            lcart: lx + ly + lz,
        };
        ensure!(
            cart_order.verify(),
            "The exponent tuples {cart_tuples:?} do not make up a complete Cartesian shell with l = {}.",
            cart_order.lcart
        );
        Ok(cart_order)
    }

    /// Builds the shell of rank `lcart` with a predetermined order.
    fn from_known(lcart: u32, cart_tuples: Vec<(u32, u32, u32)>) -> Self {
        let cart_order = CartOrder { cart_tuples, lcart };
        debug_assert!(cart_order.verify());
        cart_order
    }

    /// The lexicographic order ($`xx, xy, xz, yy, yz, zz`$ for $`l = 2`$), in which Psi4 arranges
    /// its Cartesian shells.
    #[must_use]
    pub fn lex(lcart: u32) -> Self {
        let cart_tuples = (0..=lcart)
            .rev()
            .flat_map(|lx| (0..=(lcart - lx)).rev().map(move |ly| (lx, ly, lcart - lx - ly)))
            .collect_vec();
        Self::from_known(lcart, cart_tuples)
    }

    /// The GAMESS order: axial functions first, then the mixed ones.
    ///
    /// # Panics
    ///
    /// Panics if `lcart` is greater than 4, beyond which GAMESS defines no order here.
    #[must_use]
    pub fn gamess(lcart: u32) -> Self {
        let cart_tuples: Vec<(u32, u32, u32)> = match lcart {
            0 => vec![(0, 0, 0)],
            1 => vec![(1, 0, 0), (0, 1, 0), (0, 0, 1)],
            2 => vec![
                (2, 0, 0),
                (0, 2, 0),
                (0, 0, 2),
                (1, 1, 0),
                (1, 0, 1),
                (0, 1, 1),
            ],
            3 => vec![
                (3, 0, 0),
                (0, 3, 0),
                (0, 0, 3),
                (2, 1, 0),
                (2, 0, 1),
                (1, 2, 0),
                (0, 2, 1),
                (1, 0, 2),
                (0, 1, 2),
                (1, 1, 1),
            ],
            4 => vec![
                (4, 0, 0),
                (0, 4, 0),
                (0, 0, 4),
                (3, 1, 0),
                (3, 0, 1),
                (1, 3, 0),
                (0, 3, 1),
                (1, 0, 3),
                (0, 1, 3),
                (2, 2, 0),
                (2, 0, 2),
                (0, 2, 2),
                (2, 1, 1),
                (1, 2, 1),
                (1, 1, 2),
            ],
            _ => panic!("No GAMESS Cartesian order is available for l = {lcart}."),
        };
        Self::from_known(lcart, cart_tuples)
    }

    /// Checks that every exponent tuple of total degree $`l`$ appears exactly once.
    #[must_use]
    pub fn verify(&self) -> bool {
        let distinct = self.cart_tuples.iter().collect::<HashSet<_>>();
        distinct.len() == self.cart_tuples.len()
            && self.cart_tuples.len() == self.ncomps()
            && self
                .cart_tuples
                .iter()
                .all(|(lx, ly, lz)| lx + ly + lz == self.lcart)
    }

    /// Iterates over the exponent tuples in order.
    pub fn iter(&'_ self) -> Iter<'_, (u32, u32, u32)> {
        self.cart_tuples.iter()
    }

    /// The number of functions in the shell, $`(l+1)(l+2)/2`$.
    pub fn ncomps(&self) -> usize {
        let lcart = self.lcart as usize;
        ((lcart + 1) * (lcart + 2)).div_euclid(2)
    }

    pub fn get_cart_tuple_with_index(&self, i: usize) -> Option<(u32, u32, u32)> {
        self.cart_tuples.get(i).copied()
    }

    pub fn position_of(&self, cart_tuple: &(u32, u32, u32)) -> Option<usize> {
        self.cart_tuples.iter().position(|ct| ct == cart_tuple)
    }
}

impl fmt::Display for CartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "l = {}: [{}]",
            self.lcart,
            self.iter()
                .map(|cart_tuple| cart_tuple_to_str(cart_tuple, true))
                .join(", ")
        )
    }
}

/// Translates a Cartesian exponent tuple to a human-understandable string.
///
/// # Arguments
///
/// * `cart_tuple` - A tuple of $`(l_x, l_y, l_z)`$ specifying the exponents of the Cartesian
///   components of the Cartesian Gaussian.
/// * flat - A flag indicating if the string representation is flat (*e.g.* `xxyz`) or compact
///   (*e.g.* `x^2yz`).
///
/// Returns
///
/// The string representation of the Cartesian exponent tuple.
pub fn cart_tuple_to_str(cart_tuple: &(u32, u32, u32), flat: bool) -> String {
    if cart_tuple.0 + cart_tuple.1 + cart_tuple.2 == 0u32 {
        "1".to_string()
    } else {
        let cart_array = [cart_tuple.0, cart_tuple.1, cart_tuple.2];
        let carts = ["x", "y", "z"];
        cart_array
            .iter()
            .enumerate()
            .map(|(i, &l)| {
                if flat {
                    carts[i].repeat(l as usize)
                } else {
                    match l.cmp(&1) {
                        Ordering::Greater => format!("{}^{l}", carts[i]),
                        Ordering::Equal => carts[i].to_string(),
                        Ordering::Less => String::new(),
                    }
                }
            })
            .collect::<String>()
    }
}

// -------------------
// ShellRepresentation
// -------------------

/// Enumerated type to indicate the type of the angular functions in a shell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ShellRepresentation {
    /// Variant for Cartesian functions $`x^{l_x} y^{l_y} z^{l_z}`$.
    Cartesian,

    /// Variant for real solid harmonics.
    Pure,
}

impl fmt::Display for ShellRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellRepresentation::Cartesian => write!(f, "Cart"),
            ShellRepresentation::Pure => write!(f, "Pure"),
        }
    }
}

// ----------
// BasisShell
// ----------

/// Structure representing a shell in an atomic-orbital basis set.
///
/// The target (row) side of a shell is pure if [`Self::pure`] is set and Cartesian otherwise; the
/// source (column) side is always Cartesian.
#[derive(Clone, Copy, Builder, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BasisShell {
    /// The angular momentum of the shell.
    pub l: u32,

    /// A boolean indicating if the shell is represented by real solid harmonics.
    #[builder(default = "true")]
    #[serde(default = "default_pure")]
    pub pure: bool,
}

fn default_pure() -> bool {
    true
}

impl BasisShell {
    /// Returns a builder to construct a new [`BasisShell`].
    ///
    /// # Returns
    ///
    /// A builder to construct a new [`BasisShell`].
    pub fn builder() -> BasisShellBuilder {
        BasisShellBuilder::default()
    }

    /// Constructs a new [`BasisShell`].
    ///
    /// # Arguments
    ///
    /// * `l` - The angular momentum of this shell.
    /// * `pure` - A boolean indicating if this shell consists of real solid harmonics.
    pub fn new(l: u32, pure: bool) -> Self {
        BasisShell::builder()
            .l(l)
            .pure(pure)
            .build()
            .expect("Unable to construct a `BasisShell`.")
    }

    /// The representation of the angular functions on the row side of this shell.
    pub fn representation(&self) -> ShellRepresentation {
        if self.pure {
            ShellRepresentation::Pure
        } else {
            ShellRepresentation::Cartesian
        }
    }

    /// The number of Cartesian functions in this shell, $`(l+1)(l+2)/2`$.
    pub fn n_cart(&self) -> usize {
        let lsize = self.l as usize;
        ((lsize + 1) * (lsize + 2)).div_euclid(2)
    }

    /// The number of pure functions in this shell, $`2l+1`$.
    pub fn n_pure(&self) -> usize {
        2 * self.l as usize + 1
    }

    /// The number of rows occupied by this shell in a transformation matrix.
    pub fn n_rows(&self) -> usize {
        match self.representation() {
            ShellRepresentation::Pure => self.n_pure(),
            ShellRepresentation::Cartesian => self.n_cart(),
        }
    }

    /// The number of columns occupied by this shell in a transformation matrix.
    pub fn n_cols(&self) -> usize {
        self.n_cart()
    }

    /// A short label for this shell, *e.g.* `D (pure)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            angmom_label(self.l),
            if self.pure { "pure" } else { "cart" }
        )
    }
}

impl fmt::Display for BasisShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.representation() {
            ShellRepresentation::Pure => write!(
                f,
                "{} ({})",
                self.representation(),
                PureOrder::molden(self.l)
                    .iter()
                    .map(|m| m.to_string())
                    .join(", ")
            ),
            ShellRepresentation::Cartesian => write!(
                f,
                "{} ({})",
                self.representation(),
                CartOrder::lex(self.l)
                    .iter()
                    .map(|cart_tuple| cart_tuple_to_str(cart_tuple, true))
                    .join(", ")
            ),
        }
    }
}

/// The ordered tuples of 0-based row indices indicating the starting (inclusive) and ending
/// (exclusive) positions of the shells in a transformation matrix.
pub fn row_boundary_indices(shells: &[BasisShell]) -> Vec<(usize, usize)> {
    shells
        .iter()
        .scan(0, |acc, shell| {
            let start_index = *acc;
            *acc += shell.n_rows();
            Some((start_index, *acc))
        })
        .collect::<Vec<_>>()
}

/// The ordered tuples of 0-based column indices indicating the starting (inclusive) and ending
/// (exclusive) positions of the shells in a transformation matrix.
pub fn col_boundary_indices(shells: &[BasisShell]) -> Vec<(usize, usize)> {
    shells
        .iter()
        .scan(0, |acc, shell| {
            let start_index = *acc;
            *acc += shell.n_cols();
            Some((start_index, *acc))
        })
        .collect::<Vec<_>>()
}
