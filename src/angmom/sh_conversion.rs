//! Conversion coefficients between Cartesian Gaussians and real solid harmonic Gaussians.

use factorial::Factorial;
use ndarray::Array2;
use num::BigUint;
use num_traits::cast::ToPrimitive;

use crate::basis::ao::{CartOrder, PureOrder};

#[cfg(test)]
#[path = "sh_conversion_tests.rs"]
mod sh_conversion_tests;

/// Calculates the number of combinations of `n` things taken `r` at a time (unsigned arguments).
///
/// If $`r > n`$, `0` is returned.
///
/// # Arguments
///
/// * `n` - Number of things.
/// * `r` - Number of elements taken.
///
/// # Returns
///
/// The number of combinations.
fn combu(nu: u32, ru: u32) -> BigUint {
    if ru > nu {
        BigUint::from(0u32)
    } else {
        (nu - ru + 1..=nu).product::<BigUint>()
            / BigUint::from(ru)
                .checked_factorial()
                .unwrap_or_else(|| panic!("Unable to compute the factorial of {ru}."))
    }
}

/// Calculates $`n!`$ as a floating-point number.
fn factorial_f64(n: u32) -> f64 {
    BigUint::from(n)
        .checked_factorial()
        .unwrap_or_else(|| panic!("Unable to compute the factorial of {n}."))
        .to_f64()
        .expect("Unable to convert a `BigUint` value to `f64`.")
}

/// Calculates the odd double factorial $`(2k-1)!!`$, with $`(-1)!! = 1`$.
fn odd_double_factorial(k: u32) -> BigUint {
    let num = BigUint::from(2 * k)
        .checked_factorial()
        .unwrap_or_else(|| panic!("Unable to compute the factorial of {}.", 2 * k));
    let den = BigUint::from(2u32).pow(k)
        * BigUint::from(k)
            .checked_factorial()
            .unwrap_or_else(|| panic!("Unable to compute the factorial of {k}."));
    num / den
}

/// Obtains the ratio between the normalisation constant of a Cartesian Gaussian
/// $`x^{l_x} y^{l_y} z^{l_z} e^{-\alpha r^2}`$ and that of the axial Cartesian Gaussian
/// $`x^{l} e^{-\alpha r^2}`$ of the same total degree $`l = l_x + l_y + l_z`$:
///
/// ```math
/// r(l_x, l_y, l_z) = \sqrt{\frac{(2l-1)!!}{(2l_x-1)!!(2l_y-1)!!(2l_z-1)!!}}.
/// ```
///
/// This ratio is independent of the Gaussian exponent.
///
/// # Arguments
///
/// * `lcartqns` - A tuple of $`(l_x, l_y, l_z)`$ specifying the exponents of the Cartesian
/// components of the Cartesian Gaussian.
///
/// # Returns
///
/// The normalisation ratio $`r(l_x, l_y, l_z)`$.
pub fn cart_norm_ratio(lcartqns: (u32, u32, u32)) -> f64 {
    let (lx, ly, lz) = lcartqns;
    let num = odd_double_factorial(lx + ly + lz)
        .to_f64()
        .expect("Unable to convert a `BigUint` value to `f64`.");
    let den = (odd_double_factorial(lx) * odd_double_factorial(ly) * odd_double_factorial(lz))
        .to_f64()
        .expect("Unable to convert a `BigUint` value to `f64`.");
    (num / den).sqrt()
}

/// Obtains the real coefficient of a Cartesian monomial in the expansion of a real solid
/// harmonic, following Equations 6.4.47 to 6.4.50 of Helgaker, T., Jørgensen, P. & Olsen, J.
/// *Molecular Electronic-Structure Theory* (Wiley, 2000):
///
/// ```math
/// S_{lm} = N_{lm} \sum_{t=0}^{\lfloor (l-\lvert m \rvert)/2 \rfloor}
///     \sum_{u=0}^{t} \sum_{v=v_m}^{\lfloor \lvert m \rvert/2 - v_m \rfloor + v_m}
///     C^{lm}_{tuv}\, x^{2t+\lvert m \rvert-2(u+v)} y^{2(u+v)} z^{l-2t-\lvert m \rvert},
/// ```
///
/// where
///
/// ```math
/// C^{lm}_{tuv} = (-1)^{t+v-v_m} \left(\frac{1}{4}\right)^t
///     {l \choose t} {l-t \choose \lvert m \rvert+t} {t \choose u} {\lvert m \rvert \choose 2v},
/// \quad
/// N_{lm} = \frac{1}{2^{\lvert m \rvert} l!}
///     \sqrt{\frac{2(l+\lvert m \rvert)!(l-\lvert m \rvert)!}{2^{\delta_{0m}}}},
/// ```
///
/// and $`v_m = 0`$ for $`m \geq 0`$ and $`v_m = 1/2`$ for $`m < 0`$. Positive $`m`$ gives the
/// cosine-type functions and negative $`m`$ the sine-type functions. No Condon--Shortley phase is
/// included.
///
/// All Cartesian monomials are taken to share the normalisation constant of the axial Gaussian
/// $`x^l e^{-\alpha r^2}`$, in which case $`S_{lm}`$ is normalised to unity.
///
/// # Arguments
///
/// * `lpureqns` - A tuple of $`(l, m)`$ specifying the real solid harmonic.
/// * `lcartqns` - A tuple of $`(l_x, l_y, l_z)`$ specifying the Cartesian monomial.
///
/// # Returns
///
/// The coefficient of $`x^{l_x} y^{l_y} z^{l_z}`$ in $`S_{lm}`$. This is zero if the monomial
/// does not appear in the expansion.
///
/// # Panics
///
/// Panics if $`\lvert m \rvert > l`$.
pub fn realc(lpureqns: (u32, i32), lcartqns: (u32, u32, u32)) -> f64 {
    let (l, m) = lpureqns;
    let absm = m.unsigned_abs();
    assert!(absm <= l, "m must be between -l and l (inclusive).");
    let (lx, ly, lz) = lcartqns;
    if lx + ly + lz != l {
        return 0.0;
    }

    // The summation index v runs over half-integers when m < 0, so twice its value is used.
    let two_vm = u32::from(m < 0);
    let norm = {
        let num = 2.0 * factorial_f64(l + absm) * factorial_f64(l - absm);
        let num = if m == 0 { num / 2.0 } else { num };
        num.sqrt() / (f64::from(2u32.pow(absm)) * factorial_f64(l))
    };

    let mut c = 0.0;
    for t in 0..=((l - absm).div_euclid(2)) {
        for u in 0..=t {
            for two_v in (two_vm..=absm).step_by(2) {
                let exponents = (2 * t + absm - 2 * u - two_v, 2 * u + two_v, l - 2 * t - absm);
                if exponents != lcartqns {
                    continue;
                }
                let sign = if (t + (two_v - two_vm).div_euclid(2)) % 2 == 0 {
                    1.0
                } else {
                    -1.0
                };
                let binoms = (combu(l, t) * combu(l - t, absm + t) * combu(t, u) * combu(absm, two_v))
                    .to_f64()
                    .expect("Unable to convert a `BigUint` value to `f64`.");
                c += sign * binoms / f64::from(4u32.pow(t));
            }
        }
    }
    norm * c
}

/// Calculates the overlap between two normalised Cartesian Gaussians of the same total degree
/// sharing the same centre and exponent.
///
/// # Arguments
///
/// * `lcartqns1` - A tuple of $`(l_x, l_y, l_z)`$ for the first Cartesian Gaussian.
/// * `lcartqns2` - A tuple of $`(l_x, l_y, l_z)`$ for the second Cartesian Gaussian.
///
/// # Returns
///
/// The overlap, which is independent of the exponent.
///
/// # Panics
///
/// Panics if the two Gaussians have different total degrees.
pub fn cartov(lcartqns1: (u32, u32, u32), lcartqns2: (u32, u32, u32)) -> f64 {
    let (lx1, ly1, lz1) = lcartqns1;
    let (lx2, ly2, lz2) = lcartqns2;
    assert_eq!(
        lx1 + ly1 + lz1,
        lx2 + ly2 + lz2,
        "Only Cartesian Gaussians of the same order are supported."
    );

    if (lx1 + lx2).rem_euclid(2) != 0
        || (ly1 + ly2).rem_euclid(2) != 0
        || (lz1 + lz2).rem_euclid(2) != 0
    {
        return 0.0;
    }

    let pairs = [(lx1, lx2), (ly1, ly2), (lz1, lz2)];
    let num1: f64 = pairs.iter().map(|&(a, b)| factorial_f64(a + b)).product();
    let den1: f64 = pairs
        .iter()
        .map(|&(a, b)| factorial_f64((a + b).div_euclid(2)))
        .product();
    let num2: f64 = pairs
        .iter()
        .map(|&(a, b)| factorial_f64(a) * factorial_f64(b))
        .product();
    let den2: f64 = pairs
        .iter()
        .map(|&(a, b)| factorial_f64(2 * a) * factorial_f64(2 * b))
        .product();
    (num1 / den1) * (num2 / den2).sqrt()
}

/// Constructs the overlap matrix between the normalised Cartesian Gaussians of a shell.
///
/// # Arguments
///
/// * `cartorder` - The ordering of the Cartesian Gaussians.
///
/// # Returns
///
/// The symmetric overlap matrix, with rows and columns in the order of `cartorder`.
pub fn cart_overlap_mat(cartorder: &CartOrder) -> Array2<f64> {
    let ncart = cartorder.ncomps();
    Array2::from_shape_fn((ncart, ncart), |(i, j)| {
        let lcartqns_i = cartorder
            .get_cart_tuple_with_index(i)
            .expect("Cartesian index out of range.");
        let lcartqns_j = cartorder
            .get_cart_tuple_with_index(j)
            .expect("Cartesian index out of range.");
        cartov(lcartqns_i, lcartqns_j)
    })
}

/// Obtains the matrix $`\mathbf{W}`$ expressing normalised real solid harmonic Gaussians in terms
/// of normalised Cartesian Gaussians of the same rank,
///
/// ```math
/// \tilde{g}(l, m) = \sum_{l_x+l_y+l_z=l} W_{(l_x,l_y,l_z), m}\, g(l_x, l_y, l_z),
/// ```
///
/// where every Cartesian Gaussian $`g`$ is individually normalised.
///
/// # Arguments
///
/// * `l` - The rank of the shell.
/// * `cartorder` - The ordering of the Cartesian Gaussians, which gives the row order.
/// * `pureorder` - The ordering of the real solid harmonic Gaussians, which gives the column
/// order.
///
/// # Returns
///
/// The $`\mathbf{W}`$ matrix with dimensions $`N_{\mathrm{cart}} \times (2l+1)`$.
///
/// # Panics
///
/// Panics if the ranks of `cartorder` and `pureorder` differ from `l`.
pub fn sh_rl2cart_mat(l: u32, cartorder: &CartOrder, pureorder: &PureOrder) -> Array2<f64> {
    assert_eq!(cartorder.lcart, l, "Mismatched Cartesian ranks.");
    assert_eq!(pureorder.lpure, l, "Mismatched pure ranks.");
    let mut wmat = Array2::<f64>::zeros((cartorder.ncomps(), pureorder.ncomps()));
    for (i, &m) in pureorder.iter().enumerate() {
        for (icart, &lcartqns) in cartorder.iter().enumerate() {
            wmat[(icart, i)] = realc((l, m), lcartqns) / cart_norm_ratio(lcartqns);
        }
    }
    wmat
}

/// Obtains the matrix $`\mathbf{X}`$ projecting a combination of normalised Cartesian Gaussians
/// onto the normalised real solid harmonic Gaussians of the same rank.
///
/// With $`\mathbf{W}`$ from [`sh_rl2cart_mat`] and $`\mathbf{S}`$ the overlap matrix of the
/// normalised Cartesian Gaussians,
///
/// ```math
/// \mathbf{X} = \mathbf{W}^{\mathsf{T}} \mathbf{S},
/// ```
///
/// so that $`\mathbf{X}\mathbf{W} = \mathbf{I}`$ and every lower-rank contaminant
/// $`r^{2k} \tilde{g}(l-2k, m)`$ of the Cartesian shell is annihilated.
///
/// # Arguments
///
/// * `l` - The rank of the shell.
/// * `cartorder` - The ordering of the Cartesian Gaussians, which gives the column order.
/// * `pureorder` - The ordering of the real solid harmonic Gaussians, which gives the row order.
///
/// # Returns
///
/// The $`\mathbf{X}`$ matrix with dimensions $`(2l+1) \times N_{\mathrm{cart}}`$.
///
/// # Panics
///
/// Panics if the ranks of `cartorder` and `pureorder` differ from `l`.
pub fn sh_cart2rl_mat(l: u32, cartorder: &CartOrder, pureorder: &PureOrder) -> Array2<f64> {
    let wmat = sh_rl2cart_mat(l, cartorder, pureorder);
    wmat.t().dot(&cart_overlap_mat(cartorder))
}
