//! # aotrans: shell-by-shell atomic-orbital basis transformations
//!
//! aotrans constructs the block-diagonal matrices that re-express quantities computed in a
//! GAMESS-ordered basis of unit-normalised Cartesian Gaussians in a Psi4-ordered basis of either
//! real solid harmonic (pure) or Cartesian Gaussians, for shells up to $`l = 3`$.
//!
//! Two matrices are produced for every basis:
//! - the *C* matrix, applied to molecular-orbital coefficients as $`\mathbf{U}_C \mathbf{C}`$, and
//! - the *F* matrix, applied to Fock-like operator matrices as
//!   $`\mathbf{U}_F \mathbf{F} \mathbf{U}_F^{\mathsf{T}}`$.
//!
//! They satisfy $`\mathbf{U}_C \mathbf{U}_F^{\mathsf{T}} = \mathbf{1}`$.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. The `aotrans` binary reads a YAML configuration (see
//! [`interfaces::input::Input`]); running it without a configuration writes a template.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod angmom;
pub mod basis;
pub mod drivers;
pub mod interfaces;
pub mod io;
pub mod transform;
