//! Atomic-orbital basis shells.

pub mod ao;
