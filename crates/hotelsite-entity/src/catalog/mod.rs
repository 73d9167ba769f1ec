//! Paid extras offered alongside a room: per-unit add-ons and flat-priced
//! packages.

pub mod addon;
pub mod package;

pub use addon::Addon;
pub use package::{Package, PackageType};
