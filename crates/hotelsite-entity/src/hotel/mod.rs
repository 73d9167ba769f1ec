//! Hotel (tenant) entities.

pub mod model;

pub use model::Hotel;
