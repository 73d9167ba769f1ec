//! Room entities.

pub mod model;

pub use model::Room;
