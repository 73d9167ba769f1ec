//! Tower layers wrapped around the router.

pub mod compression;
pub mod cors;
pub mod timeout;
