//! CLI command handling

pub mod route;

pub use route::*;
