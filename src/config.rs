//! Settings schema and loader.
//!
//! Controls the auto-close and start-timeout policies, the scroll window
//! capacity and the discovery scan; loaded from TOML plus environment.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
