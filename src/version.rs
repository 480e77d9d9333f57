//! Version reported by `golden-harness --version`.

/// Crate version from `Cargo.toml`.
pub const HARNESS_VERSION: &str = env!("CARGO_PKG_VERSION");
