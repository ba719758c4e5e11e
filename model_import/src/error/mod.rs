//! Error types produced by the populator.

mod constructors;
mod types;

pub use types::ImportError;

#[cfg(test)]
mod tests;
