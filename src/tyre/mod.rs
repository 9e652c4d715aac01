//! Concurrency building blocks used by the registry.

pub mod num;
