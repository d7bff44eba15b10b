//! Driving adapters that expose the domain to operators.

pub mod cli;
pub mod render;
