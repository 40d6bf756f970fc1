//! CLI command implementations.

pub mod bloch;
pub mod common;
pub mod gates;
pub mod optimize;
pub mod run;
pub mod version;
