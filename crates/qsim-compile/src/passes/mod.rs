//! Built-in optimizer passes.

mod cancel;
mod commute;
mod merge;

#[cfg(test)]
mod tests;

pub use cancel::CancelInverse;
pub use commute::CommuteGates;
pub use merge::MergeRotations;

/// Tolerance below which a merged rotation angle counts as zero.
pub(crate) const EPSILON: f64 = 1e-10;
