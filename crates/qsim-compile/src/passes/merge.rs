//! Rotation merging.

use std::f64::consts::TAU;

use qsim_ir::{Instruction, StandardGate};
use tracing::debug;

use super::EPSILON;
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Fuses runs of same-axis rotations on the same qubit.
///
/// RX(a)·RX(b) = RX(a + b), likewise for RY and RZ. Each run of consecutive
/// rotations sharing axis and target becomes a single rotation whose angle is
/// the sum reduced into `[0, 2π)`; if that is within [`EPSILON`] of zero the
/// run is dropped. A run of length one is normalized the same way.
///
/// The reduction is exact up to a global phase: RX(θ + 2π) = -RX(θ).
pub struct MergeRotations;

impl MergeRotations {
    /// Create a new rotation merging pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MergeRotations {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce an angle into `[0, 2π)`.
pub(crate) fn normalize_angle(theta: f64) -> f64 {
    let reduced = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if reduced >= TAU { 0.0 } else { reduced }
}

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "merge_rotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(
        &self,
        instructions: Vec<Instruction>,
        _properties: &mut PropertySet,
    ) -> CompileResult<Vec<Instruction>> {
        let before = instructions.len();
        let mut optimized = Vec::with_capacity(before);
        let mut iter = instructions.into_iter().peekable();

        while let Some(inst) = iter.next() {
            let Some((axis, theta)) = inst.gate.rotation() else {
                optimized.push(inst);
                continue;
            };

            let mut total = theta;
            while let Some(next) = iter.peek() {
                match next.gate.rotation() {
                    Some((next_axis, next_theta))
                        if next_axis == axis && next.qubits == inst.qubits =>
                    {
                        total += next_theta;
                        iter.next();
                    }
                    _ => break,
                }
            }

            let reduced = normalize_angle(total);
            if reduced.abs() > EPSILON {
                optimized.push(Instruction::new(
                    StandardGate::from_rotation(axis, reduced),
                    inst.qubits,
                ));
            }
        }

        debug!("merge_rotations removed {} gates", before - optimized.len());
        Ok(optimized)
    }
}
