//! Pass manager and the typed rule pipeline.

use std::fmt;
use std::str::FromStr;

use qsim_ir::Instruction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::passes::{CancelInverse, CommuteGates, MergeRotations};
use crate::property::PropertySet;

/// The optimizer's rewrite rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Drop adjacent identical self-inverse pairs.
    CancelInverse,
    /// Fuse runs of same-axis rotations.
    MergeRotations,
    /// Lower depth annotations of commuting neighbours.
    CommuteGates,
}

impl Rule {
    /// Every rule, in the order they run by default.
    pub const DEFAULT_PIPELINE: [Rule; 3] =
        [Rule::CancelInverse, Rule::MergeRotations, Rule::CommuteGates];

    /// The rule's snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Rule::CancelInverse => "cancel_inverse",
            Rule::MergeRotations => "merge_rotations",
            Rule::CommuteGates => "commute_gates",
        }
    }

    fn into_pass(self) -> Box<dyn Pass> {
        match self {
            Rule::CancelInverse => Box::new(CancelInverse::new()),
            Rule::MergeRotations => Box::new(MergeRotations::new()),
            Rule::CommuteGates => Box::new(CommuteGates::new()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::DEFAULT_PIPELINE
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| CompileError::UnknownRule(s.to_string()))
    }
}

/// Manages and executes a sequence of optimizer passes.
///
/// The manager holds no per-program state and may be shared between callers.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Build a manager running `rules` in exactly the given order.
    pub fn from_rules(rules: &[Rule]) -> Self {
        Self {
            passes: rules.iter().map(|r| r.into_pass()).collect(),
        }
    }

    /// The default three-rule pipeline.
    pub fn default_pipeline() -> Self {
        Self::from_rules(&Rule::DEFAULT_PIPELINE)
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes over `instructions`.
    ///
    /// Position-keyed annotations in `properties` are dropped after every
    /// transformation pass, since positions no longer line up.
    #[instrument(skip(self, instructions, properties))]
    pub fn run(
        &self,
        mut instructions: Vec<Instruction>,
        properties: &mut PropertySet,
    ) -> CompileResult<Vec<Instruction>> {
        info!(
            "Running pass manager with {} passes on {} gates",
            self.passes.len(),
            instructions.len()
        );

        for pass in &self.passes {
            if pass.should_run(&instructions, properties) {
                debug!("Running pass: {}", pass.name());
                instructions = pass.run(instructions, properties)?;
                if pass.kind() == PassKind::Transformation {
                    properties.invalidate_positions();
                }
                debug!("Pass {} completed, ops: {}", pass.name(), instructions.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!("Pass manager completed, ops: {}", instructions.len());
        Ok(instructions)
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

/// Result of running the optimizer over a gate sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    /// The rewritten gate sequence.
    pub instructions: Vec<Instruction>,
    /// Per-gate depth annotation, present when the pipeline ended with
    /// depth analysis.
    pub depths: Option<Vec<usize>>,
}

/// Run `rules` over a copy of `instructions`.
pub fn optimize(instructions: &[Instruction], rules: &[Rule]) -> CompileResult<Optimized> {
    let mut properties = PropertySet::new();
    let instructions = PassManager::from_rules(rules).run(instructions.to_vec(), &mut properties)?;
    Ok(Optimized {
        instructions,
        depths: properties.depths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_round_trip() {
        for rule in Rule::DEFAULT_PIPELINE {
            assert_eq!(rule.name().parse::<Rule>().unwrap(), rule);
        }
        assert!(matches!(
            "fuse_everything".parse::<Rule>(),
            Err(CompileError::UnknownRule(_))
        ));
    }

    #[test]
    fn test_rule_serde_names() {
        let json = serde_json::to_string(&Rule::MergeRotations).unwrap();
        assert_eq!(json, "\"merge_rotations\"");
    }

    #[test]
    fn test_manager_sizes() {
        assert_eq!(PassManager::default().len(), 3);
        assert!(PassManager::new().is_empty());
        assert_eq!(PassManager::from_rules(&[Rule::CommuteGates]).len(), 1);
    }
}
