//! Session configuration and the representation policy.

use std::fmt;
use std::str::FromStr;

use qsim_compile::Rule;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::mps::DEFAULT_MAX_BOND_DIM;
use crate::sparse::{SPARSE_QUBIT_THRESHOLD, SPARSITY_THRESHOLD};

/// How gates are turned into state updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Full dense 2ⁿ×2ⁿ operator per gate.
    Dense,
    /// Compressed-row operator per gate.
    Sparse,
    /// Index contraction on a rank-n state tensor.
    TensorNetwork,
}

impl Representation {
    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Representation::Dense => "dense",
            Representation::Sparse => "sparse",
            Representation::TensorNetwork => "tensor_network",
        }
    }

    /// Whether this policy builds full-register operators, and so is
    /// limited to adjacent one- and two-qubit gates.
    pub fn expands_operators(self) -> bool {
        !matches!(self, Representation::TensorNetwork)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Representation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(Representation::Dense),
            "sparse" => Ok(Representation::Sparse),
            "tensor" | "tensor_network" | "tensor-network" => Ok(Representation::TensorNetwork),
            other => Err(SimError::InvalidConfig(format!(
                "unknown representation '{other}' (expected dense, sparse or tensor)"
            ))),
        }
    }
}

/// Options for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Fixed representation, or `None` to choose from the register size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representation: Option<Representation>,
    /// Caller's estimate of the fraction of zero entries in its gates.
    /// Above 0.7 the automatic choice is sparse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_sparsity: Option<f64>,
    /// Seed for the measurement sampler; entropy when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Bond ceiling for MPS construction.
    pub max_bond_dim: usize,
    /// Build an MPS of the final state on tensor-network runs.
    pub use_mps: bool,
    /// Optimizer rules applied when a run asks for optimization.
    pub optimizer_rules: Vec<Rule>,
    /// Registers larger than this default to the sparse policy.
    pub sparse_qubit_threshold: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            representation: None,
            gate_sparsity: None,
            seed: None,
            max_bond_dim: DEFAULT_MAX_BOND_DIM,
            use_mps: false,
            optimizer_rules: Rule::DEFAULT_PIPELINE.to_vec(),
            sparse_qubit_threshold: SPARSE_QUBIT_THRESHOLD,
        }
    }
}

impl SimulatorConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the representation.
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Declare expected gate sparsity.
    pub fn with_gate_sparsity(mut self, sparsity: f64) -> Self {
        self.gate_sparsity = Some(sparsity);
        self
    }

    /// Seed the sampler.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the MPS bond ceiling.
    pub fn with_max_bond_dim(mut self, max_bond_dim: usize) -> Self {
        self.max_bond_dim = max_bond_dim;
        self
    }

    /// Request MPS construction. Implies the tensor-network policy unless
    /// another one is fixed.
    pub fn with_mps(mut self, use_mps: bool) -> Self {
        self.use_mps = use_mps;
        self
    }

    /// Replace the optimizer rule list.
    pub fn with_optimizer_rules(mut self, rules: impl Into<Vec<Rule>>) -> Self {
        self.optimizer_rules = rules.into();
        self
    }

    /// Change the automatic sparse cut-over.
    pub fn with_sparse_qubit_threshold(mut self, threshold: u32) -> Self {
        self.sparse_qubit_threshold = threshold;
        self
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no session can use.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_bond_dim == 0 {
            return Err(SimError::InvalidConfig(
                "max_bond_dim must be at least 1".into(),
            ));
        }
        if let Some(s) = self.gate_sparsity {
            if !(0.0..=1.0).contains(&s) {
                return Err(SimError::InvalidConfig(format!(
                    "gate_sparsity must lie in [0, 1], got {s}"
                )));
            }
        }
        Ok(())
    }

    /// The policy a session on `num_qubits` qubits will use.
    pub fn resolve_representation(&self, num_qubits: u32) -> Representation {
        if let Some(fixed) = self.representation {
            return fixed;
        }
        if self.use_mps {
            return Representation::TensorNetwork;
        }
        let sparse = num_qubits > self.sparse_qubit_threshold
            || self.gate_sparsity.is_some_and(|s| s > SPARSITY_THRESHOLD);
        if sparse {
            Representation::Sparse
        } else {
            Representation::Dense
        }
    }
}
