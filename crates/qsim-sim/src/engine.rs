//! Simulation sessions.
//!
//! A [`Simulator`] owns one program, one amplitude vector and one seeded
//! sampler. Its representation policy is fixed when the session is built.
//! A run validates the whole (optionally optimized) program against that
//! policy first, then applies gates strictly in order, so a failing program
//! never leaves a half-evolved state behind.

use std::collections::BTreeMap;

use ndarray::Array2;
use num_complex::Complex64;
use qsim_compile::{
    OptimizationReport, PassManager, PropertySet, circuit_depth, gate_counts,
};
use qsim_ir::{Circuit, Instruction, Params, QubitId, StandardGate};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{Representation, SimulatorConfig};
use crate::counts::Counts;
use crate::error::SimResult;
use crate::expand::{Operator, expand_dense, expand_sparse, placement};
use crate::library::gate_matrix;
use crate::measure::{PartialMeasurement, Sampler, expectation_value};
use crate::mps::Mps;
use crate::statevector::{Statevector, check_register};
use crate::tensor::{StateTensor, validate_targets};

/// Program metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitInfo {
    /// Register size.
    pub qubit_count: u32,
    /// Number of gates in the program.
    pub gate_count: usize,
    /// Layered depth of the program.
    pub depth: usize,
    /// Gates per canonical name.
    pub gate_counts_by_type: BTreeMap<String, usize>,
    /// Policy the session runs with.
    pub representation_policy: Representation,
}

/// A simulation session over a fixed-size register.
pub struct Simulator {
    circuit: Circuit,
    config: SimulatorConfig,
    representation: Representation,
    optimizer: PassManager,
    sampler: Sampler,
    state: Statevector,
    mps: Option<Mps>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("circuit", &self.circuit)
            .field("config", &self.config)
            .field("representation", &self.representation)
            .field("sampler", &self.sampler)
            .field("state", &self.state)
            .field("mps", &self.mps)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// A session with the default configuration.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        Self::with_config(num_qubits, SimulatorConfig::default())
    }

    /// A session with an explicit configuration.
    pub fn with_config(num_qubits: u32, config: SimulatorConfig) -> SimResult<Self> {
        Self::from_circuit(Circuit::new(num_qubits), config)
    }

    /// A session preloaded with `circuit`.
    pub fn from_circuit(circuit: Circuit, config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        let num_qubits = circuit.num_qubits();
        check_register(num_qubits as usize)?;

        let representation = config.resolve_representation(num_qubits);
        debug!(
            "Session on {} qubits uses the {} representation",
            num_qubits, representation
        );
        let sampler = match config.seed {
            Some(seed) => Sampler::seeded(seed),
            None => Sampler::new(),
        };

        Ok(Self {
            optimizer: PassManager::from_rules(&config.optimizer_rules),
            state: Statevector::new(num_qubits as usize)?,
            circuit,
            config,
            representation,
            sampler,
            mps: None,
        })
    }

    /// Append a typed gate on `qubits`.
    pub fn append(&mut self, gate: StandardGate, qubits: &[u32]) -> SimResult<&mut Self> {
        self.circuit
            .apply(gate, qubits.iter().copied().map(QubitId))?;
        Ok(self)
    }

    /// Append a gate by name, e.g. `("RY", &[0], {"theta": 0.5})`.
    ///
    /// Unknown names fail here, before anything is recorded.
    pub fn append_named(
        &mut self,
        name: &str,
        qubits: &[u32],
        params: &Params,
    ) -> SimResult<&mut Self> {
        self.circuit.append_named(name, qubits, params)?;
        Ok(self)
    }

    /// Append a prepared instruction.
    pub fn append_instruction(&mut self, instruction: Instruction) -> SimResult<&mut Self> {
        self.circuit.append(instruction)?;
        Ok(self)
    }

    /// Evolve |0...0⟩ through the program and return the final state.
    ///
    /// With `optimize` the configured rule pipeline rewrites a copy of the
    /// program first; the stored program is left as appended.
    #[instrument(skip(self), fields(num_qubits = self.circuit.num_qubits(), representation = %self.representation))]
    pub fn run(&mut self, optimize: bool) -> SimResult<&Statevector> {
        let instructions = self.program(optimize)?;
        let n = self.circuit.num_qubits() as usize;

        let state = execute(n, &instructions, self.representation)?;
        self.mps = if self.config.use_mps && self.representation == Representation::TensorNetwork
        {
            debug!("Gates were contracted on the full tensor; building MPS of the final state");
            Some(Mps::from_state_vector(&state, self.config.max_bond_dim)?)
        } else {
            None
        };
        self.state = state;

        info!(
            "Run completed: {} of {} gates applied",
            instructions.len(),
            self.circuit.num_ops()
        );
        Ok(&self.state)
    }

    fn program(&self, optimize: bool) -> SimResult<Vec<Instruction>> {
        let instructions = self.circuit.instructions().to_vec();
        if !optimize {
            return Ok(instructions);
        }
        let mut properties = PropertySet::new();
        Ok(self.optimizer.run(instructions, &mut properties)?)
    }

    /// Current state (|0...0⟩ before the first run).
    pub fn statevector(&self) -> &Statevector {
        &self.state
    }

    /// |aᵢ|² for every basis index of the current state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Sample the current state `shots` times.
    pub fn measure(&mut self, shots: usize) -> SimResult<Counts> {
        self.sampler.measure_counts(&self.state, shots)
    }

    /// Measure a subset of qubits; the session state collapses accordingly.
    pub fn partial_measure(&mut self, qubits: &[usize]) -> SimResult<PartialMeasurement> {
        let measurement = self.sampler.partial_measure(&self.state, qubits)?;
        self.state = measurement.state.clone();
        self.mps = None;
        Ok(measurement)
    }

    /// ⟨ψ|O|ψ⟩ on the current state.
    pub fn expectation_value(&self, observable: &Array2<Complex64>) -> SimResult<f64> {
        expectation_value(&self.state, observable)
    }

    /// Size, depth and gate statistics of the stored program.
    pub fn circuit_info(&self) -> CircuitInfo {
        let instructions = self.circuit.instructions();
        CircuitInfo {
            qubit_count: self.circuit.num_qubits(),
            gate_count: instructions.len(),
            depth: circuit_depth(instructions),
            gate_counts_by_type: gate_counts(instructions),
            representation_policy: self.representation,
        }
    }

    /// What the configured optimizer would do to the stored program.
    pub fn optimization_report(&self) -> SimResult<OptimizationReport> {
        let optimized = self.program(true)?;
        Ok(OptimizationReport::new(self.circuit.instructions(), &optimized))
    }

    /// MPS of the last tensor-network run, when MPS construction is enabled.
    pub fn mps(&self) -> Option<&Mps> {
        self.mps.as_ref()
    }

    /// Return the state to |0...0⟩, keeping the program.
    pub fn reset(&mut self) {
        self.state.reset();
        self.mps = None;
    }

    /// Drop the program and reset the state.
    pub fn clear(&mut self) {
        self.circuit.clear();
        self.reset();
    }

    /// The stored program.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Active representation policy.
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Session configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Register size.
    pub fn num_qubits(&self) -> u32 {
        self.circuit.num_qubits()
    }
}

/// Check every instruction against `representation` without touching state.
pub fn validate_program(
    num_qubits: usize,
    instructions: &[Instruction],
    representation: Representation,
) -> SimResult<()> {
    for instruction in instructions {
        let targets = instruction.qubit_indices();
        if representation.expands_operators() {
            placement(instruction.name(), &targets, num_qubits)?;
        } else {
            validate_targets(&targets, num_qubits)?;
        }
        instruction.validate(num_qubits as u32)?;
    }
    Ok(())
}

/// Run `instructions` on |0...0⟩ under `representation`.
///
/// The program is validated up front; gates are then applied one at a time
/// in sequence order.
pub fn execute(
    num_qubits: usize,
    instructions: &[Instruction],
    representation: Representation,
) -> SimResult<Statevector> {
    check_register(num_qubits)?;
    validate_program(num_qubits, instructions, representation)?;
    debug!(
        "Executing {} gates on {} qubits ({})",
        instructions.len(),
        num_qubits,
        representation
    );

    match representation {
        Representation::TensorNetwork => {
            let mut tensor = StateTensor::zero_state(num_qubits);
            for instruction in instructions {
                tensor.apply_instruction(instruction)?;
            }
            tensor.to_statevector()
        }
        Representation::Dense | Representation::Sparse => {
            let mut amplitudes = Statevector::new(num_qubits)?.into_amplitudes();
            for instruction in instructions {
                let operator = expand(instruction, num_qubits, representation)?;
                amplitudes = operator.apply(&amplitudes)?;
            }
            Statevector::from_amplitudes(amplitudes)
        }
    }
}

fn expand(
    instruction: &Instruction,
    num_qubits: usize,
    representation: Representation,
) -> SimResult<Operator> {
    let name = instruction.name();
    let matrix = gate_matrix(&instruction.gate);
    let targets = instruction.qubit_indices();
    Ok(match representation {
        Representation::Sparse => {
            Operator::Sparse(expand_sparse(name, &matrix, &targets, num_qubits)?)
        }
        _ => Operator::Dense(expand_dense(name, &matrix, &targets, num_qubits)?),
    })
}
