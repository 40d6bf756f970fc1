//! Side tables shared between optimizer passes.

/// Data passes share with each other without touching gate records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    /// Depth annotation for each gate, indexed by position in the current
    /// sequence. Cleared whenever a transformation pass rewrites the sequence.
    pub depths: Option<Vec<usize>>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotated depth of the gate at `position`, if an annotation exists.
    pub fn depth_of(&self, position: usize) -> Option<usize> {
        self.depths.as_ref()?.get(position).copied()
    }

    /// Largest annotated depth, if an annotation exists.
    pub fn annotated_depth(&self) -> Option<usize> {
        self.depths
            .as_ref()
            .map(|d| d.iter().copied().max().unwrap_or(0))
    }

    /// Drop annotations keyed by gate position.
    pub fn invalidate_positions(&mut self) {
        self.depths = None;
    }
}
