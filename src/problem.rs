//! The seam towards a nonlinear least-squares optimizer.

use std::collections::HashSet;

/// Handle to a block of optimizable scalars in a
/// [`DataHolder`](crate::DataHolder).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterBlock {
    /// Index of the block in its store.
    pub index: usize,
    /// Number of scalars in the block.
    pub size: usize,
}

/// Receives the parameter blocks an optimization problem should treat as
/// free variables.
pub trait Problem {
    /// Registers `block`. Returns `false` if it was already known, in
    /// which case the call must have no effect.
    fn add_parameter_block(&mut self, block: ParameterBlock) -> bool;
}

/// A [`Problem`] that records each distinct block once, in the order
/// it was first registered.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    blocks: Vec<ParameterBlock>,
    known: HashSet<ParameterBlock>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[ParameterBlock] {
        &self.blocks
    }

    pub fn contains(&self, block: &ParameterBlock) -> bool {
        self.known.contains(block)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of free scalars.
    pub fn num_parameters(&self) -> usize {
        self.blocks.iter().map(|b| b.size).sum()
    }
}

impl Problem for BlockRegistry {
    fn add_parameter_block(&mut self, block: ParameterBlock) -> bool {
        if !self.known.insert(block) {
            return false;
        }
        self.blocks.push(block);
        true
    }
}
