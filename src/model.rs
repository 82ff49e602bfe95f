//! Solver output contract (spec §6, §9): a real sum type, never a
//! string + nullable list.

use crate::state::SatState;
use crate::types::{Assignment, Literal, Var};

#[derive(Debug, Clone)]
pub enum SolveStatus {
    Sat(Model),
    Unsat,
}

impl SolveStatus {
    pub fn is_sat(&self) -> bool {
        matches!(self, SolveStatus::Sat(_))
    }
}

/// A satisfying assignment: the positive literals of every variable set
/// true (per spec §6, omitted entries are false).
#[derive(Debug, Clone)]
pub struct Model {
    true_vars: Vec<Var>,
}

impl Model {
    pub(crate) fn from_state(state: &SatState) -> Self {
        let true_vars = (1..=state.num_vars())
            .filter(|&v| state.value(v) == Assignment::True)
            .collect();
        Model { true_vars }
    }

    pub fn true_literals(&self) -> Vec<Literal> {
        self.true_vars.iter().map(|&v| v as Literal).collect()
    }

    pub fn is_true(&self, var: Var) -> bool {
        self.true_vars.binary_search(&var).is_ok()
    }
}
