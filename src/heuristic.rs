//! Branching heuristics: pick the next decision literal.
//!
//! Grounded on `original_source/utils/sat.py`'s `FirstPick`/`LastPick`/
//! `RandomPick`/`HeuristicPick`, expressed as a trait object instead of
//! subclassing. Phase saving itself lives on `SatState` (updated by every
//! `assign`, not just decisions), so `FrequencyPhaseHeuristic` only needs
//! to read it.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::SatState;
use crate::types::{Assignment, Literal, Var};

pub trait BranchHeuristic {
    /// Picks the next decision literal, or `None` if every variable is
    /// assigned (the search is complete).
    fn pick(&self, state: &SatState) -> Option<Literal>;
}

fn unassigned_vars(state: &SatState) -> impl Iterator<Item = Var> + '_ {
    (1..=state.num_vars()).filter(|&v| state.value(v) == Assignment::Unassigned)
}

/// Smallest-indexed unassigned variable, positive polarity.
pub struct FirstHeuristic;

impl BranchHeuristic for FirstHeuristic {
    fn pick(&self, state: &SatState) -> Option<Literal> {
        unassigned_vars(state).next().map(|v| v as Literal)
    }
}

/// Largest-indexed unassigned variable, positive polarity.
pub struct LastHeuristic;

impl BranchHeuristic for LastHeuristic {
    fn pick(&self, state: &SatState) -> Option<Literal> {
        (1..=state.num_vars())
            .rev()
            .find(|&v| state.value(v) == Assignment::Unassigned)
            .map(|v| v as Literal)
    }
}

/// Uniform random unassigned variable, positive polarity.
pub struct RandomHeuristic {
    rng: RefCell<StdRng>,
}

impl RandomHeuristic {
    pub fn new(seed: u64) -> Self {
        RandomHeuristic {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl BranchHeuristic for RandomHeuristic {
    fn pick(&self, state: &SatState) -> Option<Literal> {
        let candidates: Vec<Var> = unassigned_vars(state).collect();
        if candidates.is_empty() {
            return None;
        }
        let idx = self.rng.borrow_mut().gen_range(0..candidates.len());
        Some(candidates[idx] as Literal)
    }
}

/// Among unassigned variables, the one with the highest static occurrence
/// count across the *original* clauses; polarity is phase-saved (last
/// polarity the variable was assigned, true initially). Ties break on
/// lowest index.
pub struct FrequencyPhaseHeuristic {
    occurrence: Vec<usize>,
}

impl FrequencyPhaseHeuristic {
    pub fn new(clauses: &[Vec<Literal>], num_vars: usize) -> Self {
        let mut occurrence = vec![0usize; num_vars + 1];
        for clause in clauses {
            for &lit in clause {
                occurrence[lit.unsigned_abs() as usize] += 1;
            }
        }
        FrequencyPhaseHeuristic { occurrence }
    }
}

impl BranchHeuristic for FrequencyPhaseHeuristic {
    fn pick(&self, state: &SatState) -> Option<Literal> {
        let mut best: Option<Var> = None;
        let mut best_score = 0usize;

        for var in unassigned_vars(state) {
            let score = self.occurrence[var];
            if best.is_none() || score > best_score {
                best = Some(var);
                best_score = score;
            }
        }

        best.map(|var| {
            if state.phase_of(var) {
                var as Literal
            } else {
                -(var as Literal)
            }
        })
    }
}
