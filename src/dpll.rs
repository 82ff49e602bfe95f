//! DPLL: chronological backtracking, no learning. Shares `SatState`'s 2WL
//! propagation with CDCL; included for comparison per spec §1.
//! Grounded on `original_source/utils/dpll.py`'s `DPLL.solve`/`backtrack`.

use crate::heuristic::BranchHeuristic;
use crate::model::{Model, SolveStatus};
use crate::state::SatState;
use crate::types::Literal;

/// A DPLL decision: the literal first tried, and whether the opposite
/// polarity has been tried yet. Kept outside `SatState` — per spec's data
/// model, the decision stack is "used only by chronological-DPLL
/// backtrack; unused by CDCL backjump."
struct Decision {
    first_lit: Literal,
    flipped: bool,
}

pub struct DpllSolver {
    state: SatState,
    heuristic: Box<dyn BranchHeuristic>,
    decisions: Vec<Decision>,
}

impl DpllSolver {
    pub fn new(
        clauses: Vec<Vec<Literal>>,
        num_vars: usize,
        heuristic: Box<dyn BranchHeuristic>,
    ) -> Self {
        DpllSolver {
            state: SatState::new(clauses, num_vars),
            heuristic,
            decisions: Vec::new(),
        }
    }

    pub fn solve(mut self) -> SolveStatus {
        if self.state.propagate().is_some() {
            return SolveStatus::Unsat;
        }

        loop {
            let Some(lit) = self.heuristic.pick(&self.state) else {
                return SolveStatus::Sat(Model::from_state(&self.state));
            };

            self.decisions.push(Decision {
                first_lit: lit,
                flipped: false,
            });
            self.state.push_decision_level(lit);

            while self.state.propagate().is_some() {
                if !self.backtrack() {
                    return SolveStatus::Unsat;
                }
            }
        }
    }

    /// Pops decisions until one can be flipped into its untried polarity;
    /// returns false once the decision stack is exhausted (UNSAT).
    fn backtrack(&mut self) -> bool {
        while let Some(mut dec) = self.decisions.pop() {
            let level = self.decisions.len();
            self.state.undo_to_level(level);

            if dec.flipped {
                continue;
            }

            dec.flipped = true;
            let flipped_lit = -dec.first_lit;
            log::debug!("backtrack: flipping decision to {flipped_lit} at level {}", level + 1);
            self.decisions.push(dec);
            self.state.push_decision_level(flipped_lit);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::FirstHeuristic;

    fn solve(clauses: Vec<Vec<Literal>>, num_vars: usize) -> SolveStatus {
        DpllSolver::new(clauses, num_vars, Box::new(FirstHeuristic)).solve()
    }

    #[test]
    fn unit_clause_is_sat() {
        let status = solve(vec![vec![1]], 1);
        assert!(status.is_sat());
    }

    #[test]
    fn conflicting_units_is_unsat() {
        assert!(!solve(vec![vec![1], vec![-1]], 1).is_sat());
    }

    #[test]
    fn four_clause_xor_like_formula_is_unsat() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];
        assert!(!solve(clauses, 2).is_sat());
    }

    #[test]
    fn backtrack_finds_the_satisfying_flip() {
        // Forces the first decision's natural polarity into a conflict,
        // so a real chronological flip is required to reach SAT.
        let clauses = vec![vec![1, 2], vec![-1, 3], vec![-2, 3], vec![-3]];
        let status = solve(clauses.clone(), 3);
        match status {
            SolveStatus::Sat(model) => assert!(crate::cdcl::tests::all_clauses_satisfied(&clauses, &model)),
            SolveStatus::Unsat => panic!("expected SAT"),
        }
    }
}
