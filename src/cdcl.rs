//! CDCL: conflict-driven clause learning with First-UIP analysis and
//! non-chronological backjumping. Grounded on
//! `original_source/utils/cdcl.py`'s `CDCL.solve`/`analyze_conflict`.

use crate::heuristic::BranchHeuristic;
use crate::model::{Model, SolveStatus};
use crate::state::SatState;
use crate::types::Literal;

pub struct CdclSolver {
    state: SatState,
    heuristic: Box<dyn BranchHeuristic>,
}

impl CdclSolver {
    pub fn new(
        clauses: Vec<Vec<Literal>>,
        num_vars: usize,
        heuristic: Box<dyn BranchHeuristic>,
    ) -> Self {
        CdclSolver {
            state: SatState::new(clauses, num_vars),
            heuristic,
        }
    }

    pub fn solve(&mut self) -> SolveStatus {
        if self.state.propagate().is_some() {
            return SolveStatus::Unsat;
        }

        loop {
            let Some(lit) = self.heuristic.pick(&self.state) else {
                return SolveStatus::Sat(Model::from_state(&self.state));
            };
            self.state.push_decision_level(lit);

            loop {
                let conflict_ci = match self.state.propagate() {
                    None => break,
                    Some(ci) => ci,
                };

                log::debug!("conflict on clause {conflict_ci} at level {}", self.state.current_level());
                let Some((learned, backjump_level)) = analyze_conflict(&self.state, conflict_ci)
                else {
                    return SolveStatus::Unsat;
                };

                let asserting_lit = learned[0];
                let ci = self.state.add_clause(learned);
                self.state.backjump(backjump_level, ci, asserting_lit);
            }
        }
    }

    /// Clauses learned during `solve` (empty before it runs, or if the
    /// search never hit a conflict).
    pub fn learned_clauses(&self) -> &[Vec<Literal>] {
        self.state.learned_clauses()
    }
}

/// First-UIP conflict analysis. Returns the learned clause (asserting
/// literal at position 0) and the level to backjump to, or `None` if the
/// conflict is at the root level (UNSAT) — the idiomatic stand-in for
/// spec's `(-1, [])` sentinel.
pub fn analyze_conflict(state: &SatState, conflict_ci: usize) -> Option<(Vec<Literal>, usize)> {
    let current_level = state.current_level();
    if current_level == 0 {
        return None;
    }
    let cur = current_level as i32;
    let n = state.num_vars();

    let mut seen = vec![false; n + 1];
    let mut pending = vec![false; n + 1];
    let mut in_flight = 0usize;
    let mut learned: Vec<Literal> = Vec::new();
    let mut backjump_level = 0usize;

    let fold_literal = |lit: Literal,
                            seen: &mut [bool],
                            pending: &mut [bool],
                            in_flight: &mut usize,
                            learned: &mut Vec<Literal>,
                            backjump_level: &mut usize| {
        let var = lit.unsigned_abs() as usize;
        if seen[var] {
            return;
        }
        seen[var] = true;
        let lvl = state.level_of(var);
        if lvl == cur {
            pending[var] = true;
            *in_flight += 1;
        } else {
            learned.push(lit);
            if lvl > 0 {
                *backjump_level = (*backjump_level).max(lvl as usize);
            }
        }
    };

    for &lit in state.clause(conflict_ci) {
        fold_literal(
            lit,
            &mut seen,
            &mut pending,
            &mut in_flight,
            &mut learned,
            &mut backjump_level,
        );
    }

    let trail = state.trail();
    let mut idx = trail.len();
    let mut asserting_lit: Literal = 0;

    loop {
        idx -= 1;
        let lit = trail[idx];
        let var = lit.unsigned_abs() as usize;
        if !pending[var] {
            continue;
        }

        pending[var] = false;
        in_flight -= 1;
        if in_flight == 0 {
            asserting_lit = -lit;
            break;
        }

        let reason_ci = state
            .reason_of(var)
            .expect("non-decision trail entry must have a reason clause");
        for &r_lit in state.clause(reason_ci) {
            if r_lit.unsigned_abs() as usize == var {
                continue;
            }
            fold_literal(
                r_lit,
                &mut seen,
                &mut pending,
                &mut in_flight,
                &mut learned,
                &mut backjump_level,
            );
        }
    }

    let mut clause = Vec::with_capacity(learned.len() + 1);
    clause.push(asserting_lit);
    clause.extend(learned);
    Some((clause, backjump_level))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::heuristic::FirstHeuristic;

    fn solve(clauses: Vec<Vec<Literal>>, num_vars: usize) -> SolveStatus {
        let mut solver = CdclSolver::new(clauses, num_vars, Box::new(FirstHeuristic));
        solver.solve()
    }

    #[test]
    fn unit_clause_is_sat() {
        let status = solve(vec![vec![1]], 1);
        match status {
            SolveStatus::Sat(model) => assert_eq!(model.true_literals(), vec![1]),
            SolveStatus::Unsat => panic!("expected SAT"),
        }
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
    fn four_clause_horn_formula_is_sat_and_satisfies_all_clauses() {
        let clauses = vec![vec![1, 2, 3], vec![-1, 2], vec![-2, 3], vec![-3, 1]];
        let status = solve(clauses.clone(), 3);
        match status {
            SolveStatus::Sat(model) => assert!(all_clauses_satisfied(&clauses, &model)),
            SolveStatus::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsat() {
        // Two pigeons (1, 2), one hole: both can't avoid the hole and both
        // can't share it, forcing a real conflict and First-UIP learning
        // before the search exhausts.
        let clauses = vec![vec![1], vec![2], vec![-1, -2]];
        assert!(!solve(clauses, 2).is_sat());
    }

    pub(crate) fn all_clauses_satisfied(clauses: &[Vec<Literal>], model: &Model) -> bool {
        clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let var = lit.unsigned_abs() as usize;
                model.is_true(var) == (lit > 0)
            })
        })
    }
}
