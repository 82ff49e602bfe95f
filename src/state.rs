//! Shared SAT state: assignment, trail, watch lists, and 2-watched-literal
//! unit propagation. Used by both the DPLL and CDCL engines.

use std::collections::VecDeque;

use crate::types::{lit_var, Assignment, Literal, Var};

/// Solver state shared between DPLL and CDCL search.
///
/// Clauses are stored as plain `Vec<Literal>` with a mutable order: the
/// two watched literals always live at positions 0 and 1, and propagation
/// swaps literals into those slots rather than tracking separate watch
/// indices (mirrors `original_source/utils/cdcl.py`, where propagation
/// reads and rewrites `clause[0]`/`clause[1]` directly).
pub struct SatState {
    num_vars: usize,
    original_clause_count: usize,
    clauses: Vec<Vec<Literal>>,
    assignment: Vec<Assignment>,
    trail: Vec<Literal>,
    level_start: Vec<usize>,
    watches: Vec<Vec<usize>>,
    prop_index: usize,
    unit_queue: VecDeque<(Literal, usize)>,
    level: Vec<i32>,
    reason: Vec<Option<usize>>,
    phase: Vec<bool>,
    empty_clause_conflict: Option<usize>,
}

impl SatState {
    pub fn new(clauses: Vec<Vec<Literal>>, num_vars: usize) -> Self {
        let mut state = SatState {
            num_vars,
            original_clause_count: clauses.len(),
            clauses,
            assignment: vec![Assignment::Unassigned; num_vars + 1],
            trail: Vec::new(),
            level_start: Vec::new(),
            watches: vec![Vec::new(); 2 * num_vars + 1],
            prop_index: 0,
            unit_queue: VecDeque::new(),
            level: vec![-1; num_vars + 1],
            reason: vec![None; num_vars + 1],
            phase: vec![true; num_vars + 1],
            empty_clause_conflict: None,
        };

        for ci in 0..state.clauses.len() {
            match state.clauses[ci].len() {
                0 => {
                    if state.empty_clause_conflict.is_none() {
                        state.empty_clause_conflict = Some(ci);
                    }
                }
                1 => {
                    state.unit_queue.push_back((state.clauses[ci][0], ci));
                }
                _ => {
                    let l0 = state.clauses[ci][0];
                    let l1 = state.clauses[ci][1];
                    let i0 = Self::watch_index(num_vars, l0);
                    let i1 = Self::watch_index(num_vars, l1);
                    state.watches[i0].push(ci);
                    state.watches[i1].push(ci);
                }
            }
        }

        state
    }

    #[inline]
    fn watch_index(num_vars: usize, lit: Literal) -> usize {
        (lit + num_vars as Literal) as usize
    }

    /// Literal-value lookup as a free associated function over a plain
    /// slice, so it can be called while some other field of `SatState`
    /// is mutably borrowed (the same trick the teacher repo uses with
    /// its `Solver::get_literal_value(assignments, lit)` helper).
    #[inline]
    pub fn lit_value(assignment: &[Assignment], lit: Literal) -> Option<bool> {
        match assignment[lit_var(lit)] {
            Assignment::Unassigned => None,
            Assignment::True => Some(lit > 0),
            Assignment::False => Some(lit < 0),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn value(&self, var: Var) -> Assignment {
        self.assignment[var]
    }

    pub fn lit_value_of(&self, lit: Literal) -> Option<bool> {
        Self::lit_value(&self.assignment, lit)
    }

    pub fn current_level(&self) -> usize {
        self.level_start.len()
    }

    pub fn level_of(&self, var: Var) -> i32 {
        self.level[var]
    }

    pub fn reason_of(&self, var: Var) -> Option<usize> {
        self.reason[var]
    }

    pub fn phase_of(&self, var: Var) -> bool {
        self.phase[var]
    }

    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }

    pub fn clause(&self, ci: usize) -> &[Literal] {
        &self.clauses[ci]
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Clauses learned by CDCL's conflict analysis, in the order they were
    /// added. Empty for a `SatState` that has only ever propagated, or for
    /// DPLL (which never calls `add_clause`).
    pub fn learned_clauses(&self) -> &[Vec<Literal>] {
        &self.clauses[self.original_clause_count..]
    }

    fn assign(&mut self, lit: Literal, level: i32, reason: Option<usize>) {
        let var = lit_var(lit);
        debug_assert!(self.assignment[var].is_unassigned());
        self.assignment[var] = if lit > 0 {
            Assignment::True
        } else {
            Assignment::False
        };
        self.level[var] = level;
        self.reason[var] = reason;
        self.phase[var] = lit > 0;
        self.trail.push(lit);
    }

    fn unassign(&mut self, var: Var) {
        self.assignment[var] = Assignment::Unassigned;
        self.level[var] = -1;
        self.reason[var] = None;
    }

    /// Records a new decision level and assigns `lit` at it with no
    /// reason. Shared by DPLL decisions and CDCL decisions alike.
    pub fn push_decision_level(&mut self, lit: Literal) {
        self.level_start.push(self.trail.len());
        let level = self.level_start.len() as i32;
        log::trace!("decision: {lit} at level {level}");
        self.assign(lit, level, None);
    }

    /// Chronological undo used by DPLL backtracking: unwinds the trail
    /// and decision levels back to `level` (keeping levels `1..=level`).
    pub fn undo_to_level(&mut self, level: usize) {
        if level >= self.level_start.len() {
            return;
        }
        let target = self.level_start[level];
        while self.trail.len() > target {
            let lit = self.trail.pop().unwrap();
            self.unassign(lit_var(lit));
        }
        self.level_start.truncate(level);
        self.prop_index = self.trail.len();
    }

    /// Appends a learned (or otherwise derived) clause, registering 2WL
    /// watchers at positions 0 and 1 when it has at least two literals.
    /// A unit clause needs no watcher: `backjump` asserts it directly and
    /// `propagate` picks it up from the trail.
    pub fn add_clause(&mut self, lits: Vec<Literal>) -> usize {
        let ci = self.clauses.len();
        if lits.len() >= 2 {
            let i0 = Self::watch_index(self.num_vars, lits[0]);
            let i1 = Self::watch_index(self.num_vars, lits[1]);
            self.watches[i0].push(ci);
            self.watches[i1].push(ci);
        }
        self.clauses.push(lits);
        ci
    }

    /// Non-chronological backjump: unwinds to `level`, then asserts
    /// `asserting_lit` at that level with `ci` as its reason.
    pub fn backjump(&mut self, level: usize, ci: usize, asserting_lit: Literal) {
        let target = if level == 0 { 0 } else { self.level_start[level] };
        while self.trail.len() > target {
            let lit = self.trail.pop().unwrap();
            self.unassign(lit_var(lit));
        }
        self.level_start.truncate(level);
        self.prop_index = self.trail.len();
        log::debug!("backjump to level {level}, asserting {asserting_lit} via clause {ci}");
        self.assign(asserting_lit, level as i32, Some(ci));
    }

    /// Drains the unit queue, then performs 2-watched-literal propagation
    /// over the trail. Returns the index of a falsified clause on
    /// conflict, `None` otherwise.
    pub fn propagate(&mut self) -> Option<usize> {
        if let Some(ci) = self.empty_clause_conflict {
            return Some(ci);
        }

        while let Some((lit, ci)) = self.unit_queue.pop_front() {
            match Self::lit_value(&self.assignment, lit) {
                Some(true) => continue,
                Some(false) => return Some(ci),
                None => self.assign(lit, 0, None),
            }
        }

        while self.prop_index < self.trail.len() {
            let lit = self.trail[self.prop_index];
            self.prop_index += 1;
            if let Some(ci) = self.propagate_falsified(-lit) {
                return Some(ci);
            }
        }

        None
    }

    fn propagate_falsified(&mut self, falsified: Literal) -> Option<usize> {
        let widx = Self::watch_index(self.num_vars, falsified);
        let watchers = std::mem::take(&mut self.watches[widx]);
        let mut kept = Vec::with_capacity(watchers.len());
        let mut conflict = None;

        for ci in watchers {
            if conflict.is_some() {
                kept.push(ci);
                continue;
            }

            if self.clauses[ci][0] != falsified {
                self.clauses[ci].swap(0, 1);
            }

            let w2 = self.clauses[ci][1];
            if Self::lit_value(&self.assignment, w2) == Some(true) {
                kept.push(ci);
                continue;
            }

            let mut replacement = None;
            for i in 2..self.clauses[ci].len() {
                let candidate = self.clauses[ci][i];
                if Self::lit_value(&self.assignment, candidate) != Some(false) {
                    replacement = Some(i);
                    break;
                }
            }

            if let Some(i) = replacement {
                self.clauses[ci].swap(0, i);
                let new_watch = self.clauses[ci][0];
                self.watches[Self::watch_index(self.num_vars, new_watch)].push(ci);
                continue;
            }

            match Self::lit_value(&self.assignment, w2) {
                None => {
                    let level = self.current_level() as i32;
                    self.assign(w2, level, Some(ci));
                    kept.push(ci);
                }
                Some(false) => {
                    conflict = Some(ci);
                    kept.push(ci);
                }
                Some(true) => unreachable!("w2 handled as satisfied above"),
            }
        }

        self.watches[widx] = kept;
        conflict
    }
}
