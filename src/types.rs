//! Core data model shared by the encoder, the solver core, and the CLI.

/// A signed, nonzero literal. Positive `v` denotes variable `v` assigned
/// true; negative `-v` denotes variable `v` assigned false.
pub type Literal = i32;

/// A variable index, always in `[1, num_vars]`.
pub type Var = usize;

/// The assignment state of a single variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Unassigned,
    True,
    False,
}

impl Assignment {
    pub fn is_unassigned(self) -> bool {
        matches!(self, Assignment::Unassigned)
    }
}

#[inline]
pub fn lit_var(lit: Literal) -> Var {
    lit.unsigned_abs() as usize
}
