//! Puzzle -> CNF encoding for non-consecutive Sudoku.
//!
//! Grounded on `original_source/encoder.py`'s `to_cnf`: same variable
//! mapping, same six clause groups, same exactly-one building block.

use std::fs;
use std::path::Path;

use crate::error::EncodeError;
use crate::types::Literal;

/// An encoded puzzle: its CNF clauses, the number of SAT variables in use,
/// and `n` (needed later to decode a model back into a grid).
pub struct Puzzle {
    pub n: usize,
    pub clauses: Vec<Vec<Literal>>,
    pub num_vars: usize,
}

/// `var(r, c, v) = r*n*n + c*n + v`, `r`/`c` in `0..n`, `v` in `1..=n`.
fn var_id(n: usize, r: usize, c: usize, v: usize) -> Literal {
    (r * n * n + c * n + v) as Literal
}

/// Appends the clauses for "exactly one of `lits` is true": one at-least-one
/// clause, plus a pairwise at-most-one clause per pair.
fn exactly_one(clauses: &mut Vec<Vec<Literal>>, lits: &[Literal]) {
    clauses.push(lits.to_vec());
    for i in 0..lits.len() {
        for j in (i + 1)..lits.len() {
            clauses.push(vec![-lits[i], -lits[j]]);
        }
    }
}

/// Encodes an already-parsed grid (0 = blank cell) into CNF.
pub fn encode_grid(grid: &[Vec<usize>]) -> Result<Puzzle, EncodeError> {
    let n = grid.len();
    if n == 0 {
        return Err(EncodeError::EmptyGrid);
    }
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != n {
            return Err(EncodeError::RaggedRow {
                row,
                len: cells.len(),
                expected: n,
            });
        }
    }

    let b = (n as f64).sqrt().round() as usize;
    if b * b != n {
        return Err(EncodeError::NotPerfectSquare(n));
    }

    for (r, row) in grid.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            if v > n {
                return Err(EncodeError::OutOfRange {
                    value: v,
                    row: r,
                    col: c,
                    max: n,
                });
            }
        }
    }

    let mut clauses: Vec<Vec<Literal>> = Vec::new();

    // (1) Exactly one value per cell.
    for r in 0..n {
        for c in 0..n {
            let lits: Vec<Literal> = (1..=n).map(|v| var_id(n, r, c, v)).collect();
            exactly_one(&mut clauses, &lits);
        }
    }

    // (2) Each value appears exactly once per row.
    for v in 1..=n {
        for r in 0..n {
            let lits: Vec<Literal> = (0..n).map(|c| var_id(n, r, c, v)).collect();
            exactly_one(&mut clauses, &lits);
        }
    }

    // (3) Each value appears exactly once per column.
    for v in 1..=n {
        for c in 0..n {
            let lits: Vec<Literal> = (0..n).map(|r| var_id(n, r, c, v)).collect();
            exactly_one(&mut clauses, &lits);
        }
    }

    // (4) Each value appears exactly once per box.
    for v in 1..=n {
        for br in 0..b {
            for bc in 0..b {
                let mut box_lits = Vec::with_capacity(n);
                for i in 0..b {
                    for j in 0..b {
                        box_lits.push(var_id(n, br * b + i, bc * b + j, v));
                    }
                }
                exactly_one(&mut clauses, &box_lits);
            }
        }
    }

    // (5) Non-consecutive: orthogonal neighbors may not differ by exactly 1.
    for r in 0..n {
        for c in 0..n {
            if c + 1 < n {
                for v in 1..=n {
                    if v >= 2 {
                        clauses.push(vec![-var_id(n, r, c, v), -var_id(n, r, c + 1, v - 1)]);
                    }
                    if v + 1 <= n {
                        clauses.push(vec![-var_id(n, r, c, v), -var_id(n, r, c + 1, v + 1)]);
                    }
                }
            }
            if r + 1 < n {
                for v in 1..=n {
                    if v >= 2 {
                        clauses.push(vec![-var_id(n, r, c, v), -var_id(n, r + 1, c, v - 1)]);
                    }
                    if v + 1 <= n {
                        clauses.push(vec![-var_id(n, r, c, v), -var_id(n, r + 1, c, v + 1)]);
                    }
                }
            }
        }
    }

    // (6) Clues: unit clauses for the given digits.
    for r in 0..n {
        for c in 0..n {
            let v = grid[r][c];
            if v > 0 {
                clauses.push(vec![var_id(n, r, c, v)]);
            }
        }
    }

    let num_vars = n * n * n;
    Ok(Puzzle {
        n,
        clauses,
        num_vars,
    })
}

/// Parses a whitespace-separated grid of non-negative integers (one row per
/// line, `0` for a blank cell) and encodes it.
pub fn encode_str(text: &str) -> Result<Puzzle, EncodeError> {
    let mut grid = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let value: usize = token
                .parse()
                .map_err(|_| EncodeError::InvalidToken(token.to_string()))?;
            row.push(value);
        }
        grid.push(row);
    }
    encode_grid(&grid)
}

pub fn encode_file(path: &Path) -> Result<Puzzle, EncodeError> {
    let text = fs::read_to_string(path).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    encode_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(encode_str(""), Err(EncodeError::EmptyGrid)));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let text = "1 2\n1 2 3\n";
        assert!(matches!(
            encode_str(text),
            Err(EncodeError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn non_square_size_is_an_error() {
        // 2x2 grid: 2 is not a perfect square.
        let text = "0 0\n0 0\n";
        assert!(matches!(
            encode_str(text),
            Err(EncodeError::NotPerfectSquare(2))
        ));
    }

    #[test]
    fn invalid_token_is_an_error() {
        assert!(matches!(
            encode_str("1 x x x\n0 0 0 0\n0 0 0 0\n0 0 0 0\n"),
            Err(EncodeError::InvalidToken(_))
        ));
    }

    #[test]
    fn out_of_range_clue_is_an_error() {
        let text = "5 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n";
        assert!(matches!(
            encode_str(text),
            Err(EncodeError::OutOfRange { value: 5, .. })
        ));
    }

    #[test]
    fn four_by_four_blank_grid_has_expected_shape() {
        let text = "0 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n";
        let puzzle = encode_str(text).expect("valid 4x4 blank grid");
        assert_eq!(puzzle.n, 4);
        assert_eq!(puzzle.num_vars, 64);
        // No clue unit clauses on an all-blank grid.
        assert!(puzzle.clauses.iter().all(|c| c.len() != 1));
    }

    #[test]
    fn clue_cell_becomes_a_unit_clause() {
        let text = "1 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n";
        let puzzle = encode_str(text).expect("valid puzzle");
        let expected = var_id(4, 0, 0, 1);
        assert!(puzzle.clauses.iter().any(|c| c.as_slice() == [expected]));
    }

    #[test]
    fn non_consecutive_clause_forbids_adjacent_off_by_one() {
        let text = "0 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n";
        let puzzle = encode_str(text).expect("valid puzzle");
        let a = var_id(4, 0, 0, 2);
        let b = var_id(4, 0, 1, 1);
        assert!(puzzle
            .clauses
            .iter()
            .any(|c| c.as_slice() == [-a, -b] || c.as_slice() == [-b, -a]));
    }
}
