//! Decodes a SAT model back into an `n x n` grid and renders it.
//!
//! Grounded on `original_source/utils/visualize_sudoku.py`'s
//! `visualize_sudoku`: same `var -> (row, col, value)` inverse mapping and
//! the same block-ruled box-drawing layout.

use std::fmt::Write as _;

use crate::model::Model;

/// Inverse of `encoder::var_id`: recovers `(row, col, value)` from a
/// positive literal (1-based variable id).
fn decode_var(var: usize, n: usize) -> (usize, usize, usize) {
    let zero_based = var - 1;
    let row = zero_based / (n * n);
    let col = (zero_based % (n * n)) / n;
    let value = (zero_based % n) + 1;
    (row, col, value)
}

/// Builds an `n x n` grid of solved values (`0` for any cell the model
/// leaves unassigned, which should not happen for a fully-encoded puzzle).
pub fn decode_grid(model: &Model, n: usize) -> Vec<Vec<usize>> {
    let mut grid = vec![vec![0usize; n]; n];
    for lit in model.true_literals() {
        if lit <= 0 {
            continue;
        }
        let (row, col, value) = decode_var(lit as usize, n);
        if row < n && col < n {
            grid[row][col] = value;
        }
    }
    grid
}

/// Renders a decoded grid with block separators, mirroring the reference
/// visualizer's box-drawing layout.
pub fn render_grid(grid: &[Vec<usize>]) -> String {
    let n = grid.len();
    let block = (n as f64).sqrt().round() as usize;
    let block = if block * block == n { block } else { 1 };
    let cell_width = n.to_string().len();

    let mut sep_line = String::new();
    for j in 0..n {
        if j % block == 0 {
            sep_line.push('+');
        }
        for _ in 0..cell_width {
            sep_line.push('-');
        }
        sep_line.push('-');
    }
    sep_line.push('+');

    let fmt_cell = |value: usize| -> String {
        if value == 0 {
            ".".repeat(cell_width)
        } else {
            format!("{value:>cell_width$}")
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{sep_line}");
    for (i, row) in grid.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if j % block == 0 {
                out.push('|');
            }
            out.push_str(&fmt_cell(value));
            out.push(' ');
        }
        out.push('|');
        out.push('\n');
        if (i + 1) % block == 0 {
            let _ = writeln!(out, "{sep_line}");
        }
    }
    out
}

/// Prints a decoded grid to stdout.
pub fn print_grid(grid: &[Vec<usize>]) {
    print!("{}", render_grid(grid));
}
