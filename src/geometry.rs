//! The fixed combinatorial structure of the 5x5 code matrix torus: the 20
//! lines (columns, rows, and the two diagonal families, each wrapping) and
//! the 8 knight-jump (non-colinear) neighbors of every cell.
//!
//! Every table here is load-bearing for reproducibility: the encoder and
//! decoder must agree bit-for-bit on which cells are colinear, so these
//! tables are pinned exactly to the reference construction rather than
//! derived at runtime.

use crate::{KNIGHT_DEGREE, LINE_LEN, MATRIX_LEN, NUM_LINES};

/// The 20 lines over the 5x5 torus, as cell indices `0..25` (row-major).
/// Columns (0-4), rows (5-9), right diagonals (10-14), left diagonals
/// (15-19).
pub const LINES: [[u8; LINE_LEN]; NUM_LINES] = [
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 6, 12, 18, 24],
    [1, 7, 13, 19, 20],
    [2, 8, 14, 15, 21],
    [3, 9, 10, 16, 22],
    [4, 5, 11, 17, 23],
    [0, 9, 13, 17, 21],
    [1, 5, 14, 18, 22],
    [2, 6, 10, 19, 23],
    [3, 7, 11, 15, 24],
    [4, 8, 12, 16, 20],
];

/// For each of the 25 cells, its 8 knight-jump (non-colinear) neighbors.
pub const KNIGHT: [[u8; KNIGHT_DEGREE]; MATRIX_LEN] = [
    [7, 8, 11, 14, 16, 19, 22, 23],
    [8, 9, 10, 12, 15, 17, 23, 24],
    [5, 9, 11, 13, 16, 18, 20, 24],
    [5, 6, 12, 14, 17, 19, 20, 21],
    [6, 7, 10, 13, 15, 18, 21, 22],
    [2, 3, 12, 13, 16, 19, 21, 24],
    [3, 4, 13, 14, 15, 17, 20, 22],
    [0, 4, 10, 14, 16, 18, 21, 23],
    [0, 1, 10, 11, 17, 19, 22, 24],
    [1, 2, 11, 12, 15, 18, 20, 23],
    [1, 4, 7, 8, 17, 18, 21, 24],
    [0, 2, 8, 9, 18, 19, 20, 22],
    [1, 3, 5, 9, 15, 19, 21, 23],
    [2, 4, 5, 6, 15, 16, 22, 24],
    [0, 3, 6, 7, 16, 17, 20, 23],
    [1, 4, 6, 9, 12, 13, 22, 23],
    [0, 2, 5, 7, 13, 14, 23, 24],
    [1, 3, 6, 8, 10, 14, 20, 24],
    [2, 4, 7, 9, 10, 11, 20, 21],
    [0, 3, 5, 8, 11, 12, 21, 22],
    [2, 3, 6, 9, 11, 14, 17, 18],
    [3, 4, 5, 7, 10, 12, 18, 19],
    [0, 4, 6, 8, 11, 13, 15, 19],
    [0, 1, 7, 9, 12, 14, 15, 16],
    [1, 2, 5, 8, 10, 13, 16, 17],
];

/// Find the position (`0..25`) of character `c` in `matrix`, if present.
pub fn pos_of(matrix: &[u8; MATRIX_LEN], c: u8) -> Option<u8> {
    matrix.iter().position(|&x| x == c).map(|i| i as u8)
}

/// True if character `c` lies somewhere on line `dir`.
pub fn has_direction(matrix: &[u8; MATRIX_LEN], c: u8, dir: usize) -> bool {
    LINES[dir].iter().any(|&p| matrix[p as usize] == c)
}

/// The unique line containing both `a` and `b`, or `None` if they are not
/// colinear.
pub fn get_direction(matrix: &[u8; MATRIX_LEN], a: u8, b: u8) -> Option<usize> {
    LINES.iter().position(|line| {
        let mut found = 0;
        for &p in line {
            let c = matrix[p as usize];
            if c == a || c == b {
                found += 1;
            }
        }
        found == 2
    })
}

/// The column (`0..5`) containing `c`, if present in `matrix`.
pub fn get_column(matrix: &[u8; MATRIX_LEN], c: u8) -> Option<usize> {
    pos_of(matrix, c).map(|p| (p % 5) as usize)
}

/// True iff `a` and `b` share a line, i.e. `b` is not a knight-jump
/// neighbor of `a`. Panics if `a` is not in `matrix` (callers only ever
/// call this with characters already known to be on the matrix).
pub fn colinear(matrix: &[u8; MATRIX_LEN], a: u8, b: u8) -> bool {
    let pa = pos_of(matrix, a).expect("colinear: character not on code matrix") as usize;
    !KNIGHT[pa].iter().any(|&k| matrix[k as usize] == b)
}

/// A short label for direction `dir` (`C1..C5` columns, `R1..R5` rows,
/// `D1..D10` diagonals), matching the reference implementation's
/// `trace_direction`.
pub fn direction_label(dir: usize) -> String {
    if dir < 5 {
        format!("C{}", dir + 1)
    } else if dir < 10 {
        format!("R{}", dir - 4)
    } else {
        format!("D{}", dir - 9)
    }
}
