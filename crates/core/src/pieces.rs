//! Pieces module - the six tetrominoes as 4x4 bit matrices
//!
//! Each piece is four 4-bit rows; bit 3 of a row is column 0. The canonical
//! table is immutable: the active piece is a copy taken at spawn, and only
//! that copy is ever rotated.

use crate::types::PieceKind;

/// A 4x4 piece matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    rows: [u8; 4],
}

/// Canonical shapes in spawn cycle order: I, J, L, O, S, Z.
pub static CANONICAL: [Piece; 6] = [
    // I
    Piece::from_rows([0b0000, 0b1111, 0b0000, 0b0000]),
    // J
    Piece::from_rows([0b0000, 0b1110, 0b0010, 0b0000]),
    // L
    Piece::from_rows([0b0000, 0b0010, 0b1110, 0b0000]),
    // O
    Piece::from_rows([0b0000, 0b0110, 0b0110, 0b0000]),
    // S
    Piece::from_rows([0b0000, 0b0110, 0b1100, 0b0000]),
    // Z
    Piece::from_rows([0b0000, 0b1100, 0b0110, 0b0000]),
];

impl Piece {
    pub const fn from_rows(rows: [u8; 4]) -> Self {
        Self {
            rows: [rows[0] & 0xF, rows[1] & 0xF, rows[2] & 0xF, rows[3] & 0xF],
        }
    }

    /// Copy the canonical shape for `kind`.
    pub fn initialise(kind: PieceKind) -> Self {
        CANONICAL[kind.index()]
    }

    pub fn rows(&self) -> [u8; 4] {
        self.rows
    }

    /// Whether the bit at row `i`, column `j` is set.
    #[inline(always)]
    pub fn is_set(&self, i: usize, j: usize) -> bool {
        self.rows[i & 3] & (0b1000 >> (j & 3)) != 0
    }

    /// Rotate 90 degrees counter-clockwise in place.
    pub fn rotate(&mut self) {
        *self = self.rotated();
    }

    /// The counter-clockwise rotation of this piece: row `i`, column `j`
    /// takes the bit from row `j`, column `3 - i`.
    pub fn rotated(&self) -> Self {
        let mut rows = [0u8; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for j in 0..4 {
                if self.is_set(j, 3 - i) {
                    *row |= 0b1000 >> j;
                }
            }
        }
        Self { rows }
    }

    /// Offsets `(j, i)` of every set bit, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..4).flat_map(move |i| {
            (0..4)
                .filter(move |&j| self.is_set(i, j))
                .map(move |j| (j as i8, i as i8))
        })
    }

    pub fn count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }
}
