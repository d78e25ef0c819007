use rand::seq::IteratorRandom;
use rand::Rng;

use super::{Card, Idx, Score, MAX_CARD};
use crate::error::{Error, Result};

const NEW_CARD_CHOICES: [Card; 2] = [2, 4];
const NEW_CARD_SMALL_PROBABILITY: f64 = 0.9;

/// Board is a square grid of cards where 0 marks an empty cell.
///
/// Boards are values: nothing in the engine mutates a board that it was handed, every operation
/// that changes the grid returns a new one.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Board {
    slots: Vec<Vec<Card>>,
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.slots {
            let cells = row
                .iter()
                .map(|c| format!("{c:>5}"))
                .collect::<Vec<_>>()
                .join("");
            writeln!(f, "{cells}")?;
        }
        Ok(())
    }
}

// constructors
impl Board {
    /// Produce a `size` x `size` board with every cell empty.
    ///
    /// Callers must pass a size of at least 2; `Game` rejects smaller sizes before getting here.
    pub(crate) fn empty(size: usize) -> Self {
        debug_assert!(size >= 2, "board size must be at least 2");
        Self {
            slots: vec![vec![0; size]; size],
        }
    }

    /// Build a board from explicit rows. Every cell must be 0 or a power of two between 2 and
    /// `MAX_CARD`.
    pub(crate) fn from_rows(rows: Vec<Vec<Card>>) -> Result<Self> {
        let size = rows.len();
        if size < 2 {
            return Err(Error::BoardTooSmall(size));
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(Error::NotSquare {
                row,
                len: r.len(),
                size,
            });
        }
        for (row, r) in rows.iter().enumerate() {
            if let Some((col, value)) = r.iter().enumerate().find(|(_, c)| !valid_card(**c)) {
                return Err(Error::InvalidCard {
                    row,
                    col,
                    value: *value,
                    max: MAX_CARD,
                });
            }
        }
        Ok(Self { slots: rows })
    }

    pub(super) fn from_slots_unchecked(slots: Vec<Vec<Card>>) -> Self {
        Self { slots }
    }
}

fn valid_card(card: Card) -> bool {
    card == 0 || (card >= 2 && card.is_power_of_two())
}

// queries
impl Board {
    pub(crate) fn size(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn rows(&self) -> &[Vec<Card>] {
        &self.slots
    }

    #[cfg(test)]
    pub(crate) fn get(&self, idx: &Idx) -> Option<Card> {
        self.slots.get(idx.y()).and_then(|row| row.get(idx.x())).copied()
    }

    pub(crate) fn contains(&self, value: Card) -> bool {
        self.slots.iter().flatten().any(|c| *c == value)
    }

    pub(crate) fn max_card(&self) -> Card {
        self.slots.iter().flatten().copied().max().unwrap_or(0)
    }

    pub(crate) fn empty_count(&self) -> usize {
        self.slots.iter().flatten().filter(|c| **c == 0).count()
    }

    /// Sum of every card on the board.
    pub(crate) fn tile_sum(&self) -> Score {
        self.slots.iter().flatten().map(|c| Score::from(*c)).sum()
    }

    fn empty_cells(&self) -> impl Iterator<Item = Idx> + '_ {
        self.slots.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c == 0)
                .map(move |(x, _)| Idx(x, y))
        })
    }

    /// has_moves reports whether any move could still change the board: there is an empty cell
    /// or two neighbouring cells hold the same card.
    ///
    /// Each cell is compared only with its right and lower neighbour, which covers every
    /// adjacent pair exactly once. A pair of `MAX_CARD`s can't merge and doesn't count.
    pub(crate) fn has_moves(&self) -> bool {
        let size = self.size();
        for (y, row) in self.slots.iter().enumerate() {
            for (x, card) in row.iter().enumerate() {
                if *card == 0 {
                    return true;
                }
                if *card == MAX_CARD {
                    continue;
                }
                if x + 1 < size && row[x + 1] == *card {
                    return true;
                }
                if y + 1 < size && self.slots[y + 1][x] == *card {
                    return true;
                }
            }
        }
        false
    }
}

// transformations
impl Board {
    /// Place a new card in a uniformly chosen empty cell: a 2 nine times out of ten, otherwise a
    /// 4. A full board comes back unchanged along with `None`.
    pub(crate) fn with_random_tile<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> (Board, Option<(Idx, Card)>) {
        let idx = match self.empty_cells().choose(rng) {
            Some(idx) => idx,
            None => return (self.clone(), None),
        };
        let value = if rng.gen::<f64>() < NEW_CARD_SMALL_PROBABILITY {
            NEW_CARD_CHOICES[0]
        } else {
            NEW_CARD_CHOICES[1]
        };

        let mut board = self.clone();
        board.slots[idx.y()][idx.x()] = value;
        (board, Some((idx, value)))
    }

    /// Rotate a quarter turn clockwise: the card at (row r, column c) lands on
    /// (row c, column N-1-r). Same as transposing and then reversing every row.
    pub(crate) fn rotate_clockwise(&self) -> Board {
        let size = self.size();
        let mut slots = vec![vec![0; size]; size];
        for (r, row) in self.slots.iter().enumerate() {
            for (c, card) in row.iter().enumerate() {
                slots[c][size - 1 - r] = *card;
            }
        }
        Board { slots }
    }

    /// Rotate a quarter turn counter-clockwise; equal to three clockwise rotations.
    pub(crate) fn rotate_counter_clockwise(&self) -> Board {
        let size = self.size();
        let mut slots = vec![vec![0; size]; size];
        for (r, row) in self.slots.iter().enumerate() {
            for (c, card) in row.iter().enumerate() {
                slots[size - 1 - c][r] = *card;
            }
        }
        Board { slots }
    }

    /// Mirror the board left to right.
    pub(crate) fn reverse_rows(&self) -> Board {
        Board {
            slots: self
                .slots
                .iter()
                .map(|row| row.iter().rev().copied().collect())
                .collect(),
        }
    }
}
