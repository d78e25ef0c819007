use super::board::Board;
use super::{Card, Direction, Score};

/// Outcome tells the caller whether a shift changed any cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Unchanged,
    Moved,
}

/// Shift is the result of resolving one move.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Shift {
    pub(crate) board: Board,
    pub(crate) score: Score,
    pub(crate) outcome: Outcome,
}

/// Slide a single row to the left and merge equal neighbours.
///
/// Zeros are dropped first, then the remaining cards are paired greedily from the left: a merged
/// card is never merged again in the same pass, so `[2, 2, 2]` becomes `[4, 2]`. A pair of
/// `MAX_CARD`s stays apart since its sum doesn't fit in a `Card`. The returned score is the sum
/// of the merged values and the row is padded back to its original length.
pub(crate) fn merge_row_left(row: &[Card]) -> (Vec<Card>, Score) {
    let mut merged = Vec::with_capacity(row.len());
    let mut score: Score = 0;
    let mut cards = row.iter().copied().filter(|c| *c != 0).peekable();
    while let Some(pivot) = cards.next() {
        match pivot.checked_mul(2) {
            Some(new_value) if cards.peek() == Some(&pivot) => {
                // consume the partner so it can't pair with the card after it
                cards.next();
                score += Score::from(new_value);
                merged.push(new_value);
            }
            _ => merged.push(pivot),
        }
    }
    merged.resize(row.len(), 0);
    (merged, score)
}

impl Board {
    /// shift resolves a move in the given direction.
    ///
    /// Every direction is turned into a leftward merge: the board is reflected or rotated so the
    /// requested edge is on the left, each row goes through `merge_row_left`, and the inverse
    /// transform restores the orientation. `self` is left as it was.
    pub(crate) fn shift(&self, direction: &Direction) -> Shift {
        let normalized = match direction {
            Direction::Left => self.clone(),
            Direction::Right => self.reverse_rows(),
            Direction::Up => self.rotate_counter_clockwise(),
            Direction::Down => self.rotate_clockwise(),
        };

        let mut score: Score = 0;
        let mut outcome = Outcome::Unchanged;
        let slots = normalized
            .rows()
            .iter()
            .map(|row| {
                let (merged, row_score) = merge_row_left(row);
                score += row_score;
                if merged != *row {
                    outcome = Outcome::Moved;
                }
                merged
            })
            .collect();
        let merged = Board::from_slots_unchecked(slots);

        let board = match direction {
            Direction::Left => merged,
            Direction::Right => merged.reverse_rows(),
            Direction::Up => merged.rotate_clockwise(),
            Direction::Down => merged.rotate_counter_clockwise(),
        };

        log::trace!("shift {direction}: score {score}, {outcome:?}");
        Shift {
            board,
            score,
            outcome,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rstest::*;

    use super::*;
    use crate::engine::MAX_CARD;

    fn board<const N: usize>(slots: [[Card; N]; N]) -> Board {
        Board::from_rows(slots.iter().map(|r| r.to_vec()).collect())
            .expect("test boards are square")
    }

    #[rstest]
    #[case::merge_first_pair(&[2, 2, 4, 0], &[4, 4, 0, 0], 4)]
    #[case::merge_middle_pair(&[2, 4, 4, 8], &[2, 8, 8, 0], 8)]
    #[case::triple_merges_once(&[2, 2, 2, 0], &[4, 2, 0, 0], 4)]
    #[case::two_pairs(&[2, 2, 2, 2], &[4, 4, 0, 0], 8)]
    #[case::gaps(&[2, 0, 0, 2], &[4, 0, 0, 0], 4)]
    #[case::slide_only(&[0, 0, 0, 8], &[8, 0, 0, 0], 0)]
    #[case::no_compatible_combinations(&[2, 4, 8, 16], &[2, 4, 8, 16], 0)]
    #[case::empty(&[0, 0, 0, 0], &[0, 0, 0, 0], 0)]
    #[case::already_merged(&[4, 2, 0, 0], &[4, 2, 0, 0], 0)]
    #[case::merged_not_remerged(&[4, 4, 8, 0], &[8, 8, 0, 0], 8)]
    #[case::short_row(&[2, 2], &[4, 0], 4)]
    #[case::long_row(&[0, 2, 2, 4, 4, 0, 8, 8], &[4, 8, 16, 0, 0, 0, 0, 0], 28)]
    #[case::largest_merge(&[MAX_CARD / 2, MAX_CARD / 2, 0], &[MAX_CARD, 0, 0], MAX_CARD as Score)]
    #[case::ceiling_cards_stay_apart(&[0, MAX_CARD, MAX_CARD], &[MAX_CARD, MAX_CARD, 0], 0)]
    #[case::ceiling_then_pair(&[MAX_CARD, MAX_CARD, 2, 2], &[MAX_CARD, MAX_CARD, 4, 0], 4)]
    fn merge_row(#[case] row: &[Card], #[case] expected: &[Card], #[case] score: Score) {
        let (merged, got) = merge_row_left(row);
        assert_eq!(merged, expected);
        assert_eq!(got, score);
    }

    #[test]
    fn shift_left_example() {
        let initial = board([[2, 2, 0, 0], [4, 0, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let shifted = initial.shift(&Direction::Left);
        assert_eq!(
            shifted.board,
            board([[4, 0, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );
        assert_eq!(shifted.score, 12);
        assert_eq!(shifted.outcome, Outcome::Moved);
        assert_eq!(
            initial,
            board([[2, 2, 0, 0], [4, 0, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );
    }

    #[test]
    fn shift_empty() {
        let initial = Board::empty(4);
        for direction in Direction::all() {
            let shifted = initial.shift(&direction);
            assert_eq!(shifted.board, initial, "shifting {:?}", direction);
            assert_eq!(shifted.score, 0, "shifting {:?}", direction);
            assert_eq!(shifted.outcome, Outcome::Unchanged, "shifting {:?}", direction);
        }
    }

    #[rstest]
    #[case::identity_left(Direction::Left,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0]],
    )]
    #[case::identity_right(Direction::Right,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[0, 0, 0, 2], [0, 0, 0, 2], [0, 0, 0, 2], [0, 0, 0, 2]],
    )]
    #[case::identity_up(Direction::Up,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::identity_down(Direction::Down,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 2, 2]],
    )]
    #[case::column_order_up(Direction::Up,
           [[0, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0]],
           [[2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::column_order_down(Direction::Down,
           [[2, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]],
    )]
    #[case::row_order_right(Direction::Right,
           [[2, 0, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 2, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    fn shift(
        #[case] direction: Direction,
        #[case] initial: [[Card; 4]; 4],
        #[case] expected: [[Card; 4]; 4],
    ) {
        let shifted = board(initial).shift(&direction);
        assert_eq!(shifted.board, board(expected), "shifting {:?}", direction);
        assert_eq!(shifted.score, 0, "shifting {:?}", direction);
        assert_eq!(shifted.outcome, Outcome::Moved, "shifting {:?}", direction);
    }

    #[rstest]
    #[case::all2s_left(Direction::Left,
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 8,
    )]
    #[case::all2s_right(Direction::Right,
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 8,
    )]
    #[case::triple_right_merges_far_pair(Direction::Right,
           [[0, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 2, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 4,
    )]
    #[case::triple_up_merges_top_pair(Direction::Up,
           [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]],
           [[4, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 4,
    )]
    #[case::triple_down_merges_bottom_pair(Direction::Down,
           [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]], 4,
    )]
    #[case::columns_up(Direction::Up,
           [[2, 4, 8, 0], [2, 4, 0, 16], [0, 0, 8, 16], [4, 4, 0, 0]],
           [[4, 8, 16, 32], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 60,
    )]
    fn combine(
        #[case] direction: Direction,
        #[case] initial: [[Card; 4]; 4],
        #[case] expected: [[Card; 4]; 4],
        #[case] score: Score,
    ) {
        let shifted = board(initial).shift(&direction);
        assert_eq!(shifted.board, board(expected), "shifting {:?}", direction);
        assert_eq!(shifted.score, score, "shifting {:?}", direction);
    }

    #[rstest]
    #[case::packed_left(Direction::Left, [[2, 4, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])]
    #[case::packed_up(Direction::Up, [[2, 4, 8, 16], [4, 8, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])]
    #[case::dead_board(Direction::Down, [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])]
    fn noop(#[case] direction: Direction, #[case] initial: [[Card; 4]; 4]) {
        let initial = board(initial);
        let shifted = initial.shift(&direction);
        assert_eq!(shifted.board, initial);
        assert_eq!(shifted.score, 0);
        assert_eq!(shifted.outcome, Outcome::Unchanged);
    }

    #[test]
    fn ceiling_cards_never_merge() {
        let initial = board([[MAX_CARD, MAX_CARD], [MAX_CARD, 0]]);
        for direction in Direction::all() {
            let shifted = initial.shift(&direction);
            assert_eq!(shifted.score, 0, "shifting {direction}");
            assert_eq!(shifted.board.tile_sum(), initial.tile_sum());
            assert_eq!(shifted.board.empty_count(), 1, "shifting {direction}");
        }
        assert_eq!(initial.shift(&Direction::Left).outcome, Outcome::Unchanged);
        assert_eq!(initial.shift(&Direction::Right).outcome, Outcome::Moved);
    }

    #[test]
    fn random_boards_keep_invariants() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let size = rng.gen_range(2..=6);
            let slots = (0..size)
                .map(|_| {
                    (0..size)
                        .map(|_| [0, 0, 2, 4, 8, 16][rng.gen_range(0..6)])
                        .collect()
                })
                .collect();
            let initial = Board::from_rows(slots).expect("square");
            for direction in Direction::all() {
                let shifted = initial.shift(&direction);
                let tiles_before = size * size - initial.empty_count();
                let tiles_after = size * size - shifted.board.empty_count();
                let merges = (tiles_before - tiles_after) as Score;

                // sliding and merging never create or destroy value
                assert_eq!(shifted.board.tile_sum(), initial.tile_sum());
                // each merge creates a card worth at least 4
                assert!(shifted.score >= 4 * merges);
                assert_eq!(shifted.score == 0, merges == 0);
                assert_eq!(
                    shifted.outcome == Outcome::Unchanged,
                    shifted.board == initial,
                    "shifting {direction} on\n{initial}"
                );
            }
        }
    }
}
