use crate::engine::board::Board;
use crate::engine::game::{Game, Status};
use crate::engine::{Card, Idx};

const MIN_CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 3;
const INDENT: &str = " ";
const HELP: &str = "arrows/hjkl move  r restart  +/- board size  q quit";

/// Style tells the renderer how to color a span.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Style {
    Plain,
    Title,
    Card(Card),
    /// The card spawned by the last move.
    NewCard(Card),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Span {
    pub(crate) text: String,
    pub(crate) style: Style,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Plain,
        }
    }
}

/// Frame is a full screen worth of styled text lines, independent of the terminal backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Frame {
    pub(crate) lines: Vec<Vec<Span>>,
}

impl Frame {
    pub(crate) fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.chars().count()).sum())
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn height(&self) -> usize {
        self.lines.len()
    }

    /// The frame without styling, one terminal line per text line.
    pub(crate) fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, line: Vec<Span>) {
        self.lines.push(line);
    }
}

/// Lay out the header, the board, and the status lines for the current game. The cell at
/// `spawned`, if any, is marked as new.
///
///  slide48   4x4  target 2048
///  score 1024  highest 128
///
///  [board, three lines per row]
///
///  status
///  help
pub(crate) fn frame(game: &Game, spawned: Option<&Idx>) -> Frame {
    let mut f = Frame::default();
    let size = game.size();
    f.push(vec![
        Span::plain(INDENT),
        Span {
            text: " slide48 ".into(),
            style: Style::Title,
        },
        Span::plain(format!("  {size}x{size}  target {}", game.target())),
    ]);
    f.push(vec![Span::plain(format!(
        "{INDENT}score {}  highest {}",
        game.score(),
        game.board().max_card()
    ))]);
    f.push(vec![]);

    board_lines(game.board(), cell_width(game), spawned, &mut f);

    f.push(vec![]);
    f.push(vec![Span::plain(format!("{INDENT}{}", status_line(game)))]);
    f.push(vec![Span::plain(format!("{INDENT}{HELP}"))]);
    f
}

fn cell_width(game: &Game) -> usize {
    let widest = game.board().max_card().max(game.target());
    (widest.to_string().len() + 2).max(MIN_CELL_WIDTH)
}

fn board_lines(board: &Board, width: usize, spawned: Option<&Idx>, f: &mut Frame) {
    for (y, row) in board.rows().iter().enumerate() {
        for line in 0..CELL_HEIGHT {
            let mut spans = Vec::with_capacity(row.len() * 2 + 1);
            spans.push(Span::plain(INDENT));
            for (x, card) in row.iter().enumerate() {
                if x > 0 {
                    spans.push(Span::plain(" "));
                }
                let text = match (line == CELL_HEIGHT / 2, *card) {
                    (true, 0) => format!("{:^width$}", "·"),
                    (true, c) => format!("{c:^width$}"),
                    (false, _) => " ".repeat(width),
                };
                let style = match spawned {
                    Some(idx) if *idx == Idx(x, y) => Style::NewCard(*card),
                    _ => Style::Card(*card),
                };
                spans.push(Span { text, style });
            }
            f.push(spans);
        }
    }
}

fn status_line(game: &Game) -> String {
    match game.status() {
        Status::Over => format!(
            "no moves left! final score {}, press r to play again",
            game.score()
        ),
        Status::Won => format!(
            "you reached {}! keep going or press r to start over",
            game.target()
        ),
        Status::Playing => String::new(),
    }
}
