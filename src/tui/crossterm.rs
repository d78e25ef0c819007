use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Attribute},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::engine::Direction;
use crate::error::Result;
use crate::tui::colors::colors_from_value;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::layout::{Frame, Span, Style};
use crate::tui::renderer::Renderer;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
    restored: bool,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w, restored: false })
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.w.execute(style::ResetColor)?;
        self.w.execute(cursor::Show)?;
        self.w.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn queue(&mut self, span: &Span) -> Result<()> {
        match span.style {
            Style::Plain => {
                self.w.queue(style::ResetColor)?;
            }
            Style::Title => {
                self.w.queue(style::SetAttribute(Attribute::Reverse))?;
            }
            Style::Card(card) | Style::NewCard(card) => {
                let (background, foreground) = colors_from_value(card);
                self.w.queue(style::SetBackgroundColor(background.into()))?;
                self.w.queue(style::SetForegroundColor(foreground.into()))?;
                if card > 0 {
                    self.w.queue(style::SetAttribute(Attribute::Bold))?;
                }
                if matches!(span.style, Style::NewCard(_)) {
                    self.w.queue(style::SetAttribute(Attribute::Underlined))?;
                }
            }
        };
        self.w.queue(style::Print(&span.text))?;
        self.w.queue(style::SetAttribute(Attribute::Reset))?;
        self.w.queue(style::ResetColor)?;
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        let (width, height) = self.size_hint()?;
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        if frame.width() > width as usize || frame.height() > height as usize {
            self.w.queue(terminal::Clear(terminal::ClearType::All))?;
            self.w.queue(cursor::MoveTo(0, 0))?;
            self.w.queue(style::Print(format!(
                "terminal too small, need {0} x {1}",
                frame.width(),
                frame.height()
            )))?;
        } else {
            for (y, line) in frame.lines.iter().enumerate() {
                self.w.queue(cursor::MoveTo(0, y as u16))?;
                self.w
                    .queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
                for span in line {
                    self.queue(span)?;
                }
            }
            self.w.queue(cursor::MoveTo(0, frame.height() as u16))?;
            self.w
                .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn recover(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to recover terminal: {e}");
        }
    }
}

#[derive(Default)]
pub(crate) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event the game cares about.
    fn next_event(&self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(ui) => return Ok(Event::UserInput(ui)),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    match (ke.code, ke.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(UserInput::Quit),
        (KeyCode::Left | KeyCode::Char('h'), _) => Some(UserInput::Direction(Direction::Left)),
        (KeyCode::Right | KeyCode::Char('l'), _) => Some(UserInput::Direction(Direction::Right)),
        (KeyCode::Up | KeyCode::Char('k'), _) => Some(UserInput::Direction(Direction::Up)),
        (KeyCode::Down | KeyCode::Char('j'), _) => Some(UserInput::Direction(Direction::Down)),
        (KeyCode::Char('r'), _) => Some(UserInput::Restart),
        (KeyCode::Char('+') | KeyCode::Char('='), _) => Some(UserInput::Grow),
        (KeyCode::Char('-'), _) => Some(UserInput::Shrink),
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(UserInput::Quit),
        _ => None,
    }
}
