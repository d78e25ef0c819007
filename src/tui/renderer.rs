use crate::error::Result;
use crate::tui::layout::Frame;

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, frame: &Frame) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Put the terminal back in a usable state after an error.
    fn recover(&mut self);
}
