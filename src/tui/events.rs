use crate::engine::Direction;
use crate::error::Result;

pub(crate) trait EventSource {
    fn next_event(&self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    Direction(Direction),
    Restart,
    Grow,
    Shrink,
    Quit,
}
