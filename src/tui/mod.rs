pub(crate) mod colors;
pub(crate) mod crossterm;
pub(crate) mod events;
pub(crate) mod layout;
pub(crate) mod renderer;
