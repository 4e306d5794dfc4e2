//! Terminal presentation: screen layout, theme and widgets.
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod ui;
mod widgets;
