//! Message log widget displaying recent notices and playback messages.

use client_frontend_core::message::MessageLog;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListDirection, ListItem},
};

use crate::presentation::theme::RatatuiTheme;

/// Render the message log, newest at the bottom.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    messages: &MessageLog,
    visible: u16,
    theme: &RatatuiTheme,
) {
    let items: Vec<ListItem> = messages
        .recent(visible as usize)
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                format!(" {}", entry.text),
                theme.message(entry.level),
            )))
        })
        .collect();

    let list = List::new(items)
        .direction(ListDirection::BottomToTop)
        .block(Block::default().borders(Borders::ALL).title("Messages"));

    frame.render_widget(list, area);
}
