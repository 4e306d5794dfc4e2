//! Board widget: points, stacks, bars, the piece in flight and banners.
//!
//! Cells come from [`BoardRects`], the same rectangles the mouse handler
//! hit-tests against.
use std::time::Instant;

use board_core::animation::BEAR_RISE;
use board_core::{ContainerId, FULL_RATIO, VisualSlot};
use client_frontend_core::view_model::{ActiveFlight, Banner, ViewModel};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::presentation::{
    layout::{BoardRects, all_slots},
    theme::RatatuiTheme,
    ui::ScreenLayout,
};

/// Rows a borne-off piece climbs at the end of its fade.
const BEAR_RISE_ROWS: f64 = 2.0;

pub fn render(
    frame: &mut Frame,
    screen: &ScreenLayout,
    view_model: &ViewModel,
    now: Instant,
    theme: &RatatuiTheme,
) {
    let local = view_model.board.seats().local;
    let mut title = format!("Board - you play {local}");
    if view_model.stale {
        title.push_str(" (syncing)");
    }
    frame.render_widget(
        Block::default().borders(Borders::ALL).title(title),
        screen.board,
    );

    let rects = &screen.board_rects;
    let buf = frame.buffer_mut();
    draw_points(buf, rects, view_model, theme);
    draw_bar(buf, rects, theme);
    for slot in all_slots() {
        draw_stack(buf, rects, view_model, slot, theme);
    }
    if let Some(active) = &view_model.flight {
        draw_flight(buf, rects, view_model, active, now, theme);
    }

    let banner = view_model
        .result_banner
        .as_ref()
        .or(view_model.notice.as_ref());
    if let Some(banner) = banner {
        draw_banner(frame, rects.inner, banner, theme);
    }
}

fn put(buf: &mut Buffer, clip: Rect, (x, y): (u16, u16), symbol: char, style: Style) {
    if !clip.contains(Position::new(x, y)) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(symbol).set_style(style);
    }
}

fn draw_points(buf: &mut Buffer, rects: &BoardRects, view_model: &ViewModel, theme: &RatatuiTheme) {
    let layout = view_model.board.layout();
    for slot in all_slots() {
        let Some(ContainerId::Point(point)) = layout.unproject(slot) else {
            continue;
        };
        let (glyph, style) = theme.point(layout.parity(point));
        let rect = rects.slot_rect(slot);
        let x = rect.x + rect.width / 2;
        for y in rect.top()..rect.bottom() {
            put(buf, rects.inner, (x, y), glyph, style);
        }
    }
}

fn draw_bar(buf: &mut Buffer, rects: &BoardRects, theme: &RatatuiTheme) {
    let bar = rects.bar;
    let x = bar.x + bar.width / 2;
    for y in bar.top()..bar.bottom() {
        put(buf, rects.inner, (x, y), '|', theme.bar());
    }
    let label_y = bar.y + bar.height / 2;
    for (offset, symbol) in "BAR".chars().enumerate() {
        let column = (x + offset as u16).saturating_sub(1);
        put(buf, rects.inner, (column, label_y), symbol, theme.bar());
    }
}

fn draw_stack(
    buf: &mut Buffer,
    rects: &BoardRects,
    view_model: &ViewModel,
    slot: VisualSlot,
    theme: &RatatuiTheme,
) {
    let stack = view_model.stack(slot);
    let mut top = None;
    for piece in stack.iter().filter(|piece| !piece.in_flight) {
        let cell = rects.piece_cell(slot, piece.offset_percent, piece.alignment);
        let (glyph, style) = theme.piece(piece.kind);
        put(buf, rects.inner, cell, glyph, style);
        top = Some((cell, style));
    }

    // Overlapping pieces share rows, so the count is written on the top one.
    let resting = stack.iter().filter(|piece| !piece.in_flight).count();
    if let Some(((x, y), style)) = top
        && resting > 1
        && view_model.ratio(slot) < FULL_RATIO
    {
        for (offset, digit) in resting.to_string().chars().enumerate() {
            put(buf, rects.inner, (x + offset as u16, y), digit, style);
        }
    }
}

/// Cell where the flying piece is drawn at `now`.
pub fn flight_cell(
    rects: &BoardRects,
    view_model: &ViewModel,
    active: &ActiveFlight,
    now: Instant,
) -> (u16, u16) {
    let layout = view_model.board.layout();
    let flight = active.flight;
    let frame = active.frame_at(now);

    let source = layout.project(flight.source);
    let origin = view_model
        .stack(source)
        .iter()
        .find(|piece| piece.id == flight.piece)
        .map(|piece| rects.piece_cell(source, piece.offset_percent, piece.alignment))
        .unwrap_or_else(|| rects.piece_cell(source, 0.0, layout.alignment(flight.source)));

    let Some(destination) = flight.destination else {
        let rise = (frame.rise / BEAR_RISE * BEAR_RISE_ROWS).round() as u16;
        return (origin.0, origin.1.saturating_sub(rise));
    };

    let target_slot = layout.project(destination);
    let depth = view_model.stack(target_slot).len() as f64;
    let target = rects.piece_cell(
        target_slot,
        depth * view_model.ratio(target_slot),
        layout.alignment(destination),
    );

    let lerp = |from: u16, to: u16| {
        let value = f64::from(from) + (f64::from(to) - f64::from(from)) * frame.travel;
        value.round().max(0.0) as u16
    };
    (lerp(origin.0, target.0), lerp(origin.1, target.1))
}

fn draw_flight(
    buf: &mut Buffer,
    rects: &BoardRects,
    view_model: &ViewModel,
    active: &ActiveFlight,
    now: Instant,
    theme: &RatatuiTheme,
) {
    let Some(element) = view_model.board.registry().by_id(active.flight.piece) else {
        return;
    };
    let frame = active.frame_at(now);
    let (glyph, style) = theme.flying_piece(element.piece.kind, frame.scale, frame.opacity);
    let cell = flight_cell(rects, view_model, active, now);
    put(buf, rects.inner, cell, glyph, style);
}

fn draw_banner(frame: &mut Frame, inner: Rect, banner: &Banner, theme: &RatatuiTheme) {
    let width = (banner.text.chars().count() as u16 + 4).min(inner.width);
    let height = 3.min(inner.height);
    let area = Rect::new(
        inner.x + (inner.width - width) / 2,
        inner.y + (inner.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(banner.text.as_str())
            .style(theme.tone(banner.tone))
            .centered()
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use board_core::{
        ActionKind, BoardSnapshot, BoardView, DiceJitter, Flight, GameSnapshot, MatchSnapshot,
        Piece, PieceId, PieceType, Point, Rule, Seats,
    };

    fn rects() -> BoardRects {
        BoardRects::compute(Rect::new(1, 1, 61, 20))
    }

    fn model() -> ViewModel {
        let rects = rects();
        let pieces = [Piece::new(1, PieceType::White), Piece::new(2, PieceType::White)];
        let current = MatchSnapshot {
            length: 1,
            current_game: Some(GameSnapshot {
                state: BoardSnapshot::default().with_point(Point::new(0).unwrap(), &pieces),
                has_started: true,
                ..GameSnapshot::default()
            }),
            ..MatchSnapshot::default()
        };
        let seats = Seats::new(PieceType::White);
        let mut board = BoardView::new(seats, rects.geometry());
        board
            .reset(current, Rule::default(), seats, DiceJitter::default())
            .unwrap();
        ViewModel::from_view(board)
    }

    fn flight(destination: Option<u8>) -> ActiveFlight {
        let point = |index| ContainerId::Point(Point::new(index).unwrap());
        ActiveFlight::new(
            Flight {
                index: 0,
                piece: PieceId(2),
                kind: if destination.is_some() {
                    ActionKind::Move
                } else {
                    ActionKind::Bear
                },
                source: point(0),
                destination: destination.map(point),
            },
            Instant::now(),
        )
    }

    #[test]
    fn flight_starts_on_its_piece_and_ends_on_the_target_stack() {
        let rects = rects();
        let model = model();
        let active = flight(Some(3));

        let origin = rects.piece_cell(VisualSlot::Point(0), 100.0, board_core::Alignment::Bottom);
        assert_eq!(flight_cell(&rects, &model, &active, active.started), origin);

        let done = active.started + active.plan.total() + Duration::from_millis(1);
        let target = rects.piece_cell(VisualSlot::Point(3), 0.0, board_core::Alignment::Bottom);
        assert_eq!(flight_cell(&rects, &model, &active, done), target);
    }

    #[test]
    fn borne_off_piece_rises_in_place() {
        let rects = rects();
        let model = model();
        let active = flight(None);

        let start = flight_cell(&rects, &model, &active, active.started);
        let done = active.started + active.plan.total();
        let end = flight_cell(&rects, &model, &active, done);
        assert_eq!(end.0, start.0);
        assert_eq!(end.1, start.1 - BEAR_RISE_ROWS as u16);
    }
}
