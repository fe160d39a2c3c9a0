//! Shows browser rendering: filter chip rows over a horizontal tile rail

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{ShowTile, ShowsFocus, ShowsState};

use super::ScreenState;

const TILE_WIDTH: u16 = 24;

pub fn render_shows_screen(frame: &mut Frame, area: Rect, state: &ScreenState) {
    let shows = state.shows;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filters
            Constraint::Length(3), // sub-filters
            Constraint::Min(0),    // tile rail
        ])
        .split(area);

    render_filter_row(frame, chunks[0], shows);
    render_sub_filter_row(frame, chunks[1], shows);
    render_tile_rail(frame, chunks[2], shows);
}

fn chip(title: &str, selected: bool, under_cursor: bool) -> Span<'static> {
    let style = if under_cursor {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {title} "), style)
}

fn render_filter_row(frame: &mut Frame, area: Rect, shows: &ShowsState) {
    let focused = shows.focus == ShowsFocus::Filters;
    let spans: Vec<Span> = shows
        .group
        .filters
        .iter()
        .enumerate()
        .flat_map(|(i, filter)| {
            [
                chip(filter.title, filter.is_selected, focused && i == shows.filter_cursor),
                Span::raw(" "),
            ]
        })
        .collect();

    let row = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .border_style(row_border(focused)),
    );
    frame.render_widget(row, area);
}

fn render_sub_filter_row(frame: &mut Frame, area: Rect, shows: &ShowsState) {
    let focused = shows.focus == ShowsFocus::SubFilters;
    let spans: Vec<Span> = match shows.group.selected_filter() {
        Some(filter) => filter
            .sub_filters
            .iter()
            .enumerate()
            .flat_map(|(i, sub)| {
                [
                    chip(sub.title, sub.is_selected, focused && i == shows.sub_cursor),
                    Span::raw(" "),
                ]
            })
            .collect(),
        None => vec![Span::styled("no filter selected", Style::default().fg(Color::DarkGray))],
    };

    let row = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(row_border(focused)),
    );
    frame.render_widget(row, area);
}

fn render_tile_rail(frame: &mut Frame, area: Rect, shows: &ShowsState) {
    let focused = shows.focus == ShowsFocus::Tiles;
    let tiles = shows.visible_tiles();

    let rail = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Shows ({}) ", tiles.len()))
        .border_style(row_border(focused));
    let inner = rail.inner(area);
    frame.render_widget(rail, area);

    // Horizontal rail: the cursor's tile is always kept on screen.
    let per_screen = (inner.width / TILE_WIDTH).max(1) as usize;
    let first = shows.tile_cursor.saturating_sub(per_screen.saturating_sub(1));

    let mut x = inner.x;
    for (i, tile) in tiles.iter().enumerate().skip(first) {
        if x + TILE_WIDTH > inner.x + inner.width {
            break;
        }
        let rect = Rect {
            x,
            y: inner.y,
            width: TILE_WIDTH,
            height: inner.height.min(6),
        };
        render_tile(frame, rect, tile, focused && i == shows.tile_cursor);
        x += TILE_WIDTH;
    }
}

fn render_tile(frame: &mut Frame, area: Rect, tile: &ShowTile, under_cursor: bool) {
    let style = if under_cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let card = Paragraph::new(format!("\n{}", tile.channel))
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", tile.title))
                .title_style(style)
                .border_style(style),
        );
    frame.render_widget(card, area);
}

fn row_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}
