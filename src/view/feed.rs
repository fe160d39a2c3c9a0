//! Vertical feed screen rendering
//!
//! Each feed item spans one full page of the feed area. Items scrolled
//! partially off-screen are clipped to their visible slice, matching the
//! frames the visibility reporter works from.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{FeedEntry, ItemPlayback};

use super::ScreenState;

pub fn render_feed_screen(frame: &mut Frame, area: Rect, state: &ScreenState) {
    if !state.feed.loaded {
        let loading = Paragraph::new("Loading feed...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Feed "));
        frame.render_widget(loading, area);
        return;
    }
    if state.feed.entries.is_empty() {
        let empty = Paragraph::new("The feed is empty.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Feed "));
        frame.render_widget(empty, area);
        return;
    }

    let area_top = i32::from(area.y);
    let area_bottom = area_top + i32::from(area.height);

    for item_frame in state.feed.frames() {
        let top = area_top + item_frame.top;
        let bottom = top + i32::from(item_frame.height);
        let clipped_top = top.max(area_top);
        let clipped_bottom = bottom.min(area_bottom);
        if clipped_bottom <= clipped_top {
            continue;
        }

        let rect = Rect {
            x: area.x,
            y: clipped_top as u16,
            width: area.width,
            height: (clipped_bottom - clipped_top) as u16,
        };
        let Some(entry) = state.feed.entries.get(item_frame.index) else {
            continue;
        };
        let playback = state
            .playback
            .get(item_frame.index)
            .copied()
            .unwrap_or_default();
        render_feed_item(frame, rect, item_frame.index, entry, playback);
    }
}

fn render_feed_item(
    frame: &mut Frame,
    area: Rect,
    index: usize,
    entry: &FeedEntry,
    playback: ItemPlayback,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", index + 1))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // "video" surface
            Constraint::Length(3), // caption
        ])
        .split(inner);

    let surface = if playback.unavailable {
        Paragraph::new("\n■\n\nVideo unavailable")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
    } else if playback.playing {
        Paragraph::new("") // clean surface while playing, like the original
            .style(Style::default().bg(Color::Black))
    } else {
        Paragraph::new("\n▶\n\npaused · Space to play")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    };
    frame.render_widget(surface, chunks[0]);

    if chunks[1].height > 0 {
        let caption = Paragraph::new(vec![
            Line::styled(
                entry.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                entry.description.clone(),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(caption, chunks[1]);
    }
}
