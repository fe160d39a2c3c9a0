//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `layout`: Shell structure (top bar, sidebar)
//! - `feed`: The vertical feed screen
//! - `shows`: The shows browser screen
//! - `overlays`: Modal overlays (error, help)

mod feed;
mod layout;
mod overlays;
mod shows;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{FeedState, ItemPlayback, ShowsState, Tab, UiState, tab_info};

pub const TOP_BAR_HEIGHT: u16 = 3;
pub const SIDEBAR_WIDTH: u16 = 22;

/// Everything a screen renderer may draw from.
pub struct ScreenState<'a> {
    pub ui: &'a UiState,
    pub feed: &'a FeedState,
    pub playback: &'a [ItemPlayback],
    pub shows: &'a ShowsState,
    pub now_playing: Option<&'a str>,
}

pub type ScreenRenderer = fn(&mut Frame, Rect, &ScreenState);

/// Pure mapping from tab identity to the screen that renders it.
pub fn screen_for(tab: Tab) -> ScreenRenderer {
    match tab {
        Tab::Home => feed::render_feed_screen,
        Tab::Shows => shows::render_shows_screen,
        Tab::Sports | Tab::Search | Tab::Favourites | Tab::Library => render_placeholder,
    }
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &ScreenState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOP_BAR_HEIGHT), // App title + active tab
                Constraint::Min(0),                 // Sidebar + screen
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], state.ui, state.now_playing);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH), // Sidebar (tabs)
                Constraint::Min(0),                // Active screen
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], state.ui);

        (screen_for(state.ui.active_tab))(frame, main_chunks[1], state);

        // Error notification overlay (if there's an error)
        if state.ui.error_message.is_some() {
            overlays::render_error_notification(frame, state.ui);
        }

        // Help popup overlay (if open)
        if state.ui.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &ScreenState) {
    let info = tab_info(state.ui.active_tab);
    let body = Paragraph::new(format!("\n{}  {}\n\nNothing here yet.", info.icon, info.label))
        .alignment(Alignment::Center)
        .style(Style::default().fg(info.color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", info.label)),
        );
    frame.render_widget(body, area);
}
