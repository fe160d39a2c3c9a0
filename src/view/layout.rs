//! Shell layout rendering (top bar, sidebar)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::model::{Tab, UiState, tab_info};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, now_playing: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // App title + active tab
            Constraint::Length(34), // Now playing / key hints
        ])
        .split(area);

    let info = tab_info(ui_state.active_tab);
    let title = Paragraph::new(format!("VIDSTACK  ▸  {}", info.label))
        .style(Style::default().fg(info.color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(title, chunks[0]);

    let (status, style) = match now_playing {
        Some(title) => (
            format!("▶ {}", title),
            Style::default().fg(Color::Green),
        ),
        None => (
            "H Help · Tab Cycle · Q Quit".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let hints = Paragraph::new(status)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hints, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let items: Vec<ListItem> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let info = tab_info(*tab);
            let is_cursor = i == ui_state.sidebar_selected;
            let is_active = *tab == ui_state.active_tab;

            let style = if is_cursor && ui_state.sidebar_focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(info.color)
                    .add_modifier(Modifier::BOLD)
            } else if is_active {
                Style::default().fg(info.color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(format!("{} {}", info.icon, info.label)).style(style)
        })
        .collect();

    let border_style = if ui_state.sidebar_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let sidebar = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(sidebar, area);
}
