//! Core type definitions for the application

use std::time::Instant;

use ratatui::style::Color;

/// Top-level app sections reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Shows,
    Home,
    Sports,
    Search,
    Favourites,
    Library,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Shows,
        Tab::Home,
        Tab::Sports,
        Tab::Search,
        Tab::Favourites,
        Tab::Library,
    ];

    pub fn next(self) -> Self {
        match self {
            Tab::Shows => Tab::Home,
            Tab::Home => Tab::Sports,
            Tab::Sports => Tab::Search,
            Tab::Search => Tab::Favourites,
            Tab::Favourites => Tab::Library,
            Tab::Library => Tab::Shows,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Shows => Tab::Library,
            Tab::Home => Tab::Shows,
            Tab::Sports => Tab::Home,
            Tab::Search => Tab::Sports,
            Tab::Favourites => Tab::Search,
            Tab::Library => Tab::Favourites,
        }
    }
}

/// Routing data for a tab: label, sidebar glyph, accent color.
/// Plain immutable record; behavior stays in the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabInfo {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

/// Pure mapping from tab identity to its routing data.
pub fn tab_info(tab: Tab) -> TabInfo {
    match tab {
        Tab::Shows => TabInfo {
            label: "Shows",
            icon: "📺",
            color: Color::LightRed,
        },
        Tab::Home => TabInfo {
            label: "Home",
            icon: "🏠",
            color: Color::Yellow,
        },
        Tab::Sports => TabInfo {
            label: "Sports",
            icon: "🏉",
            color: Color::Yellow,
        },
        Tab::Search => TabInfo {
            label: "Search",
            icon: "🔍",
            color: Color::Green,
        },
        Tab::Favourites => TabInfo {
            label: "Favourites",
            icon: "⭐",
            color: Color::Magenta,
        },
        Tab::Library => TabInfo {
            label: "Library",
            icon: "🗂",
            color: Color::Blue,
        },
    }
}

/// UI state for the application shell
#[derive(Clone)]
pub struct UiState {
    pub active_tab: Tab,
    /// Whether keyboard focus sits in the sidebar (remote-style navigation)
    /// or in the active screen's content.
    pub sidebar_focused: bool,
    pub sidebar_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            sidebar_focused: false,
            sidebar_selected: 1, // Home
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
