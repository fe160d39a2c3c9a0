//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::feed::{FeedEntry, FeedState};
use super::shows::ShowsState;
use super::types::{Tab, UiState};

const ERROR_AUTO_CLEAR: Duration = Duration::from_secs(5);

/// Main application model containing all shell state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub feed_state: Arc<Mutex<FeedState>>,
    pub shows_state: Arc<Mutex<ShowsState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            feed_state: Arc::new(Mutex::new(FeedState::default())),
            shows_state: Arc::new(Mutex::new(ShowsState::new())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Shell / UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn active_tab(&self) -> Tab {
        self.ui_state.lock().await.active_tab
    }

    pub async fn set_active_tab(&self, tab: Tab) {
        let mut state = self.ui_state.lock().await;
        state.active_tab = tab;
        state.sidebar_selected = Tab::ALL
            .iter()
            .position(|t| *t == tab)
            .unwrap_or(state.sidebar_selected);
    }

    pub async fn cycle_tab_forward(&self) {
        let tab = self.ui_state.lock().await.active_tab.next();
        self.set_active_tab(tab).await;
    }

    pub async fn cycle_tab_backward(&self) {
        let tab = self.ui_state.lock().await.active_tab.prev();
        self.set_active_tab(tab).await;
    }

    pub async fn is_sidebar_focused(&self) -> bool {
        self.ui_state.lock().await.sidebar_focused
    }

    pub async fn set_sidebar_focused(&self, focused: bool) {
        self.ui_state.lock().await.sidebar_focused = focused;
    }

    pub async fn sidebar_move(&self, delta: i32) {
        let mut state = self.ui_state.lock().await;
        let max = Tab::ALL.len() as i32 - 1;
        state.sidebar_selected =
            (state.sidebar_selected as i32 + delta).clamp(0, max) as usize;
    }

    pub async fn sidebar_selected_tab(&self) -> Tab {
        let state = self.ui_state.lock().await;
        Tab::ALL[state.sidebar_selected.min(Tab::ALL.len() - 1)]
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Error overlay
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed() >= ERROR_AUTO_CLEAR {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    // ========================================================================
    // Help popup
    // ========================================================================

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    // ========================================================================
    // Feed state
    // ========================================================================

    pub async fn get_feed_state(&self) -> FeedState {
        self.feed_state.lock().await.clone()
    }

    pub async fn set_feed_entries(&self, entries: Vec<FeedEntry>) {
        let mut state = self.feed_state.lock().await;
        state.entries = entries;
        state.loaded = true;
        state.scroll_offset = 0;
    }

    pub async fn feed_loaded(&self) -> bool {
        self.feed_state.lock().await.loaded
    }

    pub async fn feed_scroll_by(&self, rows: i32) {
        self.feed_state.lock().await.scroll_by(rows);
    }

    pub async fn feed_page(&self, direction: i32) {
        self.feed_state.lock().await.page(direction);
    }

    pub async fn set_feed_viewport_height(&self, height: u16) {
        self.feed_state.lock().await.set_viewport_height(height);
    }

    pub async fn feed_current_entry(&self) -> Option<FeedEntry> {
        let state = self.feed_state.lock().await;
        let index = state.current_index()?;
        state.entries.get(index).cloned()
    }

    // ========================================================================
    // Shows state
    // ========================================================================

    pub async fn get_shows_state(&self) -> ShowsState {
        self.shows_state.lock().await.clone()
    }

    pub async fn shows_move_cursor(&self, delta: i32) {
        self.shows_state.lock().await.move_cursor(delta);
    }

    pub async fn shows_focus_next_row(&self) {
        self.shows_state.lock().await.focus_next_row();
    }

    pub async fn shows_focus_prev_row(&self) {
        self.shows_state.lock().await.focus_prev_row();
    }

    pub async fn shows_select_under_cursor(&self) {
        self.shows_state.lock().await.select_under_cursor();
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
