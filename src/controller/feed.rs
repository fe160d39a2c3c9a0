//! Feed loading, scrolling, and visibility reporting

use crate::model::{FeedEntry, ItemPlayback, feed_fixture_path, load_feed};

use super::AppController;

/// Rows moved per scroll key press, as a divisor of the viewport height.
/// Free scrolling (rather than page jumps) is what produces the partial
/// visibility states the coordinator has to tolerate.
const SCROLL_STEP_DIVISOR: i32 = 4;

impl AppController {
    /// Load the bundled feed fixture. A malformed or missing fixture
    /// surfaces as an error overlay over an empty feed, never a crash.
    pub async fn load_feed(&self) {
        let path = feed_fixture_path();
        tracing::debug!(path = %path.display(), "loading feed fixture");

        let model = self.model.lock().await;
        match load_feed(&path) {
            Ok(entries) => {
                tracing::info!(count = entries.len(), "feed loaded");
                model.set_feed_entries(entries).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load feed");
                model.set_feed_entries(Vec::new()).await;
                model.set_error(format!("Could not load feed: {e:#}")).await;
            }
        }
    }

    pub async fn scroll_feed(&self, direction: i32) {
        let model = self.model.lock().await;
        let viewport = model.get_feed_state().await.viewport_height;
        let step = (i32::from(viewport) / SCROLL_STEP_DIVISOR).max(1);
        model.feed_scroll_by(direction * step).await;
        drop(model);
        self.sync_feed_visibility().await;
    }

    pub async fn page_feed(&self, direction: i32) {
        let model = self.model.lock().await;
        model.feed_page(direction).await;
        drop(model);
        self.sync_feed_visibility().await;
    }

    /// Record the feed viewport height for this layout pass.
    pub async fn update_feed_viewport(&self, height: u16) {
        let model = self.model.lock().await;
        model.set_feed_viewport_height(height).await;
    }

    /// The visibility reporter: recompute which item frames are fully
    /// contained in the viewport and hand the set to the coordinator.
    /// Called on every layout pass; unchanged sets diff to nothing.
    pub async fn sync_feed_visibility(&self) {
        let feed = {
            let model = self.model.lock().await;
            model.get_feed_state().await
        };
        if feed.viewport_height == 0 {
            return;
        }
        let visible = feed.fully_visible_set();

        let mut coordinator = self.coordinator.lock().await;
        coordinator.handle_visibility_change(visible, &feed.entries);
    }

    /// Tap-to-pause on the item under the viewport center.
    pub async fn toggle_current_item(&self) {
        let entry = {
            let model = self.model.lock().await;
            model.feed_current_entry().await
        };
        if let Some(entry) = entry {
            let coordinator = self.coordinator.lock().await;
            coordinator.toggle_playback(&entry.url);
        }
    }

    /// Per-entry playback facts for the next frame.
    pub async fn feed_playback_snapshot(&self, entries: &[FeedEntry]) -> Vec<ItemPlayback> {
        let coordinator = self.coordinator.lock().await;
        coordinator.snapshot(entries)
    }

    /// Title of the entry that is actively playing, for the top bar.
    pub async fn now_playing_title(&self, entries: &[FeedEntry]) -> Option<String> {
        let coordinator = self.coordinator.lock().await;
        let source = coordinator.active_source()?;
        if !coordinator.is_playing(source) {
            return None;
        }
        entries.iter().find(|e| e.url == source).map(|e| e.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use crate::media::SimulatedEngine;
    use crate::model::{AppModel, FeedEntry, FeedPlaybackCoordinator};

    use super::*;

    fn controller() -> AppController {
        let model = Arc::new(Mutex::new(AppModel::new()));
        let coordinator = Arc::new(Mutex::new(FeedPlaybackCoordinator::new(Arc::new(
            SimulatedEngine,
        ))));
        AppController::new(model, coordinator)
    }

    fn entries(sources: &[&str]) -> Vec<FeedEntry> {
        sources
            .iter()
            .map(|url| FeedEntry {
                title: url.to_string(),
                description: String::new(),
                url: url.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn layout_pass_activates_the_fully_visible_item() {
        let controller = controller();
        {
            let model = controller.model.lock().await;
            model.set_feed_viewport_height(40).await;
            model
                .set_feed_entries(entries(&["https://v/a.mp4", "https://v/b.mp4"]))
                .await;
        }

        controller.sync_feed_visibility().await;

        let coordinator = controller.coordinator.lock().await;
        assert_eq!(coordinator.active_source(), Some("https://v/a.mp4"));
        assert!(coordinator.is_playing("https://v/a.mp4"));
    }

    #[tokio::test]
    async fn paging_to_the_next_item_switches_playback() {
        let controller = controller();
        {
            let model = controller.model.lock().await;
            model.set_feed_viewport_height(40).await;
            model
                .set_feed_entries(entries(&["https://v/a.mp4", "https://v/b.mp4"]))
                .await;
        }
        controller.sync_feed_visibility().await;
        controller.page_feed(1).await;

        let coordinator = controller.coordinator.lock().await;
        assert_eq!(coordinator.active_source(), Some("https://v/b.mp4"));
        assert!(!coordinator.is_playing("https://v/a.mp4"));
        assert!(coordinator.is_playing("https://v/b.mp4"));
    }

    #[tokio::test]
    async fn partial_scroll_keeps_the_active_item_playing() {
        let controller = controller();
        {
            let model = controller.model.lock().await;
            model.set_feed_viewport_height(40).await;
            model
                .set_feed_entries(entries(&["https://v/a.mp4", "https://v/b.mp4"]))
                .await;
        }
        controller.sync_feed_visibility().await;
        controller.scroll_feed(1).await; // quarter page: nothing fully visible

        let coordinator = controller.coordinator.lock().await;
        assert_eq!(coordinator.active_source(), Some("https://v/a.mp4"));
        assert!(coordinator.is_playing("https://v/a.mp4"));
    }

    #[tokio::test]
    async fn missing_fixture_surfaces_an_error_and_an_empty_feed() {
        let controller = controller();
        // SAFETY: test-local env mutation; tests touching this var run here only.
        unsafe { std::env::set_var("VIDSTACK_FEED", "/nonexistent/feed.json") };
        controller.load_feed().await;
        unsafe { std::env::remove_var("VIDSTACK_FEED") };

        let model = controller.model.lock().await;
        assert!(model.has_error().await);
        assert!(model.feed_loaded().await);
        assert!(model.get_feed_state().await.entries.is_empty());
    }

    #[tokio::test]
    async fn toggle_pauses_the_item_under_the_cursor() {
        let controller = controller();
        {
            let model = controller.model.lock().await;
            model.set_feed_viewport_height(40).await;
            model.set_feed_entries(entries(&["https://v/a.mp4"])).await;
        }
        controller.sync_feed_visibility().await;
        controller.toggle_current_item().await;

        let coordinator = controller.coordinator.lock().await;
        assert!(!coordinator.is_playing("https://v/a.mp4"));
        // Toggling is local play/pause; the item stays the active source.
        assert_eq!(coordinator.active_source(), Some("https://v/a.mp4"));
    }
}
