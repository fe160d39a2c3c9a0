//! Feed entries, fixture loading, and feed viewport geometry

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const FEED_FIXTURE_PATH: &str = "assets/feed.json";
const FEED_PATH_ENV: &str = "VIDSTACK_FEED";

/// One entry of the vertical feed, as bundled in the JSON fixture.
/// Immutable once loaded; identified by its position in the feed and,
/// secondarily, by its `url` (the pooling key for playback).
#[derive(Clone, Debug, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Path of the feed fixture, overridable via `VIDSTACK_FEED`.
pub fn feed_fixture_path() -> PathBuf {
    std::env::var_os(FEED_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FEED_FIXTURE_PATH))
}

pub fn load_feed(path: &Path) -> Result<Vec<FeedEntry>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading feed fixture {}", path.display()))?;
    let entries: Vec<FeedEntry> = serde_json::from_str(&data)
        .with_context(|| format!("parsing feed fixture {}", path.display()))?;
    Ok(entries)
}

/// On-screen frame of one feed item, in viewport coordinates.
/// `top` can be negative when the item is partially scrolled off the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemFrame {
    pub index: usize,
    pub top: i32,
    pub height: u16,
}

impl ItemFrame {
    /// Fully visible: the frame sits entirely within the viewport's
    /// vertical extent.
    pub fn is_fully_visible(&self, viewport_height: u16) -> bool {
        self.top >= 0 && self.top + i32::from(self.height) <= i32::from(viewport_height)
    }

    pub fn intersects_viewport(&self, viewport_height: u16) -> bool {
        self.top < i32::from(viewport_height) && self.top + i32::from(self.height) > 0
    }
}

/// Scroll state for the vertical feed. Each item spans exactly one
/// viewport page, matching the paging layout of the original feed.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub entries: Vec<FeedEntry>,
    pub loaded: bool,
    /// Rows scrolled past the top of the first item.
    pub scroll_offset: i32,
    pub viewport_height: u16,
}

impl FeedState {
    pub fn item_height(&self) -> u16 {
        self.viewport_height.max(1)
    }

    fn max_scroll(&self) -> i32 {
        let pages = self.entries.len().saturating_sub(1) as i32;
        pages * i32::from(self.item_height())
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        if height == self.viewport_height {
            return;
        }
        // Keep the same page in view across resizes.
        let page = self.current_index().unwrap_or(0) as i32;
        self.viewport_height = height;
        self.scroll_offset = (page * i32::from(self.item_height())).clamp(0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, rows: i32) {
        self.scroll_offset = (self.scroll_offset + rows).clamp(0, self.max_scroll());
    }

    /// Snap to the next (+1) or previous (-1) full page.
    pub fn page(&mut self, direction: i32) {
        let height = i32::from(self.item_height());
        let current = self.scroll_offset as f32 / height as f32;
        let target = if direction > 0 {
            current.floor() as i32 + 1
        } else {
            current.ceil() as i32 - 1
        };
        self.scroll_offset = (target * height).clamp(0, self.max_scroll());
    }

    /// Index of the item under the viewport center, if any.
    pub fn current_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let height = i32::from(self.item_height());
        let center = self.scroll_offset + i32::from(self.viewport_height) / 2;
        let index = (center / height).clamp(0, self.entries.len() as i32 - 1);
        Some(index as usize)
    }

    /// Frames of every item currently intersecting the viewport, the way
    /// the original layout pass reported rendered frames upward.
    pub fn frames(&self) -> Vec<ItemFrame> {
        let height = self.item_height();
        self.entries
            .iter()
            .enumerate()
            .map(|(index, _)| ItemFrame {
                index,
                top: index as i32 * i32::from(height) - self.scroll_offset,
                height,
            })
            .filter(|frame| frame.intersects_viewport(self.viewport_height))
            .collect()
    }

    /// Indices whose frames are entirely contained in the viewport.
    pub fn fully_visible_set(&self) -> BTreeSet<usize> {
        self.frames()
            .iter()
            .filter(|frame| frame.is_fully_visible(self.viewport_height))
            .map(|frame| frame.index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> FeedEntry {
        FeedEntry {
            title: "t".to_string(),
            description: "d".to_string(),
            url: url.to_string(),
        }
    }

    fn feed(n: usize, viewport: u16) -> FeedState {
        FeedState {
            entries: (0..n).map(|i| entry(&format!("https://v/{i}.mp4"))).collect(),
            loaded: true,
            scroll_offset: 0,
            viewport_height: viewport,
        }
    }

    #[test]
    fn aligned_page_is_the_only_fully_visible_item() {
        let mut state = feed(3, 40);
        assert_eq!(state.fully_visible_set(), BTreeSet::from([0]));

        state.scroll_offset = 40;
        assert_eq!(state.fully_visible_set(), BTreeSet::from([1]));
    }

    #[test]
    fn partial_scroll_has_no_fully_visible_item() {
        let mut state = feed(3, 40);
        state.scroll_by(10);
        assert!(state.fully_visible_set().is_empty());
        // Both straddling items still intersect the viewport.
        let indices: Vec<usize> = state.frames().iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn scrolling_clamps_to_feed_bounds() {
        let mut state = feed(3, 40);
        state.scroll_by(-100);
        assert_eq!(state.scroll_offset, 0);
        state.scroll_by(10_000);
        assert_eq!(state.scroll_offset, 80);
    }

    #[test]
    fn paging_snaps_to_item_boundaries() {
        let mut state = feed(3, 40);
        state.scroll_by(10);
        state.page(1);
        assert_eq!(state.scroll_offset, 40);
        state.page(1);
        assert_eq!(state.scroll_offset, 80);
        state.scroll_by(-10);
        state.page(-1);
        assert_eq!(state.scroll_offset, 40);
    }

    #[test]
    fn current_index_follows_viewport_center() {
        let mut state = feed(3, 40);
        assert_eq!(state.current_index(), Some(0));
        state.scroll_offset = 30; // center now inside item 1
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(FeedState::default().current_index(), None);
    }

    #[test]
    fn resize_keeps_the_current_page_aligned() {
        let mut state = feed(3, 40);
        state.scroll_offset = 40;
        state.set_viewport_height(30);
        assert_eq!(state.scroll_offset, 30);
        assert_eq!(state.fully_visible_set(), BTreeSet::from([1]));
    }

    #[test]
    fn load_feed_parses_fixture_format() {
        let dir = std::env::temp_dir().join("vidstack-feed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("feed.json");
        std::fs::write(
            &path,
            r#"[{"title":"A","description":"first","url":"https://v/a.mp4"}]"#,
        )
        .unwrap();

        let entries = load_feed(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].url, "https://v/a.mp4");
    }

    #[test]
    fn load_feed_surfaces_missing_and_malformed_fixtures() {
        assert!(load_feed(Path::new("/nonexistent/feed.json")).is_err());

        let dir = std::env::temp_dir().join("vidstack-feed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_feed(&path).is_err());
    }
}
