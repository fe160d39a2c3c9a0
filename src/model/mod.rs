//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for
//! the application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tabs, routing records, UI state)
//! - `feed`: Feed entries, fixture loading, viewport geometry
//! - `playback`: Feed playback coordinator and player pool
//! - `shows`: Shows browser tiles and filter facets
//! - `app_model`: Main application model with state management methods

mod app_model;
mod feed;
mod playback;
mod shows;
mod types;

// Re-export all public types for convenient access
pub use types::{Tab, TabInfo, UiState, tab_info};

pub use feed::{FeedEntry, FeedState, ItemFrame, feed_fixture_path, load_feed};

pub use playback::{DEFAULT_POOL_CAPACITY, FeedPlaybackCoordinator, ItemPlayback};

pub use shows::{Filter, FilterGroup, ShowTile, ShowsFocus, ShowsState, SubFilter};

pub use app_model::AppModel;
