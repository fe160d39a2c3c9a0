//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model, the playback coordinator, and the
//! view. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `feed`: Feed loading, scrolling, and visibility reporting
//! - `navigation`: Tab / sidebar / shows browser navigation

mod feed;
mod input;
mod navigation;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::{AppModel, FeedPlaybackCoordinator};

/// The coordinator is an explicitly constructed instance handed to the
/// controller; nothing in the app reaches for ambient playback state.
#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) coordinator: Arc<Mutex<FeedPlaybackCoordinator>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        coordinator: Arc<Mutex<FeedPlaybackCoordinator>>,
    ) -> Self {
        Self { model, coordinator }
    }
}
