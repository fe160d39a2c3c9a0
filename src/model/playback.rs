//! Feed playback coordination
//!
//! `FeedPlaybackCoordinator` owns a pool of reusable player handles keyed
//! by media source and enforces that at most one source is actively
//! playing (looped, audible) at any time. It reacts to visibility changes
//! reported by the feed's layout pass: whichever item becomes fully
//! visible is activated, and the previously active item is paused.
//!
//! All mutation happens through one owner on one sequential context; the
//! app confines the coordinator behind a single `Arc<Mutex<_>>`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;

use crate::media::{LoopController, MediaEngine, PlayerHandle};

use super::feed::FeedEntry;

/// Upper bound on pooled handles. The original kept every handle it ever
/// created; a long feed turns that into an unbounded resource leak, so the
/// pool evicts the least recently activated paused handle past this bound.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Per-item playback facts the feed view needs for its overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct ItemPlayback {
    pub playing: bool,
    pub unavailable: bool,
}

/// Mapping from media source to its single player handle.
struct PlayerPool {
    handles: HashMap<String, Arc<dyn PlayerHandle>>,
    /// Sources ordered least recently used first.
    recency: Vec<String>,
    capacity: usize,
}

impl PlayerPool {
    fn new(capacity: usize) -> Self {
        Self {
            handles: HashMap::new(),
            recency: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, source: &str) -> Option<&Arc<dyn PlayerHandle>> {
        self.handles.get(source)
    }

    fn contains(&self, source: &str) -> bool {
        self.handles.contains_key(source)
    }

    fn len(&self) -> usize {
        self.handles.len()
    }

    fn touch(&mut self, source: &str) {
        if let Some(pos) = self.recency.iter().position(|s| s == source) {
            let source = self.recency.remove(pos);
            self.recency.push(source);
        }
    }

    /// Insert a new handle, evicting the least recently used paused handle
    /// when the pool is full. The active source is never evicted.
    fn insert(&mut self, source: String, handle: Arc<dyn PlayerHandle>, active: Option<&str>) {
        while self.handles.len() >= self.capacity {
            let victim = self
                .recency
                .iter()
                .position(|s| Some(s.as_str()) != active);
            match victim {
                Some(pos) => {
                    let evicted = self.recency.remove(pos);
                    self.handles.remove(&evicted);
                    tracing::debug!(source = %evicted, "evicted pooled player handle");
                }
                None => break,
            }
        }
        self.recency.push(source.clone());
        self.handles.insert(source, handle);
    }
}

/// Decides which feed item plays as the visible set changes, and manages
/// player handle lifecycle and reuse across scroll positions.
pub struct FeedPlaybackCoordinator {
    engine: Arc<dyn MediaEngine>,
    pool: PlayerPool,
    active_source: Option<String>,
    looper: Option<LoopController>,
    visible: BTreeSet<usize>,
    unavailable: HashSet<String>,
}

impl FeedPlaybackCoordinator {
    pub fn new(engine: Arc<dyn MediaEngine>) -> Self {
        Self::with_capacity(engine, DEFAULT_POOL_CAPACITY)
    }

    pub fn with_capacity(engine: Arc<dyn MediaEngine>, capacity: usize) -> Self {
        Self {
            engine,
            pool: PlayerPool::new(capacity),
            active_source: None,
            looper: None,
            visible: BTreeSet::new(),
            unavailable: HashSet::new(),
        }
    }

    /// Return the handle for `source`, creating it on first reference.
    ///
    /// Repeated calls return the same handle object. Any handle fetched
    /// through this path is reset to paused + muted first, since it is
    /// being handed out for re-binding rather than activation.
    pub fn acquire_handle(&mut self, source: &str) -> Result<Arc<dyn PlayerHandle>> {
        if let Some(handle) = self.pool.get(source) {
            let handle = handle.clone();
            handle.pause();
            handle.set_muted(true);
            self.pool.touch(source);
            return Ok(handle);
        }

        let handle = self.engine.open(source)?;
        handle.pause();
        handle.set_muted(true);
        self.pool
            .insert(source.to_string(), handle.clone(), self.active_source.as_deref());
        tracing::debug!(source, pooled = self.pool.len(), "created player handle");
        Ok(handle)
    }

    /// Make `source` the single actively playing item: pause the previous
    /// one, attach a fresh loop controller, play and unmute.
    ///
    /// No-op when `source` is already active. A source the engine cannot
    /// open is marked unavailable and everything else is left untouched.
    pub fn activate(&mut self, source: &str) {
        if self.active_source.as_deref() == Some(source) {
            return;
        }

        if let Some(prev) = self.active_source.take() {
            if let Some(handle) = self.pool.get(&prev) {
                // Pausing is enough to silence it; mute state is left as is.
                handle.pause();
            }
            tracing::debug!(source = %prev, "deactivated feed item");
        }
        self.looper = None;

        let handle = match self.acquire_handle(source) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(source, error = %e, "media source unavailable");
                self.unavailable.insert(source.to_string());
                return;
            }
        };
        self.unavailable.remove(source);

        self.looper = Some(LoopController::attach(handle.clone()));
        handle.play();
        handle.set_muted(false);
        self.active_source = Some(source.to_string());
        tracing::info!(source, "activated feed item");
    }

    /// Flip the play/pause state of `source`'s handle, for direct
    /// tap-to-pause interaction. Does not touch the active source, mute
    /// state, or the loop controller; no-op when no handle exists.
    pub fn toggle_playback(&self, source: &str) {
        let Some(handle) = self.pool.get(source) else {
            return;
        };
        if handle.playback_rate() == 0.0 {
            handle.play();
        } else {
            handle.pause();
        }
        tracing::debug!(source, playing = handle.is_playing(), "toggled playback");
    }

    /// React to a layout pass: diff the fully-visible set against the
    /// previous one and activate every newly appeared index in order
    /// (with a paging layout at most one appears; if several do, the last
    /// one wins). Disappearances take no playback action: the previously
    /// active item keeps playing until another item becomes fully visible.
    pub fn handle_visibility_change(&mut self, visible: BTreeSet<usize>, entries: &[FeedEntry]) {
        let appeared: Vec<usize> = visible.difference(&self.visible).copied().collect();
        let disappeared: Vec<usize> = self.visible.difference(&visible).copied().collect();

        for index in appeared {
            tracing::debug!(index, "feed item appeared");
            if let Some(entry) = entries.get(index) {
                let source = entry.url.clone();
                self.activate(&source);
            }
        }
        for index in disappeared {
            tracing::debug!(index, "feed item disappeared");
        }

        self.visible = visible;
    }

    pub fn active_source(&self) -> Option<&str> {
        self.active_source.as_deref()
    }

    pub fn is_playing(&self, source: &str) -> bool {
        self.pool.get(source).is_some_and(|h| h.is_playing())
    }

    pub fn is_unavailable(&self, source: &str) -> bool {
        self.unavailable.contains(source)
    }

    pub fn has_handle(&self, source: &str) -> bool {
        self.pool.contains(source)
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Per-entry playback facts for rendering the feed overlay.
    pub fn snapshot(&self, entries: &[FeedEntry]) -> Vec<ItemPlayback> {
        entries
            .iter()
            .map(|entry| ItemPlayback {
                playing: self.is_playing(&entry.url),
                unavailable: self.is_unavailable(&entry.url),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use anyhow::bail;

    use super::*;

    struct MockHandle {
        source: String,
        playing: AtomicBool,
        muted: AtomicBool,
        looping: AtomicBool,
        loop_attaches: AtomicUsize,
    }

    impl MockHandle {
        fn new(source: &str) -> Self {
            Self {
                source: source.to_string(),
                playing: AtomicBool::new(false),
                muted: AtomicBool::new(true),
                looping: AtomicBool::new(false),
                loop_attaches: AtomicUsize::new(0),
            }
        }

        fn loop_attaches(&self) -> usize {
            self.loop_attaches.load(Ordering::SeqCst)
        }
    }

    impl PlayerHandle for MockHandle {
        fn source(&self) -> &str {
            &self.source
        }
        fn play(&self) {
            self.playing.store(true, Ordering::SeqCst);
        }
        fn pause(&self) {
            self.playing.store(false, Ordering::SeqCst);
        }
        fn set_muted(&self, muted: bool) {
            self.muted.store(muted, Ordering::SeqCst);
        }
        fn is_muted(&self) -> bool {
            self.muted.load(Ordering::SeqCst)
        }
        fn set_looping(&self, looping: bool) {
            if looping {
                self.loop_attaches.fetch_add(1, Ordering::SeqCst);
            }
            self.looping.store(looping, Ordering::SeqCst);
        }
        fn is_looping(&self) -> bool {
            self.looping.load(Ordering::SeqCst)
        }
        fn playback_rate(&self) -> f32 {
            if self.playing.load(Ordering::SeqCst) { 1.0 } else { 0.0 }
        }
    }

    #[derive(Default)]
    struct MockEngine {
        created: Mutex<Vec<Arc<MockHandle>>>,
        fail_sources: Vec<String>,
    }

    impl MockEngine {
        fn failing_on(sources: &[&str]) -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail_sources: sources.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn created_count(&self) -> usize {
            self.created.lock().unwrap().len()
        }

        fn handle_for(&self, source: &str) -> Option<Arc<MockHandle>> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .find(|h| h.source == source)
                .cloned()
        }
    }

    impl MediaEngine for MockEngine {
        fn open(&self, source: &str) -> Result<Arc<dyn PlayerHandle>> {
            if self.fail_sources.iter().any(|s| s == source) {
                bail!("cannot open {source}");
            }
            let handle = Arc::new(MockHandle::new(source));
            self.created.lock().unwrap().push(handle.clone());
            Ok(handle)
        }
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

    fn coordinator() -> (Arc<MockEngine>, FeedPlaybackCoordinator) {
        let engine = Arc::new(MockEngine::default());
        let coordinator = FeedPlaybackCoordinator::new(engine.clone());
        (engine, coordinator)
    }

    #[test]
    fn acquire_returns_the_same_handle_for_a_source() {
        let (_, mut coordinator) = coordinator();
        let first = coordinator.acquire_handle("https://v/a.mp4").unwrap();
        let second = coordinator.acquire_handle("https://v/a.mp4").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(coordinator.pool_len(), 1);
    }

    #[test]
    fn acquire_resets_existing_handles_to_paused_and_muted() {
        let (engine, mut coordinator) = coordinator();
        coordinator.activate("https://v/a.mp4");
        let a = engine.handle_for("https://v/a.mp4").unwrap();
        assert!(a.is_playing());
        assert!(!a.is_muted());

        // Re-binding path: the active handle is reset like any other.
        let handle = coordinator.acquire_handle("https://v/a.mp4").unwrap();
        assert!(!handle.is_playing());
        assert!(handle.is_muted());
    }

    #[test]
    fn at_most_one_handle_plays_across_any_activation_sequence() {
        let (engine, mut coordinator) = coordinator();
        let sources = [
            "https://v/a.mp4",
            "https://v/b.mp4",
            "https://v/c.mp4",
            "https://v/a.mp4",
            "https://v/c.mp4",
        ];
        for source in sources {
            coordinator.activate(source);
            let playing = engine
                .created
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.is_playing())
                .count();
            assert_eq!(playing, 1);
            assert_eq!(coordinator.active_source(), Some(source));
        }
    }

    #[test]
    fn repeated_activation_is_a_no_op() {
        let (engine, mut coordinator) = coordinator();
        coordinator.activate("https://v/a.mp4");
        let a = engine.handle_for("https://v/a.mp4").unwrap();
        assert_eq!(a.loop_attaches(), 1);

        coordinator.activate("https://v/a.mp4");
        assert_eq!(a.loop_attaches(), 1, "loop controller must not be rebuilt");
        assert!(a.is_playing());
        assert!(!a.is_muted());
        assert!(a.is_looping());
    }

    #[test]
    fn activating_b_suspends_a() {
        let (engine, mut coordinator) = coordinator();
        coordinator.activate("https://v/a.mp4");
        coordinator.activate("https://v/b.mp4");

        let a = engine.handle_for("https://v/a.mp4").unwrap();
        let b = engine.handle_for("https://v/b.mp4").unwrap();
        assert!(!a.is_playing());
        assert!(!a.is_looping(), "old loop controller must be discarded");
        assert!(b.is_playing());
        assert!(!b.is_muted());
        assert!(b.is_looping());
        assert_eq!(coordinator.active_source(), Some("https://v/b.mp4"));
    }

    #[test]
    fn toggle_flips_rate_without_touching_anything_else() {
        let (engine, mut coordinator) = coordinator();
        coordinator.activate("https://v/a.mp4");
        let a = engine.handle_for("https://v/a.mp4").unwrap();

        coordinator.toggle_playback("https://v/a.mp4");
        assert!(!a.is_playing());
        assert!(!a.is_muted(), "toggle must not mute");
        assert!(a.is_looping(), "toggle must not detach the looper");
        assert_eq!(coordinator.active_source(), Some("https://v/a.mp4"));

        coordinator.toggle_playback("https://v/a.mp4");
        assert!(a.is_playing());
    }

    #[test]
    fn toggle_without_a_handle_is_a_silent_no_op() {
        let (engine, coordinator) = coordinator();
        coordinator.toggle_playback("https://v/never-seen.mp4");
        assert_eq!(engine.created_count(), 0);
    }

    #[test]
    fn feed_scroll_scenario_reuses_handles() {
        let (engine, mut coordinator) = coordinator();
        let feed = entries(&["https://v/a.mp4", "https://v/b.mp4", "https://v/c.mp4"]);

        // Item 0 becomes fully visible.
        coordinator.handle_visibility_change(BTreeSet::from([0]), &feed);
        let a = engine.handle_for("https://v/a.mp4").unwrap();
        assert!(a.is_playing());
        assert!(!coordinator.has_handle("https://v/b.mp4"));
        assert!(!coordinator.has_handle("https://v/c.mp4"));

        // Scroll down: item 1 fully visible, item 0 gone.
        coordinator.handle_visibility_change(BTreeSet::from([1]), &feed);
        let b = engine.handle_for("https://v/b.mp4").unwrap();
        assert!(!a.is_playing());
        assert!(b.is_playing());
        assert_eq!(coordinator.pool_len(), 2);

        // Scroll back: item 0's handle is reused, not recreated.
        coordinator.handle_visibility_change(BTreeSet::from([0]), &feed);
        assert_eq!(engine.created_count(), 2);
        assert!(a.is_playing());
        assert!(a.is_looping());
        assert_eq!(a.loop_attaches(), 2, "loop controller re-attached on return");
        assert!(!b.is_playing());
    }

    #[test]
    fn no_fully_visible_item_keeps_the_active_one_playing() {
        let (engine, mut coordinator) = coordinator();
        let feed = entries(&["https://v/a.mp4", "https://v/b.mp4"]);

        coordinator.handle_visibility_change(BTreeSet::from([1]), &feed);
        // Mid-scroll: nothing fully visible. No implicit pause.
        coordinator.handle_visibility_change(BTreeSet::new(), &feed);

        let b = engine.handle_for("https://v/b.mp4").unwrap();
        assert!(b.is_playing());
        assert_eq!(coordinator.active_source(), Some("https://v/b.mp4"));
    }

    #[test]
    fn simultaneous_appearances_last_one_wins() {
        let (engine, mut coordinator) = coordinator();
        let feed = entries(&["https://v/a.mp4", "https://v/b.mp4", "https://v/c.mp4"]);

        coordinator.handle_visibility_change(BTreeSet::from([0, 1, 2]), &feed);
        assert_eq!(coordinator.active_source(), Some("https://v/c.mp4"));
        let playing = engine
            .created
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.is_playing())
            .count();
        assert_eq!(playing, 1);
    }

    #[test]
    fn unplayable_source_is_isolated() {
        let engine = Arc::new(MockEngine::failing_on(&["bad://x"]));
        let mut coordinator = FeedPlaybackCoordinator::new(engine.clone());

        coordinator.activate("https://v/a.mp4");
        coordinator.activate("bad://x");

        assert!(coordinator.is_unavailable("bad://x"));
        assert!(!coordinator.has_handle("bad://x"));
        assert_eq!(coordinator.active_source(), None);
        // The failure never tears down the rest of the pool.
        assert!(coordinator.has_handle("https://v/a.mp4"));

        // And the coordinator recovers on the next activation.
        coordinator.activate("https://v/a.mp4");
        let a = engine.handle_for("https://v/a.mp4").unwrap();
        assert!(a.is_playing());
    }

    #[test]
    fn bounded_pool_never_evicts_the_active_handle() {
        let engine = Arc::new(MockEngine::default());
        let mut coordinator = FeedPlaybackCoordinator::with_capacity(engine.clone(), 2);

        coordinator.activate("https://v/a.mp4");
        coordinator.acquire_handle("https://v/b.mp4").unwrap();
        coordinator.acquire_handle("https://v/c.mp4").unwrap();

        assert!(coordinator.has_handle("https://v/a.mp4"), "active survives");
        assert!(coordinator.has_handle("https://v/c.mp4"));
        assert!(!coordinator.has_handle("https://v/b.mp4"), "lru paused handle evicted");
        assert_eq!(coordinator.pool_len(), 2);

        let a = engine.handle_for("https://v/a.mp4").unwrap();
        assert!(a.is_playing());
    }

    #[test]
    fn snapshot_reports_per_item_state() {
        let engine = Arc::new(MockEngine::failing_on(&["bad://x"]));
        let mut coordinator = FeedPlaybackCoordinator::new(engine);
        let feed = entries(&["https://v/a.mp4", "bad://x"]);

        coordinator.activate("bad://x");
        coordinator.activate("https://v/a.mp4");

        let snapshot = coordinator.snapshot(&feed);
        assert!(snapshot[0].playing);
        assert!(!snapshot[0].unavailable);
        assert!(!snapshot[1].playing);
        assert!(snapshot[1].unavailable);
    }
}
