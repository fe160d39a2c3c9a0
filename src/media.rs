//! Media engine abstraction
//!
//! The playback coordinator treats the media stack as an opaque capability:
//! open a source, play/pause it, mute/unmute it, loop it. The default engine
//! in this proof-of-concept does not decode anything; it tracks playback
//! state and logs every transition, the same way the rest of the shell
//! simulates navigation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};

/// A playback-capable instance bound to a single media source.
///
/// Handles use interior mutability so every holder of the same `Arc`
/// observes state changes made through any other holder.
pub trait PlayerHandle: Send + Sync {
    fn source(&self) -> &str;
    fn play(&self);
    fn pause(&self);
    fn set_muted(&self, muted: bool);
    fn is_muted(&self) -> bool;
    fn set_looping(&self, looping: bool);
    fn is_looping(&self) -> bool;

    /// 0.0 means paused, anything else means playing.
    fn playback_rate(&self) -> f32;

    fn is_playing(&self) -> bool {
        self.playback_rate() != 0.0
    }
}

/// Capability to create player handles for media sources.
pub trait MediaEngine: Send + Sync {
    /// Open `source` and return a new handle for it, initially paused and
    /// muted. Fails when the engine cannot play the source at all.
    fn open(&self, source: &str) -> Result<Arc<dyn PlayerHandle>>;
}

/// Restarts playback at end-of-media indefinitely until dropped.
///
/// The coordinator holds at most one of these, always bound to the active
/// handle. Dropping it detaches looping from that handle.
pub struct LoopController {
    handle: Arc<dyn PlayerHandle>,
}

impl LoopController {
    pub fn attach(handle: Arc<dyn PlayerHandle>) -> Self {
        handle.set_looping(true);
        tracing::debug!(source = %handle.source(), "loop controller attached");
        Self { handle }
    }

    pub fn targets(&self, handle: &Arc<dyn PlayerHandle>) -> bool {
        Arc::ptr_eq(&self.handle, handle)
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        self.handle.set_looping(false);
    }
}

/// Default engine for the shell: playback is simulated, not decoded.
pub struct SimulatedEngine;

const OPENABLE_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

impl MediaEngine for SimulatedEngine {
    fn open(&self, source: &str) -> Result<Arc<dyn PlayerHandle>> {
        if !OPENABLE_SCHEMES.iter().any(|s| source.starts_with(s)) {
            bail!("unplayable media source: {source}");
        }
        tracing::debug!(source, "opened media source");
        Ok(Arc::new(SimulatedHandle::new(source)))
    }
}

struct SimulatedHandle {
    source: String,
    playing: AtomicBool,
    muted: AtomicBool,
    looping: AtomicBool,
}

impl SimulatedHandle {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            playing: AtomicBool::new(false),
            muted: AtomicBool::new(true),
            looping: AtomicBool::new(false),
        }
    }
}

impl PlayerHandle for SimulatedHandle {
    fn source(&self) -> &str {
        &self.source
    }

    fn play(&self) {
        self.playing.store(true, Ordering::SeqCst);
        tracing::debug!(source = %self.source, "play");
    }

    fn pause(&self) {
        self.playing.store(false, Ordering::SeqCst);
        tracing::debug!(source = %self.source, "pause");
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
        tracing::trace!(source = %self.source, muted, "set muted");
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn set_looping(&self, looping: bool) {
        self.looping.store(looping, Ordering::SeqCst);
    }

    fn is_looping(&self) -> bool {
        self.looping.load(Ordering::SeqCst)
    }

    fn playback_rate(&self) -> f32 {
        if self.playing.load(Ordering::SeqCst) { 1.0 } else { 0.0 }
    }
}
