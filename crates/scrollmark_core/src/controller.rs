//! Anchor controller
//!
//! Owns the [`TrackedPosition`] and drives capture and restore from host
//! events. The host keeps ownership of the tree and the scroll viewport and
//! lends them for the duration of each call.
//!
//! ```text
//! raw scroll tick ──► on_scroll ──► Debouncer ──► poll ──► scan + capture ──► observers
//! layout changed  ──► notify_layout_changed ──┐
//! frame laid out  ──► on_layout_complete ◄────┘──► scan + restore ──► ScrollHost::jump_to
//! ```
//!
//! Everything runs on the UI thread; there is no locking. The scroll event
//! produced by an engine jump is swallowed with a one-shot flag.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use tracing::debug;

use crate::config::AnchorConfig;
use crate::debounce::Debouncer;
use crate::engine;
use crate::error::Result;
use crate::host::ScrollHost;
use crate::position::TrackedPosition;
use crate::record::PositionalRecord;
use crate::scanner::{scan, ScanOptions};
use crate::search;
use crate::tree::{ContentTree, FilterPolicy};

/// Observer invoked whenever the anchor changes
///
/// Uses Rc since the controller is single-threaded.
pub type PositionCallback = Rc<dyn Fn(TrackedPosition)>;

pub struct PositionController {
    tracked: TrackedPosition,
    filter: FilterPolicy,
    debouncer: Debouncer<f32>,
    /// Swallow the next settled scroll (it echoes our own jump)
    ignore_next_settle: bool,
    /// Restore once the next layout pass completes
    restore_pending: bool,
    observers: Vec<PositionCallback>,
}

impl fmt::Debug for PositionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionController")
            .field("tracked", &self.tracked)
            .field("filter", &self.filter)
            .field("ignore_next_settle", &self.ignore_next_settle)
            .field("restore_pending", &self.restore_pending)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for PositionController {
    fn default() -> Self {
        Self::new(AnchorConfig::default())
    }
}

impl PositionController {
    pub fn new(config: AnchorConfig) -> Self {
        Self {
            tracked: config.initial_position(),
            filter: config.filter,
            debouncer: Debouncer::new(config.debounce),
            ignore_next_settle: false,
            restore_pending: config.trigger_initial_restore,
            observers: Vec::new(),
        }
    }

    /// Register an observer for anchor updates
    pub fn on_position_updated<F>(&mut self, callback: F)
    where
        F: Fn(TrackedPosition) + 'static,
    {
        self.observers.push(Rc::new(callback));
    }

    /// Anchored record index, -1 when there is no anchor
    pub fn current_index(&self) -> i32 {
        self.tracked.index
    }

    pub fn current_alignment(&self) -> f32 {
        self.tracked.alignment
    }

    pub fn position(&self) -> TrackedPosition {
        self.tracked
    }

    pub fn filter(&self) -> &FilterPolicy {
        &self.filter
    }

    /// Whether a restore is waiting for the next completed layout
    pub fn is_restore_pending(&self) -> bool {
        self.restore_pending
    }

    /// When the pending scroll settle will fire, for scheduling a wakeup
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // =========================================================================
    // Scroll events
    // =========================================================================

    /// Feed a raw scroll tick
    pub fn on_scroll(&mut self, offset: f32, now: Instant) {
        self.debouncer.push(offset, now);
    }

    /// Capture the settled scroll position if the debounce window elapsed
    ///
    /// Returns the new anchor when a capture ran.
    pub fn poll<T, H>(&mut self, now: Instant, tree: &T, host: &H) -> Option<TrackedPosition>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        let offset = self.debouncer.poll(now)?;

        if self.ignore_next_settle {
            debug!(offset, "ignoring settle caused by restore");
            self.ignore_next_settle = false;
            return None;
        }

        self.capture_at(offset, tree, host)
    }

    /// Capture the host's current offset immediately, bypassing the debounce
    pub fn capture<T, H>(&mut self, tree: &T, host: &H) -> Option<TrackedPosition>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        self.capture_at(host.current_offset(), tree, host)
    }

    fn capture_at<T, H>(&mut self, offset: f32, tree: &T, host: &H) -> Option<TrackedPosition>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        if !host.has_geometry() {
            debug!("viewport has no geometry, skipping capture");
            return None;
        }

        let records = scan(tree, &self.filter, ScanOptions::default());
        if records.is_empty() {
            debug!("no records under viewport, anchor unchanged");
            return None;
        }

        self.set_position(engine::capture(offset, &records));
        Some(self.tracked)
    }

    // =========================================================================
    // Layout changes
    // =========================================================================

    /// Layout is about to change (or just changed) shape
    ///
    /// The restore runs on the next [`on_layout_complete`](Self::on_layout_complete)
    /// so the scan sees post-layout geometry.
    pub fn notify_layout_changed(&mut self) {
        self.restore_pending = true;
    }

    /// A layout pass completed; runs the pending restore, if any, exactly once
    pub fn on_layout_complete<T, H>(&mut self, tree: &T, host: &mut H) -> Option<f32>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        if !std::mem::take(&mut self.restore_pending) {
            return None;
        }
        self.restore(tree, host)
    }

    /// Jump the host so the tracked anchor is back at the viewport start
    ///
    /// Returns the resolved target; the host is moved to it clamped to
    /// `[0, max_extent]`, and not at all when already there. Does nothing
    /// without geometry or without an anchor. The anchor itself is not
    /// modified.
    pub fn restore<T, H>(&mut self, tree: &T, host: &mut H) -> Option<f32>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        if !host.has_geometry() || !self.tracked.is_anchored() {
            debug!("nothing to restore");
            return None;
        }

        let records = scan(tree, &self.filter, ScanOptions::default());
        self.jump_with(&records, host)
    }

    fn jump_with<H>(&mut self, records: &[PositionalRecord], host: &mut H) -> Option<f32>
    where
        H: ScrollHost + ?Sized,
    {
        let target = engine::resolve_target(self.tracked, records)?;
        let clamped = target.clamp(0.0, host.max_extent().max(0.0));

        // A viewport that does not move emits no scroll, so nothing to swallow.
        if clamped == host.current_offset() {
            debug!(target, "viewport already at restore target");
            return Some(target);
        }

        // The jump emits a scroll of its own; it must not be captured.
        self.ignore_next_settle = true;
        host.jump_to(clamped);
        Some(target)
    }

    // =========================================================================
    // Explicit anchoring
    // =========================================================================

    /// Anchor to the record holding the `occurrence`-th match of `pattern`
    /// and restore to it
    ///
    /// Returns the matched record index; `Ok(None)` leaves the anchor
    /// unchanged.
    pub fn find_text_instance<T, H>(
        &mut self,
        pattern: &str,
        occurrence: usize,
        tree: &T,
        host: &mut H,
    ) -> Result<Option<usize>>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        let regex = search::compile_pattern(pattern)?;
        let records = scan(tree, &self.filter, ScanOptions::with_text());

        let Some(index) = search::find_with(&regex, occurrence, &records) else {
            return Ok(None);
        };

        self.set_position(TrackedPosition::new(index as i32, 0.0));
        if host.has_geometry() {
            self.jump_with(&records, host);
        }
        Ok(Some(index))
    }

    /// Anchor to `index` at `alignment` and restore to it
    pub fn jump_to_anchor<T, H>(
        &mut self,
        index: usize,
        alignment: f32,
        tree: &T,
        host: &mut H,
    ) -> Option<f32>
    where
        T: ContentTree + ?Sized,
        H: ScrollHost + ?Sized,
    {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.set_position(TrackedPosition::new(index, alignment));
        self.restore(tree, host)
    }

    fn set_position(&mut self, position: TrackedPosition) {
        self.tracked = position;
        for observer in &self.observers {
            observer(position);
        }
    }
}
