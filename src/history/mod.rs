//! Snapshot-based undo/redo journal.
//!
//! The journal observes scene notifications instead of being called by the
//! code that mutates the scene. Bursts of notifications are coalesced: every
//! notification pushes the recording deadline out by the quiescence window and
//! exactly one snapshot is taken once the deadline passes.
//!
//! Undo and redo restore whole snapshots. The restore produces notifications
//! of its own; those are ignored until the scene reports `RestoreComplete`.

use crate::config::HistoryConfig;
use crate::scene::{Scene, SceneEvent, Snapshot};
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default number of undo entries kept, baseline included.
pub const DEFAULT_MAX_ENTRIES: usize = 50;
/// Default quiescence window for coalescing notifications.
pub const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_millis(500);

/// Runtime settings for the journal.
#[derive(Debug, Clone, Copy)]
pub struct HistorySettings {
    pub max_entries: usize,
    pub coalesce_window: Duration,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            coalesce_window: DEFAULT_COALESCE_WINDOW,
        }
    }
}

impl From<&HistoryConfig> for HistorySettings {
    fn from(cfg: &HistoryConfig) -> Self {
        Self {
            max_entries: cfg.max_entries,
            coalesce_window: Duration::from_millis(cfg.coalesce_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JournalState {
    /// Not observing; both stacks are empty
    Disabled,
    /// Observing; `deadline` is set while a burst is waiting to be recorded
    Recording { deadline: Option<Instant> },
    /// A restore is replaying into the scene; its notifications are ignored
    Restoring,
}

/// Undo/redo stacks over whole-scene snapshots.
#[derive(Debug)]
pub struct History {
    settings: HistorySettings,
    state: JournalState,
    /// Most recent last; the last entry mirrors the live scene
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new(settings: HistorySettings) -> Self {
        Self {
            settings: HistorySettings {
                max_entries: settings.max_entries.max(1),
                ..settings
            },
            state: JournalState::Disabled,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, JournalState::Disabled)
    }

    /// Returns true while a restore is waiting for its completion signal.
    pub fn is_restoring(&self) -> bool {
        matches!(self.state, JournalState::Restoring)
    }

    /// Returns true when a burst of notifications is waiting to be recorded.
    pub fn has_pending(&self) -> bool {
        matches!(
            self.state,
            JournalState::Recording {
                deadline: Some(_)
            }
        )
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The snapshot that mirrors the live scene, if recording has started.
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    /// Starts observing and records the baseline. Idempotent.
    pub fn enable(&mut self, scene: &Scene) {
        if self.is_enabled() {
            return;
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.state = JournalState::Recording { deadline: None };
        self.record(scene);
        info!("History enabled (max {} entries)", self.settings.max_entries);
    }

    /// Stops observing and discards both stacks. Idempotent.
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.state = JournalState::Disabled;
        self.undo_stack.clear();
        self.redo_stack.clear();
        info!("History disabled");
    }

    /// Feeds one scene notification to the journal.
    pub fn observe(&mut self, event: &SceneEvent, now: Instant) {
        match &mut self.state {
            JournalState::Disabled => {}
            JournalState::Restoring => {
                if matches!(event, SceneEvent::RestoreComplete) {
                    debug!("Restore complete, recording resumed");
                    self.state = JournalState::Recording { deadline: None };
                }
            }
            JournalState::Recording { deadline } => {
                if event.is_mutation() {
                    *deadline = Some(now + self.settings.coalesce_window);
                }
            }
        }
    }

    /// Timer callback: records the pending burst once its window has elapsed.
    ///
    /// Returns true when a snapshot was recorded.
    pub fn tick(&mut self, now: Instant, scene: &Scene) -> bool {
        match self.state {
            JournalState::Recording {
                deadline: Some(deadline),
            } if now >= deadline => {
                self.state = JournalState::Recording { deadline: None };
                self.record(scene)
            }
            _ => false,
        }
    }

    /// Records a pending burst immediately, without waiting for its window.
    ///
    /// Returns true when a snapshot was recorded.
    pub fn flush(&mut self, scene: &Scene) -> bool {
        if self.has_pending() {
            self.state = JournalState::Recording { deadline: None };
            self.record(scene)
        } else {
            false
        }
    }

    /// Pushes the current scene unless it matches the newest entry.
    fn record(&mut self, scene: &Scene) -> bool {
        let snapshot = match scene.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Failed to capture scene snapshot: {err}");
                return false;
            }
        };
        if self.undo_stack.back() == Some(&snapshot) {
            debug!("Scene unchanged, nothing recorded");
            return false;
        }

        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.settings.max_entries {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        debug!("Recorded snapshot ({} undo entries)", self.undo_stack.len());
        true
    }

    /// Steps back one entry. No-op when only the baseline remains.
    ///
    /// Returns true when a restore was started.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if !matches!(self.state, JournalState::Recording { .. }) {
            return false;
        }
        self.flush(scene);

        let len = self.undo_stack.len();
        if len < 2 {
            return false;
        }

        if let Err(err) = scene.restore(&self.undo_stack[len - 2]) {
            warn!("Undo aborted, snapshot could not be restored: {err}");
            return false;
        }

        if let Some(top) = self.undo_stack.pop_back() {
            self.redo_stack.push(top);
        }
        self.state = JournalState::Restoring;
        debug!(
            "Undo ({} undo / {} redo entries)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-applies the most recently undone entry. No-op when nothing was undone.
    ///
    /// Returns true when a restore was started.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        if !matches!(self.state, JournalState::Recording { .. }) {
            return false;
        }
        self.flush(scene);

        let Some(next) = self.redo_stack.last() else {
            return false;
        };

        if let Err(err) = scene.restore(next) {
            warn!("Redo aborted, snapshot could not be restored: {err}");
            return false;
        }

        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push_back(next);
        }
        self.state = JournalState::Restoring;
        debug!(
            "Redo ({} undo / {} redo entries)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    #[cfg(test)]
    fn push_raw(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Shape, Style};
    use crate::scene::{EntityId, InteractionFlags, MutationKind};

    fn settings() -> HistorySettings {
        HistorySettings {
            max_entries: 50,
            coalesce_window: Duration::from_millis(500),
        }
    }

    fn add_rect(scene: &mut Scene, x: f64) -> EntityId {
        scene.add_entity(
            Shape::Rect {
                x,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            Style::default(),
            InteractionFlags::default(),
        )
    }

    /// Delivers queued notifications and lets the coalescing window elapse.
    fn settle(history: &mut History, scene: &mut Scene, now: &mut Instant) {
        for event in scene.take_events() {
            history.observe(&event, *now);
        }
        *now += Duration::from_secs(1);
        history.tick(*now, scene);
    }

    #[test]
    fn enable_records_baseline_once() {
        let scene = Scene::new();
        let mut history = History::new(settings());
        history.enable(&scene);
        history.enable(&scene);
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_with_only_baseline_is_noop() {
        let mut scene = Scene::new();
        add_rect(&mut scene, 0.0);
        scene.take_events();
        let mut history = History::new(settings());
        history.enable(&scene);
        let before = scene.snapshot().unwrap();

        assert!(!history.undo(&mut scene));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(scene.snapshot().unwrap(), before);
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn undo_then_redo_round_trips_snapshots() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        let pre = scene.snapshot().unwrap();

        add_rect(&mut scene, 5.0);
        settle(&mut history, &mut scene, &mut now);
        let post = scene.snapshot().unwrap();
        assert_eq!(history.undo_len(), 2);

        assert!(history.undo(&mut scene));
        assert_eq!(scene.snapshot().unwrap(), pre);
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);

        assert!(history.redo(&mut scene));
        assert_eq!(scene.snapshot().unwrap(), post);
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn burst_within_window_records_one_entry() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0);
        scene.take_events();
        let mut history = History::new(settings());
        history.enable(&scene);

        let start = Instant::now();
        for step in 0..20u64 {
            scene.translate_entity(id, 1.0, 0.0);
            let now = start + Duration::from_millis(step * 100);
            for event in scene.take_events() {
                history.observe(&event, now);
            }
            // The window keeps sliding; nothing is due yet.
            assert!(!history.tick(now + Duration::from_millis(50), &scene));
        }

        let last = start + Duration::from_millis(1900);
        assert!(!history.tick(last + Duration::from_millis(499), &scene));
        assert!(history.tick(last + Duration::from_millis(500), &scene));
        assert!(!history.tick(last + Duration::from_secs(5), &scene));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn restore_notifications_are_not_recorded() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);

        assert!(history.undo(&mut scene));
        assert!(history.is_restoring());

        // The restore's own Removed event must not arm the timer.
        for event in scene.take_events() {
            history.observe(&event, now);
            if event == SceneEvent::RestoreComplete {
                assert!(!history.is_restoring());
            } else {
                assert!(history.is_restoring());
            }
        }
        assert!(!history.has_pending());
        assert!(!history.tick(now + Duration::from_secs(10), &scene));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn undo_is_ignored_while_restoring() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);
        add_rect(&mut scene, 20.0);
        settle(&mut history, &mut scene, &mut now);

        assert!(history.undo(&mut scene));
        assert!(!history.undo(&mut scene));
        assert!(!history.redo(&mut scene));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn new_mutation_clears_redo_stack() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);

        history.undo(&mut scene);
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.redo_len(), 1);

        add_rect(&mut scene, 40.0);
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.redo(&mut scene));
    }

    #[test]
    fn unchanged_scene_records_nothing() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        let id = add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);
        add_rect(&mut scene, 20.0);
        settle(&mut history, &mut scene, &mut now);
        history.undo(&mut scene);
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.redo_len(), 1);

        // A notification without an actual change leaves both stacks alone
        scene.modify_entity(id, MutationKind::Modified, |_| {});
        for event in scene.take_events() {
            history.observe(&event, now);
        }
        assert!(history.has_pending());
        assert!(!history.tick(now + Duration::from_secs(1), &scene));
        assert!(!history.has_pending());
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.redo_len(), 1);
        assert!(history.redo(&mut scene));
    }

    #[test]
    fn bound_evicts_oldest_entries() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(HistorySettings {
            max_entries: 3,
            ..settings()
        });
        history.enable(&scene);

        for step in 0..5 {
            add_rect(&mut scene, step as f64 * 20.0);
            settle(&mut history, &mut scene, &mut now);
        }
        assert_eq!(history.undo_len(), 3);

        // Two steps back reach the new effective baseline (three rects).
        assert!(history.undo(&mut scene));
        settle(&mut history, &mut scene, &mut now);
        assert!(history.undo(&mut scene));
        settle(&mut history, &mut scene, &mut now);
        assert!(!history.undo(&mut scene));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn corrupt_snapshot_aborts_only_that_restore() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);

        // Bury a corrupt entry beneath the live state.
        let live = history.current().cloned().unwrap();
        history.push_raw(Snapshot::from_json("{\"version\":1,\"entities\":[{]"));
        history.push_raw(live);
        let before = scene.snapshot().unwrap();

        assert!(!history.undo(&mut scene));
        assert!(!history.is_restoring());
        assert_eq!(history.undo_len(), 4);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(scene.snapshot().unwrap(), before);
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn undo_flushes_pending_burst_first() {
        let mut scene = Scene::new();
        let now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        let baseline = scene.snapshot().unwrap();

        add_rect(&mut scene, 0.0);
        for event in scene.take_events() {
            history.observe(&event, now);
        }
        assert!(history.has_pending());

        assert!(history.undo(&mut scene));
        assert_eq!(scene.snapshot().unwrap(), baseline);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn disable_discards_stacks_and_stops_observing() {
        let mut scene = Scene::new();
        let mut now = Instant::now();
        let mut history = History::new(settings());
        history.enable(&scene);
        add_rect(&mut scene, 0.0);
        settle(&mut history, &mut scene, &mut now);

        history.disable();
        history.disable();
        assert_eq!(history.undo_len(), 0);

        scene.modify_entity(EntityId(1), MutationKind::Scaling, |_| {});
        settle(&mut history, &mut scene, &mut now);
        assert_eq!(history.undo_len(), 0);
        assert!(!history.undo(&mut scene));
    }
}
