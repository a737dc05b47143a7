//! # Row Status Module
//!
//! Transient per-row feedback for list tables.
//!
//! ## Glyphs
//! - `Success` after an edit is saved
//! - `Removed` after a delete succeeds
//!
//! Each glyph stays up for the configured window (about one second).
//!
//! ## Ghost rows
//! A deleted record is already gone from the list state. The table keeps
//! drawing it at its old index while its `Removed` glyph is up, then for
//! the fade window after that, so the rows below do not jump up.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use shared::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowGlyph {
    Success,
    Removed,
}

impl RowGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            RowGlyph::Success => "✓",
            RowGlyph::Removed => "✗",
        }
    }
}

/// A deleted row still being drawn while it fades out
#[derive(Debug, Clone, PartialEq)]
pub struct GhostRow<T> {
    pub record: T,
    pub index: usize,
    until: Instant,
}

#[derive(Debug)]
pub struct RowStatusTracker<T> {
    glyph_window: Duration,
    fade_window: Duration,
    glyphs: HashMap<RecordId, (RowGlyph, Instant)>,
    ghosts: HashMap<RecordId, GhostRow<T>>,
}

impl<T: Clone> RowStatusTracker<T> {
    pub fn new(glyph_window: Duration, fade_window: Duration) -> Self {
        Self {
            glyph_window,
            fade_window,
            glyphs: HashMap::new(),
            ghosts: HashMap::new(),
        }
    }

    pub fn mark_saved(&mut self, id: RecordId, now: Instant) {
        self.glyphs
            .insert(id, (RowGlyph::Success, now + self.glyph_window));
    }

    /// Record a successful delete of `record`, which sat at `index`
    pub fn mark_removed(&mut self, id: RecordId, record: T, index: usize, now: Instant) {
        self.glyphs
            .insert(id, (RowGlyph::Removed, now + self.glyph_window));
        self.ghosts.insert(
            id,
            GhostRow {
                record,
                index,
                until: now + self.glyph_window + self.fade_window,
            },
        );
    }

    pub fn glyph(&self, id: RecordId) -> Option<RowGlyph> {
        self.glyphs.get(&id).map(|(glyph, _)| *glyph)
    }

    pub fn is_animating_out(&self, id: RecordId) -> bool {
        self.ghosts.contains_key(&id)
    }

    /// Drop expired glyphs and ghosts; true when anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.glyphs.len() + self.ghosts.len();
        self.glyphs.retain(|_, (_, until)| *until > now);
        self.ghosts.retain(|_, ghost| ghost.until > now);
        before != self.glyphs.len() + self.ghosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.ghosts.is_empty()
    }

    /// Live records with fading ghosts re-inserted at their old positions.
    /// The flag marks ghost rows.
    pub fn render_rows(&self, records: &[T]) -> Vec<(T, bool)> {
        let mut rows: Vec<(T, bool)> = records.iter().cloned().map(|r| (r, false)).collect();
        let mut ghosts: Vec<&GhostRow<T>> = self.ghosts.values().collect();
        ghosts.sort_by_key(|g| g.index);
        for ghost in ghosts {
            let at = ghost.index.min(rows.len());
            rows.insert(at, (ghost.record.clone(), true));
        }
        rows
    }
}
