use std::collections::{BTreeMap, BTreeSet};

use crate::render_stars;
use crate::view_model::RatingRowView;

/// Label sent by the reset control.
pub const RESET_LABEL: f64 = 0.0;
/// Label sent by the "not relevant" control; acknowledging it removes the row.
pub const NOT_RELEVANT_LABEL: f64 = -1.0;

const STAR_VALUES: [u8; 5] = [1, 2, 3, 4, 5];

/// Identity of a rating row: the book the page is about and one candidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    pub source: String,
    pub candidate: String,
}

impl RowKey {
    pub fn new(source: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            candidate: candidate.into(),
        }
    }
}

/// A rating row as found in freshly rendered result markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRowSnapshot {
    pub key: RowKey,
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct RatingBoard {
    rows: BTreeMap<RowKey, f64>,
    removed: BTreeSet<RowKey>,
}

impl RatingBoard {
    pub(crate) fn contains(&self, key: &RowKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Key of the live row for `candidate`, whatever source the markup named.
    pub(crate) fn key_for(&self, candidate: &str) -> Option<&RowKey> {
        self.rows.keys().find(|key| key.candidate == candidate)
    }

    /// Adds rows from new markup. Rows already known keep their acknowledged
    /// rating; removed rows stay removed.
    pub(crate) fn merge(&mut self, snapshots: Vec<RatingRowSnapshot>) -> usize {
        let mut added = 0;
        for snapshot in snapshots {
            if self.removed.contains(&snapshot.key) || self.rows.contains_key(&snapshot.key) {
                continue;
            }
            self.rows.insert(snapshot.key, sanitize(snapshot.current));
            added += 1;
        }
        added
    }

    /// Applies an acknowledged label. Returns false if the row no longer exists.
    pub(crate) fn acknowledge(&mut self, key: &RowKey, label: f64) -> bool {
        if label == NOT_RELEVANT_LABEL {
            if self.rows.remove(key).is_some() {
                self.removed.insert(key.clone());
                return true;
            }
            return false;
        }
        match self.rows.get_mut(key) {
            Some(current) => {
                *current = label;
                true
            }
            None => false,
        }
    }

    pub(crate) fn view(&self) -> (Vec<RatingRowView>, Vec<RowKey>) {
        let rows = self
            .rows
            .iter()
            .map(|(key, current)| RatingRowView {
                key: key.clone(),
                current: *current,
                stars: render_stars(&STAR_VALUES, *current),
            })
            .collect();
        (rows, self.removed.iter().cloned().collect())
    }
}

fn sanitize(current: f64) -> f64 {
    if current.is_finite() {
        current
    } else {
        0.0
    }
}
