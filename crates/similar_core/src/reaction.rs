use std::collections::BTreeMap;

use crate::view_model::{ButtonStyle, ReactionButtonView, ReactionRowView};

/// A like/dislike row as found in freshly rendered result markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRowSnapshot {
    pub candidate: String,
    pub codes: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReactionRow {
    codes: Vec<i32>,
    chosen: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReactionBoard {
    source: String,
    rows: BTreeMap<String, ReactionRow>,
}

impl ReactionBoard {
    pub(crate) fn new(source: String) -> Self {
        Self {
            source,
            rows: BTreeMap::new(),
        }
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// True when `code` is a button of an unlocked row.
    pub(crate) fn accepts(&self, candidate: &str, code: i32) -> bool {
        self.rows
            .get(candidate)
            .is_some_and(|row| row.chosen.is_none() && row.codes.contains(&code))
    }

    pub(crate) fn merge(&mut self, snapshots: Vec<ReactionRowSnapshot>) -> usize {
        let mut added = 0;
        for snapshot in snapshots {
            if self.rows.contains_key(&snapshot.candidate) {
                continue;
            }
            self.rows.insert(
                snapshot.candidate,
                ReactionRow {
                    codes: snapshot.codes,
                    chosen: None,
                },
            );
            added += 1;
        }
        added
    }

    /// Locks the row on the acknowledged code. A later acknowledgement of a
    /// request sent before the lock replaces the choice.
    pub(crate) fn lock(&mut self, candidate: &str, code: i32) -> bool {
        match self.rows.get_mut(candidate) {
            Some(row) => {
                row.chosen = Some(code);
                true
            }
            None => false,
        }
    }

    pub(crate) fn view(&self) -> Vec<ReactionRowView> {
        self.rows
            .iter()
            .map(|(candidate, row)| ReactionRowView {
                candidate: candidate.clone(),
                locked: row.chosen.is_some(),
                buttons: row
                    .codes
                    .iter()
                    .map(|code| button_view(*code, row.chosen))
                    .collect(),
            })
            .collect()
    }
}

fn button_view(code: i32, chosen: Option<i32>) -> ReactionButtonView {
    match chosen {
        None => ReactionButtonView {
            code,
            enabled: true,
            style: ButtonStyle::Normal,
        },
        Some(chosen) if chosen == code => ReactionButtonView {
            code,
            enabled: true,
            style: ButtonStyle::Emphasized,
        },
        Some(_) => ReactionButtonView {
            code,
            enabled: false,
            style: ButtonStyle::Dimmed,
        },
    }
}
