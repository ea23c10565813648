//! Canonical, observable list of row states.
//!
//! The list is the single owner of every [`RowState`]. Mutations go through
//! [`RowList::set_revealed`], [`RowList::insert`] and [`RowList::remove`];
//! each effective mutation bumps a revision published on a
//! `tokio::sync::watch` channel so a renderer can poll or await redraws.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{Result, SwipeError};

/// Row identifier
pub type RowId = u32;

/// UI state of one list row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowState {
    pub id: RowId,
    pub label: String,
    pub revealed: bool,
}

impl RowState {
    pub fn new(id: RowId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            revealed: false,
        }
    }
}

/// How reveals on different rows interact
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Every row opens and closes on its own
    #[default]
    Independent,
    /// Opening a row collapses the previously revealed one
    Exclusive,
}

/// Ordered, mutable sequence of rows with change notification
#[derive(Debug)]
pub struct RowList {
    rows: Vec<RowState>,
    policy: RevealPolicy,
    /// Currently revealed row under `RevealPolicy::Exclusive`
    revealed_id: Option<RowId>,
    revision: watch::Sender<u64>,
}

impl RowList {
    pub fn new(policy: RevealPolicy) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            rows: Vec::new(),
            policy,
            revealed_id: None,
            revision,
        }
    }

    /// `count` rows with ids `1..=count` labelled `"{prefix} {id}"`
    pub fn synthetic(count: u32, prefix: &str, policy: RevealPolicy) -> Self {
        let mut list = Self::new(policy);
        list.rows = (1..=count)
            .map(|id| RowState::new(id, format!("{} {}", prefix, id)))
            .collect();
        info!(count, "row list initialized");
        list
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowState> {
        self.rows.iter()
    }

    pub fn get(&self, id: RowId) -> Option<&RowState> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Row currently tracked as revealed (exclusive policy only)
    pub fn revealed_id(&self) -> Option<RowId> {
        self.revealed_id
    }

    /// Set a row's revealed flag.
    ///
    /// Returns the ids whose flag actually changed; under the exclusive
    /// policy that includes a previously revealed row that got collapsed.
    /// Setting the current value is a no-op and does not bump the revision.
    pub fn set_revealed(&mut self, id: RowId, revealed: bool) -> Result<Vec<RowId>> {
        let index = self.index_of(id).ok_or_else(|| SwipeError::row_not_found(id))?;
        let mut changed = Vec::new();

        if revealed && self.policy == RevealPolicy::Exclusive {
            if let Some(previous) = self.revealed_id.filter(|prev| *prev != id) {
                if let Some(row) = self.rows.iter_mut().find(|row| row.id == previous) {
                    if row.revealed {
                        row.revealed = false;
                        changed.push(previous);
                    }
                }
            }
        }

        let row = &mut self.rows[index];
        if row.revealed != revealed {
            row.revealed = revealed;
            changed.push(id);
        }

        if self.policy == RevealPolicy::Exclusive {
            if revealed {
                self.revealed_id = Some(id);
            } else if self.revealed_id == Some(id) {
                self.revealed_id = None;
            }
        }

        if !changed.is_empty() {
            debug!(id, revealed, ?changed, "reveal state updated");
            self.bump();
        }
        Ok(changed)
    }

    /// Insert a row at `index`, shifting later rows down
    pub fn insert(&mut self, index: usize, row: RowState) -> Result<()> {
        if index > self.rows.len() {
            return Err(SwipeError::IndexOutOfBounds {
                index,
                len: self.rows.len(),
            });
        }
        if self.get(row.id).is_some() {
            return Err(SwipeError::DuplicateRow { id: row.id });
        }
        if row.revealed && self.policy == RevealPolicy::Exclusive {
            self.collapse_tracked();
            self.revealed_id = Some(row.id);
        }
        info!(id = row.id, index, "row inserted");
        self.rows.insert(index, row);
        self.bump();
        Ok(())
    }

    /// Append a row
    pub fn push(&mut self, row: RowState) -> Result<()> {
        self.insert(self.rows.len(), row)
    }

    /// Remove a row, preserving the order of the others
    pub fn remove(&mut self, id: RowId) -> Result<RowState> {
        let index = self.index_of(id).ok_or_else(|| SwipeError::row_not_found(id))?;
        let row = self.rows.remove(index);
        if self.revealed_id == Some(id) {
            self.revealed_id = None;
        }
        info!(id, index, remaining = self.rows.len(), "row removed");
        self.bump();
        Ok(row)
    }

    /// Revision counter, bumped on every effective mutation
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Redraw hook: receivers observe every revision bump
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn collapse_tracked(&mut self) {
        if let Some(previous) = self.revealed_id.take() {
            if let Some(row) = self.rows.iter_mut().find(|row| row.id == previous) {
                row.revealed = false;
            }
        }
    }

    fn bump(&mut self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
