use log::warn;

use crate::budgets::Budget;
use crate::errors::{Error, Result};
use crate::goals::Goal;
use crate::transactions::Transaction;

/// Items addressable by their server id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Transaction {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Budget {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Goal {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory list that applies mutations before the server confirms them.
///
/// Every mutation first stores a copy of the whole list. Only the most recent
/// copy is kept: `rollback` restores the state before the last mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticList<T> {
    items: Vec<T>,
    snapshot: Option<Vec<T>>,
}

impl<T> Default for OptimisticList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            snapshot: None,
        }
    }
}

impl<T: Identified + Clone> OptimisticList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            snapshot: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the list with fresh server data and drops any snapshot.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.snapshot = None;
    }

    pub fn has_pending(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn apply_update<F>(&mut self, id: i64, patch: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let index = self.position(id)?;
        self.snapshot = Some(self.items.clone());
        patch(&mut self.items[index]);
        Ok(())
    }

    pub fn apply_remove(&mut self, id: i64) -> Result<T> {
        let index = self.position(id)?;
        self.snapshot = Some(self.items.clone());
        Ok(self.items.remove(index))
    }

    pub fn apply_insert(&mut self, item: T) {
        self.snapshot = Some(self.items.clone());
        self.items.insert(0, item);
    }

    /// Swaps in the server's copy of an item, appending it when absent.
    pub fn reconcile(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Accepts the pending mutation.
    pub fn commit(&mut self) {
        self.snapshot = None;
    }

    /// Restores the list as it was before the last mutation. Returns false
    /// when nothing was pending.
    pub fn rollback(&mut self) -> bool {
        match self.snapshot.take() {
            Some(snapshot) => {
                warn!("Rolling back optimistic change ({} items restored)", snapshot.len());
                self.items = snapshot;
                true
            }
            None => false,
        }
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound(format!("Item {} is not loaded", id)))
    }
}
