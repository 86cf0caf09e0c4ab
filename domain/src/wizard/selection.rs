//! Ordered selection lists keyed by record id

use crate::core::ids::{BuyerId, HouseId, UnitId};
use crate::party::entities::Buyer;
use crate::property::entities::{House, Unit};

/// A record that can be told apart by a key
pub trait Keyed {
    type Key: Copy + PartialEq + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

impl Keyed for Unit {
    type Key = UnitId;

    fn key(&self) -> UnitId {
        self.id
    }
}

impl Keyed for House {
    type Key = HouseId;

    fn key(&self) -> HouseId {
        self.id
    }
}

impl Keyed for Buyer {
    type Key = BuyerId;

    fn key(&self) -> BuyerId {
        self.id
    }
}

/// Insertion-ordered list holding at most one entry per key
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionList<T> {
    items: Vec<T>,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> SelectionList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless its key is already selected
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entry with `key`. Other entries keep their order.
    pub fn remove(&mut self, key: T::Key) -> bool {
        match self.items.iter().position(|i| i.key() == key) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.items.iter().any(|i| i.key() == key)
    }

    pub fn keys(&self) -> Vec<T::Key> {
        self.items.iter().map(Keyed::key).collect()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
