//! Co-ownership shares among the buyers of a property
//!
//! Shares are whole percentages. Adding or removing a buyer redistributes
//! evenly; individual shares may then be edited by hand, in which case the
//! total is no longer guaranteed and [`CoOwnership::is_balanced`] reports it.

use crate::core::error::DomainError;
use crate::core::ids::BuyerId;
use crate::party::entities::Buyer;

/// Split 100 percent over `count` owners.
///
/// Everyone gets `100 / count`; the remainder is handed out one point each
/// to the first owners. `count == 0` yields an empty split.
pub fn distribute_evenly(count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let count_u32 = count as u32;
    let base = 100 / count_u32;
    let remainder = (100 % count_u32) as usize;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// One buyer with their share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipShare {
    pub buyer: Buyer,
    pub percentage: u32,
}

/// The ordered set of buyers on a deal with their shares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoOwnership {
    shares: Vec<OwnershipShare>,
}

impl CoOwnership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buyer and redistribute. Returns `false` if already present.
    pub fn add(&mut self, buyer: Buyer) -> bool {
        if self.contains(buyer.id) {
            return false;
        }
        self.shares.push(OwnershipShare {
            buyer,
            percentage: 0,
        });
        self.redistribute();
        true
    }

    /// Remove a buyer and redistribute. Returns `false` if absent.
    pub fn remove(&mut self, id: BuyerId) -> bool {
        let before = self.shares.len();
        self.shares.retain(|s| s.buyer.id != id);
        let removed = self.shares.len() != before;
        if removed {
            self.redistribute();
        }
        removed
    }

    /// Override one buyer's share by hand
    pub fn set_percentage(&mut self, id: BuyerId, percentage: u32) -> Result<(), DomainError> {
        if percentage > 100 {
            return Err(DomainError::InvalidPercentage(format!(
                "{} (share must be at most 100)",
                percentage
            )));
        }
        let share = self
            .shares
            .iter_mut()
            .find(|s| s.buyer.id == id)
            .ok_or_else(|| DomainError::unknown("buyer", id.to_string()))?;
        share.percentage = percentage;
        Ok(())
    }

    /// Reset every share to the even split
    pub fn redistribute(&mut self) {
        let split = distribute_evenly(self.shares.len());
        for (share, percentage) in self.shares.iter_mut().zip(split) {
            share.percentage = percentage;
        }
    }

    pub fn total_percentage(&self) -> u32 {
        self.shares.iter().map(|s| s.percentage).sum()
    }

    /// At least one buyer, every share positive, and a 100 percent total
    pub fn is_balanced(&self) -> bool {
        !self.shares.is_empty()
            && self.shares.iter().all(|s| s.percentage > 0)
            && self.total_percentage() == 100
    }

    pub fn contains(&self, id: BuyerId) -> bool {
        self.shares.iter().any(|s| s.buyer.id == id)
    }

    pub fn shares(&self) -> &[OwnershipShare] {
        &self.shares
    }

    pub fn buyers(&self) -> impl Iterator<Item = &Buyer> {
        self.shares.iter().map(|s| &s.buyer)
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}
