//! Session cart.
//!
//! A cart is an ordered list of laptop + accessory selections owned by one
//! browser session. It stores references only: prices are resolved from the
//! catalog every time the cart is read, so a price change in the catalog is
//! reflected in an unpurchased cart.
//!
//! Re-adding a laptop that is already in the cart replaces its accessory
//! selection; carts never hold the same laptop twice.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSnapshot, PricedLine, UnavailableItem};
use crate::error::CoreError;
use crate::types::{DbId, Money};

/// One laptop plus the spare parts selected for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub laptop_id: DbId,
    #[serde(default)]
    pub spare_part_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, laptop_id: DbId) -> bool {
        self.items.iter().any(|i| i.laptop_id == laptop_id)
    }

    /// Add a laptop selection, replacing the accessory selection if the
    /// laptop is already present. Returns the resulting cart size.
    ///
    /// `quantity` defaults to one; any other value is rejected because every
    /// laptop is a single serial-numbered unit.
    pub fn add(
        &mut self,
        laptop_id: DbId,
        spare_part_ids: Vec<DbId>,
        quantity: Option<u32>,
    ) -> Result<usize, CoreError> {
        if let Some(q) = quantity.filter(|&q| q != 1) {
            return Err(CoreError::Validation(format!(
                "Quantity must be 1; each laptop is a single unit (got {q})"
            )));
        }
        let spare_part_ids = dedup_preserving_order(spare_part_ids);

        match self.items.iter_mut().find(|i| i.laptop_id == laptop_id) {
            Some(existing) => existing.spare_part_ids = spare_part_ids,
            None => self.items.push(CartItem {
                laptop_id,
                spare_part_ids,
            }),
        }
        Ok(self.items.len())
    }

    /// Replace the accessory selection of a laptop already in the cart.
    pub fn update(&mut self, laptop_id: DbId, spare_part_ids: Vec<DbId>) -> Result<(), CoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.laptop_id == laptop_id)
            .ok_or_else(|| CoreError::not_found("CartItem", laptop_id))?;
        item.spare_part_ids = dedup_preserving_order(spare_part_ids);
        Ok(())
    }

    /// Remove a laptop. Removing an absent laptop is a no-op.
    pub fn remove(&mut self, laptop_id: DbId) {
        self.items.retain(|i| i.laptop_id != laptop_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Every spare part id referenced by the cart, deduplicated.
    pub fn spare_part_ids(&self) -> Vec<DbId> {
        dedup_preserving_order(
            self.items
                .iter()
                .flat_map(|i| i.spare_part_ids.iter().copied())
                .collect(),
        )
    }

    pub fn laptop_ids(&self) -> Vec<DbId> {
        self.items.iter().map(|i| i.laptop_id).collect()
    }

    /// Lazily price each item against `snapshot`, in cart order.
    pub fn priced_lines<'a>(
        &'a self,
        snapshot: &'a CatalogSnapshot,
    ) -> impl Iterator<Item = Result<PricedLine, UnavailableItem>> + 'a {
        self.items
            .iter()
            .map(move |item| snapshot.price(item.laptop_id, &item.spare_part_ids))
    }

    /// Price the whole cart. Items that can no longer be bought are left
    /// out of the total and reported in [`CartProjection::warnings`].
    pub fn project(&self, snapshot: &CatalogSnapshot) -> CartProjection {
        let mut projection = CartProjection::default();
        for line in self.priced_lines(snapshot) {
            match line {
                Ok(line) => {
                    projection.total += line.total_price;
                    projection.items.push(line);
                }
                Err(unavailable) => projection.warnings.push(unavailable),
            }
        }
        projection
    }
}

/// Priced view of a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartProjection {
    pub items: Vec<PricedLine>,
    pub warnings: Vec<UnavailableItem>,
    pub total: Money,
}

fn dedup_preserving_order(ids: Vec<DbId>) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
