//! Item entity model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use valuables_core::item::Category;
use valuables_core::item_patch::ItemChanges;
use valuables_core::types::{DbId, Timestamp};

/// An item row from the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    /// Overlay the supplied fields of `changes` and stamp `updated_at`.
    ///
    /// Absent fields keep their current value. The result is only durable
    /// once it has been validated and written back through the store.
    pub fn apply_changes(&mut self, changes: &ItemChanges, now: Timestamp) {
        changes.name.apply_to(&mut self.name);
        changes.brand.apply_to(&mut self.brand);
        changes.purchase_price.apply_to(&mut self.purchase_price);
        self.updated_at = now;
    }
}
