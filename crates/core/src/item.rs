//! Catalogue item rules shared by the create and partial-update paths.
//!
//! Holds the category set, the field limits, identifier parsing and the
//! validation of full-record creation requests.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in `CoreError::NotFound`.
pub const ITEM_ENTITY: &str = "item";

/// Default maximum length of `name`, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Default maximum length of `brand`, in characters.
pub const MAX_BRAND_LENGTH: usize = 100;

/// Default floor for `purchase_price`.
pub const MIN_PURCHASE_PRICE: i64 = 0;

/// Date format accepted for `purchase_date`.
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Field-length and price-floor limits applied by every validator.
///
/// Built once at startup and passed explicitly to validation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLimits {
    pub max_name_length: usize,
    pub max_brand_length: usize,
    pub min_purchase_price: i64,
}

impl Default for ItemLimits {
    fn default() -> Self {
        Self {
            max_name_length: MAX_NAME_LENGTH,
            max_brand_length: MAX_BRAND_LENGTH,
            min_purchase_price: MIN_PURCHASE_PRICE,
        }
    }
}

/// Check a required text field: non-empty and at most `max` characters.
///
/// Pushes `"<field> is required"` or `"<field> must be <max> characters or
/// less"` onto `errors`. The two are mutually exclusive.
pub(crate) fn check_text_field(field: &str, value: &str, max: usize, errors: &mut Vec<String>) {
    if value.is_empty() {
        errors.push(format!("{field} is required"));
    } else if value.chars().count() > max {
        errors.push(format!("{field} must be {max} characters or less"));
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Fixed set of item categories.
///
/// Serialized (JSON and database) as the catalogue's display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "時計")]
    Watch,
    #[serde(rename = "バッグ")]
    Bag,
    #[serde(rename = "ジュエリー")]
    Jewelry,
    #[serde(rename = "靴")]
    Shoes,
    #[serde(rename = "その他")]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Watch,
        Category::Bag,
        Category::Jewelry,
        Category::Shoes,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Watch => "時計",
            Category::Bag => "バッグ",
            Category::Jewelry => "ジュエリー",
            Category::Shoes => "靴",
            Category::Other => "その他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation(vec![category_error()]))
    }
}

impl TryFrom<String> for Category {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn category_error() -> String {
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    format!("category must be one of: {}", labels.join(", "))
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Parse a path segment as an item identifier.
///
/// Any base-10 `i64` is accepted; anything else is
/// `CoreError::InvalidIdentifier`. Zero and negative values parse fine and
/// simply never match a stored item.
pub fn parse_item_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Raw body of a create request. Missing keys fall back to empty values so
/// that every missing field is reported by [`CreateItemRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateItemRequest {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: String,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: NaiveDate,
}

impl CreateItemRequest {
    /// Check every field and collect all violations in field order.
    pub fn validate(self, limits: &ItemLimits) -> Result<NewItem, CoreError> {
        let mut errors = Vec::new();

        check_text_field("name", &self.name, limits.max_name_length, &mut errors);

        let category = if self.category.is_empty() {
            errors.push("category is required".to_string());
            None
        } else {
            match self.category.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    errors.push(category_error());
                    None
                }
            }
        };

        check_text_field("brand", &self.brand, limits.max_brand_length, &mut errors);

        if self.purchase_price < limits.min_purchase_price {
            errors.push(format!(
                "purchase_price must be {} or greater",
                limits.min_purchase_price
            ));
        }

        let purchase_date = if self.purchase_date.is_empty() {
            errors.push("purchase_date is required".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(&self.purchase_date, PURCHASE_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("purchase_date must be in YYYY-MM-DD format".to_string());
                    None
                }
            }
        };

        match (category, purchase_date) {
            (Some(category), Some(purchase_date)) if errors.is_empty() => Ok(NewItem {
                name: self.name,
                category,
                brand: self.brand,
                purchase_price: self.purchase_price,
                purchase_date,
            }),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}
