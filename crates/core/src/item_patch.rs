//! Partial-update ("PATCH") rules for catalogue items.
//!
//! A request body goes through three pure stages before any storage access:
//!
//! 1. [`RawPatch::parse`] decodes the body into a generic JSON object so
//!    that every key the client sent is visible, including server-owned
//!    and unknown keys.
//! 2. [`RawPatch::ensure_mutable_only`] rejects any server-owned field.
//! 3. [`RawPatch::into_changes`] binds the object into [`ItemChanges`],
//!    which only knows the mutable fields.
//!
//! After the stored item has been merged with the changes,
//! [`validate_changes`] checks every field the client touched.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::item::{check_text_field, ItemLimits};
use crate::patch::Patch;

/// Server-owned fields, in the order violations are reported.
pub const IMMUTABLE_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Fields a partial update may change.
pub const MUTABLE_FIELDS: [&str; 3] = ["name", "brand", "purchase_price"];

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A request body decoded into a generic JSON object.
#[derive(Debug, Clone)]
pub struct RawPatch {
    fields: Map<String, Value>,
}

impl RawPatch {
    /// Decode `body` as a JSON object.
    ///
    /// Malformed JSON, an empty body, or any top-level value other than an
    /// object is `CoreError::InvalidFormat`.
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let fields = serde_json::from_slice::<Map<String, Value>>(body)
            .map_err(|e| CoreError::InvalidFormat(e.to_string()))?;
        Ok(Self { fields })
    }

    /// Whether `key` was sent, whatever its value (including `null`).
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// One `"<field> is immutable"` message per server-owned field present.
    pub fn immutable_violations(&self) -> Vec<String> {
        IMMUTABLE_FIELDS
            .into_iter()
            .filter(|field| self.contains(field))
            .map(|field| format!("{field} is immutable"))
            .collect()
    }

    /// Fail with every immutable-field violation if any server-owned field
    /// was sent.
    pub fn ensure_mutable_only(&self) -> Result<(), CoreError> {
        let violations = self.immutable_violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(violations))
        }
    }

    /// Bind the object into typed changes. Unknown keys are ignored; a
    /// mutable field with the wrong JSON type is `CoreError::InvalidFormat`.
    pub fn into_changes(self) -> Result<ItemChanges, CoreError> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| CoreError::InvalidFormat(e.to_string()))
    }
}

/// Run the full pre-fetch pipeline: decode, guard, bind.
pub fn decode_item_patch(body: &[u8]) -> Result<ItemChanges, CoreError> {
    let raw = RawPatch::parse(body)?;
    raw.ensure_mutable_only()?;
    raw.into_changes()
}

// ---------------------------------------------------------------------------
// Changes
// ---------------------------------------------------------------------------

/// The mutable fields of an item, each either absent or supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemChanges {
    pub name: Patch<String>,
    pub brand: Patch<String>,
    pub purchase_price: Patch<i64>,
}

impl ItemChanges {
    /// Names of the supplied fields, in declaration order.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let flags = [
            self.name.is_set(),
            self.brand.is_set(),
            self.purchase_price.is_set(),
        ];
        MUTABLE_FIELDS
            .into_iter()
            .zip(flags)
            .filter_map(|(field, set)| set.then_some(field))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check every supplied field against `limits`, collecting all violations
/// in field order. Absent fields are not checked; stored values are assumed
/// valid.
///
/// A supplied field's merged value is the value in `changes`, so the checks
/// read it from there.
pub fn field_violations(changes: &ItemChanges, limits: &ItemLimits) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(name) = changes.name.as_set() {
        check_text_field("name", name, limits.max_name_length, &mut errors);
    }

    if let Some(brand) = changes.brand.as_set() {
        check_text_field("brand", brand, limits.max_brand_length, &mut errors);
    }

    if let Some(&price) = changes.purchase_price.as_set() {
        if price < limits.min_purchase_price {
            errors.push(format!(
                "purchase_price must be >= {}",
                limits.min_purchase_price
            ));
        }
    }

    errors
}

/// Like [`field_violations`], but as a `Result`.
pub fn validate_changes(changes: &ItemChanges, limits: &ItemLimits) -> Result<(), CoreError> {
    let errors = field_violations(changes, limits);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}
