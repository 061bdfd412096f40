//! Marketplace response envelopes and product accessors

use crate::mapping::{de_opt_u64, json_at, str_at};
use crate::pagination::Paged;
use serde::Deserialize;
use serde_json::Value;

/// Response envelope for marketplace searches
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Upstream response code (`"0"` on success)
    #[serde(default)]
    pub response_code: Option<String>,

    /// Upstream response message
    #[serde(default)]
    pub response_message: Option<String>,

    /// Total matches across all pages, when reported
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub total_num_of_results: Option<u64>,

    /// Products on this page
    #[serde(default)]
    pub results: Vec<Product>,

    /// Continuation token for the next page, absent on the final page
    #[serde(default)]
    pub next_cursor_mark: Option<String>,
}

impl SearchResults {
    /// Number of products on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when this page carries no products
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the products on this page
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.results.iter()
    }
}

impl Paged for SearchResults {
    fn continuation_token(&self) -> Option<&str> {
        self.next_cursor_mark.as_deref()
    }

    fn item_count(&self) -> usize {
        self.results.len()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// One product identifier from the item document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdentifier {
    /// Identifier scheme (e.g. `GTIN`, `UPC`)
    pub id_type: String,
    /// The identifier value
    pub value: String,
    /// Whether the upstream marks this identifier as primary
    pub primary: bool,
}

/// A marketplace product document
///
/// The upstream item payload is deeply nested and sparsely populated, so
/// this is a thin wrapper over the raw JSON with best-effort accessors.
/// Absent fields read as `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Product(Value);

impl Product {
    /// The raw product document
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The nested `item` document
    pub fn item(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get("item").unwrap_or(&NULL)
    }

    /// All identifiers attached to the item
    pub fn identifiers(&self) -> Vec<ItemIdentifier> {
        let Some(entries) = json_at(
            self.item(),
            "itemIdentificationInformation.itemIdentifier",
        )
        .and_then(Value::as_array) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                let value = str_at(entry, "itemId")?;
                Some(ItemIdentifier {
                    id_type: str_at(entry, "itemIdType.value").unwrap_or("").to_string(),
                    value: value.to_string(),
                    primary: str_at(entry, "isPrimary") == Some("true"),
                })
            })
            .collect()
    }

    /// The primary item identifier, falling back to the first one listed
    pub fn item_id(&self) -> Option<String> {
        let identifiers = self.identifiers();
        identifiers
            .iter()
            .find(|id| id.primary)
            .or_else(|| identifiers.first())
            .map(|id| id.value.clone())
    }

    /// Brand name from the trade item description module
    pub fn brand_name(&self) -> Option<&str> {
        str_at(
            self.item(),
            "tradeItemInformation.0.tradeItemDescriptionModule.tradeItemDescriptionInformation.0.brandNameInformation.brandName",
        )
    }

    /// Regulated product name, when present
    pub fn product_name(&self) -> Option<&str> {
        str_at(
            self.item(),
            "tradeItemInformation.0.tradeItemDescriptionModule.tradeItemDescriptionInformation.0.regulatedProductName.0.statement.values.0.value",
        )
    }
}
