//! Content1 response envelopes and record accessors

use crate::mapping::{de_opt_u64, str_at};
use crate::pagination::Paged;
use serde::Deserialize;
use serde_json::Value;

/// Response envelope for product fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResults {
    /// Products on this page
    #[serde(default)]
    pub items: Vec<ProductRecord>,

    /// Continuation token for the next page, absent on the final page
    #[serde(default)]
    pub search_after: Option<String>,

    /// Total matches across all pages, when reported
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub total_num_of_results: Option<u64>,
}

impl ProductResults {
    /// Number of products on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when this page carries no products
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the products on this page
    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.items.iter()
    }
}

impl Paged for ProductResults {
    fn continuation_token(&self) -> Option<&str> {
        self.search_after.as_deref()
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl<'a> IntoIterator for &'a ProductResults {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A GS1 trade item identification key (code + value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gs1IdentificationKey {
    /// Key code (e.g. `GTIN_13`)
    pub code: String,
    /// Key value
    pub value: String,
}

/// One product record from a Content1 fetch
///
/// The well-known envelope fields are typed; everything inside the `item`
/// document is read best-effort, preferring the nested field and falling
/// back to the envelope-level one, with `None` for anything absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    gtin: Option<String>,

    #[serde(default, rename = "informationProviderGLN")]
    information_provider_gln: Option<String>,

    #[serde(default, rename = "targetMarket")]
    target_market: Option<String>,

    #[serde(default, rename = "lastModifiedDate")]
    last_modified_date: Option<String>,

    #[serde(default)]
    item: Value,
}

impl ProductRecord {
    /// The nested item document
    pub fn item(&self) -> &Value {
        &self.item
    }

    /// The product GTIN
    pub fn gtin(&self) -> Option<&str> {
        str_at(&self.item, "gtin").or(self.gtin.as_deref())
    }

    /// The information provider GLN
    pub fn information_provider_gln(&self) -> Option<&str> {
        str_at(&self.item, "informationProviderGLN")
            .or(self.information_provider_gln.as_deref())
    }

    /// The target market
    pub fn target_market(&self) -> Option<&str> {
        str_at(&self.item, "targetMarket").or(self.target_market.as_deref())
    }

    /// Last modification date as reported by the upstream
    pub fn last_modified_date(&self) -> Option<&str> {
        str_at(&self.item, "lastModifiedDate").or(self.last_modified_date.as_deref())
    }

    /// Brand name
    pub fn brand_name(&self) -> Option<&str> {
        str_at(&self.item, "brandName")
    }

    /// GPC category code, from either the classification object or the
    /// flat field
    pub fn gpc_category_code(&self) -> Option<&str> {
        str_at(&self.item, "globalClassificationCategory.code")
            .or_else(|| str_at(&self.item, "gpcCategory"))
    }

    /// GPC category name, when the classification object carries one
    pub fn gpc_category_name(&self) -> Option<&str> {
        str_at(&self.item, "globalClassificationCategory.name")
    }

    /// First GTIN name entry
    pub fn gtin_name(&self) -> Option<&str> {
        str_at(&self.item, "gtinName.0.value")
    }

    /// First GS1 trade item identification key
    pub fn gs1_identification_key(&self) -> Option<Gs1IdentificationKey> {
        let entry = crate::mapping::json_at(&self.item, "gs1TradeItemIdentificationKey.0")?;
        Some(Gs1IdentificationKey {
            code: str_at(entry, "code").unwrap_or("").to_string(),
            value: str_at(entry, "value").unwrap_or("").to_string(),
        })
    }

    /// First alternate classification code
    pub fn alternate_classification_code(&self) -> Option<&str> {
        str_at(&self.item, "alternateClassification.0.code")
    }

    /// Ingredient statement for food and beverage items
    pub fn ingredient_statement(&self) -> Option<&str> {
        str_at(&self.item, "ingredientStatement.0.statement.0.value")
    }

    /// Allergen statement for food and beverage items
    pub fn allergen_statement(&self) -> Option<&str> {
        str_at(
            &self.item,
            "allergenRelatedInformation.0.allergenStatement.0.value",
        )
    }
}

/// Response envelope for hierarchy fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyResults {
    /// Hierarchies on this page
    #[serde(default)]
    pub hierarchies: Vec<HierarchyRecord>,

    /// Continuation token for the next page, absent on the final page
    #[serde(default)]
    pub search_after: Option<String>,
}

impl HierarchyResults {
    /// Number of hierarchies on this page
    pub fn len(&self) -> usize {
        self.hierarchies.len()
    }

    /// True when this page carries no hierarchies
    pub fn is_empty(&self) -> bool {
        self.hierarchies.is_empty()
    }

    /// Iterate over the hierarchies on this page
    pub fn iter(&self) -> std::slice::Iter<'_, HierarchyRecord> {
        self.hierarchies.iter()
    }
}

impl Paged for HierarchyResults {
    fn continuation_token(&self) -> Option<&str> {
        self.search_after.as_deref()
    }

    fn item_count(&self) -> usize {
        self.hierarchies.len()
    }
}

/// One packaging hierarchy for a GTIN in a target market
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyRecord {
    /// Root GTIN of the hierarchy
    #[serde(default)]
    pub gtin: Option<String>,

    /// The information provider GLN
    #[serde(default, rename = "informationProviderGLN")]
    pub information_provider_gln: Option<String>,

    /// The target market
    #[serde(default, rename = "targetMarket")]
    pub target_market: Option<String>,

    /// Nested hierarchy levels
    #[serde(default)]
    pub hierarchy: Vec<HierarchyLevel>,
}

/// One level of a packaging hierarchy
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyLevel {
    /// GTIN of the containing level
    #[serde(default, rename = "parentGtin")]
    pub parent_gtin: Option<String>,

    /// GTIN at this level
    #[serde(default)]
    pub gtin: Option<String>,

    /// How many of this GTIN the parent contains
    #[serde(default)]
    pub quantity: Option<u64>,

    /// Child levels
    #[serde(default)]
    pub children: Vec<HierarchyLevel>,
}

/// Count responses arrive either as a bare number or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CountEnvelope {
    Bare(u64),
    Object {
        #[serde(alias = "totalNumOfResults", alias = "numberOfResults")]
        count: u64,
    },
}

impl CountEnvelope {
    pub(crate) fn count(&self) -> u64 {
        match self {
            Self::Bare(n) => *n,
            Self::Object { count } => *count,
        }
    }
}
