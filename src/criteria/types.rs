//! Criteria types and builders

use chrono::{Duration, Utc};
use serde::Serialize;

/// Comparison operator for a date bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Greater than or equal
    #[serde(rename = "GTE")]
    Gte,
    /// Less than or equal
    #[serde(rename = "LTE")]
    Lte,
}

/// One side of a date range: a date plus its comparison operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBound {
    /// Date in `YYYY-MM-DD` form
    pub date: String,
    /// How the bound compares against the record's date
    pub op: CompareOp,
}

impl DateBound {
    /// Create a `>=` bound
    pub fn gte(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            op: CompareOp::Gte,
        }
    }

    /// Create a `<=` bound
    pub fn lte(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            op: CompareOp::Lte,
        }
    }
}

/// A last-modified date range filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Lower bound, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateBound>,
    /// Upper bound, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateBound>,
}

impl DateRange {
    /// Range between two dates, inclusive on both sides
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(DateBound::gte(from)),
            to: Some(DateBound::lte(to)),
        }
    }

    /// Everything modified on or after a date
    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(DateBound::gte(from)),
            to: None,
        }
    }

    /// Everything modified on or before a date
    pub fn until(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: Some(DateBound::lte(to)),
        }
    }

    /// Everything modified in the last 30 days
    pub fn last_30_days() -> Self {
        let today = Utc::now().date_naive();
        let start = today - Duration::days(30);
        Self::between(
            start.format("%Y-%m-%d").to_string(),
            today.format("%Y-%m-%d").to_string(),
        )
    }
}

/// A sort instruction: field name plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    /// Field to sort by, using the upstream field name
    pub field: String,
    /// Sort descending when true
    pub desc: bool,
}

impl SortField {
    /// Sort ascending by a field
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: false,
        }
    }

    /// Sort descending by a field
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: true,
        }
    }
}

/// Which response fields to include
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    /// Field include-list, using the upstream field names
    pub include: Vec<String>,
}

/// Filter criteria for Content1 product and hierarchy operations
///
/// All filters are optional; an empty criteria set matches everything the
/// subscription can see. Field names serialize to the upstream wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    target_market: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified_date: Option<DateRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    brand_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    gpc_segment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    gpc_category: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    gtin: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldSelection>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    sort_fields: Vec<SortField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    search_after: Option<String>,
}

impl ProductCriteria {
    /// Create an empty criteria set
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by target market (e.g. `"US"`)
    #[must_use]
    pub fn with_target_market(mut self, market: impl Into<String>) -> Self {
        self.target_market = Some(market.into());
        self
    }

    /// Filter by last-modified date range
    #[must_use]
    pub fn with_last_modified_date(mut self, range: DateRange) -> Self {
        self.last_modified_date = Some(range);
        self
    }

    /// Filter by brand name
    #[must_use]
    pub fn with_brand_name(mut self, brand: impl Into<String>) -> Self {
        self.brand_name = Some(brand.into());
        self
    }

    /// Filter by GPC segment code
    #[must_use]
    pub fn with_gpc_segment(mut self, code: impl Into<String>) -> Self {
        self.gpc_segment = Some(code.into());
        self
    }

    /// Filter by GPC category code
    #[must_use]
    pub fn with_gpc_category(mut self, code: impl Into<String>) -> Self {
        self.gpc_category = Some(code.into());
        self
    }

    /// Filter by an explicit GTIN list
    #[must_use]
    pub fn with_gtins<I, S>(mut self, gtins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gtin = gtins.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the response to an include-list of fields
    #[must_use]
    pub fn with_fields<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(FieldSelection {
            include: include.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn with_sort<I>(mut self, sort: I) -> Self
    where
        I: IntoIterator<Item = SortField>,
    {
        self.sort_fields = sort.into_iter().collect();
        self
    }

    /// Merge a continuation token into the criteria, replacing any previous
    /// token. Every other filter is left untouched, so a paginated request
    /// equals the original criteria plus the token.
    #[must_use]
    pub fn with_search_after(mut self, token: impl Into<String>) -> Self {
        self.search_after = Some(token.into());
        self
    }

    /// The continuation token currently merged in, if any
    pub fn search_after(&self) -> Option<&str> {
        self.search_after.as_deref()
    }

    /// The GTIN list filter, if any
    pub fn gtins(&self) -> &[String] {
        &self.gtin
    }

    /// True when no filter at all is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
