//! Marketplace search client

use crate::auth::{generate_timestamp, MarketplaceSigner, QUERY_VALUE};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{self, PageState};
use percent_encoding::utf8_percent_encode;
use tracing::debug;

use super::models::{Product, SearchResults};

const PRODUCTS_PATH: &str = "V2/products";

/// Operation type for a marketplace search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Free-text search across the catalog
    FreeText,
    /// Field-qualified search (`field:value`)
    Advanced,
}

impl SearchType {
    /// The wire name of the operation type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FreeText => "freeTextSearch",
            Self::Advanced => "advancedSearch",
        }
    }
}

/// One marketplace search, ready to be signed and sent
///
/// A request is re-sent verbatim on every pagination step; only the
/// `cursorMark` parameter is added or overwritten between pages.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    search_type: SearchType,
    query: String,
    access_mdm: String,
    rows: Option<u32>,
    cursor_mark: Option<String>,
    geo_location: Option<(f64, f64)>,
}

impl SearchRequest {
    /// A free-text search for the given term
    pub fn free_text(query: impl Into<String>) -> Self {
        Self {
            search_type: SearchType::FreeText,
            query: query.into(),
            access_mdm: "computer".to_string(),
            rows: None,
            cursor_mark: None,
            geo_location: None,
        }
    }

    /// A field-qualified search
    ///
    /// The field name is caller-supplied on purpose: the upstream contract
    /// for queryable field names is not reliably documented, so this crate
    /// never guesses one.
    pub fn advanced(field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let query = format!("{}:{}", field.as_ref(), value.as_ref());
        Self {
            search_type: SearchType::Advanced,
            ..Self::free_text(query)
        }
    }

    /// Limit the number of results per page
    #[must_use]
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Override the `access_mdm` parameter (defaults to `computer`)
    #[must_use]
    pub fn with_access_mdm(mut self, access_mdm: impl Into<String>) -> Self {
        self.access_mdm = access_mdm.into();
        self
    }

    /// Attach a geolocation pair (latitude, longitude)
    #[must_use]
    pub fn with_geo_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.geo_location = Some((latitude, longitude));
        self
    }

    /// Merge a continuation token into the request, replacing any previous
    /// one
    #[must_use]
    pub fn with_cursor_mark(mut self, token: impl Into<String>) -> Self {
        self.cursor_mark = Some(token.into());
        self
    }

    /// The continuation token currently merged in, if any
    pub fn cursor_mark(&self) -> Option<&str> {
        self.cursor_mark.as_deref()
    }

    /// Reject malformed requests before anything is signed or sent
    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::config("search query must not be empty"));
        }
        if self.search_type == SearchType::Advanced {
            match self.query.split_once(':') {
                Some((field, _)) if !field.trim().is_empty() => {}
                _ => {
                    return Err(Error::config(
                        "advanced search needs a non-empty field name before the ':'",
                    ))
                }
            }
        }
        Ok(())
    }
}

/// Client for the query-string-signed marketplace search surface
#[derive(Debug)]
pub struct MarketplaceClient {
    http: HttpClient,
    signer: MarketplaceSigner,
    app_id: String,
}

impl MarketplaceClient {
    /// Create a client from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(
                config.marketplace_url(),
                config.timeout(),
                config.user_agent(),
            )?,
            signer: MarketplaceSigner::new(config.secret_key())?,
            app_id: config.app_id().to_string(),
        })
    }

    /// Free-text search with default options
    pub async fn free_text_search(&self, query: &str) -> Result<SearchResults> {
        self.search(&SearchRequest::free_text(query)).await
    }

    /// Field-qualified search; the field name is caller-supplied
    pub async fn advanced_search(&self, field: &str, value: &str) -> Result<SearchResults> {
        if field.trim().is_empty() {
            return Err(Error::config(
                "advanced search field name must not be empty",
            ));
        }
        self.search(&SearchRequest::advanced(field, value)).await
    }

    /// Execute a search request
    ///
    /// Each call is independent: a fresh timestamp is generated and the
    /// request is signed from scratch, so repeating a call never reuses a
    /// signature.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        request.validate()?;
        let timestamp = generate_timestamp();
        let uri = self.signed_search_uri(request, &timestamp)?;
        debug!(search_type = request.search_type.as_str(), "marketplace search");
        self.http.get_json(&uri).await
    }

    /// Fetch one product document by its item identifier
    pub async fn get_product(&self, item_id: &str) -> Result<Product> {
        if item_id.trim().is_empty() {
            return Err(Error::config("item id must not be empty"));
        }

        let timestamp = generate_timestamp();
        let path = format!("{PRODUCTS_PATH}/{item_id}");
        let canonical = format!("/{path}?app_id={}&TIMESTAMP={timestamp}", self.app_id);
        let signature = self.signer.sign_for_url(&canonical)?;
        let uri = format!(
            "/{path}?app_id={}&TIMESTAMP={}&hash_code={signature}",
            self.app_id,
            utf8_percent_encode(&timestamp, QUERY_VALUE),
        );
        self.http.get_json(&uri).await
    }

    /// Fetch the page after `previous`, re-issuing the original request
    /// with the continuation token merged in
    ///
    /// Fails with a pagination error when `previous` was the final page;
    /// check the page state via [`Paged`](crate::pagination::Paged) or use
    /// a [`SearchPager`] to avoid that.
    pub async fn next_page(
        &self,
        previous: &SearchResults,
        original: &SearchRequest,
    ) -> Result<SearchResults> {
        let token = pagination::next_token(previous)?;
        let request = original.clone().with_cursor_mark(token);
        self.search(&request).await
    }

    /// A lazy, forward-only page sequence for a search request
    pub fn pager(&self, request: SearchRequest) -> SearchPager<'_> {
        SearchPager {
            client: self,
            request,
            next: None,
            started: false,
            exhausted: false,
        }
    }

    /// Build the signed path+query: sign the canonical (raw) form, then
    /// emit the transport (encoded) form with `hash_code` appended last
    fn signed_search_uri(&self, request: &SearchRequest, timestamp: &str) -> Result<String> {
        let canonical = self.search_query(request, timestamp, false);
        let signature = self.signer.sign_for_url(&canonical)?;
        let mut uri = self.search_query(request, timestamp, true);
        uri.push_str("&hash_code=");
        uri.push_str(&signature);
        Ok(uri)
    }

    /// Assemble the query string in signing order. The canonical form uses
    /// raw parameter values; the transport form percent-encodes them. Both
    /// use the same parameter order, since the signature binds the exact
    /// sequence.
    fn search_query(&self, request: &SearchRequest, timestamp: &str, encode: bool) -> String {
        let enc = |value: &str| -> String {
            if encode {
                utf8_percent_encode(value, QUERY_VALUE).to_string()
            } else {
                value.to_string()
            }
        };

        let mut query = format!(
            "/{PRODUCTS_PATH}?app_id={}&searchType={}&query={}&access_mdm={}",
            self.app_id,
            request.search_type.as_str(),
            enc(&request.query),
            request.access_mdm,
        );
        if let Some(mark) = &request.cursor_mark {
            query.push_str(&format!("&cursorMark={}", enc(mark)));
        }
        if let Some(rows) = request.rows {
            query.push_str(&format!("&rows={rows}"));
        }
        query.push_str(&format!("&TIMESTAMP={}", enc(timestamp)));
        if let Some((latitude, longitude)) = request.geo_location {
            query.push_str(&format!(
                "&geo_loc_access_latd={latitude}&geo_loc_access_long={longitude}"
            ));
        }
        query
    }
}

/// Lazy, forward-only walk over marketplace search pages
///
/// Once advanced past a page there is no way back; re-fetching means
/// starting a new pager from the original request.
pub struct SearchPager<'a> {
    client: &'a MarketplaceClient,
    request: SearchRequest,
    next: Option<String>,
    started: bool,
    exhausted: bool,
}

impl SearchPager<'_> {
    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> Result<Option<SearchResults>> {
        if self.exhausted {
            return Ok(None);
        }

        let request = if !self.started {
            self.request.clone()
        } else if let Some(token) = self.next.take() {
            self.request.clone().with_cursor_mark(token)
        } else {
            self.exhausted = true;
            return Ok(None);
        };

        self.started = true;
        let page = self.client.search(&request).await?;
        match PageState::of(&page) {
            PageState::HasMore => self.next = page.next_cursor_mark.clone(),
            PageState::Exhausted => self.exhausted = true,
        }
        Ok(Some(page))
    }

    /// Current state of the sequence
    pub fn state(&self) -> PageState {
        if self.exhausted {
            PageState::Exhausted
        } else {
            PageState::HasMore
        }
    }
}
