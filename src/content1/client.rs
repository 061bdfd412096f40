//! Content1 client

use crate::auth::{generate_timestamp, Content1Signer};
use crate::config::ClientConfig;
use crate::criteria::{DateRange, ProductCriteria};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{self, PageState};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{CountEnvelope, HierarchyResults, ProductResults};

const FETCH_PATH: &str = "V1/product/fetch";
const COUNT_PATH: &str = "V1/product/count";
const HIERARCHY_PATH: &str = "V1/product/hierarchy/fetch";

/// Client for the header-signed Content1 surface
#[derive(Debug)]
pub struct Content1Client {
    http: HttpClient,
    signer: Content1Signer,
    app_id: String,
}

impl Content1Client {
    /// Create a client from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config.content1_url(), config.timeout(), config.user_agent())?,
            signer: Content1Signer::new(
                config.app_id(),
                config.secret_key(),
                config.gln().map(str::to_string),
            )?,
            app_id: config.app_id().to_string(),
        })
    }

    /// Fetch one page of products matching the criteria
    pub async fn fetch_products(
        &self,
        criteria: &ProductCriteria,
        page_size: Option<u32>,
    ) -> Result<ProductResults> {
        debug!(page_size, "content1 product fetch");
        self.post(FETCH_PATH, page_size, criteria).await
    }

    /// Count products matching the criteria without fetching them
    pub async fn count_products(&self, criteria: &ProductCriteria) -> Result<u64> {
        let envelope: CountEnvelope = self.post(COUNT_PATH, None, criteria).await?;
        Ok(envelope.count())
    }

    /// Fetch products for an explicit GTIN list
    ///
    /// Fails before sending anything when the list is empty.
    pub async fn fetch_products_by_gtin<I, S>(&self, gtins: I) -> Result<ProductResults>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let criteria = ProductCriteria::new().with_gtins(gtins);
        if criteria.gtins().is_empty() {
            return Err(Error::config("GTIN list must not be empty"));
        }
        self.fetch_products(&criteria, None).await
    }

    /// Fetch products for a target market
    pub async fn fetch_products_by_target_market(
        &self,
        target_market: &str,
        page_size: Option<u32>,
    ) -> Result<ProductResults> {
        let criteria = ProductCriteria::new().with_target_market(target_market);
        self.fetch_products(&criteria, page_size).await
    }

    /// Fetch products modified within a date range, optionally narrowed to
    /// a target market
    pub async fn fetch_products_by_date_range(
        &self,
        from_date: &str,
        to_date: &str,
        target_market: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<ProductResults> {
        let mut criteria =
            ProductCriteria::new().with_last_modified_date(DateRange::between(from_date, to_date));
        if let Some(market) = target_market {
            criteria = criteria.with_target_market(market);
        }
        self.fetch_products(&criteria, page_size).await
    }

    /// Fetch products modified in the last 30 days
    pub async fn fetch_products_last_30_days(
        &self,
        target_market: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<ProductResults> {
        let mut criteria =
            ProductCriteria::new().with_last_modified_date(DateRange::last_30_days());
        if let Some(market) = target_market {
            criteria = criteria.with_target_market(market);
        }
        self.fetch_products(&criteria, page_size).await
    }

    /// Fetch one page of packaging hierarchies matching the criteria
    pub async fn fetch_hierarchies(
        &self,
        criteria: &ProductCriteria,
        page_size: Option<u32>,
    ) -> Result<HierarchyResults> {
        debug!(page_size, "content1 hierarchy fetch");
        self.post(HIERARCHY_PATH, page_size, criteria).await
    }

    /// Fetch the product page after `previous`
    ///
    /// The new request's criteria equal `original_criteria` with the
    /// continuation token merged in; every other filter is unchanged. Fails
    /// with a pagination error when `previous` was the final page.
    pub async fn fetch_next_page(
        &self,
        previous: &ProductResults,
        original_criteria: &ProductCriteria,
        page_size: Option<u32>,
    ) -> Result<ProductResults> {
        let token = pagination::next_token(previous)?;
        let criteria = original_criteria.clone().with_search_after(token);
        self.fetch_products(&criteria, page_size).await
    }

    /// Fetch the hierarchy page after `previous`, with the same token
    /// semantics as [`fetch_next_page`](Self::fetch_next_page)
    pub async fn fetch_next_hierarchy_page(
        &self,
        previous: &HierarchyResults,
        original_criteria: &ProductCriteria,
        page_size: Option<u32>,
    ) -> Result<HierarchyResults> {
        let token = pagination::next_token(previous)?;
        let criteria = original_criteria.clone().with_search_after(token);
        self.fetch_hierarchies(&criteria, page_size).await
    }

    /// A lazy, forward-only page sequence over products
    pub fn product_pager(
        &self,
        criteria: ProductCriteria,
        page_size: Option<u32>,
    ) -> ProductPager<'_> {
        ProductPager {
            client: self,
            criteria,
            page_size,
            next: None,
            started: false,
            exhausted: false,
        }
    }

    /// A lazy, forward-only page sequence over hierarchies
    pub fn hierarchy_pager(
        &self,
        criteria: ProductCriteria,
        page_size: Option<u32>,
    ) -> HierarchyPager<'_> {
        HierarchyPager {
            client: self,
            criteria,
            page_size,
            next: None,
            started: false,
            exhausted: false,
        }
    }

    /// Sign and send one POST. The signed URI binds `appId`, the optional
    /// `pageSize`, and a fresh `timestamp`; the criteria travel as the JSON
    /// body.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        page_size: Option<u32>,
        criteria: &ProductCriteria,
    ) -> Result<T> {
        let timestamp = generate_timestamp();
        let uri = match page_size {
            Some(size) => format!(
                "/{path}?appId={}&pageSize={size}&timestamp={timestamp}",
                self.app_id
            ),
            None => format!("/{path}?appId={}&timestamp={timestamp}", self.app_id),
        };
        let headers = self.signer.auth_headers(&uri)?;
        let body = serde_json::to_value(criteria)?;
        self.http.post_json(&uri, &headers, &body).await
    }
}

/// Lazy, forward-only walk over Content1 product pages
///
/// Once advanced past a page there is no way back; re-fetching means
/// starting a new pager from the original criteria.
pub struct ProductPager<'a> {
    client: &'a Content1Client,
    criteria: ProductCriteria,
    page_size: Option<u32>,
    next: Option<String>,
    started: bool,
    exhausted: bool,
}

impl ProductPager<'_> {
    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> Result<Option<ProductResults>> {
        if self.exhausted {
            return Ok(None);
        }

        let criteria = if !self.started {
            self.criteria.clone()
        } else if let Some(token) = self.next.take() {
            self.criteria.clone().with_search_after(token)
        } else {
            self.exhausted = true;
            return Ok(None);
        };

        self.started = true;
        let page = self.client.fetch_products(&criteria, self.page_size).await?;
        match PageState::of(&page) {
            PageState::HasMore => self.next = page.search_after.clone(),
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

/// Lazy, forward-only walk over Content1 hierarchy pages
pub struct HierarchyPager<'a> {
    client: &'a Content1Client,
    criteria: ProductCriteria,
    page_size: Option<u32>,
    next: Option<String>,
    started: bool,
    exhausted: bool,
}

impl HierarchyPager<'_> {
    /// Fetch the next page, or `None` once the sequence is exhausted
    pub async fn next_page(&mut self) -> Result<Option<HierarchyResults>> {
        if self.exhausted {
            return Ok(None);
        }

        let criteria = if !self.started {
            self.criteria.clone()
        } else if let Some(token) = self.next.take() {
            self.criteria.clone().with_search_after(token)
        } else {
            self.exhausted = true;
            return Ok(None);
        };

        self.started = true;
        let page = self
            .client
            .fetch_hierarchies(&criteria, self.page_size)
            .await?;
        match PageState::of(&page) {
            PageState::HasMore => self.next = page.search_after.clone(),
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
