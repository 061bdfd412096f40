//! HMAC-SHA256 signer implementations

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// URI-component encoding: everything except ASCII alphanumerics and `-._~`
/// is percent-encoded. Matches what the Content1 surface expects to have
/// been applied to the canonical string before hashing.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encoding for query parameter values in the final request URL. Same as
/// [`COMPONENT`] except `/` is kept, matching how the upstream expects
/// search terms and timestamps to arrive.
pub(crate) const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Format a timestamp the way both surfaces require: `YYYY-MM-DDThh:mm:ssZ`,
/// UTC, second precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Generate a signing timestamp for the current instant
pub fn generate_timestamp() -> String {
    format_timestamp(Utc::now())
}

fn hmac_base64(secret_key: &str, message: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| Error::config(format!("failed to create HMAC: {e}")))?;
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

fn require_secret(secret_key: &str) -> Result<()> {
    if secret_key.trim().is_empty() {
        return Err(Error::missing_credential("secret_key"));
    }
    Ok(())
}

/// Signer for the marketplace search surface
///
/// The signature proves possession of the secret key: HMAC-SHA256 over the
/// UTF-8 bytes of the canonical path+query string, keyed by the secret key's
/// UTF-8 bytes, base64-encoded. A signature binds the exact byte sequence it
/// was computed over; reordering any parameter or reusing an old timestamp
/// invalidates it.
#[derive(Clone)]
pub struct MarketplaceSigner {
    secret_key: String,
}

impl MarketplaceSigner {
    /// Create a signer, failing fast when the secret key is empty
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        let secret_key = secret_key.into();
        require_secret(&secret_key)?;
        Ok(Self { secret_key })
    }

    /// Sign a canonical string, returning the base64 digest
    pub fn sign(&self, canonical: &str) -> Result<String> {
        hmac_base64(&self.secret_key, canonical)
    }

    /// Sign a canonical string and percent-encode the digest for use as a
    /// URL query parameter, with `/` explicitly encoded as `%2F`
    pub fn sign_for_url(&self, canonical: &str) -> Result<String> {
        let signature = self.sign(canonical)?;
        Ok(utf8_percent_encode(&signature, COMPONENT).to_string())
    }
}

impl std::fmt::Debug for MarketplaceSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceSigner").finish_non_exhaustive()
    }
}

/// Signer for the Content1 surface
///
/// Unlike [`MarketplaceSigner`], the canonical string itself is
/// URI-component-encoded before hashing, and the signature travels in the
/// `hashcode` header next to `appid` and the optional `gln`.
#[derive(Clone)]
pub struct Content1Signer {
    app_id: String,
    secret_key: String,
    gln: Option<String>,
}

impl Content1Signer {
    /// Create a signer, failing fast when the secret key is empty
    pub fn new(
        app_id: impl Into<String>,
        secret_key: impl Into<String>,
        gln: Option<String>,
    ) -> Result<Self> {
        let secret_key = secret_key.into();
        require_secret(&secret_key)?;
        Ok(Self {
            app_id: app_id.into(),
            secret_key,
            gln,
        })
    }

    /// Sign a path+query URI, returning the base64 digest of the HMAC over
    /// the percent-encoded URI
    pub fn sign(&self, uri: &str) -> Result<String> {
        let encoded = utf8_percent_encode(uri, COMPONENT).to_string();
        hmac_base64(&self.secret_key, &encoded)
    }

    /// Build the full header set for a signed request: content negotiation,
    /// `appid`, `hashcode`, and `gln` when configured
    pub fn auth_headers(&self, uri: &str) -> Result<Vec<(&'static str, String)>> {
        let hash_code = self.sign(uri)?;

        let mut headers = vec![
            ("Content-Type", "application/json".to_string()),
            ("accept", "application/json".to_string()),
            ("appid", self.app_id.clone()),
            ("hashcode", hash_code),
        ];
        if let Some(gln) = &self.gln {
            headers.push(("gln", gln.clone()));
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for Content1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Content1Signer")
            .field("app_id", &self.app_id)
            .field("gln", &self.gln)
            .finish_non_exhaustive()
    }
}
