//! Session adapter that signs attachment download links.
//!
//! The file server only honours download links carrying the page id, an
//! expiry and an HMAC-SHA256 over `guid + expires` keyed by the session's
//! auth token.

use std::time::Duration;

use hmac::{Hmac, Mac};
use mockable::Clock;
use sha2::Sha256;
use url::Url;

use crate::message::{error::AttachmentError, ports::SessionContext};

type HmacSha256 = Hmac<Sha256>;

/// Path under the server URL where stored files are served.
const DOWNLOAD_PATH: [&str; 4] = ["l", "v", "m", "download"];

/// Credentials and link policy for a [`SignedSession`].
///
/// # Examples
///
/// ```
/// use palaver::message::adapters::SignedSessionConfig;
/// use std::time::Duration;
///
/// let config = SignedSessionConfig::new("page-1", "token");
/// assert_eq!(config.link_ttl, Duration::from_secs(300));
///
/// let short = config.with_link_ttl(Duration::from_secs(30));
/// assert_eq!(short.link_ttl, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSessionConfig {
    /// Page identifier of the bound visitor session.
    pub page_id: String,
    /// Secret used to sign download links.
    pub auth_token: String,
    /// How long a signed link stays valid.
    pub link_ttl: Duration,
}

impl SignedSessionConfig {
    /// Default link lifetime.
    pub const DEFAULT_LINK_TTL: Duration = Duration::from_secs(300);

    /// Creates a configuration with the default link lifetime.
    #[must_use]
    pub fn new(page_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            auth_token: auth_token.into(),
            link_ttl: Self::DEFAULT_LINK_TTL,
        }
    }

    /// Overrides the link lifetime.
    #[must_use]
    pub const fn with_link_ttl(mut self, link_ttl: Duration) -> Self {
        self.link_ttl = link_ttl;
        self
    }
}

/// A live session able to sign attachment links.
#[derive(Debug, Clone)]
pub struct SignedSession<C: Clock + Send + Sync> {
    config: SignedSessionConfig,
    clock: C,
}

impl<C: Clock + Send + Sync> SignedSession<C> {
    /// Creates a session adapter.
    #[must_use]
    pub const fn new(config: SignedSessionConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SignedSessionConfig {
        &self.config
    }

    fn expires_at(&self) -> i64 {
        let ttl = i64::try_from(self.config.link_ttl.as_secs()).unwrap_or(i64::MAX);
        self.clock.utc().timestamp().saturating_add(ttl)
    }
}

impl<C: Clock + Send + Sync> SessionContext for SignedSession<C> {
    fn file_url(
        &self,
        server_url: &str,
        guid: &str,
        file_name: &str,
    ) -> Result<String, AttachmentError> {
        let invalid = || AttachmentError::InvalidServerUrl(server_url.to_owned());
        let mut url = Url::parse(server_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(DOWNLOAD_PATH)
            .push(guid)
            .push(file_name);

        let expires = self.expires_at();
        let hash = sign(&self.config.auth_token, &format!("{guid}{expires}"))?;
        url.query_pairs_mut()
            .append_pair("page-id", &self.config.page_id)
            .append_pair("expires", &expires.to_string())
            .append_pair("hash", &hash);

        Ok(url.into())
    }
}

/// Hex-encoded HMAC-SHA256 of `data` keyed by `key`.
pub(crate) fn sign(key: &str, data: &str) -> Result<String, AttachmentError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| AttachmentError::signing(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
