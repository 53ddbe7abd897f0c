//! Anti-forgery tokens for destructive actions.
//!
//! A token is bound to a token id such as `delete5` (scope prefix plus
//! customer id). Tokens issued by [`HmacCsrfTokenManager`] have the shape
//! `<issued_at>.<nonce>.<mac>`: issue time in Unix seconds, then the hex
//! encoded nonce and HMAC-SHA256 over the token id, issue time and nonce. A
//! token minted for one id never validates for another.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::config::{ConfigError, CsrfConfig};
use crate::customer::CustomerId;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 16;
const GENERATED_KEY_LEN: usize = 32;
/// Lifetime of a token when none is configured.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// A submitted anti-forgery token together with the id it claims to cover.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken {
    id: String,
    value: String,
}

impl CsrfToken {
    /// Creates a token for an arbitrary id.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Creates the token expected when deleting `customer`.
    ///
    /// ```
    /// use customer_guard::{CsrfToken, CustomerId};
    ///
    /// let token = CsrfToken::for_delete("delete", CustomerId(5), "abc");
    /// assert_eq!(token.id(), "delete5");
    /// ```
    pub fn for_delete(scope: &str, customer: CustomerId, value: impl Into<String>) -> Self {
        Self::new(delete_token_id(scope, customer), value)
    }

    /// Returns the token id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the submitted value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfToken")
            .field("id", &self.id)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Returns the token id that protects deleting `customer`.
pub fn delete_token_id(scope: &str, customer: CustomerId) -> String {
    format!("{scope}{customer}")
}

/// Validates anti-forgery tokens.
pub trait CsrfTokenManager {
    /// Returns `true` if `token` is valid for its id.
    fn is_token_valid(&self, token: &CsrfToken) -> bool;
}

/// HMAC-SHA256 token manager.
///
/// Tokens are single-use and expire after the configured TTL. Spent tokens
/// are remembered only until they would have expired anyway. Verification
/// of the MAC is constant-time.
///
/// # Examples
///
/// ```
/// use customer_guard::{CsrfToken, CsrfTokenManager, CustomerId, HmacCsrfTokenManager};
///
/// let tokens = HmacCsrfTokenManager::new(b"signing-key").unwrap();
/// let value = tokens.generate("delete5");
///
/// assert!(!tokens.is_token_valid(&CsrfToken::for_delete("delete", CustomerId(7), value.as_str())));
/// assert!(tokens.is_token_valid(&CsrfToken::for_delete("delete", CustomerId(5), value.as_str())));
/// assert!(!tokens.is_token_valid(&CsrfToken::for_delete("delete", CustomerId(5), value)));
/// ```
pub struct HmacCsrfTokenManager {
    mac: HmacSha256,
    ttl: Duration,
    // token value -> issue time
    spent: RefCell<HashMap<String, u64>>,
}

impl HmacCsrfTokenManager {
    /// Creates a manager signing with `secret`, with [`DEFAULT_TOKEN_TTL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the key is rejected by HMAC.
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| ConfigError::invalid_value("csrf.secret", e.to_string()))?;
        Ok(Self {
            mac,
            ttl: DEFAULT_TOKEN_TTL,
            spent: RefCell::new(HashMap::new()),
        })
    }

    /// Sets how long issued tokens stay valid.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Creates a manager from configuration.
    ///
    /// Without a configured secret a random key is generated, so tokens do
    /// not survive a restart.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn from_config(config: &CsrfConfig) -> Result<Self, ConfigError> {
        let ttl = Duration::from_secs(config.token_ttl_secs);
        let manager = match &config.secret {
            Some(secret) => Self::new(secret.expose_secret().as_bytes()),
            None => {
                tracing::warn!("no csrf.secret configured, using a random per-process key");
                let mut key = [0u8; GENERATED_KEY_LEN];
                rand::thread_rng().fill_bytes(&mut key);
                Self::new(&key)
            }
        }?;
        Ok(manager.with_ttl(ttl))
    }

    /// Issues a fresh token value for `token_id`.
    pub fn generate(&self, token_id: &str) -> String {
        self.generate_at(token_id, unix_now())
    }

    fn generate_at(&self, token_id: &str, issued_at: u64) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let nonce = hex::encode(nonce);

        let signature = self.sign(token_id, issued_at, &nonce).finalize().into_bytes();
        format!("{issued_at}.{nonce}.{}", hex::encode(signature))
    }

    fn sign(&self, token_id: &str, issued_at: u64, nonce: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(token_id.as_bytes());
        mac.update(b"|");
        mac.update(issued_at.to_string().as_bytes());
        mac.update(b"|");
        mac.update(nonce.as_bytes());
        mac
    }

    fn verify_at(&self, token: &CsrfToken, now: u64) -> Result<(), &'static str> {
        let mut parts = token.value().splitn(3, '.');
        let (Some(issued_at), Some(nonce), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err("malformed token");
        };
        let issued_at: u64 = issued_at.parse().map_err(|_| "malformed issue time")?;
        if nonce.len() != NONCE_LEN * 2 {
            return Err("malformed nonce");
        }
        let expected = hex::decode(signature).map_err(|_| "malformed signature")?;
        self.sign(token.id(), issued_at, nonce)
            .verify_slice(&expected)
            .map_err(|_| "signature mismatch")?;
        if self.is_expired(issued_at, now) {
            return Err("token expired");
        }

        let mut spent = self.spent.borrow_mut();
        spent.retain(|_, issued| !self.is_expired(*issued, now));
        if spent.insert(token.value().to_string(), issued_at).is_some() {
            return Err("token already used");
        }
        Ok(())
    }

    fn is_expired(&self, issued_at: u64, now: u64) -> bool {
        now.saturating_sub(issued_at) > self.ttl.as_secs()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

impl CsrfTokenManager for HmacCsrfTokenManager {
    fn is_token_valid(&self, token: &CsrfToken) -> bool {
        match self.verify_at(token, unix_now()) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(token_id = %token.id(), reason, "csrf token rejected");
                false
            }
        }
    }
}

impl fmt::Debug for HmacCsrfTokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacCsrfTokenManager")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .field("spent", &self.spent.borrow().len())
            .finish()
    }
}
