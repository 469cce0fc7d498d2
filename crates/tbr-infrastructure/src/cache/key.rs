//! Deterministic cache keys
//!
//! A key is `category:item[:param=value...][:ctx=<fingerprint>]`.
//!
//! - the item and parameter values are trimmed, lowercased and have runs of
//!   whitespace collapsed, so `" Paris  France"` and `"paris france"` share
//!   an entry; `:`, `=` and `%` are percent-encoded so they cannot forge a
//!   segment boundary;
//! - parameters are sorted by name, so insertion order never changes the key;
//! - free-text context is cut to [`CACHE_KEY_CONTEXT_MAX_CHARS`] characters and
//!   replaced by a SHA-256 fingerprint, which keeps keys short while distinct
//!   contexts map to distinct keys.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tbr_domain::constants::{
    CACHE_KEY_CONTEXT_MAX_CHARS, CACHE_KEY_FINGERPRINT_LEN, CACHE_KEY_MAX_LEN,
    CACHE_KEY_SEPARATOR,
};
use tbr_domain::error::{Error, Result};
use tbr_domain::value_objects::CacheCategory;

/// Builder for deterministic cache keys
///
/// # Example
///
/// ```
/// use tbr_domain::CacheCategory;
/// use tbr_infrastructure::cache::CacheKey;
///
/// let key = CacheKey::new(CacheCategory::Pois, "Paris")
///     .with_param("trip_type", "family")
///     .build();
/// assert_eq!(key, "pois:paris:trip_type=family");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    category: CacheCategory,
    item: String,
    params: BTreeMap<String, String>,
    context: Option<String>,
}

impl CacheKey {
    /// Start a key for `item` in `category`
    pub fn new<S: AsRef<str>>(category: CacheCategory, item: S) -> Self {
        Self {
            category,
            item: normalize(item.as_ref()),
            params: BTreeMap::new(),
            context: None,
        }
    }

    /// Add a contextual parameter (trip type, language, radius...)
    pub fn with_param<K: AsRef<str>, V: AsRef<str>>(mut self, name: K, value: V) -> Self {
        self.params
            .insert(normalize(name.as_ref()), normalize(value.as_ref()));
        self
    }

    /// Add free-text context; blank text leaves the key unchanged
    pub fn with_context<S: AsRef<str>>(mut self, context: S) -> Self {
        let truncated: String = context
            .as_ref()
            .trim()
            .chars()
            .take(CACHE_KEY_CONTEXT_MAX_CHARS)
            .collect();
        self.context = (!truncated.is_empty()).then_some(truncated);
        self
    }

    /// Category of this key
    pub fn category(&self) -> CacheCategory {
        self.category
    }

    /// Render the key
    pub fn build(&self) -> String {
        let sep = CACHE_KEY_SEPARATOR;
        let mut key = format!("{}{sep}{}", self.category.as_str(), self.item);

        for (name, value) in &self.params {
            key.push(sep);
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }

        if let Some(context) = &self.context {
            key.push(sep);
            key.push_str("ctx=");
            key.push_str(&fingerprint(context));
        }

        if key.len() > CACHE_KEY_MAX_LEN {
            // Keep the category readable, fingerprint the rest
            return format!("{}{sep}{}", self.category.as_str(), fingerprint(&key));
        }
        key
    }

    /// Category encoded in a rendered key, if any
    pub fn category_of(key: &str) -> Option<CacheCategory> {
        key.split(CACHE_KEY_SEPARATOR)
            .next()
            .and_then(|segment| segment.parse().ok())
    }

    /// Validate a rendered key
    pub fn validate(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("Cache key cannot be empty"));
        }

        if key.len() > CACHE_KEY_MAX_LEN {
            return Err(Error::invalid_argument(format!(
                "Cache key too long (max {CACHE_KEY_MAX_LEN} characters)"
            )));
        }

        if key.chars().any(char::is_control) {
            return Err(Error::invalid_argument(
                "Cache key contains invalid characters",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build())
    }
}

/// Lowercase, collapse whitespace, and percent-encode the characters that
/// carry meaning in the key layout
///
/// The encoding is reversible, so distinct segments stay distinct keys.
fn normalize(segment: &str) -> String {
    let collapsed = segment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut normalized = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if c == CACHE_KEY_SEPARATOR || c == '=' || c == '%' || c.is_control() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                normalized.push_str(&format!("%{byte:02X}"));
            }
        } else {
            normalized.push(c);
        }
    }
    normalized
}

fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(CACHE_KEY_FINGERPRINT_LEN);
    hex
}
