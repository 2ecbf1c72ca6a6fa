//! Service configuration.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use paydesk_core::{Currency, PhoneNumberPolicy, DEFAULT_ACCEPTED_CURRENCIES};

use crate::stripe::StripeClient;

/// Which storage backend the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// `RocksDB` under `data_dir`.
    RocksDb,
    /// Process-local maps; data is lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/paydesk").
    pub data_dir: String,

    /// Storage backend (default: `RocksDb`).
    pub storage_backend: StorageBackend,

    /// Stripe API key (optional). Without one, charges go to the sandbox.
    pub stripe_api_key: Option<String>,

    /// Stripe API base URL.
    pub stripe_api_base: String,

    /// Currencies accepted for charging.
    pub accepted_currencies: Vec<Currency>,

    /// Phone number rules for registration.
    pub phone_policy: PhoneNumberPolicy,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    api_key: String,
    #[serde(default)]
    api_base: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (stripe_api_key, stripe_api_base) = load_stripe_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            storage_backend: std::env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| {
                    s.parse()
                        .map_err(|e: String| tracing::warn!(error = %e, "Ignoring STORAGE_BACKEND"))
                        .ok()
                })
                .unwrap_or(defaults.storage_backend),
            stripe_api_key,
            stripe_api_base: stripe_api_base.unwrap_or(defaults.stripe_api_base),
            accepted_currencies: std::env::var("ACCEPTED_CURRENCIES")
                .ok()
                .and_then(|s| parse_currencies(&s))
                .unwrap_or(defaults.accepted_currencies),
            phone_policy: std::env::var("PHONE_COUNTRY_CODES")
                .ok()
                .and_then(|s| parse_country_codes(&s))
                .map_or(defaults.phone_policy, |country_codes| PhoneNumberPolicy {
                    country_codes,
                    ..PhoneNumberPolicy::default()
                }),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

/// Parse a comma-separated currency list such as `"USD,GBP"`.
///
/// Returns `None` if any entry is unknown or the list is empty.
fn parse_currencies(raw: &str) -> Option<Vec<Currency>> {
    let parsed: Result<Vec<Currency>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect();

    match parsed {
        Ok(currencies) if !currencies.is_empty() => Some(currencies),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring ACCEPTED_CURRENCIES");
            None
        }
    }
}

/// Parse a comma-separated list of country calling codes such as `"44,353"`.
fn parse_country_codes(raw: &str) -> Option<Vec<String>> {
    let codes: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().trim_start_matches('+'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if codes.is_empty() || codes.iter().any(|c| !c.bytes().all(|b| b.is_ascii_digit())) {
        tracing::warn!(value = %raw, "Ignoring PHONE_COUNTRY_CODES");
        return None;
    }
    Some(codes)
}

/// Load Stripe secrets from file or environment.
fn load_stripe_secrets() -> (Option<String>, Option<String>) {
    let secret_paths = [
        ".secrets/stripe.json",
        "paydesk/.secrets/stripe.json",
        "../.secrets/stripe.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<StripeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Stripe secrets from file");
            return (
                Some(secrets.api_key),
                secrets
                    .api_base
                    .or_else(|| std::env::var("STRIPE_API_BASE").ok()),
            );
        }
    }

    tracing::debug!("Stripe secrets file not found, using environment variables");
    (
        std::env::var("STRIPE_API_KEY").ok().filter(|k| !k.is_empty()),
        std::env::var("STRIPE_API_BASE").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/paydesk".into(),
            storage_backend: StorageBackend::RocksDb,
            stripe_api_key: None,
            stripe_api_base: StripeClient::DEFAULT_BASE_URL.into(),
            accepted_currencies: DEFAULT_ACCEPTED_CURRENCIES.to_vec(),
            phone_policy: PhoneNumberPolicy::default(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
