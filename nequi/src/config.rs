//! Client configuration.
//!
//! # Environment Variables
//!
//! [`NequiOptions::from_env`] reads:
//!
//! - `NEQUI_API_KEY`, `NEQUI_CLIENT_ID`, `NEQUI_CLIENT_SECRET`: credentials
//! - `NEQUI_ENV`: `sandbox` (default, alias `development`) or `production`
//! - `NEQUI_TIMEOUT_SECS`: optional per-request timeout in seconds
//! - `NEQUI_CACHE_TOKENS`: `true`, `1`, `yes` or `on` to reuse tokens until they near expiry

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.nequi.com";
/// Sandbox token endpoint.
pub const SANDBOX_AUTH_URL: &str = "https://oauth.sandbox.nequi.com/oauth2/token";
/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api.nequi.com";
/// Production token endpoint.
pub const PRODUCTION_AUTH_URL: &str = "https://oauth.nequi.com/oauth2/token";

const CONFIG_ERROR_PREFIX: &str = "[Nequi SDK]: Invalid configuration - ";

/// Provider environment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test environment.
    #[default]
    Sandbox,
    /// Live environment.
    Production,
}

impl Environment {
    /// Base URL business paths are appended to.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// OAuth2 token endpoint.
    #[must_use]
    pub const fn auth_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_AUTH_URL,
            Self::Production => PRODUCTION_AUTH_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" | "development" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(SdkError::validation(format!(
                "{CONFIG_ERROR_PREFIX}unknown environment '{other}'"
            ))),
        }
    }
}

/// The three secrets the provider issues to a merchant.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Value of the `x-api-key` header.
    pub api_key: String,
    /// OAuth2 client identifier, also sent as `ClientID` in every envelope.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
}

impl Credentials {
    /// Creates a credential set.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Messages for every credential that is empty.
    fn missing(&self) -> Vec<&'static str> {
        [
            (self.api_key.as_str(), "API key is required"),
            (self.client_id.as_str(), "Client ID is required"),
            (self.client_secret.as_str(), "Client secret is required"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| message)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Everything needed to construct a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NequiOptions {
    /// Merchant credentials.
    pub credentials: Credentials,
    /// Target environment.
    pub environment: Environment,
    /// Overrides the environment's base URL.
    pub base_url: Option<String>,
    /// Overrides the environment's token endpoint.
    pub auth_url: Option<String>,
    /// Per-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Reuse tokens until they near expiry instead of authenticating per call.
    pub cache_tokens: bool,
}

impl NequiOptions {
    /// Options for the sandbox with the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            base_url: None,
            auth_url: None,
            timeout: None,
            cache_tokens: false,
        }
    }

    /// Selects the environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Overrides the token endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables token reuse.
    #[must_use]
    pub const fn with_token_cache(mut self, enabled: bool) -> Self {
        self.cache_tokens = enabled;
        self
    }

    /// Effective base URL, without a trailing slash.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Effective token endpoint.
    #[must_use]
    pub fn resolved_auth_url(&self) -> &str {
        self.auth_url
            .as_deref()
            .unwrap_or_else(|| self.environment.auth_url())
    }

    /// Checks that every credential is present.
    ///
    /// # Errors
    ///
    /// Returns `missing_required_field` naming every empty credential.
    pub fn validate(&self) -> Result<()> {
        let missing = self.credentials.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SdkError::missing_required_field(format!(
                "{CONFIG_ERROR_PREFIX}{}",
                missing.join(", ")
            )))
        }
    }

    /// Loads options from the process environment.
    ///
    /// Missing credentials are left empty and reported by [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns `validation_error` if `NEQUI_ENV` or `NEQUI_TIMEOUT_SECS`
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = Credentials::new(
            lookup("NEQUI_API_KEY").unwrap_or_default(),
            lookup("NEQUI_CLIENT_ID").unwrap_or_default(),
            lookup("NEQUI_CLIENT_SECRET").unwrap_or_default(),
        );
        let environment = lookup("NEQUI_ENV")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        let timeout = lookup("NEQUI_TIMEOUT_SECS")
            .map(|value| parse_timeout_secs(&value))
            .transpose()?;

        let cache_tokens = lookup("NEQUI_CACHE_TOKENS")
            .is_some_and(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on" | "y"
                )
            });

        let mut options = Self::new(credentials)
            .with_environment(environment)
            .with_token_cache(cache_tokens);
        options.timeout = timeout;
        Ok(options)
    }
}

fn parse_timeout_secs(value: &str) -> Result<Duration> {
    value.parse().map(Duration::from_secs).map_err(|_| {
        SdkError::validation(format!(
            "{CONFIG_ERROR_PREFIX}timeout must be a whole number of seconds, received '{value}'"
        ))
    })
}

#[cfg(feature = "cli")]
pub use cli::NequiArgs;

#[cfg(feature = "cli")]
mod cli {
    use std::time::Duration;

    use clap::Parser;

    use super::{Credentials, Environment, NequiOptions};
    use crate::error::Result;

    /// Command-line flags for building a client, with environment fallbacks.
    #[derive(Parser, Clone)]
    #[command(about = "Nequi API client")]
    pub struct NequiArgs {
        /// API key sent as `x-api-key`.
        #[arg(long, env = "NEQUI_API_KEY", hide_env_values = true)]
        pub api_key: String,
        /// OAuth2 client identifier.
        #[arg(long, env = "NEQUI_CLIENT_ID")]
        pub client_id: String,
        /// OAuth2 client secret.
        #[arg(long, env = "NEQUI_CLIENT_SECRET", hide_env_values = true)]
        pub client_secret: String,
        /// Target environment.
        #[arg(long = "env", env = "NEQUI_ENV", default_value_t = Environment::Sandbox)]
        pub environment: Environment,
        /// Per-request timeout in seconds.
        #[arg(long, env = "NEQUI_TIMEOUT_SECS")]
        pub timeout_secs: Option<u64>,
        /// Reuse tokens until they near expiry. Accepts `1`, `true`, `yes` or `on`.
        #[arg(
            long,
            env = "NEQUI_CACHE_TOKENS",
            action = clap::ArgAction::Set,
            num_args = 0..=1,
            default_value_t = false,
            default_missing_value = "true",
            value_parser = clap::builder::BoolishValueParser::new(),
        )]
        pub cache_tokens: bool,
    }

    impl NequiArgs {
        /// Loads a `.env` file if present, then parses the process arguments.
        #[must_use]
        pub fn load() -> Self {
            dotenvy::dotenv().ok();
            Self::parse()
        }

        /// Converts the flags into validated client options.
        ///
        /// # Errors
        ///
        /// Returns `missing_required_field` if a credential is empty.
        pub fn into_options(self) -> Result<NequiOptions> {
            let mut options = NequiOptions::new(Credentials::new(
                self.api_key,
                self.client_id,
                self.client_secret,
            ))
            .with_environment(self.environment)
            .with_token_cache(self.cache_tokens);
            options.timeout = self.timeout_secs.map(Duration::from_secs);
            options.validate()?;
            Ok(options)
        }
    }

    impl std::fmt::Debug for NequiArgs {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("NequiArgs")
                .field("client_id", &self.client_id)
                .field("environment", &self.environment)
                .field("timeout_secs", &self.timeout_secs)
                .field("cache_tokens", &self.cache_tokens)
                .finish_non_exhaustive()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_convert_to_options() {
            let args = NequiArgs::try_parse_from([
                "nequi",
                "--api-key",
                "key",
                "--client-id",
                "id",
                "--client-secret",
                "secret",
                "--env",
                "production",
                "--timeout-secs",
                "15",
                "--cache-tokens=false",
            ])
            .unwrap();
            let options = args.into_options().unwrap();
            assert_eq!(options.environment, Environment::Production);
            assert_eq!(options.timeout, Some(Duration::from_secs(15)));
            assert!(!options.cache_tokens);
        }

        #[test]
        fn test_cache_tokens_flag_and_env_accept_numeric_true() {
            let base = ["nequi", "--api-key", "k", "--client-id", "id", "--client-secret", "s"];

            let bare = NequiArgs::try_parse_from(base.into_iter().chain(["--cache-tokens"])).unwrap();
            assert!(bare.cache_tokens);
            let numeric =
                NequiArgs::try_parse_from(base.into_iter().chain(["--cache-tokens=1"])).unwrap();
            assert!(numeric.cache_tokens);

            #[allow(unsafe_code)]
            // SAFETY: no other test in this crate reads this variable from the process environment.
            unsafe {
                std::env::set_var("NEQUI_CACHE_TOKENS", "1");
            }
            let from_env = NequiArgs::try_parse_from(base);
            #[allow(unsafe_code)]
            // SAFETY: see above.
            unsafe {
                std::env::remove_var("NEQUI_CACHE_TOKENS");
            }
            assert!(from_env.unwrap().cache_tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::Sandbox.base_url(), "https://api.sandbox.nequi.com");
        assert_eq!(
            Environment::Production.auth_url(),
            "https://oauth.nequi.com/oauth2/token"
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);
        let err = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(err.name, ErrorKind::ValidationError);
        assert!(err.message.contains("staging"));
    }

    #[test]
    fn test_validate_lists_every_missing_credential() {
        let options = NequiOptions::new(Credentials::new("", "id", " "));
        let err = options.validate().unwrap_err();
        assert_eq!(err.name, ErrorKind::MissingRequiredField);
        assert_eq!(err.status, 422);
        assert_eq!(
            err.message,
            "[Nequi SDK]: Invalid configuration - API key is required, Client secret is required"
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let options = NequiOptions::new(Credentials::new("k", "i", "s"))
            .with_environment(Environment::Production)
            .with_base_url("http://localhost:8080/")
            .with_auth_url("http://localhost:8080/token");
        assert_eq!(options.resolved_base_url(), "http://localhost:8080");
        assert_eq!(options.resolved_auth_url(), "http://localhost:8080/token");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let options = NequiOptions::from_lookup(lookup(&[
            ("NEQUI_API_KEY", "key"),
            ("NEQUI_CLIENT_ID", "id"),
            ("NEQUI_CLIENT_SECRET", "secret"),
            ("NEQUI_ENV", "production"),
            ("NEQUI_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(options.credentials, Credentials::new("key", "id", "secret"));
        assert_eq!(options.environment, Environment::Production);
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert!(!options.cache_tokens);

        let cached = NequiOptions::from_lookup(lookup(&[("NEQUI_CACHE_TOKENS", "true")])).unwrap();
        assert!(cached.cache_tokens);
        let numeric = NequiOptions::from_lookup(lookup(&[("NEQUI_CACHE_TOKENS", "1")])).unwrap();
        assert!(numeric.cache_tokens);
    }

    #[test]
    fn test_from_lookup_defaults_and_bad_timeout() {
        let options = NequiOptions::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options.environment, Environment::Sandbox);
        assert!(options.timeout.is_none());
        assert!(options.validate().is_err());

        let err = NequiOptions::from_lookup(lookup(&[("NEQUI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.message.contains("soon"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", Credentials::new("api-secret", "id", "client-secret"));
        assert!(!rendered.contains("api-secret"));
        assert!(!rendered.contains("client-secret"));
        assert!(rendered.contains("id"));
    }
}
