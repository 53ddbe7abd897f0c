//! Application configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! locale = "ru"
//!
//! [routes]
//! customer_index = "/customer"
//!
//! [csrf]
//! delete_scope = "delete"
//! secret = "change-me"
//! token_ttl_secs = 3600
//!
//! [form]
//! name_max_len = 255
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::secret::Secret;

const DEFAULT_CUSTOMER_INDEX: &str = "/customer";
const DEFAULT_DELETE_SCOPE: &str = "delete";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_NAME_MAX_LEN: usize = 255;

fn default_customer_index() -> String {
    DEFAULT_CUSTOMER_INDEX.to_string()
}

fn default_delete_scope() -> String {
    DEFAULT_DELETE_SCOPE.to_string()
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_name_max_len() -> usize {
    DEFAULT_NAME_MAX_LEN
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// TOML parse error in a config file
    #[error("TOML parse error in {}: {source}", path.display())]
    TomlParse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },
    /// TOML parse error in an inline document
    #[error("TOML parse error: {0}")]
    Parse(#[source] toml::de::Error),
    /// A value is present but unusable
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Language of flash messages and page titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl Locale {
    /// Returns the message catalogue for this locale.
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ru => write!(f, "ru"),
        }
    }
}

/// User-facing texts: flash messages and page titles.
#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    /// Flash after a customer was created
    pub customer_created: &'static str,
    /// Flash after a customer was updated
    pub customer_updated: &'static str,
    /// Flash after a customer was deleted
    pub customer_deleted: &'static str,
    /// Flash after a delete with a rejected anti-forgery token
    pub invalid_csrf_token: &'static str,
    /// Title of the customer listing
    pub title_customers: &'static str,
    /// Title of the customer card
    pub title_customer: &'static str,
    /// Title of the create form
    pub title_customer_new: &'static str,
    /// Title of the edit form
    pub title_customer_edit: &'static str,
    /// Title of the login screen
    pub title_login: &'static str,
    /// Title of the homepage
    pub title_home: &'static str,
}

static EN: Messages = Messages {
    customer_created: "Customer created",
    customer_updated: "Customer updated",
    customer_deleted: "Customer deleted",
    invalid_csrf_token: "Invalid CSRF token",
    title_customers: "Customers",
    title_customer: "Customer",
    title_customer_new: "New customer",
    title_customer_edit: "Edit customer",
    title_login: "Sign in",
    title_home: "Home",
};

static RU: Messages = Messages {
    customer_created: "Клиент создан",
    customer_updated: "Клиент обновлён",
    customer_deleted: "Клиент удалён",
    invalid_csrf_token: "Неверный CSRF токен",
    title_customers: "Клиенты",
    title_customer: "Клиент",
    title_customer_new: "Новый клиент",
    title_customer_edit: "Редактирование клиента",
    title_login: "Войдите",
    title_home: "Главная",
};

/// Route locations used for redirects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Customer listing, the target of every post-mutation redirect
    #[serde(default = "default_customer_index")]
    pub customer_index: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            customer_index: default_customer_index(),
        }
    }
}

/// Anti-forgery token settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Prefix combined with the customer id to scope delete tokens
    #[serde(default = "default_delete_scope")]
    pub delete_scope: String,
    /// HMAC signing key; a random per-process key is used when absent
    pub secret: Option<Secret<String>>,
    /// Seconds an issued token stays valid
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            delete_scope: default_delete_scope(),
            secret: None,
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

/// Customer form settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum customer name length in characters
    #[serde(default = "default_name_max_len")]
    pub name_max_len: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name_max_len: default_name_max_len(),
        }
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use customer_guard::{AppConfig, Locale};
///
/// let config = AppConfig::from_toml_str(r#"locale = "ru""#).unwrap();
/// assert_eq!(config.locale, Locale::Ru);
/// assert_eq!(config.routes.customer_index, "/customer");
/// assert_eq!(config.settings().messages.customer_created, "Клиент создан");
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Message catalogue selector
    pub locale: Locale,
    /// Redirect targets
    pub routes: RoutesConfig,
    /// Anti-forgery tokens
    pub csrf: CsrfConfig,
    /// Form limits
    pub form: FormConfig,
}

impl AppConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            locale = %config.locale,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.routes.customer_index.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "routes.customer_index",
                "must start with '/'",
            ));
        }
        if self.csrf.delete_scope.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "csrf.delete_scope",
                "must not be empty",
            ));
        }
        if self
            .csrf
            .secret
            .as_ref()
            .is_some_and(|s| s.expose_secret().is_empty())
        {
            return Err(ConfigError::invalid_value(
                "csrf.secret",
                "must not be empty when set",
            ));
        }
        if self.csrf.token_ttl_secs == 0 {
            return Err(ConfigError::invalid_value(
                "csrf.token_ttl_secs",
                "must be greater than 0",
            ));
        }
        if self.form.name_max_len == 0 {
            return Err(ConfigError::invalid_value(
                "form.name_max_len",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Returns the request-time settings derived from this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            routes: self.routes.clone(),
            delete_scope: self.csrf.delete_scope.clone(),
            name_max_len: self.form.name_max_len,
            messages: self.locale.messages(),
        }
    }
}

/// The slice of configuration controllers need while handling a request.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Redirect targets
    pub routes: RoutesConfig,
    /// Scope prefix of delete tokens
    pub delete_scope: String,
    /// Maximum customer name length
    pub name_max_len: usize,
    /// Localized texts
    pub messages: &'static Messages,
}

impl Default for Settings {
    fn default() -> Self {
        AppConfig::default().settings()
    }
}
