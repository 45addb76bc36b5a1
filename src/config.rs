use std::time::Duration;

use anyhow::Context;

use crate::reconcile::normalizer::NormalizerTier;

/// Credentials and endpoint for one outbound HTTP provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// `None` leaves the provider unconfigured; calls fail fast.
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub spoonacular: ProviderConfig,
    pub google_translate: ProviderConfig,
    pub provider_timeout: Duration,
    pub translate_delay: Duration,
    pub normalizer: NormalizerTier,
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unset or blank falls back to `default`; anything else must parse.
fn parsed_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid {key}: {v:?}")),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let normalizer = match optional_var("NORMALIZER") {
            Some(v) => v.parse::<NormalizerTier>()?,
            None => NormalizerTier::Full,
        };
        Ok(Self {
            database_url,
            host: var_or("APP_HOST", "0.0.0.0"),
            port: parsed_var("APP_PORT", 8080)?,
            spoonacular: ProviderConfig {
                api_key: optional_var("SPOONACULAR_API_KEY"),
                base_url: var_or("SPOONACULAR_BASE_URL", "https://api.spoonacular.com"),
            },
            google_translate: ProviderConfig {
                api_key: optional_var("GOOGLE_TRANSLATE_API_KEY"),
                base_url: var_or(
                    "GOOGLE_TRANSLATE_BASE_URL",
                    "https://translation.googleapis.com",
                ),
            },
            provider_timeout: Duration::from_secs(parsed_var("PROVIDER_TIMEOUT_SECS", 15)?),
            translate_delay: Duration::from_millis(parsed_var("TRANSLATE_DELAY_MS", 100)?),
            normalizer,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is shared.
    #[test]
    fn unset_numbers_use_the_default() {
        std::env::remove_var("KONDATE_TEST_UNSET_PORT");
        assert_eq!(parsed_var("KONDATE_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);
        std::env::set_var("KONDATE_TEST_BLANK_PORT", "  ");
        assert_eq!(parsed_var("KONDATE_TEST_BLANK_PORT", 8080u16).unwrap(), 8080);
    }

    #[test]
    fn set_numbers_are_parsed() {
        std::env::set_var("KONDATE_TEST_DELAY", " 250 ");
        assert_eq!(parsed_var("KONDATE_TEST_DELAY", 100u64).unwrap(), 250);
    }

    #[test]
    fn malformed_numbers_fail_startup() {
        std::env::set_var("KONDATE_TEST_BAD_PORT", "eighty");
        let err = parsed_var("KONDATE_TEST_BAD_PORT", 8080u16).unwrap_err();
        assert!(err.to_string().contains("KONDATE_TEST_BAD_PORT"));
    }
}
