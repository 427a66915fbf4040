use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use crate::services::providers::gemini::GEMINI_API_BASE;
use service_core::error::AppError;
use std::env;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Origins allowed to call the API when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://localhost:3000",
    "https://myunihealth.app",
    "https://www.myunihealth.app",
    "https://*.vercel.app",
    "https://*.railway.app",
];

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub gemini: GeminiSettings,
    pub clinic: ClinicConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown ENVIRONMENT '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    /// Model used for the chat reply (e.g., gemini-2.0-flash)
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ClinicConfig {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl ChatConfig {
    /// Load from `APP__*` (port) and the process environment.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `load` passes the process environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;
        let var = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        let config = ChatConfig {
            common,
            environment,
            service_name: var("SERVICE_NAME", Some("health-chat-service"))?,
            log_level: var("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|s| !s.trim().is_empty()),
            gemini: GeminiSettings {
                api_key: Secret::new(var("GEMINI_API_KEY", None)?),
                model: var("GEMINI_MODEL", Some("gemini-2.0-flash"))?,
                api_base: var("GEMINI_API_BASE", Some(GEMINI_API_BASE))?
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs: var("GEMINI_TIMEOUT_SECS", Some(&DEFAULT_TIMEOUT_SECS.to_string()))?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS: {}", e))
                    })?,
            },
            clinic: ClinicConfig {
                name: var("CLINIC_NAME", Some("Cal Poly Health Center"))?,
            },
            security: SecurityConfig {
                allowed_origins: match lookup("ALLOWED_ORIGINS") {
                    Some(raw) => raw
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                    None => DEFAULT_ALLOWED_ORIGINS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                },
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.gemini.api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY must not be empty"
            )));
        }

        if self.gemini.timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_TIMEOUT_SECS must be positive"
            )));
        }

        if self.environment == Environment::Prod
            && self.security.allowed_origins.iter().any(|o| o == "*")
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Wildcard CORS origin not allowed in production"
            )));
        }

        Ok(())
    }
}

/// Keys without a default are always required; the error names the environment
/// when it is production.
fn get_env<F>(
    lookup: &F,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod && default.is_none() {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ChatConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ChatConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_fatal() {
        assert!(load(&[("GEMINI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn defaults_apply_with_only_the_api_key() {
        let config = load(&[("GEMINI_API_KEY", "k")]).unwrap();
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_base, GEMINI_API_BASE);
        assert_eq!(config.gemini.timeout_secs, 120);
        assert_eq!(config.clinic.name, "Cal Poly Health Center");
        assert_eq!(config.security.allowed_origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn allowed_origins_are_split_and_trimmed() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example ,"),
        ])
        .unwrap();
        assert_eq!(
            config.security.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn wildcard_origin_rejected_in_prod() {
        let result = load(&[
            ("ENVIRONMENT", "prod"),
            ("GEMINI_API_KEY", "k"),
            ("ALLOWED_ORIGINS", "*"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unparseable_timeout_is_rejected() {
        assert!(load(&[("GEMINI_API_KEY", "k"), ("GEMINI_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9999/"),
        ])
        .unwrap();
        assert_eq!(config.gemini.api_base, "http://127.0.0.1:9999");
    }
}
