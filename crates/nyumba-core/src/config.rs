use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Provider keys are optional here: a missing key is reported per search as a
/// validation failure, so the binaries can still start and answer health checks.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for a present value that fails to parse.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("NYUMBA_ENV", "development"));
    let bind_addr = parse_addr("NYUMBA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NYUMBA_LOG_LEVEL", "info");
    let database_url = optional("DATABASE_URL");

    let serp_api_key = optional("SERP_API_KEY");
    let serp_base_url = or_default("NYUMBA_SERP_BASE_URL", "https://serpapi.com");
    let serp_result_limit = optional("NYUMBA_SERP_RESULT_LIMIT")
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|e| invalid("NYUMBA_SERP_RESULT_LIMIT", e.to_string()))
        })
        .transpose()?;

    let groq_api_key = optional("GROQ_API_KEY");
    let groq_base_url = or_default("GROQ_BASE_URL", "https://api.groq.com");
    let groq_model = or_default(
        "GROQ_MODEL_NAME",
        "meta-llama/llama-4-maverick-17b-128e-instruct",
    );

    let top_n = parse_usize("NYUMBA_TOP_N", "3")?;
    let request_timeout_secs = parse_u64("NYUMBA_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("NYUMBA_MAX_RETRIES", "1")?;
    let retry_backoff_base_ms = parse_u64("NYUMBA_RETRY_BACKOFF_BASE_MS", "500")?;

    let db_max_connections = parse_u32("NYUMBA_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("NYUMBA_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("NYUMBA_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        database_url,
        serp_api_key,
        serp_base_url,
        serp_result_limit,
        groq_api_key,
        groq_base_url,
        groq_model,
        top_n,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.database_url.is_none());
        assert!(cfg.serp_api_key.is_none());
        assert!(cfg.groq_api_key.is_none());
        assert_eq!(cfg.serp_base_url, "https://serpapi.com");
        assert!(cfg.serp_result_limit.is_none());
        assert_eq!(cfg.groq_base_url, "https://api.groq.com");
        assert_eq!(
            cfg.groq_model,
            "meta-llama/llama-4-maverick-17b-128e-instruct"
        );
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 1);
        assert_eq!(cfg.retry_backoff_base_ms, 500);
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.db_min_connections, 1);
        assert_eq!(cfg.db_acquire_timeout_secs, 10);
    }

    #[test]
    fn build_app_config_reads_provider_keys() {
        let mut map = HashMap::new();
        map.insert("SERP_API_KEY", "serp-key");
        map.insert("GROQ_API_KEY", "groq-key");
        map.insert("GROQ_MODEL_NAME", "mistral-saba-24b");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.serp_api_key.as_deref(), Some("serp-key"));
        assert_eq!(cfg.groq_api_key.as_deref(), Some("groq-key"));
        assert_eq!(cfg.groq_model, "mistral-saba-24b");
    }

    #[test]
    fn blank_provider_key_is_treated_as_missing() {
        let mut map = HashMap::new();
        map.insert("SERP_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.serp_api_key.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NYUMBA_BIND_ADDR"),
            "expected InvalidEnvVar(NYUMBA_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn serp_result_limit_override() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_SERP_RESULT_LIMIT", "6");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.serp_result_limit, Some(6));
    }

    #[test]
    fn serp_result_limit_invalid() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_SERP_RESULT_LIMIT", "six");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NYUMBA_SERP_RESULT_LIMIT"),
            "expected InvalidEnvVar(NYUMBA_SERP_RESULT_LIMIT), got: {result:?}"
        );
    }

    #[test]
    fn top_n_override() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_TOP_N", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.top_n, 5);
    }

    #[test]
    fn max_retries_invalid() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NYUMBA_MAX_RETRIES"),
            "expected InvalidEnvVar(NYUMBA_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn request_timeout_override() {
        let mut map = HashMap::new();
        map.insert("NYUMBA_REQUEST_TIMEOUT_SECS", "10");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 10);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = HashMap::new();
        map.insert("SERP_API_KEY", "super-secret-serp");
        map.insert("GROQ_API_KEY", "super-secret-groq");
        map.insert("DATABASE_URL", "postgres://user:pw@localhost/nyumba");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("user:pw"));
        assert!(debug.contains("[redacted]"));
    }
}
