use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use folio_core::utils::time_utils::{parse_timezone, DEFAULT_VIEW_TZ};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Timezone whose midnight starts a new daily view bucket.
    pub view_timezone: Tz,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FOLIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FOLIO_LISTEN_ADDR")?;
        let db_path = std::env::var("FOLIO_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("FOLIO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("FOLIO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let view_timezone = match std::env::var("FOLIO_VIEW_TIMEZONE") {
            Ok(name) => parse_timezone(&name).context("Invalid FOLIO_VIEW_TIMEZONE")?,
            Err(_) => DEFAULT_VIEW_TZ,
        };
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            view_timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn view_timezone_defaults_to_utc() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("FOLIO_VIEW_TIMEZONE");

        let config = Config::from_env().unwrap();

        assert_eq!(config.view_timezone, chrono_tz::UTC);
    }

    #[test]
    fn view_timezone_is_read_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("FOLIO_VIEW_TIMEZONE", "Asia/Seoul");

        let config = Config::from_env();
        std::env::remove_var("FOLIO_VIEW_TIMEZONE");

        assert_eq!(config.unwrap().view_timezone, chrono_tz::Asia::Seoul);
    }

    #[test]
    fn unknown_view_timezone_is_a_startup_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("FOLIO_VIEW_TIMEZONE", "Mars/Olympus_Mons");

        let result = Config::from_env();
        std::env::remove_var("FOLIO_VIEW_TIMEZONE");

        let err = result.err().unwrap();
        assert!(err.to_string().contains("FOLIO_VIEW_TIMEZONE"));
    }
}
