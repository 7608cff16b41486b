//! Process settings loaded via OrthoConfig.
//!
//! Layering follows OrthoConfig: defaults, then a config file, then
//! `WORKOUTS_*` environment variables, then command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use workout_planner::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_PORT: u16 = 8080;

/// Listener and store settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORKOUTS")]
pub struct AppSettings {
    /// Interface to bind; defaults to all IPv4 interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one, users and exercises live in memory.
    pub database_url: Option<String>,
    /// Connection pool ceiling.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "WORKOUTS_HOST",
        "WORKOUTS_PORT",
        "WORKOUTS_DATABASE_URL",
        "WORKOUTS_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("workout-planner")])
            .expect("settings should load")
    }

    #[rstest]
    fn defaults_select_memory_store_on_port_8080() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("WORKOUTS_HOST", Some("127.0.0.1".to_owned())),
            ("WORKOUTS_PORT", Some("9090".to_owned())),
            (
                "WORKOUTS_DATABASE_URL",
                Some("postgres://localhost/workouts".to_owned()),
            ),
            ("WORKOUTS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/workouts")
        );
        assert_eq!(settings.db_max_connections(), 4);
    }
}
