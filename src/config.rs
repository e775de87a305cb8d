//! Application configuration management.
//!
//! Configuration is read once at startup from environment variables using
//! the `envy` crate, which deserializes them into a type-safe struct.

use serde::Deserialize;

/// Rule deciding which balance deltas an update accepts.
///
/// The historical rule only allowed increases of at least one unit. It is
/// kept as the default, the other variants relax it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceDeltaPolicy {
    /// Delta must be >= 1
    #[default]
    AtLeastOne,

    /// Delta must be > 0
    Positive,

    /// Any delta, including withdrawals and zero
    Any,
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `BALANCE_DELTA_POLICY` (optional): `at_least_one` (default), `positive` or `any`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default)]
    pub balance_delta_policy: BalanceDeltaPolicy,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names are converted automatically: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
