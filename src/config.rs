/// Application-wide configuration constants and default resolution

use std::env;

use crate::error::PgPassError;
use crate::types::ConnectionParams;

// Connection defaults
pub const DEFAULT_POSTGRES_HOST: &str = "localhost";
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

// Password file location
pub const PGPASSFILE_ENV: &str = "PGPASSFILE";
pub const PGPASS_FILE_NAME: &str = ".pgpass";

// Password file grammar
pub const WILDCARD: &str = "*";
pub const FIELD_SEPARATOR: char = ':';
pub const ESCAPE_CHAR: char = '\\';
pub const COMMENT_PREFIX: char = '#';
pub const FIELD_COUNT: usize = 5;

// Group-read and other-read permission bits
pub const GROUP_READ_BIT: u32 = 0o040;
pub const OTHER_READ_BIT: u32 = 0o004;

/// Name of the user running the process, taken from `USER` or `USERNAME`.
/// Falls back to the PostgreSQL superuser name when neither is set.
pub fn current_os_user() -> String {
    env::var("USER")
        .ok()
        .filter(|user| !user.is_empty())
        .or_else(|| env::var("USERNAME").ok().filter(|user| !user.is_empty()))
        .unwrap_or_else(|| "postgres".to_string())
}

/// Normalize a string-typed port from a caller into a port number
pub fn parse_query_port(value: &str) -> Result<u16, PgPassError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| PgPassError::InvalidArgument {
            name: "port".to_string(),
            value: value.to_string(),
        })
}

impl ConnectionParams {
    /// Fill in the connection defaults: `localhost`, port 5432, the current OS
    /// user, and a database named after the user.
    pub fn with_defaults(
        host: Option<&str>,
        port: Option<u16>,
        dbname: Option<&str>,
        user: Option<&str>,
    ) -> Self {
        let user = user
            .map(str::to_string)
            .unwrap_or_else(current_os_user);
        let dbname = dbname.map(str::to_string).unwrap_or_else(|| user.clone());

        Self {
            host: host.unwrap_or(DEFAULT_POSTGRES_HOST).to_string(),
            port: port.unwrap_or(DEFAULT_POSTGRES_PORT),
            dbname,
            user,
        }
    }
}
