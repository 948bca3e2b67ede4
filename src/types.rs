use std::fmt;
use std::str::FromStr;

use crate::config::WILDCARD;

/// A host, database or user field from a password file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Wildcard,
    Literal(String),
}

impl FieldValue {
    /// Build a field from an already unescaped value. A lone `*` is the wildcard.
    pub fn from_unescaped(value: String) -> Self {
        if value == WILDCARD {
            FieldValue::Wildcard
        } else {
            FieldValue::Literal(value)
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            FieldValue::Wildcard => true,
            FieldValue::Literal(value) => value == candidate,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, FieldValue::Wildcard)
    }
}

/// The port field of a password file entry.
///
/// Any integer is accepted; values outside the TCP port range never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortValue {
    Wildcard,
    Literal(i64),
}

impl PortValue {
    pub fn matches(&self, candidate: u16) -> bool {
        match self {
            PortValue::Wildcard => true,
            PortValue::Literal(port) => *port == i64::from(candidate),
        }
    }
}

/// The connection tuple a password is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
}

impl ConnectionParams {
    pub fn new(host: &str, port: u16, dbname: &str, user: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            dbname: dbname.to_string(),
            user: user.to_string(),
        }
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "host={}; port={}; dbname={}; user={}",
            self.host, self.port, self.dbname, self.user
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}'. Valid values are: text, json",
                other
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}
