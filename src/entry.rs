/// A single password file entry and its match predicate

use crate::config::WILDCARD;
use crate::error::PgPassError;
use crate::types::{ConnectionParams, FieldValue, PortValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    host: FieldValue,
    port: PortValue,
    dbname: FieldValue,
    user: FieldValue,
    password: String,
    line_number: usize,
}

impl Entry {
    /// Build an entry from raw, still escaped, field text.
    ///
    /// The port must be an integer or `*`. Every `\:` in the other fields,
    /// password included, is unescaped to `:`.
    pub fn new(
        host: &str,
        port: &str,
        dbname: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, PgPassError> {
        let port = parse_port(port)?;

        Ok(Self {
            host: FieldValue::from_unescaped(unescape(host)),
            port,
            dbname: FieldValue::from_unescaped(unescape(dbname)),
            user: FieldValue::from_unescaped(unescape(user)),
            password: unescape(password),
            line_number: 0,
        })
    }

    pub(crate) fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn host(&self) -> &FieldValue {
        &self.host
    }

    pub fn port(&self) -> PortValue {
        self.port
    }

    pub fn dbname(&self) -> &FieldValue {
        &self.dbname
    }

    pub fn user(&self) -> &FieldValue {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// 1-based line in the source file, 0 when built outside the parser
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// True when every field is a wildcard or equal to the requested value
    pub fn matches(&self, params: &ConnectionParams) -> bool {
        let host_matches = self.host.matches(&params.host);
        let port_matches = self.port.matches(params.port);
        let dbname_matches = self.dbname.matches(&params.dbname);
        let user_matches = self.user.matches(&params.user);

        host_matches && port_matches && dbname_matches && user_matches
    }
}

fn parse_port(raw: &str) -> Result<PortValue, PgPassError> {
    let port = raw.trim();
    if port == WILDCARD {
        return Ok(PortValue::Wildcard);
    }

    port.parse::<i64>()
        .map(PortValue::Literal)
        .map_err(|_| PgPassError::InvalidField {
            field: "port",
            value: raw.to_string(),
            line: None,
        })
}

fn unescape(raw: &str) -> String {
    raw.replace("\\:", ":")
}
