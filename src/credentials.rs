/// Credentials module for password retrieval from the .pgpass file

use crate::entry::Entry;
use crate::error::PgPassError;
use crate::logging::Logger;
use crate::parser;
use crate::passfile::{PassFile, PassFileSource};
use crate::types::ConnectionParams;

/// First entry matching the connection parameters, in file order
pub fn find_entry<'a>(entries: &'a [Entry], params: &ConnectionParams) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.matches(params))
}

/// Get the password for a connection from a password file source
///
/// The file is read and parsed on every call. Errors from the source and the
/// parser are returned unchanged; a file without a matching entry yields
/// `NoMatchingEntry`.
pub fn lookup_password(
    source: &impl PassFileSource,
    params: &ConnectionParams,
    logger: &Logger,
) -> Result<String, PgPassError> {
    logger.log_lookup_start(params, source.path());
    if !source.supports_permission_check() {
        logger.log_permission_check_skipped(source.path());
    }

    let result = source
        .read_contents()
        .and_then(|contents| parser::parse(&contents))
        .and_then(|entries| {
            logger.log_entries_parsed(entries.len());

            find_entry(&entries, params)
                .map(|entry| {
                    logger.log_match_found(params, entry.line_number());
                    entry.password().to_string()
                })
                .ok_or_else(|| PgPassError::NoMatchingEntry(params.to_string()))
        });

    if let Err(ref e) = result {
        logger.log_lookup_failed(params, &e.to_string());
    }

    result
}

/// Get the password from the default password file
///
/// Uses `PGPASSFILE` when set, otherwise `.pgpass` in the home directory.
pub fn get_password_from_pgpass(params: &ConnectionParams) -> Result<String, PgPassError> {
    let passfile = PassFile::from_env()?;
    lookup_password(&passfile, params, &Logger::disabled())
}

/// Get the password from the default password file, filling in defaults for
/// any omitted connection parameter
///
/// # Arguments
///
/// * `host` - defaults to `localhost`
/// * `port` - defaults to 5432
/// * `dbname` - defaults to the user name
/// * `user` - defaults to the current OS user
pub fn lookup(
    host: Option<&str>,
    port: Option<u16>,
    dbname: Option<&str>,
    user: Option<&str>,
) -> Result<String, PgPassError> {
    let params = ConnectionParams::with_defaults(host, port, dbname, user);
    get_password_from_pgpass(&params)
}
