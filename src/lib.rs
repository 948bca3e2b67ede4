// Library crate for pgpass-lookup
// This allows integration tests to access the modules

pub mod config;
pub mod credentials;
pub mod entry;
pub mod error;
pub mod logging;
pub mod parser;
pub mod passfile;
pub mod types;

pub use credentials::{get_password_from_pgpass, lookup, lookup_password};
pub use entry::Entry;
pub use error::PgPassError;
pub use passfile::{PassFile, PassFileSource};
pub use types::{ConnectionParams, FieldValue, PortValue};
