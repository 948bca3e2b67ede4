use anyhow::{Context, Result};
use clap::Parser;
use pgpass_lookup::config::parse_query_port;
use pgpass_lookup::credentials::lookup_password;
use pgpass_lookup::logging::Logger;
use pgpass_lookup::passfile::PassFile;
use pgpass_lookup::types::{ConnectionParams, LogFormat};
use std::env;

#[derive(Parser, Debug)]
#[command(author, version, about = "PostgreSQL Password File Lookup - Prints the password for a connection from a .pgpass file", long_about = None)]
struct Args {
    /// PostgreSQL host (can also be set via PGHOST environment variable)
    #[arg(short = 'H', long, help = "Host of the connection to look up")]
    host: Option<String>,

    /// PostgreSQL port (can also be set via PGPORT environment variable)
    #[arg(short, long, help = "Port of the connection to look up")]
    port: Option<String>,

    /// Database name (can also be set via PGDATABASE environment variable)
    #[arg(short, long, help = "Database name of the connection to look up. Defaults to the user name")]
    dbname: Option<String>,

    /// Username (can also be set via PGUSER environment variable)
    #[arg(short = 'U', long, help = "User of the connection to look up. Defaults to the current OS user")]
    username: Option<String>,

    /// Password file path (can also be set via PGPASSFILE environment variable)
    #[arg(long, help = "Password file to read. Defaults to PGPASSFILE, then ~/.pgpass")]
    passfile: Option<String>,

    /// Skip the group/world readable permission check
    #[arg(
        long,
        default_value = "false",
        help = "Read the password file even if it is readable by group or others"
    )]
    skip_permission_check: bool,

    /// Log file path
    #[arg(short = 'l', long, help = "Append log lines to this file")]
    log_file: Option<String>,

    /// Log format
    #[arg(
        long,
        default_value = "text",
        value_parser = clap::value_parser!(LogFormat),
        help = "Log format: 'text' or 'json'"
    )]
    log_format: LogFormat,

    /// Verbose mode - print log lines to stderr
    #[arg(
        short = 'v',
        long,
        default_value = "false",
        help = "Print log lines to stderr. The password is always the only output on stdout."
    )]
    verbose: bool,
}

/// Read an environment variable, treating an empty value as unset
fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logger = Logger::new(args.log_file.clone(), !args.verbose, args.log_format);

    // Get connection parameters from command line arguments or environment variables
    let host = args.host.or_else(|| non_empty_env("PGHOST"));

    let port = args
        .port
        .or_else(|| non_empty_env("PGPORT"))
        .map(|port| parse_query_port(&port))
        .transpose()
        .context("Failed to parse port")?;

    let username = args.username.or_else(|| non_empty_env("PGUSER"));
    let dbname = args.dbname.or_else(|| non_empty_env("PGDATABASE"));

    let params = ConnectionParams::with_defaults(
        host.as_deref(),
        port,
        dbname.as_deref(),
        username.as_deref(),
    );

    let passfile = match args.passfile {
        Some(path) => PassFile::at(path),
        None => PassFile::from_env().context("Failed to locate password file")?,
    };
    let passfile = if args.skip_permission_check {
        passfile.without_permission_check()
    } else {
        passfile
    };

    let password = lookup_password(&passfile, &params, &logger)
        .with_context(|| format!("Failed to look up password for {}", params))?;

    println!("{}", password);
    Ok(())
}
