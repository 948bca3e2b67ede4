use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use serde::Serialize;
use crate::types::{ConnectionParams, LogFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Success => "SUCCESS",
        }
    }
}

/// Context for structured logging with optional fields. Never carries a password.
#[derive(Default)]
pub struct LogContext<'a> {
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub dbname: Option<&'a str>,
    pub user: Option<&'a str>,
    pub passfile: Option<&'a str>,
    pub entry_count: Option<usize>,
    pub line_number: Option<usize>,
    pub status: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    fn for_params(params: &'a ConnectionParams) -> Self {
        Self {
            host: Some(params.host.as_str()),
            port: Some(params.port),
            dbname: Some(params.dbname.as_str()),
            user: Some(params.user.as_str()),
            ..Default::default()
        }
    }
}

/// JSON log event structure
#[derive(Serialize)]
struct LogEvent<'a> {
    timestamp: &'a str,
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dbname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    passfile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

// Buffer size for BufWriter (8KB default)
const LOG_BUFFER_SIZE: usize = 8192;

/// Writes log lines to stderr and, optionally, to a log file.
/// Stdout is left alone so the looked up password can be piped.
pub struct Logger {
    log_file: Option<String>,
    silence_mode: bool,
    json_mode: bool,
    file_handle: Arc<Mutex<Option<BufWriter<File>>>>,
}

impl Logger {
    pub fn new(log_file: Option<String>, silence_mode: bool, log_format: LogFormat) -> Self {
        Self {
            log_file,
            silence_mode,
            json_mode: log_format == LogFormat::Json,
            file_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// A logger that writes nowhere
    pub fn disabled() -> Self {
        Self::new(None, true, LogFormat::Text)
    }

    /// Ensure the file handle is initialized, creating it if necessary.
    /// Returns true if the file handle is available, false otherwise.
    fn ensure_file_handle(&self) -> bool {
        let Some(log_file) = self.log_file.as_deref() else {
            return false;
        };

        let mut guard = match self.file_handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("Logger lock was poisoned, attempting recovery");
                poisoned.into_inner()
            }
        };

        if guard.is_some() {
            return true;
        }

        match OpenOptions::new().create(true).append(true).open(log_file) {
            Ok(file) => {
                *guard = Some(BufWriter::with_capacity(LOG_BUFFER_SIZE, file));
                true
            }
            Err(e) => {
                eprintln!(
                    "Failed to open log file '{}': {}. Logging to file will be disabled.",
                    log_file, e
                );
                false
            }
        }
    }

    fn get_timestamp(&self) -> String {
        chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string()
    }

    fn format_message(&self, level: LogLevel, message: &str, context: &LogContext<'_>) -> String {
        let timestamp = self.get_timestamp();
        let level_str = level.as_str();

        if !self.json_mode {
            return format!("[{}] [{}] {}\n", timestamp, level_str, message);
        }

        let event = LogEvent {
            timestamp: &timestamp,
            level: level_str,
            message,
            host: context.host,
            port: context.port,
            dbname: context.dbname,
            user: context.user,
            passfile: context.passfile,
            entry_count: context.entry_count,
            line_number: context.line_number,
            status: context.status,
            error: context.error,
        };
        let line = serde_json::to_string(&event).unwrap_or_else(|_| {
            // Fallback to a minimal event on serialization error
            serde_json::json!({
                "timestamp": timestamp,
                "level": level_str,
                "message": message,
            })
            .to_string()
        });
        format!("{}\n", line)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.log_with_context(level, message, LogContext::default());
    }

    pub fn log_with_context(&self, level: LogLevel, message: &str, context: LogContext<'_>) {
        if self.silence_mode && self.log_file.is_none() {
            return;
        }

        // Format message before acquiring lock to minimize lock hold time
        let formatted_message = self.format_message(level, message, &context);

        if !self.silence_mode {
            eprint!("{}", formatted_message);
        }

        if !self.ensure_file_handle() {
            return;
        }

        let mut guard = match self.file_handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("Logger lock was poisoned during write");
                poisoned.into_inner()
            }
        };

        if let Some(ref mut writer) = *guard {
            if let Err(e) = writer.write_all(formatted_message.as_bytes()) {
                eprintln!(
                    "Failed to write to log file '{}': {}",
                    self.log_file.as_deref().unwrap_or_default(),
                    e
                );
                *guard = None;
            } else if matches!(level, LogLevel::Error)
                && let Err(e) = writer.flush()
            {
                eprintln!(
                    "Failed to flush log file '{}': {}",
                    self.log_file.as_deref().unwrap_or_default(),
                    e
                );
            }
        }
    }

    pub fn log_lookup_start(&self, params: &ConnectionParams, passfile: &Path) {
        let passfile = passfile.display().to_string();
        let message = format!("Looking up password for {} in {}", params, passfile);
        let context = LogContext {
            passfile: Some(passfile.as_str()),
            status: Some("starting"),
            ..LogContext::for_params(params)
        };
        self.log_with_context(LogLevel::Info, &message, context);
    }

    pub fn log_permission_check_skipped(&self, passfile: &Path) {
        let passfile = passfile.display().to_string();
        let message = format!("Permission check skipped for {}", passfile);
        let context = LogContext {
            passfile: Some(passfile.as_str()),
            ..Default::default()
        };
        self.log_with_context(LogLevel::Warning, &message, context);
    }

    pub fn log_entries_parsed(&self, entry_count: usize) {
        let message = format!("Parsed {} password file entries", entry_count);
        let context = LogContext {
            entry_count: Some(entry_count),
            ..Default::default()
        };
        self.log_with_context(LogLevel::Info, &message, context);
    }

    pub fn log_match_found(&self, params: &ConnectionParams, line_number: usize) {
        let message = format!("Matched {} on line {}", params, line_number);
        let context = LogContext {
            line_number: Some(line_number),
            status: Some("matched"),
            ..LogContext::for_params(params)
        };
        self.log_with_context(LogLevel::Success, &message, context);
    }

    pub fn log_lookup_failed(&self, params: &ConnectionParams, reason: &str) {
        let message = format!("Lookup failed for {}: {}", params, reason);
        let context = LogContext {
            status: Some("failed"),
            error: Some(reason),
            ..LogContext::for_params(params)
        };
        self.log_with_context(LogLevel::Error, &message, context);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let mut guard = match self.file_handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(mut writer) = guard.take()
            && let Err(e) = writer.flush()
        {
            eprintln!(
                "Failed to flush log file '{}' during drop: {}",
                self.log_file.as_deref().unwrap_or_default(),
                e
            );
        }
    }
}
