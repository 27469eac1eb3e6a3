// Pixpie Server SDK - Systemd-Style Logger
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Systemd-style logging compatible with journald
//!
//! The library logs through the `log_*!` macros. Nothing is written until a
//! binary installs the global logger with [`Logger::init`] or
//! [`init_from_args`].

use std::sync::Mutex;

/// Log levels following systemd priority conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Error conditions (3)
    Error = 3,
    /// Warning conditions (4)
    Warning = 4,
    /// Normal but significant condition (5)
    Notice = 5,
    /// Informational message (6)
    Info = 6,
    /// Debug-level message (7)
    Debug = 7,
}

impl LogLevel {
    pub fn priority(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Color code for terminal output
    pub fn color_code(self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m",
            LogLevel::Warning => "\x1b[33m",
            LogLevel::Notice => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Debug => "\x1b[37m",
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum log level to output
    pub min_level: LogLevel,
    pub use_colors: bool,
    pub include_timestamp: bool,
    /// Include the emitting module path
    pub include_target: bool,
    /// Emit journald `KEY=value` records instead of terminal lines
    pub journald_format: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            use_colors: atty::is(atty::Stream::Stderr),
            include_timestamp: true,
            include_target: false,
            journald_format: false,
        }
    }
}

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Install the global logger
    pub fn init(config: LoggerConfig) -> Result<(), LoggerError> {
        let mut global = LOGGER.lock().map_err(|_| LoggerError::InitError)?;
        if global.is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }
        *global = Some(Self::new(config));
        Ok(())
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.config.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.should_log(level) {
            return;
        }
        let timestamp = chrono::Utc::now().timestamp();
        eprintln!("{}", self.format(level, target, message, timestamp));
    }

    fn format(&self, level: LogLevel, target: &str, message: &str, timestamp: i64) -> String {
        if self.config.journald_format {
            self.format_journald(level, target, message, timestamp)
        } else {
            self.format_terminal(level, target, message, timestamp)
        }
    }

    fn format_journald(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        timestamp: i64,
    ) -> String {
        let mut output = format!("PRIORITY={}\nMESSAGE={}\n", level.priority(), message);
        if self.config.include_target && !target.is_empty() {
            output.push_str(&format!("CODE_FILE={}\n", target));
        }
        if self.config.include_timestamp {
            // microseconds
            output.push_str(&format!(
                "_SOURCE_REALTIME_TIMESTAMP={}\n",
                timestamp * 1_000_000
            ));
        }
        output.push_str("SYSLOG_IDENTIFIER=pixpie\n");
        output
    }

    fn format_terminal(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        timestamp: i64,
    ) -> String {
        let mut output = String::new();

        if self.config.include_timestamp {
            let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
                .unwrap_or_default()
                .format("%Y-%m-%d %H:%M:%S");
            output.push_str(&format!("{} ", datetime));
        }

        // Status-style messages ("[   OK   ] ...") carry their own prefix
        if is_status_message(message) {
            if self.config.use_colors {
                output.push_str(&format!("{}{}\x1b[0m", level.color_code(), message));
            } else {
                output.push_str(message);
            }
        } else if self.config.use_colors {
            output.push_str(&format!(
                "{}[{}]\x1b[0m {}",
                level.color_code(),
                level.as_str(),
                message
            ));
        } else {
            output.push_str(&format!("[{}] {}", level.as_str(), message));
        }

        if self.config.include_target && !target.is_empty() {
            output.push_str(&format!(" ({})", target));
        }

        output
    }
}

fn is_status_message(message: &str) -> bool {
    message.starts_with("[*]")
        || message.starts_with("[   OK   ]")
        || message.starts_with("[  FAILED ]")
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level(
            $crate::core::logger::LogLevel::Error,
            module_path!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level(
            $crate::core::logger::LogLevel::Warning,
            module_path!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_notice {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level(
            $crate::core::logger::LogLevel::Notice,
            module_path!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level(
            $crate::core::logger::LogLevel::Info,
            module_path!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level(
            $crate::core::logger::LogLevel::Debug,
            module_path!(),
            &format!($($arg)*),
        )
    };
}

/// Write through the global logger, if one is installed
pub fn log_with_level(level: LogLevel, target: &str, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(ref logger) = *guard {
            logger.log(level, target, message);
        }
    }
}

/// `[*] Starting ...`
pub fn log_task_start(task: &str) {
    crate::log_notice!("[*] {}...", task);
}

/// `[   OK   ] ...`
pub fn log_task_ok(task: &str) {
    crate::log_info!("[   OK   ] {}", task);
}

/// `[  FAILED ] ... - error`
pub fn log_task_failed(task: &str, error: &str) {
    crate::log_error!("[  FAILED ] {} - {}", task, error);
}

/// Logger initialization errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Logger already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize logger")]
    InitError,
}

/// Initialize the global logger from CLI flags
pub fn init_from_args(debug: bool, journald: bool) -> Result<(), LoggerError> {
    let config = LoggerConfig {
        min_level: if debug { LogLevel::Debug } else { LogLevel::Info },
        use_colors: atty::is(atty::Stream::Stderr) && !journald,
        include_timestamp: !journald,
        include_target: debug,
        journald_format: journald,
    };
    Logger::init(config)
}
