//! FILENAME: core/formulas/src/logging.rs
// PURPOSE: Category-tagged logging for the formula layer.
// FORMAT: category|message, emitted through the `log` facade under the "formulas" target.
// The host application decides where lines go by installing a logger.

pub use log::Level;

pub const TARGET: &str = "formulas";

/// Write a log line in unified format
pub fn write_log(level: Level, category: &str, message: std::fmt::Arguments<'_>) {
    log::log!(target: TARGET, level, "{}|{}", category, message);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: std::fmt::Arguments<'_>) {
    write_log(level, category, format_args!("ENTER {} {}", func_name, params));
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: std::fmt::Arguments<'_>) {
    write_log(level, category, format_args!("EXIT {} {}", func_name, result));
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, format_args!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Trace, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Trace, $cat, $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::Level::Trace, $cat, $func, format_args!(""))
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::Level::Trace, $cat, $func, format_args!($($arg)*))
    };
}
