use parking_lot::Mutex;
/// Debug logging for viewmux
///
/// Controlled by the DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (session setup, focus moves)
/// - 3: Debug level (id allocation, routing decisions)
/// - 4: Trace level (every mapping and forwarded call)
///
/// All output goes to viewmux_debug.log in the temp directory so that the
/// CLI's JSON output on stdout stays clean.
///
/// `log` records from the library crates are routed into the same file by
/// [`init_log_bridge`].
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use viewmux_config::LogLevel;

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(val.trim().parse::<u8>().unwrap_or(0)),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(n: u8) -> Self {
        match n {
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            4 => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }

    fn from_filter(filter: log::LevelFilter) -> Self {
        match filter.to_level() {
            Some(level) => Self::from_log_level(level),
            None => DebugLevel::Off,
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("viewmux_debug.log")
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let mut logger = DebugLogger {
            level: DebugLevel::Off,
            file: None,
        };
        logger.set_level(DebugLevel::from_env());
        logger
    }

    /// Change the level, opening the log file the first time it is needed.
    fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
        if level == DebugLevel::Off || self.file.is_some() {
            return;
        }
        // Silently fail if the file can't be opened
        if let Ok(file) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(file);
            self.write_raw(&format!(
                "\n{}\nviewmux debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                level,
                "=".repeat(80)
            ));
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level_str,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

// ============================================================================
// `log` crate bridge
// ============================================================================

/// Set once a level came from the CLI or RUST_LOG; config must not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Routes `log` records from the library crates into the debug log file,
/// mirroring them to stderr when RUST_LOG is set.
struct LogBridge {
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let category = record.target();
        let msg = record.args().to_string();
        crate::debug::log(DebugLevel::from_log_level(record.level()), category, &msg);
        if self.mirror_stderr {
            eprintln!("[{}] [{}] {}", record.level(), category, msg);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn rust_log_level() -> Option<log::LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Only the global level is honoured; per-target directives are ignored.
    value
        .split(',')
        .find(|part| !part.contains('='))
        .and_then(|part| part.trim().parse::<log::LevelFilter>().ok())
}

/// Install the `log` bridge.
///
/// Level precedence: `cli_level`, then RUST_LOG, then whatever
/// [`apply_config_level`] sets later. Calling this more than once only
/// updates the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let rust_log = rust_log_level();
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
    });
    let _ = log::set_logger(bridge);

    let filter = match (cli_level, rust_log) {
        (Some(level), _) => Some(level.to_level_filter()),
        (None, Some(filter)) => Some(filter),
        (None, None) => None,
    };

    match filter {
        Some(filter) => {
            LEVEL_PINNED.store(true, Ordering::SeqCst);
            set_filter(filter);
        }
        None => {
            // DEBUG_LEVEL alone still gets library records.
            let level = get_logger().lock().level;
            log::set_max_level(match level {
                DebugLevel::Off => log::LevelFilter::Off,
                DebugLevel::Error => log::LevelFilter::Warn,
                DebugLevel::Info => log::LevelFilter::Info,
                DebugLevel::Debug => log::LevelFilter::Debug,
                DebugLevel::Trace => log::LevelFilter::Trace,
            });
        }
    }
}

/// Apply the configured log level unless the CLI or RUST_LOG already chose one.
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_PINNED.load(Ordering::SeqCst) || level == LogLevel::Off {
        return;
    }
    set_filter(level.to_level_filter());
}

fn set_filter(filter: log::LevelFilter) {
    log::set_max_level(filter);
    let mut logger = get_logger().lock();
    let level = DebugLevel::from_filter(filter);
    if level > logger.level {
        logger.set_level(level);
    }
}
