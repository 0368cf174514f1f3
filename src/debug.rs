use parking_lot::Mutex;
/// Debug logging for spectate
///
/// Two entry points share one log file (/tmp/spectate_debug.log on Unix,
/// %TEMP%\spectate_debug.log on Windows):
///
/// - The `debug_*!` category macros, controlled by SPECTATE_DEBUG_LEVEL
///   (0 off, 1 errors, 2 info, 3 debug, 4 trace).
/// - The `log` facade (`log::info!` etc.), installed by [`init_log_bridge`].
///   When RUST_LOG is set, records are mirrored to stderr as well.
///
/// Stdout is left alone: the headless driver prints status there.
use spectate_config::LogLevel;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

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
        match std::env::var("SPECTATE_DEBUG_LEVEL") {
            Ok(val) => match val.trim().parse::<u8>() {
                Ok(1) => DebugLevel::Error,
                Ok(2) => DebugLevel::Info,
                Ok(3) => DebugLevel::Debug,
                Ok(4) => DebugLevel::Trace,
                _ => DebugLevel::Off,
            },
            Err(_) => DebugLevel::Off,
        }
    }
}

/// Path of the shared debug log.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/spectate_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("spectate_debug.log");
    path
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    opened: bool,
}

impl DebugLogger {
    fn new() -> Self {
        let mut logger = DebugLogger {
            level: DebugLevel::from_env(),
            file: None,
            opened: false,
        };
        if logger.level != DebugLevel::Off {
            logger.open();
        }
        logger
    }

    /// Open (truncate) the log file once. Failure leaves logging disabled.
    fn open(&mut self) {
        if self.opened {
            return;
        }
        self.opened = true;
        self.file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        let header = format!(
            "\n{}\nspectate debug session started at {} (level={:?})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            self.level,
            "=".repeat(80)
        );
        self.write_raw(&header);
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

/// `log::Log` implementation routing facade records into the debug log.
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
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        {
            let mut logger = get_logger().lock();
            logger.open();
            logger.write_raw(&line);
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the `log` facade bridge.
///
/// Precedence: the `--log-level` flag, then RUST_LOG, then off until
/// [`apply_config_level`] runs with the configured level.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_level = rust_log
        .as_deref()
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok());
    let level = match (cli_level, env_level) {
        (Some(level), _) => level.to_level_filter(),
        (None, Some(filter)) => filter,
        (None, None) => log::LevelFilter::Off,
    };

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: rust_log.is_some(),
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level);
    }
}

/// Apply the config file's level unless the flag or RUST_LOG already chose one.
pub fn apply_config_level(cli_level: Option<LogLevel>, config_level: LogLevel) {
    if cli_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(config_level.to_level_filter());
    }
}

// Convenience macros for logging
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
