//! A small `log::Log` sink that colors severities the way the reference
//! tool's console output did, with an optional mirrored file sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use ansi_term::Colour;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger {
    file: Mutex<Option<File>>,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let colour = match record.level() {
            Level::Error => Colour::Red,
            Level::Warn => Colour::Yellow,
            Level::Info => Colour::Green,
            Level::Debug => Colour::Cyan,
            Level::Trace => Colour::White,
        };
        let tag = colour.paint(format!("[{}]", record.level()));
        eprintln!("{} {}", tag, record.args());

        if let Ok(mut guard) = self.file.lock() {
            if let Some(f) = guard.as_mut() {
                let _ = writeln!(f, "[{}] {}", record.level(), record.args());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(f) = guard.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

/// Installs the global logger. Call once, at process startup.
pub fn init(level: LevelFilter) {
    log::set_max_level(level);
    let _ = log::set_boxed_logger(Box::new(ConsoleLogger {
        file: Mutex::new(None),
    }));
}

/// Installs the global logger with an additional file mirror, matching the
/// reference tool's `log_open_file`/`log_close_file` pair (here tied to
/// process lifetime instead of an explicit close call).
pub fn init_with_file<P: AsRef<Path>>(level: LevelFilter, path: P) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    log::set_max_level(level);
    let _ = log::set_boxed_logger(Box::new(ConsoleLogger {
        file: Mutex::new(Some(file)),
    }));
    Ok(())
}

/// Logs at error severity, then terminates the process with a nonzero
/// status, matching `log_fatal`'s `exit(EXIT_FAILURE)`.
pub fn fatal(message: &str) -> ! {
    log::error!("{message}");
    std::process::exit(1);
}
