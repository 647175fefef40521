//! Routes `log` records to macroquad's console output.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use macroquad::logging::{debug, error, info, trace, warn};

struct ConsoleLogger {
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record.target();
        let args = record.args();
        match record.level() {
            Level::Error => error!("[{}] {}", target, args),
            Level::Warn => warn!("[{}] {}", target, args),
            Level::Info => info!("[{}] {}", target, args),
            Level::Debug => debug!("[{}] {}", target, args),
            Level::Trace => trace!("[{}] {}", target, args),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
