use ansi_term::{Colour, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct Logger {
    level: LevelFilter,
    color: bool,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let style = if self.color {
            match record.level() {
                Level::Error => Colour::Red.bold(),
                Level::Warn => Colour::Yellow.bold(),
                Level::Info => Style::new().bold(),
                Level::Debug => Colour::Blue.normal(),
                Level::Trace => Style::new().dimmed(),
            }
        } else {
            Style::new()
        };
        let tag = format!("{:<5}", record.level());
        eprintln!("{} {}: {}", style.paint(tag), record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Install the stderr logger. Zero occurrences of `-v` logs warnings only.
pub fn init(verbosity: u64, color: bool) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match log::set_boxed_logger(Box::new(Logger { level, color })) {
        Ok(()) => log::set_max_level(level),
        Err(error) => eprintln!("{}", error),
    }
}
