use colored::{Color, Colorize};
use middleware::logger::LoggerMiddleware;

pub mod middleware {
    pub mod logger;
}

fn level_color(level: log::Level) -> Color {
    match level {
        log::Level::Info => Color::Green,
        log::Level::Warn => Color::Yellow,
        log::Level::Error => Color::Red,
        log::Level::Debug => Color::Magenta,
        log::Level::Trace => Color::BrightBlack,
    }
}

/// Sends log records to stdout and appends them to `log_file`.
pub fn setup(log_file: &str, level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level().to_string().color(level_color(record.level())),
                message
            ))
        })
        .level(level)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("actix_server", log::LevelFilter::Info)
        .level_for("h2", log::LevelFilter::Off)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

pub fn middleware() -> LoggerMiddleware {
    LoggerMiddleware::new()
}
