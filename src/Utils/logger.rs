use chrono::Local;
use log::LevelFilter;
use simplelog::*;
use std::fs::File;

/// name of the log file for the current moment, `log_<date>_<time>.txt`
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs the global logger: terminal output always, plus a log file when `log_to_file`
/// is set. Returns the name of the log file if one was created.
///
/// # Arguments
/// * `level` - maximal level that gets through
/// * `log_to_file` - also write every record into `log_<date>_<time>.txt`
pub fn init_logger(
    level: LevelFilter,
    log_to_file: bool,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let file_name = if log_to_file {
        let name = log_file_name();
        loggers.push(WriteLogger::new(level, Config::default(), File::create(&name)?));
        Some(name)
    } else {
        None
    };
    CombinedLogger::init(loggers)?;
    Ok(file_name)
}
