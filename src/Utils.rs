//! different utility modules used by the calculator binary
/// TOML configuration of the calculator
pub mod calc_config;
/// tiny module to install the terminal (and optional file) logger
pub mod logger;
/// line-by-line interactive session: commands, modes and result formatting
pub mod repl;
