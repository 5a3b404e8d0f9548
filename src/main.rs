#![allow(non_snake_case)]
use RustedCalc::Utils::calc_config::CalcConfig;
use RustedCalc::Utils::logger::init_logger;
use RustedCalc::Utils::repl::{Reply, Session};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    // optional path to a TOML configuration file
    let config_path = std::env::args().nth(1);
    let config = match CalcConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let level = match config.level_filter() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    match init_logger(level, config.log_to_file) {
        Ok(Some(file)) => info!("logging into {}", file),
        Ok(None) => {}
        Err(e) => eprintln!("logger was not installed: {}", e),
    }
    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    info!("session started in {} mode", session.mode().describe());

    println!(
        "Enter an expression ({} to quit, help for commands):",
        config.quit_command
    );
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{}", config.prompt);
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break, // end of input
            Ok(_) => {}
            Err(e) => {
                error!("cannot read input: {}", e);
                break;
            }
        }
        match session.handle_line(&line) {
            Reply::Quit => break,
            Reply::Nothing => {}
            Reply::Output(text) | Reply::Message(text) => println!("{}", text),
            Reply::Error(text) => eprintln!("{}", text),
        }
    }
    info!("Program ended");
}
