//! # Interactive session
//!
//! Line-by-line driver behind the calculator binary. Every line is either a command or an
//! expression:
//!
//! - the quit command (`q` by default) ends the session
//! - `eval` switches to evaluate mode, expressions print as `= <value>`
//! - `diff x` or `d/dx` switches to differentiate mode, expressions print as
//!   `d/dx(<input without whitespace>) = <derivative>`
//! - `mode` reports the current mode, `help` lists the commands
//!
//! Parse and evaluation errors are returned as `Reply::Error` and never end the session.
use crate::Utils::calc_config::CalcConfig;
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, info, warn};
use regex::Regex;
use strum_macros::{AsRefStr, Display};

const HELP: &str = "commands: eval | diff <letter> | d/d<letter> | mode | help | <quit command>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Mode {
    #[strum(serialize = "evaluate")]
    Evaluate,
    #[strum(serialize = "differentiate")]
    Differentiate(char),
}

impl Mode {
    /// label with the differentiation variable, e.g. "differentiate d/dx"
    pub fn describe(&self) -> String {
        match self {
            Mode::Evaluate => self.to_string(),
            Mode::Differentiate(var) => format!("{} d/d{}", self, var),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Quit,
    /// blank line, nothing to print
    Nothing,
    /// result of an expression
    Output(String),
    /// answer to a command
    Message(String),
    Error(String),
}

pub struct Session {
    mode: Mode,
    quit_command: String,
    simplify_derivatives: bool,
    diff_command: Regex,
}

impl Session {
    /// Creates a session from the configuration; `start_mode`, when present, must be a mode
    /// command such as "eval" or "d/dx".
    pub fn new(config: &CalcConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let diff_command = Regex::new(r"^(?:diff\s+([A-Za-z])|d/d([A-Za-z]))$")?;
        let mut session = Session {
            mode: Mode::Evaluate,
            quit_command: config.quit_command.trim().to_string(),
            simplify_derivatives: config.simplify_derivatives,
            diff_command,
        };
        if let Some(start) = &config.start_mode {
            match session.mode_command(start.trim()) {
                Some(mode) => session.mode = mode,
                None => return Err(format!("start_mode '{}' is not a mode command", start).into()),
            }
        }
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn mode_command(&self, command: &str) -> Option<Mode> {
        if command == "eval" {
            return Some(Mode::Evaluate);
        }
        let caps = self.diff_command.captures(command)?;
        let letter = caps.get(1).or_else(|| caps.get(2))?;
        letter.as_str().chars().next().map(Mode::Differentiate)
    }

    /// Processes one input line.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = line.trim();
        if command.is_empty() {
            return Reply::Nothing;
        }
        if command == self.quit_command {
            info!("quit command received");
            return Reply::Quit;
        }
        if command == "mode" {
            return Reply::Message(format!("mode: {}", self.mode.describe()));
        }
        if command == "help" {
            return Reply::Message(HELP.to_string());
        }
        if let Some(mode) = self.mode_command(command) {
            self.mode = mode;
            info!("switched to {} mode", mode.describe());
            return Reply::Message(format!("mode: {}", mode.describe()));
        }
        debug!("{} mode, input: {}", self.mode, command);
        match self.compute(command) {
            Ok(output) => Reply::Output(output),
            Err(e) => {
                warn!("cannot process '{}': {}", command, e);
                Reply::Error(format!("error: {}", e))
            }
        }
    }

    fn compute(&self, input: &str) -> Result<String, Box<dyn std::error::Error>> {
        let expr = Expr::parse_expression(input)?;
        match self.mode {
            Mode::Evaluate => Ok(format!("= {}", expr.evaluate()?)),
            Mode::Differentiate(var) => {
                let derivative = expr.diff(var);
                let derivative = if self.simplify_derivatives {
                    derivative.simplify()
                } else {
                    derivative
                };
                let echoed: String = input.split_whitespace().collect();
                Ok(format!("d/d{}({}) = {}", var, echoed, derivative))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&CalcConfig::default()).unwrap()
    }

    #[test]
    fn test_evaluate_mode() {
        let mut s = session();
        assert_eq!(s.mode(), Mode::Evaluate);
        assert_eq!(s.handle_line("3+4*2\n"), Reply::Output("= 11".to_string()));
        assert_eq!(s.handle_line("2 ^ 3 ^ 2"), Reply::Output("= 512".to_string()));
    }

    #[test]
    fn test_differentiate_mode() {
        let mut s = session();
        assert_eq!(
            s.handle_line("d/dx"),
            Reply::Message("mode: differentiate d/dx".to_string())
        );
        assert_eq!(s.mode(), Mode::Differentiate('x'));
        assert_eq!(
            s.handle_line("x^2"),
            Reply::Output("d/dx(x^2) = 2*x".to_string())
        );
        assert_eq!(
            s.handle_line("sin(x)"),
            Reply::Output("d/dx(sin(x)) = cos(x)".to_string())
        );
    }

    #[test]
    fn test_differentiate_echo_drops_whitespace() {
        let mut s = session();
        s.handle_line("diff x");
        assert_eq!(
            s.handle_line("  x ^ 2 +\t3 * x "),
            Reply::Output("d/dx(x^2+3*x) = 2*x+3".to_string())
        );
    }

    #[test]
    fn test_diff_command_and_back() {
        let mut s = session();
        s.handle_line("diff  y");
        assert_eq!(s.mode(), Mode::Differentiate('y'));
        assert_eq!(
            s.handle_line("x*y"),
            Reply::Output("d/dy(x*y) = x".to_string())
        );
        s.handle_line("eval");
        assert_eq!(s.mode(), Mode::Evaluate);
        assert_eq!(s.handle_line("mode"), Reply::Message("mode: evaluate".to_string()));
    }

    #[test]
    fn test_unsimplified_derivatives() {
        let config = CalcConfig {
            simplify_derivatives: false,
            start_mode: Some("d/dx".to_string()),
            ..CalcConfig::default()
        };
        let mut s = Session::new(&config).unwrap();
        assert_eq!(
            s.handle_line("sin(x)"),
            Reply::Output("d/dx(sin(x)) = 1*cos(x)".to_string())
        );
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        assert_eq!(s.handle_line("q"), Reply::Quit);
        assert_eq!(s.handle_line("  q \n"), Reply::Quit);

        let config = CalcConfig {
            quit_command: "exit".to_string(),
            ..CalcConfig::default()
        };
        let mut s = Session::new(&config).unwrap();
        assert_eq!(s.handle_line("exit"), Reply::Quit);
        // now an ordinary variable
        assert_eq!(s.handle_line("q"), Reply::Output("= 0".to_string()));
    }

    #[test]
    fn test_errors_keep_session_alive() {
        let mut s = session();
        assert!(matches!(s.handle_line("3+"), Reply::Error(_)));
        assert!(matches!(s.handle_line("1/0"), Reply::Error(_)));
        assert_eq!(s.handle_line("1+1"), Reply::Output("= 2".to_string()));
        assert_eq!(s.handle_line("   "), Reply::Nothing);
    }

    #[test]
    fn test_bad_start_mode() {
        let config = CalcConfig {
            start_mode: Some("d/d".to_string()),
            ..CalcConfig::default()
        };
        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Evaluate.as_ref(), "evaluate");
        assert_eq!(Mode::Differentiate('z').to_string(), "differentiate");
        assert_eq!(Mode::Differentiate('z').describe(), "differentiate d/dz");
    }
}
