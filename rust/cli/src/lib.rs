//! # Felt CLI Library
//!
//! Command-line interface for the felt poker table: an interactive
//! no-limit hold'em session against scripted opponents, plus a face-up
//! deal command for inspecting the dealing procedure.
//!
//! The primary entry point is [`run`], which parses arguments and executes
//! the matching subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["felt", "deal", "--seed", "42"];
//! let code = felt_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::io::Write;

use clap::Parser;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod formatters;
pub mod ui;
pub mod validation;

use cli::{Commands, FeltCli};
use commands::{handle_deal_command, handle_play_command};
pub use error::CliError;

/// Parse arguments and dispatch to the matching subcommand.
///
/// Returns an exit code: `0` for success, `2` for errors, `130` when the
/// input stream closes while the game still needs a decision.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = match FeltCli::try_parse_from(&argv) {
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                // Help and version print to stdout and exit 0
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return 2;
                    }
                    0
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    2
                }
            };
        }
        Ok(cli) => cli,
    };

    let result = match parsed.cmd {
        Commands::Play {
            bots,
            hands,
            seed,
            auto,
            personality,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                bots,
                hands,
                seed,
                auto,
                personality,
                out,
                err,
                &mut stdin_lock,
            )
        }
        Commands::Deal { seed, json } => handle_deal_command(seed, json, out),
    };

    match result {
        Ok(()) => 0,
        Err(CliError::Interrupted(msg)) => {
            let _ = ui::write_error(err, &msg);
            130
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_exits_zero_on_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["felt", "--help"], &mut out, &mut err);
        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().contains("play"));
    }

    #[test]
    fn unknown_command_exits_two() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["felt", "simulate"], &mut out, &mut err);
        assert_eq!(code, 2);
        assert!(!err.is_empty());
    }

    #[test]
    fn deal_dispatch_succeeds() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["felt", "deal", "--seed", "42"], &mut out, &mut err);
        assert_eq!(code, 0);
        assert!(!out.is_empty());
    }

    #[test]
    fn invalid_bot_count_exits_two() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["felt", "play", "--bots", "99"], &mut out, &mut err);
        assert_eq!(code, 2);
    }
}
