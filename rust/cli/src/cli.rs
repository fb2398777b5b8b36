//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Top-level argument parser for the `felt` binary.
#[derive(Debug, Parser)]
#[command(name = "felt", version, about = "No-limit hold'em at the terminal")]
pub struct FeltCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play hands against scripted opponents
    Play {
        /// Number of bot opponents seated at the table
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=8))]
        bots: u8,

        /// Stop after this many hands (default: play until the game ends)
        #[arg(long)]
        hands: Option<u32>,

        /// RNG seed for reproducible deals and bot decisions
        #[arg(long)]
        seed: Option<u64>,

        /// Fill the human seat with a bot and run without input
        #[arg(long)]
        auto: bool,

        /// Comma-separated personalities cycled through the bot seats
        /// (tight-aggressive, tight-passive, loose-aggressive,
        /// loose-passive, adaptive)
        #[arg(long, value_delimiter = ',')]
        personality: Vec<String>,
    },

    /// Deal one hand face-up for inspection
    Deal {
        /// RNG seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the deal as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_defaults_to_three_bots() {
        let cli = FeltCli::try_parse_from(["felt", "play"]).unwrap();
        match cli.cmd {
            Commands::Play { bots, auto, .. } => {
                assert_eq!(bots, 3);
                assert!(!auto);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn bot_count_is_range_checked() {
        assert!(FeltCli::try_parse_from(["felt", "play", "--bots", "0"]).is_err());
        assert!(FeltCli::try_parse_from(["felt", "play", "--bots", "9"]).is_err());
        assert!(FeltCli::try_parse_from(["felt", "play", "--bots", "8"]).is_ok());
    }

    #[test]
    fn personalities_split_on_commas() {
        let cli =
            FeltCli::try_parse_from(["felt", "play", "--personality", "tag,adaptive"]).unwrap();
        match cli.cmd {
            Commands::Play { personality, .. } => {
                assert_eq!(personality, vec!["tag", "adaptive"]);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn deal_accepts_seed_and_json() {
        let cli = FeltCli::try_parse_from(["felt", "deal", "--seed", "42", "--json"]).unwrap();
        match cli.cmd {
            Commands::Deal { seed, json } => {
                assert_eq!(seed, Some(42));
                assert!(json);
            }
            _ => panic!("expected deal"),
        }
    }
}
