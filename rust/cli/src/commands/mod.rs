//! Subcommand handlers.

mod deal;
mod play;

pub use deal::handle_deal_command;
pub use play::handle_play_command;
