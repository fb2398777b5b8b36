//! Scripted opponents for the felt table.
//!
//! The crate layers three pieces:
//! - [`strength`]: hand-strength heuristics and pot-odds arithmetic
//! - [`personality`]: the five bot profiles and adaptive learning state
//! - [`decision`]: the engine that turns a table snapshot into an action
//!
//! A bot plugs into the table as an
//! [`ActionPolicy`](felt_engine::table::ActionPolicy):
//!
//! ```
//! use felt_ai::{create_policy_seeded, Profile};
//!
//! let policy = create_policy_seeded(Profile::TightAggressive, 42);
//! ```

pub mod decision;
pub mod personality;
pub mod strength;

pub use decision::BotDecisionEngine;
pub use personality::{Personality, PersonalityParams, Profile};

use felt_engine::table::ActionPolicy;

/// Build a boxed policy for the given profile, seeded from the OS.
pub fn create_policy(profile: Profile) -> Box<dyn ActionPolicy> {
    Box::new(BotDecisionEngine::new(profile))
}

/// Build a boxed policy with a fixed RNG seed for reproducible play.
pub fn create_policy_seeded(profile: Profile, seed: u64) -> Box<dyn ActionPolicy> {
    Box::new(BotDecisionEngine::with_seed(profile, seed))
}
