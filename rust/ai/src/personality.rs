//! Bot personalities: fixed parameter presets plus the adaptive profile's
//! per-opponent learning state, the only cross-hand mutable state outside
//! the table itself. It lives inside the owning bot's policy value and
//! persists for that bot's lifetime.

use std::collections::HashMap;

use felt_engine::player::Action;

/// The five personality profiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Profile {
    TightAggressive,
    TightPassive,
    LooseAggressive,
    LoosePassive,
    Adaptive,
}

impl Profile {
    pub fn parse(s: &str) -> Option<Profile> {
        match s.to_ascii_lowercase().as_str() {
            "tight-aggressive" | "tag" => Some(Profile::TightAggressive),
            "tight-passive" | "rock" => Some(Profile::TightPassive),
            "loose-aggressive" | "lag" => Some(Profile::LooseAggressive),
            "loose-passive" | "station" => Some(Profile::LoosePassive),
            "adaptive" => Some(Profile::Adaptive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Profile::TightAggressive => "tight-aggressive",
            Profile::TightPassive => "tight-passive",
            Profile::LooseAggressive => "loose-aggressive",
            Profile::LoosePassive => "loose-passive",
            Profile::Adaptive => "adaptive",
        }
    }

    pub fn preset(self) -> PersonalityParams {
        match self {
            Profile::TightAggressive => PersonalityParams {
                play_threshold: 0.55,
                aggression: 0.80,
                bluff_frequency: 0.15,
                fold_to_pressure: 0.60,
            },
            Profile::TightPassive => PersonalityParams {
                play_threshold: 0.55,
                aggression: 0.30,
                bluff_frequency: 0.05,
                fold_to_pressure: 0.40,
            },
            Profile::LooseAggressive => PersonalityParams {
                play_threshold: 0.30,
                aggression: 0.85,
                bluff_frequency: 0.25,
                fold_to_pressure: 0.70,
            },
            Profile::LoosePassive => PersonalityParams {
                play_threshold: 0.30,
                aggression: 0.35,
                bluff_frequency: 0.10,
                fold_to_pressure: 0.50,
            },
            Profile::Adaptive => PersonalityParams {
                play_threshold: 0.45,
                aggression: 0.60,
                bluff_frequency: 0.15,
                fold_to_pressure: 0.50,
            },
        }
    }
}

/// Policy parameters consumed by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityParams {
    /// Pre-flop strength below which the bot folds
    pub play_threshold: f64,
    /// Scales the probability of betting/raising
    pub aggression: f64,
    /// Probability of playing a street as a bluff
    pub bluff_frequency: f64,
    /// Call-to-stack ratio above which the bot folds to pressure
    pub fold_to_pressure: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct OpponentTally {
    actions: u32,
    aggressive: u32,
    folds: u32,
}

/// A bot's personality: the preset it started from and, for the adaptive
/// profile, parameters drifting with the observed table.
#[derive(Debug, Clone)]
pub struct Personality {
    profile: Profile,
    base: PersonalityParams,
    params: PersonalityParams,
    opponents: HashMap<usize, OpponentTally>,
}

impl Personality {
    pub fn new(profile: Profile) -> Self {
        let base = profile.preset();
        Self {
            profile,
            base,
            params: base,
            opponents: HashMap::new(),
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn params(&self) -> PersonalityParams {
        self.params
    }

    /// Record another seat's action. Non-adaptive profiles keep the tally
    /// but never move their parameters.
    pub fn observe(&mut self, seat: usize, action: &Action) {
        let tally = self.opponents.entry(seat).or_default();
        tally.actions += 1;
        match action {
            Action::Bet(_) | Action::Raise(_) | Action::AllIn => tally.aggressive += 1,
            Action::Fold => tally.folds += 1,
            Action::Check | Action::Call => {}
        }
        if self.profile == Profile::Adaptive {
            self.adapt();
        }
    }

    /// Re-derive the working parameters from the base preset and the pooled
    /// opponent rates. Recomputing from the base keeps repeated
    /// observations from compounding; the caps bound the drift.
    fn adapt(&mut self) {
        let mut actions = 0u32;
        let mut aggressive = 0u32;
        let mut folds = 0u32;
        for tally in self.opponents.values() {
            actions += tally.actions;
            aggressive += tally.aggressive;
            folds += tally.folds;
        }
        if actions == 0 {
            return;
        }
        let aggression_rate = f64::from(aggressive) / f64::from(actions);
        let fold_rate = f64::from(folds) / f64::from(actions);

        let mut p = self.base;
        if aggression_rate > 0.4 {
            p.play_threshold = (self.base.play_threshold + 0.10).min(0.70);
            p.fold_to_pressure = (self.base.fold_to_pressure + 0.15).min(0.80);
        }
        if fold_rate > 0.6 {
            p.aggression = (self.base.aggression + 0.15).min(0.95);
            p.bluff_frequency = (self.base.bluff_frequency + 0.10).min(0.35);
        }
        self.params = p;
    }
}
