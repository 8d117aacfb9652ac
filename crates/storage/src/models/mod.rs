mod event_scoring;
mod event_winner;
mod prize_configuration;
mod prize_tier;
mod registration;
mod scope;
mod scored_participant;
mod scoring_history;

pub use event_scoring::EventScoring;
pub use event_winner::EventWinner;
pub use prize_configuration::PrizeConfiguration;
pub use prize_tier::PrizeTier;
pub use registration::Registration;
pub use scope::{ScopeLabel, ScoringScope};
pub use scored_participant::{JuryScore, ScoredParticipant};
pub use scoring_history::{FieldChange, ScoringHistoryEntry, ScoringOperation};
