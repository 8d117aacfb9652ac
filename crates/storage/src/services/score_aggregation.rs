use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{EventScoring, JuryScore, Registration, ScoredParticipant};

/// A raw jury score row as delivered by the score source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScore {
    pub participant_id: Uuid,
    pub jury_id: Uuid,
    pub jury_name: String,
    pub score: Option<Decimal>,
    pub finalized: bool,
}

impl From<EventScoring> for RawScore {
    fn from(row: EventScoring) -> Self {
        Self {
            participant_id: row.registration_id,
            jury_id: row.jury_id,
            jury_name: row.jury_name,
            score: row.final_score,
            finalized: row.finalized,
        }
    }
}

/// Identity of a participant to aggregate over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantIdentity {
    pub id: Uuid,
    pub name: String,
}

impl From<Registration> for ParticipantIdentity {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.registration_id,
            name: registration.participant_name,
        }
    }
}

#[derive(Default)]
struct Tally<'a> {
    rows: Vec<&'a RawScore>,
}

impl Tally<'_> {
    fn summarize(&self, identity: &ParticipantIdentity) -> ScoredParticipant {
        let jury_scores: Vec<JuryScore> = self
            .rows
            .iter()
            .filter_map(|row| {
                row.score.map(|score| JuryScore {
                    jury_id: row.jury_id,
                    jury_name: row.jury_name.clone(),
                    score,
                })
            })
            .collect();

        let score_count = jury_scores.len() as u32;
        let average_score = if score_count > 0 {
            let sum: Decimal = jury_scores.iter().map(|j| j.score).sum();
            sum / Decimal::from(score_count)
        } else {
            Decimal::ZERO
        };

        ScoredParticipant {
            id: identity.id,
            name: identity.name.clone(),
            average_score,
            score_count,
            jury_scores,
            is_finalized: self.rows.iter().any(|row| row.finalized),
        }
    }
}

/// Reduces raw jury rows to one `ScoredParticipant` per participant.
///
/// Null scores are left out of the average but a finalized row still marks the
/// participant as finalized. Participants without rows come back with
/// `score_count == 0`. Rows for unknown participants are ignored.
///
/// The output is ordered by descending average; equal averages keep the order
/// of `participants`.
pub fn aggregate_scores(
    participants: &[ParticipantIdentity],
    rows: &[RawScore],
) -> Vec<ScoredParticipant> {
    let mut tallies: HashMap<Uuid, Tally<'_>> = HashMap::with_capacity(participants.len());
    for row in rows {
        tallies.entry(row.participant_id).or_default().rows.push(row);
    }

    let empty = Tally::default();
    let mut scored: Vec<ScoredParticipant> = participants
        .iter()
        .map(|identity| {
            tallies
                .get(&identity.id)
                .unwrap_or(&empty)
                .summarize(identity)
        })
        .collect();

    scored.sort_by(|a, b| b.average_score.cmp(&a.average_score));
    scored
}
