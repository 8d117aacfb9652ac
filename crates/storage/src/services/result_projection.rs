use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::prize_allocation::{AssignmentResult, PrizeAssignment, ScoreRange};
use crate::models::JuryScore;

/// One line of the ranked results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResultRow {
    pub position: usize,
    pub rank_label: String,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub average_score: Option<Decimal>,
    pub score_count: u32,
    pub prize_level: Option<String>,
    pub prize_display_order: Option<i32>,
    pub is_finalized: bool,
    pub jury_scores: Vec<JuryScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AchievedRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Per-tier overview: how full the tier is and which scores it actually took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TierSummary {
    pub prize_level: String,
    pub display_order: i32,
    pub max_winners: u32,
    pub winner_count: usize,
    pub over_cap: bool,
    pub score_range: ScoreRange,
    pub achieved_range: Option<AchievedRange>,
}

impl From<&PrizeAssignment> for TierSummary {
    fn from(assignment: &PrizeAssignment) -> Self {
        let scores = assignment
            .winners
            .iter()
            .map(|winner| winner.participant.average_score);
        let achieved_range = scores
            .clone()
            .min()
            .zip(scores.max())
            .map(|(min, max)| AchievedRange { min, max });

        Self {
            prize_level: assignment.prize_level.clone(),
            display_order: assignment.display_order,
            max_winners: assignment.max_winners,
            winner_count: assignment.winners.len(),
            over_cap: assignment.exceeds_cap(),
            score_range: assignment.score_range,
            achieved_range,
        }
    }
}

/// Render-ready view of an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResultsProjection {
    pub rows: Vec<ResultRow>,
    pub tiers: Vec<TierSummary>,
    pub unassigned_count: usize,
    pub no_score_count: usize,
    pub is_finalized: bool,
}

/// Flattens an allocation into display rows plus a tier summary.
pub fn project_results(result: &AssignmentResult) -> ResultsProjection {
    let rows: Vec<ResultRow> = result
        .participants
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            let participant = &entry.participant;
            ResultRow {
                position,
                rank_label: rank_label(entry.prize_level.as_deref(), position),
                participant_id: participant.id,
                participant_name: participant.name.clone(),
                average_score: participant
                    .has_scores()
                    .then_some(participant.average_score),
                score_count: participant.score_count,
                prize_level: entry.prize_level.clone(),
                prize_display_order: entry.prize_display_order,
                is_finalized: participant.is_finalized,
                jury_scores: participant.jury_scores.clone(),
            }
        })
        .collect();

    ResultsProjection {
        is_finalized: rows.iter().any(|row| row.is_finalized),
        rows,
        tiers: result.tiers.iter().map(TierSummary::from).collect(),
        unassigned_count: result.unassigned_count,
        no_score_count: result.no_score_count,
    }
}

/// Prize level when awarded, otherwise the 1-based position as `#n`.
pub fn rank_label(prize_level: Option<&str>, position: usize) -> String {
    match prize_level {
        Some(level) => level.to_string(),
        None => format!("#{}", position),
    }
}

/// Two-decimal score, or "No Score" for participants nobody has scored.
pub fn format_score(average_score: Option<Decimal>) -> String {
    match average_score {
        Some(score) => format!("{:.2}", score),
        None => "No Score".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrizeTier, ScoredParticipant};
    use crate::services::prize_allocation::compute_prize_assignments;

    fn scored(n: u128, average: &str, count: u32) -> ScoredParticipant {
        ScoredParticipant {
            id: Uuid::from_u128(n),
            name: format!("Participant {}", n),
            average_score: average.parse().unwrap(),
            score_count: count,
            jury_scores: Vec::new(),
            is_finalized: n == 2,
        }
    }

    fn tier(level: &str, order: i32, max_winners: u32, min: Option<i64>) -> PrizeTier {
        PrizeTier {
            prize_level: level.to_string(),
            display_order: order,
            max_winners,
            min_score: min.map(Decimal::from),
            max_score: None,
        }
    }

    #[test]
    fn test_rows_follow_allocation_order_with_labels() {
        let participants = vec![
            scored(1, "91.5", 3),
            scored(2, "84.25", 3),
            scored(3, "60", 2),
            scored(4, "0", 0),
        ];
        let tiers = vec![tier("1st Place", 1, 1, Some(90)), tier("2nd Place", 2, 1, Some(80))];

        let projection = project_results(&compute_prize_assignments(&participants, &tiers));

        let labels: Vec<&str> = projection.rows.iter().map(|r| r.rank_label.as_str()).collect();
        assert_eq!(labels, vec!["1st Place", "2nd Place", "#3", "#4"]);
        assert_eq!(projection.rows[3].average_score, None);
        assert_eq!(projection.rows[2].average_score, Some(Decimal::from(60)));
        assert_eq!(projection.unassigned_count, 1);
        assert_eq!(projection.no_score_count, 1);
        assert!(projection.is_finalized);
    }

    #[test]
    fn test_tier_summary_reports_achieved_range_and_cap() {
        let participants = vec![scored(1, "88", 3), scored(2, "88", 3), scored(3, "70", 3)];
        let tiers = vec![tier("Gold", 1, 1, Some(85)), tier("Silver", 2, 2, Some(95))];

        let projection = project_results(&compute_prize_assignments(&participants, &tiers));

        let gold = &projection.tiers[0];
        assert_eq!(gold.winner_count, 2);
        assert!(gold.over_cap);
        assert_eq!(
            gold.achieved_range,
            Some(AchievedRange {
                min: Decimal::from(88),
                max: Decimal::from(88)
            })
        );

        let silver = &projection.tiers[1];
        assert_eq!(silver.winner_count, 0);
        assert!(!silver.over_cap);
        assert_eq!(silver.achieved_range, None);
        assert_eq!(silver.score_range.min, Decimal::from(95));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some("87.5".parse().unwrap())), "87.50");
        assert_eq!(format_score(Some("90.3333333".parse().unwrap())), "90.33");
        assert_eq!(format_score(None), "No Score");
    }
}
