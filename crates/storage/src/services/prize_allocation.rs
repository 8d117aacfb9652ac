use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::models::{PrizeTier, ScoredParticipant};

/// Number of decimal places two averages must agree on to count as a tie.
pub const TIE_SCORE_DECIMALS: u32 = 1;

const DEFAULT_RANGE_MIN: i64 = 0;
const DEFAULT_RANGE_MAX: i64 = 100;

/// Effective score bounds of a tier, missing bounds filled with 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl ScoreRange {
    fn for_tier(tier: &PrizeTier) -> Self {
        Self {
            min: tier.min_score.unwrap_or(Decimal::from(DEFAULT_RANGE_MIN)),
            max: tier.max_score.unwrap_or(Decimal::from(DEFAULT_RANGE_MAX)),
        }
    }
}

/// A participant annotated with the tier they won, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AwardedParticipant {
    #[serde(flatten)]
    pub participant: ScoredParticipant,
    pub prize_level: Option<String>,
    pub prize_display_order: Option<i32>,
}

impl AwardedParticipant {
    fn awarded(participant: &ScoredParticipant, tier: &PrizeTier) -> Self {
        Self {
            participant: participant.clone(),
            prize_level: Some(tier.prize_level.clone()),
            prize_display_order: Some(tier.display_order),
        }
    }

    fn unawarded(participant: &ScoredParticipant) -> Self {
        Self {
            participant: participant.clone(),
            prize_level: None,
            prize_display_order: None,
        }
    }
}

/// Winners of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrizeAssignment {
    pub prize_level: String,
    pub display_order: i32,
    pub max_winners: u32,
    pub winners: Vec<AwardedParticipant>,
    pub score_range: ScoreRange,
}

impl PrizeAssignment {
    /// True when a leading tie pushed the winner count past the cap.
    pub fn exceeds_cap(&self) -> bool {
        self.winners.len() > self.max_winners as usize
    }
}

/// Full allocator output.
///
/// `tiers` holds one entry per configured tier in processing order.
/// `participants` lists every input participant exactly once: winners tier by
/// tier, then scored participants without a prize, then unscored ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignmentResult {
    pub tiers: Vec<PrizeAssignment>,
    pub participants: Vec<AwardedParticipant>,
    pub unassigned_count: usize,
    pub no_score_count: usize,
}

impl AssignmentResult {
    pub fn winner_count(&self) -> usize {
        self.tiers.iter().map(|tier| tier.winners.len()).sum()
    }
}

/// Key under which two averages are considered tied.
pub fn tie_key(score: Decimal) -> Decimal {
    score.round_dp_with_strategy(TIE_SCORE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Assigns participants to prize tiers.
///
/// Tiers are processed by ascending `display_order`. Each tier takes the best
/// unclaimed scored participants inside its range, one tie group at a time,
/// while the group still fits under `max_winners`. A tie group that comes
/// first in a tier is taken whole even past the cap; a later group that does
/// not fit is left for the following tiers. Unscored participants never win.
pub fn compute_prize_assignments(
    participants: &[ScoredParticipant],
    tiers: &[PrizeTier],
) -> AssignmentResult {
    let (mut pool, no_score): (Vec<&ScoredParticipant>, Vec<&ScoredParticipant>) =
        participants.iter().partition(|p| p.has_scores());
    pool.sort_by(|a, b| b.average_score.cmp(&a.average_score));

    let mut ordered: Vec<&PrizeTier> = tiers.iter().collect();
    ordered.sort_by_key(|tier| tier.display_order);
    if let Some(pair) = ordered
        .windows(2)
        .find(|pair| pair[0].display_order == pair[1].display_order)
    {
        warn!(
            display_order = pair[0].display_order,
            "prize tiers share a display order, processing them in configuration order"
        );
    }

    let mut claimed = vec![false; pool.len()];
    let mut assignments = Vec::with_capacity(ordered.len());
    let mut awarded = Vec::with_capacity(participants.len());

    for tier in ordered {
        let candidates: Vec<usize> = (0..pool.len())
            .filter(|&i| !claimed[i] && tier.accepts(pool[i].average_score))
            .collect();

        let selected = select_winners(&pool, &candidates, tier.max_winners);

        let mut winners = Vec::with_capacity(selected.len());
        for i in selected {
            claimed[i] = true;
            winners.push(AwardedParticipant::awarded(pool[i], tier));
        }
        awarded.extend(winners.iter().cloned());

        assignments.push(PrizeAssignment {
            prize_level: tier.prize_level.clone(),
            display_order: tier.display_order,
            max_winners: tier.max_winners,
            winners,
            score_range: ScoreRange::for_tier(tier),
        });
    }

    let unassigned: Vec<AwardedParticipant> = pool
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(participant, _)| AwardedParticipant::unawarded(participant))
        .collect();
    let unassigned_count = unassigned.len();
    awarded.extend(unassigned);
    awarded.extend(no_score.iter().map(|p| AwardedParticipant::unawarded(p)));

    AssignmentResult {
        tiers: assignments,
        participants: awarded,
        unassigned_count,
        no_score_count: no_score.len(),
    }
}

/// Picks winner indices from `candidates`, which must already be in
/// descending score order.
fn select_winners(pool: &[&ScoredParticipant], candidates: &[usize], cap: u32) -> Vec<usize> {
    let cap = cap as usize;
    let mut winners = Vec::new();

    let groups = candidates.chunk_by(|&a, &b| {
        tie_key(pool[a].average_score) == tie_key(pool[b].average_score)
    });

    for group in groups {
        if winners.len() + group.len() <= cap {
            winners.extend_from_slice(group);
            if winners.len() >= cap {
                break;
            }
        } else {
            if winners.is_empty() {
                winners.extend_from_slice(group);
            }
            break;
        }
    }

    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn score(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn scored(n: u128, average: &str) -> ScoredParticipant {
        ScoredParticipant {
            id: Uuid::from_u128(n),
            name: format!("Participant {}", n),
            average_score: score(average),
            score_count: 3,
            jury_scores: Vec::new(),
            is_finalized: false,
        }
    }

    fn unscored(n: u128) -> ScoredParticipant {
        ScoredParticipant {
            score_count: 0,
            average_score: Decimal::ZERO,
            ..scored(n, "0")
        }
    }

    fn tier(
        level: &str,
        order: i32,
        max_winners: u32,
        min: Option<&str>,
        max: Option<&str>,
    ) -> PrizeTier {
        PrizeTier {
            prize_level: level.to_string(),
            display_order: order,
            max_winners,
            min_score: min.map(score),
            max_score: max.map(score),
        }
    }

    fn ids(winners: &[AwardedParticipant]) -> Vec<u128> {
        winners.iter().map(|w| w.participant.id.as_u128()).collect()
    }

    #[test]
    fn test_single_leader_wins_and_trailing_tie_cascades() {
        let participants = vec![scored(1, "95"), scored(2, "90"), scored(3, "90")];
        let tiers = vec![tier("1st Place", 1, 1, Some("90"), Some("100"))];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
        assert_eq!(result.unassigned_count, 2);
        assert_eq!(result.participants[1].prize_level, None);
        assert_eq!(result.participants[2].prize_level, None);
    }

    #[test]
    fn test_leading_tie_overrides_cap() {
        let participants = vec![scored(1, "90"), scored(2, "90"), scored(3, "90")];
        let tiers = vec![tier("1st Place", 1, 1, Some("80"), Some("100"))];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(result.tiers[0].winners.len(), 3);
        assert!(result.tiers[0].exceeds_cap());
        assert_eq!(result.unassigned_count, 0);
    }

    #[test]
    fn test_two_tiers_split_by_range() {
        let participants = vec![scored(1, "95"), scored(2, "85"), scored(3, "80")];
        let tiers = vec![
            tier("Gold", 1, 1, Some("90"), Some("100")),
            tier("Silver", 2, 2, Some("0"), Some("89")),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
        assert_eq!(ids(&result.tiers[1].winners), vec![2, 3]);
        assert_eq!(result.tiers[1].winners[0].prize_level.as_deref(), Some("Silver"));
        assert_eq!(result.tiers[1].winners[0].prize_display_order, Some(2));
    }

    #[test]
    fn test_unscored_participant_is_last_and_never_wins() {
        let participants = vec![unscored(1), scored(2, "70"), scored(3, "60")];
        let tiers = vec![tier("Participation", 1, 10, None, None)];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![2, 3]);
        let last = result.participants.last().unwrap();
        assert_eq!(last.participant.id, Uuid::from_u128(1));
        assert_eq!(last.prize_level, None);
        assert_eq!(result.no_score_count, 1);
    }

    #[test]
    fn test_unscored_participants_keep_input_order_at_the_end() {
        let participants = vec![
            unscored(5),
            scored(2, "88"),
            unscored(3),
            scored(4, "92"),
            scored(1, "92"),
            scored(6, "70"),
            unscored(7),
        ];
        let tiers = vec![
            tier("T1", 1, 2, Some("90"), None),
            tier("T2", 2, 1, Some("80"), None),
            tier("T3", 3, 1, None, None),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.participants), vec![4, 1, 2, 6, 5, 3, 7]);
        let levels: Vec<Option<&str>> = result
            .participants
            .iter()
            .map(|p| p.prize_level.as_deref())
            .collect();
        assert_eq!(
            levels,
            vec![Some("T1"), Some("T1"), Some("T2"), Some("T3"), None, None, None]
        );
        assert_eq!(result.no_score_count, 3);
    }

    #[test]
    fn test_no_tiers_leaves_everyone_unassigned_in_score_order() {
        let participants = vec![scored(1, "70"), scored(2, "88"), unscored(3), scored(4, "79.5")];

        let result = compute_prize_assignments(&participants, &[]);

        assert!(result.tiers.is_empty());
        assert_eq!(ids(&result.participants), vec![2, 4, 1, 3]);
        assert_eq!(result.unassigned_count, 3);
        assert_eq!(result.no_score_count, 1);
    }

    #[test]
    fn test_tie_after_winners_cascades_to_next_tier() {
        let participants = vec![
            scored(1, "96"),
            scored(2, "93"),
            scored(3, "93"),
            scored(4, "91"),
        ];
        let tiers = vec![
            tier("1st Place", 1, 2, Some("90"), None),
            tier("2nd Place", 2, 3, Some("90"), None),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
        assert_eq!(ids(&result.tiers[1].winners), vec![2, 3, 4]);
    }

    #[test]
    fn test_empty_tier_is_still_reported() {
        let participants = vec![scored(1, "50")];
        let tiers = vec![
            tier("1st Place", 1, 1, Some("90"), None),
            tier("Honorable Mention", 2, 5, None, None),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(result.tiers.len(), 2);
        assert!(result.tiers[0].winners.is_empty());
        assert_eq!(ids(&result.tiers[1].winners), vec![1]);
    }

    #[test]
    fn test_tiers_processed_by_display_order() {
        let participants = vec![scored(1, "99"), scored(2, "98")];
        let tiers = vec![
            tier("2nd Place", 2, 1, None, None),
            tier("1st Place", 1, 1, None, None),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(result.tiers[0].prize_level, "1st Place");
        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
        assert_eq!(ids(&result.tiers[1].winners), vec![2]);
    }

    #[test]
    fn test_duplicate_display_orders_keep_configuration_order() {
        let participants = vec![scored(1, "99"), scored(2, "98")];
        let tiers = vec![
            tier("Gold A", 1, 1, None, None),
            tier("Gold B", 1, 1, None, None),
        ];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(result.tiers.len(), 2);
        assert_eq!(result.tiers[0].prize_level, "Gold A");
        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
        assert_eq!(ids(&result.tiers[1].winners), vec![2]);
    }

    #[test]
    fn test_scores_equal_at_one_decimal_are_tied() {
        let participants = vec![scored(1, "90.04"), scored(2, "89.96"), scored(3, "80")];
        let tiers = vec![tier("1st Place", 1, 1, None, None)];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![1, 2]);
    }

    #[test]
    fn test_scores_differing_at_one_decimal_are_not_tied() {
        let participants = vec![scored(1, "90.1"), scored(2, "90.0")];
        let tiers = vec![tier("1st Place", 1, 1, None, None)];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![1]);
    }

    #[test]
    fn test_max_bound_excludes_higher_scores() {
        let participants = vec![scored(1, "95"), scored(2, "85")];
        let tiers = vec![tier("Silver", 1, 5, Some("80"), Some("89.99"))];

        let result = compute_prize_assignments(&participants, &tiers);

        assert_eq!(ids(&result.tiers[0].winners), vec![2]);
        assert_eq!(ids(&result.participants), vec![2, 1]);
    }

    #[test]
    fn test_score_range_defaults() {
        let tiers = vec![tier("Open", 1, 1, None, None)];

        let result = compute_prize_assignments(&[], &tiers);

        assert_eq!(result.tiers[0].score_range.min, Decimal::ZERO);
        assert_eq!(result.tiers[0].score_range.max, Decimal::from(100));
        assert!(result.participants.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let participants = vec![scored(1, "90"), scored(2, "90"), scored(3, "70"), unscored(4)];
        let tiers = vec![
            tier("1st Place", 1, 1, Some("85"), None),
            tier("2nd Place", 2, 1, None, Some("84.9")),
        ];

        let first = compute_prize_assignments(&participants, &tiers);
        let second = compute_prize_assignments(&participants, &tiers);

        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_key_rounds_half_away_from_zero() {
        assert_eq!(tie_key(score("90.05")), score("90.1"));
        assert_eq!(tie_key(score("90.049")), score("90.0"));
    }
}
