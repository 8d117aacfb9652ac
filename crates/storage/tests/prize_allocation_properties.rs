use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use storage::models::{PrizeTier, ScoredParticipant};
use storage::services::prize_allocation::{compute_prize_assignments, tie_key};
use uuid::Uuid;

// Half-point steps between 80.0 and 89.5 so ties are common.
fn participants_strategy() -> impl Strategy<Value = Vec<ScoredParticipant>> {
    prop::collection::vec(prop::option::weighted(0.85, 0u32..20), 0..25).prop_map(|scores| {
        scores
            .into_iter()
            .enumerate()
            .map(|(i, step)| ScoredParticipant {
                id: Uuid::from_u128(i as u128 + 1),
                name: format!("Participant {}", i + 1),
                average_score: step
                    .map(|s| Decimal::from(80) + Decimal::new(i64::from(s) * 5, 1))
                    .unwrap_or(Decimal::ZERO),
                score_count: step.map(|_| 3).unwrap_or(0),
                jury_scores: Vec::new(),
                is_finalized: false,
            })
            .collect()
    })
}

fn tiers_strategy() -> impl Strategy<Value = Vec<PrizeTier>> {
    prop::collection::vec(
        (
            1u32..4,
            prop::option::of(78i64..90),
            prop::option::of(82i64..92),
            1i32..6,
        ),
        0..5,
    )
    .prop_map(|tiers| {
        tiers
            .into_iter()
            .enumerate()
            .map(|(i, (max_winners, min, max, order))| PrizeTier {
                prize_level: format!("Prize {}", i + 1),
                display_order: order,
                max_winners,
                min_score: min.map(Decimal::from),
                max_score: max.map(Decimal::from),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn repeated_runs_are_identical(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let first = compute_prize_assignments(&participants, &tiers);
        let second = compute_prize_assignments(&participants, &tiers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_participant_is_counted_once(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);

        prop_assert_eq!(
            result.winner_count() + result.unassigned_count + result.no_score_count,
            participants.len()
        );
        prop_assert_eq!(result.participants.len(), participants.len());

        let listed: HashSet<Uuid> = result.participants.iter().map(|p| p.participant.id).collect();
        prop_assert_eq!(listed.len(), participants.len());
    }

    #[test]
    fn every_tier_is_reported(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);
        prop_assert_eq!(result.tiers.len(), tiers.len());
    }

    #[test]
    fn nobody_wins_twice(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);

        let mut seen = HashSet::new();
        for tier in &result.tiers {
            for winner in &tier.winners {
                prop_assert!(seen.insert(winner.participant.id));
            }
        }
    }

    #[test]
    fn winners_are_in_descending_order(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);

        for tier in &result.tiers {
            for pair in tier.winners.windows(2) {
                prop_assert!(
                    pair[0].participant.average_score >= pair[1].participant.average_score
                );
            }
        }
    }

    #[test]
    fn cap_is_only_exceeded_by_a_single_leading_tie(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);

        for tier in result.tiers.iter().filter(|tier| tier.exceeds_cap()) {
            let first = tie_key(tier.winners[0].participant.average_score);
            for winner in &tier.winners {
                prop_assert_eq!(tie_key(winner.participant.average_score), first);
            }
        }
    }

    #[test]
    fn unscored_participants_never_win_and_trail_in_input_order(
        participants in participants_strategy(),
        tiers in tiers_strategy(),
    ) {
        let result = compute_prize_assignments(&participants, &tiers);

        for tier in &result.tiers {
            for winner in &tier.winners {
                prop_assert!(winner.participant.score_count > 0);
                prop_assert_eq!(winner.prize_level.as_deref(), Some(tier.prize_level.as_str()));
            }
        }

        let first_unscored = result
            .participants
            .iter()
            .position(|p| p.participant.score_count == 0)
            .unwrap_or(result.participants.len());
        for entry in &result.participants[first_unscored..] {
            prop_assert_eq!(entry.participant.score_count, 0);
            prop_assert!(entry.prize_level.is_none());
        }

        let expected_tail: Vec<Uuid> = participants
            .iter()
            .filter(|p| p.score_count == 0)
            .map(|p| p.id)
            .collect();
        let tail: Vec<Uuid> = result.participants[first_unscored..]
            .iter()
            .map(|p| p.participant.id)
            .collect();
        prop_assert_eq!(tail, expected_tail);
    }
}
