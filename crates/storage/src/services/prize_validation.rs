use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{PrizeConfiguration, PrizeTier};

/// Checks a new or edited tier against the other active tiers of its scope.
///
/// Rejects inverted bounds, a display order already taken, and a fully bounded
/// range intersecting another fully bounded range. Tiers with an open side are
/// not compared for overlap so that catch-all tiers stay configurable.
/// `editing` is the id of the configuration being replaced, if any.
pub fn validate_prize_tier(
    candidate: &PrizeTier,
    existing: &[PrizeConfiguration],
    editing: Option<Uuid>,
) -> Result<()> {
    if let (Some(min), Some(max)) = (candidate.min_score, candidate.max_score)
        && min > max
    {
        return Err(StorageError::ConstraintViolation(
            "Minimum score cannot be greater than maximum score".to_string(),
        ));
    }

    let others = existing
        .iter()
        .filter(|config| config.active && Some(config.prize_id) != editing);

    for other in others {
        if other.display_order == candidate.display_order {
            return Err(StorageError::ConstraintViolation(format!(
                "Display order {} is already used by '{}'",
                candidate.display_order, other.prize_level
            )));
        }

        if ranges_overlap(
            (candidate.min_score, candidate.max_score),
            (other.min_score, other.max_score),
        ) {
            return Err(StorageError::ConstraintViolation(format!(
                "Score range overlaps with existing prize configuration '{}'",
                other.prize_level
            )));
        }
    }

    Ok(())
}

type Bounds = (Option<Decimal>, Option<Decimal>);

fn ranges_overlap(a: Bounds, b: Bounds) -> bool {
    match (a, b) {
        ((Some(a_min), Some(a_max)), (Some(b_min), Some(b_max))) => {
            a_min <= b_max && b_min <= a_max
        }
        _ => false,
    }
}
