//! Propagates a custom format's score into the quality profiles of an instance.

use cfsync_arr_api::{ArrClient, CustomFormat, QualityProfile, TransportError};
use tracing::{info, warn};

/// Set the score of every item in `profile` referring to `format_id`. Returns `true` if any
/// score actually changed.
pub fn apply_score(profile: &mut QualityProfile, format_id: i32, score: i32) -> bool {
    let mut changed = false;
    for item in profile
        .format_items
        .iter_mut()
        .filter(|i| i.format == format_id)
    {
        if item.score != score {
            item.score = score;
            changed = true;
        }
    }

    changed
}

/// Give `custom_format` the score `score` in every quality profile on the instance. Only profiles
/// where a score changed are written back, in full. Returns the number of profiles written.
///
/// The first failing call aborts the remaining profiles.
pub async fn propagate_score<C: ArrClient + ?Sized>(
    client: &C,
    custom_format: &CustomFormat,
    score: i32,
) -> Result<usize, TransportError> {
    let format_id = match custom_format.id {
        Some(id) => id,
        None => {
            warn!(name = %custom_format.name, "Custom format has no id, cannot assign its score.");
            return Ok(0);
        }
    };

    let mut updated = 0;
    for mut profile in client.list_quality_profiles().await? {
        if !apply_score(&mut profile, format_id, score) {
            continue;
        }

        client.update_quality_profile(&profile).await?;
        info!(
            name = %custom_format.name,
            profile = %profile.name,
            score = score,
            "Updated score in quality profile."
        );
        updated += 1;
    }

    Ok(updated)
}
