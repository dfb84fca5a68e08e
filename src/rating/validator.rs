//! Guards on the participant set of a match

use crate::error::RatingError;
use crate::types::PlayerId;
use std::collections::HashSet;

/// Validate the participant set before any I/O happens
///
/// Fails if fewer than two participants are present, if any participant id
/// repeats, or if the reader (officiant) is also a participant. Empty-string
/// ids are ordinary identifiers; no special-casing.
pub fn validate_participants(
    participants: &[PlayerId],
    reader: Option<&PlayerId>,
) -> crate::error::Result<()> {
    if participants.len() < 2 {
        return Err(RatingError::InsufficientParticipants {
            count: participants.len(),
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for id in participants {
        if !seen.insert(id) {
            return Err(RatingError::DuplicateParticipant {
                participant_id: id.clone(),
            }
            .into());
        }
    }

    if let Some(reader_id) = reader {
        if seen.contains(reader_id) {
            return Err(RatingError::DuplicateParticipant {
                participant_id: reader_id.clone(),
            }
            .into());
        }
    }

    Ok(())
}
