use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::types::CardRecord;

/// One in-play card. A deck holds exactly two cards per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub record: CardRecord,
    pub face_up: bool,
    pub matched: bool,
    /// Final index after the shuffle; stable for the rest of the session.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("no records supplied")]
    Empty,
    #[error("duplicate record id {0} in input")]
    DuplicateRecord(u32),
}

/// Build a shuffled deck of paired cards from `records`.
///
/// Input must hold each desired record exactly once; the builder duplicates
/// every record to produce the 2N-card deck, shuffles it with an unbiased
/// Fisher-Yates permutation, and assigns `position` = final index. All cards
/// start face-down and unmatched.
pub fn build_deck<R: Rng>(records: &[CardRecord], rng: &mut R) -> Result<Vec<Card>, DeckError> {
    if records.is_empty() {
        return Err(DeckError::Empty);
    }
    // uniqueness check, same shape as the catalog loader's duplicate-id guard
    for (i, r) in records.iter().enumerate() {
        if records[..i].iter().any(|prev| prev.id == r.id) {
            return Err(DeckError::DuplicateRecord(r.id));
        }
    }

    let mut paired: Vec<CardRecord> = Vec::with_capacity(records.len() * 2);
    for r in records {
        paired.push(r.clone());
        paired.push(r.clone());
    }
    paired.shuffle(rng);

    Ok(paired
        .into_iter()
        .enumerate()
        .map(|(position, record)| Card {
            record,
            face_up: false,
            matched: false,
            position,
        })
        .collect())
}
