use std::time::Instant;

use thiserror::Error;

use crate::deck::Card;

/// Pairs in a standard game (16-card deck).
pub const PAIR_COUNT: usize = 8;

/// Cool-down before a mismatched pair turns back face-down, in milliseconds.
/// The delay lets the player memorize the revealed pair; the session stays
/// locked for its whole duration, so it cannot be cut short by further flips.
pub const MISMATCH_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Playing,
    Won,
}

/// Observable result of a `flip` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Guard violation: locked session, out-of-range position, or a card
    /// already face-up or matched. Nothing changed.
    Ignored,
    /// First card of the turn revealed; waiting for a partner.
    FirstUp { position: usize },
    /// Second card completed a pair. `won` is set when it was the last one.
    Matched { positions: (usize, usize), won: bool },
    /// Second card did not match. The session is now locked; call
    /// `resolve_mismatch` after the cool-down to turn both back down.
    Mismatched { positions: (usize, usize) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a game load is already in flight")]
    LoadInProgress,
    #[error("a game is already being played")]
    GameInProgress,
    #[error("deck can only be dealt while loading")]
    NotLoading,
    #[error("dealt deck does not contain paired cards")]
    UnpairedDeck,
}

/// The game state machine: deck, pick tracking, match count, phase, timer.
///
/// All mutation happens through discrete calls (`begin_loading`, `deal`,
/// `flip`, `resolve_mismatch`); the lock that guards mismatch resolution is
/// derived from the pending pair, so it is true exactly while a resolution is
/// in flight.
#[derive(Debug)]
pub struct GameSession {
    deck: Vec<Card>,
    first_pick: Option<usize>,
    pending_mismatch: Option<(usize, usize)>,
    match_count: usize,
    pairs: usize,
    phase: Phase,
    started_at: Option<Instant>,
    final_ms: Option<u64>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[inline]
    pub fn new() -> Self {
        Self {
            deck: Vec::new(),
            first_pick: None,
            pending_mismatch: None,
            match_count: 0,
            pairs: 0,
            phase: Phase::Idle,
            started_at: None,
            final_ms: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True exactly while a mismatch resolution is pending.
    #[inline]
    pub fn locked(&self) -> bool {
        self.pending_mismatch.is_some()
    }

    #[inline]
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    #[inline]
    pub fn first_pick(&self) -> Option<usize> {
        self.first_pick
    }

    #[inline]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Milliseconds since the load began, frozen at the winning flip.
    /// Zero before any game has started.
    pub fn elapsed_ms(&self) -> u64 {
        match (self.final_ms, self.started_at) {
            (Some(ms), _) => ms,
            (None, Some(t)) => u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX),
            (None, None) => 0,
        }
    }

    /// Start a new load, fully reinitializing the session.
    ///
    /// The timer starts here, before any cards are visible; that ordering is
    /// part of the scoring contract. Refused while a load is already in
    /// flight or a game is being played.
    pub fn begin_loading(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Loading => return Err(SessionError::LoadInProgress),
            Phase::Playing => return Err(SessionError::GameInProgress),
            Phase::Idle | Phase::Won => {}
        }
        self.deck.clear();
        self.first_pick = None;
        self.pending_mismatch = None;
        self.match_count = 0;
        self.pairs = 0;
        self.phase = Phase::Loading;
        self.started_at = Some(Instant::now());
        self.final_ms = None;
        Ok(())
    }

    /// Hand the shuffled deck to the session: `Loading -> Playing`.
    pub fn deal(&mut self, deck: Vec<Card>) -> Result<(), SessionError> {
        if self.phase != Phase::Loading {
            return Err(SessionError::NotLoading);
        }
        if deck.is_empty() || deck.len() % 2 != 0 {
            return Err(SessionError::UnpairedDeck);
        }
        self.pairs = deck.len() / 2;
        self.deck = deck;
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Abandon a failed load: `Loading -> Idle`, timer cleared. The session
    /// stays usable; a later `begin_loading` starts fresh.
    pub fn fail_loading(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::Idle;
            self.started_at = None;
        }
    }

    /// Flip the card at `position`.
    ///
    /// Guard violations (locked session, already face-up or matched card,
    /// out-of-range position, wrong phase) are silent no-ops: nothing about
    /// the session changes and `Ignored` is returned.
    pub fn flip(&mut self, position: usize) -> FlipOutcome {
        if self.phase != Phase::Playing || self.pending_mismatch.is_some() {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.deck.get(position) else {
            return FlipOutcome::Ignored;
        };
        if card.face_up || card.matched {
            return FlipOutcome::Ignored;
        }

        self.deck[position].face_up = true;

        let Some(first) = self.first_pick else {
            self.first_pick = Some(position);
            return FlipOutcome::FirstUp { position };
        };

        // Second pick of the turn.
        if self.deck[first].record.id == self.deck[position].record.id {
            self.deck[first].matched = true;
            self.deck[position].matched = true;
            self.match_count += 1;
            self.first_pick = None;
            let won = self.match_count == self.pairs;
            if won {
                self.phase = Phase::Won;
                self.final_ms = Some(self.elapsed_ms());
            }
            FlipOutcome::Matched {
                positions: (first, position),
                won,
            }
        } else {
            // Lock until the caller resolves after the cool-down.
            self.pending_mismatch = Some((first, position));
            FlipOutcome::Mismatched {
                positions: (first, position),
            }
        }
    }

    /// Turn a pending mismatched pair back face-down and unlock.
    /// Returns false (and changes nothing) when no mismatch is pending.
    pub fn resolve_mismatch(&mut self) -> bool {
        let Some((a, b)) = self.pending_mismatch.take() else {
            return false;
        };
        self.deck[a].face_up = false;
        self.deck[b].face_up = false;
        self.first_pick = None;
        true
    }
}
