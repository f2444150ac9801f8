use std::collections::{HashSet, VecDeque};

use super::GameError;
use crate::tmdb::Movie;

/// Which of the two shown movies the player kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState<'a> {
    AwaitingChoice { first: &'a Movie, second: &'a Movie },
    RoundComplete { winner: &'a Movie },
}

/// One round of "this or that". The current favourite meets each remaining
/// candidate in order; whoever loses a pick is gone for good.
#[derive(Debug, Clone)]
pub struct GameSession {
    champion: Movie,
    challenger: Option<Movie>,
    pending: VecDeque<Movie>,
    picks: usize,
}

impl GameSession {
    pub fn start(candidates: Vec<Movie>) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<Movie> = candidates
            .into_iter()
            .filter(|m| seen.insert(m.id))
            .collect();

        let champion = queue.pop_front().ok_or(GameError::EmptyPool)?;
        let challenger = queue.pop_front();

        Ok(Self {
            champion,
            challenger,
            pending: queue,
            picks: 0,
        })
    }

    pub fn state(&self) -> GameState<'_> {
        match &self.challenger {
            Some(challenger) => GameState::AwaitingChoice {
                first: &self.champion,
                second: challenger,
            },
            None => GameState::RoundComplete {
                winner: &self.champion,
            },
        }
    }

    pub fn pick(&mut self, choice: Choice) -> Result<GameState<'_>, GameError> {
        let challenger = self.challenger.take().ok_or(GameError::RoundOver)?;
        if choice == Choice::Second {
            self.champion = challenger;
        }
        self.challenger = self.pending.pop_front();
        self.picks += 1;
        Ok(self.state())
    }

    /// Pick by movie id, as a frontend that only knows ids would.
    pub fn pick_id(&mut self, id: u64) -> Result<GameState<'_>, GameError> {
        let challenger_id = self
            .challenger
            .as_ref()
            .map(|m| m.id)
            .ok_or(GameError::RoundOver)?;

        let choice = if id == self.champion.id {
            Choice::First
        } else if id == challenger_id {
            Choice::Second
        } else {
            return Err(GameError::NotInPair(id));
        };
        self.pick(choice)
    }

    pub fn is_complete(&self) -> bool {
        self.challenger.is_none()
    }

    pub fn winner(&self) -> Option<&Movie> {
        self.is_complete().then_some(&self.champion)
    }

    /// Movies still in the running, the active pair included.
    pub fn remaining(&self) -> usize {
        1 + usize::from(self.challenger.is_some()) + self.pending.len()
    }

    pub fn picks(&self) -> usize {
        self.picks
    }
}
