use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::GameError;
use crate::tmdb::Movie;

/// Draw `count` movies from `pool` without replacement. A pool smaller than
/// `count` is returned whole, in random order.
pub fn pick_candidates<R: Rng + ?Sized>(pool: &[Movie], count: usize, rng: &mut R) -> Vec<Movie> {
    pool.choose_multiple(rng, count).cloned().collect()
}

/// Reject a round size of zero before any movies are fetched.
pub fn check_count(count: usize) -> Result<usize, GameError> {
    if count == 0 {
        return Err(GameError::ZeroCount);
    }
    Ok(count)
}

/// Candidates for one round: only movies with a tagline, one per id.
pub fn select_round<R: Rng + ?Sized>(
    pool: &[Movie],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Movie>, GameError> {
    check_count(count)?;

    let mut seen = HashSet::new();
    let eligible: Vec<Movie> = pool
        .iter()
        .filter(|m| m.has_tagline() && seen.insert(m.id))
        .cloned()
        .collect();

    let candidates = pick_candidates(&eligible, count, rng);
    if candidates.is_empty() {
        return Err(GameError::EmptyPool);
    }
    Ok(candidates)
}
