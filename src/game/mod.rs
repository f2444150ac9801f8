pub mod selector;
pub mod session;

pub use selector::*;
pub use session::*;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("No movies with a tagline matched these filters, try broadening them")]
    EmptyPool,
    #[error("A round needs at least one candidate, got count=0")]
    ZeroCount,
    #[error("The round is already over")]
    RoundOver,
    #[error("Movie {0} is not one of the two shown")]
    NotInPair(u64),
}
