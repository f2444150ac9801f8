//! Terminal frontend: fetches movies through the proxy and runs a round of
//! "this or that" on stdin/stdout.

use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::debug;

use crate::game::{self, Choice, GameError, GameSession, GameState};
use crate::tmdb::{Movie, MovieFilter};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("Could not reach the proxy: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Proxy answered {0}: {1}")]
    Proxy(u16, String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Round abandoned")]
    Aborted,
}

pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self, PlayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>, PlayError> {
        let mut query: Vec<(&str, String)> = vec![("tagline", filter.requires_tagline.to_string())];
        if let Some(genre) = filter.genre() {
            query.push(("genre", genre.to_string()));
        }
        if let Some(platform) = filter.platform() {
            query.push(("platform", platform.to_string()));
        }

        let response = self
            .http
            .get(format!("{}/api/movies", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("no details").to_string();
            return Err(PlayError::Proxy(status.as_u16(), message));
        }

        Ok(response.json().await?)
    }
}

fn show_pair<W: Write>(output: &mut W, first: &Movie, second: &Movie) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "  1) {}", first.tagline)?;
    writeln!(output, "  2) {}", second.tagline)?;
    write!(output, "Which one? [1/2, q to quit] ")?;
    output.flush()
}

fn read_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Choice, PlayError> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(PlayError::Aborted);
        }
        match line.trim() {
            "1" => return Ok(Choice::First),
            "2" => return Ok(Choice::Second),
            "q" | "quit" => return Err(PlayError::Aborted),
            _ => {
                write!(output, "Please answer 1 or 2: ")?;
                output.flush()?;
            }
        }
    }
}

/// Play one round to the end and return the winner.
pub fn play_round<R: BufRead, W: Write>(
    candidates: Vec<Movie>,
    input: &mut R,
    output: &mut W,
) -> Result<Movie, PlayError> {
    let mut session = GameSession::start(candidates)?;
    writeln!(
        output,
        "{} taglines, pick the one you like better each time.",
        session.remaining()
    )?;

    loop {
        let choice = match session.state() {
            GameState::RoundComplete { winner } => {
                writeln!(output)?;
                writeln!(output, "Winner: {}", winner.title)?;
                writeln!(output, "  \"{}\"", winner.tagline)?;
                return Ok(winner.clone());
            }
            GameState::AwaitingChoice { first, second } => {
                show_pair(output, first, second)?;
                read_choice(input, output)?
            }
        };
        session.pick(choice)?;
        debug!(picks = session.picks(), remaining = session.remaining(), "pick");
    }
}

pub async fn run_play(base_url: &str, filter: MovieFilter, count: usize) -> Result<Movie, PlayError> {
    let count = game::check_count(count)?;
    let client = ProxyClient::new(base_url)?;
    let filter = MovieFilter {
        requires_tagline: true,
        ..filter
    };
    let pool = client.fetch_movies(&filter).await?;
    let candidates = game::select_round(&pool, count, &mut rand::thread_rng())?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play_round(candidates, &mut stdin.lock(), &mut stdout.lock())
}
