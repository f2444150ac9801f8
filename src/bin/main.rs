use clap::{Parser, Subcommand};
use thisorthat_rs::play::{self, DEFAULT_BASE_URL};
use thisorthat_rs::tmdb::MovieFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "thisorthat-server")]
#[command(about = "Movie tagline proxy and \"this or that\" game", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the proxy (default)
    Serve,
    /// Play a round in the terminal against a running proxy
    Play {
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(short, long)]
        genre: Option<String>,
        #[arg(short, long)]
        platform: Option<String>,
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "thisorthat_rs=debug,tower_http=debug"
    } else {
        "thisorthat_rs=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match args.command.unwrap_or(Command::Serve) {
        Command::Serve => thisorthat_rs::run(args.config.as_deref(), args.debug)
            .await
            .map_err(|e| e.to_string()),
        Command::Play {
            base_url,
            genre,
            platform,
            count,
        } => {
            let filter = MovieFilter {
                genre,
                platform,
                requires_tagline: true,
            };
            play::run_play(&base_url, filter, count)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
