// ABOUTME: CLI for searching FilmAffinity and rendering the assistant's replies in a terminal.
// ABOUTME: Prints raw JSON records with --json, otherwise the Spanish cards, lists or speech text.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filmbot_client::{Client, Locale, DEFAULT_BASE_URL};
use filmbot_speech::{card_for_movie, describe_movie, Conversation};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "filmbot")]
#[command(about = "Search movies on FilmAffinity and print what the assistant would answer")]
struct Args {
    /// Two-letter site language
    #[arg(long, default_value = "es")]
    locale: Locale,

    /// Print the extracted records as JSON instead of the assistant's reply
    #[arg(long = "json")]
    json_output: bool,

    /// Render for a voice-only device (SSML instead of cards and lists)
    #[arg(long)]
    voice: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Site root, mostly useful against a mirror or a mock server
    #[arg(long, env = "FILMBOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search movies by title
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show one movie by its numeric id
    Movie { id: u64 },
    /// Best rated movies, optionally filtered
    Top {
        /// Genre name, e.g. "Ciencia ficción"
        #[arg(long)]
        genre: Option<String>,
        /// Country name, e.g. "Estados Unidos"
        #[arg(long)]
        country: Option<String>,
        /// First year, inclusive
        #[arg(long = "from")]
        year_from: Option<u16>,
        /// Last year, inclusive
        #[arg(long = "to")]
        year_to: Option<u16>,
    },
}

/// Rendered output plus whether the command succeeded.
struct Outcome {
    text: String,
    ok: bool,
}

impl Outcome {
    fn ok(text: String) -> Self {
        Self { text, ok: true }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

async fn run(args: &Args, client: &Client) -> Result<Outcome> {
    let locale = &args.locale;
    let conversation = Conversation::new(!args.voice).with_locale(locale.clone());

    match &args.command {
        Command::Search { query } => {
            let query = query.join(" ");
            if args.json_output {
                let found = client.search_movies(&query, locale).await?;
                return Ok(Outcome::ok(to_json(&found)?));
            }
            let mut conversation = conversation;
            let reply = conversation.search_movie(client, &query).await;
            Ok(Outcome {
                text: reply.to_string(),
                ok: !reply.close,
            })
        }
        Command::Movie { id } => {
            let movie = client.fetch_by_id(*id, locale).await?;
            let text = if args.json_output {
                to_json(&movie)?
            } else if args.voice {
                describe_movie(&movie)
            } else {
                card_for_movie(&movie, locale).to_string()
            };
            Ok(Outcome::ok(text))
        }
        Command::Top {
            genre,
            country,
            year_from,
            year_to,
        } => {
            if args.json_output {
                let movies = client
                    .fetch_top_movies(
                        genre.as_deref(),
                        country.as_deref(),
                        *year_from,
                        *year_to,
                        locale,
                    )
                    .await?;
                return Ok(Outcome::ok(to_json(&movies)?));
            }
            let reply = conversation
                .top_movies(
                    client,
                    genre.as_deref(),
                    country.as_deref(),
                    *year_from,
                    *year_to,
                )
                .await;
            Ok(Outcome {
                text: reply.to_string(),
                ok: !reply.close,
            })
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    tracing::debug!(base_url = %args.base_url, locale = %args.locale, command = ?args.command, "starting");

    let client = match Client::builder()
        .base_url(&args.base_url)
        .timeout(Duration::from_secs(args.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let outcome = match run(&args, &client).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &outcome.text) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", outcome.text);
    }

    if outcome.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
