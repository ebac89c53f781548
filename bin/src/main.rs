use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wordle_filter::*;

/// Filters and ranks five-letter words that fit the feedback from previous guesses.
///
/// Requests and responses are JSON. A request looks like:
///
/// {"language": "english", "included": "ea", "excluded": "st",
///  "correct_positions": {"0": "c"}, "wrong_positions": {"2": ["a"]}}
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory containing one word list per language, named `<language>.txt`.
    #[arg(short = 'd', long, env = "WORDLE_WORDS_DIR", default_value = ".")]
    words_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a single request, given as an argument or on stdin.
    Filter { request: Option<String> },
    /// Answer one request per line of stdin, writing one response per line.
    Batch,
    /// Load the given languages and print how many words and distinct letters each one has.
    Languages { languages: Vec<String> },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let start_time = Instant::now();
    let args = Args::parse();
    info!(words_dir = %args.words_dir.display(), "starting");
    let engine = FilterEngine::new(DirectoryWordSource::new(&args.words_dir));

    let exit_code = match args.command {
        Command::Filter { request } => run_filter(&engine, request)?,
        Command::Batch => run_batch(&engine)?,
        Command::Languages { languages } => list_languages(&engine, &languages),
    };

    info!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(exit_code)
}

fn run_filter(
    engine: &FilterEngine<DirectoryWordSource>,
    maybe_request: Option<String>,
) -> anyhow::Result<ExitCode> {
    let raw_request = match maybe_request {
        Some(request) => request,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read the request from stdin")?;
            buffer
        }
    };
    let (body, succeeded) = answer(engine, &raw_request)?;
    println!("{}", body);
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_batch(engine: &FilterEngine<DirectoryWordSource>) -> anyhow::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut num_requests = 0;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read a request from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let (body, _) = answer(engine, &line)?;
        writeln!(out, "{}", body)?;
        num_requests += 1;
    }
    info!(num_requests, languages = ?engine.store().languages(), "batch done");
    Ok(ExitCode::SUCCESS)
}

fn list_languages(engine: &FilterEngine<DirectoryWordSource>, languages: &[String]) -> ExitCode {
    let mut exit_code = ExitCode::SUCCESS;
    for language in languages {
        match engine.store().get(language) {
            Ok(dictionary) => println!(
                "{}: {} words, {} distinct letters",
                language,
                dictionary.len(),
                dictionary.frequencies().num_letters()
            ),
            Err(err) => {
                eprintln!("{}: {}", language, err);
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    exit_code
}

/// Answers a raw JSON request with a JSON body and whether it succeeded.
///
/// Request errors become an [`ErrorResponse`] body; only failing to serialize is an `Err`.
fn answer(
    engine: &FilterEngine<DirectoryWordSource>,
    raw_request: &str,
) -> anyhow::Result<(String, bool)> {
    let request: FilterRequest = match serde_json::from_str(raw_request) {
        Ok(request) => request,
        Err(err) => {
            let err = FilterError::MalformedConstraint(err.to_string());
            error!(%err, "rejected request");
            return Ok((serde_json::to_string(&ErrorResponse::from(&err))?, false));
        }
    };
    match engine.filter(&request) {
        Ok(response) => Ok((serde_json::to_string(&response)?, true)),
        Err(err) => {
            error!(%err, client_error = err.is_client_error(), "request failed");
            Ok((serde_json::to_string(&ErrorResponse::from(&err))?, false))
        }
    }
}
