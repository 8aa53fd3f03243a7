mod command;
mod logging;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use popcorn_api::MovieService;
use popcorn_core::config::AppConfig;
use popcorn_runtime::{OmdbSession, Session};

use crate::command::{Command, Target, HELP};

#[derive(Debug, Parser)]
#[command(
    name = "popcorn",
    version,
    about = "Search movies and keep a list of what you watched"
)]
struct Cli {
    /// Search to run on startup (defaults to `search.initial_query`).
    #[arg(short, long)]
    query: Option<String>,

    /// Read this config file instead of the per-user one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level for the log file; `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    // Logging is optional; the view works without it.
    let _log_guard = match logging::init(&cli.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("popcorn: logging disabled: {e}");
            None
        }
    };

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            eprintln!("popcorn: {e}");
            return ExitCode::FAILURE;
        }
    };

    let session = match OmdbSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start session");
            eprintln!("popcorn: {e}");
            return ExitCode::FAILURE;
        }
    };

    let query = cli.query.unwrap_or(config.search.initial_query);
    match run(session, query).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("popcorn: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Drive the session from stdin until `quit` or end of input.
async fn run<S: MovieService + 'static>(
    mut session: Session<S>,
    initial_query: String,
) -> std::io::Result<()> {
    let renderer = tokio::spawn(view::render_loop(
        session.subscribe_search(),
        session.subscribe_detail(),
        session.subscribe_watchlist(),
    ));

    println!("{HELP}");
    session.set_query(initial_query);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => dispatch(&mut session, command),
                    Err(message) if message.is_empty() => {}
                    Err(message) => println!("{message}"),
                }
            }
            Some(completion) = session.next_completion() => {
                session.apply_completion(completion);
            }
        }
    }

    renderer.abort();
    Ok(())
}

fn dispatch<S: MovieService + 'static>(session: &mut Session<S>, command: Command) {
    tracing::debug!(?command, "Command");
    match command {
        Command::Search(query) => session.set_query(query),
        Command::Retry => session.retry_search(),
        Command::Select(Target::Id(id)) => session.toggle_selection(&id),
        Command::Select(Target::Index(n)) => {
            let id = n
                .checked_sub(1)
                .and_then(|i| session.search_state().results.get(i))
                .map(|movie| movie.id.clone());
            match id {
                Some(id) => session.toggle_selection(&id),
                None => println!("no result #{n}"),
            }
        }
        Command::Close => session.close_detail(),
        Command::Add(rating) => {
            if let Err(e) = session.add_selected_to_watchlist(rating) {
                println!("⛔️ {e}");
            }
        }
        Command::Remove(id) => {
            if !session.remove_from_watchlist(&id) {
                println!("{id} is not in your watched list");
            }
        }
        Command::List => {
            println!("{}", view::render_watchlist(&session.subscribe_watchlist().borrow()));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
