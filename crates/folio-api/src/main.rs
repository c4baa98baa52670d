//! Folio CLI entry point.
//!
//! Binary name: `folio`
//!
//! Parses CLI arguments, sets up tracing, builds the chat session from the
//! data directory and config, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use folio_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SessionCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,folio=debug,folio_core=debug,folio_infra=debug",
        _ => "trace",
    };
    let options = TracingOptions {
        enable_otel: cli.otel,
        json: cli.log_json,
        ..TracingOptions::with_filter(filter)
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "folio", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli).await?;

    let result = match cli.command {
        Commands::Chat { new } => cli::chat::loop_runner::run_chat_loop(&state, new).await,
        Commands::Ask { message } => {
            cli::ask::ask(&state, &message.join(" "), cli.json, cli.quiet).await
        }
        Commands::Session { action } => match action {
            SessionCommand::Show => cli::session::show_session(&state, cli.json).await,
            SessionCommand::Reset => cli::session::reset_session(&state, cli.json, cli.quiet).await,
        },
        Commands::History => cli::remote::show_history(&state, cli.json).await,
        Commands::Health => cli::remote::check_health(&state, cli.json).await,
        Commands::Suggestions => cli::session::list_suggestions(&state, cli.json),
        Commands::Completions { .. } => unreachable!("handled before state init"),
    };

    shutdown_tracing();
    result
}
