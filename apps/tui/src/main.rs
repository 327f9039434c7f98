mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use blackspot_tui::api::BlackspotClient;
use blackspot_tui::config::init_api_config;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    pretty_env_logger::init();

    let config = init_api_config()?;
    let client = BlackspotClient::new(&config)?;
    let mut app = App::new(Arc::new(client), args.initial_selection());

    // Piped output or an explicit request: print once and exit
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
