use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use bingo::{visualize_card, REQUIRED_LABELS};
use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod store;
mod ui;

use app::App;
use store::Store;

#[derive(Parser)]
struct Args {
    /// Where to keep the card between sessions
    #[arg(long, default_value = "bingo_state.json")]
    state_file: PathBuf,

    /// A share link (or its raw payload) to load a card from
    #[arg(long)]
    import: Option<String>,

    /// Base URL for the links produced by the share action
    #[arg(long, default_value = "https://bingo.example.com")]
    share_base: String,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the stored card and exit instead of opening the game
    #[arg(long)]
    print: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write logs to this file (the terminal is busy drawing the card)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(args.log_level, File::create(path)?);
    }

    let store = Store::new(args.state_file);

    if args.print {
        let grid = store.load()?.unwrap_or_default();
        println!("{}", visualize_card(&grid));
        println!("{} / {} cards are ready", grid.labeled_count(), REQUIRED_LABELS);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let mut app = App::new(store, args.import.as_deref(), &args.share_base, seed)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if event::poll(std::time::Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter, file: File) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(filter)
        .init();
}
