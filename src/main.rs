use anyhow::Result;
use clap::Parser;

use canvass::app::App;
use canvass::cli::Cli;
use canvass::config::{config_path, Config};
use canvass::styles::{init_theme, ThemeType};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_create(&config_path())?;
    cli.apply_overrides(&mut config);

    // Headless subcommands skip logging setup and the TUI entirely.
    if cli.execute(&config)? {
        return Ok(());
    }

    setup_panic_hook();

    // Log to a file; stderr belongs to the TUI once it starts.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join("canvass");
    std::fs::create_dir_all(&log_dir)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "canvass.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    init_theme(config.theme.parse().unwrap_or(ThemeType::Dark));

    let mut app = App::new(config)?;
    let result = app.run();

    drop(guard);
    result
}
