use clap::Parser;
use monalign::{AlignController, Settings, StaticBackend, SystemBackend, VScreen, displays};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "monalign",
    about = "Line up a multi-monitor layout with per-monitor overlays"
)]
struct Cli {
    /// Settings file (JSON).
    #[arg(short, long, default_value = "monalign.json")]
    config: PathBuf,

    /// Run against a copy of the current layout without changing it.
    #[arg(long)]
    dry_run: bool,

    /// Print the attached displays and exit.
    #[arg(long)]
    list: bool,

    /// Enable debug logging (RUST_LOG overrides the level).
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("monalign panicked: {panic_info}");
    }));
}

fn run(cli: Cli) -> monalign::Result<()> {
    if cli.list {
        for display in displays()? {
            println!(
                "{}{}: {}x{} at ({}, {})",
                display.device_name,
                if display.is_primary { " (primary)" } else { "" },
                display.bounds.width,
                display.bounds.height,
                display.bounds.x,
                display.bounds.y,
            );
        }
        let (width, height) = VScreen::load(SystemBackend)?.size()?;
        println!("virtual screen: {width}x{height}");
        return Ok(());
    }

    let settings = Settings::load(&cli.config)?;
    let vscreen = if cli.dry_run {
        log::info!("dry run: layout changes stay in memory");
        VScreen::load(StaticBackend::new(displays()?))?
    } else {
        VScreen::load(SystemBackend)?
    };
    monalign::gui::run(AlignController::new(vscreen, settings))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
