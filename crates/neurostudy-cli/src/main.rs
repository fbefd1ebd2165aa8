use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "neurostudy", version, about = "NeuroStudy CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the derived experience profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Support mode selection
    Mode {
        #[command(subcommand)]
        action: commands::mode::ModeAction,
    },
    /// Reading, sensory and timer preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Today's energy level
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Daily study plan
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Focus sessions
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// AI tutor
    Tutor {
        #[command(subcommand)]
        action: commands::tutor::TutorAction,
    },
    /// Notes from uploaded files
    Notes {
        #[command(subcommand)]
        action: commands::notes::NotesAction,
    },
    /// XP, streaks and badges
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Gateway API key
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

/// `NEUROSTUDY_LOG` wins over the configured filter. Logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("NEUROSTUDY_LOG").unwrap_or_else(|_| {
        let configured = neurostudy_core::Config::load_or_default().logging.filter;
        EnvFilter::try_new(&configured).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Mode { action } => commands::mode::run(action),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Tutor { action } => commands::tutor::run(action),
        Commands::Notes { action } => commands::notes::run(action),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
