use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "biorhythms-cli", version, about = "Biorhythms CLI")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the biorhythm chart around a date
    Chart(commands::chart::ChartArgs),
    /// Show today's percentages
    Today(commands::today::TodayArgs),
    /// Show the home-screen widget summary
    Widget(commands::widget::WidgetArgs),
    /// Birth date management
    Birth {
        #[command(subcommand)]
        action: commands::birth::BirthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Chart(args) => commands::chart::run(args),
        Commands::Today(args) => commands::today::run(args),
        Commands::Widget(args) => commands::widget::run(args),
        Commands::Birth { action } => commands::birth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
