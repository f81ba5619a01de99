//! Armory - Development Tools

use std::path::PathBuf;

use armory_tools::error::Result;
use armory_tools::{loader, report, validate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "armory-tools")]
#[command(about = "Development tools for the armory point-cost engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rulebook or roster RON file
    Validate {
        /// Path to the rulebook file
        path: PathBuf,

        /// Treat the file as a roster and check its unit references
        #[arg(long)]
        roster: bool,

        /// Rulebook used to parse roster flags (default: $ARMORY_RULES_PATH or standard)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Print a rulebook as RON
    DumpRules {
        /// Rulebook to print (default: $ARMORY_RULES_PATH or standard)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Price a roster file
    Price {
        /// Path to the roster RON file
        roster: PathBuf,

        /// Rulebook to price against (default: $ARMORY_RULES_PATH or standard)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Validate {
            path,
            roster,
            rules,
        } => {
            tracing::info!("Validating: {}", path.display());
            let issues = if roster {
                let rules = loader::load_rules(rules.as_deref())?;
                validate::validate_roster_file(&path, &rules)?
            } else {
                validate::validate_rulebook_file(&path)?
            };
            for issue in &issues {
                println!("{issue}");
            }
            Ok(issues.is_empty())
        }
        Commands::DumpRules { rules } => {
            let rules = loader::load_rules(rules.as_deref())?;
            println!("{}", rules.to_ron_string()?);
            Ok(true)
        }
        Commands::Price {
            roster,
            rules,
            json,
        } => {
            let rules = loader::load_rules(rules.as_deref())?;
            let roster = loader::load_roster(&roster, &rules)?;
            let summary = roster.price(&rules)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::format_summary(&summary));
            }
            Ok(!summary.over_limit)
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    }
}
