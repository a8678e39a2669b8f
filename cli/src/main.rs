use clap::{Parser, Subcommand};
use relink_cli::CliContext;
use relink_cli::commands;
use relink_cli::logging;
use relink_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Relink encounter meter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a stored encounter log (JSON)
    Load {
        #[arg(short, long)]
        path: String,
    },
    /// Print the meter table
    Meter,
    /// Print the clipboard summary
    Summary {
        #[arg(short, long)]
        full: bool,
    },
    /// Sort by a column; repeating the column flips the direction
    Sort {
        column: String,
        direction: Option<String>,
    },
    /// Skill breakdown of one player
    Skills {
        #[arg(short, long)]
        player: u32,
    },
    /// Smoothed damage-per-second chart
    Chart,
    /// Skybound gauge chart
    Gauge,
    Config,
    /// Reload settings from disk
    Reload,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "relink".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => commands::load(path, ctx).await?,
        Some(Commands::Meter) => commands::show_meter(ctx).await?,
        Some(Commands::Summary { full }) => commands::summary(*full, ctx).await?,
        Some(Commands::Sort { column, direction }) => {
            commands::sort(column, direction.as_deref(), ctx).await?
        }
        Some(Commands::Skills { player }) => commands::skills(*player, ctx).await?,
        Some(Commands::Chart) => commands::chart(ctx).await?,
        Some(Commands::Gauge) => commands::gauge(ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::Reload) => commands::reload(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
