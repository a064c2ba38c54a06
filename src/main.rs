use anyhow::Context;
use clap::{Parser, Subcommand};
use sketchboard::{Config, Editor, replay};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version, about = "Interactive vector drawing tools with snapshot undo/redo")]
struct Cli {
    /// Config file to use instead of ~/.config/sketchboard/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON script of input events to an editor and print the final scene
    Replay {
        /// Path to the script (a JSON array of events)
        script: PathBuf,

        /// Indent the printed scene snapshot
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("sketchboard: Interactive vector drawing tools with snapshot undo/redo");
        println!();
        println!("Usage:");
        println!("  sketchboard replay <SCRIPT> [--pretty]   Replay input events and print the scene");
        println!("  sketchboard --config <PATH> replay ...   Use a specific config file");
        println!("  sketchboard --help                       Show help");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match command {
        Command::Replay { script, pretty } => {
            let events = replay::load_script(&script)?;
            log::info!("Loaded {} events from {}", events.len(), script.display());

            let mut editor = Editor::from_config(&config)
                .map_err(anyhow::Error::msg)
                .context("Invalid keybindings")?;
            let outcome = replay::run(&mut editor, &events)
                .with_context(|| format!("Replay of {} failed", script.display()))?;

            log::info!("Undo depth: {}", outcome.undo_depth);
            log::info!("Redo depth: {}", outcome.redo_depth);

            if pretty {
                let value: serde_json::Value = serde_json::from_str(outcome.snapshot.as_str())?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", outcome.snapshot.as_str());
            }
        }
    }

    Ok(())
}
