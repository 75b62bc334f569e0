// ABOUTME: Replays a script of split/remove commands against the layout engine.
// ABOUTME: Prints the resulting panes and dividers for inspecting layouts.

mod script;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use sv_core::Config;
use sv_layout::LayoutEngine;

use script::{Command, Replay};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,sv_layout=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some("--write-default-config") {
        let target = args.next().map(PathBuf::from);
        let path = Config::write_default(target.as_deref())
            .context("Failed to write default config")?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let source = match first.map(PathBuf::from) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let config = Config::load_or_default();
    tracing::info!("Layout settings: {:?}", config.layout);

    let commands = script::parse(&source)?;
    let mut replay: Option<Replay> = None;
    for (line, command) in commands {
        if let Command::Root(name) = &command {
            if replay.is_some() {
                anyhow::bail!("line {}: root must come before any other command", line);
            }
            replay = Some(Replay::new(LayoutEngine::new(
                name.clone(),
                config.layout.clone(),
            )));
            continue;
        }

        let replay = replay.get_or_insert_with(|| {
            Replay::new(LayoutEngine::new("main".to_string(), config.layout.clone()))
        });
        replay
            .apply(&command, &mut std::io::stdout())
            .with_context(|| format!("line {}: {}", line, command))?;
    }

    if let Some(replay) = &replay {
        tracing::info!("Replay finished with {} panes", replay.engine().len());
    }
    Ok(())
}
