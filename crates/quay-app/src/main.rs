//! Interactive workbench binary: opens the persistent store, optionally
//! seeds it with the sample repository, then runs a terminal REPL on
//! stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::info;

use quay_loader::{RepoLoader, StaticSource};
use quay_terminal::{TermEvent, TerminalSession};
use quay_types::config::Config;
use quay_vfs::{StoreVfs, Vfs};

const USAGE: &str = "usage: quay [--config <file>] [--seed]

  --config <file>  Read settings from a TOML file
  --seed           Load the bundled sample repository into the store";

struct Options {
    config: Option<PathBuf>,
    seed: bool,
    help: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Self {
            config: None,
            seed: false,
            help: false,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--config needs a file path"))?;
                    options.config = Some(PathBuf::from(value));
                },
                "--seed" => options.seed = true,
                "-h" | "--help" => options.help = true,
                other => anyhow::bail!("unknown argument: {other}\n{USAGE}"),
            }
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = Options::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        },
        None => Config::default(),
    };

    let mut vfs = StoreVfs::new(&config.storage.path);
    vfs.ensure_initialized()
        .with_context(|| format!("opening store {}", config.storage.path.display()))?;
    info!("store ready at {}", config.storage.path.display());

    if options.seed {
        seed(&mut vfs)?;
    }

    repl(&config, &mut vfs)
}

/// Replace the store contents with the bundled sample repository.
fn seed(vfs: &mut StoreVfs) -> anyhow::Result<()> {
    let loader = RepoLoader::new();
    let source = StaticSource::sample();
    loader
        .load(&source, vfs, "sample/project", &mut |progress| {
            if progress.in_progress {
                eprint!(
                    "\rloading repository files... {}/{}",
                    progress.loaded, progress.total
                );
            } else {
                eprintln!("\rloaded {}/{} files              ", progress.loaded, progress.total);
            }
        })
        .context("seeding the store")?;
    Ok(())
}

fn repl(config: &Config, vfs: &mut StoreVfs) -> anyhow::Result<()> {
    println!("Welcome to the quay terminal");
    println!("Type \"help\" for available commands");

    let mut session = TerminalSession::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(config.terminal.prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        for event in session.feed(vfs, &line) {
            match event {
                TermEvent::Line(text) => println!("{text}"),
                TermEvent::Clear => {
                    print!("\x1b[2J\x1b[H");
                    stdout.flush()?;
                },
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Options> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parse_defaults() {
        let options = parse(&[]).unwrap();
        assert!(options.config.is_none());
        assert!(!options.seed);
        assert!(!options.help);
    }

    #[test]
    fn parse_all_flags() {
        let options = parse(&["--config", "quay.toml", "--seed"]).unwrap();
        assert_eq!(options.config, Some(PathBuf::from("quay.toml")));
        assert!(options.seed);
    }

    #[test]
    fn config_without_value_fails() {
        assert!(parse(&["--config"]).is_err());
    }

    #[test]
    fn unknown_flag_fails() {
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
