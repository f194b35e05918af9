use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zcalc::calculator::copy_to_clipboard;
use zcalc::input::commands_for_script;
use zcalc::{Config, repl};

#[derive(Parser)]
#[command(name = "zcalc")]
#[command(about = "A keyboard-driven calculator", long_about = None)]
struct Cli {
    /// Run a key script once and print the result, e.g. "12+3<Enter>"
    #[arg(short, long)]
    keys: Option<String>,

    /// Print the display as JSON (with --keys)
    #[arg(long, requires = "keys")]
    json: bool,

    /// Copy the result to the clipboard (with --keys)
    #[arg(long, requires = "keys")]
    copy: bool,

    /// Print the key bindings and exit
    #[arg(long)]
    bindings: bool,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load(config_path.as_deref())?;

    init_logging(&config, cli.verbose);
    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded config"),
        None => debug!("no config file, using defaults"),
    }

    if cli.bindings {
        return repl::write_bindings(&mut std::io::stdout());
    }

    let mut calculator = config.calculator();

    let Some(script) = cli.keys else {
        let stdin = std::io::stdin();
        let prompt = stdin.is_terminal();
        return repl::run(&mut calculator, stdin.lock(), std::io::stdout(), prompt);
    };

    let commands = commands_for_script(&script).map_err(anyhow::Error::msg)?;
    let mut display = calculator.display();
    for command in commands {
        display = calculator.dispatch(command);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&display)?);
    } else {
        println!("{}", display);
    }

    if cli.copy {
        let text = display
            .text_for_clipboard()
            .context("Nothing to copy: calculator is in the error state")?;
        copy_to_clipboard(text)?;
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
