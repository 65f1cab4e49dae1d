//! lissacon - interactive console front end
//!
//! A headless front end for the lissacon core: a stdin-driven REPL wired
//! to the reactor, plus a logging view subscribed to parameter changes.
//! Graphical views and the slider plugins attach through the same core.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use lissacon::app::{App, AppEvent};
use lissacon::error::Result;

/// Command-line arguments
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-?" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("lissacon v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                arg => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("lissacon - drive a shared Lissajous parameter set from a REPL");
    println!();
    println!("USAGE:");
    println!("    lissacon [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    lissacon looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $LISSACON_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/lissacon/config.toml");
    println!("    4. ~/.lissacon/config.toml");
    println!("    5. ./lissacon.toml");
    println!("    6. Built-in defaults");
}

#[tokio::main]
async fn main() {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let default_filter = if args.debug { "lissacon=debug" } else { "lissacon=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config_path {
        Some(path) => match lissacon::init_with_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => lissacon::init().unwrap_or_else(|e| {
            warn!("configuration failed to load, using defaults: {}", e);
            lissacon::Config::default()
        }),
    };

    let initial_prompt = config.repl.primary_prompt.clone();
    let (app, mut handle) = App::new(config);

    // A minimal view: log every parameter change.
    let mut changes = handle.context.subscribe();
    tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;
        loop {
            match changes.recv().await {
                Ok(params) => debug!(?params, "parameters changed"),
                Err(RecvError::Lagged(missed)) => {
                    debug!(missed, "view lagged behind parameter changes")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let events = handle.events.clone();
    let reactor = tokio::spawn(app.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{}", initial_prompt);
    let _ = io::stdout().flush();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if events.send(AppEvent::ReplInput { line }).is_err() {
                    break;
                }
                let Some(reply) = handle.replies.recv().await else {
                    break;
                };
                // The terminal already shows what was typed; skip the echo
                // line of the transcript delta.
                if let Some((_, output)) = reply.delta.split_once('\n') {
                    print!("{}", output);
                }
                print!("{}", reply.prompt);
                let _ = io::stdout().flush();
            }
            Ok(None) => break,
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        }
    }

    println!();
    let _ = events.send(AppEvent::Shutdown);
    let _ = reactor.await;
}
