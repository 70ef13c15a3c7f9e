use clap::Parser;
use gtesh::config::Config;
use gtesh::editor::{Interactive, ReaderSource};
use gtesh::report;
use gtesh::session::Session;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gtesh",
    about = "A small shell that runs commands in parallel",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Run the commands in this file instead of reading from the terminal
    #[arg(allow_hyphen_values = true)]
    batch_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            report!(err);
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report!(err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::default();
    let mut session = Session::new(&config);

    match cli.batch_file {
        Some(path) => session.run(&mut ReaderSource::open(&path)?)?,
        None => session.run(&mut Interactive::new(config.prompt.as_str())?)?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GTESH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
