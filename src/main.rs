use std::io::{self, BufWriter, IsTerminal};
use std::process::ExitCode;

use clap::error::ErrorKind;
use log::LevelFilter;
use mrdiff::Settings;
use dotenv::dotenv;
use clap::Parser;
use colored::*;

const BIN: &str = env!("CARGO_BIN_NAME");

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
  #[arg(allow_hyphen_values = true, help = "Project path below GITLAB_PROJECT_PREFIX, e.g. frontend/dipol-de")]
  project: String,

  #[arg(allow_hyphen_values = true, help = "Merge request IID, e.g. 634")]
  mr_iid: String,

  #[arg(short, long, help = "Enables verbose logging", default_value = "false")]
  verbose: bool,

  #[arg(long, help = "Prints the diff without colors", default_value = "false")]
  no_color: bool
}

fn init_logger(verbose: bool) {
  if verbose {
    env_logger::builder()
      .filter_level(LevelFilter::Debug)
      .format_target(false)
      .format_timestamp(None)
      .init();
    log::debug!("Verbose logging enabled");
  } else {
    env_logger::init();
  }
}

fn usage() {
  eprintln!("Usage: {BIN} <partial_project_path> <mr_iid>");
  eprintln!("Example: {BIN} frontend/dipol-de 634");
}

fn report(err: &mrdiff::Error) {
  if io::stderr().is_terminal() {
    eprintln!("{} {}", "ERROR:".bold().bright_red(), err);
  } else {
    eprintln!("ERROR: {}", err);
  }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  dotenv().ok();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
    Err(_) => {
      usage();
      return ExitCode::FAILURE;
    }
  };

  init_logger(cli.verbose);
  colored::control::set_override(!cli.no_color && std::env::var_os("NO_COLOR").is_none());

  let settings = match Settings::from_env() {
    Ok(settings) => settings,
    Err(err) => {
      report(&err);
      return ExitCode::FAILURE;
    }
  };

  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());

  match mrdiff::run(&settings, &cli.project, &cli.mr_iid, &mut out).await {
    Ok(count) => {
      log::debug!("Printed {} file(s)", count);
      ExitCode::SUCCESS
    }
    Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
    Err(err) => {
      report(&err);
      ExitCode::FAILURE
    }
  }
}
