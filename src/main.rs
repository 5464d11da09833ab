use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use orcommit::{
   api::OpenRouterClient,
   cancel::CancelToken,
   config::{CommitConfig, DEFAULT_ENV_FILE},
   error::Result,
   git::SystemGit,
   prompt::TermPrompter,
   style, update,
   workflow::{self, RunOptions},
};

#[derive(Parser, Debug)]
#[command(name = "orcommit", version, about = "AI-assisted git commit and push via OpenRouter")]
struct Args {
   /// Confirm the run. Without this flag nothing happens.
   #[arg(long)]
   run: bool,

   /// Path to the env file (default: ./.env.openrouter)
   #[arg(long, value_name = "PATH")]
   env_path: Option<PathBuf>,

   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   dir: String,

   /// Commit without pushing
   #[arg(long)]
   no_push: bool,
}

fn run(args: &Args) -> Result<()> {
   let env_path = args
      .env_path
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
   let config = CommitConfig::load(&env_path)?;

   let cancel = CancelToken::new();
   cancel.install_handler()?;

   // Informational only; fire and forget.
   update::spawn_check();

   let git = SystemGit::new(args.dir.clone());
   let suggester = OpenRouterClient::new(config.clone());
   let mut prompter = TermPrompter;

   workflow::run(
      &git,
      &suggester,
      &mut prompter,
      &cancel,
      &config,
      RunOptions { push: !args.no_push },
   )
}

fn main() -> ExitCode {
   let args = Args::parse();

   // The explicit confirmation flag is the whole safety interlock: absent,
   // print usage and exit with a usage error, touching nothing.
   if !args.run {
      eprintln!("{}", style::error("Usage: orcommit --run [--env-path <path>] [--no-push]"));
      return ExitCode::from(2);
   }

   match run(&args) {
      Ok(()) => ExitCode::SUCCESS,
      Err(e) if e.is_user_abort() => {
         // Voluntary abort and Ctrl-C are clean exits, not failures.
         println!("{}", style::warning(&e.to_string()));
         ExitCode::SUCCESS
      },
      Err(e) => {
         eprintln!("{}", style::error(&e.to_string()));
         ExitCode::FAILURE
      },
   }
}
