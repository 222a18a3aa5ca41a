use crate::demo::{run_demo, run_rank, run_score, DemoArgs, RankArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talent_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Match",
    about = "Score candidates against vacancies and serve the matching API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one candidate skill list against a requirement list
    Score(ScoreArgs),
    /// Rank every profile of a roster CSV against a requirement list
    Rank(RankArgs),
    /// Walk through sessions, ranking, gap report and coverage on demo data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV whose profiles replace the demo profiles
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
