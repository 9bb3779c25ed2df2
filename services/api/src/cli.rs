use crate::commands::{run_badge, run_score, BadgeArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ocean_badges::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "OCEAN Badges",
    about = "Score Big Five questionnaires and serve shareable profile badges",
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
    /// Score an answers file and print the interpreted profile
    Score(ScoreArgs),
    /// Render the SVG badge for an answers file
    Badge(BadgeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Badge(args) => run_badge(args),
    }
}
