use crate::report::{run_export, run_report, run_score, ExportArgs, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Triage",
    about = "Score, report on, and export qualification leads from the command line",
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
    /// Work with a lead document file without starting the service
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Print the scored lead table, highest score first
    Score(ScoreArgs),
    /// Print the dashboard metrics snapshot
    Report(ReportArgs),
    /// Write the lead table (and optionally the grouping reports) as CSV
    Export(ExportArgs),
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
        Command::Leads { command } => match command {
            LeadsCommand::Score(args) => run_score(args),
            LeadsCommand::Report(args) => run_report(args),
            LeadsCommand::Export(args) => run_export(args),
        },
    }
}
