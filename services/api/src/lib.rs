mod cli;
mod infra;
mod report;
mod routes;
mod server;

use lead_triage::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
