mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use ocean_badges::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
