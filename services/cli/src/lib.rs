mod cli;
mod commands;
mod infra;

use av_readiness::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
