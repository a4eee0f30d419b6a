mod cli;
mod commands;
mod output;

use candidate_fit::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
