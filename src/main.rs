use std::process::ExitCode;

use gitway::cli;
use gitway::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(cli::failure_code(&err))
        }
    }
}
