use std::process::ExitCode;

fn main() -> ExitCode {
    match basket_pairs::app::run_pair_count_app(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
