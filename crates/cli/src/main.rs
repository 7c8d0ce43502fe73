use std::process::ExitCode;

fn main() -> ExitCode {
    parecer_cli::run()
}
