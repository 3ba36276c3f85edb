use std::process::ExitCode;

fn main() -> ExitCode {
    rs2html::cli::run()
}
