use clap::Parser;
use rotortrader::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
