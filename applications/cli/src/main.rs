use clap::Parser;
use console::style;
use immich_assistant::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Usage errors count as invalid configuration; help and version do not.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    immich_assistant::init_tracing(cli.global.debug);

    match immich_assistant::block_on_detached(immich_assistant::run(cli)).and_then(|r| r) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style(e).red());
            ExitCode::FAILURE
        }
    }
}
