//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use routediff_cli::CliError;

fn main() {
    routediff_cli::init_logging();
    match routediff_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => report_and_exit(&err),
    }
}

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn report_and_exit(err: &CliError) -> ! {
    eprintln!("routediff: {err}");
    std::process::exit(1);
}
