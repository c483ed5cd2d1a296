use clap::Parser;
use stream_check::cli;

fn main() {
    let args = cli::Args::parse();
    match cli::dispatch(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            // A config or logging failure lands here before any subscriber
            // exists, so the chain goes straight to stderr.
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
