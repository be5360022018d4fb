//! Animated 3x3x3 cube simulator.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    color_eyre::install()?;

    cli::exec(args.subcommand)
}
