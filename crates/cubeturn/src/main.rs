//! Command-line driver for the cubeturn puzzle engine.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    color_eyre::install().expect("error initializing panic handler");
    env_logger::builder().init();

    let args = cli::Args::parse();
    cli::exec(args)
}
