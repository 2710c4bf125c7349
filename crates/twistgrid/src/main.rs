//! Command-line driver for twistgrid.
//!
//! Runs the engine against a headless host that tracks object transforms, so
//! that move lists and scrambles can be checked without a renderer.

mod cli;
mod headless;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    color_eyre::install()?;
    env_logger::builder().init();

    let args = cli::Args::parse();
    cli::exec(args)
}
