use clap::Parser;
use viewstat::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
