use anyhow::Result;
use clap::Parser;

use zone_connector::commands::zones::{self, CommonOpts, ZonesCommand};

#[derive(Parser, Debug)]
#[command(name = "zone_connector", version, about = "Label walkable zones in a tile world and tunnel between them")]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: ZonesCommand,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    zones::cmd_zones(cli.common, cli.command)
}
