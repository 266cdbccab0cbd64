use clap::Parser;

use ansiview::cli::Cli;

fn main() -> anyhow::Result<()> {
    ansiview::init_tracing();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    ansiview::run(cli, &mut stdout.lock())
}
