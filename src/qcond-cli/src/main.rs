use std::io::{self, Write};
use std::process;

use anyhow::Result;
use qcond_cli::{parse_args, run, Config};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = parse_args();
    let (config, config_path) = Config::load(cli.config.as_deref())?;

    setup_logging(cli.verbose.max(config.debug.verbosity));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, config_path.as_deref(), &mut out)?;
    out.flush()?;
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new().filter_level(log_level).init();
}
