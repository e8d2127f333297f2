use core::error::Error;

use clap::Parser;
use surge::{cfg::Config, cmd::Cmd};

pub fn main() {
    let cmd = Cmd::parse();
    if let Err(err) = surge::logging::init(cmd.verbose) {
        eprintln!("ERROR: failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(cmd) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(cmd: Cmd) -> Result<(), Box<dyn Error>> {
    let cfg: Config = cmd.try_into()?;
    log::debug!("effective options: {} TLS client certificate(s)", cfg.options.tls_auth.len());

    println!("{}", cfg.render()?);
    if let Some(report) = cfg.host_report() {
        println!("{report}");
    }

    Ok(())
}
