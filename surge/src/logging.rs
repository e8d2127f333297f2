use core::error::Error;

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Maps the number of `-v` flags to the log level of this crate.
fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger writing to stderr.
///
/// Only this crate and the TLS library are allowed to log, keeping stdout
/// free for the options dump.
pub fn init(verbosity: u8) -> Result<(), Box<dyn Error>> {
    let level = level(verbosity);

    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .with_module_level("surge", level)
        .with_module_level("rustls", level.min(LevelFilter::Info))
        .with_utc_timestamps()
        .init()?;

    log::trace!("logging initialized at {level}");

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level() {
        assert_eq!(LevelFilter::Warn, level(0));
        assert_eq!(LevelFilter::Debug, level(2));
        assert_eq!(LevelFilter::Trace, level(u8::MAX));
    }
}
