pub mod formats;

use flexi_logger::Logger;

use crate::Error;

/// Logs go to stderr so they never interleave with the transcript on stdout.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
