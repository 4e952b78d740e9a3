//! Process-wide logger.

use log::LevelFilter;

/// Crates whose internals are too chatty below `Warn`.
const QUIET_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Installs a `fern` dispatch writing `[LEVEL target] message` lines to
/// stderr.  Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level);
    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, level.min(LevelFilter::Warn));
    }
    dispatch.chain(std::io::stderr()).apply()?;
    Ok(())
}
