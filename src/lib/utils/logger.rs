use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use env_logger::{Builder, Target};
use log::LevelFilter;

use super::constants::error_messages;

/// [`config_logger`] The configuration for `env_logger`
///
/// The `-v` count sets the level filter for the whole program, on top of
/// whatever `RUST_LOG` declares
pub fn config_logger(verbose_level: u8, target: Target) -> Result<()> {
    let mut builder = Builder::from_default_env();

    builder
        .target(target)
        .format_indent(Some(4))
        .format_module_path(false)
        .format_timestamp_millis();

    builder.filter(None, level_for(verbose_level)?);

    builder
        .try_init()
        .with_context(|| error_messages::FAILURE_CONFIGURING_LOGGER)
}

fn level_for(verbose_level: u8) -> Result<LevelFilter> {
    match verbose_level {
        0 => Ok(LevelFilter::Info),
        1 => Ok(LevelFilter::Debug),
        2 => Ok(LevelFilter::Trace),
        _ => Err(eyre!("maximum allowed verbosity level is: '-vv'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0).ok(), Some(LevelFilter::Info));
        assert_eq!(level_for(1).ok(), Some(LevelFilter::Debug));
        assert_eq!(level_for(2).ok(), Some(LevelFilter::Trace));
        assert!(level_for(3).is_err());
    }
}
