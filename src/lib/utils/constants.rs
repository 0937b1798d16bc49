//! Constant value definitions to use across the whole program

pub const DEFAULT_BINARY_NAME: &str = "goproxy";
pub const DEFAULT_BUILD_TOOL: &str = "go";
pub const DEFAULT_ENTRYPOINT: &str = "main.go";
pub const DEFAULT_CONFIG_SOURCE: &str = "config.json";
pub const DEFAULT_UNIT_DIR: &str = "/etc/systemd/system";

/// Owner and group get full access, everyone else gets nothing
pub const DEFAULT_TARGET_MODE: u32 = 0o750;

/// Name of the configuration file once it lands on the target directory
pub const DEPLOYED_CONFIG_NAME: &str = "config.json";
pub const UNIT_FILE_EXT: &str = "service";

pub const EXIT_FAILURE_CODE: u8 = 1;

pub mod error_messages {
    pub const NOT_ROOT: &str = "this installer must be run as root";
    pub const MISSING_PARENT: &str = "does not exist or is not a directory";
    pub const NO_PARENT: &str = "has no parent directory";
    pub const TARGET_NOT_A_DIR: &str = "exists but is not a directory";
    pub const FAILURE_GATHERING_CURRENT_DIR: &str = "Unable to determine the current directory";
    pub const FAILURE_CONFIGURING_LOGGER: &str = "Unable to set up the logger";
}
