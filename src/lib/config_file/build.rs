//! file that contains the configuration options available
//! to configure how the server gets built
use serde::*;

/// [`BuildAttribute`] - Stores build process specific configuration
///
/// * `tool` - The build tool invoked as `<tool> build -o <out> <entrypoint>`.
/// Either a program name looked up on the `PATH` or a path to it.
/// Defaults to `go`
///
/// ```rust
/// use goproxy_install::config_file::build::BuildAttribute;
///
/// const MANIFEST_MOCK: &str = r#"
///     #[build]
///     tool = 'go1.22'
///"#;
///
/// let config: BuildAttribute = toml::from_str(MANIFEST_MOCK)
///    .expect("A failure happened parsing the install manifest");
///
/// assert_eq!(config.tool, Some("go1.22"));
/// ```
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildAttribute<'a> {
    #[serde(borrow)]
    pub tool: Option<&'a str>,
}
