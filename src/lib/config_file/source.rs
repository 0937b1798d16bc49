//! Where the server sources and its configuration file live
use serde::*;

/// [`SourceAttribute`] - Where the server sources and its configuration file live
/// * `root` - Directory holding the sources. Relative paths are resolved against
/// the directory of the manifest
/// * `entrypoint` - The file handed to the build tool, relative to `root`
/// * `config` - The configuration file copied to the target directory, relative to `root`
///
/// ### Tests
///
/// ```rust
/// use goproxy_install::config_file::source::SourceAttribute;
///
/// const MANIFEST_MOCK: &str = r#"
///     #[source]
///     root = '../goproxy'
///     config = 'deploy/config.json'
///"#;
///
/// let config: SourceAttribute = toml::from_str(MANIFEST_MOCK)
///    .expect("A failure happened parsing the install manifest");
///
/// assert_eq!(config.root, Some("../goproxy"));
/// assert_eq!(config.entrypoint, None);
/// assert_eq!(config.config, Some("deploy/config.json"));
/// ```
///
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SourceAttribute<'a> {
    #[serde(borrow)]
    pub root: Option<&'a str>,
    #[serde(borrow)]
    pub entrypoint: Option<&'a str>,
    #[serde(borrow)]
    pub config: Option<&'a str>,
}
