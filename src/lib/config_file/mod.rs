//! root file for the crate where the datastructures that holds the TOML
//! parsed data of the install manifest lives.
pub mod build;
pub mod deploy;
pub mod service;
pub mod source;

use serde::Deserialize;

use self::{
    build::BuildAttribute, deploy::DeployAttribute, service::ServiceAttribute,
    source::SourceAttribute,
};

/// ```rust
/// use goproxy_install::config_file::InstallManifest;
///
/// const MANIFEST_MOCK: &str = r#"
///     [source]
///     root = '/usr/src/goproxy'
///     entrypoint = 'cmd/main.go'
///
///     [build]
///     tool = '/usr/local/go/bin/go'
///
///     [deploy]
///     mode = '0700'
///
///     [service]
///     unit_dir = '/run/systemd/system'
/// "#;
///
/// let manifest: InstallManifest = toml::from_str(MANIFEST_MOCK)
///     .expect("A failure happened parsing the install manifest");
///
/// let source = manifest.source.expect("Missing [source]");
/// assert_eq!(source.root, Some("/usr/src/goproxy"));
/// assert_eq!(source.entrypoint, Some("cmd/main.go"));
/// assert_eq!(source.config, None);
///
/// assert_eq!(manifest.build.unwrap().tool, Some("/usr/local/go/bin/go"));
/// assert_eq!(manifest.deploy.unwrap().mode, Some("0700"));
/// assert_eq!(manifest.service.unwrap().unit_dir, Some("/run/systemd/system"));
/// ```
/// The [`InstallManifest`] is the type that holds the whole hierarchy of the
/// install manifest attributes. Every table is optional, and the missing
/// ones fall back to the built-in defaults
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InstallManifest<'a> {
    #[serde(borrow)]
    pub source: Option<SourceAttribute<'a>>,
    #[serde(borrow)]
    pub build: Option<BuildAttribute<'a>>,
    #[serde(borrow)]
    pub deploy: Option<DeployAttribute<'a>>,
    #[serde(borrow)]
    pub service: Option<ServiceAttribute<'a>>,
}

pub fn manifest_from_str(raw: &'_ str) -> Result<InstallManifest<'_>, toml::de::Error> {
    <InstallManifest>::deserialize(&mut toml::Deserializer::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_is_all_defaults() {
        let manifest = manifest_from_str("").expect("Empty manifests are valid");
        assert_eq!(manifest, InstallManifest::default());
    }

    #[test]
    fn test_unknown_tables_are_rejected() {
        assert!(manifest_from_str("[targets]\nname = 'x'").is_err());
        assert!(manifest_from_str("[build]\ncompiler = 'go'").is_err());
    }
}
