//! The validated, read-only data an install run works with

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::error::{InstallError, InstallResult};
use crate::config_file::InstallManifest;
use crate::utils::{constants, fs::absolutize};

/// What to deploy and where. Built once from the command line and never
/// mutated afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub target_path: PathBuf,
    pub user: String,
    pub binary_name: String,
    pub skip_service: bool,
}

impl InstallRequest {
    /// Validates the raw inputs. A relative *target_path* is resolved against *base*
    pub fn new(
        target_path: &Path,
        user: &str,
        binary_name: &str,
        skip_service: bool,
        base: &Path,
    ) -> InstallResult<Self> {
        let target_path = absolutize(target_path, base);
        let Some(printable) = target_path.to_str() else {
            return Err(invalid("path", &target_path.to_string_lossy(), "is not valid UTF-8"));
        };
        if printable.contains(['\n', '\r']) {
            return Err(invalid("path", printable, "contains a line break"));
        }
        validate_user(user)?;
        validate_binary_name(binary_name)?;

        Ok(Self {
            target_path,
            user: user.to_string(),
            binary_name: binary_name.to_string(),
            skip_service,
        })
    }

    pub fn binary_path(&self) -> PathBuf {
        self.target_path.join(&self.binary_name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.target_path.join(constants::DEPLOYED_CONFIG_NAME)
    }

    /// `chown user:user`, the group is the one named after the user
    pub fn group(&self) -> &str {
        &self.user
    }
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> InstallError {
    InstallError::InvalidInput {
        field,
        value: value.to_string(),
        reason,
    }
}

fn validate_user(user: &str) -> InstallResult<()> {
    if user.is_empty() {
        return Err(invalid("user", user, "must not be empty"));
    }
    if user.contains(':') {
        return Err(invalid("user", user, "must not contain ':'"));
    }
    if user.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("user", user, "must not contain whitespace"));
    }
    Ok(())
}

static BINARY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("The binary name pattern is a valid regex")
});

fn validate_binary_name(name: &str) -> InstallResult<()> {
    if !BINARY_NAME.is_match(name) {
        return Err(invalid(
            "name",
            name,
            "must start with a letter or digit and only contain letters, digits, '.', '_' or '-'",
        ));
    }
    Ok(())
}

/// The source side of the install: which sources get built with which tool,
/// and where the unit file lands. Resolved from the manifest, the CLI overrides
/// and the built-in defaults, in that order of precedence from lowest to highest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub source_root: PathBuf,
    pub entrypoint: PathBuf,
    pub config_source: PathBuf,
    pub build_tool: String,
    pub target_mode: u32,
    pub unit_dir: PathBuf,
}

impl InstallSettings {
    /// Defaults rooted at *source_root*
    pub fn with_source_root(source_root: PathBuf) -> Self {
        Self {
            entrypoint: source_root.join(constants::DEFAULT_ENTRYPOINT),
            config_source: source_root.join(constants::DEFAULT_CONFIG_SOURCE),
            source_root,
            build_tool: constants::DEFAULT_BUILD_TOOL.to_string(),
            target_mode: constants::DEFAULT_TARGET_MODE,
            unit_dir: PathBuf::from(constants::DEFAULT_UNIT_DIR),
        }
    }

    /// * `manifest_dir` - the directory the manifest was read from, which relative
    /// `source.root` values are resolved against
    /// * `source_override` - the `--source` CLI value, resolved against *base*
    pub fn resolve(
        manifest: Option<&InstallManifest<'_>>,
        manifest_dir: &Path,
        source_override: Option<&Path>,
        base: &Path,
    ) -> InstallResult<Self> {
        let source = manifest.and_then(|m| m.source.as_ref());

        let source_root = match (source_override, source.and_then(|s| s.root)) {
            (Some(cli_root), _) => absolutize(cli_root, base),
            (None, Some(manifest_root)) => absolutize(Path::new(manifest_root), manifest_dir),
            (None, None) => absolutize(Path::new("."), base),
        };

        let mut settings = Self::with_source_root(source_root);

        if let Some(entrypoint) = source.and_then(|s| s.entrypoint) {
            settings.entrypoint = absolutize(Path::new(entrypoint), &settings.source_root);
        }
        if let Some(config) = source.and_then(|s| s.config) {
            settings.config_source = absolutize(Path::new(config), &settings.source_root);
        }
        if let Some(tool) = manifest.and_then(|m| m.build.as_ref()).and_then(|b| b.tool) {
            if tool.trim().is_empty() {
                return Err(InstallError::ManifestValue {
                    key: "build.tool",
                    value: tool.to_string(),
                    reason: "must not be empty",
                });
            }
            settings.build_tool = tool.to_string();
        }
        if let Some(mode) = manifest.and_then(|m| m.deploy.as_ref()).and_then(|d| d.mode) {
            settings.target_mode = parse_mode(mode)?;
        }
        if let Some(unit_dir) = manifest
            .and_then(|m| m.service.as_ref())
            .and_then(|s| s.unit_dir)
        {
            settings.unit_dir = absolutize(Path::new(unit_dir), manifest_dir);
        }

        Ok(settings)
    }
}

/// Parses an octal permission string such as `0750` or `0o750`
pub fn parse_mode(raw: &str) -> InstallResult<u32> {
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    let bad_value = |reason| InstallError::ManifestValue {
        key: "deploy.mode",
        value: raw.to_string(),
        reason,
    };

    if digits.is_empty() {
        return Err(bad_value("must not be empty"));
    }
    let mode = u32::from_str_radix(digits, 8).map_err(|_| bad_value("not an octal number"))?;
    if mode > 0o7777 {
        return Err(bad_value("out of the 0000..=7777 range"));
    }
    Ok(mode)
}
