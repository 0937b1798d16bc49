//! Generation of the systemd unit that supervises the deployed server

pub mod resources;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::install::InstallRequest;
use crate::utils::constants;

/// The values substituted into the unit template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit<'a> {
    pub name: &'a str,
    pub user: &'a str,
    pub working_dir: &'a Path,
    pub binary_path: PathBuf,
    pub config_path: PathBuf,
}

impl<'a> ServiceUnit<'a> {
    pub fn for_request(request: &'a InstallRequest) -> Self {
        Self {
            name: &request.binary_name,
            user: &request.user,
            working_dir: &request.target_path,
            binary_path: request.binary_path(),
            config_path: request.config_path(),
        }
    }

    /// `<name>.service`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, constants::UNIT_FILE_EXT)
    }

    pub fn path_in(&self, unit_dir: &Path) -> PathBuf {
        unit_dir.join(self.file_name())
    }

    /// ```rust
    /// use std::path::Path;
    /// use goproxy_install::install::InstallRequest;
    /// use goproxy_install::service::ServiceUnit;
    ///
    /// let request = InstallRequest::new(Path::new("/opt/svc"), "svc", "goproxy", false, Path::new("/"))
    ///     .expect("valid request");
    /// let unit = ServiceUnit::for_request(&request).render();
    ///
    /// assert!(unit.contains("\nExecStart=/opt/svc/goproxy -config=/opt/svc/config.json\n"));
    /// ```
    pub fn render(&self) -> String {
        // Single pass, substituted values are never scanned again
        let mut rendered = String::with_capacity(resources::UNIT_TEMPLATE.len() + 128);
        let mut rest = resources::UNIT_TEMPLATE;

        while let Some(start) = rest.find('<') {
            rendered.push_str(&rest[..start]);
            let candidate = &rest[start..];
            let substitution = candidate
                .find('>')
                .and_then(|end| self.placeholder(&candidate[1..end]).map(|v| (v, end)));

            match substitution {
                Some((value, end)) => {
                    rendered.push_str(&value);
                    rest = &candidate[end + 1..];
                }
                None => {
                    rendered.push('<');
                    rest = &candidate[1..];
                }
            }
        }
        rendered.push_str(rest);

        rendered
    }

    fn placeholder(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "name" => Some(Cow::Borrowed(self.name)),
            "user" => Some(Cow::Borrowed(self.user)),
            "working_dir" => Some(self.working_dir.to_string_lossy()),
            "binary_path" => Some(self.binary_path.to_string_lossy()),
            "config_path" => Some(self.config_path.to_string_lossy()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InstallRequest {
        InstallRequest::new(Path::new("/opt/svc"), "svc", "goproxy", false, Path::new("/"))
            .expect("valid request")
    }

    #[test]
    fn test_rendered_unit_matches_the_expected_file() {
        let request = request();
        let rendered = ServiceUnit::for_request(&request).render();

        let expected = "\
[Unit]
Description=goproxy service
After=network.target
StartLimitIntervalSec=0

[Service]
Type=simple
Restart=always
RestartSec=1
User=svc
WorkingDirectory=/opt/svc
ExecStart=/opt/svc/goproxy -config=/opt/svc/config.json

[Install]
WantedBy=multi-user.target
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_no_placeholder_survives_rendering() {
        let request = request();
        let rendered = ServiceUnit::for_request(&request).render();
        assert!(!rendered.contains('<'));
        assert!(!rendered.contains('>'));
    }

    #[test]
    fn test_substituted_values_are_not_expanded_again() {
        let request = InstallRequest::new(
            Path::new("/srv/<user>"),
            "<name>",
            "goproxy",
            false,
            Path::new("/"),
        )
        .expect("valid request");
        let rendered = ServiceUnit::for_request(&request).render();

        assert!(rendered.contains("\nUser=<name>\n"));
        assert!(rendered.contains("\nWorkingDirectory=/srv/<user>\n"));
    }

    #[test]
    fn test_unit_is_named_after_the_binary() {
        let request = InstallRequest::new(
            Path::new("/srv/edge"),
            "proxy",
            "edge-proxy",
            false,
            Path::new("/"),
        )
        .expect("valid request");
        let unit = ServiceUnit::for_request(&request);

        assert_eq!(unit.file_name(), "edge-proxy.service");
        assert_eq!(
            unit.path_in(Path::new("/etc/systemd/system")),
            PathBuf::from("/etc/systemd/system/edge-proxy.service")
        );
    }
}
