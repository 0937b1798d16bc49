use serde::*;

/// [`ServiceAttribute`] - Where the generated systemd unit is written
///
/// * `unit_dir` - Directory scanned by systemd for unit files.
/// Defaults to `/etc/systemd/system`
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServiceAttribute<'a> {
    #[serde(borrow)]
    pub unit_dir: Option<&'a str>,
}
