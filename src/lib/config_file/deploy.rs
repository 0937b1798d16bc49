use serde::*;

/// [`DeployAttribute`] - How the target directory is left once deployed
///
/// * `mode` - Octal access mode applied to the target directory, like `'0750'`
/// or `'0o750'`. Kept as a string, since TOML rejects integers with a
/// leading zero
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeployAttribute<'a> {
    #[serde(borrow)]
    pub mode: Option<&'a str>,
}
