pub mod cli;
pub mod config_file;
pub mod install;
pub mod service;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::fs;
    use std::path::Path;

    use crate::cli::input::CliArgs;
    use crate::config_file::{self, InstallManifest};
    use crate::install::{
        Host, InstallError, InstallReport, InstallRequest, InstallResult, InstallSettings,
        Installer,
    };
    use crate::utils::fs::absolutize;

    /// The main work of the project. Runs the install described by the CLI
    /// arguments against *host*, resolving relative paths against *base*
    pub fn run_installer<H: Host + ?Sized>(
        cli_args: &CliArgs,
        host: &H,
        base: &Path,
    ) -> InstallResult<InstallReport> {
        let request = InstallRequest::new(
            &cli_args.path,
            &cli_args.user,
            &cli_args.name,
            cli_args.no_service,
            base,
        )?;
        let settings = load_settings(cli_args, base)?;
        log::debug!("Resolved the install settings: {settings:?}");

        Installer::new(host, settings).run(&request)
    }

    fn load_settings(cli_args: &CliArgs, base: &Path) -> InstallResult<InstallSettings> {
        let source_override = cli_args.source.as_deref();

        let Some(manifest_path) = cli_args.manifest.as_deref() else {
            return InstallSettings::resolve(None, base, source_override, base);
        };

        let manifest_path = absolutize(manifest_path, base);
        log::debug!("Reading the install manifest {manifest_path:?}");
        let raw = fs::read_to_string(&manifest_path).map_err(|source| {
            InstallError::ManifestRead {
                path: manifest_path.clone(),
                source,
            }
        })?;
        let manifest: InstallManifest<'_> =
            config_file::manifest_from_str(&raw).map_err(|source| InstallError::ManifestParse {
                path: manifest_path.clone(),
                source,
            })?;

        let manifest_dir = manifest_path.parent().unwrap_or(base);
        InstallSettings::resolve(Some(&manifest), manifest_dir, source_override, base)
    }
}
