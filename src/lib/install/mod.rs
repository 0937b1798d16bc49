//! The install pipeline: a strict sequence of steps, where every step but the
//! mode change stops the run on failure

pub mod error;
pub mod host;
pub mod request;

use std::ffi::{OsStr, OsString};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use self::error::{InstallError, InstallResult, ModeWarning};
pub use self::host::{Host, SystemHost};
pub use self::request::{InstallRequest, InstallSettings};

use self::error::{BuildFailure, CopyFailure};
use crate::service::ServiceUnit;
use crate::utils::constants::error_messages;

/// The states an install run walks through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Start,
    PrivilegeCheck,
    PathCheck,
    DirCreate,
    Build,
    CopyConfig,
    Chown,
    Chmod,
    ServiceWrite,
    Done,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match *self {
            Step::Start => "start",
            Step::PrivilegeCheck => "privilege check",
            Step::PathCheck => "path check",
            Step::DirCreate => "directory creation",
            Step::Build => "build",
            Step::CopyConfig => "config copy",
            Step::Chown => "ownership change",
            Step::Chmod => "mode change",
            Step::ServiceWrite => "service unit write",
            Step::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// What a successful run left on the machine
#[derive(Debug)]
pub struct InstallReport {
    pub created_target_dir: bool,
    pub binary_path: PathBuf,
    pub config_path: PathBuf,
    pub mode_warning: Option<ModeWarning>,
    pub unit_path: Option<PathBuf>,
}

pub struct Installer<'h, H: Host + ?Sized> {
    host: &'h H,
    settings: InstallSettings,
}

impl<'h, H: Host + ?Sized> Installer<'h, H> {
    pub fn new(host: &'h H, settings: InstallSettings) -> Self {
        Self { host, settings }
    }

    /// Runs the whole pipeline for *request*. Nothing is rolled back when a
    /// step fails, whatever the previous steps did stays in place
    pub fn run(&self, request: &InstallRequest) -> InstallResult<InstallReport> {
        let started = Instant::now();
        enter(Step::Start);

        enter(Step::PrivilegeCheck);
        self.check_privileges()?;

        enter(Step::PathCheck);
        self.check_target_path(&request.target_path)?;

        enter(Step::DirCreate);
        let created_target_dir = self.create_target_dir(&request.target_path)?;

        enter(Step::Build);
        let binary_path = self.build(request)?;

        enter(Step::CopyConfig);
        let config_path = self.copy_config(request)?;

        enter(Step::Chown);
        self.change_ownership(request)?;

        enter(Step::Chmod);
        let mode_warning = self.change_mode(&request.target_path);

        let unit_path = if request.skip_service {
            log::info!("Skipping the service unit generation");
            None
        } else {
            enter(Step::ServiceWrite);
            Some(self.write_service_unit(request)?)
        };

        enter(Step::Done);
        log::debug!(
            "The install took a total of {:?} ms",
            started.elapsed().as_millis()
        );

        Ok(InstallReport {
            created_target_dir,
            binary_path,
            config_path,
            mode_warning,
            unit_path,
        })
    }

    fn check_privileges(&self) -> InstallResult<()> {
        if !self.host.is_privileged() {
            return Err(InstallError::Privilege);
        }
        Ok(())
    }

    fn check_target_path(&self, target: &Path) -> InstallResult<()> {
        let parent = target.parent().ok_or_else(|| InstallError::Path {
            path: target.to_path_buf(),
            reason: error_messages::NO_PARENT,
        })?;

        if !self.host.is_dir(parent) {
            return Err(InstallError::Path {
                path: parent.to_path_buf(),
                reason: error_messages::MISSING_PARENT,
            });
        }

        if self.host.exists(target) && !self.host.is_dir(target) {
            return Err(InstallError::Path {
                path: target.to_path_buf(),
                reason: error_messages::TARGET_NOT_A_DIR,
            });
        }

        Ok(())
    }

    /// Returns whether the directory had to be created
    fn create_target_dir(&self, target: &Path) -> InstallResult<bool> {
        if self.host.is_dir(target) {
            log::debug!("Target directory {target:?} already exists");
            return Ok(false);
        }

        self.host
            .create_dir(target)
            .map_err(|source| InstallError::CreateDir {
                path: target.to_path_buf(),
                source,
            })?;
        log::info!("Created the target directory {target:?}");

        Ok(true)
    }

    fn build(&self, request: &InstallRequest) -> InstallResult<PathBuf> {
        let tool = &self.settings.build_tool;
        let binary_path = request.binary_path();
        let args = [
            OsString::from("build"),
            OsString::from("-o"),
            binary_path.clone().into_os_string(),
            self.settings.entrypoint.clone().into_os_string(),
        ];
        let command = format!(
            "{tool} build -o {} {}",
            binary_path.display(),
            self.settings.entrypoint.display()
        );
        log::debug!("Executing command => {command:?}");

        let failure = match self
            .host
            .run_command(OsStr::new(tool), &args, &self.settings.source_root)
        {
            Ok(Some(0)) => None,
            Ok(Some(code)) => Some(BuildFailure::ExitCode(code)),
            Ok(None) => Some(BuildFailure::Signal),
            Err(source) => Some(BuildFailure::Spawn(source)),
        };

        if let Some(cause) = failure {
            return Err(InstallError::Build { command, cause });
        }
        log::info!("Built {binary_path:?}");

        Ok(binary_path)
    }

    fn copy_config(&self, request: &InstallRequest) -> InstallResult<PathBuf> {
        let from = &self.settings.config_source;
        let to = request.config_path();
        let copy_error = |cause| InstallError::Copy {
            from: from.clone(),
            to: to.clone(),
            cause,
        };

        let raw = self
            .host
            .read_to_string(from)
            .map_err(|e| copy_error(CopyFailure::Read(e)))?;
        serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(|e| copy_error(CopyFailure::InvalidJson(e)))?;

        self.host
            .copy_file(from, &to)
            .map_err(|e| copy_error(CopyFailure::Io(e)))?;
        log::info!("Copied the config {from:?} to {to:?}");

        Ok(to)
    }

    fn change_ownership(&self, request: &InstallRequest) -> InstallResult<()> {
        let target = &request.target_path;
        self.host
            .chown_recursive(target, &request.user, request.group())
            .map_err(|cause| InstallError::Ownership {
                path: target.clone(),
                user: request.user.clone(),
                cause,
            })?;
        log::info!(
            "Changed the ownership of {target:?} to {}:{}",
            request.user,
            request.group()
        );

        Ok(())
    }

    /// A failure here is only reported, the run goes on
    fn change_mode(&self, target: &Path) -> Option<ModeWarning> {
        let mode = self.settings.target_mode;
        match self.host.set_mode(target, mode) {
            Ok(()) => {
                log::info!("Changed the mode of {target:?} to {mode:#o}");
                None
            }
            Err(source) => {
                let warning = ModeWarning {
                    path: target.to_path_buf(),
                    mode,
                    source,
                };
                log::warn!("{warning}: {}", warning.source);
                Some(warning)
            }
        }
    }

    fn write_service_unit(&self, request: &InstallRequest) -> InstallResult<PathBuf> {
        let unit = ServiceUnit::for_request(request);
        let unit_path = unit.path_in(&self.settings.unit_dir);

        self.host
            .write_file(&unit_path, unit.render().as_bytes())
            .map_err(|source| InstallError::ServiceWrite {
                path: unit_path.clone(),
                source,
            })?;
        log::info!("Wrote the service unit {unit_path:?}");

        Ok(unit_path)
    }
}

fn enter(step: Step) {
    log::debug!("[{step}]");
}
