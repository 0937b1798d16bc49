//! The side effects an install run performs on the machine, behind the
//! [`Host`] trait so the pipeline can be driven without root or a Go toolchain

use std::{
    ffi::{OsStr, OsString},
    fs, io,
    os::unix::fs::{lchown, PermissionsExt},
    path::Path,
    process::Command,
};

use nix::unistd::{geteuid, Group, User};
use walkdir::WalkDir;

use super::error::OwnershipFailure;

pub trait Host {
    /// Whether the running process holds root privileges
    fn is_privileged(&self) -> bool;

    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates exactly one directory. The parent must already exist
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Runs *program* to completion and returns its exit code, `None` when it
    /// was killed by a signal
    fn run_command(&self, program: &OsStr, args: &[OsString], cwd: &Path)
        -> io::Result<Option<i32>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Hands *path* and everything below it over to `user:group`. Symlinks
    /// are changed themselves, their referents are left alone
    fn chown_recursive(&self, path: &Path, user: &str, group: &str)
        -> Result<(), OwnershipFailure>;

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Creates or truncates *path* with *contents*
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The [`Host`] of the machine the installer runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn is_privileged(&self) -> bool {
        geteuid().is_root()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn run_command(
        &self,
        program: &OsStr,
        args: &[OsString],
        cwd: &Path,
    ) -> io::Result<Option<i32>> {
        let exit_status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .spawn()?
            .wait()?;
        Ok(exit_status.code())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn chown_recursive(
        &self,
        path: &Path,
        user: &str,
        group: &str,
    ) -> Result<(), OwnershipFailure> {
        let uid = User::from_name(user)
            .map_err(|source| OwnershipFailure::Lookup {
                name: user.to_string(),
                source,
            })?
            .ok_or_else(|| OwnershipFailure::UnknownUser(user.to_string()))?
            .uid;
        let gid = Group::from_name(group)
            .map_err(|source| OwnershipFailure::Lookup {
                name: group.to_string(),
                source,
            })?
            .ok_or_else(|| OwnershipFailure::UnknownGroup(group.to_string()))?
            .gid;

        for entry in WalkDir::new(path) {
            let entry = entry.map_err(OwnershipFailure::Walk)?;
            log::trace!("chown {:?} to {uid}:{gid}", entry.path());
            lchown(entry.path(), Some(uid.as_raw()), Some(gid.as_raw())).map_err(
                |source| OwnershipFailure::Chown {
                    path: entry.path().to_path_buf(),
                    source,
                },
            )?;
        }

        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! A [`Host`] double that records what the pipeline asked for and fails on demand

    use std::{cell::RefCell, ffi::OsStr, ffi::OsString, io, path::Path, path::PathBuf};

    use super::Host;
    use crate::install::error::OwnershipFailure;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        CreateDir(PathBuf),
        RunCommand {
            program: OsString,
            args: Vec<OsString>,
            cwd: PathBuf,
        },
        ReadToString(PathBuf),
        CopyFile(PathBuf, PathBuf),
        ChownRecursive(PathBuf, String, String),
        SetMode(PathBuf, u32),
        WriteFile(PathBuf, String),
    }

    impl Call {
        /// Calls that change something on the machine
        pub fn mutates(&self) -> bool {
            !matches!(self, Call::ReadToString(_))
        }
    }

    pub struct RecordingHost {
        pub privileged: bool,
        pub existing_dirs: Vec<PathBuf>,
        pub existing_files: Vec<PathBuf>,
        pub config_contents: String,
        pub build_exit_code: Option<i32>,
        pub fail_chown: bool,
        pub fail_chmod: bool,
        pub fail_write: bool,
        pub calls: RefCell<Vec<Call>>,
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self {
                privileged: true,
                existing_dirs: vec![PathBuf::from("/"), PathBuf::from("/opt")],
                existing_files: Vec::new(),
                config_contents: String::from(r#"{"port": 8080}"#),
                build_exit_code: Some(0),
                fail_chown: false,
                fail_chmod: false,
                fail_write: false,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl RecordingHost {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        fn denied() -> io::Error {
            io::Error::from(io::ErrorKind::PermissionDenied)
        }
    }

    impl Host for RecordingHost {
        fn is_privileged(&self) -> bool {
            self.privileged
        }

        fn exists(&self, path: &Path) -> bool {
            self.is_dir(path) || self.existing_files.iter().any(|f| f == path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.existing_dirs.iter().any(|d| d == path)
                || self
                    .calls
                    .borrow()
                    .iter()
                    .any(|c| matches!(c, Call::CreateDir(d) if d == path))
        }

        fn create_dir(&self, path: &Path) -> io::Result<()> {
            self.record(Call::CreateDir(path.to_path_buf()));
            Ok(())
        }

        fn run_command(
            &self,
            program: &OsStr,
            args: &[OsString],
            cwd: &Path,
        ) -> io::Result<Option<i32>> {
            self.record(Call::RunCommand {
                program: program.to_os_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });
            Ok(self.build_exit_code)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.record(Call::ReadToString(path.to_path_buf()));
            Ok(self.config_contents.clone())
        }

        fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
            self.record(Call::CopyFile(from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }

        fn chown_recursive(
            &self,
            path: &Path,
            user: &str,
            group: &str,
        ) -> Result<(), OwnershipFailure> {
            self.record(Call::ChownRecursive(
                path.to_path_buf(),
                user.to_string(),
                group.to_string(),
            ));
            if self.fail_chown {
                return Err(OwnershipFailure::UnknownUser(user.to_string()));
            }
            Ok(())
        }

        fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
            self.record(Call::SetMode(path.to_path_buf(), mode));
            if self.fail_chmod {
                return Err(Self::denied());
            }
            Ok(())
        }

        fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            self.record(Call::WriteFile(
                path.to_path_buf(),
                String::from_utf8_lossy(contents).into_owned(),
            ));
            if self.fail_write {
                return Err(Self::denied());
            }
            Ok(())
        }
    }
}
