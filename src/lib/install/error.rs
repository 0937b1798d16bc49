//! The failure taxonomy of an install run

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::utils::constants::{error_messages, EXIT_FAILURE_CODE};

pub type InstallResult<T> = Result<T, InstallError>;

/// Every way an install run can stop before reaching the end of the pipeline
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("{}", error_messages::NOT_ROOT)]
    Privilege,

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("could not read the manifest {path:?}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse the manifest {path:?}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for `{key}` in the manifest: {reason}")]
    ManifestValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("path {path:?} {reason}")]
    Path { path: PathBuf, reason: &'static str },

    #[error("could not create the directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error building program with `{command}`")]
    Build {
        command: String,
        #[source]
        cause: BuildFailure,
    },

    #[error("error copying config {from:?} to {to:?}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: CopyFailure,
    },

    #[error("error changing ownership for {path:?} to {user}")]
    Ownership {
        path: PathBuf,
        user: String,
        #[source]
        cause: OwnershipFailure,
    },

    #[error("error writing the service unit {path:?}")]
    ServiceWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// Fatal errors all share the same exit code
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE_CODE
    }
}

#[derive(Debug, Error)]
pub enum BuildFailure {
    #[error("the build tool could not be launched")]
    Spawn(#[source] io::Error),
    #[error("the build tool was terminated by an external signal")]
    Signal,
    #[error("the build tool returned {0}")]
    ExitCode(i32),
}

#[derive(Debug, Error)]
pub enum CopyFailure {
    #[error("the config file could not be read")]
    Read(#[source] io::Error),
    #[error("the config file is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("the config file could not be copied")]
    Io(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum OwnershipFailure {
    #[error("no such user {0:?}")]
    UnknownUser(String),
    #[error("no such group {0:?}")]
    UnknownGroup(String),
    #[error("the account database lookup for {name:?} failed")]
    Lookup {
        name: String,
        #[source]
        source: nix::Error,
    },
    #[error("could not walk the directory tree")]
    Walk(#[source] walkdir::Error),
    #[error("chown of {path:?} failed")]
    Chown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A mode change failure. Reported, but it never stops the install
#[derive(Debug, Error)]
#[error("error changing mode for {path:?} to {mode:#o}")]
pub struct ModeWarning {
    pub path: PathBuf,
    pub mode: u32,
    #[source]
    pub source: io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_paths() {
        let err = InstallError::Path {
            path: PathBuf::from("/missing"),
            reason: error_messages::MISSING_PARENT,
        };
        assert_eq!(
            err.to_string(),
            "path \"/missing\" does not exist or is not a directory"
        );

        let warning = ModeWarning {
            path: PathBuf::from("/opt/svc"),
            mode: 0o750,
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(
            warning.to_string(),
            "error changing mode for \"/opt/svc\" to 0o750"
        );
    }

    #[test]
    fn test_every_fatal_error_exits_with_one() {
        assert_eq!(InstallError::Privilege.exit_code(), 1);
        let build = InstallError::Build {
            command: "go build".into(),
            cause: BuildFailure::ExitCode(2),
        };
        assert_eq!(build.exit_code(), 1);
    }
}
