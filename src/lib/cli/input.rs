use std::path::PathBuf;

use clap::Parser;

use crate::utils::constants;

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use goproxy_install::cli::input::CliArgs;
///
/// let parser = CliArgs::parse_from(["", "--path", "/opt/svc", "--user", "svc"]);
/// assert_eq!(parser.path.to_str(), Some("/opt/svc"));
/// assert_eq!(parser.user, "svc");
/// assert_eq!(parser.name, "goproxy");
/// assert!(!parser.no_service);
/// assert_eq!(parser.verbose, 0);
///
/// let parser = CliArgs::parse_from([
///     "", "-v", "--path", "svc", "--user", "svc", "--name", "proxy", "--no-service",
/// ]);
/// assert_eq!(parser.name, "proxy");
/// assert!(parser.no_service);
/// assert_eq!(parser.verbose, 1);
///
/// assert!(CliArgs::try_parse_from(["", "--path", "/opt/svc"]).is_err());
/// ```
#[derive(Parser, Debug)]
#[command(name = "goproxy-install")]
#[command(version)]
#[command(
    about = "Builds the goproxy server and deploys it as a systemd service",
    long_about = "Builds the goproxy server into the target directory, copies its \
    configuration, hands the directory over to the service account and writes \
    a systemd unit for it. Must be run as root."
)]
pub struct CliArgs {
    #[arg(long, help = "Path to deploy to")]
    pub path: PathBuf,

    #[arg(long, help = "User to deploy as and to run the service with")]
    pub user: String,

    #[arg(long, default_value = constants::DEFAULT_BINARY_NAME, help = "Name of the built binary and of the service")]
    pub name: String,

    #[arg(long, help = "Do not generate the systemd unit file")]
    pub no_service: bool,

    #[arg(long, help = "TOML manifest describing the sources, the build tool and the unit directory")]
    pub manifest: Option<PathBuf>,

    #[arg(long, help = "Directory holding the server sources and its config. Overrides the manifest")]
    pub source: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Maximum allowed verbosity level is: '-vv'")]
    pub verbose: u8,
}
