use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ormshim::Features;

#[derive(Clone, Debug, Parser)]
#[command(name = "ormshim", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Log resolution details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "i", name = "inspect", about = "Show the bound call of every operation for a version")]
    Inspect(InspectArg),
    #[command(alias = "c", name = "coverage", about = "Resolve every operation at every boundary version")]
    Coverage(CoverageArg),
    #[command(alias = "d", name = "detect", about = "Print the host version detection would use")]
    Detect(DetectArg),
}

#[derive(Clone, Debug, Args)]
pub struct TableArg {
    /// Declare the table for a host without the `Utils._` namespace.
    #[arg(long)]
    pub no_nested_utils: bool,
}

impl TableArg {
    pub fn features(&self) -> Features {
        Features {
            nested_utils: !self.no_nested_utils,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct InspectArg {
    /// Host library version to resolve, e.g. `4.44.3`.
    #[arg(id = "host_version", value_name = "VERSION")]
    pub host_version: String,

    #[command(flatten)]
    pub table: TableArg,
}

#[derive(Clone, Debug, Args)]
pub struct CoverageArg {
    #[command(flatten)]
    pub table: TableArg,
}

#[derive(Clone, Debug, Args)]
pub struct DetectArg {
    /// Package manifest to read when no version is pinned.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect() {
        let app = App::try_parse_from(["ormshim", "inspect", "2.5.0", "--no-nested-utils"]).unwrap();
        match app.cmd {
            Commands::Inspect(arg) => {
                assert_eq!(arg.host_version, "2.5.0");
                assert!(!arg.table.features().nested_utils);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_verbose_and_alias() {
        let app = App::try_parse_from(["ormshim", "c", "-v"]).unwrap();
        assert!(app.verbose);
        assert!(matches!(app.cmd, Commands::Coverage(ref arg) if arg.table.features().nested_utils));
    }

    #[test]
    fn test_version_flag_next_to_positional() {
        let err = App::try_parse_from(["ormshim", "inspect", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let app = App::try_parse_from(["ormshim", "inspect", "5.0.0-beta"]).unwrap();
        assert!(matches!(app.cmd, Commands::Inspect(ref arg) if arg.host_version == "5.0.0-beta"));
    }

    #[test]
    fn test_inspect_requires_version() {
        assert!(App::try_parse_from(["ormshim", "inspect"]).is_err());
    }
}
