use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Run the daemon in the foreground.
    Run {
        /// Log synthetic pointer events instead of performing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Turn pointer mode on in a running daemon.
    Activate,
    /// Turn pointer mode off in a running daemon.
    Deactivate,
}

/// Drive the desktop pointer with a gamepad.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Directory holding pp_settings.yaml and the control socket
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "padpointerd",
            "-v",
            "--workspace",
            "/tmp/pp",
            "run",
            "--dry-run",
        ])
        .expect("valid arguments");
        assert!(cli.verbose);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/pp")));
        assert_eq!(cli.command, Command::Run { dry_run: true });
    }

    #[test]
    fn parses_api_commands() {
        let cli = Cli::try_parse_from(["padpointerd", "activate"]).expect("valid arguments");
        assert_eq!(cli.command, Command::Activate);
        assert!(Cli::try_parse_from(["padpointerd"]).is_err());
    }
}
