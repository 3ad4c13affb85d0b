//! Command-line argument parsing and processing.
//!
//! Hand-rolled parsing for duskr's small surface: run the daemon (no
//! subcommand), or one of `status`, `toggle`, `reload`, plus the standard
//! help/version/debug flags. Unknown input falls through to help with a
//! non-zero exit.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the daemon.
    Run { debug_enabled: bool },
    /// Print the current mode and schedule.
    Status { debug_enabled: bool },
    /// Flip the mode once, manually.
    Toggle { debug_enabled: bool },
    /// Signal the running daemon to reload its configuration.
    Reload { debug_enabled: bool },
    /// Display help information and exit.
    ShowHelp,
    /// Display version information and exit.
    ShowVersion,
    /// Show help due to unknown arguments and exit with an error.
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse everything after the program name.
    pub fn parse<I: Iterator<Item = String>>(args: I) -> Self {
        let mut debug_enabled = false;
        let mut subcommand: Option<String> = None;

        for arg in args {
            match arg.as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => {
                    return Self {
                        action: CliAction::ShowHelp,
                    };
                }
                "--version" | "-V" => {
                    return Self {
                        action: CliAction::ShowVersion,
                    };
                }
                other if other.starts_with('-') => {
                    return Self {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
                other => {
                    if subcommand.is_some() {
                        // At most one subcommand
                        return Self {
                            action: CliAction::ShowHelpDueToError,
                        };
                    }
                    subcommand = Some(other.to_string());
                }
            }
        }

        let action = match subcommand.as_deref() {
            None => CliAction::Run { debug_enabled },
            Some("status") => CliAction::Status { debug_enabled },
            Some("toggle") => CliAction::Toggle { debug_enabled },
            Some("reload") => CliAction::Reload { debug_enabled },
            Some(_) => CliAction::ShowHelpDueToError,
        };

        Self { action }
    }
}

/// Print usage information.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: duskr [COMMAND] [OPTIONS]");
    log_indented!("(no command)  Run the daemon");
    log_indented!("status        Show current mode and schedule");
    log_indented!("toggle        Flip light/dark mode once");
    log_indented!("reload        Reload the running daemon's configuration");
    log_block_start!("Options:");
    log_indented!("-d, --debug    Enable debug output");
    log_indented!("-h, --help     Show this help");
    log_indented!("-V, --version  Show version");
    log_end!();
}

/// Print version information.
pub fn display_version() {
    log_version!();
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        ParsedArgs::parse(args.iter().map(|s| s.to_string())).action
    }

    #[test]
    fn bare_invocation_runs_the_daemon() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false
            }
        );
    }

    #[test]
    fn debug_flag_applies_to_subcommands() {
        assert_eq!(
            parse(&["--debug"]),
            CliAction::Run {
                debug_enabled: true
            }
        );
        assert_eq!(
            parse(&["reload", "-d"]),
            CliAction::Reload {
                debug_enabled: true
            }
        );
    }

    #[test]
    fn subcommands_parse() {
        assert_eq!(
            parse(&["status"]),
            CliAction::Status {
                debug_enabled: false
            }
        );
        assert_eq!(
            parse(&["toggle"]),
            CliAction::Toggle {
                debug_enabled: false
            }
        );
    }

    #[test]
    fn unknown_input_shows_help_with_error() {
        assert_eq!(parse(&["--frobnicate"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["dance"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["status", "toggle"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["status", "--version"]), CliAction::ShowVersion);
    }
}
