/// CLI arguments parsed from command line.
///
/// gpush runs interactively with no arguments; the only flags print
/// information and exit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            _ => {} // Ignore unknown arguments
        }
    }

    cli
}
