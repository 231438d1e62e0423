use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `contrib completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout().lock();
    generate(args.shell, command, "contrib", &mut out);
    Ok(())
}
