use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `kd completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Print the completion script for `shell` on stdout.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    generate(shell, command, "kd", &mut std::io::stdout());
    Ok(())
}
