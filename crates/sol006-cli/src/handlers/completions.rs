//! Shell completions command handler

use crate::cli::{Cli, Shell};
use crate::error::Result;
use crate::output::OutputWriter;
use clap::CommandFactory;

/// Handle the completions command
pub fn handle_completions(shell: Shell, output: &mut OutputWriter) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let mut script = Vec::new();
    clap_complete::generate(shell.to_clap_shell(), &mut cmd, name, &mut script);

    output.write(&String::from_utf8_lossy(&script))
}
