use crate::{prelude::*, Cli};

#[derive(Args, Clone, Debug)]
pub(crate) struct CompletionCommand {
    #[arg(value_enum)]
    pub(crate) shell: clap_complete::Shell,
}

/// Print the completion script for `shell` to stdout.
pub(crate) fn handle(command: CompletionCommand) -> AnyResult<(), AptdeckCliError> {
    let mut cli_command = Cli::command();

    clap_complete::generate(
        command.shell,
        &mut cli_command,
        "aptdeck",
        &mut std::io::stdout(),
    );

    Ok(())
}
