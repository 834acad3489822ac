//! `sitevault list` — display stored credentials in a table.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show_secrets: bool) -> Result<()> {
    let (service, session) = unlock_vault(cli)?;

    let entries = service.list_credentials(&session)?;

    output::info(&format!("{} credential(s)", entries.len()));
    output::print_credentials_table(&entries, show_secrets);

    Ok(())
}
