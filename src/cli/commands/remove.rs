//! `sitevault remove` — remove a stored credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove credential '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (service, session) = unlock_vault(cli)?;

    // An unknown id is not an error — removal is idempotent.
    if service.remove_credential(&session, id)? {
        #[cfg(feature = "audit-log")]
        crate::audit::log_audit(cli, "remove", None, Some(&format!("id {id}")));
        output::success(&format!("Removed credential '{id}'"));
    } else {
        output::warning(&format!("No credential with id '{id}' — nothing removed"));
    }

    Ok(())
}
