//! `sitevault status` — show whether the vault is provisioned and how
//! many credentials it holds.

use crate::cli::output;
use crate::cli::{open_store, store_path, unlock_vault, Cli};
use crate::errors::Result;
use crate::vault::VaultService;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let service = VaultService::new(open_store(cli)?);

    if !service.is_provisioned()? {
        output::info("Vault is not provisioned yet.");
        output::tip("Run `sitevault add <website> <username>` to set it up.");
        return Ok(());
    }

    // Counting entries requires unlocking the vault.
    let (service, session) = unlock_vault(cli)?;
    let count = service.list_credentials(&session)?.len();

    output::success("Vault is provisioned.");
    output::info(&format!("{count} credential(s) stored"));
    output::info(&format!("Store: {}", store_path(cli)?.display()));

    Ok(())
}
