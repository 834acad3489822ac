//! `sitevault add` — store a new site credential.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;
use crate::vault::CredentialEntry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, website: &str, username: &str, secret: Option<&str>) -> Result<()> {
    // Determine the secret value from one of three sources.
    let secret_value = if let Some(s) = secret {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        s.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter password for {username}@{website}"))
            .interact()
            .map_err(|e| crate::errors::VaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let (service, session) = unlock_vault(cli)?;

    let entry = CredentialEntry::new(website, username, secret_value);
    let id = entry.id.clone();
    service.add_credential(&session, entry)?;

    let total = service.list_credentials(&session)?.len();

    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(cli, "add", Some(website), Some(&format!("id {id}")));

    output::success(&format!(
        "Credential for {username}@{website} stored ({total} total)"
    ));
    output::tip(&format!("Remove it later with: sitevault remove {id}"));

    Ok(())
}
