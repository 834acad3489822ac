//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of stored credentials, in insertion order.
///
/// Secret values stay hidden unless `show_secrets` is set.
pub fn print_credentials_table(entries: &[CredentialEntry], show_secrets: bool) {
    if entries.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `sitevault add <website> <username>` to store your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Id", "Website", "Username", "Created"];
    if show_secrets {
        header.push("Secret");
    }
    table.set_header(header);

    for e in entries {
        let mut row = vec![
            e.id.clone(),
            e.website.clone(),
            e.username.clone(),
            e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ];
        if show_secrets {
            row.push(e.secret.clone());
        }
        table.add_row(row);
    }

    println!("{table}");
}
