use clap::Parser;
use sitevault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref website,
            ref username,
            ref secret,
        } => sitevault::cli::commands::add::execute(&cli, website, username, secret.as_deref()),
        Commands::List { show_secrets } => sitevault::cli::commands::list::execute(&cli, show_secrets),
        Commands::Remove { ref id, force } => {
            sitevault::cli::commands::remove::execute(&cli, id, force)
        }
        Commands::Status => sitevault::cli::commands::status::execute(&cli),
        Commands::Completions { ref shell } => sitevault::cli::commands::completions::execute(shell),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            sitevault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        sitevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
