//! Produce an `[[users]]` entry for the credential file read via `AUTH_USERS_FILE`.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Parser;

use certificate_vault::infrastructure::auth::password::hash_password;

#[derive(Parser)]
#[command(about = "Hash a password for the certificate vault user file")]
struct Cli {
    /// Username to emit in the TOML snippet
    #[arg(long)]
    username: String,

    /// Password to hash; read from the first line of stdin when omitted
    #[arg(long)]
    password: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let password = match cli.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if cli.username.trim().is_empty() {
        bail!("username cannot be empty");
    }
    if password.is_empty() {
        bail!("password cannot be empty");
    }

    let hash = hash_password(&password).context("failed to hash password")?;

    let mut user = toml::Table::new();
    user.insert("username".to_string(), toml::Value::String(cli.username));
    user.insert("password_hash".to_string(), toml::Value::String(hash));

    let mut document = toml::Table::new();
    document.insert(
        "users".to_string(),
        toml::Value::Array(vec![toml::Value::Table(user)]),
    );

    print!("{}", toml::to_string(&document)?);
    Ok(())
}
