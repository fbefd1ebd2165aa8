use clap::Subcommand;
use neurostudy_core::storage::credentials;

use super::CmdResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the gateway API key in the OS keyring
    SetKey {
        /// API key sent as a Bearer token
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether an API key is available
    Status,
}

pub fn run(action: AuthAction) -> CmdResult {
    match action {
        AuthAction::SetKey { key } => {
            credentials::set_api_key(&key)?;
            println!("API key stored");
        }
        AuthAction::Clear => {
            credentials::clear_api_key()?;
            println!("API key removed");
        }
        AuthAction::Status => {
            if std::env::var(credentials::API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty()) {
                println!("using {}", credentials::API_KEY_ENV);
            } else if credentials::api_key().is_some() {
                println!("using key from keyring");
            } else {
                println!("no API key configured");
            }
        }
    }
    Ok(())
}
