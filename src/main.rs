use std::sync::Arc;

use account_client::account::{
    Account, ChangePasswordForm, FlowError, SignInForm, SignUpForm, UpdateProfileForm,
};
use account_client::api::ApiClient;
use account_client::bootstrap::Bootstrap;
use account_client::cli::{Cli, Command};
use account_client::config::Config;
use account_client::logging::init_tracing;
use account_client::persist::{FileStorage, PersistedStateStore};
use account_client::state::user::UserState;
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path).context("Failed to load configuration")?;

    let api = ApiClient::new(&config.api).context("Failed to set up the API client")?;
    let storage = FileStorage::new(config.storage.resolve_dir());
    let persisted = PersistedStateStore::new(Arc::new(storage), config.storage.key.clone());

    let context = Bootstrap::new(persisted, api).run().await;
    let account = Account::new(context.clone());

    let outcome = execute(&account, cli.command).await;
    // Let snapshot writes land before the process exits.
    context.flush_pending_saves().await;

    println!("{}", outcome?);
    Ok(())
}

async fn execute(account: &Account, command: Command) -> Result<String, FlowError> {
    match command {
        Command::SignIn { email, password } => {
            let user = account.sign_in(SignInForm { email, password }).await?;
            Ok(format!("Signed in as {}", describe(&user)))
        }
        Command::SignUp {
            email,
            password,
            first_name,
            last_name,
        } => {
            let user = account
                .sign_up(SignUpForm {
                    email,
                    password,
                    first_name,
                    last_name,
                })
                .await?;
            Ok(format!("Account created for {}", describe(&user)))
        }
        Command::SignOut => {
            account.sign_out().await?;
            Ok("Signed out".to_string())
        }
        Command::Profile => {
            if !account.is_authenticated() {
                return Err(FlowError::NotSignedIn);
            }
            let user = account.profile();
            Ok(format!(
                "id:         {}\nemail:      {}\nfirst name: {}\nlast name:  {}",
                user.id, user.email, user.first_name, user.last_name
            ))
        }
        Command::UpdateProfile {
            email,
            first_name,
            last_name,
        } => {
            let user = account
                .update_profile(UpdateProfileForm {
                    email,
                    first_name,
                    last_name,
                })
                .await?;
            Ok(format!("Profile updated: {}", describe(&user)))
        }
        Command::ChangePassword {
            old_password,
            new_password,
        } => {
            account
                .change_password(ChangePasswordForm {
                    old_password,
                    new_password,
                })
                .await?;
            Ok("Password changed".to_string())
        }
        Command::Status => {
            if account.is_authenticated() {
                Ok(format!("Signed in as {}", describe(&account.profile())))
            } else {
                Ok("Not signed in".to_string())
            }
        }
    }
}

fn describe(user: &UserState) -> String {
    match (user.display_name().as_str(), user.email.as_str()) {
        ("", "") => "unknown user".to_string(),
        ("", email) => email.to_string(),
        (name, "") => name.to_string(),
        (name, email) => format!("{} <{}>", name, email),
    }
}
