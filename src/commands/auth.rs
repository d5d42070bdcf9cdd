use clap::Args;
use genaifit_core::{ApiResult, Backend, Envelope, UserProfile};

use super::{print_envelope, CommandResult, OutputFormat};

#[derive(Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(long, short)]
    email: String,

    /// Account password
    #[arg(long, short)]
    password: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl LoginCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let result = backend.auth().login(&self.email, &self.password).await;
        emit_auth(&self.format, result, "Logged in as")
    }
}

#[derive(Args)]
pub struct SignupCommand {
    /// Display name
    #[arg(long, short)]
    name: String,

    /// Account email
    #[arg(long, short)]
    email: String,

    /// Account password
    #[arg(long, short)]
    password: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SignupCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let result = backend
            .auth()
            .signup(&self.name, &self.email, &self.password)
            .await;
        emit_auth(&self.format, result, "Signed up as")
    }
}

#[derive(Args)]
pub struct LogoutCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl LogoutCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        backend.auth().logout().await;

        match self.format {
            OutputFormat::Json => print_envelope(&Envelope::empty()),
            OutputFormat::Text => {
                println!("Logged out");
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct WhoamiCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl WhoamiCommand {
    pub fn run(&self, backend: &Backend) -> CommandResult {
        let user = backend.auth().current_user();

        match self.format {
            OutputFormat::Json => print_envelope(&Envelope::auth(user.ok_or("Not logged in"))),
            OutputFormat::Text => {
                match user {
                    Some(user) => println!("{} (user #{})", user, user.id),
                    None if backend.auth().is_authenticated() => {
                        println!("Logged in (session details unavailable)")
                    }
                    None => println!("Not logged in"),
                }
                Ok(())
            }
        }
    }
}

fn emit_auth(format: &OutputFormat, result: ApiResult<UserProfile>, verb: &str) -> CommandResult {
    match format {
        OutputFormat::Json => print_envelope(&Envelope::auth(result)),
        OutputFormat::Text => {
            println!("{} {}", verb, result?);
            Ok(())
        }
    }
}
