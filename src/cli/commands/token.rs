use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a bearer token signed with the local JWT_SECRET")]
    Mint {
        #[arg(long, help = "Username recorded as owner of created data")]
        username: String,
        #[arg(long, help = "User id (random when omitted)")]
        user_id: Option<Uuid>,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Mint { username, user_id, hours } => {
            let security = &config::config().security;
            let user_id = user_id.unwrap_or_else(Uuid::new_v4);
            let claims = Claims::new(user_id, username, hours.unwrap_or(security.jwt_expiry_hours));
            let token = generate_jwt(&claims, &security.jwt_secret)?;

            match output_format {
                OutputFormat::Text => println!("{}", token),
                OutputFormat::Json => output_success(
                    output_format,
                    "Token minted",
                    Some(json!({
                        "token": token,
                        "user_id": user_id,
                        "username": claims.username,
                        "expires_at": claims.exp,
                    })),
                )?,
            }
            Ok(())
        }
    }
}
