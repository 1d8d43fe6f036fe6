pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cli::client::ApiClient;

#[derive(Parser)]
#[command(name = "staff")]
#[command(about = "Staff CLI - manage form templates and employee records over the HTTP API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "STAFF_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the API server"
    )]
    pub url: String,

    #[arg(long, global = true, env = "STAFF_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Bearer token helpers")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Form template management")]
    Forms {
        #[command(subcommand)]
        cmd: commands::forms::FormCommands,
    },

    #[command(about = "Employee record management")]
    Employees {
        #[command(subcommand)]
        cmd: commands::employees::EmployeeCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { cmd } => commands::token::handle(cmd, output_format),
        Commands::Forms { cmd } => {
            let client = ApiClient::new(&cli.url, cli.token)?;
            commands::forms::handle(cmd, &client, output_format).await
        }
        Commands::Employees { cmd } => {
            let client = ApiClient::new(&cli.url, cli.token)?;
            commands::employees::handle(cmd, &client, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "staff", "--json", "--url", "http://api:8080", "employees", "list", "--search", "ada",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert_eq!(cli.url, "http://api:8080");
        assert!(matches!(cli.command, Commands::Employees { .. }));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
