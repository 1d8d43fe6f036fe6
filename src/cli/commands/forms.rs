use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_item, output_rows, output_success, read_json_arg, scalar};
use crate::cli::OutputFormat;
use crate::types::DbId;

#[derive(Subcommand)]
pub enum FormCommands {
    #[command(about = "List form templates")]
    List {
        #[arg(long, help = "Include deactivated templates")]
        all: bool,
    },

    #[command(about = "Show one template")]
    Show {
        id: DbId,
        #[arg(long, help = "Only print the field list")]
        fields: bool,
    },

    #[command(about = "Create a template")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Field list as JSON, @file or - for stdin")]
        fields: Option<String>,
        #[arg(long, help = "Field whose value names the employee")]
        display_field: Option<String>,
    },

    #[command(about = "Update a template; only given options change")]
    Update {
        id: DbId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Field list as JSON, @file or - for stdin")]
        fields: Option<String>,
        #[arg(long, help = "Field whose value names the employee; empty clears it")]
        display_field: Option<String>,
    },

    #[command(about = "Deactivate a template")]
    Delete { id: DbId },
}

pub async fn handle(
    cmd: FormCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        FormCommands::List { all } => {
            let query = if all {
                vec![("include_inactive", "true".to_string())]
            } else {
                Vec::new()
            };
            let forms = client.get("/api/forms", &query).await?;
            output_rows(output_format, &forms, "No forms found", |form| {
                format!(
                    "{:>5}  {}  ({} employees){}",
                    scalar(&form["id"]),
                    scalar(&form["name"]),
                    scalar(&form["employee_count"]),
                    if form["is_active"] == Value::Bool(false) { "  [inactive]" } else { "" }
                )
            })
        }
        FormCommands::Show { id, fields } => {
            let path = if fields {
                format!("/api/forms/{}/fields", id)
            } else {
                format!("/api/forms/{}", id)
            };
            let form = client.get(&path, &[]).await?;
            output_item(output_format, &form)
        }
        FormCommands::Create { name, description, fields, display_field } => {
            let mut body = json!({ "name": name });
            if let Some(description) = description {
                body["description"] = Value::String(description);
            }
            body["fields_config"] = match fields {
                Some(raw) => read_json_arg(&raw)?,
                None => json!([]),
            };
            if let Some(display_field) = display_field {
                body["display_field"] = Value::String(display_field);
            }

            let form = client.post("/api/forms", &body).await?;
            output_success(
                output_format,
                &format!("Created form {} ({})", scalar(&form["name"]), scalar(&form["id"])),
                Some(form),
            )
        }
        FormCommands::Update { id, name, description, fields, display_field } => {
            let mut body = Map::new();
            if let Some(name) = name {
                body.insert("name".into(), Value::String(name));
            }
            if let Some(description) = description {
                body.insert("description".into(), Value::String(description));
            }
            if let Some(raw) = fields {
                body.insert("fields_config".into(), read_json_arg(&raw)?);
            }
            if let Some(display_field) = display_field {
                body.insert("display_field".into(), Value::String(display_field));
            }

            let form = client
                .patch(&format!("/api/forms/{}", id), &Value::Object(body))
                .await?;
            output_success(output_format, &format!("Updated form {}", id), Some(form))
        }
        FormCommands::Delete { id } => {
            client.delete(&format!("/api/forms/{}", id)).await?;
            output_success(output_format, &format!("Deactivated form {}", id), None)
        }
    }
}
