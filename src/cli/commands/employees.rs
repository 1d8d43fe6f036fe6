use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_item, output_rows, output_success, read_json_arg, scalar};
use crate::cli::OutputFormat;
use crate::types::DbId;

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List or search employees")]
    List {
        #[arg(long, help = "Case-insensitive text matched against values and form name")]
        search: Option<String>,
        #[arg(long, help = "Only employees of this form")]
        form_id: Option<DbId>,
        #[arg(long, help = "Include deactivated employees")]
        all: bool,
    },

    #[command(about = "Show one employee")]
    Show { id: DbId },

    #[command(about = "Create an employee against a form")]
    Create {
        #[arg(long)]
        form_id: DbId,
        #[arg(long, help = "Field values as a JSON object, @file or - for stdin")]
        data: String,
    },

    #[command(about = "Replace an employee's values")]
    Update {
        id: DbId,
        #[arg(long, help = "Field values as a JSON object, @file or - for stdin")]
        data: String,
    },

    #[command(about = "Deactivate an employee")]
    Delete { id: DbId },

    #[command(about = "Employee counts per form")]
    Stats,
}

pub async fn handle(
    cmd: EmployeeCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommands::List { search, form_id, all } => {
            let mut query = Vec::new();
            if let Some(search) = search {
                query.push(("search", search));
            }
            if let Some(form_id) = form_id {
                query.push(("form_id", form_id.to_string()));
            }
            if all {
                query.push(("include_inactive", "true".to_string()));
            }

            let employees = client.get("/api/employees", &query).await?;
            output_rows(output_format, &employees, "No employees found", |e| {
                format!(
                    "{:>5}  {}  {}",
                    scalar(&e["id"]),
                    scalar(&e["form_name"]),
                    scalar(&e["display_name"])
                )
            })
        }
        EmployeeCommands::Show { id } => {
            let employee = client.get(&format!("/api/employees/{}", id), &[]).await?;
            output_item(output_format, &employee)
        }
        EmployeeCommands::Create { form_id, data } => {
            let body = json!({ "form_id": form_id, "employee_data": read_json_arg(&data)? });
            let employee = client.post("/api/employees", &body).await?;
            output_success(
                output_format,
                &format!(
                    "Created employee {} ({})",
                    scalar(&employee["display_name"]),
                    scalar(&employee["id"])
                ),
                Some(employee),
            )
        }
        EmployeeCommands::Update { id, data } => {
            let body = json!({ "employee_data": read_json_arg(&data)? });
            let employee = client.put(&format!("/api/employees/{}", id), &body).await?;
            output_success(output_format, &format!("Updated employee {}", id), Some(employee))
        }
        EmployeeCommands::Delete { id } => {
            client.delete(&format!("/api/employees/{}", id)).await?;
            output_success(output_format, &format!("Deactivated employee {}", id), None)
        }
        EmployeeCommands::Stats => {
            let stats = client.get("/api/employees/statistics", &[]).await?;
            match output_format {
                OutputFormat::Json => output_item(output_format, &stats),
                OutputFormat::Text => {
                    println!(
                        "{} employees across {} forms",
                        scalar(&stats["total_employees"]),
                        scalar(&stats["total_forms"])
                    );
                    output_rows(output_format, &stats["forms_breakdown"], "No active forms", |row| {
                        format!(
                            "{:>5}  {}  {}",
                            scalar(&row["form_id"]),
                            scalar(&row["form_name"]),
                            scalar(&row["employee_count"])
                        )
                    })
                }
            }
        }
    }
}
