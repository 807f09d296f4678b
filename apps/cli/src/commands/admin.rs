//! Administration commands. The server rejects them for non-admin accounts.

use super::connect;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use triqueta_api::models::EtlExecution;

pub async fn admin_dashboard(format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let metrics = api.admin.dashboard().await?;

    if *format == OutputFormat::Json {
        return output::print_json(&metrics);
    }

    output::print_heading("Users");
    output::print_row("Total", &metrics.users.total.to_string());
    output::print_row("Active", &metrics.users.active.to_string());
    output::print_row("Admins", &metrics.users.admins.to_string());

    output::print_heading("Activities");
    output::print_row("Total", &metrics.activities.total.to_string());
    for (state, count) in &metrics.activities.by_state {
        output::print_row(state, &count.to_string());
    }

    output::print_heading("Engagement");
    output::print_row("Favorites", &metrics.engagement.total_favorites.to_string());
    for top in &metrics.engagement.top_activities {
        println!("  {:>5} fav  {:>6} views  {}", top.total_favoritos, top.total_vistas, top.nombre);
    }

    output::print_heading("ETL");
    output::print_row("Executions", &metrics.etl.total_executions.to_string());
    output::print_row("Success rate", &format!("{:.1}%", metrics.etl.success_rate));

    Ok(())
}

pub async fn admin_etl_status(format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let status = api.admin.etl_status().await?;

    if *format == OutputFormat::Json {
        return output::print_json(&status);
    }

    output::print_row("Execution", &status.id.to_string());
    output::print_row("Status", &status.status);
    output::print_row("Source", &status.source);
    output::print_row("Started", &status.started_at);
    output::print_row("Finished", output::or_dash(status.finished_at.as_deref()));
    output::print_row("Loaded", &status.records_loaded.to_string());
    output::print_row("Failed", &status.records_failed.to_string());
    if let Some(message) = &status.error_message {
        output::print_row("Error", message);
    }
    Ok(())
}

fn print_execution_row(execution: &EtlExecution) {
    println!(
        "{:>6}  {:<10}  {:<8}  {:<26}  {:>6} loaded  {:>4} failed",
        execution.id,
        execution.status,
        execution.source,
        execution.started_at,
        execution.records_loaded,
        execution.records_failed,
    );
}

pub async fn admin_etl_runs(limit: u32, offset: u32, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let executions = api.admin.etl_executions(limit, offset).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&executions);
    }

    if executions.is_empty() {
        println!("No ETL executions.");
    }
    for execution in &executions {
        print_execution_row(execution);
    }
    Ok(())
}

pub async fn admin_etl_run(id: i64, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let detail = api.admin.etl_execution(id).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&detail);
    }

    print_execution_row(&detail.execution);
    output::print_row("Log file", output::or_dash(detail.log_file_path.as_deref()));
    output::print_row("Config", output::or_dash(detail.config.as_deref()));
    Ok(())
}

pub async fn admin_etl_trigger(source: &str, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let response = api.admin.trigger_etl(source, None).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&response);
    }
    output::print_success(&response.message, format);
    Ok(())
}

pub async fn admin_pending(limit: u32, offset: u32, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let pending = api.admin.pending_activities(limit, offset).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&pending);
    }

    if pending.is_empty() {
        println!("Nothing awaiting moderation.");
        return Ok(());
    }
    for activity in &pending {
        println!(
            "{:>6}  {:<12}  {:<14}  {}",
            activity.id, activity.tipo, activity.localidad, activity.nombre
        );
    }
    Ok(())
}

pub async fn admin_approve(id: i64, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let response = api.admin.approve_activity(id).await?;
    output::print_success(&response.message, format);
    Ok(())
}

pub async fn admin_reject(id: i64, format: &OutputFormat) -> Result<()> {
    let api = connect("admin")?;
    let response = api.admin.reject_activity(id).await?;
    output::print_success(&response.message, format);
    Ok(())
}
