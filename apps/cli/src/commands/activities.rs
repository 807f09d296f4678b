//! Activity catalogue commands.

use super::connect;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use tracing::debug;
use triqueta_api::models::ActivityFilters;
use uuid::Uuid;

/// List activities matching `filters`.
pub async fn activities_list(filters: ActivityFilters, format: &OutputFormat) -> Result<()> {
    let api = connect("activities")?;
    let list = api.activities.list(&filters).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&list);
    }

    if list.data.is_empty() {
        println!("No activities found.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<32}  {:<12}  {:<14}  {}",
        "ID", "TITLE", "TYPE", "LOCALITY", "PRICE"
    );
    output::print_divider();
    for activity in &list.data {
        println!(
            "{:<36}  {:<32}  {:<12}  {:<14}  {}",
            activity.id,
            truncate(&activity.titulo, 32),
            activity.tipo,
            activity.localidad,
            output::price(activity.precio, activity.es_gratis),
        );
    }
    println!(
        "\nPage {} of {} ({} total)",
        list.pagination.page, list.pagination.total_pages, list.pagination.total
    );

    Ok(())
}

/// Show one activity and count the view.
pub async fn activities_show(id: Uuid, format: &OutputFormat) -> Result<()> {
    let api = connect("activities")?;
    let activity = api.activities.get(id).await?;

    if let Err(e) = api.activities.register_view(id).await {
        debug!(error = %e, "view not registered");
    }

    if *format == OutputFormat::Json {
        return output::print_json(&activity);
    }

    output::print_heading(&activity.titulo);
    output::print_row("ID", &activity.id.to_string());
    output::print_row("Type", &activity.tipo);
    output::print_row("Starts", &activity.fecha_inicio);
    output::print_row("Ends", output::or_dash(activity.fecha_fin.as_deref()));
    output::print_row("Locality", &activity.localidad);
    output::print_row("Address", &activity.ubicacion_direccion);
    output::print_row("Price", &output::price(activity.precio, activity.es_gratis));
    output::print_row("Level", output::or_dash(activity.nivel_actividad.as_deref()));
    output::print_row("Tags", &activity.etiquetas.join(", "));
    output::print_row("Contact", output::or_dash(activity.contacto.as_deref()));
    output::print_row("Link", output::or_dash(activity.enlace_externo.as_deref()));
    println!("\n{}", activity.descripcion);

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ciclovía", 32), "Ciclovía");
        assert_eq!(truncate("Festival de Verano", 10), "Festiva...");
    }
}
