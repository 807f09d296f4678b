//! Favorite commands.

use super::connect;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use serde_json::json;
use triqueta_api::models::FavoriteFilters;
use uuid::Uuid;

/// List saved activities.
pub async fn favorites_list(filters: FavoriteFilters, format: &OutputFormat) -> Result<()> {
    let api = connect("favorites")?;
    let list = api.favorites.list(&filters).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&list);
    }

    if list.items.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    println!("{:<36}  {:<20}  {}", "ACTIVITY", "SAVED", "TITLE");
    output::print_divider();
    for favorite in &list.items {
        println!(
            "{:<36}  {:<20}  {}",
            favorite.actividad_id,
            favorite.fecha_guardado,
            output::or_dash(favorite.titulo()),
        );
    }
    println!("\nPage {} of {} ({} total)", list.page, list.total_pages, list.total);

    Ok(())
}

pub async fn favorites_add(actividad_id: Uuid, format: &OutputFormat) -> Result<()> {
    let api = connect("favorites")?;
    let favorite = api.favorites.add(actividad_id).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&favorite);
    }
    output::print_success("Added to favorites", format);
    Ok(())
}

pub async fn favorites_remove(actividad_id: Uuid, format: &OutputFormat) -> Result<()> {
    let api = connect("favorites")?;
    api.favorites.remove(actividad_id).await?;
    output::print_success("Removed from favorites", format);
    Ok(())
}

pub async fn favorites_check(actividad_id: Uuid, format: &OutputFormat) -> Result<()> {
    let api = connect("favorites")?;
    let check = api.favorites.check(actividad_id).await?;

    match format {
        OutputFormat::Text => {
            if check.is_favorite {
                println!("{} is in your favorites", actividad_id);
            } else {
                println!("{} is not in your favorites", actividad_id);
            }
        }
        OutputFormat::Json => output::print_json(&check)?,
    }
    Ok(())
}

pub async fn favorites_count(format: &OutputFormat) -> Result<()> {
    let api = connect("favorites")?;
    let count = api.favorites.count().await?;

    match format {
        OutputFormat::Text => println!("{}", count),
        OutputFormat::Json => output::print_json(&json!({ "count": count }))?,
    }
    Ok(())
}
