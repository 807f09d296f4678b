//! Personalised recommendations.

use super::connect;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use triqueta_api::models::RecommendationQuery;

pub async fn recommendations(query: RecommendationQuery, format: &OutputFormat) -> Result<()> {
    let api = connect("recommendations")?;
    let list = api.recommendations.list(&query).await?;

    if *format == OutputFormat::Json {
        return output::print_json(&list);
    }

    if !list.user_profile_complete {
        println!("Tip: complete your profile interests for better recommendations.\n");
    }

    if list.items.is_empty() {
        println!("No recommendations right now.");
        return Ok(());
    }

    for (rank, item) in list.items.iter().enumerate() {
        let favorite = if item.is_favorite { " *" } else { "" };
        println!(
            "{:>2}. [{:>5.1}] {}{}",
            rank + 1,
            item.score,
            output::or_dash(item.titulo()),
            favorite
        );
        println!("           {}", item.explanation.details);
    }

    Ok(())
}
