use super::load_settings;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reviewharvest_sources::{OmdbClient, SourceError};
use serde_json::json;

pub async fn run_info(title: &str, api_key: Option<String>, output: &Output) -> Result<()> {
    tracing::debug!(title, "Info command started");

    let settings = load_settings()?;
    let key = settings.omdb_api_key(api_key.as_deref())?;
    let source = settings.omdb_source(key)?;

    let mut client = OmdbClient::with_source(title, source);
    client
        .load()
        .await
        .map_err(|e| eyre!("Lookup of '{}' failed: {}", title, e))?;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let fields: [(&str, Result<&str, SourceError>); 16] = [
                ("IMDb ID", client.movie_id()),
                ("Title", client.movie_title()),
                ("Year", client.year()),
                ("Released", client.release_date()),
                ("Runtime", client.runtime()),
                ("Genre", client.genre()),
                ("Director", client.director()),
                ("Writer", client.writer()),
                ("Actors", client.actors()),
                ("Language", client.language()),
                ("Country", client.country()),
                ("Production", client.production()),
                ("Awards", client.awards()),
                ("IMDb Rating", client.imdb_rating()),
                ("Poster", client.poster_link()),
                ("Plot", client.plot()),
            ];

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new(client.movie_title().unwrap_or(title))
                    .fg(comfy_table::Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new(""),
            ]);
            for (label, value) in fields {
                let value = match value {
                    Ok(v) => v.to_string(),
                    Err(_) => "N/A".bright_black().to_string(),
                };
                table.add_row(vec![Cell::new(label), Cell::new(value)]);
            }
            if let Ok(ratings) = client.ratings() {
                table.add_row(vec![Cell::new("Ratings"), Cell::new(ratings.join("\n"))]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let metadata = client
                .metadata()
                .map(serde_json::to_value)
                .transpose()
                .map_err(|e| eyre!("Failed to serialize metadata: {}", e))?;
            output.json(&json!({
                "type": "info",
                "query": title,
                "metadata": metadata,
            }));
        }
    }

    Ok(())
}
