use super::load_settings;
use crate::output::{mask_secret, Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use reviewharvest_config::{Config, PathManager, OMDB_API_KEY_ENV};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
        crate::ConfigCommands::Omdb { api_key } => configure_omdb(api_key, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let settings = load_settings()?;
    let config = &settings.config;
    let config_file = settings.paths.config_file();

    let api_key = settings.omdb_api_key(None).unwrap_or_default();
    let api_key_display = if full { api_key } else { mask_secret(&api_key) };
    let output_dir = config
        .harvest
        .output_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!(
                    "No config file at {}, showing defaults (run 'reviewharvest config init' to create one)",
                    config_file.display()
                ));
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting")
                    .fg(comfy_table::Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value")
                    .fg(comfy_table::Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
            ]);
            let rows = [
                ("Config File", config_file.display().to_string()),
                ("Credentials File", settings.paths.credentials_file().display().to_string()),
                ("Log File", settings.paths.log_file().display().to_string()),
                ("OMDb URL", config.omdb.base_url.clone()),
                ("OMDb API Key", api_key_display),
                ("IMDb URL", config.imdb.base_url.clone()),
                ("Max Stalled Pages", config.imdb.max_stalled_pages.to_string()),
                ("Duplicate Reviews", format!("{:?}", config.imdb.collision_policy)),
                ("Timeout", format!("{} seconds", config.imdb.timeout_seconds)),
                ("User Agent", config.imdb.user_agent.clone()),
                ("Limit", config.harvest.limit.to_string()),
                ("Separator", format!("{:?}", config.harvest.separator)),
                ("Min Reviews", config.harvest.min_reviews.to_string()),
                ("Output Directory", output_dir),
            ];
            for (label, value) in rows {
                table.add_row(vec![Cell::new(label), Cell::new(value)]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            if std::env::var(OMDB_API_KEY_ENV).is_ok() {
                println!("{}", format!("API key taken from {}", OMDB_API_KEY_ENV).bright_black());
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config_file": config_file.display().to_string(),
                "credentials_file": settings.paths.credentials_file().display().to_string(),
                "log_file": settings.paths.log_file().display().to_string(),
                "omdb": {
                    "base_url": config.omdb.base_url,
                    "api_key": api_key_display,
                },
                "imdb": {
                    "base_url": config.imdb.base_url,
                    "max_stalled_pages": config.imdb.max_stalled_pages,
                    "collision_policy": config.imdb.collision_policy,
                    "timeout_seconds": config.imdb.timeout_seconds,
                    "user_agent": config.imdb.user_agent,
                },
                "harvest": {
                    "limit": config.harvest.limit,
                    "separator": config.harvest.separator.to_string(),
                    "min_reviews": config.harvest.min_reviews,
                    "output_dir": config.harvest.output_dir,
                },
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "Config file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    tracing::info!(path = %config_file.display(), "Wrote default configuration");
    output.success(format!("Configuration written to {}", config_file.display()));
    Ok(())
}

fn configure_omdb(api_key_arg: Option<String>, output: &Output) -> Result<()> {
    let mut settings = load_settings()?;

    let api_key = match api_key_arg {
        Some(key) => {
            let key = key.trim().to_string();
            if key.is_empty() {
                return Err(eyre!("OMDb API key cannot be empty"));
            }
            key
        }
        None => {
            if !output.is_quiet() && output.format() == OutputFormat::Human {
                println!("Get a free key at {}", "https://www.omdbapi.com/apikey.aspx".bright_blue());
            }
            loop {
                let input = rpassword::prompt_password("OMDb API key: ")
                    .map_err(|e| eyre!("Failed to read API key: {}", e))?;
                let input = input.trim().to_string();
                if !input.is_empty() {
                    break input;
                }
                output.error("OMDb API key cannot be empty, try again");
            }
        }
    };

    settings.credentials.set_omdb_api_key(api_key);
    settings
        .credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "OMDb API key saved to {}",
        settings.paths.credentials_file().display()
    ));
    Ok(())
}
