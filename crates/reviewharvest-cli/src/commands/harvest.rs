use super::load_settings;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reviewharvest_core::{HarvestPipeline, HarvestReport, HarvestRequest};
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct HarvestArgs {
    pub title: String,
    pub movie_id: Option<String>,
    pub limit: Option<usize>,
    pub file: Option<PathBuf>,
    pub separator: Option<char>,
    pub min_reviews: Option<usize>,
    pub api_key: Option<String>,
}

pub async fn run_harvest(args: HarvestArgs, output: &Output) -> Result<()> {
    tracing::debug!("Harvest command started");

    let settings = load_settings()?;
    let defaults = &settings.config.harvest;

    let separator = args.separator.unwrap_or(defaults.separator);
    if !separator.is_ascii() {
        return Err(eyre!("Separator must be a single ASCII character, got {:?}", separator));
    }

    let file = args
        .file
        .unwrap_or_else(|| default_output_file(defaults.output_dir.as_deref(), &args.title));

    // A known movie id skips the lookup, so the OMDb key is optional then
    let api_key = match (&args.movie_id, settings.omdb_api_key(args.api_key.as_deref())) {
        (_, Ok(key)) => key,
        (Some(_), Err(_)) => String::new(),
        (None, Err(e)) => return Err(e),
    };
    let metadata = settings.omdb_source(api_key)?;
    let reviews = settings.imdb_source()?;

    let request = HarvestRequest {
        title: args.title,
        movie_id: args.movie_id,
        limit: args.limit.unwrap_or(defaults.limit),
        output: file,
        separator,
        min_reviews: args.min_reviews.unwrap_or(defaults.min_reviews),
    };

    let pipeline = HarvestPipeline::new(Box::new(metadata), Box::new(reviews));
    let report = pipeline
        .run(&request)
        .await
        .map_err(|e| eyre!("Harvest for '{}' failed: {}", request.title, e))?;

    print_report(&report, &request, output);
    Ok(())
}

fn print_report(report: &HarvestReport, request: &HarvestRequest, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            output.success(format!(
                "Collected {} reviews for '{}' ({}), stopped: {}",
                report.collected, report.title, report.movie_id, report.stop
            ));
            if let Some(avg) = report.average_rating {
                output.info(format!("Average rating: {:.2}", avg));
            }
            if report.stats.duplicates() > 0 || report.stats.unparseable > 0 {
                output.info(format!(
                    "Pages: {} | Duplicates: {} | Unrated: {} | Unparseable: {}",
                    report.stats.pages_fetched,
                    report.stats.duplicates(),
                    report.stats.unrated,
                    report.stats.unparseable
                ));
            }
            match &report.written {
                Some(path) => output.success(format!("Wrote {}", path.display())),
                None => output.warn(format!(
                    "Only {} reviews collected (need more than {}), no file written",
                    report.collected, request.min_reviews
                )),
            }
            if report.stop.is_partial() {
                output.warn("Harvest ended early, results are partial");
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let report_json = serde_json::to_value(report).unwrap_or_else(|_| json!({}));
            output.json(&json!({
                "type": "harvest",
                "report": report_json,
            }));
        }
    }
}

/// `<output_dir>/<title>_reviews.csv`, defaulting to the working directory
fn default_output_file(output_dir: Option<&Path>, title: &str) -> PathBuf {
    let mut stem = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '\'' {
            stem.extend(c.to_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "movie" } else { stem };

    output_dir
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_reviews.csv", stem))
}
