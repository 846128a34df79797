use clap::{ArgAction, Parser, Subcommand};
use commands::{config, harvest, info};
use reviewharvest_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reviewharvest")]
#[command(about = "Harvest IMDb user reviews for a movie into a delimited file")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (defaults to the logs directory)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a title, harvest its user reviews and write them to a file
    #[command(long_about = "Resolve a movie title to its IMDb id through OMDb, walk the IMDb review pages until the limit is reached or no more pages exist, and write the reviews as 'rating<separator>title body' lines. The file is only written when more than --min-reviews reviews were collected.")]
    Harvest {
        /// Movie title to search for
        title: String,

        /// Use this IMDb id (tt...) directly and skip the OMDb lookup
        #[arg(long, value_name = "ID")]
        movie_id: Option<String>,

        /// Maximum number of reviews to collect
        #[arg(short, long)]
        limit: Option<usize>,

        /// Destination file (spaces in the path are replaced with underscores)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Column separator character
        #[arg(short, long)]
        separator: Option<char>,

        /// Only write the file when more than this many reviews were collected
        #[arg(long)]
        min_reviews: Option<usize>,

        /// OMDb API key (overrides OMDB_API_KEY and stored credentials)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Show OMDb metadata for a title
    Info {
        /// Movie title to search for
        title: String,

        /// OMDb API key (overrides OMDB_API_KEY and stored credentials)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Manage configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Store the OMDb API key
    Omdb {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Harvest {
            title,
            movie_id,
            limit,
            file,
            separator,
            min_reviews,
            api_key,
        } => {
            let args = harvest::HarvestArgs {
                title,
                movie_id,
                limit,
                file,
                separator,
                min_reviews,
                api_key,
            };
            harvest::run_harvest(args, &output).await
        }
        Commands::Info { title, api_key } => info::run_info(&title, api_key, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
