use clap::{Parser, Subcommand};
use folio::batch::{self, DocumentKind, Outcome, Pipeline};
use folio::normalize::Normalizer;
use folio::raw::RawArtistRoute;
use folio::{config, output, slug};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shared flags for commands that normalize saved query results.
#[derive(clap::Args, Clone)]
struct BatchArgs {
    /// What the inputs hold
    #[arg(value_enum)]
    kind: DocumentKind,

    /// Query result files, or directories to search for *.json
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Saved artist index query, used to credit latest-project slides on pages
    #[arg(long)]
    artists: Option<PathBuf>,

    /// Artist display name for project detail page titles
    #[arg(long)]
    artist_name: Option<String>,

    /// Worker threads (defaults to the number of cores)
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Normalize portfolio CMS records into render-ready entities")]
#[command(long_about = "\
Normalize portfolio CMS records into render-ready entities

Inputs are query results saved as JSON, either the record itself or the
array a query returns (the first element is used).

  folio normalize page queries/home.json --artists queries/artists.json
  folio normalize artist queries/artists/ --out build/artists
  folio check project queries/sunset.json --artist-name \"Jane Doe\"
  folio slug jane jane-sunset
  folio route queries/jane-route.json sunset

Responsive image widths, the hero still duration and the site name come
from config.toml in the --config directory. Run 'folio gen-config' to
generate a documented one.

Log verbosity follows RUST_LOG (default: folio=info).")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize inputs and write canonical JSON
    Normalize {
        #[command(flatten)]
        batch: BatchArgs,

        /// Write one JSON file per input here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Normalize inputs and print a summary of each
    Check(BatchArgs),
    /// Print a project slug relative to its artist
    Slug {
        /// Artist slug
        artist: String,
        /// Stored project slug
        project: String,
    },
    /// Resolve a project route segment against a saved artist route query
    Route {
        /// Saved artist route query
        artist: PathBuf,
        /// Project segment of /artists/{artist}/{project}
        project: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize { batch: args, out } => {
            let outcomes = run_batch(&cli.config, &args)?;
            if let Some(out_dir) = &out {
                std::fs::create_dir_all(out_dir)?;
            }
            for outcome in &outcomes {
                let Ok(normalized) = &outcome.result else {
                    continue;
                };
                let json = serde_json::to_string_pretty(normalized)?;
                match &out {
                    Some(out_dir) => {
                        let path = batch::output_path(out_dir, &outcome.path);
                        std::fs::write(&path, json)?;
                        println!("{} → {}", outcome.path.display(), path.display());
                    }
                    None => println!("{}", json),
                }
            }
            report_failures(&outcomes)?;
        }
        Command::Check(args) => {
            let outcomes = run_batch(&cli.config, &args)?;
            output::print_outcomes(&outcomes);
            report_failures(&outcomes)?;
            println!("==> {} inputs are valid", outcomes.len());
        }
        Command::Slug { artist, project } => {
            println!("{}", slug::resolve_slug(&artist, &project));
        }
        Command::Route { artist, project } => {
            let route: RawArtistRoute = serde_json::from_value(batch::load_document(&artist)?)?;
            match slug::find_artist_project_slug(&route, &project) {
                Some(stored) => println!("{}", stored),
                None => return Err(format!("project not found: {}", project).into()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so `folio normalize` output stays pipeable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_batch(
    config_dir: &Path,
    args: &BatchArgs,
) -> Result<Vec<Outcome>, Box<dyn std::error::Error>> {
    let site_config = config::load_config(config_dir)?;
    init_thread_pool(args.jobs);

    let artist_index = match &args.artists {
        Some(path) => batch::load_artist_index(path)?,
        None => Vec::new(),
    };
    let pipeline = Pipeline::new(Normalizer::new(&site_config))
        .with_artist_index(artist_index)
        .with_artist_name(args.artist_name.clone());

    let inputs = batch::collect_inputs(&args.inputs)?;
    tracing::info!(kind = %args.kind, inputs = inputs.len(), "normalizing");
    Ok(batch::run(args.kind, &inputs, &pipeline))
}

/// Initialize the rayon thread pool.
///
/// Caps at the number of available CPU cores: the flag can constrain down, not up.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map_or(cores, |j| j.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn report_failures(outcomes: &[Outcome]) -> Result<(), Box<dyn std::error::Error>> {
    let failed: Vec<&Outcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    if failed.is_empty() {
        return Ok(());
    }
    for outcome in &failed {
        if let Err(err) = &outcome.result {
            eprintln!("{}: {}", outcome.path.display(), err);
        }
    }
    Err(format!("{} of {} inputs failed", failed.len(), outcomes.len()).into())
}
