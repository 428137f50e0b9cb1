use std::path::PathBuf;

use clap::{Parser, Subcommand};
use datatools::upload::{self, TimetableFile};
use datatools::{ApiClient, MatchMode, RenamePropagator, Workbook, reader, roster, sheet};
use storage::models::AthleteKey;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "zehnkampf-data")]
#[command(about = "Jedermannzehnkampf data migration and reporting tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the registered athletes into the result workbook grid.
    ExportSheet {
        #[arg(long, default_value = "./dumps")]
        dump_dir: PathBuf,

        #[arg(long, default_value = "./output/workbook.json")]
        output: PathBuf,
    },
    /// Render the attendee list, one page per group.
    Roster {
        #[arg(long, default_value = "./dumps")]
        dump_dir: PathBuf,

        #[arg(long, default_value = "./output/athletes.html")]
        output: PathBuf,
    },
    /// Push registration lists and the timetable into the event API.
    Upload {
        #[arg(long, env = "API_URL", default_value = "http://127.0.0.1:3001")]
        api_url: String,

        #[arg(long)]
        register: Option<PathBuf>,

        #[arg(long)]
        kids_register: Option<PathBuf>,

        /// Old results export with one short-labelled column per discipline.
        #[arg(long)]
        results: Option<PathBuf>,

        #[arg(long)]
        timetable: Option<PathBuf>,
    },
    /// Rewrite an athlete's identity across all three tables.
    Rename {
        #[arg(long, default_value = "./dumps")]
        dump_dir: PathBuf,

        #[arg(long)]
        old_name: String,

        #[arg(long)]
        old_surname: String,

        #[arg(long)]
        new_name: String,

        #[arg(long)]
        new_surname: String,

        /// Keep scanning after the first matching group instead of
        /// stopping there.
        #[arg(long)]
        all_matches: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("datatools={log_level},storage={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::ExportSheet { dump_dir, output } => {
            handle_export_sheet(dump_dir, output).await?;
        }
        Commands::Roster { dump_dir, output } => {
            handle_roster(dump_dir, output).await?;
        }
        Commands::Upload {
            api_url,
            register,
            kids_register,
            results,
            timetable,
        } => {
            handle_upload(api_url, register, kids_register, results, timetable).await?;
        }
        Commands::Rename {
            dump_dir,
            old_name,
            old_surname,
            new_name,
            new_surname,
            all_matches,
        } => {
            handle_rename(
                dump_dir,
                AthleteKey::new(&old_name, &old_surname),
                AthleteKey::new(&new_name, &new_surname),
                all_matches,
            )
            .await?;
        }
    }

    Ok(())
}

async fn handle_export_sheet(
    dump_dir: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage::dump::load_store(&dump_dir).await?;

    tracing::info!("Reading athletes and groups...");
    let rows = reader::read_sheet_rows(&store, &store).await?;
    tracing::info!("Projecting {} rows", rows.len());

    let mut workbook = Workbook::new();
    for row in &rows {
        workbook.apply(sheet::project_row(row));
    }

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output, workbook.to_json()?).await?;
    tracing::info!("{} cell writes exported to {}", workbook.len(), output.display());

    Ok(())
}

async fn handle_roster(
    dump_dir: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage::dump::load_store(&dump_dir).await?;

    let pages = roster::collect_roster(&store, &store).await?;
    let html = roster::render_html(&pages);

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output, html).await?;
    tracing::info!("attendee list for {} groups written to {}", pages.len(), output.display());

    Ok(())
}

async fn handle_upload(
    api_url: String,
    register: Option<PathBuf>,
    kids_register: Option<PathBuf>,
    results: Option<PathBuf>,
    timetable: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(api_url);

    if let Some(path) = timetable {
        tracing::info!("Uploading timetable from {}", path.display());
        let raw = serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?;
        if !client.upload_timetable(&TimetableFile::new(raw)).await? {
            tracing::error!("timetable upload incomplete");
        }
    }

    if let Some(path) = register {
        tracing::info!("Uploading decathlon registrations from {}", path.display());
        let rows = upload::read_decathlon_rows(&path)?;
        upload::upload_decathlon(&client, &rows).await?;
    }

    if let Some(path) = kids_register {
        tracing::info!("Uploading kids registrations from {}", path.display());
        let rows = upload::read_kids_rows(&path)?;
        upload::upload_kids(&client, &rows).await?;
    }

    if let Some(path) = results {
        tracing::info!("Uploading old results from {}", path.display());
        let rows = upload::read_results_rows(&path)?;
        upload::upload_results(&client, &rows).await?;
    }

    Ok(())
}

async fn handle_rename(
    dump_dir: PathBuf,
    old: AthleteKey,
    new: AthleteKey,
    all_matches: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage::dump::load_store(&dump_dir).await?;

    let mode = if all_matches {
        MatchMode::AllMatches
    } else {
        MatchMode::FirstMatch
    };

    let propagator = RenamePropagator::new(&store, &store, &store, mode);
    let outcome = propagator.rename(&old, &new).await?;

    tracing::info!(
        "rename {} -> {}: athlete record {}, groups touched: {:?}, time groups touched: {:?}",
        old.composite(),
        new.composite(),
        if outcome.athlete_found { "updated" } else { "not found" },
        outcome.groups_touched,
        outcome.time_groups_touched,
    );

    storage::dump::save_store(&store, &dump_dir).await?;

    Ok(())
}
