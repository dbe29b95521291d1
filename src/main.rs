use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

use nutriplan_rs::cli::{Cli, Command, CustomizeArgs, PlanArgs};
use nutriplan_rs::config::PlannerConfig;
use nutriplan_rs::customizer::PlanCustomizer;
use nutriplan_rs::error::{PlanError, Result};
use nutriplan_rs::interface::{
    display_change_log, display_daily_plan, prompt_preferences, prompt_profile, prompt_yes_no,
};
use nutriplan_rs::planner::PlanGenerator;
use nutriplan_rs::state::{JsonPlanStore, LocalCatalog, PlanStore};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` when set and valid, else the level chosen by `--verbose`.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}

fn setup_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = PlannerConfig::load(cli.config.as_ref())?;
    let store = JsonPlanStore::new(&cli.store);

    match &cli.command {
        Command::Plan(args) => cmd_plan(args, &cli.catalog, config, &store).await,
        Command::Customize(args) => cmd_customize(args, &cli.catalog, &store).await,
        Command::Show { plan_id } => cmd_show(plan_id, &store).await,
    }
}

/// Load the product catalog, or None when the file does not exist.
fn open_catalog(path: &Path) -> Result<Option<LocalCatalog>> {
    if !path.exists() {
        return Ok(None);
    }
    let catalog = LocalCatalog::from_file(path)?;
    debug!("Loaded {} products from {}", catalog.len(), path.display());
    Ok(Some(catalog))
}

/// Generate, display and save a daily plan.
async fn cmd_plan(
    args: &PlanArgs,
    catalog_path: &Path,
    config: PlannerConfig,
    store: &JsonPlanStore,
) -> Result<()> {
    let Some(catalog) = open_catalog(catalog_path)? else {
        eprintln!("Product catalog not found: {}", catalog_path.display());
        eprintln!("Pass --catalog with a JSON or CSV product file.");
        return Ok(());
    };

    if catalog.is_empty() {
        println!("Catalog is empty; the plan will have no items.");
    }

    let (profile, preferences) = if args.interactive {
        (prompt_profile()?, prompt_preferences()?)
    } else {
        (args.profile()?, args.preferences())
    };

    let generator = PlanGenerator::new(Arc::new(catalog), config);
    let plan = generator
        .generate(&profile, &preferences, &args.optional, args.flexible)
        .await?;

    display_daily_plan(&plan);

    if args.interactive && !prompt_yes_no("Save this plan?", true)? {
        return Ok(());
    }

    store.save(&plan.plan_id, &plan).await?;
    println!("Plan saved: {}", plan.plan_id);
    Ok(())
}

/// Apply a customization request to a stored plan.
async fn cmd_customize(args: &CustomizeArgs, catalog_path: &Path, store: &JsonPlanStore) -> Result<()> {
    let request = args.to_request()?;
    if request.is_empty() {
        println!("No customization requested.");
        return Ok(());
    }

    let plan = store
        .load(&args.plan_id)
        .await?
        .ok_or_else(|| PlanError::PlanNotFound(args.plan_id.clone()))?;

    let catalog = match open_catalog(catalog_path)? {
        Some(catalog) => catalog,
        None => {
            warn!("Product catalog {} not found; swaps cannot resolve", catalog_path.display());
            LocalCatalog::new(Vec::new())
        }
    };
    let customizer = PlanCustomizer::new(Arc::new(catalog));

    if customizer.check_idempotency(&plan, &request) {
        println!("No changes: the plan already reflects this request.");
        return Ok(());
    }

    let (updated, log) = customizer.customize(&plan, &request).await?;

    display_change_log(&log);
    display_daily_plan(&updated);

    store.save(&updated.plan_id, &updated).await?;
    println!("Plan saved: {}", updated.plan_id);
    Ok(())
}

async fn cmd_show(plan_id: &str, store: &JsonPlanStore) -> Result<()> {
    let plan = store
        .load(plan_id)
        .await?
        .ok_or_else(|| PlanError::PlanNotFound(plan_id.to_string()))?;

    display_daily_plan(&plan);
    Ok(())
}
