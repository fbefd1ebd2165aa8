pub mod auth;
pub mod config;
pub mod energy;
pub mod focus;
pub mod mode;
pub mod notes;
pub mod plan;
pub mod prefs;
pub mod profile;
pub mod progress;
pub mod tutor;

use chrono::{Local, NaiveDate};
use neurostudy_core::curriculum::{Catalog, Chapter};
use neurostudy_core::plan::Task;
use neurostudy_core::profile::{ModeState, StyleDiff, StyleReconciler, StyleSet};
use neurostudy_core::storage::Database;
use neurostudy_core::tutor::ChapterContext;
use neurostudy_core::Config;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Style tags last applied, as a JSON array of class names.
const STYLES_KEY: &str = "styles_applied";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn mode_state(db: &Database) -> ModeState<&Database> {
    ModeState::load(db)
}

/// Reconcile the stored style tags against `desired` and persist the result.
pub fn reconcile_styles(db: &Database, desired: &StyleSet) -> Result<StyleDiff, Box<dyn std::error::Error>> {
    let applied = match db.kv_get(STYLES_KEY)? {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored style tags are malformed, starting empty");
            StyleSet::new()
        }),
        None => StyleSet::new(),
    };
    let mut root = StyleReconciler::with_applied(applied);
    let diff = root.apply(desired);
    db.kv_set(STYLES_KEY, &serde_json::to_string(root.applied())?)?;
    Ok(diff)
}

/// Apply the profile's styles after a mode, preference or energy change.
pub fn apply_styles(db: &Database, state: &ModeState<&Database>) -> CmdResult {
    let diff = reconcile_styles(db, &state.profile().style)?;
    if !diff.is_empty() {
        println!("styles: {diff}");
    }
    Ok(())
}

/// Resolve a full task id or a unique prefix of one.
pub fn resolve_task_id(tasks: &[Task], prefix: &str) -> Result<String, Box<dyn std::error::Error>> {
    if prefix.is_empty() {
        return Err("task id must not be empty".into());
    }
    if let Some(task) = tasks.iter().find(|t| t.id == prefix) {
        return Ok(task.id.clone());
    }
    let matches: Vec<&Task> = tasks.iter().filter(|t| t.id.starts_with(prefix)).collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => Err(format!("no task in today's plan matches '{prefix}'").into()),
        _ => Err(format!("'{prefix}' matches more than one task").into()),
    }
}

/// The configured catalogue file, or the built-in one.
pub fn load_catalog(config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    match &config.study.catalog_path {
        Some(path) => Ok(Catalog::load(std::path::Path::new(path))?),
        None => Ok(Catalog::builtin()),
    }
}

pub fn find_chapter<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Chapter, Box<dyn std::error::Error>> {
    catalog
        .chapter(id)
        .ok_or_else(|| format!("no chapter with id '{id}'").into())
}

/// Chapter context for the tutor, if `--chapter` was given.
pub fn chapter_context(chapter_id: Option<&str>) -> Result<Option<ChapterContext>, Box<dyn std::error::Error>> {
    let Some(id) = chapter_id else {
        return Ok(None);
    };
    let config = Config::load()?;
    let catalog = load_catalog(&config)?;
    Ok(Some(ChapterContext::from(find_chapter(&catalog, id)?)))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Single-threaded runtime for one gateway call.
pub fn runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
