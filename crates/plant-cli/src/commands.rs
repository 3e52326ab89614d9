use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use plant_model::ModelSummary;
use plant_persistence::{
    BackupEntry, DurableStore, LoadReport, PersistenceError, StoreConfig, build_model,
};

/// Store configuration file looked up in the home directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "plant-store.toml";

/// Resolve the store from an optional config file and home override.
pub fn open_store(home: Option<&Path>, config: Option<&Path>) -> Result<DurableStore> {
    let config_path = match config {
        Some(path) => path.to_path_buf(),
        None => home.unwrap_or(Path::new(".")).join(DEFAULT_CONFIG_FILE),
    };
    let mut store_config = StoreConfig::load_from(&config_path)
        .with_context(|| format!("load store configuration {}", config_path.display()))?;
    if let Some(home) = home {
        store_config.home = home.to_path_buf();
    }
    debug!(
        home = %store_config.home.display(),
        snapshot = %store_config.snapshot_path().display(),
        "Resolved store"
    );
    Ok(DurableStore::from_config(&store_config))
}

/// What `info` found in the store.
#[derive(Debug)]
pub struct InfoReport {
    pub snapshot_path: PathBuf,
    /// `None` without a saved model.
    pub model_name: Option<String>,
    pub digest: Option<String>,
    pub report: LoadReport,
    pub backups: usize,
}

pub fn run_info(store: &DurableStore) -> Result<InfoReport> {
    let snapshot_path = store.snapshot_path().to_path_buf();
    let backups = store.list_backups().context("list backups")?.len();
    if !store.has_saved_model() {
        return Ok(InfoReport {
            snapshot_path,
            model_name: None,
            digest: None,
            report: LoadReport::default(),
            backups,
        });
    }
    let (model, report) = store
        .read_model_with_report()
        .context("read saved model")?;
    let digest = store.snapshot_digest().context("hash snapshot")?;
    Ok(InfoReport {
        snapshot_path,
        model_name: Some(model.name().to_string()),
        digest,
        report,
        backups,
    })
}

/// Outcome of validating a document without touching the store.
#[derive(Debug)]
pub struct CheckReport {
    pub file: PathBuf,
    pub model_name: Option<String>,
    pub report: LoadReport,
    /// The structural problem that rejected the document, if any.
    pub error: Option<PersistenceError>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.error.is_some()
    }
}

/// Decode and build `file`. Structural problems land in the report; only
/// failures to read the file are returned as errors.
pub fn run_check(store: &DurableStore, file: &Path) -> Result<CheckReport> {
    let span = info_span!("check", file = %file.display());
    let _guard = span.enter();

    let built = store
        .read_document(file)
        .and_then(|tree| build_model(&tree));
    match built {
        Ok((model, report)) => Ok(CheckReport {
            file: file.to_path_buf(),
            model_name: Some(model.name().to_string()),
            report,
            error: None,
        }),
        Err(error) if error.is_structural() => Ok(CheckReport {
            file: file.to_path_buf(),
            model_name: None,
            report: LoadReport::default(),
            error: Some(error),
        }),
        Err(error) => Err(error).with_context(|| format!("check {}", file.display())),
    }
}

#[derive(Debug)]
pub struct ImportReport {
    pub model_name: String,
    pub report: LoadReport,
}

/// Replace the saved model with the content of `file`. The previous
/// snapshot is backed up; a rejected file leaves the store unchanged.
pub fn run_import(store: &DurableStore, file: &Path) -> Result<ImportReport> {
    let span = info_span!("import", file = %file.display());
    let _guard = span.enter();

    let tree = store
        .read_document(file)
        .with_context(|| format!("read {}", file.display()))?;
    let (model, report) =
        build_model(&tree).with_context(|| format!("build model from {}", file.display()))?;
    store.save_model(&model).context("save imported model")?;
    info!(model = %model.name(), diagnostics = report.diagnostics.len(), "Imported plant model");
    Ok(ImportReport {
        model_name: model.name().to_string(),
        report,
    })
}

/// Write the saved model to `file`.
pub fn run_export(store: &DurableStore, file: &Path) -> Result<ModelSummary> {
    anyhow::ensure!(
        store.has_saved_model(),
        "no saved model at {}",
        store.snapshot_path().display()
    );
    let model = store.read_model().context("read saved model")?;
    store
        .write_document(&model, file)
        .with_context(|| format!("export to {}", file.display()))?;
    Ok(model.summary())
}

/// Back up and delete the saved model. Returns whether one existed.
pub fn run_remove(store: &DurableStore) -> Result<bool> {
    let existed = store.has_saved_model();
    store.remove_model().context("remove saved model")?;
    Ok(existed)
}

pub fn run_backups(store: &DurableStore) -> Result<Vec<BackupEntry>> {
    store.list_backups().context("list backups")
}
