//! Lazily loaded, shared packed dataset.
//!
//! A [`DatasetRegistry`] owns at most one [`PackedDataManager`]. The first
//! caller that needs it loads it from the configured path; every later
//! caller, on any thread, gets the same instance.

use crate::{DecodeLimits, PackedDataManager, RegistryError};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Path of the packed container to load.
pub const DATASET_ENV: &str = "PACKED_DATASET";

/// Optional override of [`DecodeLimits::total_bytes_limit`].
pub const MAX_BYTES_ENV: &str = "PACKED_DATASET_MAX_BYTES";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub dataset: Option<PathBuf>,
    pub limits: DecodeLimits,
}

impl RegistryConfig {
    pub fn with_dataset<P: Into<PathBuf>>(path: P) -> Self {
        RegistryConfig {
            dataset: Some(path.into()),
            limits: DecodeLimits::default(),
        }
    }

    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dataset = lookup(DATASET_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut limits = DecodeLimits::default();
        if let Some(value) = lookup(MAX_BYTES_ENV).filter(|v| !v.is_empty()) {
            limits.total_bytes_limit =
                value
                    .trim()
                    .parse()
                    .map_err(|_| RegistryError::InvalidLimit {
                        var: MAX_BYTES_ENV,
                        value: value.clone(),
                    })?;
        }

        Ok(RegistryConfig { dataset, limits })
    }
}

#[derive(Debug)]
pub struct DatasetRegistry {
    config: RegistryConfig,
    slot: OnceLock<PackedDataManager>,
    init: Mutex<()>,
}

impl DatasetRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        DatasetRegistry {
            config,
            slot: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The instance, if one has been loaded or registered.
    pub fn get(&self) -> Option<&PackedDataManager> {
        self.slot.get()
    }

    /// Installs `manager` unless the slot is already filled, in which case
    /// it is handed back.
    pub fn register(&self, manager: PackedDataManager) -> Result<(), PackedDataManager> {
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        self.slot.set(manager)
    }

    /// Returns the shared instance, loading it on first use.
    ///
    /// Concurrent first callers block on one load; a failed load leaves the
    /// slot empty so the next call tries again.
    pub fn try_get_or_load(&self) -> Result<&PackedDataManager, RegistryError> {
        if let Some(manager) = self.slot.get() {
            return Ok(manager);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(manager) = self.slot.get() {
            debug!("packed dataset loaded by another thread");
            return Ok(manager);
        }

        let path = self
            .config
            .dataset
            .as_ref()
            .ok_or(RegistryError::MissingDatasetPath)?;
        let manager = PackedDataManager::open_with_limits(path, self.config.limits).map_err(
            |source| RegistryError::Load {
                path: path.clone(),
                source,
            },
        )?;
        info!("registered packed dataset from {}", path.display());

        Ok(self.slot.get_or_init(|| manager))
    }

    /// Like [`DatasetRegistry::try_get_or_load`], but a load failure is fatal.
    ///
    /// Fatal means a panic carrying the diagnostic, after it is logged at
    /// `error!`. On the main thread at startup this ends the process; a
    /// binary built with `panic = "abort"` ends it from any thread.
    ///
    /// # Panics
    ///
    /// When no dataset path is configured or the dataset cannot be loaded.
    pub fn get_or_load(&self) -> &PackedDataManager {
        match self.try_get_or_load() {
            Ok(manager) => manager,
            Err(e) => {
                error!("cannot initialize packed dataset: {}", e);
                panic!("cannot initialize packed dataset: {e}");
            }
        }
    }
}

/// Process-wide registry configured from the environment on first use.
///
/// An unparsable size limit is reported and replaced by the default.
pub fn global() -> &'static DatasetRegistry {
    static GLOBAL: OnceLock<DatasetRegistry> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let config = RegistryConfig::from_env().unwrap_or_else(|e| {
            warn!("{}; using the default limit", e);
            RegistryConfig {
                dataset: std::env::var_os(DATASET_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from),
                limits: DecodeLimits::default(),
            }
        });
        DatasetRegistry::new(config)
    })
}
