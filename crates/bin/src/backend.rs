//! Store stack creation and persistence for the CLI.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use confstore::{
    backend::InMemory,
    decorator::{
        CachingConfiguration, OptimisticLockingConfiguration, ReferenceIndex,
        ReferenceIndexingConfiguration,
    },
    settings::StoreSettings,
};

use crate::cli::Cli;

/// The decorator chain every command talks to
pub type Stack = OptimisticLockingConfiguration<
    ReferenceIndexingConfiguration<CachingConfiguration<Arc<InMemory>>>,
>;

/// A loaded document with its decorator chain
pub struct StoreHandle {
    base: Arc<InMemory>,
    index: Arc<ReferenceIndex>,
    stack: Stack,
    data_file: PathBuf,
}

impl StoreHandle {
    /// Load the document and settings named on the command line, then build
    /// the reference index from the loaded tree.
    pub fn open(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = load_settings(cli.settings.as_deref())?;

        let base = Arc::new(InMemory::load_from_file(&cli.data_file)?);
        tracing::info!("Loaded document from {}", cli.data_file.display());

        let index = Arc::new(ReferenceIndex::new());
        let stack = OptimisticLockingConfiguration::new(
            ReferenceIndexingConfiguration::new(
                CachingConfiguration::new(Arc::clone(&base)),
                Arc::clone(&index),
                &settings,
            ),
            &settings,
        );
        stack.inner().rebuild_index()?;
        tracing::info!(identifiers = index.len(), "Reference index built");

        Ok(Self {
            base,
            index,
            stack,
            data_file: cli.data_file.clone(),
        })
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn indexing(&self) -> &ReferenceIndexingConfiguration<CachingConfiguration<Arc<InMemory>>> {
        self.stack.inner()
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Write the document back to its data file
    pub fn save(&self) -> confstore::Result<()> {
        self.base.save_to_file(&self.data_file)?;
        tracing::info!("Saved document to {}", self.data_file.display());
        Ok(())
    }
}

fn load_settings(path: Option<&FsPath>) -> confstore::Result<StoreSettings> {
    match path {
        Some(path) => {
            let settings = StoreSettings::load_from_file(path)?;
            tracing::info!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(StoreSettings::default()),
    }
}
