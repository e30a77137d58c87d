pub mod init;
pub mod leaderboard;
pub mod list;
pub mod publish;
pub mod review;
pub mod score;
pub mod submit;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use quizzo_core::config::{load_config_from, QuizzoConfig};
use quizzo_core::service::QuizService;
use quizzo_core::store::FileStore;

/// Options shared by every command that touches the quiz store.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store directory (overrides config and QUIZZO_STORE_DIR)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    /// Load config and open the file-backed quiz service it points at.
    pub fn open(&self) -> Result<(QuizService, QuizzoConfig)> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.store {
            config.store_dir = dir.clone();
        }
        let store = FileStore::new(config.store_dir.clone());
        tracing::debug!(store = %store.root().display(), "opening quiz store");

        let service = QuizService::new(Arc::new(store), config.service_config());
        Ok((service, config))
    }
}
