//! EditSecretsUseCase: the Load, Save, and Reset actions of the editor.
//!
//! The use case depends only on the [`SecretsStore`] trait.  The file-backed
//! implementation lives in `infrastructure::storage::secrets_file` and is
//! injected at construction time, so the load/save/reset rules can be tested
//! against an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use bit_config_core::SecretRecord;
use thiserror::Error;
use tracing::{debug, info};

use super::form_state::FormState;

/// Error type for the edit use case.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistent home of the secrets record.
#[async_trait]
pub trait SecretsStore: Send + Sync {
    /// Reads the stored record, filling absent values from `defaults`.
    async fn load(&self, defaults: &SecretRecord) -> Result<SecretRecord, String>;

    /// Replaces the stored record with `record`.
    async fn save(&self, record: &SecretRecord) -> Result<(), String>;
}

/// Load/save/reset over a [`SecretsStore`].
pub struct EditSecretsUseCase {
    store: Arc<dyn SecretsStore>,
    defaults: SecretRecord,
}

impl EditSecretsUseCase {
    pub fn new(store: Arc<dyn SecretsStore>, defaults: SecretRecord) -> Self {
        Self { store, defaults }
    }

    /// Values written by [`reset`](Self::reset) and used to pad short files.
    pub fn defaults(&self) -> &SecretRecord {
        &self.defaults
    }

    /// Reads the stored record and builds a fresh form from it.
    pub async fn load(&self) -> Result<FormState, EditError> {
        let record = self
            .store
            .load(&self.defaults)
            .await
            .map_err(EditError::Storage)?;
        let form = FormState::from_record(&record);
        debug!(
            feed_letter = form.feed_letter(),
            "secrets loaded into form"
        );
        Ok(form)
    }

    /// Commits `form` to the store.
    ///
    /// Returns the form as it reads after the commit: a recognized feed
    /// letter has been expanded into the feed-key input.
    pub async fn save(&self, form: &FormState) -> Result<FormState, EditError> {
        let record = form.to_record();
        self.store.save(&record).await.map_err(EditError::Storage)?;
        info!(feed_key = %record.io_feed_key, "secrets saved");
        Ok(FormState::from_record(&record))
    }

    /// Overwrites the stored record with the defaults, then reloads it.
    pub async fn reset(&self) -> Result<FormState, EditError> {
        self.store
            .save(&self.defaults)
            .await
            .map_err(EditError::Storage)?;
        info!("secrets reset to defaults");
        self.load().await
    }
}
