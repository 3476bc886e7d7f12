//! JSON status snapshot adapter.
//!
//! Whole-file overwrite through a temp-file rename, so external readers see
//! either the previous snapshot or the new one, never a torn write.

use crate::domain::bot::BotStatus;
use crate::domain::error::BotError;
use crate::ports::status_port::StatusPort;
use std::fs;
use std::path::PathBuf;

pub struct JsonStatusFile {
    path: PathBuf,
}

impl JsonStatusFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StatusPort for JsonStatusFile {
    fn publish(&self, status: &BotStatus) -> Result<(), BotError> {
        let json = serde_json::to_string_pretty(status).map_err(|e| BotError::Io(e.into()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
