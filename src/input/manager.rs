//! Input manager: reads documents from disk and routes them to a decoder

use crate::error::{JobFitError, Result};
use crate::input::file_detector::{FileType, MAX_FILE_SIZE};
use crate::input::text_extractor::decoder_for;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
    max_file_size: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let metadata = fs::metadata(path).await.map_err(|_| {
            JobFitError::InvalidInput(format!("File does not exist: {}", path.display()))
        })?;
        if metadata.len() > self.max_file_size {
            return Err(JobFitError::InvalidInput(format!(
                "File too large: {} ({} bytes, limit {})",
                path.display(),
                metadata.len(),
                self.max_file_size
            )));
        }

        let bytes = fs::read(path).await?;
        let extension = path.extension().and_then(|ext| ext.to_str());
        let file_type = FileType::detect(&bytes, extension);

        info!("Reading {} document: {}", file_type, path.display());
        let text = decoder_for(file_type)?.decode(&bytes)?;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
