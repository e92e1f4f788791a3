use screening_core::download::{FileSaver, SaveError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes exports into a local directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file_name: &str) -> Option<PathBuf> {
        Path::new(file_name).file_name().map(|name| self.dir.join(name))
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), SaveError> {
        let path = self
            .path_for(file_name)
            .ok_or_else(|| SaveError::Platform(format!("invalid file name '{file_name}'")))?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), mime, bytes = bytes.len(), "saved");
        Ok(())
    }
}
