use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ContainerFile {
    pub path: PathBuf,
}

impl ContainerFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Recursive discovery of container files by extension.
pub struct ContainerScanner {
    extension: String,
}

impl ContainerScanner {
    /// `extension` is matched case-insensitively, with or without a leading dot.
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn scan_directory(&self, root_path: &Path) -> Vec<ContainerFile> {
        let suffix = format!(".{}", self.extension);

        WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable path: {err}");
                    None
                }
            })
            .filter(|entry| entry.path().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .to_lowercase()
                    .ends_with(&suffix)
            })
            .map(|entry| ContainerFile {
                path: entry.into_path(),
            })
            .collect()
    }
}

impl Default for ContainerScanner {
    fn default() -> Self {
        Self::new("pbix")
    }
}
