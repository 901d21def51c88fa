use anyhow::Context;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(feature = "serde")]
pub use json::{JsonStorage, Storage};

/// Écrit `bytes` dans `path` de manière atomique (fichier temporaire + rename).
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

#[cfg(feature = "serde")]
mod json {
    use crate::config::{self, PlanningConfig};
    use std::path::{Path, PathBuf};

    pub trait Storage {
        /// Charge une configuration depuis un support.
        fn load(&self) -> anyhow::Result<PlanningConfig>;
        /// Sauvegarde de manière atomique.
        fn save(&self, config: &PlanningConfig) -> anyhow::Result<()>;
    }

    pub struct JsonStorage {
        path: PathBuf,
    }

    impl JsonStorage {
        pub fn open<P: AsRef<Path>>(path: P) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn exists(&self) -> bool {
            self.path.exists()
        }
    }

    impl Storage for JsonStorage {
        fn load(&self) -> anyhow::Result<PlanningConfig> {
            config::load_config_from_file(&self.path)
        }

        fn save(&self, config: &PlanningConfig) -> anyhow::Result<()> {
            config::save_config_to_file(&self.path, config)
        }
    }
}
