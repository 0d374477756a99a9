// =============================================================================
// STORE.RS — Directory of level save files
//
// One file per level: `<save_dir>/<name>.<extension>`.
// A level that has never been saved loads as the default record.
// =============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::error::{LevelError, Result};
use crate::persistence::{deserialize, serialize, SaveRecord};

#[derive(Clone, Debug)]
pub struct LevelStore {
    dir: PathBuf,
    extension: String,
}

impl LevelStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.save_dir.clone(), config.extension.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing level `name`. A trailing `.<extension>` on `name` is
    /// accepted and not doubled.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let suffix = format!(".{}", self.extension);
        let stem = name.strip_suffix(suffix.as_str()).unwrap_or(name);
        if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
            return Err(LevelError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{stem}{suffix}")))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Read level `name`. A missing file yields [`SaveRecord::default`];
    /// a corrupt one is an error.
    pub fn load(&self, name: &str) -> Result<SaveRecord> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => deserialize(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no save at {:?}; using the default level", path);
                Ok(SaveRecord::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write `record` as level `name`, replacing any previous save.
    pub fn save(&self, name: &str, record: &SaveRecord) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serialize(record)?)?;
        log::info!("saved level {} ({}x{}) to {:?}", record.level_id, record.columns, record.rows, path);
        Ok(())
    }

    /// Write a blank `columns` x `rows` level. Refuses to overwrite.
    pub fn create(&self, name: &str, columns: i32, rows: i32) -> Result<SaveRecord> {
        let path = self.path_for(name)?;
        if path.exists() {
            return Err(LevelError::AlreadyExists(path));
        }
        let (columns, rows) = EditorConfig::clamp_new_level_size(columns, rows);
        let record = SaveRecord::with_size(columns, rows);
        self.save(name, &record)?;
        Ok(record)
    }

    /// Names of every saved level, sorted, without the extension.
    ///
    /// A save directory that does not exist yet holds no levels.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in walkdir::WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| LevelError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(n) if !n.is_empty() => names.push(n.to_string()),
                _ => continue,
            }
        }
        names.sort();
        Ok(names)
    }
}
