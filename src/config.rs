//! ストアファイル（拡張機能ストレージと同じ形のJSON）

use crate::error::{DejapawError, Result};
use dejapaw_common::StoreData;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    pub data: StoreData,
}

impl Store {
    /// `path` 省略時は `~/.config/dejapaw/store.json`。ファイルが無ければ空のストア
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::store_path()?,
        };
        let data = StoreData::load_file(&path)?;
        log::debug!(
            "store loaded: {} ({} fields, {} records)",
            path.display(),
            data.fields.len(),
            data.records.len()
        );
        Ok(Self { path, data })
    }

    pub fn save(&self) -> Result<()> {
        self.data.save_file(&self.path)?;
        log::debug!("store saved: {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DejapawError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("dejapaw").join("store.json"))
    }
}
