use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::model::{StoredUser, TaskBlock};
use crate::theme::Theme;

/// File-backed local store, one file per key. The browser original kept
/// these under localStorage keys `taskBlocks`, `theme` and `user`.
#[derive(Debug)]
pub struct LocalStore {
    pub data_dir: PathBuf,
    pub blocks_path: PathBuf,
    pub theme_path: PathBuf,
    pub user_path: PathBuf,
}

impl LocalStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let blocks_path = data_dir.join("blocks.json");
        let theme_path = data_dir.join("theme.data");
        let user_path = data_dir.join("user.json");

        if !blocks_path.exists() {
            fs::write(&blocks_path, "")?;
        }
        if !theme_path.exists() {
            fs::write(&theme_path, "")?;
        }
        if !user_path.exists() {
            fs::write(&user_path, "")?;
        }

        info!(
            data_dir = %data_dir.display(),
            blocks = %blocks_path.display(),
            theme = %theme_path.display(),
            user = %user_path.display(),
            "opened local store"
        );

        Ok(Self {
            data_dir,
            blocks_path,
            theme_path,
            user_path,
        })
    }

    /// Previously stored snapshot, or the empty collection when nothing has
    /// been saved yet. Loaded blocks carry no marker distinguishing them
    /// from freshly created ones.
    #[tracing::instrument(skip(self))]
    pub fn load_blocks(&self) -> anyhow::Result<Vec<TaskBlock>> {
        let raw = fs::read_to_string(&self.blocks_path)
            .with_context(|| format!("failed reading {}", self.blocks_path.display()))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(vec![]);
        }

        let blocks: Vec<TaskBlock> = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {}", self.blocks_path.display()))?;
        debug!(count = blocks.len(), "loaded task blocks");
        Ok(blocks)
    }

    /// Writes the full snapshot. Always the whole collection, never a delta.
    #[tracing::instrument(skip(self, blocks))]
    pub fn save_blocks(&self, blocks: &[TaskBlock]) -> anyhow::Result<()> {
        debug!(count = blocks.len(), "saving task blocks");
        let payload = serde_json::to_string(blocks)?;
        write_atomic(&self.blocks_path, payload.as_bytes())
            .context("failed to save blocks.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn theme(&self) -> anyhow::Result<Option<Theme>> {
        let raw = fs::read_to_string(&self.theme_path)
            .with_context(|| format!("failed reading {}", self.theme_path.display()))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let theme = trimmed
            .parse::<Theme>()
            .with_context(|| format!("invalid stored theme: {trimmed}"))?;
        Ok(Some(theme))
    }

    #[tracing::instrument(skip(self))]
    pub fn set_theme(&self, theme: Theme) -> anyhow::Result<()> {
        fs::write(&self.theme_path, theme.to_string())
            .with_context(|| format!("failed writing {}", self.theme_path.display()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn user(&self) -> anyhow::Result<Option<StoredUser>> {
        let raw = fs::read_to_string(&self.user_path)
            .with_context(|| format!("failed reading {}", self.user_path.display()))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let user: StoredUser = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {}", self.user_path.display()))?;
        Ok(Some(user))
    }

    #[tracing::instrument(skip(self, user), fields(name = %user.name))]
    pub fn set_user(&self, user: &StoredUser) -> anyhow::Result<()> {
        let payload = serde_json::to_string(user)?;
        write_atomic(&self.user_path, payload.as_bytes()).context("failed to save user.json")
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_user(&self) -> anyhow::Result<()> {
        fs::write(&self.user_path, "")
            .with_context(|| format!("failed writing {}", self.user_path.display()))?;
        Ok(())
    }
}

fn write_atomic(path: &Path, payload: &[u8]) -> anyhow::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(payload)?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;
    Ok(())
}
