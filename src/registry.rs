//! Modpack registry
//!
//! A fixed table of the modpacks this host can run, built once at startup by
//! scanning the modpacks directory. Each subdirectory is one modpack; its
//! `docker-compose.yaml` carries the human-readable name in a
//! `MODPACK: "..."` environment line.

use crate::{LoaderError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the compose descriptor expected inside each modpack directory
const COMPOSE_FILE_NAME: &str = "docker-compose.yaml";

/// One known modpack. Immutable after registry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modpack {
    /// Short alias accepted on the command line
    pub short_id: String,
    /// Canonical id, as it appears in container names
    pub canonical_id: String,
    /// Human-readable name for display
    pub display_name: String,
    /// Compose descriptor driving this modpack's deployment
    pub compose_file: PathBuf,
}

/// Index over [`Modpack`] descriptors for id lookups
#[derive(Debug, Default)]
pub struct ModpackRegistry {
    modpacks: Vec<Modpack>,
    /// Maps canonical ids to positions in `modpacks`
    canonical_ids: HashMap<String, usize>,
    /// Maps short ids to positions in `modpacks`
    short_ids: HashMap<String, usize>,
}

impl ModpackRegistry {
    /// Build a registry by scanning a modpacks directory tree.
    ///
    /// Each subdirectory name doubles as short and canonical id.
    /// Subdirectories without a compose file are skipped with a warning; a
    /// compose file without a `MODPACK:` line falls back to the directory
    /// name for display.
    pub fn scan(root: &Path) -> Result<Self> {
        let entries = fs::read_dir(root).map_err(|e| {
            LoaderError::Config(format!("cannot read modpacks dir {}: {}", root.display(), e))
        })?;

        let mut modpacks = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let compose_file = entry.path().join(COMPOSE_FILE_NAME);
            if !compose_file.exists() {
                tracing::warn!(
                    "Skipping modpack dir without compose file: {}",
                    entry.path().display()
                );
                continue;
            }

            let compose_text = fs::read_to_string(&compose_file)?;
            let display_name =
                display_name_in(&compose_text).unwrap_or_else(|| name.clone());

            modpacks.push(Modpack {
                short_id: name.clone(),
                canonical_id: name,
                display_name,
                compose_file,
            });
        }

        Self::from_modpacks(modpacks)
    }

    /// Build a registry from an explicit descriptor table.
    pub fn from_entries(entries: impl IntoIterator<Item = Modpack>) -> Result<Self> {
        Self::from_modpacks(entries.into_iter().collect())
    }

    fn from_modpacks(mut modpacks: Vec<Modpack>) -> Result<Self> {
        modpacks.sort_by(|a, b| a.short_id.cmp(&b.short_id));

        let mut canonical_ids = HashMap::new();
        let mut short_ids = HashMap::new();
        for (idx, modpack) in modpacks.iter().enumerate() {
            if canonical_ids
                .insert(modpack.canonical_id.clone(), idx)
                .is_some()
            {
                return Err(LoaderError::Config(format!(
                    "duplicate canonical id: {}",
                    modpack.canonical_id
                )));
            }
            if short_ids.insert(modpack.short_id.clone(), idx).is_some() {
                return Err(LoaderError::Config(format!(
                    "duplicate short id: {}",
                    modpack.short_id
                )));
            }
        }

        Ok(Self {
            modpacks,
            canonical_ids,
            short_ids,
        })
    }

    /// Resolve a user-supplied id, canonical ids taking precedence over
    /// short aliases. Absence is not exceptional; callers branch on `None`.
    pub fn resolve(&self, input: &str) -> Option<&Modpack> {
        self.canonical_ids
            .get(input)
            .or_else(|| self.short_ids.get(input))
            .map(|&idx| &self.modpacks[idx])
    }

    /// Display name for a canonical id.
    pub fn describe(&self, canonical_id: &str) -> Option<&str> {
        self.canonical_ids
            .get(canonical_id)
            .map(|&idx| self.modpacks[idx].display_name.as_str())
    }

    /// Compose descriptor path for a canonical id.
    pub fn compose_file(&self, canonical_id: &str) -> Option<&Path> {
        self.canonical_ids
            .get(canonical_id)
            .map(|&idx| self.modpacks[idx].compose_file.as_path())
    }

    /// All known modpacks, sorted by short id.
    pub fn iter(&self) -> impl Iterator<Item = &Modpack> {
        self.modpacks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.modpacks.is_empty()
    }
}

/// Extract the display name from compose file text: the first line containing
/// `MODPACK: "` yields whatever sits between that marker and the line's
/// trailing quote.
fn display_name_in(compose_text: &str) -> Option<String> {
    for line in compose_text.lines() {
        if let Some((_, rest)) = line.split_once("MODPACK: \"") {
            return Some(rest.trim_end().trim_end_matches('"').to_string());
        }
    }
    None
}
