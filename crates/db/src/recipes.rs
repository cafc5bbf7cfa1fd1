//! Static recipe documents on disk.
//!
//! Each recipe lives in its own JSON file under the recipes directory. Loading is
//! settled-all: one unreadable or malformed file never hides the others.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use whatcanicook_core::config::RecipesConfig;
use whatcanicook_core::domain::recipe::Recipe;
use whatcanicook_core::export::{export_document, export_filename};

#[derive(Debug, Error)]
pub enum RecipeSourceError {
    #[error("could not list recipe directory `{path}`: {source}")]
    ListDirectory { path: PathBuf, source: io::Error },
    #[error("could not encode recipe `{name}`: {source}")]
    Encode { name: String, source: serde_json::Error },
    #[error("could not write recipe file `{path}`: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecipe {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct RecipeCatalog {
    /// Successfully parsed recipes, in source order.
    pub recipes: Vec<Recipe>,
    pub skipped: Vec<SkippedRecipe>,
}

#[derive(Clone, Debug)]
pub struct RecipeLoader {
    directory: PathBuf,
    files: Vec<String>,
}

impl RecipeLoader {
    pub fn new(directory: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self { directory: directory.into(), files }
    }

    pub fn from_config(config: &RecipesConfig) -> Self {
        Self::new(config.directory.clone(), config.files.clone())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Files to read: the configured list when present, otherwise every `*.json`
    /// in the directory sorted by file name. A missing directory has no sources.
    pub async fn sources(&self) -> Result<Vec<PathBuf>, RecipeSourceError> {
        if !self.files.is_empty() {
            return Ok(self.files.iter().map(|file| self.directory.join(file)).collect());
        }

        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                warn!(
                    event_name = "recipes.directory.missing",
                    directory = %self.directory.display(),
                    "recipe directory does not exist; no recipes loaded"
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(RecipeSourceError::ListDirectory {
                    path: self.directory.clone(),
                    source,
                })
            }
        };

        let mut paths = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(RecipeSourceError::ListDirectory {
                        path: self.directory.clone(),
                        source,
                    })
                }
            };
            let path = entry.path();
            if path.extension().is_some_and(|extension| extension == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    pub async fn load_all(&self) -> Result<RecipeCatalog, RecipeSourceError> {
        let mut catalog = RecipeCatalog::default();

        for path in self.sources().await? {
            match read_recipe(&path).await {
                Ok(recipe) => catalog.recipes.push(recipe),
                Err(reason) => {
                    warn!(
                        event_name = "recipes.file.skipped",
                        path = %path.display(),
                        reason = %reason,
                        "recipe file skipped"
                    );
                    catalog.skipped.push(SkippedRecipe { path, reason });
                }
            }
        }

        debug!(
            event_name = "recipes.catalog.loaded",
            loaded = catalog.recipes.len(),
            skipped = catalog.skipped.len(),
            "recipe catalog loaded"
        );
        Ok(catalog)
    }

    /// Writes `recipe` into the recipes directory under its export file name.
    pub async fn save(&self, recipe: &Recipe) -> Result<PathBuf, RecipeSourceError> {
        let path = self.directory.join(export_filename(&recipe.name));
        write_recipe_file(&path, recipe).await?;
        Ok(path)
    }
}

/// Writes the pretty export document for `recipe` to `path`, creating parent directories.
pub async fn write_recipe_file(path: &Path, recipe: &Recipe) -> Result<(), RecipeSourceError> {
    let document = export_document(recipe)
        .map_err(|source| RecipeSourceError::Encode { name: recipe.name.clone(), source })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| RecipeSourceError::WriteFile { path: path.to_path_buf(), source })?;
    }

    tokio::fs::write(path, document)
        .await
        .map_err(|source| RecipeSourceError::WriteFile { path: path.to_path_buf(), source })
}

async fn read_recipe(path: &Path) -> Result<Recipe, String> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|error| error.to_string())?;
    serde_json::from_str::<Recipe>(&raw).map_err(|error| error.to_string())
}
