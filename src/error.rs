//! Typed errors for the catalog and export handling

use std::path::PathBuf;

use thiserror::Error;

use crate::models::RecipeId;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("blueprint {0} not found in database")]
    UnknownRecipe(RecipeId),

    #[error("malformed export file {}: {source}", .path.display())]
    MalformedExport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no export files found under {}", .0.display())]
    NoExportFiles(PathBuf),
}
