//! # Chart Output
//!
//! The default [`VisualizationSink`]: writes the chart series as pretty JSON
//! so any plotting tool can draw them. The artifact id is the file path.

use shelfsort_core::{ArtifactId, ChartData, ShelfError, VisualizationSink};
use std::path::PathBuf;

/// Writes [`ChartData`] to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonChartSink {
    path: PathBuf,
}

impl JsonChartSink {
    /// Create a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VisualizationSink for JsonChartSink {
    fn render(&mut self, chart: &ChartData) -> Result<ArtifactId, ShelfError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ShelfError::Render(format!("Create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(chart)
            .map_err(|e| ShelfError::SerializationError(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ShelfError::Render(format!("Write {}: {}", self.path.display(), e)))?;

        tracing::info!("chart data written to {}", self.path.display());
        Ok(ArtifactId(self.path.display().to_string()))
    }
}
