use std::time::Duration;

use tinta_engine::FillParams;

/// Title used when the host supplies none.
pub const DEFAULT_TITLE: &str = "Sayıya Göre Boya";

/// Coloring surface settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Raster flood-fill tuning.
    pub fill: FillParams,
    /// Celebrate once progress is strictly above this ratio.
    pub completion_threshold: f32,
    /// How long the celebration stays up.
    pub celebration: Duration,
    /// Suffix of exported file names (`<title>-<label>.png`).
    pub export_label: String,
    pub title: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            fill: FillParams::default(),
            completion_threshold: 0.8,
            celebration: Duration::from_secs(5),
            export_label: "boyama".to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl SurfaceConfig {
    pub fn with_fill(mut self, fill: FillParams) -> Self { self.fill = fill; self }
    pub fn with_completion_threshold(mut self, v: f32) -> Self { self.completion_threshold = v.clamp(0.0, 1.0); self }
    pub fn with_celebration(mut self, v: Duration) -> Self { self.celebration = v; self }
    pub fn with_export_label(mut self, v: impl Into<String>) -> Self { self.export_label = v.into(); self }
    pub fn with_title(mut self, v: impl Into<String>) -> Self { self.title = v.into(); self }
}
