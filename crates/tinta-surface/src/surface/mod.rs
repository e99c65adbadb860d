//! The two coloring surfaces and the state they share.

mod raster;
mod vector;

use std::time::Instant;

use tinta_engine::Palette;
use tinta_engine::time::CountdownEvent;

use crate::completion::CompletionTracker;
use crate::config::SurfaceConfig;
use crate::error::ExportError;
use crate::event::{EventResult, SurfaceEvent};
use crate::export::{export_file_name, ExportedImage};
use crate::lifecycle::{Lifecycle, LoadTicket, Phase};
use crate::palette::PaletteBar;
use crate::share::ShareRequest;

pub use raster::RasterSurface;
pub use vector::VectorSurface;

// ── SurfaceCore ───────────────────────────────────────────────────────────

/// State common to both surfaces.
#[derive(Debug, Clone)]
pub struct SurfaceCore {
    pub config: SurfaceConfig,
    pub palette: PaletteBar,
    pub lifecycle: Lifecycle,
    pub completion: CompletionTracker,
    /// A fill or paint succeeded since load or reset.
    pub has_changes: bool,
}

impl SurfaceCore {
    pub fn new(config: SurfaceConfig, palette: Palette) -> Self {
        let completion = CompletionTracker::new(config.completion_threshold, config.celebration);
        Self {
            config,
            palette: PaletteBar::new(palette),
            lifecycle: Lifecycle::default(),
            completion,
            has_changes: false,
        }
    }

    /// Enter `Loading`, dropping everything tied to the previous image.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.palette.clear_selection();
        self.completion.reset();
        self.has_changes = false;
        self.lifecycle.begin_load()
    }

    /// Record a successful fill and check for completion.
    pub fn record_fill(&mut self, done: usize, total: usize, now: Instant) {
        self.has_changes = true;
        self.lifecycle.mark_filled();
        self.completion.update(done, total, now);
    }

    /// Shared part of reset. In the error phase only the selection is
    /// cleared.
    pub fn reset(&mut self) {
        if !self.lifecycle.is_loaded() {
            self.palette.clear_selection();
            return;
        }
        self.has_changes = false;
        self.completion.reset();
        self.lifecycle.reset();
    }
}

// ── ColoringSurface ───────────────────────────────────────────────────────

/// Behavior shared by raster and vector surfaces.
pub trait ColoringSurface {
    fn core(&self) -> &SurfaceCore;
    fn core_mut(&mut self) -> &mut SurfaceCore;

    /// Route one input event.
    fn on_event(&mut self, event: &SurfaceEvent, now: Instant) -> EventResult;

    /// Clear all fills. Palette and selection are kept.
    fn reset(&mut self);

    /// Colored share of the colorable content, in `[0, 1]`.
    fn progress(&self) -> f32;

    /// Render the current state as a PNG.
    fn render_png(&self) -> Result<ExportedImage, ExportError>;

    // ── provided ──────────────────────────────────────────────────────────

    fn phase(&self) -> &Phase {
        self.core().lifecycle.phase()
    }

    fn palette(&self) -> &PaletteBar {
        &self.core().palette
    }

    fn select_color(&mut self, index: usize) -> bool {
        self.core_mut().palette.select(index)
    }

    fn status_text(&self) -> String {
        self.core().palette.status_text()
    }

    fn has_changes(&self) -> bool {
        self.core().has_changes
    }

    fn title(&self) -> &str {
        &self.core().config.title
    }

    fn tick(&mut self, now: Instant) -> CountdownEvent {
        self.core_mut().completion.tick(now)
    }

    fn is_celebrating(&self) -> bool {
        self.core().completion.is_celebrating()
    }

    /// PNG of the colored picture. Only available once something changed.
    fn export(&self) -> Result<ExportedImage, ExportError> {
        if !self.has_changes() {
            return Err(ExportError::NoChanges);
        }
        let image = self.render_png().inspect_err(|e| log::warn!("export failed: {e}"))?;
        log::info!("exported {}x{} image", image.width, image.height);
        Ok(image)
    }

    fn export_file_name(&self) -> String {
        let config = &self.core().config;
        export_file_name(&config.title, &config.export_label)
    }

    fn share(&self) -> Result<ShareRequest, ExportError> {
        Ok(self.export()?.share_request(self.title()))
    }
}
