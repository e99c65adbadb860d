use std::time::Instant;

use tinta_engine::coords::{PixelPos, Rect, Vec2};
use tinta_engine::{count_fillable, flood_fill, Palette, PixelBuffer};

use super::{ColoringSurface, SurfaceCore};
use crate::completion::ratio;
use crate::config::SurfaceConfig;
use crate::error::{ExportError, SourceLoadError, SurfaceError};
use crate::event::{EventResult, SurfaceEvent};
use crate::export::{encode_png, ExportedImage};
use crate::lifecycle::LoadTicket;
use crate::source::{ImageSource, SourceFetcher};

/// Flood-fill coloring of raster line art.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    core: SurfaceCore,
    /// Pixels as loaded; reset restores them.
    original: Option<PixelBuffer>,
    buffer: Option<PixelBuffer>,
    colorable: usize,
    colored: usize,
}

impl RasterSurface {
    /// `palette` defaults to the built-in one.
    pub fn new(config: SurfaceConfig, palette: Option<Palette>) -> Self {
        let palette = palette.filter(|p| !p.is_empty()).unwrap_or_else(Palette::builtin);
        Self {
            core: SurfaceCore::new(config, palette),
            original: None,
            buffer: None,
            colorable: 0,
            colored: 0,
        }
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn colorable_pixels(&self) -> usize {
        self.colorable
    }

    pub fn colored_pixels(&self) -> usize {
        self.colored
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.original = None;
        self.buffer = None;
        self.colorable = 0;
        self.colored = 0;
        self.core.begin_load()
    }

    /// Complete the load identified by `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        pixels: Result<PixelBuffer, SourceLoadError>,
    ) -> Result<(), SurfaceError> {
        if !self.core.lifecycle.accept(ticket) {
            return Err(SurfaceError::Superseded);
        }
        match pixels {
            Ok(buffer) => {
                self.colorable = count_fillable(&buffer, &self.core.config.fill);
                log::info!(
                    "raster loaded: {}x{}, {} colorable pixels",
                    buffer.width(),
                    buffer.height(),
                    self.colorable
                );
                self.original = Some(buffer.clone());
                self.buffer = Some(buffer);
                self.core.lifecycle.ready();
                Ok(())
            }
            Err(e) => {
                self.core.lifecycle.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Fetch, decode and load `source` in one go.
    pub fn load(&mut self, source: &ImageSource, fetcher: &dyn SourceFetcher) -> Result<(), SurfaceError> {
        let ticket = self.begin_load();
        log::debug!("loading raster {}", source.describe());
        let pixels = source.load_raster(fetcher);
        self.finish_load(ticket, pixels)
    }

    /// Fill at a buffer position with the selected color. Returns the number
    /// of pixels written; every failure is a logged no-op.
    pub fn fill_at(&mut self, pos: PixelPos, now: Instant) -> usize {
        if !self.core.lifecycle.is_loaded() {
            return 0;
        }
        let Some(color) = self.core.palette.selected_color().map(str::to_string) else {
            log::debug!("click ignored: no color selected");
            return 0;
        };
        let Some(buffer) = self.buffer.as_mut() else { return 0 };

        match flood_fill(buffer, pos, &color, &self.core.config.fill) {
            Ok(0) => 0,
            Ok(n) => {
                self.colored += n;
                self.core.record_fill(self.colored, self.colorable, now);
                n
            }
            Err(e) => {
                log::debug!("fill at ({}, {}) ignored: {e}", pos.x, pos.y);
                0
            }
        }
    }

    /// Fill at a client-space point on a surface displayed in `display`.
    pub fn click(&mut self, pos: Vec2, display: Rect, now: Instant) -> usize {
        let Some(buffer) = self.buffer.as_ref() else { return 0 };
        match display.client_to_buffer(pos, buffer.width(), buffer.height()) {
            Some(px) => self.fill_at(px, now),
            None => 0,
        }
    }
}

impl ColoringSurface for RasterSurface {
    fn core(&self) -> &SurfaceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SurfaceCore {
        &mut self.core
    }

    fn on_event(&mut self, event: &SurfaceEvent, now: Instant) -> EventResult {
        match event {
            SurfaceEvent::SelectColor { index } => EventResult::from_bool(self.select_color(*index)),
            SurfaceEvent::Click { pos, display } => EventResult::from_bool(self.click(*pos, *display, now) > 0),
            SurfaceEvent::Reset => {
                self.reset();
                EventResult::Consumed
            }
            SurfaceEvent::ClickNode { .. } => EventResult::Ignored,
        }
    }

    fn reset(&mut self) {
        if self.core.lifecycle.is_loaded() {
            self.buffer = self.original.clone();
            self.colored = 0;
        }
        self.core.reset();
    }

    fn progress(&self) -> f32 {
        ratio(self.colored, self.colorable)
    }

    fn render_png(&self) -> Result<ExportedImage, ExportError> {
        match &self.buffer {
            Some(buffer) => encode_png(buffer),
            None => Err(ExportError::NoChanges),
        }
    }
}
