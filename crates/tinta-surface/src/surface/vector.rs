use std::collections::HashMap;
use std::time::Instant;

use tinta_engine::{
    compute_highlights, paint, prepare, render_states, Highlight, PaintedMap, Palette,
    PrepareOptions, PreparedImage, RenderState,
};
use tinta_markup::NodeId;

use super::{ColoringSurface, SurfaceCore};
use crate::completion::ratio;
use crate::config::SurfaceConfig;
use crate::error::{ExportError, SourceLoadError, SurfaceError};
use crate::event::{EventResult, SurfaceEvent};
use crate::export::{rasterize_markup, ExportedImage};
use crate::lifecycle::LoadTicket;
use crate::render::{index_ids, render_markup};
use crate::source::{ImageSource, SourceFetcher};

/// Paint-by-region coloring of a prepared vector image.
#[derive(Debug, Clone)]
pub struct VectorSurface {
    core: SurfaceCore,
    options: PrepareOptions,
    image: Option<PreparedImage>,
    /// Element id → node in the prepared document.
    ids: HashMap<String, NodeId>,
    painted: PaintedMap,
}

impl VectorSurface {
    /// `palette`, when given and non-empty, overrides the colors discovered
    /// in each loaded image.
    pub fn new(config: SurfaceConfig, palette: Option<Palette>) -> Self {
        Self::with_options(config, PrepareOptions {
            palette_override: palette.filter(|p| !p.is_empty()),
            ..PrepareOptions::default()
        })
    }

    pub fn with_options(config: SurfaceConfig, options: PrepareOptions) -> Self {
        let initial = options.palette_override.clone().unwrap_or_else(Palette::builtin);
        Self {
            core: SurfaceCore::new(config, initial),
            options,
            image: None,
            ids: HashMap::new(),
            painted: PaintedMap::new(),
        }
    }

    pub fn image(&self) -> Option<&PreparedImage> {
        self.image.as_ref()
    }

    pub fn painted(&self) -> &PaintedMap {
        &self.painted
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.image = None;
        self.ids.clear();
        self.painted.clear();
        self.core.begin_load()
    }

    /// Complete the load identified by `ticket` by preparing `markup`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        markup: Result<String, SourceLoadError>,
    ) -> Result<(), SurfaceError> {
        if !self.core.lifecycle.accept(ticket) {
            return Err(SurfaceError::Superseded);
        }
        let prepared = markup
            .map_err(SurfaceError::from)
            .and_then(|m| prepare(&m, &self.options).map_err(SurfaceError::from));
        match prepared {
            Ok(image) => {
                self.ids = index_ids(&image.document);
                self.core.palette.set_palette(image.palette.clone());
                log::info!(
                    "vector loaded: {} regions, {} palette colors",
                    image.region_count(),
                    image.palette.len()
                );
                self.image = Some(image);
                self.core.lifecycle.ready();
                Ok(())
            }
            Err(e) => {
                self.core.lifecycle.fail(e.to_string());
                Err(e)
            }
        }
    }

    pub fn load(&mut self, source: &ImageSource, fetcher: &dyn SourceFetcher) -> Result<(), SurfaceError> {
        let ticket = self.begin_load();
        log::debug!("loading vector {}", source.describe());
        let markup = source.load_markup(fetcher);
        self.finish_load(ticket, markup)
    }

    /// Regions that count towards progress.
    pub fn colorable_regions(&self) -> usize {
        self.image
            .as_ref()
            .map_or(0, |img| img.regions.iter().filter(|r| r.original_color.is_some()).count())
    }

    /// Paint the region with id `region_id`.
    pub fn click_region(&mut self, region_id: &str, now: Instant) -> bool {
        if !self.core.lifecycle.is_loaded() {
            return false;
        }
        let Some(image) = &self.image else { return false };
        let selection = self.core.palette.selection();
        let painted = paint(region_id, selection, &image.regions, self.core.palette.palette(), &mut self.painted);
        if painted {
            let (done, total) = (self.painted.len(), self.colorable_regions());
            self.core.record_fill(done, total, now);
        }
        painted
    }

    /// Paint the region owning `target`: the nearest ancestor-or-self with an
    /// id naming a region.
    pub fn click_node(&mut self, target: NodeId, now: Instant) -> bool {
        match self.region_at(target) {
            Some(id) => self.click_region(&id, now),
            None => false,
        }
    }

    fn region_at(&self, target: NodeId) -> Option<String> {
        let image = self.image.as_ref()?;
        let doc = &image.document;
        std::iter::once(target)
            .chain(doc.ancestors(target))
            .filter_map(|n| doc.element(n)?.attr("id"))
            .find(|id| image.region(id).is_some())
            .map(str::to_string)
    }

    pub fn highlights(&self) -> Vec<Highlight> {
        match &self.image {
            Some(img) => compute_highlights(self.core.palette.selection(), &img.regions, self.core.palette.palette(), &self.painted),
            None => Vec::new(),
        }
    }

    pub fn render_states(&self) -> Vec<(String, RenderState)> {
        match &self.image {
            Some(img) => render_states(self.core.palette.selection(), &img.regions, self.core.palette.palette(), &self.painted),
            None => Vec::new(),
        }
    }

    /// Current markup with every region styled for its state.
    pub fn render_markup(&self) -> Option<String> {
        let image = self.image.as_ref()?;
        Some(render_markup(&image.document, &self.ids, &self.render_states()))
    }
}

impl ColoringSurface for VectorSurface {
    fn core(&self) -> &SurfaceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SurfaceCore {
        &mut self.core
    }

    fn on_event(&mut self, event: &SurfaceEvent, now: Instant) -> EventResult {
        match event {
            SurfaceEvent::SelectColor { index } => EventResult::from_bool(self.select_color(*index)),
            SurfaceEvent::ClickNode { target } => EventResult::from_bool(self.click_node(*target, now)),
            SurfaceEvent::Reset => {
                self.reset();
                EventResult::Consumed
            }
            SurfaceEvent::Click { .. } => EventResult::Ignored,
        }
    }

    fn reset(&mut self) {
        if self.core.lifecycle.is_loaded() {
            self.painted.clear();
        }
        self.core.reset();
    }

    fn progress(&self) -> f32 {
        ratio(self.painted.len(), self.colorable_regions())
    }

    fn render_png(&self) -> Result<ExportedImage, ExportError> {
        match self.render_markup() {
            Some(markup) => rasterize_markup(&markup),
            None => Err(ExportError::NoChanges),
        }
    }
}
