use tinta_engine::{Palette, Selection};

/// The swatch row: a palette plus single-select toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteBar {
    palette: Palette,
    selection: Selection,
}

impl PaletteBar {
    pub fn new(palette: Palette) -> Self {
        Self { palette, selection: Selection::NONE }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the palette. The selection is cleared.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.selection.clear();
    }

    /// Toggle swatch `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.palette.len() {
            log::debug!("swatch {index} does not exist ({} colors)", self.palette.len());
            return false;
        }
        self.selection.toggle(index);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selection.color(&self.palette)
    }

    pub fn status_text(&self) -> String {
        match self.selection.index() {
            None => "Lütfen aşağıdan bir renk seçin".to_string(),
            Some(i) => format!("Şimdi {} numaralı alanları boyayabilirsiniz", i + 1),
        }
    }
}
