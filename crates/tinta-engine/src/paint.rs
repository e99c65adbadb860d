//! Vector paint engine: selection, paint-by-match, highlights and the
//! per-region presentation derived from them.
//!
//! Persistent state is limited to the [`Selection`] and the [`PaintedMap`];
//! highlights and render states are recomputed from scratch on demand.
//! Reset is `PaintedMap::clear`: palette, selection and region metadata are
//! untouched.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::region::{Palette, Region};

/// Region id → color it was painted with.
pub type PaintedMap = BTreeMap<String, String>;

// ── Selection ─────────────────────────────────────────────────────────────

/// At most one selected palette entry.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    pub const NONE: Self = Self { index: None };

    pub fn index(self) -> Option<usize> {
        self.index
    }

    pub fn is_none(self) -> bool {
        self.index.is_none()
    }

    /// Select `index`, or clear the selection if it is already selected.
    pub fn toggle(&mut self, index: usize) {
        self.index = if self.index == Some(index) { None } else { Some(index) };
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    /// The selected palette color.
    pub fn color(self, palette: &Palette) -> Option<&str> {
        palette.get(self.index?)
    }
}

// ── Paint ─────────────────────────────────────────────────────────────────

/// Paint `region_id` if its original color is the selected palette color.
///
/// Returns `false`, leaving `painted` unchanged, when nothing is selected, the
/// region is unknown or colorless, or the colors differ. Painting an already
/// painted region succeeds again without changing the map.
pub fn paint(
    region_id: &str,
    selection: Selection,
    regions: &[Region],
    palette: &Palette,
    painted: &mut PaintedMap,
) -> bool {
    let Some(selected) = selection.color(palette) else {
        log::debug!("paint {region_id}: no color selected");
        return false;
    };
    let Some(region) = regions.iter().find(|r| r.id == region_id) else {
        log::debug!("paint {region_id}: unknown region");
        return false;
    };
    match region.original_color.as_deref() {
        Some(color) if color == selected => {
            painted.insert(region.id.clone(), color.to_string());
            true
        }
        other => {
            log::debug!("paint {region_id}: region color {other:?} does not match {selected}");
            false
        }
    }
}

// ── Highlights ────────────────────────────────────────────────────────────

/// A region matching the selected color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub region_id: String,
    pub painted: bool,
    /// Text drawn over the region: `✓` once painted, otherwise the 1-based
    /// color number.
    pub label: String,
}

/// Regions whose original color equals the selected palette color, in
/// region order. Empty when nothing is selected.
pub fn compute_highlights(
    selection: Selection,
    regions: &[Region],
    palette: &Palette,
    painted: &PaintedMap,
) -> Vec<Highlight> {
    let (Some(index), Some(selected)) = (selection.index(), selection.color(palette)) else {
        return Vec::new();
    };
    regions
        .iter()
        .filter(|r| r.original_color.as_deref() == Some(selected))
        .map(|r| {
            let is_painted = painted.contains_key(&r.id);
            Highlight {
                region_id: r.id.clone(),
                painted: is_painted,
                label: if is_painted { "✓".to_string() } else { (index + 1).to_string() },
            }
        })
        .collect()
}

// ── Render states ─────────────────────────────────────────────────────────

/// How a region is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RenderState {
    /// Unpainted, not highlighted: black outline, no fill.
    Outline,
    /// Unpainted region of the selected color.
    Highlighted,
    /// Painted with its color.
    Painted { color: String },
    /// Painted region of the selected color; keeps its fill, gains the
    /// highlight stroke.
    PaintedHighlighted { color: String },
}

impl RenderState {
    pub fn is_painted(&self) -> bool {
        matches!(self, Self::Painted { .. } | Self::PaintedHighlighted { .. })
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted | Self::PaintedHighlighted { .. })
    }
}

/// Presentation of every region, in region order.
pub fn render_states(
    selection: Selection,
    regions: &[Region],
    palette: &Palette,
    painted: &PaintedMap,
) -> Vec<(String, RenderState)> {
    let selected = selection.color(palette);
    regions
        .iter()
        .map(|r| {
            let highlighted = selected.is_some() && r.original_color.as_deref() == selected;
            let state = match (painted.get(&r.id), highlighted) {
                (Some(c), true) => RenderState::PaintedHighlighted { color: c.clone() },
                (Some(c), false) => RenderState::Painted { color: c.clone() },
                (None, true) => RenderState::Highlighted,
                (None, false) => RenderState::Outline,
            };
            (r.id.clone(), state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str, color: Option<&str>) -> Region {
        Region { id: id.into(), original_color: color.map(Into::into), original_class: None }
    }

    /// Three regions, red/green/red, palette [red, green].
    fn fixture() -> (Vec<Region>, Palette) {
        let regions = vec![
            region("area1", Some("#FF0000")),
            region("area2", Some("#00FF00")),
            region("area3", Some("#FF0000")),
        ];
        (regions, ["#FF0000", "#00FF00"].into_iter().collect())
    }

    fn selected(i: usize) -> Selection {
        let mut s = Selection::NONE;
        s.toggle(i);
        s
    }

    // ── selection ─────────────────────────────────────────────────────────

    #[test]
    fn toggle_twice_deselects() {
        let mut s = Selection::default();
        s.toggle(1);
        assert_eq!(s.index(), Some(1));
        s.toggle(1);
        assert!(s.is_none());
    }

    #[test]
    fn toggle_other_switches() {
        let mut s = selected(0);
        s.toggle(1);
        assert_eq!(s.index(), Some(1));
    }

    // ── paint ─────────────────────────────────────────────────────────────

    #[test]
    fn paint_requires_matching_color() {
        let (regions, palette) = fixture();
        let mut painted = PaintedMap::new();
        assert!(!paint("area2", selected(0), &regions, &palette, &mut painted));
        assert!(painted.is_empty());
        assert!(paint("area1", selected(0), &regions, &palette, &mut painted));
        assert_eq!(painted.get("area1").map(String::as_str), Some("#FF0000"));
    }

    #[test]
    fn paint_without_selection_or_unknown_region_is_noop() {
        let (regions, palette) = fixture();
        let mut painted = PaintedMap::new();
        assert!(!paint("area1", Selection::NONE, &regions, &palette, &mut painted));
        assert!(!paint("nope", selected(0), &regions, &palette, &mut painted));
        assert!(!paint("area1", selected(7), &regions, &palette, &mut painted));
        assert!(painted.is_empty());
    }

    #[test]
    fn colorless_region_is_never_painted() {
        let regions = vec![region("a", None)];
        let palette: Palette = ["none"].into_iter().collect();
        let mut painted = PaintedMap::new();
        assert!(!paint("a", selected(0), &regions, &palette, &mut painted));
    }

    // ── highlights ────────────────────────────────────────────────────────

    #[test]
    fn highlights_follow_selection() {
        let (regions, palette) = fixture();
        let mut painted = PaintedMap::new();
        assert!(compute_highlights(Selection::NONE, &regions, &palette, &painted).is_empty());

        paint("area1", selected(0), &regions, &palette, &mut painted);
        let hl = compute_highlights(selected(0), &regions, &palette, &painted);
        let summary: Vec<_> = hl.iter().map(|h| (h.region_id.as_str(), h.painted, h.label.as_str())).collect();
        assert_eq!(summary, [("area1", true, "✓"), ("area3", false, "1")]);
    }

    #[test]
    fn render_states_cover_all_cases() {
        let (regions, palette) = fixture();
        let mut painted = PaintedMap::new();
        paint("area1", selected(0), &regions, &palette, &mut painted);
        paint("area2", selected(1), &regions, &palette, &mut painted);

        let states: BTreeMap<_, _> = render_states(selected(0), &regions, &palette, &painted).into_iter().collect();
        assert_eq!(states["area1"], RenderState::PaintedHighlighted { color: "#FF0000".into() });
        assert_eq!(states["area2"], RenderState::Painted { color: "#00FF00".into() });
        assert_eq!(states["area3"], RenderState::Highlighted);

        let states = render_states(Selection::NONE, &regions, &palette, &painted);
        assert_eq!(states[2].1, RenderState::Outline);
        assert!(states[0].1.is_painted() && !states[0].1.is_highlighted());
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn clearing_painted_map_restores_outlines() {
        let (regions, palette) = fixture();
        let mut painted = PaintedMap::new();
        paint("area3", selected(0), &regions, &palette, &mut painted);
        painted.clear();
        let once = render_states(Selection::NONE, &regions, &palette, &painted);
        painted.clear();
        assert_eq!(render_states(Selection::NONE, &regions, &palette, &painted), once);
        assert!(once.iter().all(|(_, s)| *s == RenderState::Outline));
    }
}
