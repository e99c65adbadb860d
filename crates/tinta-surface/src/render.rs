//! Presentation attributes for each region state.

use std::collections::HashMap;

use tinta_engine::RenderState;
use tinta_markup::{Document, NodeId, Rewrites};

/// Fill of an unpainted highlighted region.
pub const HIGHLIGHT_FILL: &str = "rgba(255, 255, 0, 0.3)";
pub const HIGHLIGHT_STROKE: &str = "#FF9500";
pub const PAINTED_STROKE: &str = "#333";
pub const OUTLINE_STROKE: &str = "#000";

/// Attributes written onto a region's element for `state`.
pub fn style_for(state: &RenderState) -> Vec<(&'static str, String)> {
    let highlight_stroke = [
        ("stroke", HIGHLIGHT_STROKE.to_string()),
        ("stroke-width", "3".to_string()),
        ("stroke-dasharray", "3,3".to_string()),
    ];
    let plain_stroke = |stroke: &str| {
        [
            ("stroke", stroke.to_string()),
            ("stroke-width", "1".to_string()),
            ("stroke-dasharray", "none".to_string()),
        ]
    };

    let mut attrs = Vec::with_capacity(5);
    match state {
        RenderState::Outline => {
            attrs.push(("fill", "none".to_string()));
            attrs.extend(plain_stroke(OUTLINE_STROKE));
        }
        RenderState::Highlighted => {
            attrs.push(("fill", HIGHLIGHT_FILL.to_string()));
            attrs.extend(highlight_stroke);
        }
        RenderState::Painted { color } => {
            attrs.push(("fill", color.clone()));
            attrs.push(("fill-opacity", "1".to_string()));
            attrs.extend(plain_stroke(PAINTED_STROKE));
        }
        RenderState::PaintedHighlighted { color } => {
            attrs.push(("fill", color.clone()));
            attrs.push(("fill-opacity", "1".to_string()));
            attrs.extend(highlight_stroke);
        }
    }
    attrs
}

/// Element id → node, for every element carrying an id.
pub fn index_ids(doc: &Document) -> HashMap<String, NodeId> {
    let mut ids = HashMap::new();
    for n in doc.descendants(doc.root_element()) {
        if let Some(id) = doc.element(n).and_then(|e| e.attr("id")) {
            ids.entry(id.to_string()).or_insert(n);
        }
    }
    ids
}

/// Serialize `doc` with each region's element restyled for its state.
pub fn render_markup(
    doc: &Document,
    ids: &HashMap<String, NodeId>,
    states: &[(String, RenderState)],
) -> String {
    let mut rewrites = Rewrites::with_capacity(states.len());
    for (id, state) in states {
        let Some(&node) = ids.get(id) else { continue };
        let Some(el) = doc.element(node) else { continue };
        let mut el = el.clone();
        for (name, value) in style_for(state) {
            el.set_attr(name, value);
        }
        rewrites.insert(node, el.attrs);
    }
    doc.to_markup_with(&rewrites)
}
