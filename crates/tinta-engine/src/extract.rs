//! Original-color recovery for a single shape.

use tinta_markup::{Document, NodeId};

use crate::color::{normalize_color, parse_css_color};
use crate::css;

/// Result of [`extract_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Normalized color, or `None` when no source supplied one.
    pub color: Option<String>,
    /// The shape's full `class` value, set only when the color came from a
    /// stylesheet class rule.
    pub original_class: Option<String>,
}

/// Where the color was found. Reported at `trace` level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Source {
    Attribute,
    InlineStyle,
    ClassRule,
    Ancestor,
}

fn usable(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != "none"
}

/// Recover the fill a shape was drawn with.
///
/// Tried in order, first hit wins: the `fill` attribute, a `fill:`
/// declaration in the inline `style`, a `.cls-N` rule in the document's first
/// `<style>` element, and finally the nearest ancestor below the `<svg>`
/// element carrying a `fill` attribute. The literal `none` never counts as a
/// hit. The document is not modified.
pub fn extract_color(doc: &Document, shape: NodeId) -> Extraction {
    let Some(el) = doc.element(shape) else {
        return Extraction::default();
    };

    let mut original_class = None;
    let mut found: Option<(String, Source)> = el
        .attr("fill")
        .filter(|v| usable(v))
        .map(|v| (v.to_string(), Source::Attribute));

    if found.is_none() {
        found = el
            .attr("style")
            .and_then(|s| css::declaration_value(s, "fill"))
            .filter(|v| usable(v))
            .map(|v| (v.to_string(), Source::InlineStyle));
    }

    if found.is_none() {
        if let Some(class_list) = el.attr("class") {
            if let Some(value) = class_fill(doc, class_list) {
                original_class = Some(class_list.to_string());
                found = Some((value, Source::ClassRule));
            }
        }
    }

    if found.is_none() {
        found = doc
            .ancestors(shape)
            .map_while(|a| doc.element(a).filter(|e| e.local_name() != "svg"))
            .find_map(|e| e.attr("fill").filter(|v| usable(v)))
            .map(|v| (v.to_string(), Source::Ancestor));
    }

    let color = found.map(|(raw, source)| {
        log::trace!("shape {} fill {raw:?} from {source:?}", shape.index());
        normalize_color(&raw)
    });

    Extraction { color, original_class }
}

/// Fill of the shape's numbered class in the first stylesheet.
///
/// The stylesheet printer shortens colors (`#ffffff` to `#fff`), so opaque
/// values are widened back to `#rrggbb` here.
fn class_fill(doc: &Document, class_list: &str) -> Option<String> {
    let class_name = css::numbered_class(class_list)?;
    let style = doc.elements_named("style").next()?;
    let sheet = doc.text_content(style);
    let value = css::class_rule_value(&sheet, class_name, "fill").filter(|v| usable(v))?;
    match parse_css_color(&value) {
        Ok(c) if c.is_opaque() => Some(c.rgb.to_hex()),
        _ => Some(value),
    }
}
