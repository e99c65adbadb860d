//! One-time transform of a colored vector image into an outline-only
//! coloring page.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tinta_markup::{parse_str, Document, ParseError, Rewrites};

use crate::extract::extract_color;
use crate::region::{Palette, Region};

/// Attribute holding a region's original color after preparation.
pub const DATA_COLOR: &str = "data-color";
/// Attribute holding a shape's former `class` after preparation.
pub const DATA_ORIGINAL_CLASS: &str = "data-original-class";

/// Presentation attributes written onto every prepared shape.
const OUTLINE: [(&str, &str); 5] = [
    ("fill", "none"),
    ("fill-rule", "evenodd"),
    ("stroke", "#000"),
    ("stroke-width", "1"),
    ("stroke-linejoin", "round"),
];

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("could not parse image markup: {0}")]
    Parse(#[from] ParseError),
    #[error("image contains no fillable shapes")]
    NoRegionsFound,
}

/// Preparation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    /// Element local names treated as fillable shapes.
    pub shape_elements: Vec<String>,
    /// Palette supplied by the caller. Takes precedence over the colors
    /// discovered in the image.
    pub palette_override: Option<Palette>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self { shape_elements: vec!["path".to_string()], palette_override: None }
    }
}

impl PrepareOptions {
    pub fn with_shape_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shape_elements = names.into_iter().map(Into::into).collect();
        self
    }

    /// Treat every basic SVG shape as a region, not only `path`.
    pub fn all_shapes(self) -> Self {
        self.with_shape_elements(["path", "rect", "circle", "ellipse", "polygon", "polyline"])
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette_override = Some(palette);
        self
    }

    fn is_shape(&self, local_name: &str) -> bool {
        self.shape_elements.iter().any(|s| s == local_name)
    }
}

/// Summary of a preparation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrepareReport {
    pub shapes: usize,
    pub colors: usize,
    pub unresolved: usize,
}

/// Output of [`prepare`].
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub document: Document,
    pub markup: String,
    /// Regions in document order.
    pub regions: Vec<Region>,
    /// The palette in effect: caller override, else discovered colors, else
    /// the built-in palette.
    pub palette: Palette,
    /// Distinct colors found in the image, in first-seen order.
    pub discovered: Palette,
}

impl PreparedImage {
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn report(&self) -> PrepareReport {
        PrepareReport {
            shapes: self.regions.len(),
            colors: self.discovered.len(),
            unresolved: self.regions.iter().filter(|r| r.original_color.is_none()).count(),
        }
    }
}

/// Parse `markup` and prepare it. See [`prepare_document`].
pub fn prepare(markup: &str, options: &PrepareOptions) -> Result<PreparedImage, PrepareError> {
    let doc = parse_str(markup)?;
    prepare_document(&doc, options)
}

/// Turn every shape of `doc` into an outline-only region.
///
/// Each shape keeps its `id` (or gets `area<N>`, N being its 1-based position
/// among shapes, bumped past any id already present in the document), has its recovered color stored in `data-color`, loses its
/// fill, `style` and `class`, and gets a thin black stroke. A shape that
/// already carries `data-color` keeps it, so preparing a prepared image is a
/// no-op on regions and palette.
pub fn prepare_document(doc: &Document, options: &PrepareOptions) -> Result<PreparedImage, PrepareError> {
    let shapes: Vec<_> = doc
        .descendants(doc.root_element())
        .filter(|&n| doc.element(n).is_some_and(|e| options.is_shape(e.local_name())))
        .collect();
    if shapes.is_empty() {
        return Err(PrepareError::NoRegionsFound);
    }

    let mut rewrites = Rewrites::new();
    let mut regions = Vec::with_capacity(shapes.len());
    let mut discovered = Palette::new();
    let mut ids = RegionIds::new(doc);

    for (index, &shape) in shapes.iter().enumerate() {
        let Some(el) = doc.element(shape) else { continue };

        let id = ids.claim(el.attr("id"), index + 1);

        let (color, extracted_class) = match el.attr(DATA_COLOR).filter(|c| !c.trim().is_empty()) {
            Some(stored) => (Some(stored.to_string()), None),
            None => {
                let ex = extract_color(doc, shape);
                (ex.color, ex.original_class)
            }
        };
        let color = color.filter(|c| c != "none");

        match &color {
            Some(c) => {
                discovered.push(c.clone());
            }
            None => log::warn!("no color resolved for shape #{id}; it will stay unpaintable"),
        }

        let mut out = el.clone();
        out.set_attr("id", id.as_str());
        if let Some(c) = &color {
            out.set_attr(DATA_COLOR, c.as_str());
        }
        for (name, value) in OUTLINE {
            out.set_attr(name, value);
        }
        out.remove_attr("style");

        let original_class = extracted_class
            .or_else(|| el.attr(DATA_ORIGINAL_CLASS).map(str::to_string))
            .or_else(|| el.attr("class").map(str::to_string));
        if let Some(class) = &original_class {
            out.set_attr(DATA_ORIGINAL_CLASS, class.as_str());
        }
        out.remove_attr("class");

        rewrites.insert(shape, out.attrs);
        regions.push(Region { id, original_color: color, original_class });
    }

    let markup = doc.to_markup_with(&rewrites);
    let document = parse_str(&markup)?;

    let palette = match &options.palette_override {
        Some(p) if !p.is_empty() => p.clone(),
        _ if !discovered.is_empty() => discovered.clone(),
        _ => Palette::builtin(),
    };

    log::info!(
        "prepared {} shapes, {} distinct colors",
        regions.len(),
        discovered.len()
    );

    Ok(PreparedImage { document, markup, regions, palette, discovered })
}

/// Region id allocation. Ids are unique across regions and never collide
/// with an `id` carried by any other element of the document.
struct RegionIds<'a> {
    present: HashSet<&'a str>,
    claimed: HashSet<String>,
}

impl<'a> RegionIds<'a> {
    fn new(doc: &'a Document) -> Self {
        let present = doc
            .descendants(Document::DOCUMENT)
            .filter_map(|n| doc.element(n)?.attr("id"))
            .filter(|id| !id.is_empty())
            .collect();
        Self { present, claimed: HashSet::new() }
    }

    /// Keep `existing` unless an earlier region already took it, else hand
    /// out the first free `area<N>` with N >= `position`.
    fn claim(&mut self, existing: Option<&str>, position: usize) -> String {
        if let Some(id) = existing.filter(|id| !id.is_empty()) {
            if self.claimed.insert(id.to_string()) {
                return id.to_string();
            }
            log::warn!("duplicate id #{id}; the shape gets a generated one");
        }
        let id = (position..)
            .map(|n| format!("area{n}"))
            .find(|id| !self.present.contains(id.as_str()) && !self.claimed.contains(id))
            .unwrap_or_default();
        self.claimed.insert(id.clone());
        id
    }
}

/// Download name for prepared markup: `-processed` is inserted before the
/// extension (`bird.svg` → `bird-processed.svg`); names without an extension
/// get `-processed.svg` appended.
pub fn processed_file_name(original: Option<&str>) -> String {
    match original.filter(|n| !n.is_empty()) {
        None => "processed-svg.svg".to_string(),
        Some(name) => match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}-processed.{ext}"),
            None => format!("{name}-processed.svg"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prep(src: &str) -> PreparedImage {
        prepare(src, &PrepareOptions::default()).unwrap()
    }

    const THREE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#FF0000" d="M0 0"/><path fill="#00FF00" d="M1 1"/><path fill="#FF0000" d="M2 2"/></svg>"##;

    // ── regions ───────────────────────────────────────────────────────────

    #[test]
    fn ids_and_palette_in_first_seen_order() {
        let p = prep(THREE);
        let ids: Vec<_> = p.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["area1", "area2", "area3"]);
        assert_eq!(p.palette.as_slice(), ["#FF0000", "#00FF00"]);
        assert_eq!(p.region_count(), 3);
    }

    #[test]
    fn existing_ids_are_kept() {
        let p = prep(r##"<svg><path id="wing" fill="#111111"/><path fill="#222222"/></svg>"##);
        assert_eq!(p.regions[0].id, "wing");
        assert_eq!(p.regions[1].id, "area2");
    }

    #[test]
    fn generated_ids_skip_ids_already_in_use() {
        let p = prep(r##"<svg><path id="area2" fill="#ff0000"/><path fill="#00ff00"/></svg>"##);
        let ids: Vec<_> = p.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["area2", "area3"]);
        assert!(p.document.find_by_id("area3").is_some());

        let p = prep(r##"<svg><g id="area1"><path fill="#ff0000"/></g><path fill="#00ff00"/></svg>"##);
        let ids: Vec<_> = p.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["area2", "area3"]);
    }

    #[test]
    fn duplicate_ids_are_made_unique() {
        let p = prep(r##"<svg><path id="x" fill="#ff0000"/><path id="x" fill="#00ff00"/></svg>"##);
        let ids: Vec<_> = p.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["x", "area2"]);
        assert_eq!(prep(&p.markup).regions, p.regions);
    }

    #[test]
    fn shapes_are_stripped_to_outlines() {
        let p = prep(r##"<svg><path class="cls-1" style="fill:#123456;opacity:.5" d="M0 0"/></svg>"##);
        let path = p.document.find_by_id("area1").unwrap();
        let el = p.document.element(path).unwrap();
        assert_eq!(el.attr("fill"), Some("none"));
        assert_eq!(el.attr("fill-rule"), Some("evenodd"));
        assert_eq!(el.attr("stroke"), Some("#000"));
        assert_eq!(el.attr("stroke-width"), Some("1"));
        assert_eq!(el.attr("stroke-linejoin"), Some("round"));
        assert_eq!(el.attr("data-color"), Some("#123456"));
        assert_eq!(el.attr("data-original-class"), Some("cls-1"));
        assert_eq!(el.attr("d"), Some("M0 0"));
        assert!(!el.has_attr("style"));
        assert!(!el.has_attr("class"));
    }

    #[test]
    fn unresolved_shapes_have_no_color() {
        let p = prep(r##"<svg><path d="M0 0"/><path fill="#abcdef"/></svg>"##);
        assert_eq!(p.regions[0].original_color, None);
        assert_eq!(p.report(), PrepareReport { shapes: 2, colors: 1, unresolved: 1 });
        let el = p.document.element(p.document.find_by_id("area1").unwrap()).unwrap();
        assert!(!el.has_attr("data-color"));
    }

    #[test]
    fn styles_survive_preparation() {
        let p = prep(r##"<svg><style>.cls-1{fill:#0f0}</style><path class="cls-1"/></svg>"##);
        assert!(p.markup.contains("<style>.cls-1{fill:#0f0}</style>"));
        assert_eq!(p.palette.as_slice(), ["#00ff00"]);
    }

    // ── palette precedence ────────────────────────────────────────────────

    #[test]
    fn caller_palette_overrides_discovered() {
        let custom: Palette = ["#000001"].into_iter().collect();
        let p = prepare(THREE, &PrepareOptions::default().with_palette(custom.clone())).unwrap();
        assert_eq!(p.palette, custom);
        assert_eq!(p.discovered.len(), 2);
    }

    #[test]
    fn builtin_palette_when_nothing_discovered() {
        let p = prep(r#"<svg><path d="M0 0"/></svg>"#);
        assert_eq!(p.palette, Palette::builtin());
    }

    // ── stability ─────────────────────────────────────────────────────────

    #[test]
    fn preparing_twice_is_stable() {
        let once = prep(THREE);
        let twice = prep(&once.markup);
        assert_eq!(once.regions, twice.regions);
        assert_eq!(once.palette, twice.palette);
        assert_eq!(once.markup, twice.markup);
    }

    // ── errors / options ──────────────────────────────────────────────────

    #[test]
    fn no_paths_is_an_error() {
        let err = prepare(r#"<svg><rect fill="red"/></svg>"#, &PrepareOptions::default()).unwrap_err();
        assert!(matches!(err, PrepareError::NoRegionsFound));
    }

    #[test]
    fn wider_shape_set() {
        let p = prepare(
            r#"<svg><rect fill="red"/><circle fill="blue"/></svg>"#,
            &PrepareOptions::default().all_shapes(),
        )
        .unwrap();
        assert_eq!(p.palette.as_slice(), ["#ff0000", "#0000ff"]);
    }

    #[test]
    fn bad_markup_is_a_parse_error() {
        assert!(matches!(prepare("<svg>", &PrepareOptions::default()), Err(PrepareError::Parse(_))));
    }

    #[test]
    fn doctype_entities_resolve() {
        let p = prep(r##"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" [
	<!ENTITY ns_svg "http://www.w3.org/2000/svg">
	<!ENTITY ns_xlink "http://www.w3.org/1999/xlink">
]>
<svg version="1.1" xmlns="&ns_svg;" xmlns:xlink="&ns_xlink;"><path fill="#ff0000" d="M0 0"/></svg>"##);
        assert_eq!(p.regions[0].original_color.as_deref(), Some("#ff0000"));
        assert!(p.markup.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn deep_nesting_does_not_abort() {
        let depth = 20_000;
        let src = format!(
            r##"<svg>{}<path fill="#ff0000"/>{}</svg>"##,
            "<g>".repeat(depth),
            "</g>".repeat(depth)
        );
        match prepare(&src, &PrepareOptions::default()) {
            Ok(p) => assert_eq!(p.region_count(), 1),
            Err(e) => assert!(matches!(e, PrepareError::Parse(_))),
        }
    }

    #[test]
    fn processed_names() {
        assert_eq!(processed_file_name(Some("bird.svg")), "bird-processed.svg");
        assert_eq!(processed_file_name(Some("a.b.svg")), "a.b-processed.svg");
        assert_eq!(processed_file_name(Some("bird")), "bird-processed.svg");
        assert_eq!(processed_file_name(None), "processed-svg.svg");
    }
}
