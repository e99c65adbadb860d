//! Just enough CSS to recover fills: inline `style` declarations and the
//! `.cls-N { fill: … }` rules emitted by common vector editors.

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

/// Value of `property` in a declaration block (`a: b; c: d`), trimmed.
///
/// Property names compare case-insensitively. The last declaration wins, as
/// in CSS. Empty values are treated as absent.
pub fn declaration_value<'a>(block: &'a str, property: &str) -> Option<&'a str> {
    block
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
        .last()
}

/// First class token of the form `cls-<digits>`.
pub fn numbered_class(class_list: &str) -> Option<&str> {
    class_list.split_ascii_whitespace().find(|token| {
        token
            .strip_prefix("cls-")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// `property` of the first style rule in `sheet` whose selector list
/// contains exactly `.class_name`.
///
/// The sheet is parsed with lightningcss, so the value comes back in its
/// serialized form (`rgb(1, 2, 3)` reads as `#010203`). Rules nested in
/// at-rules (`@media { … }`) are not looked at. An unparsable sheet has no
/// rules.
pub fn class_rule_value(sheet: &str, class_name: &str, property: &str) -> Option<String> {
    let sheet = match StyleSheet::parse(sheet, ParserOptions::default()) {
        Ok(sheet) => sheet,
        Err(e) => {
            log::debug!("stylesheet ignored: {e}");
            return None;
        }
    };
    let wanted = format!(".{class_name}");

    sheet.rules.0.iter().find_map(|rule| {
        let CssRule::Style(style) = rule else { return None };
        let selectors = style.selectors.to_css_string(PrinterOptions::default()).ok()?;
        if !selectors.split(',').any(|sel| sel.trim() == wanted) {
            return None;
        }
        let declarations = style.declarations.to_css_string(PrinterOptions::default()).ok()?;
        declaration_value(&declarations, property).map(str::to_string)
    })
}
