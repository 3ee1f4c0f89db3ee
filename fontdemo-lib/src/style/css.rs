use crate::error::SheetUnavailable;
use crate::style::owned_css::{FontFaceRule, OwnedRule, OwnedStylesheet};
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::font_face::FontFaceRule as LightningFontFaceRule;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;
use log::debug;

/// Parse CSS text (LightningCSS) into an owned stylesheet.
///
/// `href` only labels the sheet in diagnostics. Invalid declarations are
/// recovered from; a sheet that still fails to parse is unavailable.
pub fn parse_style_sheet(href: &str, css_text: &str) -> Result<OwnedStylesheet, SheetUnavailable> {
    let parser_opts = ParserOptions {
        error_recovery: true,
        ..ParserOptions::default()
    };

    let sheet = LightningStyleSheet::parse(css_text, parser_opts)
        .map_err(|e| SheetUnavailable::new(href, e.to_string()))?;

    let rules = sheet
        .rules
        .0
        .iter()
        .map(|rule| match rule {
            CssRule::FontFace(font_face) => OwnedRule::FontFace(convert_font_face_rule(font_face)),
            other => OwnedRule::Other {
                kind: rule_kind(other),
            },
        })
        .collect::<Vec<_>>();

    debug!("parsed {} top-level rules from {}", rules.len(), href);
    Ok(OwnedStylesheet { rules })
}

/// Copy the descriptors of a LightningCSS `@font-face` rule.
///
/// Each descriptor is printed as `name: value` and split, so descriptors
/// LightningCSS could not interpret keep their raw text (an unknown weight
/// such as `heavy` is reported as written).
fn convert_font_face_rule(font_face: &LightningFontFaceRule<'_>) -> FontFaceRule {
    let mut owned = FontFaceRule::default();

    for property in &font_face.properties {
        let Ok(printed) = property.to_css_string(PrinterOptions::default()) else {
            continue;
        };
        let Some((name, value)) = printed.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();

        // Later declarations override earlier ones.
        match name.trim().to_ascii_lowercase().as_str() {
            // A face names exactly one family; a list leaves it undeclared.
            "font-family" if has_top_level_comma(&value) => {
                debug!("ignoring font-family list in @font-face: {}", value);
            }
            "font-family" => owned.font_family = Some(unquote(&value)),
            "font-weight" => owned.font_weight = Some(value),
            "font-style" => owned.font_style = Some(value),
            "src" => owned.src = Some(value),
            _ => {}
        }
    }

    owned
}

fn rule_kind(rule: &CssRule<'_>) -> &'static str {
    match rule {
        CssRule::Style(_) => "style",
        CssRule::Media(_) => "media",
        CssRule::Import(_) => "import",
        CssRule::Keyframes(_) => "keyframes",
        CssRule::FontFace(_) => "font-face",
        CssRule::Supports(_) => "supports",
        CssRule::Page(_) => "page",
        _ => "other",
    }
}

/// True if `value` contains a comma outside CSS string quotes.
fn has_top_level_comma(value: &str) -> bool {
    let mut quote = None;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (_, '\\') => {
                chars.next();
            }
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if ch == open => quote = None,
            (None, ',') => return true,
            _ => {}
        }
    }
    false
}

/// Strip one level of CSS string quotes, resolving `\"`, `\'` and `\\`.
pub fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    let quoted = bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0];
    if !quoted {
        return value.to_string();
    }

    let inner = &value[1..value.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_font_face_descriptors() {
        let sheet = parse_style_sheet(
            "inline",
            r#"
            @font-face {
                font-family: "Open Sans";
                src: url(/fonts/open-sans.woff2) format("woff2");
                font-weight: 700;
                font-style: italic;
            }
            "#,
        )
        .unwrap();

        let faces: Vec<_> = sheet.font_face_rules().collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].font_family.as_deref(), Some("Open Sans"));
        assert_eq!(faces[0].font_weight.as_deref(), Some("700"));
        assert_eq!(faces[0].font_style.as_deref(), Some("italic"));
        assert!(faces[0].src.as_deref().unwrap().contains("open-sans.woff2"));
    }

    #[test]
    fn undeclared_descriptors_stay_unset() {
        let sheet = parse_style_sheet("inline", "@font-face { font-family: helveticaNeue; }").unwrap();
        let face = sheet.font_face_rules().next().unwrap();
        assert_eq!(face, &FontFaceRule::new("helveticaNeue"));
    }

    #[test]
    fn other_rule_kinds_are_kept_but_not_font_faces() {
        let sheet = parse_style_sheet(
            "inline",
            r#"
            body { color: red; }
            @media print { @font-face { font-family: Hidden; } }
            @keyframes spin { from { opacity: 0; } to { opacity: 1; } }
            @font-face { font-family: Visible; }
            "#,
        )
        .unwrap();

        let kinds: Vec<_> = sheet
            .rules
            .iter()
            .map(|rule| match rule {
                OwnedRule::FontFace(_) => "font-face",
                OwnedRule::Other { kind } => *kind,
            })
            .collect();
        assert_eq!(kinds, vec!["style", "media", "keyframes", "font-face"]);

        let families: Vec<_> = sheet
            .font_face_rules()
            .filter_map(|face| face.font_family.clone())
            .collect();
        assert_eq!(families, vec!["Visible".to_string()]);
    }

    #[test]
    fn family_list_is_not_a_family() {
        let sheet = parse_style_sheet(
            "inline",
            r#"
            @font-face { font-family: Lato, sans-serif; font-weight: 700; }
            @font-face { font-family: "Lato, Condensed"; }
            "#,
        )
        .unwrap();
        let faces: Vec<_> = sheet.font_face_rules().collect();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].font_family, None);
        assert_eq!(faces[0].font_weight.as_deref(), Some("700"));
        assert_eq!(faces[1].font_family.as_deref(), Some("Lato, Condensed"));
    }

    #[test]
    fn top_level_comma_ignores_quoted_commas() {
        assert!(has_top_level_comma("a, b"));
        assert!(has_top_level_comma("'a, b', c"));
        assert!(!has_top_level_comma("\"a, b\""));
        assert!(!has_top_level_comma("'It\\'s, fine'"));
        assert!(!has_top_level_comma("Plain"));
    }

    #[test]
    fn unquote_handles_both_quote_styles() {
        assert_eq!(unquote("\"Open Sans\""), "Open Sans");
        assert_eq!(unquote("'It\\'s'"), "It's");
        assert_eq!(unquote("Plain"), "Plain");
        assert_eq!(unquote("\"unterminated"), "\"unterminated");
    }
}
