// Fully-owned views of parsed style sheets, independent of the CSS source text.
use std::fmt;

#[derive(Debug, Default, Clone)]
pub struct OwnedStylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<OwnedRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnedRule {
    FontFace(FontFaceRule),
    /// Any other rule kind, e.g. "style", "media", "keyframes".
    Other { kind: &'static str },
}

/// The descriptors of one `@font-face` rule that the demo consumes.
///
/// Values are kept as their serialized CSS text; `None` means the descriptor
/// was not declared.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub src: Option<String>,
}

impl FontFaceRule {
    pub fn new(family: &str) -> Self {
        FontFaceRule {
            font_family: Some(family.to_string()),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: &str) -> Self {
        self.font_weight = Some(weight.to_string());
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.font_style = Some(style.to_string());
        self
    }
}

impl OwnedStylesheet {
    pub fn font_face_rules(&self) -> impl Iterator<Item = &FontFaceRule> {
        self.rules.iter().filter_map(|rule| match rule {
            OwnedRule::FontFace(face) => Some(face),
            OwnedRule::Other { .. } => None,
        })
    }
}

/// Prints the rule on one line, e.g.
/// `@font-face { font-family: Lato; src: url(lato.woff2); }`.
impl fmt::Display for FontFaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@font-face {{")?;
        let descriptors = [
            ("font-family", &self.font_family),
            ("font-weight", &self.font_weight),
            ("font-style", &self.font_style),
            ("src", &self.src),
        ];
        for (name, value) in descriptors {
            if let Some(value) = value {
                write!(f, " {}: {};", name, value)?;
            }
        }
        write!(f, " }}")
    }
}
