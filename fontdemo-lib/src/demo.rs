//! Conversion of one `@font-face` rule into a demo: a heading naming the face
//! and a sample paragraph set in it.

use crate::error::DemoError;
use crate::host::ElementBuilder;
use crate::style::owned_css::FontFaceRule;

/// Display names for the weight tokens a demo accepts.
pub const FONT_WEIGHT_LABELS: &[(&str, &str)] = &[
    ("100", "Thin"),
    ("300", "Light"),
    ("400", "Regular"),
    ("500", "Medium"),
    ("600", "Semibold"),
    ("700", "Bold"),
    ("800", "ExtraBold"),
    ("900", "Black"),
    ("normal", "Regular"),
    ("bold", "Bold"),
];

pub const DEFAULT_FONT_WEIGHT: &str = "400";
pub const DEFAULT_FONT_STYLE: &str = "normal";

pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetuer adipiscing elit, sed diam nonummy nibh euismod tincidunt ut laoreet dolore magna aliquam erat volutpat.";

const HEADING_STYLE: &str = "font-family: sans-serif; font-weight: normal; font-style: normal; font-size: 12px; line-height: 1.25em; color: #777; margin: 0 0 .25em";
const SAMPLE_BOX_STYLE: &str = "font-size: 24px; line-height: 1.25em; margin: .25em 0 1.25em";

/// Options shared by every demo of a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    pub sample_text: String,
}

impl Default for DemoOptions {
    fn default() -> Self {
        DemoOptions {
            sample_text: LOREM_IPSUM.to_string(),
        }
    }
}

pub fn weight_label(token: &str) -> Option<&'static str> {
    FONT_WEIGHT_LABELS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, label)| *label)
}

/// Rendered form of one valid `@font-face` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDemo {
    pub family: String,
    /// The weight token as declared, or the default.
    pub weight: String,
    pub weight_label: &'static str,
    pub style: String,
    pub heading: String,
}

impl FontDemo {
    pub fn from_rule(rule: &FontFaceRule) -> Result<Self, DemoError> {
        let family = rule
            .font_family
            .as_deref()
            .map(str::trim)
            .filter(|family| !family.is_empty())
            .ok_or(DemoError::InvalidFamily)?;

        let weight = declared_or(&rule.font_weight, DEFAULT_FONT_WEIGHT);
        let weight_label = weight_label(weight).ok_or_else(|| DemoError::invalid_weight(weight))?;

        let style = declared_or(&rule.font_style, DEFAULT_FONT_STYLE);

        let mut heading = format!("{} {}", normalize(family), normalize(weight_label));
        if style != DEFAULT_FONT_STYLE {
            heading.push(' ');
            heading.push_str(&capitalize(style));
        }

        Ok(FontDemo {
            family: family.to_string(),
            weight: weight.to_string(),
            weight_label,
            style: style.to_string(),
            heading,
        })
    }

    /// Inline style that sets the sample paragraph in this face.
    pub fn sample_style(&self) -> String {
        format!(
            "font-family: {}; font-weight: {}; font-style: {}; {}",
            css_string(&self.family),
            self.weight,
            self.style,
            SAMPLE_BOX_STYLE
        )
    }

    /// Builds the heading and sample paragraph and appends both to `parent`.
    pub fn append_to<B: ElementBuilder>(&self, builder: &mut B, parent: &B::Node, sample_text: &str) {
        let heading = builder.create_element("h2", &[("style", HEADING_STYLE)]);
        let heading_text = builder.create_text(&self.heading);
        builder.append_child(&heading, heading_text);

        let sample_style = self.sample_style();
        let sample = builder.create_element("p", &[("style", sample_style.as_str())]);
        let sample_body = builder.create_text(sample_text);
        builder.append_child(&sample, sample_body);

        builder.append_child(parent, heading);
        builder.append_child(parent, sample);
    }
}

fn declared_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Headline-case a camelCase name: `helveticaNeue` becomes `Helvetica Neue`.
///
/// A space goes between an ASCII lowercase letter and a following ASCII
/// uppercase letter; text that is already spaced passes through unchanged.
pub fn normalize(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for ch in s.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            spaced.push(' ');
        }
        prev_lower = ch.is_ascii_lowercase();
        spaced.push(ch);
    }
    capitalize(&spaced)
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quote a family name for use inside an inline style.
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
