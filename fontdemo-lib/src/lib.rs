//! Font specimen pages from `@font-face` rules.
//!
//! The renderer ([`render::render`]) reads a document's style sheets through
//! the [`host`] traits, turns every valid `@font-face` rule into a heading and
//! a sample paragraph set in that face, and prepends the result to the body.
//! [`generate::font_demo`] wires it to html5ever and LightningCSS for whole
//! HTML pages.

pub mod demo;
pub mod dom;
pub mod error;
pub mod generate;
pub mod host;
pub mod html_host;
pub mod parser;
pub mod render;
pub mod style;

pub use demo::{DemoOptions, FontDemo};
pub use error::{DemoError, FontDemoError, SheetUnavailable};
pub use render::{render, RenderReport};
