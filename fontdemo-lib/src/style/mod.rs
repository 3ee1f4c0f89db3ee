pub mod css;
pub mod document_sheets;
pub mod owned_css;
