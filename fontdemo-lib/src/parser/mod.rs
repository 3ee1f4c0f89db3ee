pub mod html;
pub mod serialize;
