//! Page content extraction
//!
//! This module turns one rendered page into a `{title, text}` pair:
//! - Opening a render context for the page and always closing it again
//! - Waiting for the content landmark
//! - Reading the landmark's heading and full text
//! - Normalizing both strings

mod normalize;
mod worker;

pub use normalize::{collapse_blank_lines, normalize_text, normalize_title, strip_non_ascii};
pub use worker::{extract_page, PageContent};
