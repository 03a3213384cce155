//! Pure transforms from API payloads to panel models.
//!
//! Nothing here touches the page; `app::Page` applies the models.

mod history;
mod result;

pub use history::*;
pub use result::*;
