//! Projection of the viewer state onto the page.
//!
//! [`PageView`] is a plain description of what the page shows; [`html`]
//! turns it into markup.

mod embed;
pub mod html;
mod view;

pub use embed::embed_url;
pub use view::{PageView, PaneContent, PaneView, project};
