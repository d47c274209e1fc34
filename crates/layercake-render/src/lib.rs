//! Course page rendering for layercake.
//!
//! [`TemplateRenderer`] walks a template tree and writes a mirrored output
//! tree. Markdown pages have two placeholders substituted:
//!
//! - `{ navigation }` - navigation table built from the course graph
//! - `{ solicitation }` - fixed boilerplate block
//!
//! All other files are copied byte-for-byte.

mod navigation;
mod renderer;

pub use navigation::{DEFAULT_HEADING, render_navigation};
pub use renderer::{
    NAVIGATION_PLACEHOLDER, RenderError, RenderOptions, RenderReport, RenderedPage,
    SOLICITATION_PLACEHOLDER, TemplateRenderer, fill_placeholders,
};
