//! Headless host for the series detail page.
//!
//! [`dom`] provides the document the controller renders into, [`render`]
//! the page builder that produces its nodes, and [`app`] the wiring the
//! `series-page` binary uses.

#![allow(missing_docs)]

pub mod app;
pub mod dom;
pub mod render;

pub use dom::{HtmlDocument, HtmlNavLink};
pub use render::HtmlPageBuilder;
