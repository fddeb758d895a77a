//! Inkmark App Library
//!
//! A headless editing session: an editable canvas over an in-memory surface,
//! driven by recorded pointer events and exported as JSON or SVG.

pub mod session;

pub use session::Session;
