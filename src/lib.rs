//! Package Security Viewer (pkgview)
//!
//! TUI application for viewing the security insight of one open-source
//! package version: vulnerabilities, dependencies, licenses, OpenSSF
//! scorecard and repository figures.
//!
//! Pure Core / Impure Shell: `model`, `state` and the page builders are pure;
//! `source`, `logging`, `view::run_page` and `main` do the I/O.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

// Page-load boundary: validation, fetch, classification
pub mod integration;
