//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state.
//! Transitions are pure functions; the view reads the state and never
//! mutates it.

use crate::integration::PageOutcome;

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// Holds the result of the single page load plus the little UI state a
/// read-only page needs: where it is scrolled to and whether the dependency
/// list is expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Loaded insight or the failure message. Fixed after the load.
    outcome: PageOutcome,

    /// First visible line of the page.
    pub scroll_offset: usize,

    /// Whether the dependencies card lists every dependency.
    /// Starts collapsed: only the preview is shown.
    pub show_all_dependencies: bool,

    /// Set by the quit action; the event loop exits on the next tick.
    pub should_quit: bool,
}

impl AppState {
    /// Create new AppState scrolled to the top with dependencies collapsed.
    pub fn new(outcome: PageOutcome) -> Self {
        Self {
            outcome,
            scroll_offset: 0,
            show_all_dependencies: false,
            should_quit: false,
        }
    }

    /// Result of the page load.
    pub fn outcome(&self) -> &PageOutcome {
        &self.outcome
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(content_height: usize, viewport_height: usize) -> usize {
        content_height.saturating_sub(viewport_height)
    }

    /// Pull the scroll offset back inside the page.
    ///
    /// Needed after anything that shrinks the page, such as collapsing the
    /// dependency list while scrolled to the bottom.
    pub fn clamp_scroll(&mut self, content_height: usize, viewport_height: usize) {
        self.scroll_offset = self
            .scroll_offset
            .min(Self::max_scroll(content_height, viewport_height));
    }

    /// Flip the dependency list between preview and full.
    ///
    /// Only meaningful when there are more dependencies than the preview
    /// shows; otherwise the card has no toggle and the state stays put.
    pub fn toggle_dependencies(&mut self, preview_len: usize) {
        let total = self
            .outcome
            .insight()
            .map(|insight| insight.dependencies().len())
            .unwrap_or(0);

        if total > preview_len {
            self.show_all_dependencies = !self.show_all_dependencies;
        }
    }
}
