//! Keyboard action handler.
//!
//! Applies a [`KeyAction`] to [`AppState`]. No I/O.

use crate::model::KeyAction;
use crate::state::AppState;

/// Page geometry the handler needs to resolve relative moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetrics {
    /// Rendered page height in lines.
    pub content_height: usize,
    /// Visible lines.
    pub viewport_height: usize,
    /// Dependencies listed while the card is collapsed.
    pub dependency_preview: usize,
}

/// Apply one action to the state.
///
/// Scroll offsets saturate at zero and at the last full viewport. Toggling
/// the dependency list does not move the offset; the view clamps it against
/// the new page height on the next frame.
pub fn handle_action(state: &mut AppState, action: KeyAction, metrics: PageMetrics) {
    let max = AppState::max_scroll(metrics.content_height, metrics.viewport_height);
    let page = metrics.viewport_height.max(1);

    match action {
        KeyAction::ScrollUp => state.scroll_offset = state.scroll_offset.saturating_sub(1),
        KeyAction::ScrollDown => state.scroll_offset = (state.scroll_offset + 1).min(max),
        KeyAction::PageUp => state.scroll_offset = state.scroll_offset.saturating_sub(page),
        KeyAction::PageDown => state.scroll_offset = (state.scroll_offset + page).min(max),
        KeyAction::ScrollToTop => state.scroll_offset = 0,
        KeyAction::ScrollToBottom => state.scroll_offset = max,
        KeyAction::ToggleDependencies => state.toggle_dependencies(metrics.dependency_preview),
        KeyAction::Quit => state.should_quit = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::PageOutcome;
    use crate::model::UserMessage;

    fn state() -> AppState {
        AppState::new(PageOutcome::Failed {
            message: UserMessage::Generic,
        })
    }

    fn metrics(content_height: usize, viewport_height: usize) -> PageMetrics {
        PageMetrics {
            content_height,
            viewport_height,
            dependency_preview: 10,
        }
    }

    #[test]
    fn scroll_down_stops_at_last_viewport() {
        let mut s = state();
        for _ in 0..100 {
            handle_action(&mut s, KeyAction::ScrollDown, metrics(50, 40));
        }
        assert_eq!(s.scroll_offset, 10);
    }

    #[test]
    fn scroll_up_saturates_at_zero() {
        let mut s = state();
        handle_action(&mut s, KeyAction::ScrollUp, metrics(50, 40));
        assert_eq!(s.scroll_offset, 0);
    }

    #[test]
    fn page_moves_by_viewport_height() {
        let mut s = state();
        handle_action(&mut s, KeyAction::PageDown, metrics(200, 30));
        assert_eq!(s.scroll_offset, 30);
        handle_action(&mut s, KeyAction::PageDown, metrics(200, 30));
        assert_eq!(s.scroll_offset, 60);
        handle_action(&mut s, KeyAction::PageUp, metrics(200, 30));
        assert_eq!(s.scroll_offset, 30);
    }

    #[test]
    fn jumps_go_to_ends() {
        let mut s = state();
        handle_action(&mut s, KeyAction::ScrollToBottom, metrics(200, 30));
        assert_eq!(s.scroll_offset, 170);
        handle_action(&mut s, KeyAction::ScrollToTop, metrics(200, 30));
        assert_eq!(s.scroll_offset, 0);
    }

    #[test]
    fn short_page_never_scrolls() {
        let mut s = state();
        handle_action(&mut s, KeyAction::ScrollToBottom, metrics(10, 30));
        assert_eq!(s.scroll_offset, 0);
        handle_action(&mut s, KeyAction::PageDown, metrics(10, 30));
        assert_eq!(s.scroll_offset, 0);
    }

    #[test]
    fn zero_height_viewport_still_pages() {
        let mut s = state();
        handle_action(&mut s, KeyAction::PageDown, metrics(10, 0));
        assert_eq!(s.scroll_offset, 1);
    }

    #[test]
    fn quit_sets_flag() {
        let mut s = state();
        handle_action(&mut s, KeyAction::Quit, metrics(10, 10));
        assert!(s.should_quit);
    }
}
