//! Scroll-anchor policy for the message thread viewport
//!
//! Decides, on each reconciled update, whether the viewport should follow
//! the newest message or stay where the user is reading. The policy is a
//! pure state machine over two booleans; it never touches a rendering
//! surface. Consumers apply the returned decisions, and skip them silently
//! while the scrollable container is not yet measurable.

use tracing::trace;

/// Default tolerance band, in layout units, within which the viewport
/// still counts as "at the bottom".
pub const DEFAULT_BOTTOM_TOLERANCE: f32 = 50.0;

/// Where the viewport is relative to the newest content, reported to the
/// consumer after each user scroll (e.g. to toggle a "jump to latest"
/// affordance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    AtBottom,
    Away,
}

/// What to do with the viewport after a changed collection arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    /// Scroll the newest item into view.
    ScrollToLatest,
    /// Leave the scroll position untouched; the user is reading older
    /// content and must never be yanked down to new arrivals.
    Hold,
}

/// Two-boolean scroll-anchor state machine.
#[derive(Debug, Clone)]
pub struct ScrollAnchor {
    /// The viewport is following the newest content.
    anchored: bool,
    /// The user scrolled away from the bottom; suppresses auto-scroll
    /// until explicitly cleared.
    manual_override: bool,
    tolerance: f32,
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_TOLERANCE)
    }
}

impl ScrollAnchor {
    pub fn new(tolerance: f32) -> Self {
        Self {
            anchored: false,
            manual_override: false,
            tolerance,
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    /// A different conversation was selected.
    ///
    /// Clears any manual override from the previous thread; when the
    /// consumer asserts the initial scroll-to-bottom request, the anchor
    /// engages immediately.
    pub fn on_chat_changed(&mut self, scroll_to_latest: bool) {
        self.manual_override = false;
        self.anchored = scroll_to_latest;
        trace!(anchored = self.anchored, "Anchor reset for new conversation");
    }

    /// The user scrolled; `distance_from_bottom` is measured in the same
    /// layout units as the tolerance band.
    pub fn on_scroll(&mut self, distance_from_bottom: f32) -> ScrollPosition {
        if distance_from_bottom > self.tolerance {
            self.manual_override = true;
            self.anchored = false;
            ScrollPosition::Away
        } else {
            self.manual_override = false;
            self.anchored = true;
            ScrollPosition::AtBottom
        }
    }

    /// A changed, reconciled collection arrived.
    ///
    /// Auto-scrolls to the latest item unless the user's manual override
    /// is active.
    pub fn on_collection_changed(&mut self) -> ScrollDecision {
        if self.manual_override {
            ScrollDecision::Hold
        } else {
            self.anchored = true;
            ScrollDecision::ScrollToLatest
        }
    }

    /// Deterministically clear the manual override, e.g. when the user
    /// taps a "jump to latest" affordance.
    pub fn reset_manual_scroll(&mut self) {
        self.manual_override = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_not_anchored() {
        let anchor = ScrollAnchor::default();
        assert!(!anchor.is_anchored());
        assert!(!anchor.manual_override());
    }

    #[test]
    fn test_chat_change_engages_anchor() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_scroll(200.0);
        anchor.on_chat_changed(true);
        assert!(anchor.is_anchored());
        assert!(!anchor.manual_override());
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
    }

    #[test]
    fn test_chat_change_without_scroll_request() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_scroll(200.0);
        anchor.on_chat_changed(false);
        assert!(!anchor.is_anchored());
        // Override was still cleared, so new content may scroll.
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
    }

    #[test]
    fn test_scroll_outside_tolerance_sets_override() {
        let mut anchor = ScrollAnchor::default();
        assert_eq!(anchor.on_scroll(200.0), ScrollPosition::Away);
        assert!(anchor.manual_override());
        assert!(!anchor.is_anchored());
    }

    #[test]
    fn test_scroll_within_tolerance_clears_override() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_scroll(200.0);
        assert_eq!(anchor.on_scroll(10.0), ScrollPosition::AtBottom);
        assert!(!anchor.manual_override());
        assert!(anchor.is_anchored());
    }

    #[test]
    fn test_tolerance_boundary_counts_as_bottom() {
        let mut anchor = ScrollAnchor::new(50.0);
        assert_eq!(anchor.on_scroll(50.0), ScrollPosition::AtBottom);
        assert_eq!(anchor.on_scroll(50.1), ScrollPosition::Away);
    }

    #[test]
    fn test_override_suppresses_auto_scroll() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_scroll(200.0);
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::Hold);
        // Still held on the next update.
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::Hold);
    }

    #[test]
    fn test_updates_auto_scroll_when_not_overridden() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_chat_changed(true);
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
    }

    #[test]
    fn test_reading_user_then_returning_to_bottom() {
        // Scenario C: scroll to 200 units above bottom mid-poll, next
        // update holds; scroll back to 10 units, next update scrolls.
        let mut anchor = ScrollAnchor::new(50.0);
        anchor.on_chat_changed(true);

        anchor.on_scroll(200.0);
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::Hold);

        anchor.on_scroll(10.0);
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
    }

    #[test]
    fn test_reset_manual_scroll() {
        let mut anchor = ScrollAnchor::default();
        anchor.on_scroll(300.0);
        anchor.reset_manual_scroll();
        assert!(!anchor.manual_override());
        assert_eq!(anchor.on_collection_changed(), ScrollDecision::ScrollToLatest);
    }
}
