//! Mobile menu toggle and smooth in-page anchor scrolling.

use crate::view::{ElementId, PageView, ScrollBehavior};

const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorOutcome {
    /// Scrolled to `top`, already corrected for the header.
    Scrolled { top: f64 },
    /// In-page link whose target is not on the page.
    MissingTarget,
    /// Not an in-page link; left to the browser.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationController {
    header_offset: f64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl NavigationController {
    #[must_use]
    pub const fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// Flip the menu between open and closed. Returns the new state.
    pub fn toggle_menu<V: PageView + ?Sized>(&self, view: &mut V) -> bool {
        let open = !self.is_menu_open(view);
        view.set_class(&ElementId::NavMenu, ACTIVE_CLASS, open);
        open
    }

    pub fn close_menu<V: PageView + ?Sized>(&self, view: &mut V) {
        view.set_class(&ElementId::NavMenu, ACTIVE_CLASS, false);
    }

    #[must_use]
    pub fn is_menu_open<V: PageView + ?Sized>(&self, view: &V) -> bool {
        view.has_class(&ElementId::NavMenu, ACTIVE_CLASS)
    }

    /// Handle a click on a link with `href`.
    ///
    /// For `#id` links: scroll smoothly so the target sits just below the
    /// fixed header, then close the menu (even if the target is missing).
    pub fn follow_anchor<V: PageView + ?Sized>(&self, view: &mut V, href: &str) -> AnchorOutcome {
        let Some(target) = href.strip_prefix('#') else {
            return AnchorOutcome::External;
        };

        let offset = if target.is_empty() {
            None
        } else {
            view.offset_top(&ElementId::Anchor(target.to_string()))
        };
        let outcome = match offset {
            Some(offset) => {
                let top = offset - self.header_offset;
                view.scroll_to(top, ScrollBehavior::Smooth);
                AnchorOutcome::Scrolled { top }
            }
            None => {
                tracing::debug!(href, "anchor target not found");
                AnchorOutcome::MissingTarget
            }
        };
        self.close_menu(view);
        outcome
    }
}
