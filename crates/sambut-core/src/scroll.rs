//! Header shadow that deepens once the page is scrolled.

use crate::view::{ElementId, PageView, StyleProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderShadow {
    /// At or near the top of the page.
    Resting,
    /// Scrolled past the threshold.
    Raised,
}

impl HeaderShadow {
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Resting => "0 1px 30px rgba(0,0,0,0.1)",
            Self::Raised => "0 2px 20px rgba(0,0,0,0.15)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStyler {
    threshold: f64,
}

impl Default for ScrollStyler {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ScrollStyler {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Raised strictly above the threshold.
    #[must_use]
    pub fn shadow_for(&self, scroll_y: f64) -> HeaderShadow {
        if scroll_y > self.threshold {
            HeaderShadow::Raised
        } else {
            HeaderShadow::Resting
        }
    }

    /// Read the current scroll offset and restyle the header.
    pub fn apply<V: PageView + ?Sized>(&self, view: &mut V) -> HeaderShadow {
        let shadow = self.shadow_for(view.scroll_y());
        view.set_style(&ElementId::Header, StyleProperty::BoxShadow, shadow.css());
        shadow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    #[test]
    fn threshold_is_exclusive() {
        let styler = ScrollStyler::default();
        assert_eq!(styler.shadow_for(0.0), HeaderShadow::Resting);
        assert_eq!(styler.shadow_for(100.0), HeaderShadow::Resting);
        assert_eq!(styler.shadow_for(100.5), HeaderShadow::Raised);
    }

    #[test]
    fn apply_is_idempotent() {
        let styler = ScrollStyler::default();
        let mut view = MemoryView::contact_page();
        view.set_scroll_y(400.0);
        styler.apply(&mut view);
        styler.apply(&mut view);
        assert_eq!(
            view.style(&ElementId::Header, StyleProperty::BoxShadow),
            Some(HeaderShadow::Raised.css())
        );

        view.set_scroll_y(10.0);
        assert_eq!(styler.apply(&mut view), HeaderShadow::Resting);
        assert_eq!(
            view.style(&ElementId::Header, StyleProperty::BoxShadow),
            Some("0 1px 30px rgba(0,0,0,0.1)")
        );
    }
}
