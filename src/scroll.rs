//! Scroll-driven navbar and active-section state.

use std::collections::BTreeSet;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    /// Offset past which the navbar gets the `scrolled` look.
    pub scrolled_offset: f64,
    /// Offset below which the navbar is never hidden.
    pub hide_threshold: f64,
    /// Space left above a section when scrolling to it.
    pub scroll_offset: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_offset: 50.0,
            hide_threshold: 100.0,
            scroll_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Direction + threshold hide/show heuristic.
#[derive(Debug, Clone)]
pub struct NavbarTracker {
    config: NavbarConfig,
    last_offset: f64,
    state: NavbarState,
}

impl NavbarTracker {
    pub fn new(config: NavbarConfig) -> Self {
        Self {
            config,
            last_offset: 0.0,
            state: NavbarState::default(),
        }
    }

    pub fn state(&self) -> NavbarState {
        self.state
    }

    /// Feeds a new scroll offset. Returns the new state if anything changed.
    pub fn update(&mut self, offset: f64, navbar_height: f64) -> Option<NavbarState> {
        let prev = self.state;
        let scrolling_down = offset > self.last_offset;

        self.state.scrolled = offset > self.config.scrolled_offset;
        if offset <= self.config.hide_threshold || !scrolling_down {
            self.state.hidden = false;
        } else if offset > navbar_height {
            self.state.hidden = true;
        }
        self.last_offset = offset;

        (self.state != prev).then_some(self.state)
    }
}

/// Tracks which observed sections are intersecting the top-biased band.
///
/// The active section is the first visible one in document order.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    order: Vec<String>,
    visible: BTreeSet<usize>,
    active: Option<usize>,
}

impl SectionTracker {
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            order: ids.into_iter().collect(),
            visible: BTreeSet::new(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.order[i].as_str())
    }

    /// Records a visibility change. Returns the new active id when it moved.
    ///
    /// Leaving every section keeps the last active one highlighted.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> Option<&str> {
        let idx = self.order.iter().position(|s| s == id)?;
        if visible {
            self.visible.insert(idx);
        } else {
            self.visible.remove(&idx);
        }
        let next = self.visible.iter().next().copied().or(self.active);
        if next == self.active {
            return None;
        }
        self.active = next;
        self.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_flag_follows_offset() {
        let mut nav = NavbarTracker::new(NavbarConfig::default());
        assert_eq!(
            nav.update(60.0, 70.0),
            Some(NavbarState {
                scrolled: true,
                hidden: false
            })
        );
        assert_eq!(nav.update(40.0, 70.0).map(|s| s.scrolled), Some(false));
    }

    #[test]
    fn not_hidden_before_one_navbar_height() {
        let mut nav = NavbarTracker::new(NavbarConfig::default());
        nav.update(120.0, 300.0);
        assert!(!nav.state().hidden);
        nav.update(320.0, 300.0);
        assert!(nav.state().hidden);
    }

    #[test]
    fn unknown_section_is_ignored() {
        let mut t = SectionTracker::new(["about".to_string()]);
        assert_eq!(t.set_visible("nope", true), None);
        assert_eq!(t.active(), None);
    }

    #[test]
    fn topmost_visible_section_wins() {
        let mut t = SectionTracker::new(
            ["home", "about", "skills"].map(String::from),
        );
        assert_eq!(t.set_visible("skills", true), Some("skills"));
        assert_eq!(t.set_visible("about", true), Some("about"));
        assert_eq!(t.set_visible("about", false), Some("skills"));
        assert_eq!(t.set_visible("skills", false), None);
        assert_eq!(t.active(), Some("skills"));
    }
}
