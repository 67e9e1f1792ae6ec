//! Coordinate-frame registry seam and the output-frame selector.

use log::debug;

/// Frame anchoring the local, metric XY origin.
pub const LOCAL_XY_FRAME: &str = "local_xy_origin";

/// Geodetic pseudo-frame, offered when the registry can convert local coordinates to it.
pub const WGS84_FRAME: &str = "wgs84";

/// Source of known coordinate-frame names.
pub trait FrameRegistry {
    /// All frame ids the registry currently knows about.
    fn frame_ids(&self) -> Vec<String>;

    /// Whether a transform between the two named frames is available.
    fn supports_transform(&self, from: &str, to: &str) -> bool;
}

/// Frames offered as pose output targets: everything the registry knows, plus the WGS84
/// pseudo-frame when geodetic conversion is available.
pub fn output_frames(registry: &dyn FrameRegistry) -> Vec<String> {
    let mut frames = registry.frame_ids();
    if registry.supports_transform(LOCAL_XY_FRAME, WGS84_FRAME) {
        frames.push(WGS84_FRAME.to_owned());
    }
    frames
}

/// Fixed frame registry for tests and demos.
#[derive(Debug, Clone)]
pub struct StaticFrames {
    frames: Vec<String>,
    geodetic: bool,
}

impl StaticFrames {
    pub fn new(frames: impl IntoIterator<Item = impl Into<String>>, geodetic: bool) -> Self {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
            geodetic,
        }
    }
}

impl FrameRegistry for StaticFrames {
    fn frame_ids(&self) -> Vec<String> {
        self.frames.clone()
    }

    fn supports_transform(&self, from: &str, to: &str) -> bool {
        self.geodetic && from == LOCAL_XY_FRAME && to == WGS84_FRAME
    }
}

/// View-model of the output-frame combo box, kept apart from any widget so the sync logic can
/// be exercised without a GUI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameSelector {
    items: Vec<String>,
    selected: Option<usize>,
}

impl FrameSelector {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text of the selected entry, if any.
    pub fn current(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.items.get(index))
            .map(String::as_str)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = Some(index);
        }
    }

    /// Append an entry. The first entry added to an empty selector becomes selected.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    /// Select the entry with the given text, returning whether it was found.
    pub fn select(&mut self, item: &str) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }
}

/// Refresh the selector from the registry's current frame list.
///
/// A list with the same number of entries as the selector is treated as unchanged and never
/// repopulates, even when the entries themselves differ; the log line below only fires when
/// they truly match.
pub fn sync_selector(selector: &mut FrameSelector, frames: &[String]) {
    if selector.len() == frames.len() {
        if frames.iter().eq(selector.items()) {
            debug!("frame list unchanged");
        }
        return;
    }

    let current = selector.current().map(str::to_owned);
    debug!("repopulating output frames, keeping selection {current:?}");

    selector.clear();
    for frame in frames {
        selector.push(frame.clone());
    }

    if let Some(current) = current {
        if !selector.select(&current) {
            // The selected frame vanished from the registry; keep offering it.
            selector.push(current.clone());
            selector.select(&current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn wgs84_is_appended_only_with_geodetic_support() {
        let registry = StaticFrames::new(["map"], true);
        assert_eq!(frames(&["map", "wgs84"]), output_frames(&registry));

        let registry = StaticFrames::new(["map"], false);
        assert_eq!(frames(&["map"]), output_frames(&registry));
    }

    #[test]
    fn empty_selector_gets_populated_and_selects_the_first_frame() {
        let mut selector = FrameSelector::default();
        sync_selector(&mut selector, &frames(&["map", "odom"]));

        assert_eq!(frames(&["map", "odom"]), selector.items());
        assert_eq!(Some("map"), selector.current());
    }

    #[test]
    fn identical_list_leaves_the_selector_untouched() {
        let mut selector = FrameSelector::default();
        sync_selector(&mut selector, &frames(&["map", "odom"]));
        selector.select("odom");

        sync_selector(&mut selector, &frames(&["map", "odom"]));

        assert_eq!(frames(&["map", "odom"]), selector.items());
        assert_eq!(Some("odom"), selector.current());
    }

    #[test]
    fn same_length_list_never_repopulates() {
        let mut selector = FrameSelector::default();
        sync_selector(&mut selector, &frames(&["map", "odom"]));

        sync_selector(&mut selector, &frames(&["map", "base_link"]));

        assert_eq!(frames(&["map", "odom"]), selector.items());
    }

    #[test]
    fn selection_survives_a_repopulation() {
        let mut selector = FrameSelector::default();
        sync_selector(&mut selector, &frames(&["map", "odom"]));
        selector.select("odom");

        sync_selector(&mut selector, &frames(&["map", "odom", "base_link"]));

        assert_eq!(Some("odom"), selector.current());
    }

    #[test]
    fn vanished_selection_is_added_back() {
        let mut selector = FrameSelector::default();
        selector.push("gone");

        sync_selector(&mut selector, &frames(&["map", "odom"]));

        assert_eq!(frames(&["map", "odom", "gone"]), selector.items());
        assert_eq!(Some("gone"), selector.current());
    }
}
