use crate::models::{BoundingBox, StyledFeature};
use crate::projection::Projected;

/// Contents of the details popup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible(String),
}

/// Everything drawn on top of the base map: the features of the current
/// response, its bounding box, and the highlight of the selected feature.
///
/// Features are only ever replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    features: Vec<StyledFeature>,
    bounding_box: Option<BoundingBox>,
    highlight: Option<StyledFeature>,
    selected: Option<usize>,
    popup: PopupState,
    selection_enabled: bool,
    revision: u64,
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn features(&self) -> &[StyledFeature] {
        &self.features
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&StyledFeature> {
        self.highlight.as_ref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    #[must_use]
    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    /// Bumped whenever the feature set is replaced or cleared
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.bounding_box.is_none() && self.highlight.is_none()
    }

    /// Drop the selection, features and bounding box, and stop accepting selections
    pub fn clear(&mut self) {
        self.unselect();
        self.selection_enabled = false;
        self.features.clear();
        self.bounding_box = None;
        self.revision += 1;
    }

    /// Replace everything with a new response
    pub fn install(&mut self, bounding_box: BoundingBox, features: Vec<StyledFeature>) {
        self.clear();
        self.bounding_box = Some(bounding_box);
        self.features = features;
        self.selection_enabled = true;
        self.revision += 1;
    }

    /// Select the feature at `index` and highlight it.
    ///
    /// Returns the reference to fetch details for, if the feature has one.
    pub fn select(&mut self, index: usize) -> Option<String> {
        if !self.selection_enabled {
            return None;
        }

        let feature = self.features.get(index)?;
        let dump = feature.dump.clone();

        self.highlight = Some(feature.highlighted());
        self.selected = Some(index);

        dump
    }

    pub fn unselect(&mut self) {
        self.highlight = None;
        self.selected = None;
        self.popup = PopupState::Hidden;
    }

    pub fn show_popup(&mut self, html: String) {
        self.popup = PopupState::Visible(html);
    }

    pub fn hide_popup(&mut self) {
        self.popup = PopupState::Hidden;
    }

    /// Topmost feature within `tolerance` meters of `point`
    #[must_use]
    pub fn feature_at(&self, point: Projected, tolerance: f64) -> Option<usize> {
        self.features
            .iter()
            .enumerate()
            .rev()
            .map(|(i, f)| (i, f.geometry.distance_to(point)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::models::Style;

    fn point_feature(x: f64, y: f64, dump: Option<&str>) -> StyledFeature {
        StyledFeature {
            geometry: Geometry::Point(Projected::new(x, y)),
            style: Style::point("#FF0000", 3.0),
            dump: dump.map(str::to_string),
        }
    }

    fn loaded() -> Overlay {
        let mut overlay = Overlay::new();
        overlay.install(
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            vec![point_feature(0.0, 0.0, Some("n1")), point_feature(100.0, 0.0, None)],
        );
        overlay
    }

    #[test]
    fn test_install_replaces_contents() {
        let mut overlay = loaded();
        overlay.select(0);

        overlay.install(BoundingBox::new(5.0, 5.0, 6.0, 6.0), vec![point_feature(1.0, 1.0, Some("x"))]);

        assert_eq!(overlay.features().len(), 1);
        assert_eq!(overlay.bounding_box(), Some(&BoundingBox::new(5.0, 5.0, 6.0, 6.0)));
        assert_eq!(overlay.highlight(), None);
        assert_eq!(overlay.selected(), None);
    }

    #[test]
    fn test_revision_changes_with_features_only() {
        let mut overlay = loaded();
        let revision = overlay.revision();

        overlay.select(0);
        overlay.unselect();
        assert_eq!(overlay.revision(), revision);

        overlay.clear();
        assert!(overlay.revision() > revision);
    }

    #[test]
    fn test_select_highlights_and_returns_dump() {
        let mut overlay = loaded();

        assert_eq!(overlay.select(0), Some("n1".to_string()));
        let highlight = overlay.highlight().cloned();
        assert_eq!(highlight.as_ref().map(|h| &h.geometry), Some(&overlay.features()[0].geometry));
        assert_eq!(highlight.map(|h| h.style), Some(Style::highlight()));
        assert_eq!(overlay.selected(), Some(0));
    }

    #[test]
    fn test_select_without_dump_still_highlights() {
        let mut overlay = loaded();
        assert_eq!(overlay.select(1), None);
        assert!(overlay.highlight().is_some());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut overlay = loaded();
        assert_eq!(overlay.select(7), None);
        assert_eq!(overlay.highlight(), None);
    }

    #[test]
    fn test_unselect_hides_popup() {
        let mut overlay = loaded();
        overlay.select(0);
        overlay.show_popup("details".to_string());

        overlay.unselect();

        assert_eq!(overlay.highlight(), None);
        assert_eq!(overlay.popup(), &PopupState::Hidden);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut overlay = loaded();
        overlay.select(0);
        overlay.clear();

        assert!(overlay.is_empty());
        assert!(!overlay.selection_enabled());
        assert_eq!(overlay.select(0), None);
    }

    #[test]
    fn test_feature_at_picks_nearest() {
        let overlay = loaded();
        assert_eq!(overlay.feature_at(Projected::new(90.0, 0.0), 20.0), Some(1));
        assert_eq!(overlay.feature_at(Projected::new(4.0, 3.0), 20.0), Some(0));
        assert_eq!(overlay.feature_at(Projected::new(50.0, 50.0), 20.0), None);
    }
}
