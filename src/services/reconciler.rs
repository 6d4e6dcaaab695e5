use crate::models::{HeadingSample, MapOrientation, Place, PlaceId};
use std::collections::HashSet;
use std::sync::Arc;

/// The subset of the map rendering surface the reconciler drives directly.
/// Pin add/remove instructions travel back to the caller as a [`PinDiff`];
/// only the deselect-all instruction is pushed through this seam.
pub trait RenderSurface: Send + Sync {
    /// Clear the "selected" visual state from every currently-selected pin.
    fn deselect_all(&self);
}

/// Minimal set of pin changes needed to bring the surface in line with a
/// new result list.
#[derive(Debug, Clone, PartialEq)]
pub struct PinDiff {
    /// Places to pin, in result order.
    pub to_add: Vec<Place>,
    /// Ids of displayed pins that left the result set.
    pub to_remove: Vec<PlaceId>,
}

impl PinDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff a displayed pin set against a new result list, by place identity.
/// Identity, not name: two distinct places can share a display name, and
/// attribute changes (rating, address) must not churn pins.
pub fn diff_pins(current_pins: &HashSet<PlaceId>, new_results: &[Place]) -> PinDiff {
    let new_ids: HashSet<PlaceId> = new_results.iter().map(|place| place.id).collect();

    let to_add = new_results
        .iter()
        .filter(|place| !current_pins.contains(&place.id))
        .cloned()
        .collect();

    let to_remove = current_pins
        .iter()
        .filter(|id| !new_ids.contains(id))
        .copied()
        .collect();

    PinDiff { to_add, to_remove }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Selection {
    #[default]
    Unselected,
    Selected(Place),
}

/// Keeps a rendering surface's pin set consistent with the latest search
/// results, tracks which place is selected, and computes the rotation of
/// the user-direction indicator.
pub struct MapAnnotationReconciler {
    surface: Arc<dyn RenderSurface>,
    results: Vec<Place>,
    selection: Selection,
}

impl MapAnnotationReconciler {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        MapAnnotationReconciler {
            surface,
            results: Vec::new(),
            selection: Selection::Unselected,
        }
    }

    /// Adopt a new result list and return the pin changes it implies.
    ///
    /// When the id sets already match, the diff is empty even if other
    /// attributes changed, so minor state updates never flicker pins.
    /// The rendering surface does not notice on its own when the selected
    /// place drops out of the result set, so that check happens here on
    /// every call.
    pub fn reconcile(
        &mut self,
        current_pins: &HashSet<PlaceId>,
        new_results: Vec<Place>,
    ) -> PinDiff {
        let diff = diff_pins(current_pins, &new_results);
        self.results = new_results;

        if let Selection::Selected(place) = &self.selection {
            if !self.results.iter().any(|p| p.id == place.id) {
                tracing::debug!(
                    "Selected place '{}' left the result set, clearing selection",
                    place.name
                );
                self.clear_selection();
            }
        }

        diff
    }

    /// Select the tapped place. A tap on an annotation with no matching
    /// place in the current results is non-fatal: it is logged and the
    /// selection stays as it was.
    pub fn on_annotation_tap(&mut self, id: PlaceId) -> Option<&Place> {
        if let Some(place) = self.results.iter().find(|p| p.id == id).cloned() {
            self.selection = Selection::Selected(place);
        } else {
            tracing::warn!(
                "Tapped annotation {} has no matching place in the current results",
                id
            );
        }
        self.selected()
    }

    /// Clear the selection unconditionally.
    pub fn on_annotation_deselect(&mut self) {
        self.clear_selection();
    }

    pub fn selected(&self) -> Option<&Place> {
        match &self.selection {
            Selection::Selected(place) => Some(place),
            Selection::Unselected => None,
        }
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }

    /// Rotation in radians for a north-up directional icon so it points in
    /// the device's true heading regardless of how the map is rotated.
    /// Recomputed on every heading sample and every map-rotation change;
    /// the surface should animate transitions between successive values over
    /// [`INDICATOR_ROTATION_ANIMATION_MS`](crate::constants::INDICATOR_ROTATION_ANIMATION_MS)
    /// to avoid visible snapping.
    pub fn indicator_rotation(heading: &HeadingSample, map_orientation: MapOrientation) -> f64 {
        heading.true_heading.to_radians() - map_orientation.as_degrees().to_radians()
    }

    fn clear_selection(&mut self) {
        self.selection = Selection::Unselected;
        // Unselected entry action: a pin left visually selected would block
        // re-selecting the same pin after its detail card is dismissed
        self.surface.deselect_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    struct NoopSurface;

    impl RenderSurface for NoopSurface {
        fn deselect_all(&self) {}
    }

    fn place(seed: &str, name: &str) -> Place {
        Place::new(
            Place::id_from_provider(seed),
            name.to_string(),
            Coordinates::new(35.6812, 139.7671).unwrap(),
        )
    }

    #[test]
    fn test_diff_from_empty_adds_everything() {
        let results = vec![place("a", "A"), place("b", "B")];
        let diff = diff_pins(&HashSet::new(), &results);

        assert_eq!(diff.to_add.len(), 2);
        assert!(diff.to_remove.is_empty());
        // Result order is preserved for additions
        assert_eq!(diff.to_add[0].name, "A");
        assert_eq!(diff.to_add[1].name, "B");
    }

    #[test]
    fn test_diff_identical_sets_is_noop() {
        let results = vec![place("a", "A"), place("b", "B")];
        let current: HashSet<PlaceId> = results.iter().map(|p| p.id).collect();

        let diff = diff_pins(&current, &results);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_diff_add_and_remove_are_disjoint() {
        let old = vec![place("a", "A"), place("b", "B")];
        let new = vec![place("b", "B"), place("c", "C")];
        let current: HashSet<PlaceId> = old.iter().map(|p| p.id).collect();

        let diff = diff_pins(&current, &new);
        assert_eq!(diff.to_add.len(), 1);
        assert_eq!(diff.to_add[0].name, "C");
        assert_eq!(diff.to_remove, vec![place("a", "A").id]);

        for added in &diff.to_add {
            assert!(!diff.to_remove.contains(&added.id));
        }
    }

    #[test]
    fn test_same_name_different_identity_both_kept() {
        // Two branches of the same chain share a display name
        let new = vec![place("branch-1", "Ichiran"), place("branch-2", "Ichiran")];
        let diff = diff_pins(&HashSet::new(), &new);
        assert_eq!(diff.to_add.len(), 2);
    }

    #[test]
    fn test_indicator_rotation() {
        let quarter = MapAnnotationReconciler::indicator_rotation(
            &HeadingSample::new(90.0),
            MapOrientation::new(0.0),
        );
        assert!((quarter - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let aligned = MapAnnotationReconciler::indicator_rotation(
            &HeadingSample::new(90.0),
            MapOrientation::new(90.0),
        );
        assert!(aligned.abs() < 1e-12);
    }

    #[test]
    fn test_indicator_rotation_map_rotated_past_heading() {
        let rotation = MapAnnotationReconciler::indicator_rotation(
            &HeadingSample::new(0.0),
            MapOrientation::new(90.0),
        );
        assert!((rotation + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_tap_unknown_annotation_keeps_selection() {
        let mut reconciler = MapAnnotationReconciler::new(Arc::new(NoopSurface));
        let known = place("a", "A");
        reconciler.reconcile(&HashSet::new(), vec![known.clone()]);
        reconciler.on_annotation_tap(known.id);

        let selected = reconciler.on_annotation_tap(Place::id_from_provider("ghost"));
        assert_eq!(selected.map(|p| p.id), Some(known.id));
    }
}
