//! Gesture conflict resolution.
//!
//! Tap recognizers that share a touch count overlap: the first tap of a
//! double tap is also a complete single tap. The host asks, for every pair of
//! armed recognizers, whether one must wait for the other to fail before it
//! may fire.

use serde::{Serialize, Serializer};

use super::catalog::Catalog;
use super::definition::ActionDefinition;

/// Whether `a` must wait for `b` to fail before firing.
///
/// Holds only for two taps with the same touch count where `a` needs fewer
/// taps than `b`. Swipes never wait on anything.
pub fn requires_failure(a: &ActionDefinition, b: &ActionDefinition) -> bool {
    match (a.tap_count(), b.tap_count()) {
        (Some(a_taps), Some(b_taps)) => a.touch_count == b.touch_count && a_taps < b_taps,
        _ => false,
    }
}

/// One "waits for failure of" edge between two catalog actions.
///
/// Serializes as a pair of titles.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRequirement<'a> {
    #[serde(serialize_with = "serialize_title")]
    pub action: &'a ActionDefinition,
    #[serde(serialize_with = "serialize_title")]
    pub must_fail: &'a ActionDefinition,
}

fn serialize_title<S: Serializer>(action: &&ActionDefinition, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&action.title)
}

/// Every pair in the catalog for which [`requires_failure`] holds, in
/// catalog order.
pub fn failure_requirements(catalog: &Catalog) -> Vec<FailureRequirement<'_>> {
    let taps = catalog.taps();
    taps.iter()
        .flat_map(|a| {
            taps.iter()
                .filter(move |b| requires_failure(a, b))
                .map(move |b| FailureRequirement {
                    action: a,
                    must_fail: b,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::definition::SwipeDirection;

    #[test]
    fn single_tap_waits_for_double_tap() {
        let single = ActionDefinition::tap(1, 1);
        let double = ActionDefinition::tap(1, 2);
        assert!(requires_failure(&single, &double));
        assert!(!requires_failure(&double, &single));
    }

    #[test]
    fn never_across_touch_counts() {
        let one_finger = ActionDefinition::tap(1, 1);
        let two_finger = ActionDefinition::tap(2, 4);
        assert!(!requires_failure(&one_finger, &two_finger));
    }

    #[test]
    fn irreflexive() {
        let tap = ActionDefinition::tap(3, 3);
        assert!(!requires_failure(&tap, &tap));
    }

    #[test]
    fn swipes_are_exempt() {
        let tap = ActionDefinition::tap(1, 1);
        let swipe = ActionDefinition::swipe(1, SwipeDirection::Up);
        assert!(!requires_failure(&tap, &swipe));
        assert!(!requires_failure(&swipe, &tap));
        assert!(!requires_failure(&swipe, &swipe));
    }

    #[test]
    fn catalog_has_six_requirements_per_touch_count() {
        // 4 tap counts per touch count: C(4, 2) = 6 ordered pairs each.
        let reqs = failure_requirements(Catalog::global());
        assert_eq!(reqs.len(), 24);
        assert_eq!(reqs[0].action.title, "Single Tap");
        assert_eq!(reqs[0].must_fail.title, "Double Tap");
        assert!(reqs
            .iter()
            .all(|r| r.action.touch_count == r.must_fail.touch_count));
    }

    #[test]
    fn requirement_serializes_as_titles() {
        let reqs = failure_requirements(Catalog::global());
        let json = serde_json::to_value(&reqs[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "action": "Single Tap", "must_fail": "Double Tap" })
        );
    }
}
