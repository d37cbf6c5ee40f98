//! Property-based checks of the reconciliation algebra.
//!
//! Offerings are drawn from small pools so that equal-under-equality
//! collisions (and true duplicates) actually occur.

use coursewatch_diff::{diff, ChangeKind};
use coursewatch_model::{Offering, Snapshot};
use proptest::prelude::*;
use std::collections::HashMap;

fn offering_strategy() -> impl Strategy<Value = Offering> {
    (
        prop::sample::select(vec!["3001", "4001", "4500", "6001"]),
        prop::sample::select(vec!["01", "02", "03"]),
        prop::sample::select(vec!["Systems", "Networks", "Compilers", "AI"]),
        "[0-9]{5}",
        "[0-9]{3}",
    )
        .prop_map(|(number, section, name, crn, id)| Offering {
            id,
            number: number.to_string(),
            section: section.to_string(),
            name: name.to_string(),
            crn,
        })
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec(offering_strategy(), 0..12).prop_map(Snapshot::from_iter)
}

/// Occurrence counts keyed by the fields equality is defined over.
fn counts<'a>(offerings: impl Iterator<Item = &'a Offering>) -> HashMap<(String, String, String), i64> {
    let mut map = HashMap::new();
    for offering in offerings {
        *map.entry((
            offering.number.clone(),
            offering.section.clone(),
            offering.name.clone(),
        ))
        .or_insert(0) += 1;
    }
    map
}

proptest! {
    #[test]
    fn diff_with_self_is_empty(snap in snapshot_strategy()) {
        prop_assert!(diff(&snap, &snap).is_empty());
    }

    #[test]
    fn removals_and_additions_reproduce_the_new_multiset(
        old in snapshot_strategy(),
        new in snapshot_strategy(),
    ) {
        let changes = diff(&old, &new);

        let mut result = counts(old.iter());
        for change in &changes {
            let key = (
                change.offering.number.clone(),
                change.offering.section.clone(),
                change.offering.name.clone(),
            );
            let entry = result.entry(key).or_insert(0);
            match change.kind {
                ChangeKind::Removed => *entry -= 1,
                ChangeKind::Added => *entry += 1,
            }
        }
        result.retain(|_, count| *count != 0);

        prop_assert_eq!(result, counts(new.iter()));
    }

    #[test]
    fn diff_is_symmetric(old in snapshot_strategy(), new in snapshot_strategy()) {
        let forward = diff(&old, &new);
        let backward = diff(&new, &old);

        let removals =
            counts(forward.iter().filter(|c| c.kind == ChangeKind::Removed).map(|c| &c.offering));
        let additions =
            counts(backward.iter().filter(|c| c.kind == ChangeKind::Added).map(|c| &c.offering));
        prop_assert_eq!(removals, additions);

        let additions =
            counts(forward.iter().filter(|c| c.kind == ChangeKind::Added).map(|c| &c.offering));
        let removals =
            counts(backward.iter().filter(|c| c.kind == ChangeKind::Removed).map(|c| &c.offering));
        prop_assert_eq!(additions, removals);
    }

    #[test]
    fn removals_render_before_additions_within_a_listing(
        old in snapshot_strategy(),
        new in snapshot_strategy(),
    ) {
        let changes: Vec<_> = diff(&old, &new).iter().cloned().collect();
        for (i, earlier) in changes.iter().enumerate() {
            for later in &changes[i + 1..] {
                if earlier.offering.same_listing(&later.offering) {
                    prop_assert!(
                        !(earlier.kind == ChangeKind::Added && later.kind == ChangeKind::Removed),
                        "addition before removal within listing {}-{}",
                        earlier.offering.number,
                        earlier.offering.section,
                    );
                }
            }
        }
    }

    #[test]
    fn every_change_line_ends_with_newline(
        old in snapshot_strategy(),
        new in snapshot_strategy(),
    ) {
        let changes = diff(&old, &new);
        let rendered = changes.render();
        prop_assert_eq!(rendered.lines().count(), changes.len());
        if !changes.is_empty() {
            prop_assert!(rendered.ends_with('\n'));
        }
    }
}
