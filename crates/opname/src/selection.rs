use std::collections::HashSet;

use gudang_core::OpnameId;

/// Record ids chosen for export. Local to the session, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<OpnameId>,
}

impl Selection {
    pub fn contains(&self, id: &OpnameId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &OpnameId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// True when the selection is exactly the non-empty set `all`.
    pub fn covers<'a, I>(&self, all: I) -> bool
    where
        I: IntoIterator<Item = &'a OpnameId>,
    {
        let all: HashSet<&OpnameId> = all.into_iter().collect();
        !all.is_empty()
            && all.len() == self.ids.len()
            && all.iter().all(|id| self.ids.contains(*id))
    }

    /// Select every id in `all`, or clear when they are already all selected.
    pub fn toggle_all<'a, I>(&mut self, all: I)
    where
        I: IntoIterator<Item = &'a OpnameId> + Clone,
    {
        if self.covers(all.clone()) {
            self.ids.clear();
        } else {
            self.ids = all.into_iter().cloned().collect();
        }
    }

    /// Keep only ids accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&OpnameId) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(raw: &[&str]) -> Vec<OpnameId> {
        raw.iter().map(|s| OpnameId::new(*s).unwrap()).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let all = ids(&["a"]);
        let mut selection = Selection::default();

        assert!(selection.toggle(&all[0]));
        assert!(selection.contains(&all[0]));
        assert!(!selection.toggle(&all[0]));
        assert!(selection.is_empty());
    }

    #[test]
    fn partial_selection_is_not_covering_and_select_all_completes_it() {
        let all = ids(&["a", "b", "c"]);
        let mut selection = Selection::default();
        selection.toggle(&all[1]);

        assert!(!selection.covers(&all));
        selection.toggle_all(&all);
        assert!(selection.covers(&all));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn empty_record_set_is_never_covered() {
        let selection = Selection::default();
        assert!(!selection.covers(&Vec::<OpnameId>::new()));
    }

    proptest! {
        #[test]
        fn select_all_twice_is_identity_from_empty_or_full(
            n in 1usize..40,
            start_full in any::<bool>(),
        ) {
            let all: Vec<OpnameId> = (0..n)
                .map(|i| OpnameId::new(format!("op-{i}")).unwrap())
                .collect();
            let mut selection = Selection::default();
            if start_full {
                selection.toggle_all(&all);
            }
            let before = selection.clone();

            selection.toggle_all(&all);
            selection.toggle_all(&all);

            prop_assert_eq!(selection, before);
        }
    }
}
