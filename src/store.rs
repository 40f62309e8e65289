use crate::types::NormalizedSeries;

/// Two-slot holder for the series currently on display.
///
/// Slots are replaced wholesale on every update, never merged or diffed.
/// The store is an explicit value passed by reference to the orchestrator
/// and reconciler; nothing else holds state between updates.
#[derive(Debug, Default)]
pub struct SeriesStore {
    main: Option<NormalizedSeries>,
    comparison: Option<NormalizedSeries>,
}

/// Owned copy of both slots, taken at one point in time for the reconciler
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub main: Option<NormalizedSeries>,
    pub comparison: Option<NormalizedSeries>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the main slot. The comparison slot is untouched.
    pub fn set_main(&mut self, series: NormalizedSeries) {
        self.main = Some(series);
    }

    /// Replace or clear the comparison slot. The main slot is untouched.
    pub fn set_comparison(&mut self, series: Option<NormalizedSeries>) {
        self.comparison = series;
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            main: self.main.clone(),
            comparison: self.comparison.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str) -> NormalizedSeries {
        NormalizedSeries {
            label: label.to_string(),
            indicator_name: "GDP".to_string(),
            years: vec!["2020".to_string()],
            values: vec![1.0],
        }
    }

    #[test]
    fn slots_are_independent() {
        let mut store = SeriesStore::new();
        store.set_main(series("Ethiopia"));
        store.set_comparison(Some(series("Kenya")));

        store.set_main(series("Ethiopia again"));
        let snap = store.snapshot();
        assert_eq!(snap.main.unwrap().label, "Ethiopia again");
        assert_eq!(snap.comparison.unwrap().label, "Kenya");
    }

    #[test]
    fn clearing_comparison_leaves_main() {
        let mut store = SeriesStore::new();
        store.set_main(series("Ethiopia"));
        store.set_comparison(Some(series("Kenya")));
        store.set_comparison(None);

        let snap = store.snapshot();
        assert!(snap.main.is_some());
        assert!(snap.comparison.is_none());
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let mut store = SeriesStore::new();
        store.set_main(series("Ethiopia"));
        let snap = store.snapshot();
        store.set_main(series("Replaced"));
        assert_eq!(snap.main.unwrap().label, "Ethiopia");
    }
}
