//! Shared test fixtures for the holdall containers.
//!
//! Keeping these in a microcrate avoids copy-paste across the list, tree,
//! and queue test suites.

use holdall_core::{Keyed, Record};
use serde::{Deserialize, Serialize};

/// Company record used as the stored item across the workspace's tests.
///
/// The `id` field is the unique key; `name` is the mutable field that
/// update operations rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corp {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
}

impl Corp {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl Record for Corp {
    type Key = i64;
    type Field = String;

    fn less(&self, other: &Self) -> bool {
        self.id <= other.id
    }

    fn matches(&self, key: &i64) -> bool {
        self.id == *key
    }

    fn assign(&mut self, field: String) {
        self.name = field;
    }
}

impl Keyed for Corp {
    fn key(&self) -> i64 {
        self.id
    }
}

/// The 36-company corpus shipped as embedded JSON. Ids are distinct, so
/// the corpus satisfies the key-uniqueness contract out of the box.
pub fn corpus() -> Vec<Corp> {
    serde_json::from_str(include_str!("../testdata.json")).expect("embedded corpus is valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_loads_with_distinct_keys() {
        let corps = corpus();
        assert_eq!(corps.len(), 36);
        let mut ids: Vec<i64> = corps.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 36);
    }

    #[test]
    fn corp_capabilities() {
        let mut corp = Corp::new(3, "IBM");
        assert!(corp.matches(&3));
        assert!(!corp.matches(&4));
        assert!(corp.less(&Corp::new(5, "Toyota Motor")));
        assert!(!Corp::new(5, "Toyota Motor").less(&corp));
        corp.assign("International Business Machines".into());
        assert_eq!(corp.name, "International Business Machines");
        assert_eq!(corp.key(), 3);
    }
}
