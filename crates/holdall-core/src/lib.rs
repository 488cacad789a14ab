//! Capability traits and shared error types for the holdall containers.
//!
//! Every container in this workspace stores caller-supplied records that
//! satisfy a small capability contract: a total preorder for ordered
//! placement, a key-match predicate for lookup, and an in-place field
//! update. The containers themselves never inspect record contents beyond
//! these three operations.

use std::error::Error;
use std::fmt;

/// Capability contract for records stored in holdall containers.
///
/// Keys must be unique within a container: two distinct records stored in
/// the same container must never both answer `true` in [`Record::matches`]
/// for the same key. Containers do not detect violations; if the contract
/// is broken, lookup results become timing dependent.
///
/// The trait is object safe, so records can also be stored behind
/// `dyn Record<Key = K, Field = F>` references.
pub trait Record {
    /// Lookup key type.
    type Key;
    /// Value accepted by [`Record::assign`].
    type Field;

    /// Total preorder over records. `a.less(b)` reports whether `a` sorts
    /// at or before `b`. Ordered containers use it to pick the walk
    /// direction on insert and to order sorted output.
    fn less(&self, other: &Self) -> bool
    where
        Self: Sized;

    /// Reports whether this record is the one identified by `key`.
    fn matches(&self, key: &Self::Key) -> bool;

    /// Updates the record's mutable field in place.
    fn assign(&mut self, field: Self::Field);
}

/// Key access for containers that navigate by bare keys.
///
/// The linked list only ever compares a record against a caller-supplied
/// key, so [`Record`] suffices there. The search tree additionally has to
/// order a *stored* record against a bare lookup key to pick a descent
/// direction, which needs an explicit key accessor. Implementations must
/// keep [`Record::less`] consistent with the `Ord` of extracted keys.
pub trait Keyed: Record {
    /// Returns this record's key.
    fn key(&self) -> Self::Key;
}

/// Errors shared across the holdall containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// The operation needs at least one node and the list has none.
    EmptyList,
    /// The operation needs at least one node and the tree has none.
    EmptyTree,
    /// Lookup completed without a match.
    NotExist,
    /// Insert found a record with the same key already stored.
    AlreadyExists,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::EmptyList => write!(f, "list is empty"),
            ContainerError::EmptyTree => write!(f, "tree is empty"),
            ContainerError::NotExist => write!(f, "data doesn't exist"),
            ContainerError::AlreadyExists => write!(f, "inserted data already exists"),
        }
    }
}

impl Error for ContainerError {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        key: u32,
        value: String,
    }

    impl Record for Pair {
        type Key = u32;
        type Field = String;

        fn less(&self, other: &Self) -> bool {
            self.key <= other.key
        }

        fn matches(&self, key: &u32) -> bool {
            self.key == *key
        }

        fn assign(&mut self, field: String) {
            self.value = field;
        }
    }

    #[test]
    fn record_is_object_safe() {
        let mut pair = Pair {
            key: 7,
            value: "seven".into(),
        };
        let dynamic: &mut dyn Record<Key = u32, Field = String> = &mut pair;
        assert!(dynamic.matches(&7));
        dynamic.assign("VII".into());
        assert_eq!(pair.value, "VII");
    }

    #[test]
    fn less_orders_pairs() {
        let a = Pair {
            key: 1,
            value: "a".into(),
        };
        let b = Pair {
            key: 2,
            value: "b".into(),
        };
        assert!(a.less(&b));
        assert!(!b.less(&a));
        assert!(a.less(&a));
    }

    #[test]
    fn error_display_matches_wire_strings() {
        assert_eq!(ContainerError::EmptyList.to_string(), "list is empty");
        assert_eq!(ContainerError::EmptyTree.to_string(), "tree is empty");
        assert_eq!(ContainerError::NotExist.to_string(), "data doesn't exist");
        assert_eq!(
            ContainerError::AlreadyExists.to_string(),
            "inserted data already exists"
        );
    }

    #[test]
    fn error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ContainerError::NotExist);
        assert!(err.source().is_none());
    }
}
