//! Capability predicates ("marks")
//!
//! A mark is a named, side-effect-free precondition over a dataset. Features
//! declare the marks they require; an extraction run only executes features
//! whose marks all validated. Marks are identified by name: two marks with the
//! same name denote the same capability.

pub mod catalog;

use crate::data::Data;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Predicate signature for marks
pub type MarkPredicate = fn(&Data) -> bool;

/// Ordered set of marks
pub type MarkSet = BTreeSet<Mark>;

/// Named capability predicate
#[derive(Clone, Copy)]
pub struct Mark {
    name: &'static str,
    description: &'static str,
    predicate: MarkPredicate,
}

fn always(_: &Data) -> bool {
    true
}

impl Mark {
    /// Create a mark with a custom predicate
    pub const fn new(name: &'static str, description: &'static str, predicate: MarkPredicate) -> Self {
        Self {
            name,
            description,
            predicate,
        }
    }

    /// Create a tag mark that always validates
    pub const fn unconditional(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, always)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Check whether the dataset satisfies this mark
    pub fn validate(&self, data: &Data) -> bool {
        (self.predicate)(data)
    }
}

impl PartialEq for Mark {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Mark {}

impl PartialOrd for Mark {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mark {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name)
    }
}

impl Hash for Mark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mark").field(&self.name).finish()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Names of a set of marks, in set order
pub fn mark_names<'a>(marks: impl IntoIterator<Item = &'a Mark>) -> Vec<String> {
    marks.into_iter().map(|m| m.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::{Morphology, Node, NodeType};
    use std::sync::Arc;

    const TAG: Mark = Mark::unconditional("Tag", "test tag");
    const OTHER_TAG: Mark = Mark::unconditional("OtherTag", "another test tag");

    fn never(_: &Data) -> bool {
        false
    }

    fn data() -> Data {
        let morphology =
            Morphology::new(vec![Node::new(1, NodeType::Soma, [0.0; 3], 1.0, None)]).unwrap();
        Data::new(Arc::new(morphology))
    }

    #[test]
    fn test_unconditional_mark_always_validates() {
        let data = data();
        assert!(TAG.validate(&data));
        assert!(OTHER_TAG.validate(&data));
    }

    #[test]
    fn test_marks_compare_by_name() {
        let same_name = Mark::new("Tag", "different predicate", never);
        assert_eq!(TAG, same_name);
        assert_ne!(TAG, OTHER_TAG);

        let set: MarkSet = [TAG, same_name, OTHER_TAG].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(mark_names(&set), vec!["OtherTag", "Tag"]);
    }

    #[test]
    fn test_custom_predicate() {
        let mark = Mark::new("Never", "never validates", never);
        assert!(!mark.validate(&data()));
        assert_eq!(format!("{:?}", mark), "Mark(\"Never\")");
    }
}
