//! The set of source units a test directory transitively depends on.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

/// Deduplicated set of unit identifiers.
///
/// Identifiers are root-anchored paths such as `proj/pkg/a.go`. The set only
/// grows while the graph is built; [`DependencySet::sorted`] gives a stable
/// order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    units: FxHashSet<String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Returns `true` if it was not present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.units.insert(id.into())
    }

    /// Union another set into this one.
    pub fn extend(&mut self, other: DependencySet) {
        self.units.extend(other.units);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.units.contains(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(String::as_str)
    }

    /// Identifiers in lexical order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.iter().collect();
        ids.sort_unstable();
        ids
    }

    /// Whether every identifier of `other` is also in `self`.
    pub fn is_superset(&self, other: &DependencySet) -> bool {
        self.units.is_superset(&other.units)
    }
}

impl<S: Into<String>> FromIterator<S> for DependencySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Serialize for DependencySet {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.sorted())
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(id)?;
        }
        Ok(())
    }
}
