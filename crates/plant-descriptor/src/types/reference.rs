use std::fmt;

use plant_model::EntityKind;

/// A by-name reference to another entity, optionally pinned to its kind.
///
/// Names are only unique within one kind, so a reference without a kind
/// resolves to the first kind in [`EntityKind::ALL`] holding that name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectName {
    name: String,
    kind: Option<EntityKind>,
}

impl ObjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    pub fn typed(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<EntityKind> {
        self.kind
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ObjectName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} '{}'", kind.as_str(), self.name),
            None => write!(f, "'{}'", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_of_different_kinds_are_distinct() {
        let point = ObjectName::typed("X", EntityKind::Point);
        let location = ObjectName::typed("X", EntityKind::Location);
        assert_ne!(point, location);
        assert_eq!(location.to_string(), "location 'X'");
        assert_eq!(ObjectName::from("X").kind(), None);
    }
}
