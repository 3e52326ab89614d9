//! Name-indexed arena holding the entities of one kind.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::bounds;
use crate::entity::{Entity, Sealed};
use crate::error::{ModelError, Result};

/// Typed handle to an entity stored in a [`crate::PlantModel`].
///
/// Ids are only meaningful for the model that issued them and stay valid
/// until the model is cleared.
pub struct Id<T> {
    index: usize,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub(crate) const fn new(index: usize) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position of the entity in insertion order.
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Entity> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::KIND, self.index)
    }
}

/// Entities of one kind, addressed by id and by unique name.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<T>,
    index: BTreeMap<String, usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T: Entity> Pool<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.entries.get(id.index)
    }

    pub fn id_of(&self, name: &str) -> Option<Id<T>> {
        self.index.get(name).map(|&index| Id::new(index))
    }

    pub fn contains(&self, id: Id<T>) -> bool {
        id.index < self.entries.len()
    }

    /// Entities ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.index
            .values()
            .map(|&index| (Id::new(index), &self.entries[index]))
    }

    pub(crate) fn insert(&mut self, entity: T) -> Result<Id<T>> {
        bounds::name(T::KIND.as_str(), entity.name())?;
        if self.index.contains_key(entity.name()) {
            return Err(ModelError::DuplicateName {
                kind: T::KIND,
                name: entity.name().to_string(),
            });
        }
        let index = self.entries.len();
        self.index.insert(entity.name().to_string(), index);
        self.entries.push(entity);
        Ok(Id::new(index))
    }

    pub(crate) fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        self.entries.get_mut(id.index)
    }

    pub(crate) fn rename(&mut self, id: Id<T>, new_name: String) -> Result<()> {
        bounds::name(T::KIND.as_str(), &new_name)?;
        let current = self
            .entries
            .get(id.index)
            .map(|entity| entity.name().to_string())
            .ok_or(ModelError::UnknownId {
                kind: T::KIND,
                index: id.index,
            })?;
        if current == new_name {
            return Ok(());
        }
        if self.index.contains_key(&new_name) {
            return Err(ModelError::DuplicateName {
                kind: T::KIND,
                name: new_name,
            });
        }
        self.index.remove(&current);
        self.index.insert(new_name.clone(), id.index);
        self.entries[id.index].set_name(new_name, Sealed(()));
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
