use crate::object::{SceneObject, View};
use pickscene_common::ObjectId;
use std::collections::HashMap;

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("object {0} not found")]
    NotFound(ObjectId),
}

/// Mapping from object id to scene object, iterated in insertion order.
///
/// Entries live in a dense vector in the order they were first added; a
/// side index maps ids to slots. Re-adding an existing id replaces the object
/// in place and keeps its original slot.
#[derive(Debug, Clone)]
pub struct ObjectRegistry<O = View> {
    entries: Vec<(ObjectId, O)>,
    slots: HashMap<ObjectId, usize>,
}

impl<O> Default for ObjectRegistry<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<O: SceneObject> ObjectRegistry<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object` under `id`. Returns the replaced object, if any.
    pub fn add(&mut self, id: ObjectId, object: O) -> Option<O> {
        if let Some(&slot) = self.slots.get(&id) {
            tracing::debug!(%id, "object replaced");
            return Some(std::mem::replace(&mut self.entries[slot].1, object));
        }
        tracing::debug!(%id, model = object.model_key(), "object added");
        self.slots.insert(id, self.entries.len());
        self.entries.push((id, object));
        None
    }

    /// Remove the object under `id`. Absent ids are a no-op returning `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<O> {
        let slot = self.slots.remove(&id)?;
        let (_, object) = self.entries.remove(slot);
        for (later, _) in &self.entries[slot..] {
            if let Some(s) = self.slots.get_mut(later) {
                *s -= 1;
            }
        }
        tracing::debug!(%id, "object removed");
        Some(object)
    }

    pub fn get(&self, id: ObjectId) -> Result<&O, SceneError> {
        self.slots
            .get(&id)
            .map(|&slot| &self.entries[slot].1)
            .ok_or(SceneError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Result<&mut O, SceneError> {
        match self.slots.get(&id) {
            Some(&slot) => Ok(&mut self.entries[slot].1),
            None => Err(SceneError::NotFound(id)),
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &O)> {
        self.entries.iter().map(|(id, object)| (*id, object))
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickscene_common::Rgba;

    fn view(key: &str) -> View {
        View::new(key, Rgba::WHITE)
    }

    #[test]
    fn add_then_get_returns_same_object() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), view("tri"));
        let first: *const View = registry.get(ObjectId(1)).unwrap();
        let second: *const View = registry.get(ObjectId(1)).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(registry.get(ObjectId(1)).unwrap().model_key(), "tri");
    }

    #[test]
    fn get_absent_is_not_found() {
        let registry: ObjectRegistry = ObjectRegistry::new();
        match registry.get(ObjectId(9)) {
            Err(SceneError::NotFound(id)) => assert_eq!(id, ObjectId(9)),
            Ok(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn remove_then_get_fails() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), view("tri"));
        assert!(registry.remove(ObjectId(1)).is_some());
        assert!(matches!(
            registry.get(ObjectId(1)),
            Err(SceneError::NotFound(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), view("tri"));
        assert!(registry.remove(ObjectId(2)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_add_overwrites_in_place() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(1), view("a"));
        registry.add(ObjectId(2), view("b"));
        let old = registry.add(ObjectId(1), view("c"));
        assert_eq!(old.unwrap().model_key(), "a");
        assert_eq!(registry.get(ObjectId(1)).unwrap().model_key(), "c");
        assert_eq!(registry.len(), 2);
        let ids: Vec<ObjectId> = registry.ids().collect();
        assert_eq!(ids, vec![ObjectId(1), ObjectId(2)]);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut registry = ObjectRegistry::new();
        for raw in [5, 1, 9, 3] {
            registry.add(ObjectId(raw), view("tri"));
        }
        let ids: Vec<u32> = registry.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![5, 1, 9, 3]);
    }

    #[test]
    fn removal_keeps_remaining_order_and_lookups() {
        let mut registry = ObjectRegistry::new();
        for raw in [5, 1, 9, 3] {
            registry.add(ObjectId(raw), view(&format!("m{raw}")));
        }
        registry.remove(ObjectId(1));
        let ids: Vec<u32> = registry.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![5, 9, 3]);
        assert_eq!(registry.get(ObjectId(9)).unwrap().model_key(), "m9");
        assert_eq!(registry.get(ObjectId(3)).unwrap().model_key(), "m3");

        registry.add(ObjectId(1), view("again"));
        let ids: Vec<u32> = registry.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![5, 9, 3, 1]);
    }

    #[test]
    fn get_mut_allows_transform_updates() {
        let mut registry = ObjectRegistry::new();
        registry.add(ObjectId(4), view("tri"));
        registry.get_mut(ObjectId(4)).unwrap().translate(1.0, 0.0, 0.0);
        let t = registry.get(ObjectId(4)).unwrap().transform();
        assert_eq!(t.w_axis.x, 1.0);
        assert!(registry.get_mut(ObjectId(5)).is_err());
    }
}
