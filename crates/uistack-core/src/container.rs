#![forbid(unsafe_code)]

//! Ordered owner of a manager's components.
//!
//! Order is meaningful: for menus it is the materialization order walked by
//! previous/next, for modals it is the z-order (last is on top).
//!
//! # Invariants
//!
//! - Every component is awoken exactly once, when it is attached.
//! - Ids are unique within the container.
//! - Destroyed components stay in place until [`Container::reap`] runs.
//!
//! # Failure Modes
//!
//! - Lookups of a foreign id return `None` (no panic).
//! - `remove`/`bring_to_front` of a foreign id are no-ops returning `None`/`false`.

use std::time::Duration;

use crate::component::{Behavior, ComponentId, UiComponent};

/// Components in insertion (or z) order.
#[derive(Debug, Default)]
pub struct Container {
    components: Vec<UiComponent>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component and run its first-attach hook.
    pub fn attach(&mut self, mut component: UiComponent) -> ComponentId {
        let id = component.id();
        tracing::trace!(component = %component.name(), %id, "component attached");
        component.awake();
        self.components.push(component);
        id
    }

    /// Position of `id`, if present.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ComponentId) -> Option<&UiComponent> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut UiComponent> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// Component at `index`.
    pub fn at(&self, index: usize) -> Option<&UiComponent> {
        self.components.get(index)
    }

    /// First live component with behavior `T`, matching `name` when given.
    pub fn find<T: Behavior>(&self, name: Option<&str>) -> Option<ComponentId> {
        let name = name.filter(|n| !n.is_empty());
        self.components
            .iter()
            .filter(|c| !c.is_destroyed() && c.is::<T>())
            .find(|c| name.is_none_or(|n| c.name() == n))
            .map(UiComponent::id)
    }

    /// Move `id` to the end (top of the z-order).
    pub fn bring_to_front(&mut self, id: ComponentId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let component = self.components.remove(index);
        self.components.push(component);
        true
    }

    /// Detach a component and hand it back.
    pub fn remove(&mut self, id: ComponentId) -> Option<UiComponent> {
        let index = self.index_of(id)?;
        Some(self.components.remove(index))
    }

    /// Drop every destroyed component, returning their ids.
    pub fn reap(&mut self) -> Vec<ComponentId> {
        let mut reaped = Vec::new();
        self.components.retain(|c| {
            if c.is_destroyed() {
                reaped.push(c.id());
                false
            } else {
                true
            }
        });
        if !reaped.is_empty() {
            tracing::trace!(count = reaped.len(), "destroyed components reaped");
        }
        reaped
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &UiComponent> + ExactSizeIterator {
        self.components.iter()
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut UiComponent> + ExactSizeIterator {
        self.components.iter_mut()
    }

    /// Ids in container order.
    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(UiComponent::id).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Tick every component.
    pub fn update(&mut self, dt: Duration) {
        for component in &mut self.components {
            component.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Behavior for Empty {
        fn build(&mut self) {}
        fn clear(&mut self) {}
    }

    struct Other;

    impl Behavior for Other {
        fn build(&mut self) {}
        fn clear(&mut self) {}
    }

    fn filled() -> (Container, Vec<ComponentId>) {
        let mut container = Container::new();
        let ids = vec![
            container.attach(UiComponent::new("a", Empty)),
            container.attach(UiComponent::new("b", Other)),
            container.attach(UiComponent::new("c", Empty)),
        ];
        (container, ids)
    }

    #[test]
    fn attach_keeps_order() {
        let (container, ids) = filled();
        assert_eq!(container.ids(), ids);
        assert_eq!(container.index_of(ids[2]), Some(2));
        assert_eq!(container.at(1).map(UiComponent::name), Some("b"));
    }

    #[test]
    fn attach_awakes_component() {
        let mut container = Container::new();
        let id = container.attach(UiComponent::new("a", Empty).with_show_on_create(true));
        assert!(container.get(id).is_some_and(UiComponent::is_active));
    }

    #[test]
    fn find_by_type_and_name() {
        let (container, ids) = filled();
        assert_eq!(container.find::<Empty>(None), Some(ids[0]));
        assert_eq!(container.find::<Empty>(Some("c")), Some(ids[2]));
        assert_eq!(container.find::<Other>(Some("a")), None);
    }

    #[test]
    fn bring_to_front_moves_last() {
        let (mut container, ids) = filled();
        assert!(container.bring_to_front(ids[0]));
        assert_eq!(container.ids(), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn reap_drops_destroyed_only() {
        let (mut container, ids) = filled();
        if let Some(component) = container.get_mut(ids[1]) {
            component.destroy();
        }
        assert_eq!(container.find::<Other>(None), None);
        assert_eq!(container.reap(), vec![ids[1]]);
        assert_eq!(container.ids(), vec![ids[0], ids[2]]);
        assert!(container.reap().is_empty());
    }

    #[test]
    fn prefix_walks_backwards() {
        let (container, ids) = filled();
        let below: Vec<_> = container.iter().take(2).rev().map(UiComponent::id).collect();
        assert_eq!(below, vec![ids[1], ids[0]]);
        assert_eq!(container.iter().len(), 3);
    }

    #[test]
    fn foreign_ids_are_harmless() {
        let (mut container, _) = filled();
        let stranger = UiComponent::new("x", Empty).id();
        assert!(container.get(stranger).is_none());
        assert!(container.remove(stranger).is_none());
        assert!(!container.bring_to_front(stranger));
        assert_eq!(container.len(), 3);
    }
}
