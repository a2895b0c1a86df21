//! Component store keyed by entity

use void_ecs::{ComponentStorage, Entity};

use super::{ComponentKind, MaterialComponent, PhysicsComponent, TransformComponent};

/// Maps a component type to its storage inside [`ComponentStore`]
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn storage(store: &ComponentStore) -> &ComponentStorage<Self>;

    fn storage_mut(store: &mut ComponentStore) -> &mut ComponentStorage<Self>;
}

impl Component for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn storage(store: &ComponentStore) -> &ComponentStorage<Self> {
        &store.transforms
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut ComponentStorage<Self> {
        &mut store.transforms
    }
}

impl Component for PhysicsComponent {
    const KIND: ComponentKind = ComponentKind::Physics;

    fn storage(store: &ComponentStore) -> &ComponentStorage<Self> {
        &store.physics
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut ComponentStorage<Self> {
        &mut store.physics
    }
}

impl Component for MaterialComponent {
    const KIND: ComponentKind = ComponentKind::Material;

    fn storage(store: &ComponentStore) -> &ComponentStorage<Self> {
        &store.materials
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut ComponentStorage<Self> {
        &mut store.materials
    }
}

/// Per-kind component arenas.
///
/// Registration is idempotent and implied by the first `add` of a kind.
/// At most one component of each kind exists per entity.
#[derive(Debug, Default)]
pub struct ComponentStore {
    transforms: ComponentStorage<TransformComponent>,
    physics: ComponentStorage<PhysicsComponent>,
    materials: ComponentStorage<MaterialComponent>,
    registered: Vec<ComponentKind>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component kind. Returns false if it was already registered.
    pub fn register<T: Component>(&mut self) -> bool {
        if self.registered.contains(&T::KIND) {
            return false;
        }
        log::debug!("Registered component kind {}", T::KIND.name());
        self.registered.push(T::KIND);
        true
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.registered.contains(&T::KIND)
    }

    /// Registered kinds in registration order
    pub fn registered_kinds(&self) -> &[ComponentKind] {
        &self.registered
    }

    /// Attach a component, replacing and returning any existing one
    pub fn add<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        self.register::<T>();
        T::storage_mut(self).insert(entity, component)
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(self).remove(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::storage(self).get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        T::storage(self).contains(entity)
    }

    /// Number of components of one kind
    pub fn len<T: Component>(&self) -> usize {
        T::storage(self).len()
    }

    /// Entities carrying a component of one kind
    pub fn entities<T: Component>(&self) -> &[Entity] {
        T::storage(self).entities()
    }

    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> {
        T::storage(self).iter()
    }

    /// Strip every component from an entity. Returns how many were removed.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        let mut removed = 0;
        for kind in &self.registered {
            let had = match kind {
                ComponentKind::Transform => self.transforms.remove(entity).is_some(),
                ComponentKind::Physics => self.physics.remove(entity).is_some(),
                ComponentKind::Material => self.materials.remove(entity).is_some(),
            };
            if had {
                removed += 1;
            }
        }
        removed
    }

    /// Kinds currently attached to an entity
    pub fn kinds_of(&self, entity: Entity) -> Vec<ComponentKind> {
        self.registered
            .iter()
            .copied()
            .filter(|kind| match kind {
                ComponentKind::Transform => self.transforms.contains(entity),
                ComponentKind::Physics => self.physics.contains(entity),
                ComponentKind::Material => self.materials.contains(entity),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.transforms.clear();
        self.physics.clear();
        self.materials.clear();
    }
}
