//! Hierarchy and component store tests for void_editor
//!
//! Re-parenting must never move an object in world space.

use approx::assert_relative_eq;
use glam::Vec3;
use void_editor::*;

fn assert_vec3_eq(a: Vec3, b: Vec3) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
}

/// A at the origin, B at (5,0,0): parenting A under B gives A a local
/// offset of (-5,0,0) and clearing the parent gives it back the origin.
#[test]
fn parent_and_unparent_at_offset() {
    let mut scene = Scene::default();
    let a = scene.create_object("A", ObjectKind::Empty);
    let b = scene.create_object_with(
        "B",
        ObjectKind::Empty,
        Transform::from_position(Vec3::new(5.0, 0.0, 0.0)),
    );

    assert!(scene.set_parent(a, b));
    assert_vec3_eq(scene.position(a).unwrap(), Vec3::new(-5.0, 0.0, 0.0));
    assert_vec3_eq(scene.world_position(a).unwrap(), Vec3::ZERO);

    assert!(scene.remove_parent(a));
    assert_vec3_eq(scene.position(a).unwrap(), Vec3::ZERO);
    assert_eq!(scene.parent_of(a), None);
    assert!(scene.children_of(b).is_empty());
}

/// INVARIANT: world position, rotation and scale survive re-parenting
#[test]
fn invariant_reparent_preserves_world_placement() {
    let mut scene = Scene::default();
    let parents = [
        Transform {
            position: Vec3::new(1.0, -2.0, 3.0),
            rotation: Vec3::new(0.3, 0.0, 0.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        },
        Transform {
            position: Vec3::new(-4.0, 0.5, 0.0),
            rotation: Vec3::new(0.0, 1.1, 0.0),
            scale: Vec3::new(1.0, 0.5, 3.0),
        },
        Transform {
            position: Vec3::new(0.0, 0.0, 7.0),
            rotation: Vec3::new(0.0, 0.0, -0.6),
            scale: Vec3::ONE,
        },
    ];
    let parent_ids: Vec<Entity> = parents
        .iter()
        .enumerate()
        .map(|(i, t)| scene.create_object_with(format!("Parent{}", i), ObjectKind::Empty, *t))
        .collect();

    let child = scene.create_object_with(
        "Child",
        ObjectKind::Primitive(PrimitiveShape::Cube),
        Transform {
            position: Vec3::new(2.0, 3.0, -1.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            scale: Vec3::new(1.5, 1.0, 0.5),
        },
    );

    for &parent in &parent_ids {
        let before = scene.world_transform(child).unwrap();
        assert!(scene.set_parent(child, parent));
        let after = scene.world_transform(child).unwrap();

        assert_vec3_eq(after.position, before.position);
        assert_vec3_eq(after.rotation, before.rotation);
        assert_vec3_eq(after.scale, before.scale);
        assert_eq!(scene.parent_of(child), Some(parent));
    }

    let before = scene.world_transform(child).unwrap();
    assert!(scene.remove_parent(child));
    let after = scene.world_transform(child).unwrap();
    assert_vec3_eq(after.position, before.position);
    assert_vec3_eq(after.scale, before.scale);
}

/// INVARIANT: parent and child links always agree
#[test]
fn invariant_links_are_bidirectional() {
    let mut scene = Scene::default();
    let a = scene.create_object("A", ObjectKind::Empty);
    let b = scene.create_object("B", ObjectKind::Empty);
    let c = scene.create_object("C", ObjectKind::Empty);

    scene.set_parent(c, a);
    scene.set_parent(c, b);
    scene.set_parent(a, b);

    for object in scene.objects() {
        for &child in object.children() {
            assert_eq!(scene.parent_of(child), Some(object.entity()));
        }
        if let Some(parent) = object.parent() {
            assert!(scene.children_of(parent).contains(&object.entity()));
        }
    }
    assert_eq!(scene.children_of(b), &[c, a]);
    assert!(scene.children_of(a).is_empty());
}

#[test]
fn moving_parent_moves_children_in_world() {
    let mut scene = Scene::default();
    let parent = scene.create_object("Parent", ObjectKind::Empty);
    let child = scene.create_object_with(
        "Child",
        ObjectKind::Empty,
        Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
    );
    scene.set_parent(child, parent);

    scene.set_position(parent, Vec3::new(0.0, 10.0, 0.0));
    assert_vec3_eq(scene.world_position(child).unwrap(), Vec3::new(1.0, 10.0, 0.0));
    assert_vec3_eq(scene.position(child).unwrap(), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn set_world_transform_under_parent() {
    let mut scene = Scene::default();
    let parent = scene.create_object_with(
        "Parent",
        ObjectKind::Empty,
        Transform::new()
            .with_position(Vec3::new(3.0, 0.0, 0.0))
            .with_scale(Vec3::splat(2.0)),
    );
    let child = scene.create_object("Child", ObjectKind::Empty);
    scene.set_parent(child, parent);

    let target = Transform::new()
        .with_position(Vec3::new(-1.0, 4.0, 2.0))
        .with_rotation(Vec3::new(0.0, 0.5, 0.0))
        .with_scale(Vec3::splat(4.0));
    assert!(scene.set_world_transform(child, target));

    let world = scene.world_transform(child).unwrap();
    assert_vec3_eq(world.position, target.position);
    assert_vec3_eq(world.rotation, target.rotation);
    assert_vec3_eq(world.scale, target.scale);
    assert_vec3_eq(scene.scale(child).unwrap(), Vec3::splat(2.0));
}

/// INVARIANT: after add, get returns the value until remove or remove_entity
#[test]
fn invariant_component_store_add_get() {
    let mut scene = Scene::default();
    let e = scene.create_object("Cube", ObjectKind::Primitive(PrimitiveShape::Cube));
    let material = MaterialComponent {
        base_color: [0.1, 0.2, 0.3, 1.0],
        metallic: 1.0,
        roughness: 0.25,
    };

    assert!(scene.set_material(e, material));
    assert_eq!(scene.components().get::<MaterialComponent>(e), Some(&material));

    scene.set_position(e, Vec3::new(1.0, 2.0, 3.0));
    let mirrored = scene.components().get::<TransformComponent>(e).copied();
    assert_eq!(mirrored.map(|t| t.position), Some([1.0, 2.0, 3.0]));

    assert!(scene.destroy_object(e));
    assert_eq!(scene.components().get::<MaterialComponent>(e), None);
    assert_eq!(scene.components().get::<TransformComponent>(e), None);
}

#[test]
fn stale_entity_resolves_to_nothing() {
    let mut scene = Scene::default();
    let e = scene.create_object("Gone", ObjectKind::Empty);
    scene.destroy_object(e);

    assert!(scene.object(e).is_none());
    assert!(scene.world_position(e).is_none());
    assert!(!scene.set_position(e, Vec3::ONE));
    assert!(!scene.set_parent(e, e));
}
