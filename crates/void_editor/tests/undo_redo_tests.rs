//! Undo/redo tests for void_editor
//!
//! Every recorded edit must be exactly reversible and exactly repeatable.

use glam::Vec3;
use void_editor::*;

/// Structural and transform state of a scene, comparable with `==`
#[derive(Debug, PartialEq)]
struct Captured {
    order: Vec<Entity>,
    lights: Vec<Entity>,
    objects: Vec<(Entity, String, Option<Entity>, Vec<Entity>, Transform, bool)>,
}

fn capture(scene: &Scene) -> Captured {
    Captured {
        order: scene.object_ids().to_vec(),
        lights: scene.lights().to_vec(),
        objects: scene
            .objects()
            .map(|o| {
                (
                    o.entity(),
                    o.name.clone(),
                    o.parent(),
                    o.children().to_vec(),
                    o.local_transform(),
                    scene.has_physics(o.entity()),
                )
            })
            .collect(),
    }
}

fn create(editor: &mut EditorState, action: CreateAction) -> Entity {
    let mut action = action;
    action.redo(&mut editor.scene).unwrap();
    let entity = action.created_entity().unwrap();
    editor.record(action);
    entity
}

/// INVARIANT: N undos followed by N redos restore the exact pre-undo state
#[test]
fn invariant_undo_then_redo_round_trip() {
    let mut editor = EditorState::new();

    let ground = create(
        &mut editor,
        CreateAction::new("Ground", ObjectKind::Primitive(PrimitiveShape::Plane))
            .with_transform(Transform::new().with_scale(Vec3::new(10.0, 1.0, 10.0)))
            .with_physics(PhysicsSettings::new(RigidBodyType::Static, ShapeKind::Plane)),
    );
    let lamp = create(
        &mut editor,
        CreateAction::new("Lamp", ObjectKind::Light(LightKind::Point))
            .with_transform(Transform::from_position(Vec3::new(0.0, 4.0, 0.0))),
    );
    let crate_box = create(
        &mut editor,
        CreateAction::new("Crate", ObjectKind::Primitive(PrimitiveShape::Cube))
            .with_transform(Transform::from_position(Vec3::new(2.0, 1.0, 0.0)))
            .with_physics(PhysicsSettings::default()),
    );

    let moved = TransformAction::capture(
        &editor.scene,
        crate_box,
        Transform::new()
            .with_position(Vec3::new(3.0, 2.0, 1.0))
            .with_rotation(Vec3::new(0.0, 0.7, 0.0)),
    )
    .unwrap();
    editor.execute(moved).unwrap();
    editor.execute(ParentAction::new(crate_box, Some(lamp))).unwrap();
    editor
        .execute(TransformAction::moved(&editor.scene, lamp, Vec3::new(-1.0, 6.0, 2.0)).unwrap())
        .unwrap();
    editor.execute(DeleteAction::new(lamp)).unwrap();
    editor.execute(ParentAction::new(crate_box, Some(ground))).unwrap();

    let n = editor.history.undo_count();
    assert_eq!(n, 8);
    let before_undo = capture(&editor.scene);

    for _ in 0..n {
        assert!(editor.undo());
    }
    assert!(editor.scene.is_empty());
    assert!(!editor.undo());

    for _ in 0..n {
        assert!(editor.redo());
    }
    assert!(!editor.redo());
    assert_eq!(capture(&editor.scene), before_undo);
}

/// INVARIANT: undoing a delete puts the object back at its list index
#[test]
fn invariant_delete_undo_restores_index() {
    let mut editor = EditorState::new();
    let ids: Vec<Entity> = (0..5)
        .map(|i| editor.scene.create_object(format!("Object{}", i), ObjectKind::Empty))
        .collect();

    for (index, &entity) in ids.iter().enumerate() {
        editor.execute(DeleteAction::new(entity)).unwrap();
        assert!(!editor.scene.contains(entity));
        assert!(editor.undo());
        assert_eq!(editor.scene.index_of(entity), Some(index));
        assert_eq!(editor.scene.object_ids(), ids.as_slice());
    }
}

/// INVARIANT: the light list follows deletes and restores in lockstep
#[test]
fn invariant_lights_follow_delete_undo() {
    let mut editor = EditorState::new();
    let sun = editor
        .scene
        .create_object("Sun", ObjectKind::Light(LightKind::Directional));
    editor.scene.create_object("Cube", ObjectKind::Primitive(PrimitiveShape::Cube));
    let lamp = editor.scene.create_object("Lamp", ObjectKind::Light(LightKind::Point));
    let spot = editor.scene.create_object("Spot", ObjectKind::Light(LightKind::Spot));

    editor.execute(DeleteAction::new(lamp)).unwrap();
    editor.execute(DeleteAction::new(sun)).unwrap();
    assert_eq!(editor.scene.lights(), &[spot]);

    editor.undo();
    assert_eq!(editor.scene.lights(), &[sun, spot]);
    editor.undo();
    assert_eq!(editor.scene.lights(), &[sun, lamp, spot]);
}

#[test]
fn delete_undo_restores_hierarchy_and_physics() {
    let mut editor = EditorState::new();
    let parent = editor.scene.create_object_with(
        "Parent",
        ObjectKind::Primitive(PrimitiveShape::Cube),
        Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
    );
    let child = editor.scene.create_object_with(
        "Child",
        ObjectKind::Primitive(PrimitiveShape::Sphere),
        Transform::from_position(Vec3::new(1.0, 3.0, 0.0)),
    );
    let grandparent = editor.scene.create_object("Root", ObjectKind::Empty);
    editor.scene.set_parent(child, parent);
    editor.scene.set_parent(parent, grandparent);
    editor
        .scene
        .enable_physics(parent, RigidBodyType::Dynamic)
        .unwrap();
    let child_local = editor.scene.local_transform(child).unwrap();

    editor.execute(DeleteAction::new(parent)).unwrap();
    assert_eq!(editor.scene.physics().world().body_count(), 0);
    assert_eq!(editor.scene.parent_of(child), None);
    assert!(editor.scene.children_of(grandparent).is_empty());

    assert!(editor.undo());
    assert!(editor.scene.has_physics(parent));
    assert_eq!(editor.scene.physics().world().body_count(), 1);
    assert_eq!(editor.scene.parent_of(parent), Some(grandparent));
    assert_eq!(editor.scene.children_of(parent), &[child]);
    assert_eq!(editor.scene.local_transform(child), Some(child_local));
}

#[test]
fn parent_action_undo_restores_previous_parent() {
    let mut editor = EditorState::new();
    let a = editor.scene.create_object("A", ObjectKind::Empty);
    let b = editor.scene.create_object_with(
        "B",
        ObjectKind::Empty,
        Transform::new()
            .with_position(Vec3::new(1.0, 1.0, 1.0))
            .with_rotation(Vec3::new(0.0, 0.0, 0.4)),
    );
    let c = editor.scene.create_object_with(
        "C",
        ObjectKind::Empty,
        Transform::new().with_scale(Vec3::splat(3.0)),
    );
    let leaf = editor.scene.create_object_with(
        "Leaf",
        ObjectKind::Empty,
        Transform::from_position(Vec3::new(2.0, 0.0, 0.0)),
    );
    editor.scene.set_parent(leaf, a);
    editor.scene.set_parent(b, a);
    let original = capture(&editor.scene);
    let world = editor.scene.world_transform(leaf).unwrap();

    editor.execute(ParentAction::new(leaf, Some(c))).unwrap();
    assert_eq!(editor.scene.parent_of(leaf), Some(c));

    assert!(editor.undo());
    assert_eq!(capture(&editor.scene), original);
    assert_eq!(editor.scene.children_of(a), &[leaf, b]);
    assert_eq!(editor.scene.world_transform(leaf), Some(world));
}

#[test]
fn self_and_cyclic_parenting_are_not_recorded() {
    let mut editor = EditorState::new();
    let a = editor.scene.create_object("A", ObjectKind::Empty);
    let b = editor.scene.create_object("B", ObjectKind::Empty);
    editor.execute(ParentAction::new(b, Some(a))).unwrap();

    assert!(editor.execute(ParentAction::new(a, Some(a))).is_err());
    assert!(editor.execute(ParentAction::new(a, Some(b))).is_err());
    assert_eq!(editor.history.undo_count(), 1);
    assert_eq!(editor.scene.parent_of(a), None);
}

#[test]
fn gesture_recorded_once_at_end() {
    let mut editor = EditorState::new();
    let e = editor.scene.create_object("Dragged", ObjectKind::Empty);
    let start = editor.scene.local_transform(e).unwrap();

    // Continuous drag applies directly
    for step in 1..=10 {
        editor.scene.set_position(e, Vec3::new(step as f32, 0.0, 0.0));
    }
    let action = TransformAction::from_gesture(&editor.scene, e, start).unwrap();
    editor.record(action);

    assert_eq!(editor.history.undo_count(), 1);
    assert!(editor.undo());
    assert_eq!(editor.scene.position(e), Some(Vec3::ZERO));
    assert!(editor.redo());
    assert_eq!(editor.scene.position(e), Some(Vec3::new(10.0, 0.0, 0.0)));
}

#[test]
fn history_limit_discards_oldest() {
    let mut editor = EditorState::new();
    let e = editor.scene.create_object("A", ObjectKind::Empty);
    let limit = editor.history.max_size();

    for i in 0..limit + 10 {
        let action = TransformAction::moved(&editor.scene, e, Vec3::new(i as f32, 0.0, 0.0)).unwrap();
        editor.execute(action).unwrap();
    }
    assert_eq!(editor.history.undo_count(), limit);

    while editor.undo() {}
    assert_eq!(editor.scene.position(e), Some(Vec3::new(9.0, 0.0, 0.0)));
}

/// INVARIANT: a group that fails part way leaves the scene and history untouched
#[test]
fn invariant_failed_group_is_reverted() {
    let mut editor = EditorState::new();
    let group = ActionGroup::new("Spawn And Clean Up")
        .with(CreateAction::new("A", ObjectKind::Empty))
        .with(DeleteAction::new(Entity::from_raw(999)));

    let result = editor.execute(group);
    assert_eq!(result, Err(EditorError::ObjectNotFound(Entity::from_raw(999))));
    assert!(editor.scene.is_empty());
    assert!(!editor.history.can_undo());
}

#[test]
fn failed_group_undo_keeps_group_applied() {
    let mut editor = EditorState::new();
    let a = editor.scene.create_object("A", ObjectKind::Empty);
    let b = editor.scene.create_object("B", ObjectKind::Empty);

    editor.history.begin_transaction("Move B, Delete A");
    editor
        .execute(TransformAction::moved(&editor.scene, b, Vec3::new(2.0, 0.0, 0.0)).unwrap())
        .unwrap();
    editor.execute(DeleteAction::new(a)).unwrap();
    editor.history.commit_transaction();

    // B disappears outside history, so the group can no longer be undone
    editor.scene.destroy_object(b);

    for _ in 0..2 {
        assert!(!editor.undo());
        assert!(!editor.scene.contains(a));
        assert_eq!(editor.history.undo_count(), 1);
        assert_eq!(editor.history.undo_description(), Some("Move B, Delete A"));
    }
}

#[test]
fn rollback_reverts_whole_transaction() {
    let mut editor = EditorState::new();
    let a = editor.scene.create_object("A", ObjectKind::Empty);

    editor.history.begin_transaction("Scratch");
    editor
        .execute(CreateAction::new("Temp", ObjectKind::Empty))
        .unwrap();
    editor
        .execute(TransformAction::moved(&editor.scene, a, Vec3::ONE).unwrap())
        .unwrap();

    editor.history.rollback_transaction(&mut editor.scene).unwrap();
    assert_eq!(editor.scene.object_ids(), &[a]);
    assert_eq!(editor.scene.position(a), Some(Vec3::ZERO));
    assert!(!editor.history.can_undo());
}
