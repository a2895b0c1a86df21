//! Void Engine Editor - headless runner
//!
//! Builds a small scene, makes an undoable edit, simulates it in play mode
//! and rolls it back. Pass a TOML config path as the first argument to
//! override the defaults.

use glam::Vec3;
use void_editor::prelude::*;

const FRAME_TIME: f32 = 1.0 / 60.0;
const PLAY_FRAMES: usize = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("{} v{}", void_editor::NAME, void_editor::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };

    let mut editor = EditorState::with_config(config);
    editor.play_state.on_state_changed(|from, to| {
        log::info!("State changed: {} -> {}", from, to);
    });

    if let Err(e) = build_scene(&mut editor) {
        log::error!("Failed to build scene: {}", e);
        std::process::exit(1);
    }
    log::info!(
        "Scene ready: {} objects, {} lights, {} bodies",
        editor.scene.len(),
        editor.scene.lights().len(),
        editor.scene.physics().world().body_count()
    );

    let Some(crate_box) = editor.scene.find_by_name("Crate") else {
        log::error!("Demo crate missing");
        std::process::exit(1);
    };
    let start = editor.scene.world_position(crate_box).unwrap_or(Vec3::ZERO);

    editor.play();
    let mut steps = 0;
    for _ in 0..PLAY_FRAMES {
        steps += editor.update(FRAME_TIME);
    }
    let landed = editor.scene.world_position(crate_box).unwrap_or(Vec3::ZERO);
    log::info!("Simulated {} steps; crate moved from {} to {}", steps, start, landed);

    editor.pause();
    editor.frame_step();
    editor.update(FRAME_TIME);

    editor.stop();
    let restored = editor.scene.world_position(crate_box).unwrap_or(Vec3::ZERO);
    log::info!("Back in edit mode; crate restored to {}", restored);

    while editor.undo() {}
    log::info!(
        "Undid all edits; {} objects remain, {} redo steps available",
        editor.scene.len(),
        editor.history.redo_count()
    );
}

fn build_scene(editor: &mut EditorState) -> CommandResult {
    editor.history.begin_transaction("Build Demo Scene");

    let ground = CreateAction::new("Ground", ObjectKind::Primitive(PrimitiveShape::Plane))
        .with_transform(Transform::new().with_scale(Vec3::new(20.0, 1.0, 20.0)))
        .with_physics(PhysicsSettings::new(RigidBodyType::Static, ShapeKind::Plane));
    editor.execute(ground)?;

    let crate_box = CreateAction::new("Crate", ObjectKind::Primitive(PrimitiveShape::Cube))
        .with_transform(Transform::from_position(Vec3::new(0.0, 5.0, 0.0)))
        .with_physics(PhysicsSettings::new(RigidBodyType::Dynamic, ShapeKind::Box).with_mass(2.0));
    editor.execute(crate_box)?;

    let ball = CreateAction::new("Ball", ObjectKind::Primitive(PrimitiveShape::Sphere))
        .with_transform(Transform::from_position(Vec3::new(1.5, 8.0, 0.0)))
        .with_physics(
            PhysicsSettings::new(RigidBodyType::Dynamic, ShapeKind::Sphere).with_restitution(0.6),
        );
    editor.execute(ball)?;

    let sun = CreateAction::new("Sun", ObjectKind::Light(LightKind::Directional))
        .with_transform(Transform::new().with_rotation(Vec3::new(-0.8, 0.3, 0.0)));
    editor.execute(sun)?;

    editor.history.commit_transaction();

    // A marker that follows the crate
    let marker = CreateAction::new("Marker", ObjectKind::Empty)
        .with_transform(Transform::from_position(Vec3::new(0.0, 6.0, 0.0)));
    editor.execute(marker)?;

    if let (Some(marker), Some(crate_box)) = (
        editor.scene.find_by_name("Marker"),
        editor.scene.find_by_name("Crate"),
    ) {
        editor.execute(ParentAction::new(marker, Some(crate_box)))?;
    }

    Ok(())
}
