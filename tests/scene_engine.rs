//! End-to-end behavior of [`SceneEngine`] driven through its public API,
//! with a recording renderer standing in for the GPU.

use std::fmt;

use glam::Vec3;
use moonscape::animation::{FrameRenderer, FrameScheduler};
use moonscape::scene::{Light, Material, SceneContext, SceneObject};
use moonscape::{InputEvent, Options, SceneEngine, WheelDelta};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug)]
struct DeviceLost;

impl fmt::Display for DeviceLost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("device lost")
    }
}

/// Records the torus rotation seen by each render call.
#[derive(Default)]
struct Recorder {
    rotations: Vec<Vec3>,
    fail: bool,
}

impl FrameRenderer for Recorder {
    type Error = DeviceLost;

    fn render(&mut self, ctx: &SceneContext) -> Result<(), DeviceLost> {
        if let Some(torus) = ctx.torus() {
            self.rotations.push(torus.transform.rotation);
        }
        if self.fail {
            Err(DeviceLost)
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct Requests(u32);

impl FrameScheduler for Requests {
    fn request_frame(&mut self) {
        self.0 += 1;
    }
}

fn engine(seed: u64) -> SceneEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    SceneEngine::with_rng(Options::default(), (1280, 720), &mut rng)
}

#[test]
fn stock_scene_layout() {
    let engine = engine(1);
    let ctx = engine.context();
    assert_eq!(ctx.scene.len(), 204);
    assert_eq!(ctx.stars.len(), 200);
    assert_eq!(ctx.scene.lights().count(), 2);
    assert!(ctx.scene.background().is_some());

    let Some(SceneObject::Mesh(torus)) = ctx.scene.get(ctx.torus) else {
        panic!("torus missing");
    };
    assert!(torus.material.is_wireframe());

    let Some(moon) = ctx.moon() else {
        panic!("moon missing");
    };
    assert!(matches!(moon.material, Material::Standard(_)));
    assert_eq!(moon.transform.position, Vec3::new(-10.0, 0.0, 30.0));
}

#[test]
fn stars_stay_inside_spread() {
    let engine = engine(2);
    let ctx = engine.context();
    for id in &ctx.stars {
        let Some(star) = ctx.scene.mesh(*id) else {
            panic!("star {id:?} missing");
        };
        let p = star.transform.position;
        assert!(p.abs().max_element() <= 50.0, "{p:?}");
    }
}

#[test]
fn same_seed_same_sky() {
    let star_positions = |engine: &SceneEngine| -> Vec<Vec3> {
        let ctx = engine.context();
        ctx.stars
            .iter()
            .filter_map(|id| ctx.scene.mesh(*id))
            .map(|m| m.transform.position)
            .collect()
    };
    assert_eq!(star_positions(&engine(3)), star_positions(&engine(3)));
    assert_ne!(star_positions(&engine(3)), star_positions(&engine(4)));
}

#[test]
fn construction_applies_scroll_at_rest() {
    let engine = engine(5);
    assert_eq!(engine.scroll_offset(), 0.0);
    assert_eq!(engine.camera().position.x, 0.0);
    assert_eq!(engine.camera().position.z, 0.0);
    assert_eq!(engine.camera().rotation.y, 0.0);
    assert_eq!(engine.camera().aspect, 1280.0 / 720.0);
    // One scroll update has already stepped the moon.
    let rotation = engine.context().moon().map(|m| m.transform.rotation);
    assert_eq!(rotation, Some(Vec3::new(0.05, 0.075, 0.05)));
}

#[test]
fn every_frame_steps_torus_and_reschedules() {
    let mut engine = engine(6);
    let mut renderer = Recorder::default();
    let mut scheduler = Requests::default();

    for _ in 0..3 {
        engine.frame(&mut renderer, &mut scheduler).unwrap();
    }

    assert_eq!(scheduler.0, 3);
    assert_eq!(engine.frame_count(), 3);
    assert_eq!(renderer.rotations.len(), 3);
    let last = renderer.rotations[2];
    assert!((last - Vec3::new(0.03, 0.015, 0.03)).abs().max_element() < 1e-6);
}

#[test]
fn render_failure_still_schedules_next_frame() {
    let mut engine = engine(7);
    let mut renderer = Recorder {
        fail: true,
        ..Recorder::default()
    };
    let mut scheduler = Requests::default();

    assert!(engine.frame(&mut renderer, &mut scheduler).is_err());
    assert!(engine.frame(&mut renderer, &mut scheduler).is_err());
    assert_eq!(scheduler.0, 2);
    assert_eq!(engine.frame_count(), 2);
}

#[test]
fn scroll_samples_move_the_camera() {
    let mut engine = engine(8);
    assert!(engine.handle_input(InputEvent::Scroll { offset: -2000.0 }));
    let camera = engine.camera();
    assert_eq!(camera.position.z, -2000.0 * -0.01);
    assert_eq!(camera.position.x, -2000.0 * -0.0002);
    assert_eq!(camera.rotation.y, -2000.0 * -0.0002);

    // Frames leave the camera alone.
    let mut renderer = Recorder::default();
    engine.frame(&mut renderer, &mut Requests::default()).unwrap();
    assert_eq!(engine.camera().position.z, -2000.0 * -0.01);
}

#[test]
fn wheel_is_clamped_to_document() {
    let mut engine = engine(9);
    let document = engine.options().display.document_height;

    assert!(!engine.handle_input(InputEvent::Wheel {
        delta: WheelDelta::Lines(3.0),
    }));
    assert_eq!(engine.scroll_offset(), 0.0);

    let _ = engine.handle_input(InputEvent::Wheel {
        delta: WheelDelta::Pixels(-1.0e6),
    });
    assert_eq!(engine.scroll_offset(), -(document - 720.0));
}

#[test]
fn options_flow_through_toml() {
    let options = Options::from_toml_str(
        "[starfield]\ncount = 12\n\n[camera]\nfovy = 60.0\n",
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(10);
    let engine = SceneEngine::with_rng(options, (800, 800), &mut rng);
    assert_eq!(engine.context().stars.len(), 12);
    assert_eq!(engine.context().scene.len(), 16);
    assert_eq!(engine.camera().fovy, 60.0);
}

#[test]
fn fixed_objects_survive_a_session() {
    let mut engine = engine(11);
    let ctx = engine.context();
    let (torus, moon, lights) = (ctx.torus, ctx.moon, ctx.lights);
    let stars = ctx.stars.clone();
    let mut renderer = Recorder::default();
    let mut scheduler = Requests::default();

    for step in 0..120_u16 {
        engine.frame(&mut renderer, &mut scheduler).unwrap();
        let event = match step % 4 {
            0 => InputEvent::Scroll {
                offset: -f32::from(step) * 10.0,
            },
            1 => InputEvent::Wheel {
                delta: WheelDelta::Lines(-2.0),
            },
            2 => InputEvent::Resized {
                width: 640 + u32::from(step),
                height: 480,
            },
            _ => InputEvent::Wheel {
                delta: WheelDelta::Pixels(15.0),
            },
        };
        let _ = engine.handle_input(event);
    }

    let ctx = engine.context();
    assert_eq!(engine.frame_count(), 120);
    assert_eq!(ctx.scene.len(), 204);
    assert_eq!((ctx.torus, ctx.moon, ctx.lights), (torus, moon, lights));
    assert_eq!(ctx.stars, stars);
    assert!(matches!(
        ctx.scene.get(torus),
        Some(SceneObject::Mesh(mesh)) if mesh.material.is_wireframe()
    ));
    assert!(matches!(
        ctx.scene.get(moon),
        Some(SceneObject::Mesh(mesh))
            if matches!(mesh.material, Material::Standard(_))
    ));
    assert!(matches!(
        ctx.scene.get(lights.point),
        Some(SceneObject::Light(Light::Point(_)))
    ));
    assert!(matches!(
        ctx.scene.get(lights.ambient),
        Some(SceneObject::Light(Light::Ambient(_)))
    ));
}
