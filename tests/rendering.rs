//! Draw-call level tests against the headless command recorder.

use efield::backend::{BufferData, Command};
use efield::prelude::*;
use efield::{CullFace, Primitive, Program, RegistryError, Shape, ShapeKind, SphereMesh, UnitSquare, VertexRegistry};

fn draw_elements(backend: &CommandRecorder) -> Vec<(Primitive, u32, u32)> {
    backend
        .draw_calls()
        .filter_map(|c| match c {
            Command::DrawElements { primitive, count, offset } => Some((*primitive, *count, *offset)),
            _ => None,
        })
        .collect()
}

fn rod(x: f64) -> ChargedLine {
    ChargedLine::new(DVec3::new(x, -10.0, 0.0), DVec3::new(x, 10.0, 0.0), 1.0, 0.1).unwrap()
}

// ============================================================================
// Vertex Registry
// ============================================================================

#[test]
fn test_each_mesh_uploaded_once_per_context() {
    let mut backend = CommandRecorder::new();
    let mut registry = VertexRegistry::new();

    let sources: Vec<ChargeDistribution> = vec![
        rod(-5.0).into(),
        rod(5.0).into(),
        ChargedCylinder::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 8.0), 1.0, 2.0, 0.1, 0.1).unwrap().into(),
        ChargedSphere::new(DVec3::new(0.0, 20.0, 0.0), 0.0, 3.0, 1.0, 1.0).unwrap().into(),
        ChargedSphere::new(DVec3::new(0.0, -20.0, 0.0), 1.0, 2.0, -1.0, 1.0).unwrap().into(),
    ];
    for source in &sources {
        source.render(&mut backend, &mut registry).unwrap();
    }

    // Cylinder and sphere meshes, three buffers each.
    assert_eq!(registry.len(), 2);
    assert_eq!(backend.buffer_count(), 6);
    assert!(registry.contains(ShapeKind::UnitCylinder));
    assert!(registry.contains(ShapeKind::Sphere));
    assert!(!registry.contains(ShapeKind::UnitSquare));
}

#[test]
fn test_duplicate_registration_is_an_error() {
    let mut backend = CommandRecorder::new();
    let mut registry = VertexRegistry::new();
    let buffers = UnitSquare.get_vertex_buffers(&mut registry, &mut backend).unwrap();

    assert_eq!(
        registry.register(ShapeKind::UnitSquare, buffers.clone()),
        Err(RegistryError::DuplicateRegistration(ShapeKind::UnitSquare))
    );
    assert_eq!(registry.get(ShapeKind::UnitSquare), Some(&buffers));
}

#[test]
fn test_uploaded_mesh_matches_cpu_geometry() {
    let mut backend = CommandRecorder::new();
    let mut registry = VertexRegistry::new();
    let mesh = SphereMesh::new(6, 8);
    let buffers = mesh.get_vertex_buffers(&mut registry, &mut backend).unwrap();
    let geometry = mesh.build();

    match backend.buffer(buffers.vertices) {
        Some((_, BufferData::Vertex(data))) => assert_eq!(data, &geometry.vertices),
        other => panic!("expected vertex data, got {:?}", other),
    }
    match backend.buffer(buffers.indices) {
        Some((_, BufferData::Index(data))) => assert_eq!(data, &geometry.indices),
        other => panic!("expected index data, got {:?}", other),
    }
}

#[test]
fn test_cylinder_shells_skip_caps() {
    let mut backend = CommandRecorder::new();
    let mut registry = VertexRegistry::new();
    let cylinder = ChargedCylinder::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 8.0), 1.0, 3.0, 0.1, 0.1).unwrap();
    cylinder.render(&mut backend, &mut registry).unwrap();

    let draws = draw_elements(&backend);
    // Radii 3, 2, 1 then 1, 2, 3.
    assert_eq!(draws.len(), 6);
    assert!(draws.iter().all(|d| d.0 == Primitive::TriangleStrip));
}

// ============================================================================
// Scene Frames
// ============================================================================

#[test]
fn test_full_frame() {
    let mut scene: Scene<BufferId> = Scene::new(
        SceneConfig::default().with_trace(TraceConfig::default().with_max_points(400).with_arrow_spacing(20.0)),
    );
    scene
        .add_charge(PointCharge::new(2.0, DVec3::new(-15.0, 0.0, 0.0)))
        .add_charge(PointCharge::new(-2.0, DVec3::new(15.0, 0.0, 0.0)))
        .add_distribution(ChargedPlane::new(
            0.05,
            1.0,
            [
                DVec3::new(-5.0, 30.0, 5.0),
                DVec3::new(5.0, 30.0, 5.0),
                DVec3::new(5.0, 30.0, -5.0),
                DVec3::new(-5.0, 30.0, -5.0),
            ],
        )
        .unwrap());
    scene.add_gaussian_surface(GaussianCylinder::new(DVec3::new(-15.0, 0.0, 0.0), 6.0, 4.0, EulerZxy::default()).unwrap());
    let lines = scene.trace().len();
    assert!(lines > 4);

    let mut backend = CommandRecorder::new();
    scene.render(&mut backend).unwrap();
    let commands = backend.commands();

    assert_eq!(commands[0], Command::Clear);

    let point_draws = backend
        .draw_calls()
        .filter(|c| matches!(c, Command::DrawArrays { primitive: Primitive::Points, count: 2, .. }))
        .count();
    assert_eq!(point_draws, 1);

    let strips = backend
        .draw_calls()
        .filter(|c| matches!(c, Command::DrawArrays { primitive: Primitive::LineStrip, .. }))
        .count();
    assert_eq!(strips, lines);
    let arrows = backend
        .draw_calls()
        .filter(|c| matches!(c, Command::DrawArrays { primitive: Primitive::Lines, .. }))
        .count();
    assert!(arrows > 0);

    // Plane, then the Gaussian cylinder's cap, side and cap.
    assert_eq!(
        draw_elements(&backend),
        vec![
            (Primitive::Triangles, 6, 0),
            (Primitive::TriangleFan, 34, 0),
            (Primitive::TriangleStrip, 66, 34),
            (Primitive::TriangleFan, 34, 100),
        ]
    );

    let programs: Vec<Program> = commands
        .iter()
        .filter_map(|c| match c {
            Command::UseProgram(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(programs, vec![Program::Charge, Program::FluxLine, Program::Surface, Program::Surface]);
    assert!(commands.contains(&Command::Blending(true)));
    assert!(commands.contains(&Command::Culling(Some(CullFace::Back))));
    assert_eq!(commands.last(), Some(&Command::Culling(None)));
}

#[test]
fn test_camera_uniforms_follow_zoom() {
    let mut scene: Scene<BufferId> = Scene::default();
    scene.add_charge(PointCharge::new(1.0, DVec3::ZERO));
    scene.zoom_by(-100.0);

    let mut backend = CommandRecorder::new();
    scene.render(&mut backend).unwrap();
    assert_eq!(backend.last_mat4("projection"), Some(efield::transform::orthographic(50.0, 50.0, -50.0, 50.0)));
}

#[test]
fn test_context_loss_rebuilds_meshes() {
    let mut scene: Scene<BufferId> = Scene::default();
    scene.add_distribution(rod(0.0));
    let mut backend = CommandRecorder::new();

    scene.render(&mut backend).unwrap();
    scene.render(&mut backend).unwrap();
    assert_eq!(backend.buffer_count(), 3);

    scene.on_context_restored();
    let mut fresh = CommandRecorder::new();
    scene.render(&mut fresh).unwrap();
    assert_eq!(fresh.buffer_count(), 3);
}
