use hueglobe::components::PerspectiveCamera;
use nalgebra::{Point3, Vector3, Vector4};

const EPS: f32 = 1e-4;

fn clip_depth(camera: &PerspectiveCamera, point: Point3<f32>) -> f32 {
    let clip = camera.view_projection() * Vector4::new(point.x, point.y, point.z, 1.0);
    clip.z / clip.w
}

#[test]
fn test_depth_range_is_zero_to_one() {
    let mut camera = PerspectiveCamera::default();
    camera.position = Point3::new(0.0, 0.0, 5.0);

    let near = clip_depth(&camera, Point3::new(0.0, 0.0, 5.0 - camera.near));
    let far = clip_depth(&camera, Point3::new(0.0, 0.0, 5.0 - camera.far));

    assert!(near.abs() < EPS);
    assert!((far - 1.0).abs() < 1e-3);
}

#[test]
fn test_target_lands_in_the_center() {
    let mut camera = PerspectiveCamera::default();
    camera.position = Point3::new(0.0, 1.0, 1.6);
    camera.resize(200.0, 200.0);

    let clip = camera.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!((clip.x / clip.w).abs() < EPS);
    assert!((clip.y / clip.w).abs() < EPS);
}

#[test]
fn test_camera_axes_are_orthonormal() {
    let mut camera = PerspectiveCamera::default();
    camera.position = Point3::new(0.0, 1.0, 1.6);

    let forward = camera.forward();
    let right = camera.right();
    let up = camera.camera_up();

    assert!((forward.norm() - 1.0).abs() < EPS);
    assert!(forward.dot(&right).abs() < EPS);
    assert!(forward.dot(&up).abs() < EPS);
    assert!(right.dot(&Vector3::y()).abs() < EPS);
}
