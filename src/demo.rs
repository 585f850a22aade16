use nalgebra::{Point3, Vector3};

use crate::glint::camera::Camera;
use crate::glint::color::Color;
use crate::glint::scene::{Light, Scene, SceneError, Sphere};

const GREEN_SPHERE: usize = 1;
const BLUE_SPHERE: usize = 2;
const SUN: usize = 1;
const LAMP: usize = 2;

/// 공 네 개와 빛 세 개가 빙글빙글 도는 기본 장면
pub struct Demo {
    pub scene: Scene,
    pub camera: Camera,
    camera_angle: f32,
    sun_angle: f32,
    lamp_angle: f32,
    green_angle: f32,
    blue_angle: f32,
}

impl Demo {
    pub fn new() -> Self {
        let mut scene = Scene::new();

        scene.add_light(Light::Ambient {
            intensity: Vector3::new(0.2, 0.2, 0.2),
        });
        scene.add_light(Light::Directional {
            intensity: Vector3::new(0.2, 0.2, 0.2),
            direction: sun_direction(0.0),
        });
        scene.add_light(Light::Point {
            intensity: Vector3::new(0.6, 0.2, 0.2),
            position: Point3::from(lamp_position(0.0)),
        });

        scene.add_sphere(Sphere::new(Point3::new(0.0, -1.0, 3.0), 1.0), Color::RED, 500.0, 0.2);
        scene.add_sphere(Sphere::new(green_center(0.0), 1.0), Color::GREEN, 10.0, 0.4);
        scene.add_sphere(Sphere::new(blue_center(0.0), 1.0), Color::BLUE, 500.0, 0.3);
        // 바닥 역할을 하는 큰 공
        scene.add_sphere(Sphere::new(Point3::new(0.0, -8.0, 0.0), 7.0), Color::YELLOW, 1000.0, 0.5);

        let camera = Camera::new(camera_position(0.0), Camera::rotation(35.0, Vector3::x()));

        Self {
            scene,
            camera,
            camera_angle: 0.0,
            sun_angle: 0.0,
            lamp_angle: 0.0,
            green_angle: 0.0,
            blue_angle: 0.0,
        }
    }

    /// 다음 프레임으로 시간을 한 칸 진행
    pub fn advance(&mut self) -> Result<(), SceneError> {
        self.camera_angle += 0.1;
        self.sun_angle += 0.2;
        self.lamp_angle += 0.3;
        self.green_angle += 0.15;
        self.blue_angle += 0.25;

        self.scene.set_object_center(GREEN_SPHERE, green_center(self.green_angle))?;
        self.scene.set_object_center(BLUE_SPHERE, blue_center(self.blue_angle))?;
        self.scene.set_light_position(SUN, sun_direction(self.sun_angle))?;
        self.scene.set_light_position(LAMP, lamp_position(self.lamp_angle))?;
        self.camera.set_position(camera_position(self.camera_angle));

        Ok(())
    }
}

// 각도에 따른 궤도 위의 (x, z)
fn orbit(radius_x: f32, radius_z: f32, angle: f32) -> (f32, f32) {
    (radius_x * angle.sin(), radius_z * angle.cos())
}

fn green_center(angle: f32) -> Point3<f32> {
    let (x, z) = orbit(4.0, 4.0, angle);
    Point3::new(x - 2.0, 1.0, z + 4.0)
}

// 파란 공은 가로로 조금 더 길쭉한 궤도
fn blue_center(angle: f32) -> Point3<f32> {
    let (x, z) = orbit(5.0, 4.0, angle);
    Point3::new(x + 2.0, 2.0, z + 4.0)
}

fn camera_position(angle: f32) -> Point3<f32> {
    let (x, z) = orbit(2.0, 2.0, angle);
    Point3::new(x, 8.0, z - 15.0)
}

fn sun_direction(angle: f32) -> Vector3<f32> {
    let (x, z) = orbit(2.0, 2.0, angle);
    Vector3::new(x, 3.0, z)
}

fn lamp_position(angle: f32) -> Vector3<f32> {
    let (x, z) = orbit(5.0, 5.0, angle);
    Vector3::new(x, 4.0, z)
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_layout() {
        let demo = Demo::new();
        assert_eq!(demo.scene.objects().len(), 4);
        assert_eq!(demo.scene.lights().len(), 3);
        assert_eq!(demo.scene.objects()[3].sphere.radius, 7.0);
        assert_eq!(demo.camera.position, Point3::new(0.0, 8.0, -13.0));
    }

    #[test]
    fn test_advance_moves_only_transforms() {
        let mut demo = Demo::new();
        let before = demo.scene.clone();
        let camera_before = demo.camera.position;

        demo.advance().unwrap();

        assert_eq!(demo.scene.objects().len(), before.objects().len());
        assert_eq!(demo.scene.lights().len(), before.lights().len());
        assert_eq!(demo.scene.objects()[0], before.objects()[0]);
        assert_ne!(demo.scene.objects()[1].sphere.center, before.objects()[1].sphere.center);
        assert_ne!(demo.scene.objects()[2].sphere.center, before.objects()[2].sphere.center);
        assert_eq!(demo.scene.objects()[1].material, before.objects()[1].material);
        assert_ne!(demo.camera.position, camera_before);
        assert_eq!(demo.scene.lights()[0], before.lights()[0]);
        assert_ne!(demo.scene.lights()[2], before.lights()[2]);
    }
}
