use nalgebra::Vector2;

use crate::glint::camera::{Camera, Viewport};
use crate::glint::canvas::{Canvas, DisplayError};
use crate::glint::scene::Scene;
use crate::glint::tracer::trace_ray;

pub mod camera;
pub mod canvas;
pub mod color;
pub mod intersect;
pub mod lighting;
pub mod ray;
pub mod scene;
pub mod texture;
pub mod tracer;

pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 반사를 몇 번까지 따라갈지
    pub max_depth: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: String::from("Glint: Ray Tracer"),
            width: 600,
            height: 600,
            max_depth: 3,
        }
    }
}

/// 프레임 하나를 처음부터 끝까지 그리는 렌더러. 프레임 사이에 남기는 상태 없음
pub struct Glint {
    viewport: Viewport,
    max_depth: u32,
}

impl Glint {
    pub fn new(settings: &Settings) -> Self {
        Self {
            viewport: Viewport::new(settings.width, settings.height),
            max_depth: settings.max_depth,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn render<C: Canvas + ?Sized>(
        &self,
        scene: &Scene,
        camera: &Camera,
        canvas: &mut C,
    ) -> Result<(), DisplayError> {
        // 캔버스 크기가 다르면 픽셀이 잘리거나 빈 곳이 남음
        let expected = (self.viewport.width, self.viewport.height);
        let actual = canvas.size();
        if actual != expected {
            return Err(DisplayError::FrameSize { expected, actual });
        }

        canvas.clear();

        let half_width = (self.viewport.width / 2) as i32;
        let half_height = (self.viewport.height / 2) as i32;
        // 투영면보다 가까운 물체는 그리지 않음
        let min_t = self.viewport.projection_plane_z;

        for x in -half_width..half_width {
            for y in -half_height..half_height {
                let pixel = Vector2::new(x, y);
                let ray = camera.ray_for(&self.viewport, pixel);
                let color = trace_ray(scene, &ray, min_t, self.max_depth);

                canvas.put_pixel(pixel, color);
            }
        }

        canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::glint::canvas::FrameBuffer;
    use crate::glint::color::Color;
    use crate::glint::scene::{Light, Sphere};

    /// 호출 순서만 기록하는 캔버스
    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        clears: usize,
        pixels: Vec<Vector2<i32>>,
        presents: usize,
        pixels_before_present: Option<usize>,
    }

    impl Canvas for Recorder {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn clear(&mut self) {
            assert!(self.pixels.is_empty(), "clear after put_pixel");
            self.clears += 1;
        }

        fn put_pixel(&mut self, pixel: Vector2<i32>, _color: Color) {
            self.pixels.push(pixel);
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.presents += 1;
            self.pixels_before_present = Some(self.pixels.len());
            Ok(())
        }
    }

    fn settings(width: u32, height: u32) -> Settings {
        Settings {
            width,
            height,
            ..Default::default()
        }
    }

    fn ambient_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Point3::new(0.0, 0.0, 3.0), 1.0), Color::GREEN, 10.0, 0.0);
        scene.add_light(Light::Ambient {
            intensity: Vector3::new(1.0, 1.0, 1.0),
        });
        scene
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!((settings.width, settings.height, settings.max_depth), (600, 600, 3));
    }

    #[test]
    fn test_frame_protocol() {
        let glint = Glint::new(&settings(6, 4));
        let mut recorder = Recorder {
            size: (6, 4),
            ..Default::default()
        };
        glint.render(&Scene::new(), &Camera::default(), &mut recorder).unwrap();

        assert_eq!(recorder.clears, 1);
        assert_eq!(recorder.presents, 1);
        assert_eq!(recorder.pixels_before_present, Some(24));
        assert_eq!(recorder.pixels.first(), Some(&Vector2::new(-3, -2)));
        assert_eq!(recorder.pixels.last(), Some(&Vector2::new(2, 1)));
    }

    #[test]
    fn test_mismatched_canvas_is_rejected() {
        let glint = Glint::new(&settings(6, 4));
        let mut recorder = Recorder {
            size: (4, 6),
            ..Default::default()
        };

        let error = glint.render(&Scene::new(), &Camera::default(), &mut recorder).unwrap_err();
        assert!(matches!(
            error,
            DisplayError::FrameSize {
                expected: (6, 4),
                actual: (4, 6)
            }
        ));
        // 아무것도 그리지 않음
        assert_eq!(recorder.clears, 0);
        assert!(recorder.pixels.is_empty());
        assert_eq!(recorder.presents, 0);
    }

    #[test]
    fn test_render_ambient_sphere() {
        let glint = Glint::new(&settings(20, 20));
        let mut frame = FrameBuffer::new(20, 20);
        glint.render(&ambient_scene(), &Camera::default(), &mut frame).unwrap();

        // 가운데는 구의 원래 색, 모서리는 배경
        assert_eq!(frame.get(Vector2::new(0, 0)), Some(Color::GREEN));
        assert_eq!(frame.get(Vector2::new(-10, -10)), Some(Color::BLACK));
        assert_eq!(frame.get(Vector2::new(9, 9)), Some(Color::BLACK));
        assert_eq!(frame.frames_presented(), 1);
    }

    #[test]
    fn test_frames_follow_scene_changes() {
        let glint = Glint::new(&settings(20, 20));
        let mut frame = FrameBuffer::new(20, 20);
        let mut scene = ambient_scene();

        glint.render(&scene, &Camera::default(), &mut frame).unwrap();
        scene.set_object_center(0, Point3::new(0.0, 0.0, -3.0)).unwrap();
        glint.render(&scene, &Camera::default(), &mut frame).unwrap();

        assert_eq!(frame.get(Vector2::new(0, 0)), Some(Color::BLACK));
        assert_eq!(frame.frames_presented(), 2);
    }

    #[test]
    fn test_camera_turns_toward_sphere() {
        let glint = Glint::new(&settings(20, 20));
        let mut frame = FrameBuffer::new(20, 20);
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Point3::new(3.0, 0.0, 0.0), 1.0), Color::RED, -1.0, 0.0);
        scene.add_light(Light::Ambient {
            intensity: Vector3::new(1.0, 1.0, 1.0),
        });

        let camera = Camera::new(Point3::origin(), Camera::rotation(90.0, Vector3::y()));
        glint.render(&scene, &camera, &mut frame).unwrap();
        assert_eq!(frame.get(Vector2::new(0, 0)), Some(Color::RED));
    }
}
