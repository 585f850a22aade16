use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector2, Vector3};

use crate::glint::ray::Ray;

pub const VIEWPORT_SIZE: f32 = 1.0;
pub const PROJECTION_PLANE_Z: f32 = 1.0;

/// 픽셀 격자와 카메라 앞 투영면 사이의 대응
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub viewport_size: f32,
    pub projection_plane_z: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport_size: VIEWPORT_SIZE,
            projection_plane_z: PROJECTION_PLANE_Z,
        }
    }

    /// 화면 중앙이 (0, 0)이고 y가 위로 증가하는 픽셀 좌표를 투영면 위의 점으로 바꿈.
    /// 세로축은 높이로 나누므로 정사각형이 아닌 화면에서도 찌그러지지 않음
    pub fn canvas_to_viewport(&self, pixel: Vector2<i32>) -> Vector3<f32> {
        Vector3::new(
            pixel.x as f32 * self.viewport_size / self.width as f32,
            pixel.y as f32 * self.viewport_size / self.height as f32,
            self.projection_plane_z,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// 광선 방향에만 적용. 원점은 언제나 position
    pub orientation: Matrix3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            orientation: Matrix3::identity(),
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, orientation: Matrix3<f32>) -> Self {
        Self { position, orientation }
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Matrix3<f32>) {
        self.orientation = orientation;
    }

    /// 축 기준 회전 행렬. 각도는 도 단위
    pub fn rotation(degrees: f32, axis: Vector3<f32>) -> Matrix3<f32> {
        Rotation3::from_axis_angle(&Unit::new_normalize(axis), degrees.to_radians()).into_inner()
    }

    pub fn ray_for(&self, viewport: &Viewport, pixel: Vector2<i32>) -> Ray {
        let direction = self.orientation * viewport.canvas_to_viewport(pixel);
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Vector3<f32>, b: &Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let viewport = Viewport::new(600, 600);
        let direction = viewport.canvas_to_viewport(Vector2::new(0, 0));
        assert_eq!(direction, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_corner_pixel_scaling() {
        let viewport = Viewport::new(200, 100);
        let direction = viewport.canvas_to_viewport(Vector2::new(-100, 50));
        assert!(close(&direction, &Vector3::new(-0.5, 0.5, 1.0)));
    }

    #[test]
    fn test_orientation_rotates_direction_not_origin() {
        let camera = Camera::new(
            Point3::new(1.0, 2.0, 3.0),
            Camera::rotation(90.0, Vector3::y()),
        );
        let ray = camera.ray_for(&Viewport::new(10, 10), Vector2::new(0, 0));

        assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        assert!(close(&ray.direction, &Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_identity_camera() {
        let mut camera = Camera::default();
        camera.set_position(Point3::new(0.0, 8.0, -13.0));
        camera.set_orientation(Camera::rotation(35.0, Vector3::x()));

        let ray = camera.ray_for(&Viewport::new(4, 4), Vector2::new(0, 0));
        assert_eq!(ray.origin, Point3::new(0.0, 8.0, -13.0));
        assert!((ray.direction.magnitude() - 1.0).abs() < 1e-5);
        assert!(ray.direction.y < 0.0);
    }
}
