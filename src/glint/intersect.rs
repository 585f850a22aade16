use crate::glint::ray::Ray;
use crate::glint::scene::{Light, Scene, SceneObject, Sphere};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub t: f32,
}

/// 광선 추적이 씬에 묻는 질문들. 테스트에서는 호출 횟수를 세는 래퍼로 바꿔 끼움
pub trait World {
    fn closest_intersection(&self, ray: &Ray, min_t: f32, max_t: f32) -> Option<Hit>;
    fn object(&self, index: usize) -> &SceneObject;
    fn lights(&self) -> &[Light];
}

impl World for Scene {
    fn closest_intersection(&self, ray: &Ray, min_t: f32, max_t: f32) -> Option<Hit> {
        find_closest_sphere_intersection(self.objects(), ray, min_t, max_t)
    }

    fn object(&self, index: usize) -> &SceneObject {
        &self.objects()[index]
    }

    fn lights(&self) -> &[Light] {
        Scene::lights(self)
    }
}

/// 광선 식을 구 방정식에 넣어 얻은 t에 대한 이차방정식 A t^2 + B t + C = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Quadratic {
    pub fn for_sphere(ray: &Ray, sphere: &Sphere) -> Self {
        // 구가 원점에 오도록 광선 시작점을 옮겨서 계산
        let origin = ray.origin - sphere.center;

        Self {
            a: ray.direction.dot(&ray.direction),
            b: 2.0 * origin.dot(&ray.direction),
            c: origin.dot(&origin) - sphere.radius * sphere.radius,
        }
    }

    pub fn discriminant(&self) -> f32 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// (t1, t2) = ((-B + √D) / 2A, (-B - √D) / 2A). 판별식이 음수면 None
    pub fn roots(&self) -> Option<(f32, f32)> {
        let discriminant = self.discriminant();
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        Some((
            (-self.b + root) / (2.0 * self.a),
            (-self.b - root) / (2.0 * self.a),
        ))
    }
}

pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<(f32, f32)> {
    Quadratic::for_sphere(ray, sphere).roots()
}

/// (min_t, max_t) 열린 구간 안에서 가장 가까운 교점. 거리가 같으면 먼저 추가된 물체가 이김
pub fn find_closest_sphere_intersection(
    objects: &[SceneObject],
    ray: &Ray,
    min_t: f32,
    max_t: f32,
) -> Option<Hit> {
    let mut closest: Option<Hit> = None;
    let mut closest_t = max_t;

    for (index, object) in objects.iter().enumerate() {
        let Some((t1, t2)) = intersect_ray_sphere(ray, &object.sphere) else {
            continue;
        };

        // 두 근을 따로 검사해야 광선이 구 안에서 출발하는 경우도 잡힘
        for t in [t1, t2] {
            if t > min_t && t < closest_t {
                closest_t = t;
                closest = Some(Hit { index, t });
            }
        }
    }

    closest
}
