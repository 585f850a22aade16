use nalgebra::{Point3, Vector3};

use crate::glint::intersect::World;
use crate::glint::ray::Ray;
use crate::glint::scene::Light;

/// 그림자 광선이 출발한 표면에 다시 부딪히지 않도록 띄우는 거리
pub const SHADOW_BIAS: f32 = 0.01;

/// 법선 기준으로 벡터를 반사시킴: 2 (n·v) n - v
pub fn reflect(normal: &Vector3<f32>, vector: &Vector3<f32>) -> Vector3<f32> {
    2.0 * normal.dot(vector) * normal - vector
}

/// 한 표면 점에 모든 빛이 주는 채널별 세기의 합. 1.0을 넘을 수 있고 자르지 않음
pub fn compute_lighting<W: World + ?Sized>(
    world: &W,
    point: &Point3<f32>,
    normal: &Vector3<f32>,
    view: &Vector3<f32>,
    specular: f32,
) -> Vector3<f32> {
    let mut total = Vector3::zeros();

    for light in world.lights() {
        // 점광원은 빛 위치까지만 (t = 1) 가리는 물체를 찾음. 빛 뒤에 있는 물체는 그림자를 만들지 않음
        let (to_light, intensity, max_t) = match *light {
            Light::Ambient { intensity } => {
                total += intensity;
                continue;
            }
            Light::Directional { intensity, direction } => (direction, intensity, f32::INFINITY),
            Light::Point { intensity, position } => (position - *point, intensity, 1.0),
        };

        let shadow_ray = Ray::new(*point, to_light);
        if world.closest_intersection(&shadow_ray, SHADOW_BIAS, max_t).is_some() {
            continue;
        }

        // 난반사
        let n_dot_l = normal.dot(&to_light);
        if n_dot_l > 0.0 {
            total += intensity * n_dot_l / to_light.magnitude();
        }

        // 정반사
        if specular >= 0.0 {
            let reflected = reflect(normal, &to_light);
            let r_dot_v = reflected.dot(&-view);
            if r_dot_v > 0.0 {
                let cosine = r_dot_v / (reflected.magnitude() * view.magnitude());
                total += intensity * cosine.powf(specular);
            }
        }
    }

    total
}
