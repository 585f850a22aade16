use nalgebra::Vector3;

use crate::glint::color::Color;
use crate::glint::intersect::World;
use crate::glint::lighting::{compute_lighting, reflect};
use crate::glint::ray::Ray;

/// 반사 광선 시작점 근처의 자기 교차를 무시하는 거리
pub const REFLECTION_BIAS: f32 = 0.1;

pub const BACKGROUND: Color = Color::BLACK;

/// 광선 하나의 최종 픽셀 색상
pub fn trace_ray<W: World + ?Sized>(world: &W, ray: &Ray, min_t: f32, depth: u32) -> Color {
    Color::from_linear(&trace_linear(world, ray, min_t, depth))
}

/// 자르지 않은 선형 색상을 돌려줌. 반사 혼합은 전부 이 값 위에서 하고 픽셀로 바꿀 때 한 번만 자름
pub fn trace_linear<W: World + ?Sized>(world: &W, ray: &Ray, min_t: f32, depth: u32) -> Vector3<f32> {
    let Some(hit) = world.closest_intersection(ray, min_t, f32::INFINITY) else {
        return BACKGROUND.to_linear();
    };

    let object = world.object(hit.index);
    let point = ray.at(hit.t);
    // 구니까 중심에서 교점으로 향하는 방향이 곧 법선
    let normal = (point - object.sphere.center).normalize();

    let intensity = compute_lighting(world, &point, &normal, &ray.direction, object.material.specular);
    let local = object.material.color.lit_by(&intensity);

    let reflectivity = object.material.reflectivity;
    if reflectivity <= 0.0 || depth == 0 {
        return local;
    }

    let reflected_ray = Ray::new(point, reflect(&normal, &-ray.direction));
    let reflected = trace_linear(world, &reflected_ray, REFLECTION_BIAS, depth - 1);

    local * (1.0 - reflectivity) + reflected * reflectivity
}
