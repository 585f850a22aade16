use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::glint::color::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// 하이라이트 날카로움. 음수면 정반사 계산 자체를 건너뜀
    pub specular: f32,
    /// 0이면 반사 없음, 1이면 완전 거울
    pub reflectivity: f32,
}

/// 구와 그 재질. 둘을 한 레코드로 묶어서 인덱스가 어긋날 일이 없음
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub sphere: Sphere,
    pub material: Material,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        intensity: Vector3<f32>,
    },
    Directional {
        intensity: Vector3<f32>,
        direction: Vector3<f32>,
    },
    Point {
        intensity: Vector3<f32>,
        position: Point3<f32>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("no scene object at index {index} (scene has {len})")]
    UnknownObject { index: usize, len: usize },
    #[error("no light at index {index} (scene has {len})")]
    UnknownLight { index: usize, len: usize },
}

/// 씬은 처음 구성할 때만 길어지고, 프레임 사이에는 위치만 바뀜
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값 검증은 하지 않음. 반지름, 반사율이 올바른지는 호출하는 쪽 책임
    pub fn add_sphere(&mut self, sphere: Sphere, color: Color, specular: f32, reflectivity: f32) -> usize {
        self.objects.push(SceneObject {
            sphere,
            material: Material {
                color,
                specular,
                reflectivity,
            },
        });
        self.objects.len() - 1
    }

    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn set_object_center(&mut self, index: usize, center: Point3<f32>) -> Result<(), SceneError> {
        let len = self.objects.len();
        let object = self
            .objects
            .get_mut(index)
            .ok_or(SceneError::UnknownObject { index, len })?;
        object.sphere.center = center;
        Ok(())
    }

    /// 방향광이면 방향을, 점광원이면 위치를 바꿈. 주변광은 바꿀 게 없으니 그대로 둠
    pub fn set_light_position(&mut self, index: usize, vector: Vector3<f32>) -> Result<(), SceneError> {
        let len = self.lights.len();
        let light = self
            .lights
            .get_mut(index)
            .ok_or(SceneError::UnknownLight { index, len })?;

        match light {
            Light::Ambient { .. } => {}
            Light::Directional { direction, .. } => *direction = vector,
            Light::Point { position, .. } => *position = Point3::from(vector),
        }
        Ok(())
    }
}
