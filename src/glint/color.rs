use nalgebra::Vector3;

/// 채널당 0~255 값을 가지는 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 0~255 범위의 선형 값으로 변환. 반사 혼합은 이 값으로 계산함
    pub fn to_linear(self) -> Vector3<f32> {
        Vector3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// 선형 값을 최종 픽셀 값으로 변환. 여기서만 [0, 255]로 자름
    pub fn from_linear(linear: &Vector3<f32>) -> Self {
        let channel = |value: f32| value.clamp(0.0, 255.0) as u8;
        Self::new(channel(linear.x), channel(linear.y), channel(linear.z))
    }

    /// 색상과 채널별 빛의 세기를 곱함 (자르지 않음)
    pub fn lit_by(self, intensity: &Vector3<f32>) -> Vector3<f32> {
        self.to_linear().component_mul(intensity)
    }

    /// 메모리상 R, G, B, A 순서의 바이트가 되도록 묶음
    pub fn to_rgba(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, 0xFF])
    }
}
