use std::path::Path;

use bytemuck::cast_slice;
use image::RgbaImage;
use nalgebra::Vector2;
use thiserror::Error;

use crate::glint::color::Color;
use crate::glint::tracer::BACKGROUND;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("could not create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,
    #[error("window surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("could not open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("could not acquire the next frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
    #[error("canvas is {actual:?} but the frame being traced is {expected:?}")]
    FrameSize { expected: (u32, u32), actual: (u32, u32) },
    #[error("could not save frame snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

/// 광선 추적 결과를 받아 화면에 내보내는 곳.
/// 매 프레임 clear 한 번, 픽셀마다 put_pixel, 마지막에 present 한 번 호출됨
pub trait Canvas {
    /// (너비, 높이)
    fn size(&self) -> (u32, u32);

    fn clear(&mut self);

    /// 좌표는 화면 중앙이 (0, 0)이고 y는 위로 증가
    fn put_pixel(&mut self, pixel: Vector2<i32>, color: Color);

    fn present(&mut self) -> Result<(), DisplayError>;
}

/// CPU 메모리에 있는 RGBA 프레임
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u32>,
    frames_presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND.to_rgba(); width as usize * height as usize],
            frames_presented: 0,
        }
    }

    /// 중앙 기준 좌표를 왼쪽 위 기준 인덱스로. 화면 밖이면 None
    fn index_of(&self, pixel: Vector2<i32>) -> Option<usize> {
        let column = (self.width / 2) as i64 + pixel.x as i64;
        let row = (self.height / 2) as i64 - 1 - pixel.y as i64;

        if column < 0 || row < 0 || column >= self.width as i64 || row >= self.height as i64 {
            return None;
        }
        Some((row as usize) * self.width as usize + column as usize)
    }

    pub fn get(&self, pixel: Vector2<i32>) -> Option<Color> {
        let [r, g, b, _] = self.data[self.index_of(pixel)?].to_le_bytes();
        Some(Color::new(r, g, b))
    }

    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.data)
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn to_image(&self) -> RgbaImage {
        // 버퍼 길이는 언제나 width * height * 4라서 실패하지 않음
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.data[y as usize * self.width as usize + x as usize].to_le_bytes();
            image::Rgba([r, g, b, a])
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DisplayError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.data.fill(BACKGROUND.to_rgba());
    }

    fn put_pixel(&mut self, pixel: Vector2<i32>, color: Color) {
        if let Some(index) = self.index_of(pixel) {
            self.data[index] = color.to_rgba();
        }
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.frames_presented += 1;
        Ok(())
    }
}
