use wgpu::{
    Device, Extent3d, FilterMode, ImageCopyTexture, ImageDataLayout, Origin3d, Queue, Texture,
    TextureAspect, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;

/// 프레임 버퍼를 화면에 띄우기 위해 GPU로 올려두는 텍스쳐
pub struct Image {
    pub gpu_texture: Texture,
    pub view: TextureView,
    pub filter: FilterMode,
    pub name: String,
}

impl Image {
    pub fn new(device: &Device, width: u32, height: u32, label: &str) -> Image {
        let gpu_texture = device.create_texture(&TextureDescriptor {
            label: Some(label),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1, // 단순한 2차원 이미지니 1개
            },
            mip_level_count: 1,
            sample_count: 1, // 안티 에일리징 안함
            dimension: TextureDimension::D2,
            // 프레임 버퍼의 0~255 값을 그대로 색으로 씀
            format: TextureFormat::Rgba8UnormSrgb,

            // Texture Binding: egui가 쉐이더에서 읽음
            // Copy destination: 매 프레임 CPU에서 복사해 옴
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = gpu_texture.create_view(&TextureViewDescriptor {
            label: Some(&format!("{} view", label)),
            ..Default::default()
        });

        Self {
            gpu_texture,
            view,
            // 창을 키워도 픽셀이 뭉개지지 않도록 가장 가까운 픽셀 사용
            filter: FilterMode::Nearest,
            name: label.to_string(),
        }
    }

    pub fn load_image(&mut self, queue: &Queue, rgba: &[u8]) {
        let pixel_count = {
            let size = self.gpu_texture.size();
            size.width * size.height
        } as usize;
        assert_eq!(pixel_count, rgba.len() / 4, "frame size does not match {}", self.name);

        queue.write_texture(
            ImageCopyTexture {
                texture: &self.gpu_texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            rgba,
            ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.gpu_texture.width()),
                rows_per_image: Some(self.gpu_texture.height()),
            },
            self.gpu_texture.size(),
        )
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.gpu_texture.width(), self.gpu_texture.height())
    }
}
