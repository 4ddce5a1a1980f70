pub mod batch;
pub mod pipeline;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use log::info;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use batch::{TextureKey, build_batches};
use pipeline::{QuadPipeline, create_quad_pipeline, orthographic_projection};

use crate::assets::AssetCache;
use crate::config::Resolution;
use crate::ui::DrawList;

#[derive(Debug)]
pub enum RendererError {
    Surface(wgpu::CreateSurfaceError),
    Adapter(wgpu::RequestAdapterError),
    Device(wgpu::RequestDeviceError),
    NoSurfaceFormat,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create surface: {e}"),
            Self::Adapter(e) => write!(f, "no suitable GPU adapter: {e}"),
            Self::Device(e) => write!(f, "cannot create device: {e}"),
            Self::NoSurfaceFormat => write!(f, "surface reports no supported format"),
        }
    }
}

impl std::error::Error for RendererError {}

/// Draws a `DrawList` as textured quads in logical coordinates.
///
/// Image textures are uploaded on first use and kept for the session.
pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: QuadPipeline,
    sampler: wgpu::Sampler,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    white: wgpu::BindGroup,
    textures: HashMap<String, wgpu::BindGroup>,
    logical: Resolution,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, logical: Resolution) -> Result<Self, RendererError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window)).map_err(RendererError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(RendererError::Adapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .map_err(RendererError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RendererError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_quad_pipeline(&device, format);

        let proj = orthographic_projection(logical.width() as f32, logical.height() as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white_pixel = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let white = upload_texture(&device, &queue, &pipeline, &sampler, &white_pixel, "white");

        info!("[renderer] {}x{} surface, logical {logical}", config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            sampler,
            projection_buffer,
            projection_bind_group,
            white,
            textures: HashMap::new(),
            logical,
        })
    }

    pub fn logical(&self) -> Resolution { self.logical }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Change the coordinate space draw lists are expressed in.
    pub fn set_logical(&mut self, logical: Resolution) {
        self.logical = logical;
        let proj = orthographic_projection(logical.width() as f32, logical.height() as f32);
        self.queue.write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
    }

    /// Render one frame.
    pub fn render(&mut self, list: &DrawList, assets: &mut AssetCache) -> Result<(), wgpu::SurfaceError> {
        let batches = build_batches(list, assets);

        // Upload every texture this frame needs before the pass borrows them.
        for batch in &batches.batches {
            if let TextureKey::Image(key) = &batch.texture {
                if !self.textures.contains_key(key) {
                    if let Some(img) = assets.image(key) {
                        let bind_group = upload_texture(&self.device, &self.queue, &self.pipeline, &self.sampler, img, key);
                        self.textures.insert(key.clone(), bind_group);
                    }
                }
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        let vbuf = (!batches.vertices.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad_vertex_buffer"),
                contents: bytemuck::cast_slice(&batches.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("menu_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(vbuf) = &vbuf {
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));

                for batch in &batches.batches {
                    let bind_group = match &batch.texture {
                        TextureKey::White => Some(&self.white),
                        TextureKey::Image(key) => self.textures.get(key),
                    };
                    let Some(bind_group) = bind_group else { continue };
                    pass.set_bind_group(1, bind_group, &[]);
                    pass.draw(batch.start..batch.start + batch.count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &QuadPipeline,
    sampler: &wgpu::Sampler,
    img: &RgbaImage,
    label: &str,
) -> wgpu::BindGroup {
    let (width, height) = img.dimensions();
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        img.as_raw(),
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &pipeline.texture_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
