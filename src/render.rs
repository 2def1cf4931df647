//! wgpu implementation of [`Renderer`].
//!
//! Every draw is an indexed mesh with its own small uniform (model matrix,
//! colour, flags). Models are uploaded the first time the registry shows them
//! in a slot; the banner and the overlay quad are built once up front. Panel
//! hit-volumes are never drawn.

use std::iter;

use cgmath::{EuclideanSpace, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    animation::Renderer,
    camera::Camera,
    config::{PANEL_COUNT, WallConfig, rgb},
    context::Context,
    data_structures::{
        model::{Mesh, Model},
        panel::{BANNER_CENTER, BANNER_SIZE},
        scene_graph::SceneRegistry,
    },
    overlay::OverlayState,
    pipelines::basic::{CameraUniform, DrawUniform, WallVertex, mk_basic_pipeline, mk_uniform_layout},
};

const OVERLAY_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// sRGB channel to the linear value the Srgb surface expects.
fn to_linear(channel: f32) -> f32 {
    if channel <= 0.04045 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgba(colour: u32) -> [f32; 4] {
    let [r, g, b] = rgb(colour);
    [to_linear(r), to_linear(g), to_linear(b), 1.0]
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_elements: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, mesh: &Mesh) -> Self {
        let vertices: Vec<WallVertex> = mesh
            .positions
            .iter()
            .zip(mesh.normals.iter().chain(iter::repeat(&[0.0, 1.0, 0.0])))
            .map(|(position, normal)| WallVertex {
                position: *position,
                normal: *normal,
            })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Draw Uniform", mesh.name)),
            size: std::mem::size_of::<DrawUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("draw_bind_group"),
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: mesh.num_elements(),
            uniform_buffer,
            bind_group,
        }
    }

    fn write(&self, queue: &wgpu::Queue, model: Matrix4<f32>, colour: [f32; 4], screen_space: bool) {
        let uniform = DrawUniform {
            model: model.into(),
            colour,
            flags: [if screen_space { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
    }
}

/// A model's meshes on the GPU, tagged with the model name so a replaced
/// slot gets re-uploaded.
struct GpuModel {
    name: String,
    meshes: Vec<GpuMesh>,
}

pub struct WgpuRenderer {
    ctx: Context,
    pipeline: wgpu::RenderPipeline,
    draw_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light: [f32; 4],
    clear_colour: wgpu::Color,
    model_colour: [f32; 4],
    banner_colour: [f32; 4],
    models: Vec<Option<GpuModel>>,
    banner: GpuMesh,
    overlay: GpuMesh,
}

impl WgpuRenderer {
    pub fn new(ctx: Context, config: &WallConfig) -> Self {
        let device = &ctx.device;
        let camera_layout = mk_uniform_layout(device, "camera_bind_group_layout");
        let draw_layout = mk_uniform_layout(device, "draw_bind_group_layout");
        let pipeline = mk_basic_pipeline(device, &ctx.config, &camera_layout, &draw_layout);

        let light = [
            config.light_position[0],
            config.light_position[1],
            config.light_position[2],
            config.ambient_strength,
        ];
        let camera_uniform = CameraUniform {
            view_proj: Matrix4::identity().into(),
            light,
        };
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let banner = GpuMesh::upload(device, &draw_layout, &Mesh::cuboid("banner", BANNER_SIZE));
        let overlay = GpuMesh::upload(
            device,
            &draw_layout,
            &overlay_quad(config.overlay_width, config.overlay_height),
        );

        let [r, g, b, _] = linear_rgba(config.clear_colour);
        Self {
            pipeline,
            draw_layout,
            camera_buffer,
            camera_bind_group,
            light,
            clear_colour: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
            model_colour: linear_rgba(config.model_colour),
            banner_colour: linear_rgba(config.banner_colour),
            models: (0..PANEL_COUNT).map(|_| None).collect(),
            banner,
            overlay,
            ctx,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn sync_models(&mut self, registry: &SceneRegistry) {
        for (slot, model) in registry.models() {
            let current = self.models[slot.get()].as_ref();
            if current.is_some_and(|gpu| gpu.name == model.name) {
                continue;
            }
            let gpu = self.upload_model(model);
            self.models[slot.get()] = Some(gpu);
        }
    }

    fn upload_model(&self, model: &Model) -> GpuModel {
        log::debug!("Uploading {} ({} meshes)", model.name, model.meshes.len());
        GpuModel {
            name: model.name.clone(),
            meshes: model
                .meshes
                .iter()
                .map(|mesh| GpuMesh::upload(&self.ctx.device, &self.draw_layout, mesh))
                .collect(),
        }
    }

    fn draw(
        &self,
        registry: &SceneRegistry,
        camera: &Camera,
        overlay: OverlayState,
    ) -> Result<(), wgpu::SurfaceError> {
        let queue = &self.ctx.queue;
        let camera_uniform = CameraUniform {
            view_proj: camera.build_view_projection_matrix().into(),
            light: self.light,
        };
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        for (slot, model) in registry.models() {
            if let Some(gpu) = &self.models[slot.get()] {
                let matrix = model.world_matrix();
                gpu.meshes
                    .iter()
                    .for_each(|mesh| mesh.write(queue, matrix, self.model_colour, false));
            }
        }
        let banner_matrix = Matrix4::from_translation(BANNER_CENTER.to_vec());
        self.banner.write(queue, banner_matrix, self.banner_colour, false);
        let show_overlay = matches!(overlay, OverlayState::Visible(_));
        if show_overlay {
            self.overlay.write(queue, Matrix4::identity(), OVERLAY_COLOUR, true);
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Wall Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            self.models
                .iter()
                .flatten()
                .flat_map(|gpu| gpu.meshes.iter())
                .for_each(|mesh| mesh.draw(&mut render_pass));
            self.banner.draw(&mut render_pass);
            if show_overlay {
                self.overlay.draw(&mut render_pass);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Renderer for WgpuRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    fn render(&mut self, registry: &SceneRegistry, camera: &Camera, overlay: OverlayState) {
        // keep the frame loop going
        self.ctx.window.request_redraw();

        if !self.ctx.is_surface_configured() {
            return;
        }
        self.sync_models(registry);
        match self.draw(registry, camera, overlay) {
            Ok(()) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                self.ctx.resize(size.width, size.height);
            }
            Err(e) => log::error!("Unable to render {}", e),
        }
    }
}

/// The overlay rectangle in clip space, centred, `width` and `height` given
/// as fractions of the viewport.
fn overlay_quad(width: f32, height: f32) -> Mesh {
    let (w, h) = (width.clamp(0.0, 1.0), height.clamp(0.0, 1.0));
    Mesh {
        name: "overlay".to_string(),
        positions: vec![[-w, -h, 0.0], [w, -h, 0.0], [w, h, 0.0], [-w, h, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
