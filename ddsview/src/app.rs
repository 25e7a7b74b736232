//! Device lifecycle and the textured-quad scene.

use std::mem;
use std::path::PathBuf;
use std::ptr;
use std::time::Instant;

use bytemuck::offset_of;
use glam::{Mat4, Vec3};
use tracing::{info, warn};
use windows::core::s;
use windows::Win32::Foundation::{BOOL, E_FAIL, HWND};
use windows::Win32::Graphics::Direct3D::{
    D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST, D3D_DRIVER_TYPE_HARDWARE, D3D_DRIVER_TYPE_WARP,
    D3D_FEATURE_LEVEL_10_0, D3D_FEATURE_LEVEL_11_0,
};
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Buffer, ID3D11DepthStencilView, ID3D11Device, ID3D11DeviceContext, ID3D11InputLayout,
    ID3D11PixelShader, ID3D11RenderTargetView, ID3D11SamplerState, ID3D11Texture2D,
    ID3D11VertexShader, D3D11_BIND_CONSTANT_BUFFER, D3D11_BIND_DEPTH_STENCIL,
    D3D11_BIND_INDEX_BUFFER, D3D11_BIND_VERTEX_BUFFER, D3D11_BUFFER_DESC, D3D11_CLEAR_DEPTH,
    D3D11_COMPARISON_ALWAYS, D3D11_CPU_ACCESS_WRITE, D3D11_CREATE_DEVICE_FLAG,
    D3D11_FLOAT32_MAX, D3D11_INPUT_ELEMENT_DESC, D3D11_INPUT_PER_VERTEX_DATA,
    D3D11_MAPPED_SUBRESOURCE, D3D11_MAP_WRITE_DISCARD, D3D11_SAMPLER_DESC,
    D3D11_SUBRESOURCE_DATA, D3D11_TEXTURE2D_DESC, D3D11_USAGE_DEFAULT, D3D11_USAGE_DYNAMIC,
    D3D11_USAGE_IMMUTABLE, D3D11_VIEWPORT,
};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT, DXGI_FORMAT_D24_UNORM_S8_UINT, DXGI_FORMAT_R32G32B32_FLOAT,
    DXGI_FORMAT_R32G32_FLOAT, DXGI_FORMAT_R32_UINT, DXGI_FORMAT_R8G8B8A8_UNORM,
    DXGI_FORMAT_UNKNOWN, DXGI_MODE_DESC, DXGI_MODE_SCALING_UNSPECIFIED,
    DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED, DXGI_RATIONAL, DXGI_SAMPLE_DESC,
};
use windows::Win32::Graphics::Dxgi::{
    IDXGIFactory1, IDXGISwapChain, DXGI_PRESENT, DXGI_SWAP_CHAIN_DESC, DXGI_SWAP_CHAIN_FLAG,
    DXGI_SWAP_EFFECT_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
};
use windows::Win32::Graphics::Gdi::MONITOR_DEFAULTTONEAREST;
use windows::Win32::UI::Input::KeyboardAndMouse::{VIRTUAL_KEY, VK_ESCAPE, VK_F11, VK_F12, VK_O};
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

use ddsview_capability::{factory, monitor, CapabilityError};
use ddsview_common::{FilterMode, Size, WrapMode};

use crate::capture;
use crate::cli::Args;
use crate::dialog;
use crate::error::{assume_d3d11_init, AppError};
use crate::shader;
use crate::texture::LoadedTexture;

const BACKBUFFER_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;
const CLEAR_COLOR: [f32; 4] = [0.627, 0.627, 0.980, 0.0];
const LIGHT_DIR: [f32; 4] = [0.0, 0.707, -0.707, 0.0];
const QUAD_EXTENT: f32 = 3.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    texcoord: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Default)]
struct CbPerObject {
    world_view_proj: [[f32; 4]; 4],
    world: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone)]
struct CbPerFrame {
    light_dir: [f32; 4],
}

pub struct App {
    args: Args,
    dxgi_factory: IDXGIFactory1,
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    sample_count: u32,
    fullscreen: bool,
    resources: Option<Resources>,
}

/// Everything created against a window; dropped wholesale when the device
/// goes away.
struct Resources {
    swapchain: IDXGISwapChain,
    views: Option<FrameViews>,
    vs: ID3D11VertexShader,
    ps: ID3D11PixelShader,
    input_layout: ID3D11InputLayout,
    sampler: ID3D11SamplerState,
    quad_vertices: ID3D11Buffer,
    quad_indices: ID3D11Buffer,
    cb_per_object: ID3D11Buffer,
    cb_per_frame: ID3D11Buffer,
    texture: Option<LoadedTexture>,
    start: Instant,
}

/// Views over the current back buffer; recreated on every resize.
struct FrameViews {
    rtv: ID3D11RenderTargetView,
    depth_stencil_view: ID3D11DepthStencilView,
    viewport: D3D11_VIEWPORT,
    size: Size<u32>,
}

impl App {
    pub fn new(args: Args) -> Result<Self, AppError> {
        let dxgi_factory: IDXGIFactory1 =
            factory::create_dxgi_factory1().map_err(AppError::NoDirect3D11)?;

        // Feature level 11.0 first so BC6H/BC7 textures work where they can.
        let feature_levels = [D3D_FEATURE_LEVEL_11_0, D3D_FEATURE_LEVEL_10_0];
        let (device, feature_level, context) = match factory::create_device(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            D3D11_CREATE_DEVICE_FLAG(0),
            &feature_levels,
        ) {
            Ok(created) => created,
            Err(CapabilityError::Native(error)) => {
                warn!("hardware device unavailable ({error}), falling back to WARP");
                factory::create_device(
                    None,
                    D3D_DRIVER_TYPE_WARP,
                    D3D11_CREATE_DEVICE_FLAG(0),
                    &feature_levels,
                )
                .map_err(AppError::NoDirect3D11)?
            }
            Err(error) => return Err(AppError::NoDirect3D11(error)),
        };
        info!(feature_level = feature_level.0, "created direct3d 11 device");

        Ok(App {
            sample_count: args.samples.max(1),
            args,
            dxgi_factory,
            device,
            context,
            fullscreen: false,
            resources: None,
        })
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.args.width.max(1), self.args.height.max(1))
    }

    pub fn bind_to_window(&mut self, hwnd: HWND) -> Result<(), AppError> {
        self.log_monitor(hwnd);
        self.validate_sample_count();

        let (width, height) = self.window_size();
        let swapchain = self.create_swapchain(hwnd, width, height)?;
        let views = self.create_views(&swapchain, Size::new(width, height))?;

        let shader_path = self
            .args
            .shader
            .clone()
            .unwrap_or_else(shader::default_shader_path);
        let (vs_blob, ps_blob) = shader::compile_file(&shader_path)?;
        let vs_bytecode = shader::blob_bytes(&vs_blob);

        let input_layout_desc = [
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: offset_of!(Vertex::default(), Vertex, position) as u32,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("NORMAL"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: offset_of!(Vertex::default(), Vertex, normal) as u32,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("TEXCOORD"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: offset_of!(Vertex::default(), Vertex, texcoord) as u32,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];

        unsafe {
            let mut vs = None;
            self.device
                .CreateVertexShader(vs_bytecode, None, Some(&mut vs))?;
            assume_d3d11_init!(vs, "CreateVertexShader");

            let mut ps = None;
            self.device
                .CreatePixelShader(shader::blob_bytes(&ps_blob), None, Some(&mut ps))?;
            assume_d3d11_init!(ps, "CreatePixelShader");

            let mut input_layout = None;
            self.device
                .CreateInputLayout(&input_layout_desc, vs_bytecode, Some(&mut input_layout))?;
            assume_d3d11_init!(input_layout, "CreateInputLayout");

            let sampler = create_sampler(&self.device)?;
            let (quad_vertices, quad_indices) = create_quad_buffers(&self.device)?;
            let cb_per_object =
                create_constant_buffer(&self.device, mem::size_of::<CbPerObject>())?;
            let cb_per_frame = create_constant_buffer(&self.device, mem::size_of::<CbPerFrame>())?;

            let texture = match &self.args.texture {
                Some(path) => Some(LoadedTexture::from_file(&self.device, path)?),
                None => None,
            };
            if let Some(texture) = &texture {
                info!(
                    path = %texture.path.display(),
                    width = texture.size.width,
                    height = texture.size.height,
                    "loaded texture"
                );
            }

            self.resources = Some(Resources {
                swapchain,
                views: Some(views),
                vs,
                ps,
                input_layout,
                sampler,
                quad_vertices,
                quad_indices,
                cb_per_object,
                cb_per_frame,
                texture,
                start: Instant::now(),
            });
        }

        Ok(())
    }

    fn log_monitor(&self, hwnd: HWND) {
        let handle = monitor::monitor_from_window(hwnd, MONITOR_DEFAULTTONEAREST);
        match monitor::monitor_info(handle) {
            Some(info) => {
                let rect = info.rcMonitor;
                info!(
                    left = rect.left,
                    top = rect.top,
                    right = rect.right,
                    bottom = rect.bottom,
                    "window monitor"
                );
            }
            None => warn!("monitor geometry unavailable"),
        }
    }

    fn validate_sample_count(&mut self) {
        if self.sample_count <= 1 {
            return;
        }
        let quality_levels = unsafe {
            self.device
                .CheckMultisampleQualityLevels(BACKBUFFER_FORMAT, self.sample_count)
        }
        .unwrap_or(0);
        if quality_levels == 0 {
            warn!(
                samples = self.sample_count,
                "MSAA sample count unsupported, falling back to 1"
            );
            self.sample_count = 1;
        }
    }

    fn create_swapchain(
        &self,
        hwnd: HWND,
        width: u32,
        height: u32,
    ) -> Result<IDXGISwapChain, AppError> {
        let desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: DXGI_MODE_DESC {
                Width: width,
                Height: height,
                RefreshRate: DXGI_RATIONAL {
                    Numerator: 60,
                    Denominator: 1,
                },
                Format: BACKBUFFER_FORMAT,
                ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
                Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
            },
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: self.sample_count,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: 1,
            OutputWindow: hwnd,
            Windowed: BOOL(1),
            SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
            Flags: 0,
        };

        let mut swapchain = None;
        unsafe {
            self.dxgi_factory
                .CreateSwapChain(&self.device, &desc, &mut swapchain)
        }
        .ok()?;
        swapchain.ok_or_else(|| AppError::Direct3D(windows::core::Error::from(E_FAIL)))
    }

    fn create_views(
        &self,
        swapchain: &IDXGISwapChain,
        size: Size<u32>,
    ) -> Result<FrameViews, AppError> {
        unsafe {
            let backbuffer: ID3D11Texture2D = swapchain.GetBuffer(0)?;
            let mut rtv = None;
            self.device
                .CreateRenderTargetView(&backbuffer, None, Some(&mut rtv))?;
            assume_d3d11_init!(rtv, "CreateRenderTargetView");

            let depth_desc = D3D11_TEXTURE2D_DESC {
                Width: size.width,
                Height: size.height,
                MipLevels: 1,
                ArraySize: 1,
                Format: DXGI_FORMAT_D24_UNORM_S8_UINT,
                SampleDesc: DXGI_SAMPLE_DESC {
                    Count: self.sample_count,
                    Quality: 0,
                },
                Usage: D3D11_USAGE_DEFAULT,
                BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
                CPUAccessFlags: 0,
                MiscFlags: 0,
            };
            let mut depth_buffer = None;
            self.device
                .CreateTexture2D(&depth_desc, None, Some(&mut depth_buffer))?;
            assume_d3d11_init!(depth_buffer, "CreateTexture2D");

            let mut depth_stencil_view = None;
            self.device
                .CreateDepthStencilView(&depth_buffer, None, Some(&mut depth_stencil_view))?;
            assume_d3d11_init!(depth_stencil_view, "CreateDepthStencilView");

            Ok(FrameViews {
                rtv,
                depth_stencil_view,
                viewport: D3D11_VIEWPORT {
                    TopLeftX: 0.0,
                    TopLeftY: 0.0,
                    Width: size.width as f32,
                    Height: size.height as f32,
                    MinDepth: 0.0,
                    MaxDepth: 1.0,
                },
                size,
            })
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), AppError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let Some(resources) = &mut self.resources else {
            return Ok(());
        };
        if resources
            .views
            .as_ref()
            .is_some_and(|views| views.size == Size::new(width, height))
        {
            return Ok(());
        }

        // Every outstanding back-buffer reference must go before the
        // buffers can be resized.
        resources.views = None;
        unsafe {
            resources.swapchain.ResizeBuffers(
                0,
                width,
                height,
                DXGI_FORMAT_UNKNOWN,
                DXGI_SWAP_CHAIN_FLAG(0),
            )?;
        }
        let swapchain = resources.swapchain.clone();
        let views = self.create_views(&swapchain, Size::new(width, height))?;
        if let Some(resources) = &mut self.resources {
            resources.views = Some(views);
        }
        Ok(())
    }

    pub fn update(&mut self) {}

    pub fn render(&mut self) -> Result<(), AppError> {
        let Some(resources) = &self.resources else {
            return Ok(());
        };
        let Some(views) = &resources.views else {
            return Ok(());
        };

        let elapsed = resources.start.elapsed().as_secs_f32();

        let aspect = views.size.width as f32 / views.size.height as f32;
        let projection = Mat4::perspective_lh(std::f32::consts::FRAC_PI_4, aspect, 0.1, 100.0);
        let view = Mat4::look_at_lh(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y);
        let world = Mat4::from_rotation_y(elapsed * 0.5)
            * Mat4::from_scale(quad_scale(resources.texture.as_ref()));

        let per_object = CbPerObject {
            world_view_proj: (projection * view * world).to_cols_array_2d(),
            world: world.to_cols_array_2d(),
        };
        let per_frame = CbPerFrame {
            light_dir: LIGHT_DIR,
        };

        unsafe {
            let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
            self.context.Map(
                &resources.cb_per_object,
                0,
                D3D11_MAP_WRITE_DISCARD,
                0,
                Some(&mut mapped),
            )?;
            ptr::copy_nonoverlapping(&per_object, mapped.pData.cast(), 1);
            self.context.Unmap(&resources.cb_per_object, 0);

            let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
            self.context.Map(
                &resources.cb_per_frame,
                0,
                D3D11_MAP_WRITE_DISCARD,
                0,
                Some(&mut mapped),
            )?;
            ptr::copy_nonoverlapping(&per_frame, mapped.pData.cast(), 1);
            self.context.Unmap(&resources.cb_per_frame, 0);
        }

        unsafe {
            self.context
                .OMSetRenderTargets(Some(&[Some(views.rtv.clone())]), &views.depth_stencil_view);
            self.context.RSSetViewports(Some(&[views.viewport]));
            self.context.ClearRenderTargetView(&views.rtv, &CLEAR_COLOR);
            self.context.ClearDepthStencilView(
                &views.depth_stencil_view,
                D3D11_CLEAR_DEPTH.0 as u32,
                1.0,
                0,
            );

            self.context.IASetInputLayout(&resources.input_layout);
            self.context.VSSetShader(&resources.vs, None);
            self.context.PSSetShader(&resources.ps, None);
            self.context
                .VSSetConstantBuffers(0, Some(&[Some(resources.cb_per_object.clone())]));
            self.context
                .VSSetConstantBuffers(1, Some(&[Some(resources.cb_per_frame.clone())]));
            if let Some(texture) = &resources.texture {
                self.context
                    .PSSetShaderResources(0, Some(&[Some(texture.srv.clone())]));
            }
            self.context
                .PSSetSamplers(0, Some(&[Some(resources.sampler.clone())]));

            let stride = mem::size_of::<Vertex>() as u32;
            let offset = 0u32;
            self.context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(resources.quad_vertices.clone())),
                Some(&stride),
                Some(&offset),
            );
            self.context
                .IASetIndexBuffer(&resources.quad_indices, DXGI_FORMAT_R32_UINT, 0);
            self.context
                .IASetPrimitiveTopology(D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST);

            self.context.DrawIndexed(6, 0, 0);

            resources.swapchain.Present(1, DXGI_PRESENT(0)).ok()?;
        }

        Ok(())
    }

    pub fn on_key_down(&mut self, window: HWND, key: u16) {
        match VIRTUAL_KEY(key) {
            VK_ESCAPE => unsafe { PostQuitMessage(0) },
            VK_O => self.open_texture_dialog(window),
            VK_F11 => self.toggle_fullscreen(),
            VK_F12 => self.take_screenshot(),
            _ => {}
        }
    }

    fn open_texture_dialog(&mut self, window: HWND) {
        let Some(path) = dialog::open_texture(window) else {
            return;
        };
        match LoadedTexture::from_file(&self.device, &path) {
            Ok(texture) => {
                info!(
                    path = %texture.path.display(),
                    width = texture.size.width,
                    height = texture.size.height,
                    "loaded texture"
                );
                if let Some(resources) = &mut self.resources {
                    resources.texture = Some(texture);
                }
            }
            Err(error) => warn!("failed to load {}: {error}", path.display()),
        }
    }

    fn toggle_fullscreen(&mut self) {
        let Some(resources) = &self.resources else {
            return;
        };
        let next = !self.fullscreen;
        match unsafe {
            resources
                .swapchain
                .SetFullscreenState(BOOL::from(next), None)
        } {
            Ok(()) => self.fullscreen = next,
            Err(error) => warn!("fullscreen toggle failed: {error}"),
        }
    }

    fn take_screenshot(&self) {
        let format = self.args.screenshot_format;
        let path = PathBuf::from(format!("screenshot.{}", format.extension()));
        let swapchain = self.resources.as_ref().map(|resources| &resources.swapchain);
        match capture::snap_backbuffer(
            swapchain,
            Some(&self.device),
            Some(&self.context),
            format,
            &path,
        ) {
            Ok(()) => info!(path = %path.display(), "saved screenshot"),
            Err(error) => warn!("screenshot failed: {error}"),
        }
    }
}

/// Scale keeping the texture's aspect ratio inside a square of
/// [`QUAD_EXTENT`] units.
fn quad_scale(texture: Option<&LoadedTexture>) -> Vec3 {
    match texture {
        Some(texture) if texture.size.width >= texture.size.height => Vec3::new(
            QUAD_EXTENT,
            QUAD_EXTENT * texture.size.height as f32 / texture.size.width as f32,
            1.0,
        ),
        Some(texture) => Vec3::new(
            QUAD_EXTENT * texture.size.width as f32 / texture.size.height as f32,
            QUAD_EXTENT,
            1.0,
        ),
        None => Vec3::new(QUAD_EXTENT, QUAD_EXTENT, 1.0),
    }
}

fn create_sampler(device: &ID3D11Device) -> Result<ID3D11SamplerState, AppError> {
    unsafe {
        let mut sampler = None;
        device.CreateSamplerState(
            &D3D11_SAMPLER_DESC {
                Filter: FilterMode::Linear.into(),
                AddressU: WrapMode::Repeat.into(),
                AddressV: WrapMode::Repeat.into(),
                AddressW: WrapMode::Repeat.into(),
                MipLODBias: 0.0,
                MaxAnisotropy: 1,
                ComparisonFunc: D3D11_COMPARISON_ALWAYS,
                BorderColor: [0.0, 0.0, 0.0, 0.0],
                MinLOD: 0.0,
                MaxLOD: D3D11_FLOAT32_MAX,
            },
            Some(&mut sampler),
        )?;
        assume_d3d11_init!(sampler, "CreateSamplerState");
        Ok(sampler)
    }
}

fn create_quad_buffers(device: &ID3D11Device) -> Result<(ID3D11Buffer, ID3D11Buffer), AppError> {
    // A unit quad in the XY plane facing the camera.
    let vertices = [
        Vertex {
            position: [-0.5, -0.5, 0.0],
            normal: [0.0, 0.0, -1.0],
            texcoord: [0.0, 1.0],
        },
        Vertex {
            position: [-0.5, 0.5, 0.0],
            normal: [0.0, 0.0, -1.0],
            texcoord: [0.0, 0.0],
        },
        Vertex {
            position: [0.5, 0.5, 0.0],
            normal: [0.0, 0.0, -1.0],
            texcoord: [1.0, 0.0],
        },
        Vertex {
            position: [0.5, -0.5, 0.0],
            normal: [0.0, 0.0, -1.0],
            texcoord: [1.0, 1.0],
        },
    ];
    let indices: [u32; 6] = [0, 1, 2, 0, 2, 3];

    unsafe {
        let mut vertex_buffer = None;
        device.CreateBuffer(
            &D3D11_BUFFER_DESC {
                ByteWidth: mem::size_of_val(&vertices) as u32,
                Usage: D3D11_USAGE_IMMUTABLE,
                BindFlags: D3D11_BIND_VERTEX_BUFFER.0 as u32,
                CPUAccessFlags: 0,
                MiscFlags: 0,
                StructureByteStride: 0,
            },
            Some(&D3D11_SUBRESOURCE_DATA {
                pSysMem: vertices.as_ptr().cast(),
                SysMemPitch: 0,
                SysMemSlicePitch: 0,
            }),
            Some(&mut vertex_buffer),
        )?;
        assume_d3d11_init!(vertex_buffer, "CreateBuffer");

        let mut index_buffer = None;
        device.CreateBuffer(
            &D3D11_BUFFER_DESC {
                ByteWidth: mem::size_of_val(&indices) as u32,
                Usage: D3D11_USAGE_IMMUTABLE,
                BindFlags: D3D11_BIND_INDEX_BUFFER.0 as u32,
                CPUAccessFlags: 0,
                MiscFlags: 0,
                StructureByteStride: 0,
            },
            Some(&D3D11_SUBRESOURCE_DATA {
                pSysMem: indices.as_ptr().cast(),
                SysMemPitch: 0,
                SysMemSlicePitch: 0,
            }),
            Some(&mut index_buffer),
        )?;
        assume_d3d11_init!(index_buffer, "CreateBuffer");

        Ok((vertex_buffer, index_buffer))
    }
}

fn create_constant_buffer(device: &ID3D11Device, size: usize) -> Result<ID3D11Buffer, AppError> {
    unsafe {
        let mut buffer = None;
        device.CreateBuffer(
            &D3D11_BUFFER_DESC {
                ByteWidth: size as u32,
                Usage: D3D11_USAGE_DYNAMIC,
                BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
                CPUAccessFlags: D3D11_CPU_ACCESS_WRITE.0 as u32,
                MiscFlags: 0,
                StructureByteStride: 0,
            },
            None,
            Some(&mut buffer),
        )?;
        assume_d3d11_init!(buffer, "CreateBuffer");
        Ok(buffer)
    }
}
