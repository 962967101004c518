//! # Graphics Resources Builder
//!
//! This module handles the creation of the graphics resources required by
//! the application: the window, the WebGPU surface/device/queue, and every
//! startup asset (shaders, block textures, crosshair, skybox).
//!
//! Asset loading happens here, before the first frame, so that a missing
//! or broken file is a fatal startup error with a diagnostic naming the
//! path — not a mid-session surprise.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use wgpu::{Adapter, Device, Features, Instance, Queue, Surface, SurfaceConfiguration};
use winit::{
    dpi::PhysicalSize,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::engine_state::rendering::{AssetImages, ShaderSources};

use super::settings::Settings;

/// Block texture file names, in block-type order (grass, dirt, sand,
/// stone).
const BLOCK_TEXTURE_FILES: [&str; 4] = [
    "grass-block.png",
    "dirt-block.png",
    "sand-block.png",
    "stone-block.png",
];

/// The crosshair overlay image.
const CROSSHAIR_FILE: &str = "crosshairs.png";
/// The equirectangular skybox image.
const SKYBOX_FILE: &str = "skybox.png";

/// Contains all graphics-related resources required by the application.
///
/// Created during application initialization and consumed when the engine
/// state is built.
#[allow(dead_code)]
#[derive(Default)]
pub struct Graphics {
    pub window: Option<Arc<Window>>,
    pub instance: Option<Instance>,
    pub surface: Option<Surface<'static>>,
    pub surface_config: Option<SurfaceConfiguration>,
    pub adapter: Option<Adapter>,
    pub device: Option<Device>,
    pub queue: Option<Queue>,
    pub shaders: Option<ShaderSources>,
    pub assets: Option<AssetImages>,
}

/// Reads a WGSL shader file to a string.
fn load_shader(asset_dir: &Path, relative: &str) -> anyhow::Result<String> {
    let path = asset_dir.join("shaders").join(relative);
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read shader {}", path.display()))
}

/// Decodes a texture file to RGBA pixels.
fn load_image(asset_dir: &Path, relative: &str) -> anyhow::Result<image::RgbaImage> {
    let path = asset_dir.join("textures").join(relative);
    let img = image::open(&path)
        .with_context(|| format!("failed to load texture {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Loads every startup asset from the configured asset directory.
///
/// # Errors
/// Any missing or undecodable file, with the offending path in the error
/// chain.
pub fn load_assets(settings: &Settings) -> anyhow::Result<(ShaderSources, AssetImages)> {
    let asset_dir = settings.assets.directory.as_path();

    let shaders = ShaderSources {
        voxel: load_shader(asset_dir, "voxel_shader.wgsl")?,
        sky: load_shader(asset_dir, "sky_shader.wgsl")?,
        ui: load_shader(asset_dir, "ui/shader.wgsl")?,
    };

    let block_textures = BLOCK_TEXTURE_FILES
        .iter()
        .map(|file| load_image(asset_dir, file))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let assets = AssetImages {
        block_textures,
        crosshair: load_image(asset_dir, CROSSHAIR_FILE)?,
        skybox: load_image(asset_dir, SKYBOX_FILE)?,
    };

    log::info!(
        "loaded {} shaders and {} textures from {}",
        3,
        BLOCK_TEXTURE_FILES.len() + 2,
        asset_dir.display()
    );

    Ok((shaders, assets))
}

/// Asynchronously creates and initializes all required graphics resources.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window
/// * `settings` - Startup configuration (window geometry, vsync, assets)
///
/// # Returns
/// A `Future` resolving to the initialized `Graphics`, or the error that
/// makes startup impossible.
fn create_graphics(
    event_loop: &ActiveEventLoop,
    settings: Settings,
) -> impl Future<Output = anyhow::Result<Graphics>> + 'static {
    let window_attrs = Window::default_attributes()
        .with_title(settings.window.title.clone())
        .with_inner_size(PhysicalSize::new(
            settings.window.width,
            settings.window.height,
        ));

    let window_result = event_loop
        .create_window(window_attrs)
        .context("failed to create the application window");

    async move {
        let window = Arc::new(window_result?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::empty(),
            backend_options: wgpu::BackendOptions::from_env_or_default(),
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create the rendering surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter found")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to acquire a graphics device")?;

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let present_mode = if settings.window.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let (shaders, assets) = load_assets(&settings)?;

        surface.configure(&device, &surface_config);

        Ok(Graphics {
            window: Some(window),
            instance: Some(instance),
            surface: Some(surface),
            surface_config: Some(surface_config),
            adapter: Some(adapter),
            device: Some(device),
            queue: Some(queue),
            shaders: Some(shaders),
            assets: Some(assets),
        })
    }
}

/// Helper struct for managing the one-shot initialization of graphics
/// resources, handing the result back through the event loop proxy.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
}

/// Represents the possible states of the graphics initialization process.
pub enum MaybeGraphics {
    /// State during graphics initialization
    Builder(GraphicsBuilder),

    /// State when graphics resources are fully initialized
    Graphics(Graphics),

    /// State after graphics resources have been moved into the engine
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
        }
    }

    /// Runs graphics initialization and sends the result back to the main
    /// thread through the event loop proxy.
    ///
    /// Initialization failure is fatal: the error chain is logged and the
    /// process exits non-zero.
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop, settings: &Settings) {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // Proxy already spent - Graphics was constructed before.
            return;
        };

        match pollster::block_on(create_graphics(event_loop, settings.clone())) {
            Ok(gfx) => {
                assert!(event_loop_proxy.send_event(gfx).is_ok());
            }
            Err(err) => {
                log::error!("fatal startup error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
