use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("Surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, HeroError>;
