use ddsview_capability::CapabilityError;
use thiserror::Error;

use crate::capture::CaptureError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("direct3d 11 is not available on this system")]
    NoDirect3D11(#[source] CapabilityError),
    #[error("shader compile error: {0}")]
    ShaderCompile(String),
    #[error("texture load error")]
    TextureLoad(#[from] ddsview_common::image::ImageError),
    #[error("screenshot error")]
    Capture(#[from] CaptureError),
    #[error("direct3d driver error")]
    Direct3D(#[from] windows::core::Error),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

/// Unwrap a Direct3D out parameter that is always `Some` after the creating
/// call returned `S_OK`.
macro_rules! assume_d3d11_init {
    ($value:ident, $call:literal) => {
        let $value = $value.expect($call);
    };
    (mut $value:ident, $call:literal) => {
        let mut $value = $value.expect($call);
    };
}

pub(crate) use assume_d3d11_init;
