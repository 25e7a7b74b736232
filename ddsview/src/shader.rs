//! HLSL compilation from a text file.
//!
//! The shader source lives next to the executable rather than inside it so
//! it can be edited without rebuilding, like the original sample's media
//! lookup. Both entry points use 10level9 profiles so every Direct3D 11
//! feature level can run them.

use std::path::{Path, PathBuf};
use std::slice;

use windows::core::{s, PCSTR};
use windows::Win32::Graphics::Direct3D::Fxc::{
    D3DCompile, D3DCOMPILE_DEBUG, D3DCOMPILE_ENABLE_STRICTNESS,
};
use windows::Win32::Graphics::Direct3D::ID3DBlob;

use crate::error::{assume_d3d11_init, AppError};

/// The default shader file: `shaders/ddsview.hlsl` beside the executable,
/// falling back to the working directory for `cargo run`.
pub fn default_shader_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("shaders/ddsview.hlsl")))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from("shaders/ddsview.hlsl"))
}

/// Compile the scene vertex and pixel shaders from `path`.
pub fn compile_file(path: &Path) -> Result<(ID3DBlob, ID3DBlob), AppError> {
    let source = std::fs::read(path)?;
    let vs = compile(&source, s!("RenderSceneVS"), s!("vs_4_0_level_9_1"))?;
    let ps = compile(&source, s!("RenderScenePS"), s!("ps_4_0_level_9_1"))?;
    Ok((vs, ps))
}

fn compile(source: &[u8], entry: PCSTR, target: PCSTR) -> Result<ID3DBlob, AppError> {
    let mut flags = D3DCOMPILE_ENABLE_STRICTNESS;
    if cfg!(debug_assertions) {
        flags |= D3DCOMPILE_DEBUG;
    }

    let mut blob = None;
    let mut errors = None;
    let result = unsafe {
        D3DCompile(
            source.as_ptr().cast(),
            source.len(),
            None,
            None,
            None,
            entry,
            target,
            flags,
            0,
            &mut blob,
            Some(&mut errors),
        )
    };

    if let Err(error) = result {
        let message = errors
            .map(|blob| String::from_utf8_lossy(blob_bytes(&blob)).into_owned())
            .unwrap_or_else(|| error.message());
        return Err(AppError::ShaderCompile(message));
    }

    assume_d3d11_init!(blob, "D3DCompile");
    Ok(blob)
}

/// The compiled bytecode held by `blob`.
pub fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    // SAFETY: the slice lives as long as the blob it borrows from.
    unsafe { slice::from_raw_parts(blob.GetBufferPointer().cast::<u8>(), blob.GetBufferSize()) }
}
