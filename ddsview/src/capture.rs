//! Back-buffer screenshots.
//!
//! `D3DX11SaveTextureToFileW` is long gone, so the save path is done by
//! hand: copy the (resolved, if multisampled) back buffer into a staging
//! texture, map it, and hand the rows to the `image` crate.

use std::fmt;

use clap::ValueEnum;

/// Encodings a screenshot can be written in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ImageFileFormat {
    Bmp,
    Jpeg,
    Png,
}

impl ImageFileFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFileFormat::Bmp => "bmp",
            ImageFileFormat::Jpeg => "jpg",
            ImageFileFormat::Png => "png",
        }
    }

    fn encode_format(self) -> image::ImageFormat {
        match self {
            ImageFileFormat::Bmp => image::ImageFormat::Bmp,
            ImageFileFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFileFormat::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for ImageFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFileFormat::Bmp => f.write_str("bmp"),
            ImageFileFormat::Jpeg => f.write_str("jpeg"),
            ImageFileFormat::Png => f.write_str("png"),
        }
    }
}

#[cfg(windows)]
pub use self::win::{save_texture, snap_backbuffer, CaptureError};

#[cfg(windows)]
mod win {
    use std::path::Path;
    use std::ptr;

    use thiserror::Error;
    use windows::Win32::Graphics::Direct3D11::{
        ID3D11Device, ID3D11DeviceContext, ID3D11Texture2D, D3D11_CPU_ACCESS_READ,
        D3D11_MAPPED_SUBRESOURCE, D3D11_MAP_READ, D3D11_TEXTURE2D_DESC, D3D11_USAGE_DEFAULT,
        D3D11_USAGE_STAGING,
    };
    use windows::Win32::Graphics::Dxgi::Common::{
        DXGI_FORMAT, DXGI_FORMAT_B8G8R8A8_UNORM, DXGI_FORMAT_B8G8R8A8_UNORM_SRGB,
        DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_FORMAT_R8G8B8A8_UNORM_SRGB, DXGI_SAMPLE_DESC,
    };
    use windows::Win32::Graphics::Dxgi::IDXGISwapChain;

    use super::ImageFileFormat;
    use crate::error::assume_d3d11_init;

    #[derive(Error, Debug)]
    pub enum CaptureError {
        #[error("no active swap chain to capture")]
        NoActiveSwapchain,
        #[error("device context unavailable")]
        ContextUnavailable,
        #[error("cannot encode back buffer format {0:?}")]
        UnsupportedFormat(DXGI_FORMAT),
        #[error("direct3d driver error")]
        Native(#[from] windows::core::Error),
        #[error("image encode error")]
        Encode(#[from] image::ImageError),
    }

    /// Capture the currently presented frame to `path`.
    ///
    /// The steps run strictly in order and any failure short-circuits the
    /// rest; textures acquired along the way are released on every exit
    /// path.
    pub fn snap_backbuffer(
        swapchain: Option<&IDXGISwapChain>,
        device: Option<&ID3D11Device>,
        context: Option<&ID3D11DeviceContext>,
        format: ImageFileFormat,
        path: &Path,
    ) -> Result<(), CaptureError> {
        let Some(swapchain) = swapchain else {
            return Err(CaptureError::NoActiveSwapchain);
        };
        let backbuffer: ID3D11Texture2D = unsafe { swapchain.GetBuffer(0)? };

        let (Some(device), Some(context)) = (device, context) else {
            return Err(CaptureError::ContextUnavailable);
        };

        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { backbuffer.GetDesc(&mut desc) };

        // A multisampled back buffer cannot be copied to staging memory;
        // resolve it into a plain texture first. The resolve target is
        // best-effort: if it cannot be created the original texture goes to
        // the encoder unchanged.
        let resolved = if desc.SampleDesc.Count > 1 {
            resolve_multisampled(device, context, &backbuffer, &desc)
        } else {
            None
        };

        let source = resolved.as_ref().unwrap_or(&backbuffer);
        save_texture(device, context, source, format, path)
    }

    pub(crate) fn resolve_multisampled(
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        source: &ID3D11Texture2D,
        desc: &D3D11_TEXTURE2D_DESC,
    ) -> Option<ID3D11Texture2D> {
        let resolve_desc = D3D11_TEXTURE2D_DESC {
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: 0,
            CPUAccessFlags: 0,
            MiscFlags: 0,
            ..*desc
        };

        let mut resolved = None;
        unsafe { device.CreateTexture2D(&resolve_desc, None, Some(&mut resolved)) }.ok()?;
        let resolved = resolved?;
        unsafe { context.ResolveSubresource(&resolved, 0, source, 0, desc.Format) };
        Some(resolved)
    }

    /// Read `texture` back through a staging copy and encode it to `path`.
    pub fn save_texture(
        device: &ID3D11Device,
        context: &ID3D11DeviceContext,
        texture: &ID3D11Texture2D,
        format: ImageFileFormat,
        path: &Path,
    ) -> Result<(), CaptureError> {
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { texture.GetDesc(&mut desc) };

        let staging_desc = D3D11_TEXTURE2D_DESC {
            MipLevels: 1,
            ArraySize: 1,
            Usage: D3D11_USAGE_STAGING,
            BindFlags: 0,
            CPUAccessFlags: D3D11_CPU_ACCESS_READ.0 as u32,
            MiscFlags: 0,
            ..desc
        };
        let mut staging = None;
        unsafe { device.CreateTexture2D(&staging_desc, None, Some(&mut staging))? };
        assume_d3d11_init!(staging, "CreateTexture2D");

        unsafe { context.CopyResource(&staging, texture) };

        let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
        unsafe { context.Map(&staging, 0, D3D11_MAP_READ, 0, Some(&mut mapped))? };

        // Rows may be padded; repack them tightly before unmapping.
        let width = desc.Width as usize;
        let height = desc.Height as usize;
        let mut pixels = vec![0u8; width * height * 4];
        unsafe {
            for row in 0..height {
                let src = (mapped.pData as *const u8).add(row * mapped.RowPitch as usize);
                let dst = pixels.as_mut_ptr().add(row * width * 4);
                ptr::copy_nonoverlapping(src, dst, width * 4);
            }
            context.Unmap(&staging, 0);
        }

        match desc.Format {
            DXGI_FORMAT_R8G8B8A8_UNORM | DXGI_FORMAT_R8G8B8A8_UNORM_SRGB => {}
            DXGI_FORMAT_B8G8R8A8_UNORM | DXGI_FORMAT_B8G8R8A8_UNORM_SRGB => {
                for pixel in pixels.chunks_exact_mut(4) {
                    pixel.swap(0, 2);
                }
            }
            other => return Err(CaptureError::UnsupportedFormat(other)),
        }

        match format {
            // The JPEG encoder has no alpha channel to write.
            ImageFileFormat::Jpeg => {
                let rgb: Vec<u8> = pixels
                    .chunks_exact(4)
                    .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
                    .collect();
                image::save_buffer_with_format(
                    path,
                    &rgb,
                    desc.Width,
                    desc.Height,
                    image::ExtendedColorType::Rgb8,
                    image::ImageFormat::Jpeg,
                )?;
            }
            _ => {
                image::save_buffer_with_format(
                    path,
                    &pixels,
                    desc.Width,
                    desc.Height,
                    image::ExtendedColorType::Rgba8,
                    format.encode_format(),
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(all(test, windows))]
mod tests {
    use std::path::Path;

    use ddsview_capability::factory;
    use windows::Win32::Graphics::Direct3D::{
        D3D_DRIVER_TYPE_WARP, D3D_FEATURE_LEVEL_10_0, D3D_FEATURE_LEVEL_11_0,
    };
    use windows::Win32::Graphics::Direct3D11::{
        ID3D11Device, ID3D11DeviceContext, D3D11_BIND_RENDER_TARGET, D3D11_CREATE_DEVICE_FLAG,
        D3D11_SUBRESOURCE_DATA, D3D11_TEXTURE2D_DESC, D3D11_USAGE_DEFAULT,
    };
    use windows::Win32::Graphics::Dxgi::Common::{DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_SAMPLE_DESC};

    use super::win::{resolve_multisampled, save_texture, snap_backbuffer, CaptureError};
    use super::ImageFileFormat;

    fn warp_device() -> (ID3D11Device, ID3D11DeviceContext) {
        let (device, _, context) = factory::create_device(
            None,
            D3D_DRIVER_TYPE_WARP,
            D3D11_CREATE_DEVICE_FLAG(0),
            &[D3D_FEATURE_LEVEL_11_0, D3D_FEATURE_LEVEL_10_0],
        )
        .expect("WARP device");
        (device, context)
    }

    #[test]
    fn missing_swapchain_short_circuits() {
        let err = snap_backbuffer(
            None,
            None,
            None,
            ImageFileFormat::Png,
            Path::new("unused.png"),
        )
        .unwrap_err();
        assert!(matches!(err, CaptureError::NoActiveSwapchain));
    }

    #[test]
    fn multisampled_texture_resolves_to_single_sample() {
        let (device, context) = warp_device();

        let desc = D3D11_TEXTURE2D_DESC {
            Width: 64,
            Height: 64,
            MipLevels: 1,
            ArraySize: 1,
            Format: DXGI_FORMAT_R8G8B8A8_UNORM,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 4,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_RENDER_TARGET.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };
        let mut texture = None;
        unsafe { device.CreateTexture2D(&desc, None, Some(&mut texture)) }.unwrap();
        let texture = texture.unwrap();

        let resolved =
            resolve_multisampled(&device, &context, &texture, &desc).expect("resolve target");

        let mut resolved_desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { resolved.GetDesc(&mut resolved_desc) };
        assert_eq!(resolved_desc.SampleDesc.Count, 1);
        assert_eq!(resolved_desc.Width, desc.Width);
        assert_eq!(resolved_desc.Height, desc.Height);
        assert_eq!(resolved_desc.Format, desc.Format);
    }

    #[test]
    fn single_sample_texture_saves_and_reloads() {
        let (device, context) = warp_device();

        let pixels: [u8; 16] = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ];
        let desc = D3D11_TEXTURE2D_DESC {
            Width: 2,
            Height: 2,
            MipLevels: 1,
            ArraySize: 1,
            Format: DXGI_FORMAT_R8G8B8A8_UNORM,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: 0,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };
        let data = D3D11_SUBRESOURCE_DATA {
            pSysMem: pixels.as_ptr().cast(),
            SysMemPitch: 8,
            SysMemSlicePitch: 0,
        };
        let mut texture = None;
        unsafe { device.CreateTexture2D(&desc, Some(&data), Some(&mut texture)) }.unwrap();
        let texture = texture.unwrap();

        let path = std::env::temp_dir().join("ddsview-capture-test.png");
        save_texture(&device, &context, &texture, ImageFileFormat::Png, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (2, 2));
        assert_eq!(reloaded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(reloaded.get_pixel(1, 1).0, [255, 255, 255, 255]);

        std::fs::remove_file(&path).ok();
    }
}
