use std::path::{Path, PathBuf};

use ddsview_common::image::Image;
use ddsview_common::Size;
use windows::Win32::Graphics::Direct3D::D3D_SRV_DIMENSION_TEXTURE2D;
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Device, ID3D11ShaderResourceView, D3D11_BIND_SHADER_RESOURCE,
    D3D11_SHADER_RESOURCE_VIEW_DESC, D3D11_SHADER_RESOURCE_VIEW_DESC_0, D3D11_SUBRESOURCE_DATA,
    D3D11_TEX2D_SRV, D3D11_TEXTURE2D_DESC, D3D11_USAGE_IMMUTABLE,
};
use windows::Win32::Graphics::Dxgi::Common::{DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_SAMPLE_DESC};

use crate::error::{assume_d3d11_init, AppError};

/// A texture decoded from disk and uploaded as a shader resource.
pub struct LoadedTexture {
    pub srv: ID3D11ShaderResourceView,
    pub size: Size<u32>,
    pub path: PathBuf,
}

impl LoadedTexture {
    /// Decode `path` (DDS included) and upload it as an immutable RGBA8
    /// texture with a single mip.
    pub fn from_file(device: &ID3D11Device, path: &Path) -> Result<Self, AppError> {
        let image = Image::load(path)?;

        let desc = D3D11_TEXTURE2D_DESC {
            Width: image.size.width,
            Height: image.size.height,
            MipLevels: 1,
            ArraySize: 1,
            Format: DXGI_FORMAT_R8G8B8A8_UNORM,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_IMMUTABLE,
            BindFlags: D3D11_BIND_SHADER_RESOURCE.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
        };
        let data = D3D11_SUBRESOURCE_DATA {
            pSysMem: image.bytes.as_ptr().cast(),
            SysMemPitch: image.pitch as u32,
            SysMemSlicePitch: 0,
        };

        unsafe {
            let mut texture = None;
            device.CreateTexture2D(&desc, Some(&data), Some(&mut texture))?;
            assume_d3d11_init!(texture, "CreateTexture2D");

            let mut srv = None;
            device.CreateShaderResourceView(
                &texture,
                Some(&D3D11_SHADER_RESOURCE_VIEW_DESC {
                    Format: desc.Format,
                    ViewDimension: D3D_SRV_DIMENSION_TEXTURE2D,
                    Anonymous: D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                        Texture2D: D3D11_TEX2D_SRV {
                            MostDetailedMip: 0,
                            MipLevels: u32::MAX,
                        },
                    },
                }),
                Some(&mut srv),
            )?;
            assume_d3d11_init!(srv, "CreateShaderResourceView");

            Ok(LoadedTexture {
                srv,
                size: image.size,
                path: path.to_path_buf(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddsview_capability::factory;
    use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_WARP, D3D_FEATURE_LEVEL_11_0};
    use windows::Win32::Graphics::Direct3D11::D3D11_CREATE_DEVICE_FLAG;

    #[test]
    fn png_uploads_as_srv() {
        let (device, _, _context) = factory::create_device(
            None,
            D3D_DRIVER_TYPE_WARP,
            D3D11_CREATE_DEVICE_FLAG(0),
            &[D3D_FEATURE_LEVEL_11_0],
        )
        .expect("WARP device");

        let path = std::env::temp_dir().join("ddsview-texture-test.png");
        image::RgbaImage::from_pixel(8, 4, image::Rgba([0, 128, 255, 255]))
            .save(&path)
            .unwrap();

        let texture = LoadedTexture::from_file(&device, &path).unwrap();
        assert_eq!(texture.size, Size::new(8, 4));
        assert_eq!(texture.path, path);

        std::fs::remove_file(&path).ok();
    }
}
