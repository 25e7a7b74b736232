//! Dynamically resolved device and factory creation.
//!
//! These wrap the two entry points a statically linked build would import
//! from `dxgi.dll` and `d3d11.dll`. When either library (or symbol) is
//! missing the wrappers report [`CapabilityError::NotPresent`] instead of
//! failing to start the process.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use windows::core::{GUID, HRESULT, Interface};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE, D3D_FEATURE_LEVEL};
use windows::Win32::Graphics::Direct3D11::{
    D3D11_CREATE_DEVICE_FLAG, D3D11_SDK_VERSION, ID3D11Device, ID3D11DeviceContext,
};
use windows::Win32::Graphics::Dxgi::IDXGIAdapter;

use crate::error::CapabilityError;
use crate::module::{self, CachedSymbol};

type CreateDxgiFactoryFn = unsafe extern "system" fn(*const GUID, *mut *mut c_void) -> HRESULT;

#[allow(clippy::type_complexity)]
type D3D11CreateDeviceFn = unsafe extern "system" fn(
    *mut c_void,
    D3D_DRIVER_TYPE,
    HMODULE,
    D3D11_CREATE_DEVICE_FLAG,
    *const D3D_FEATURE_LEVEL,
    u32,
    u32,
    *mut *mut c_void,
    *mut D3D_FEATURE_LEVEL,
    *mut *mut c_void,
) -> HRESULT;

static CREATE_DXGI_FACTORY1: CachedSymbol =
    CachedSymbol::new(&module::DXGI, b"CreateDXGIFactory1\0");
static D3D11_CREATE_DEVICE: CachedSymbol =
    CachedSymbol::new(&module::D3D11, b"D3D11CreateDevice\0");

/// Create a DXGI factory through the dynamically resolved
/// `CreateDXGIFactory1`.
pub fn create_dxgi_factory1<T: Interface>() -> Result<T, CapabilityError> {
    let Some(func) = CREATE_DXGI_FACTORY1.get() else {
        return Err(CapabilityError::NotPresent);
    };
    let func: CreateDxgiFactoryFn = unsafe { mem::transmute(func) };

    let mut out: *mut c_void = ptr::null_mut();
    unsafe {
        func(&T::IID, &mut out)
            .ok()
            .map_err(CapabilityError::Native)?;
        Ok(T::from_raw(out))
    }
}

/// Create a Direct3D 11 device and immediate context through the dynamically
/// resolved `D3D11CreateDevice`. Native failure HRESULTs pass through
/// unchanged inside [`CapabilityError::Native`].
pub fn create_device(
    adapter: Option<&IDXGIAdapter>,
    driver_type: D3D_DRIVER_TYPE,
    flags: D3D11_CREATE_DEVICE_FLAG,
    feature_levels: &[D3D_FEATURE_LEVEL],
) -> Result<(ID3D11Device, D3D_FEATURE_LEVEL, ID3D11DeviceContext), CapabilityError> {
    let Some(func) = D3D11_CREATE_DEVICE.get() else {
        return Err(CapabilityError::NotPresent);
    };
    let func: D3D11CreateDeviceFn = unsafe { mem::transmute(func) };

    let adapter = adapter.map_or(ptr::null_mut(), |adapter| adapter.as_raw());
    let mut device: *mut c_void = ptr::null_mut();
    let mut context: *mut c_void = ptr::null_mut();
    let mut level = D3D_FEATURE_LEVEL::default();

    unsafe {
        func(
            adapter,
            driver_type,
            HMODULE::default(),
            flags,
            feature_levels.as_ptr(),
            feature_levels.len() as u32,
            D3D11_SDK_VERSION,
            &mut device,
            &mut level,
            &mut context,
        )
        .ok()
        .map_err(CapabilityError::Native)?;

        Ok((
            ID3D11Device::from_raw(device),
            level,
            ID3D11DeviceContext::from_raw(context),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_WARP, D3D_FEATURE_LEVEL_10_0};
    use windows::Win32::Graphics::Dxgi::IDXGIFactory1;

    #[test]
    fn warp_device_creates_through_resolved_entry_point() {
        let (device, level, _context) = create_device(
            None,
            D3D_DRIVER_TYPE_WARP,
            D3D11_CREATE_DEVICE_FLAG(0),
            &[D3D_FEATURE_LEVEL_10_0],
        )
        .expect("WARP device");
        assert_eq!(level, D3D_FEATURE_LEVEL_10_0);
        assert_eq!(unsafe { device.GetFeatureLevel() }, D3D_FEATURE_LEVEL_10_0);
    }

    #[test]
    fn factory_creates_through_resolved_entry_point() {
        let factory = create_dxgi_factory1::<IDXGIFactory1>().expect("DXGI factory");
        // Any Windows system running the tests has at least one adapter.
        assert!(unsafe { factory.EnumAdapters(0) }.is_ok());
    }
}
