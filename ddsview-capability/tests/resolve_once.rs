#![cfg(windows)]

use ddsview_capability::module::{OptionalModule, D3D11, DXGI, USER32};
use windows::core::s;

#[test]
fn system_libraries_probe_once_and_stay_loaded() {
    // The first call performs the load; the second must observe the cached
    // outcome. Any Windows system running these tests ships all three.
    for module in [&D3D11, &DXGI, &USER32] {
        let first = module.loaded();
        let second = module.loaded();
        assert!(first);
        assert_eq!(first, second);
    }
}

#[test]
fn symbol_lookup_agrees_with_loadedness() {
    assert_eq!(
        D3D11.symbol(s!("D3D11CreateDevice")).is_some(),
        D3D11.loaded()
    );
    // A symbol that never existed resolves to an absence, not an error.
    assert!(D3D11.symbol(s!("D3D11CreateDeviceButBetter")).is_none());
}

#[test]
fn absent_library_is_a_stable_fact() {
    static MISSING: OptionalModule = OptionalModule::new(b"ddsview-integration-missing.dll\0");
    assert!(!MISSING.loaded());
    assert!(MISSING.symbol(s!("Whatever")).is_none());
    // No retry-after-failure: still absent.
    assert!(!MISSING.loaded());
}
