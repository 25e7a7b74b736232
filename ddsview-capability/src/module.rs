use once_cell::sync::OnceCell;
use tracing::debug;
use windows::core::PCSTR;
use windows::Win32::Foundation::{FARPROC, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryA};

/// Loaded module handles are process-lifetime singletons and are never
/// freed, so sharing the raw handle across threads is sound.
struct ModuleHandle(HMODULE);

unsafe impl Send for ModuleHandle {}
unsafe impl Sync for ModuleHandle {}

/// A shared library that may not exist on the running system.
///
/// The first call to [`handle`](Self::handle) attempts the load; the outcome,
/// including failure, is recorded permanently and every later call is a pure
/// read. There is no retry-after-failure: if a library is absent at first
/// probe it stays absent for the process lifetime.
pub struct OptionalModule {
    /// NUL-terminated ANSI module name.
    name: &'static [u8],
    handle: OnceCell<Option<ModuleHandle>>,
}

/// Direct3D 11 runtime.
pub static D3D11: OptionalModule = OptionalModule::new(b"d3d11.dll\0");
/// DXGI factory library.
pub static DXGI: OptionalModule = OptionalModule::new(b"dxgi.dll\0");
/// Windowing/multi-monitor library.
pub static USER32: OptionalModule = OptionalModule::new(b"user32.dll\0");
/// XInput, newest supported version first.
pub static XINPUT_1_4: OptionalModule = OptionalModule::new(b"xinput1_4.dll\0");
pub static XINPUT_9_1_0: OptionalModule = OptionalModule::new(b"xinput9_1_0.dll\0");

impl OptionalModule {
    pub const fn new(name: &'static [u8]) -> Self {
        OptionalModule {
            name,
            handle: OnceCell::new(),
        }
    }

    fn name_str(&self) -> &str {
        std::str::from_utf8(&self.name[..self.name.len() - 1]).unwrap_or("<module>")
    }

    /// The module handle, loading the library on first use.
    pub fn handle(&self) -> Option<HMODULE> {
        self.handle
            .get_or_init(|| {
                match unsafe { LoadLibraryA(PCSTR::from_raw(self.name.as_ptr())) } {
                    Ok(handle) if !handle.is_invalid() => {
                        debug!(module = self.name_str(), "loaded optional library");
                        Some(ModuleHandle(handle))
                    }
                    _ => {
                        debug!(module = self.name_str(), "optional library unavailable");
                        None
                    }
                }
            })
            .as_ref()
            .map(|module| module.0)
    }

    /// Whether the library is available, probing it on first call.
    pub fn loaded(&self) -> bool {
        self.handle().is_some()
    }

    /// Look up an entry point. `None` when either the library or the symbol
    /// is missing; both are expected outcomes, not errors.
    pub fn symbol(&self, name: PCSTR) -> FARPROC {
        let handle = self.handle()?;
        unsafe { GetProcAddress(handle, name) }
    }
}

/// A (library, symbol) pair resolved at most once per process.
///
/// The slot caches the outcome of the single `GetProcAddress` call, so a
/// capability wrapper built on top of it never re-queries the OS loader.
pub struct CachedSymbol {
    module: &'static OptionalModule,
    /// NUL-terminated symbol name.
    name: &'static [u8],
    slot: OnceCell<FARPROC>,
}

impl CachedSymbol {
    pub const fn new(module: &'static OptionalModule, name: &'static [u8]) -> Self {
        CachedSymbol {
            module,
            name,
            slot: OnceCell::new(),
        }
    }

    pub fn get(&self) -> FARPROC {
        *self
            .slot
            .get_or_init(|| self.module.symbol(PCSTR::from_raw(self.name.as_ptr())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::core::s;

    #[test]
    fn absent_library_stays_absent() {
        static MISSING: OptionalModule = OptionalModule::new(b"ddsview-no-such-library.dll\0");
        assert!(!MISSING.loaded());
        assert!(!MISSING.loaded());
        assert!(MISSING.symbol(s!("AnyEntryPoint")).is_none());
    }

    #[test]
    fn cached_symbol_is_stable() {
        static KERNEL32: OptionalModule = OptionalModule::new(b"kernel32.dll\0");
        static GET_TICK_COUNT: CachedSymbol = CachedSymbol::new(&KERNEL32, b"GetTickCount\0");

        let first = GET_TICK_COUNT.get().map(|f| f as usize);
        let second = GET_TICK_COUNT.get().map(|f| f as usize);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn cached_symbol_of_absent_library_is_none() {
        static MISSING: OptionalModule = OptionalModule::new(b"ddsview-no-such-library.dll\0");
        static SYMBOL: CachedSymbol = CachedSymbol::new(&MISSING, b"AnyEntryPoint\0");
        assert!(SYMBOL.get().is_none());
        assert!(SYMBOL.get().is_none());
    }
}
