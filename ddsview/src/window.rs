//! Window class registration and the message pump.
//!
//! The window holds a pointer to the [`App`] in its user data so the
//! window procedure can forward keyboard, paint and size messages to it.

use std::ffi::c_void;
use std::mem;

use tracing::error;
use windows::core::s;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleA;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, CreateWindowExA, DefWindowProcA, DispatchMessageA, LoadCursorW,
    PeekMessageA, PostQuitMessage, RegisterClassExA, SetWindowLongPtrA, ShowWindow,
    TranslateMessage, CREATESTRUCTA, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA,
    GetWindowLongPtrA, IDC_ARROW, MSG, PM_REMOVE, SIZE_MINIMIZED, SW_SHOW, WINDOW_EX_STYLE,
    WM_CREATE, WM_DESTROY, WM_KEYDOWN, WM_PAINT, WM_QUIT, WM_SIZE, WNDCLASSEXA,
    WS_OVERLAPPEDWINDOW,
};

use crate::app::App;
use crate::cli::Args;
use crate::error::AppError;

pub fn run(args: Args) -> Result<(), AppError> {
    let mut app = App::new(args)?;

    let instance = unsafe { GetModuleHandleA(None)? };

    let wc = WNDCLASSEXA {
        cbSize: mem::size_of::<WNDCLASSEXA>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: s!("DdsViewWindowClass"),
        ..Default::default()
    };
    let atom = unsafe { RegisterClassExA(&wc) };
    debug_assert_ne!(atom, 0);

    let (width, height) = app.window_size();
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

    let hwnd = unsafe {
        CreateWindowExA(
            WINDOW_EX_STYLE::default(),
            s!("DdsViewWindowClass"),
            s!("ddsview"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None, // no parent window
            None, // no menus
            Some(instance.into()),
            Some(&mut app as *mut App as *const c_void),
        )?
    };

    app.bind_to_window(hwnd)?;
    let _ = unsafe { ShowWindow(hwnd, SW_SHOW) };

    loop {
        let mut message = MSG::default();

        if unsafe { PeekMessageA(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            unsafe {
                let _ = TranslateMessage(&message);
                DispatchMessageA(&message);
            }

            if message.message == WM_QUIT {
                break;
            }
        }
    }

    Ok(())
}

fn app_wndproc(app: &mut App, window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
    match message {
        WM_PAINT => {
            app.update();
            if let Err(err) = app.render() {
                error!("render failed: {err}");
            }
            true
        }
        WM_KEYDOWN => {
            app.on_key_down(window, wparam.0 as u16);
            true
        }
        WM_SIZE => {
            if wparam.0 as u32 != SIZE_MINIMIZED {
                let width = (lparam.0 & 0xffff) as u32;
                let height = ((lparam.0 >> 16) & 0xffff) as u32;
                if let Err(err) = app.resize(width, height) {
                    error!("resize failed: {err}");
                }
            }
            true
        }
        _ => false,
    }
}

extern "system" fn wndproc(window: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match message {
        WM_CREATE => {
            unsafe {
                let create_struct: &CREATESTRUCTA = mem::transmute(lparam);
                SetWindowLongPtrA(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
            }
            LRESULT::default()
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT::default()
        }
        _ => {
            let user_data = unsafe { GetWindowLongPtrA(window, GWLP_USERDATA) };
            let app = std::ptr::NonNull::<App>::new(user_data as _);
            let handled = app.map_or(false, |mut app| {
                app_wndproc(unsafe { app.as_mut() }, window, message, wparam, lparam)
            });

            if handled {
                LRESULT::default()
            } else {
                unsafe { DefWindowProcA(window, message, wparam, lparam) }
            }
        }
    }
}
