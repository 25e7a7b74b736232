use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;

use windows::core::{w, PWSTR};
use windows::Win32::Foundation::{HWND, MAX_PATH};
use windows::Win32::UI::Controls::Dialogs::{
    GetOpenFileNameW, OFN_FILEMUSTEXIST, OFN_PATHMUSTEXIST, OPENFILENAMEW,
};

/// Ask the user for a DDS file through the common open dialog.
///
/// `None` when the dialog was cancelled; cancellation is not an error.
pub fn open_texture(owner: HWND) -> Option<PathBuf> {
    let mut file = [0u16; MAX_PATH as usize];
    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: w!("DDS Textures (*.dds)\0*.dds\0All Files (*.*)\0*.*\0"),
        nFilterIndex: 1,
        lpstrFile: PWSTR(file.as_mut_ptr()),
        nMaxFile: file.len() as u32,
        Flags: OFN_PATHMUSTEXIST | OFN_FILEMUSTEXIST,
        ..Default::default()
    };

    if !unsafe { GetOpenFileNameW(&mut ofn) }.as_bool() {
        return None;
    }

    let len = file.iter().position(|&c| c == 0).unwrap_or(file.len());
    Some(PathBuf::from(OsString::from_wide(&file[..len])))
}
