//! Win32 backend
//!
//! Characters come from `ToUnicodeEx` against the foreground window's
//! keyboard layout, with a synthesized 256-entry key state per modifier
//! combination. AltGr is emulated as Ctrl+Alt, matching how Windows layouts
//! define their third character tier. Layout changes are observed through
//! `WM_INPUTLANGCHANGE` on a hidden listener window.

use std::panic::catch_unwind;
use std::thread;

use log::error;
use once_cell::sync::OnceCell;
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Globalization::{LCIDToLocaleName, LOCALE_NAME_MAX_LENGTH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ActivateKeyboardLayout, GetKeyboardLayout, GetKeyboardLayoutNameW, MapVirtualKeyExW,
    ToUnicodeEx, ACTIVATE_KEYBOARD_LAYOUT_FLAGS, MAPVK_VSC_TO_VK, MAPVK_VK_TO_CHAR, VK_CONTROL,
    VK_MENU, VK_SHIFT,
};
use windows::Win32::UI::TextServices::HKL;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetForegroundWindow, GetMessageW,
    GetWindowThreadProcessId, RegisterClassW, TranslateMessage, HWND_MESSAGE, MSG, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_INPUTLANGCHANGE, WNDCLASSW,
};

use crate::error::Result;
use crate::resolve::{printable, KeyResolver};
use crate::types::Modifier;

const KL_NAMELENGTH: usize = 9;
const SPACE_SCAN_CODE: u32 = 0x0039;

// Bit 2 asks ToUnicodeEx to leave the kernel's persistent dead-key state
// untouched (Windows 10 1607+); without it, probing a dead key corrupts the
// state the user's next real keystroke composes against.
const NO_KEYBOARD_STATE_CHANGE: u32 = 1 << 2;

/// Keyboard layout of the foreground window's thread; the active layout is
/// per-thread on Windows, and the foreground thread is the one the user is
/// typing into.
fn foreground_hkl() -> HKL {
    unsafe {
        let foreground = GetForegroundWindow();
        let thread_id = if foreground.0 != 0 {
            GetWindowThreadProcessId(foreground, None)
        } else {
            0
        };
        GetKeyboardLayout(thread_id)
    }
}

/// Key resolver backed by the Win32 keyboard layout APIs.
///
/// Windows needs no persistent handle; every query re-reads the foreground
/// layout.
pub struct WinResolver;

impl WinResolver {
    pub fn new() -> Result<Self> {
        Ok(WinResolver)
    }
}

impl KeyResolver for WinResolver {
    fn layout_name(&mut self) -> String {
        unsafe {
            ActivateKeyboardLayout(foreground_hkl(), ACTIVATE_KEYBOARD_LAYOUT_FLAGS(0));
            let mut name = [0u16; KL_NAMELENGTH];
            if GetKeyboardLayoutNameW(&mut name).is_err() {
                return String::new();
            }
            let len = name.iter().position(|&c| c == 0).unwrap_or(name.len());
            String::from_utf16_lossy(&name[..len])
        }
    }

    fn language_tag(&mut self) -> String {
        unsafe {
            // Low word of the HKL is the language id; SORT_DEFAULT makes it
            // a locale id as-is.
            let lcid = (foreground_hkl().0 as usize & 0xffff) as u32;
            let mut buffer = [0u16; LOCALE_NAME_MAX_LENGTH as usize];
            let len = LCIDToLocaleName(lcid, Some(&mut buffer), 0);
            if len <= 0 {
                return String::new();
            }
            // Length includes the terminating NUL.
            String::from_utf16_lossy(&buffer[..len as usize - 1])
        }
    }

    /// Keys whose VK-to-char mapping has the top bit set (no character
    /// capability on this layout) resolve to `None` here but keep their
    /// snapshot entry, so snapshots stay uniform across platforms. Do not
    /// turn this into an omission.
    fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String> {
        let layout = foreground_hkl();
        unsafe {
            let virtual_key = MapVirtualKeyExW(native_code, MAPVK_VSC_TO_VK, layout);
            if virtual_key == 0 {
                return None;
            }

            // A set top bit in the VK-to-char mapping marks keys with no
            // character capability on this layout.
            if MapVirtualKeyExW(virtual_key, MAPVK_VK_TO_CHAR, layout) & 0x8000_0000 != 0 {
                return None;
            }

            let mut key_state = [0u8; 256];
            if modifier.shift() {
                key_state[VK_SHIFT.0 as usize] = 0x80;
            }
            if modifier.alt_graph() {
                key_state[VK_MENU.0 as usize] = 0x80;
                key_state[VK_CONTROL.0 as usize] = 0x80;
            }

            let mut buffer = [0u16; 8];
            let count = ToUnicodeEx(
                virtual_key,
                native_code,
                &key_state,
                &mut buffer,
                NO_KEYBOARD_STATE_CHANGE,
                layout,
            );

            if count == -1 {
                // Dead key. Translate Space once with a clean state to flush
                // anything that still got stuck, then report no character.
                let clean_state = [0u8; 256];
                let space_key = MapVirtualKeyExW(SPACE_SCAN_CODE, MAPVK_VSC_TO_VK, layout);
                let mut scratch = [0u16; 8];
                let _ = ToUnicodeEx(space_key, SPACE_SCAN_CODE, &clean_state, &mut scratch, 0, layout);
                return None;
            }
            if count <= 0 {
                return None;
            }

            printable(String::from_utf16_lossy(&buffer[..count as usize]))
        }
    }
}

static OBSERVER: OnceCell<()> = OnceCell::new();

/// Spawns the hidden listener window that receives `WM_INPUTLANGCHANGE`.
/// Safe to call more than once.
pub(crate) fn register_layout_observer() {
    OBSERVER.get_or_init(|| {
        thread::spawn(|| unsafe { run_listener_window() });
    });
}

unsafe fn run_listener_window() {
    let Ok(instance) = GetModuleHandleW(None) else {
        error!("failed to resolve module handle; layout change delivery disabled");
        return;
    };

    let class_name = w!("KeyboardLayoutListener");
    let class = WNDCLASSW {
        lpfnWndProc: Some(listener_wndproc),
        hInstance: instance.into(),
        lpszClassName: class_name,
        ..Default::default()
    };
    RegisterClassW(&class);

    let window = CreateWindowExW(
        WINDOW_EX_STYLE(0),
        class_name,
        w!(""),
        WINDOW_STYLE(0),
        0,
        0,
        0,
        0,
        HWND_MESSAGE,
        None,
        instance,
        None,
    );
    if window.0 == 0 {
        error!("failed to create listener window; layout change delivery disabled");
        return;
    }

    let mut message = MSG::default();
    while GetMessageW(&mut message, HWND(0), 0, 0).as_bool() {
        let _ = TranslateMessage(&message);
        DispatchMessageW(&message);
    }
}

/// Runs on the listener thread, which is never the thread that initialized
/// the crate. No panic may escape into the dispatch loop.
unsafe extern "system" fn listener_wndproc(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_INPUTLANGCHANGE {
        let outcome = catch_unwind(|| {
            let mut resolver = WinResolver;
            let language = resolver.language_tag();
            let layout = resolver.layout_name();
            crate::notify::registry().notify(&language, &layout);
        });
        if outcome.is_err() {
            error!("layout change handler panicked; notification dropped");
        }
        return LRESULT(0);
    }
    DefWindowProcW(window, message, wparam, lparam)
}
