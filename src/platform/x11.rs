//! X11/XKB backend
//!
//! Character resolution works by synthesizing a key-press event for the
//! requested keycode and modifier mask and running it through the input
//! context (or a plain keysym lookup when no context could be created).
//! X11 sends no push notification for layout changes in this design; the
//! consumer observes changes by re-querying.

use std::mem;
use std::os::raw::{c_char, c_int, c_uchar, c_uint, c_ulong, c_ushort};
use std::ptr;

use x11::xlib;

use crate::error::{Error, Result};
use crate::resolve::{printable, KeyResolver};
use crate::types::Modifier;

// Xlib's XN* string keys, NUL-terminated for the variadic calls.
const XN_QUERY_INPUT_STYLE: &[u8] = b"queryInputStyle\0";
const XN_INPUT_STYLE: &[u8] = b"inputStyle\0";
const XN_CLIENT_WINDOW: &[u8] = b"clientWindow\0";
const XN_FOCUS_WINDOW: &[u8] = b"focusWindow\0";

// The x11 crate declares the XIM entry points but not the style list they
// return, nor the XkbUseCoreKbd device spec; these mirror the Xlib headers.
type XIMStyle = c_ulong;

#[repr(C)]
struct XIMStyles {
    count_styles: c_ushort,
    supported_styles: *mut XIMStyle,
}

const XKB_USE_CORE_KBD: c_uint = 0x0100;

// XKB group carried in bits 13-14 of the event state.
const GROUP_1_STATE: c_uint = 0x2000;
const GROUP_2_STATE: c_uint = 0x4000;

/// Key resolver backed by an X11 display connection.
///
/// The display, input method, and input context are owned exclusively by
/// this resolver and live until it is dropped; they are never handed out.
pub struct X11Resolver {
    display: *mut xlib::Display,
    input_method: xlib::XIM,
    input_context: xlib::XIC,
    // Group bits shared by every resolution in a batch; see refresh().
    base_state: c_uint,
}

impl X11Resolver {
    pub fn new() -> Result<Self> {
        unsafe {
            let display = xlib::XOpenDisplay(b"\0".as_ptr().cast());
            if display.is_null() {
                return Err(Error::DisplayUnavailable);
            }

            let input_method =
                xlib::XOpenIM(display, ptr::null_mut(), ptr::null_mut(), ptr::null_mut());
            if input_method.is_null() {
                xlib::XCloseDisplay(display);
                return Err(Error::InputMethodUnavailable);
            }

            let style = match Self::find_input_style(input_method) {
                Some(style) => style,
                None => {
                    xlib::XCloseIM(input_method);
                    xlib::XCloseDisplay(display);
                    return Err(Error::UnsupportedInputStyle);
                }
            };

            // Resolution falls back to XLookupString when no focus window is
            // available to attach a context to.
            let mut window: xlib::Window = 0;
            let mut revert_to: c_int = 0;
            xlib::XGetInputFocus(display, &mut window, &mut revert_to);

            let mut input_context: xlib::XIC = ptr::null_mut();
            if window != 0 && window != xlib::PointerRoot as xlib::Window {
                input_context = xlib::XCreateIC(
                    input_method,
                    XN_INPUT_STYLE.as_ptr() as *const c_char,
                    style,
                    XN_CLIENT_WINDOW.as_ptr() as *const c_char,
                    window,
                    XN_FOCUS_WINDOW.as_ptr() as *const c_char,
                    window,
                    ptr::null_mut::<c_char>(),
                );
            }

            let mut resolver = Self {
                display,
                input_method,
                input_context,
                base_state: 0,
            };
            resolver.refresh();
            Ok(resolver)
        }
    }

    unsafe fn find_input_style(input_method: xlib::XIM) -> Option<XIMStyle> {
        let wanted = (xlib::XIMPreeditNothing | xlib::XIMStatusNothing) as XIMStyle;

        let mut styles: *mut XIMStyles = ptr::null_mut();
        xlib::XGetIMValues(
            input_method,
            XN_QUERY_INPUT_STYLE.as_ptr() as *const c_char,
            &mut styles as *mut *mut XIMStyles,
            ptr::null_mut::<c_char>(),
        );
        if styles.is_null() {
            return None;
        }

        let mut found = None;
        let supported = (*styles).supported_styles;
        for i in 0..(*styles).count_styles as isize {
            if *supported.offset(i) == wanted {
                found = Some(wanted);
                break;
            }
        }

        xlib::XFree(styles.cast());
        found
    }

    /// Current XKB group index, from the core keyboard state.
    unsafe fn current_group(&self) -> c_uchar {
        let mut state: xlib::XkbStateRec = mem::zeroed();
        xlib::XkbGetState(self.display, XKB_USE_CORE_KBD, &mut state);
        state.group
    }

    /// Reads the root window `_XKB_RULES_NAMES` property, returning the
    /// layout and variant fields.
    unsafe fn rules_names(&self) -> Option<(String, String)> {
        let atom = xlib::XInternAtom(
            self.display,
            b"_XKB_RULES_NAMES\0".as_ptr().cast(),
            xlib::True,
        );
        if atom == 0 {
            return None;
        }

        let root = xlib::XDefaultRootWindow(self.display);
        let mut actual_type: xlib::Atom = 0;
        let mut actual_format: c_int = 0;
        let mut item_count: c_ulong = 0;
        let mut bytes_after: c_ulong = 0;
        let mut data: *mut c_uchar = ptr::null_mut();

        let status = xlib::XGetWindowProperty(
            self.display,
            root,
            atom,
            0,
            1024,
            xlib::False,
            xlib::AnyPropertyType as xlib::Atom,
            &mut actual_type,
            &mut actual_format,
            &mut item_count,
            &mut bytes_after,
            &mut data,
        );
        if status != 0 || data.is_null() {
            return None;
        }

        // The property holds five NUL-separated strings:
        // rules, model, layout, variant, options.
        let raw = std::slice::from_raw_parts(data, item_count as usize);
        let fields: Vec<String> = raw
            .split(|&byte| byte == 0)
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        xlib::XFree(data.cast());

        let layout = fields.get(2).cloned().unwrap_or_default();
        let variant = fields.get(3).cloned().unwrap_or_default();
        if layout.is_empty() {
            return None;
        }
        Some((layout, variant))
    }
}

impl KeyResolver for X11Resolver {
    /// One server round trip for the whole batch: re-pulls the keyboard
    /// mapping and the active group, which every subsequent resolution
    /// reuses.
    fn refresh(&mut self) {
        unsafe {
            let mut mapping_event: xlib::XMappingEvent = mem::zeroed();
            mapping_event.type_ = xlib::MappingNotify;
            mapping_event.display = self.display;
            mapping_event.request = xlib::MappingKeyboard;
            xlib::XRefreshKeyboardMapping(&mut mapping_event);

            self.base_state = match self.current_group() {
                1 => GROUP_1_STATE,
                2 => GROUP_2_STATE,
                _ => 0,
            };
        }
    }

    fn layout_name(&mut self) -> String {
        unsafe {
            let Some((layout, variant)) = self.rules_names() else {
                return String::new();
            };
            let group = self.current_group();
            if variant.is_empty() {
                format!("{layout}[{group}]")
            } else {
                format!("{layout},{variant}[{group}]")
            }
        }
    }

    fn language_tag(&mut self) -> String {
        // XKB carries no language information.
        String::new()
    }

    fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String> {
        unsafe {
            let mut state = self.base_state;
            if modifier.shift() {
                state |= xlib::ShiftMask;
            }
            if modifier.alt_graph() {
                state |= xlib::Mod5Mask;
            }

            let mut event: xlib::XKeyEvent = mem::zeroed();
            event.type_ = xlib::KeyPress;
            event.display = self.display;
            event.keycode = native_code as c_uint;
            event.state = state;

            let mut buffer = [0u8; 8];
            let count = if !self.input_context.is_null() {
                xlib::Xutf8LookupString(
                    self.input_context,
                    &mut event,
                    buffer.as_mut_ptr().cast(),
                    buffer.len() as c_int,
                    ptr::null_mut(),
                    ptr::null_mut(),
                )
            } else {
                xlib::XLookupString(
                    &mut event,
                    buffer.as_mut_ptr().cast(),
                    buffer.len() as c_int,
                    ptr::null_mut(),
                    ptr::null_mut(),
                )
            };

            if count <= 0 {
                return None;
            }
            let text = String::from_utf8_lossy(&buffer[..count as usize]).into_owned();
            printable(text)
        }
    }
}

impl Drop for X11Resolver {
    fn drop(&mut self) {
        unsafe {
            if !self.input_context.is_null() {
                xlib::XDestroyIC(self.input_context);
            }
            if !self.input_method.is_null() {
                xlib::XCloseIM(self.input_method);
            }
            xlib::XCloseDisplay(self.display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The XIM style list and the XKB device spec are declared here because
    // the x11 crate omits them; pin them against the Xlib headers so a
    // mismatch fails loudly instead of corrupting a style walk.
    #[test]
    fn local_xlib_declarations_match_the_headers() {
        assert_eq!(mem::size_of::<XIMStyle>(), mem::size_of::<c_ulong>());
        assert_eq!(mem::offset_of!(XIMStyles, count_styles), 0);
        assert_eq!(
            mem::offset_of!(XIMStyles, supported_styles),
            mem::align_of::<*mut XIMStyle>()
        );
        // XkbUseCoreKbd in XKBlib.h.
        assert_eq!(XKB_USE_CORE_KBD, 0x0100);
    }
}
