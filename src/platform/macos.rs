//! macOS (Carbon/Cocoa) backend
//!
//! Characters come from `UCKeyTranslate` over the current input source's
//! Unicode key layout data. Input sources without that data (some CJK input
//! modes) fall back to the layout-only input source. Layout changes arrive
//! through the distributed notification center on a thread the OS picks.

use std::ffi::c_void;
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::ptr;

use log::error;
use objc2_core_foundation::CFData;
use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::resolve::{translate_with_dead_key_retry, KeyResolver, Translation};
use crate::types::Modifier;

type CFStringRef = *const c_void;
type CFArrayRef = *const c_void;
type CFNotificationCallback = extern "C" fn(
    center: *mut c_void,
    observer: *mut c_void,
    name: CFStringRef,
    object: *const c_void,
    user_info: *const c_void,
);

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFRelease(cf: *const c_void);
    fn CFStringGetCString(
        string: CFStringRef,
        buffer: *mut c_char,
        buffer_size: isize,
        encoding: u32,
    ) -> u8;
    fn CFArrayGetCount(array: CFArrayRef) -> isize;
    fn CFArrayGetValueAtIndex(array: CFArrayRef, index: isize) -> *const c_void;
    fn CFNotificationCenterGetDistributedCenter() -> *mut c_void;
    fn CFNotificationCenterAddObserver(
        center: *mut c_void,
        observer: *const c_void,
        callback: CFNotificationCallback,
        name: CFStringRef,
        object: *const c_void,
        suspension_behavior: isize,
    );
}

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    fn TISCopyCurrentKeyboardInputSource() -> *mut c_void;
    fn TISCopyCurrentKeyboardLayoutInputSource() -> *mut c_void;
    fn TISGetInputSourceProperty(source: *mut c_void, key: CFStringRef) -> *mut c_void;
    fn UCKeyTranslate(
        key_layout_ptr: *const u8,
        virtual_key_code: u16,
        key_action: u16,
        modifier_key_state: u32,
        keyboard_type: u32,
        key_translate_options: u32,
        dead_key_state: *mut u32,
        max_string_length: usize,
        actual_string_length: *mut isize,
        unicode_string: *mut u16,
    ) -> i32;
    fn LMGetKbdType() -> u8;
    static kTISPropertyUnicodeKeyLayoutData: CFStringRef;
    static kTISPropertyInputSourceID: CFStringRef;
    static kTISPropertyInputSourceLanguages: CFStringRef;
    static kTISNotifySelectedKeyboardInputSourceChanged: CFStringRef;
}

const K_UC_KEY_ACTION_DOWN: u16 = 0;
const K_CF_STRING_ENCODING_UTF8: u32 = 0x0800_0100;
const CF_NOTIFICATION_DELIVER_IMMEDIATELY: isize = 4;

// UCKeyTranslate modifier state is the Carbon event modifiers shifted right
// by eight: shiftKey >> 8 and optionKey >> 8.
const SHIFT_MODIFIER: u32 = 0x02;
const OPTION_MODIFIER: u32 = 0x08;

/// Key resolver backed by the Text Input Sources API.
///
/// Holds no persistent handle; every query copies the current input source
/// and releases it before returning.
pub struct MacResolver;

impl MacResolver {
    pub fn new() -> Result<Self> {
        Ok(MacResolver)
    }
}

/// The current input source together with its Unicode key layout data.
struct LayoutSource {
    source: *mut c_void,
    layout_ptr: *const u8,
}

impl LayoutSource {
    /// Copies the current keyboard input source, falling back to the
    /// layout-only source when the primary one has no key layout data.
    unsafe fn copy_current() -> Option<Self> {
        let mut source = TISCopyCurrentKeyboardInputSource();
        if source.is_null() {
            return None;
        }

        let mut data = TISGetInputSourceProperty(source, kTISPropertyUnicodeKeyLayoutData);
        if data.is_null() {
            CFRelease(source);
            source = TISCopyCurrentKeyboardLayoutInputSource();
            if source.is_null() {
                return None;
            }
            data = TISGetInputSourceProperty(source, kTISPropertyUnicodeKeyLayoutData);
            if data.is_null() {
                CFRelease(source);
                return None;
            }
        }

        let layout_ptr = CFData::byte_ptr(&*data.cast::<CFData>());
        Some(Self { source, layout_ptr })
    }
}

impl Drop for LayoutSource {
    fn drop(&mut self) {
        // The layout data belongs to the source; only the copied source
        // itself is released.
        unsafe { CFRelease(self.source) };
    }
}

unsafe fn cfstring_to_string(string: CFStringRef) -> String {
    if string.is_null() {
        return String::new();
    }
    let mut buffer = [0 as c_char; 256];
    let ok = CFStringGetCString(
        string,
        buffer.as_mut_ptr(),
        buffer.len() as isize,
        K_CF_STRING_ENCODING_UTF8,
    );
    if ok == 0 {
        return String::new();
    }
    std::ffi::CStr::from_ptr(buffer.as_ptr())
        .to_string_lossy()
        .into_owned()
}

impl KeyResolver for MacResolver {
    fn layout_name(&mut self) -> String {
        unsafe {
            let source = TISCopyCurrentKeyboardInputSource();
            if source.is_null() {
                return String::new();
            }
            let source_id = TISGetInputSourceProperty(source, kTISPropertyInputSourceID);
            let name = cfstring_to_string(source_id);
            CFRelease(source);
            name
        }
    }

    fn language_tag(&mut self) -> String {
        unsafe {
            let source = TISCopyCurrentKeyboardInputSource();
            if source.is_null() {
                return String::new();
            }
            let languages: CFArrayRef =
                TISGetInputSourceProperty(source, kTISPropertyInputSourceLanguages);
            let tag = if !languages.is_null() && CFArrayGetCount(languages) > 0 {
                cfstring_to_string(CFArrayGetValueAtIndex(languages, 0))
            } else {
                String::new()
            };
            CFRelease(source);
            tag
        }
    }

    fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String> {
        unsafe {
            let layout = LayoutSource::copy_current()?;
            let keyboard_type = u32::from(LMGetKbdType());

            let mut modifier_state = 0u32;
            if modifier.shift() {
                modifier_state |= SHIFT_MODIFIER;
            }
            if modifier.alt_graph() {
                modifier_state |= OPTION_MODIFIER;
            }

            // Stack-local dead-key state: it cannot survive this call, so
            // one key's pending composition can never bleed into another's.
            let mut dead_key_state = 0u32;

            translate_with_dead_key_retry(|| {
                let mut chars = [0u16; 4];
                let mut actual_len: isize = 0;
                let status = UCKeyTranslate(
                    layout.layout_ptr,
                    native_code as u16,
                    K_UC_KEY_ACTION_DOWN,
                    modifier_state,
                    keyboard_type,
                    0,
                    &mut dead_key_state,
                    chars.len(),
                    &mut actual_len,
                    chars.as_mut_ptr(),
                );

                if status != 0 {
                    Translation::NoCharacter
                } else if actual_len == 0 && dead_key_state != 0 {
                    Translation::DeadKey
                } else if actual_len > 0 {
                    Translation::Text(String::from_utf16_lossy(&chars[..actual_len as usize]))
                } else {
                    Translation::NoCharacter
                }
            })
        }
    }
}

static OBSERVER: OnceCell<()> = OnceCell::new();

/// Registers for `kTISNotifySelectedKeyboardInputSourceChanged` on the
/// distributed notification center. Safe to call more than once.
pub(crate) fn register_layout_observer() {
    OBSERVER.get_or_init(|| unsafe {
        CFNotificationCenterAddObserver(
            CFNotificationCenterGetDistributedCenter(),
            ptr::null(),
            input_source_changed,
            kTISNotifySelectedKeyboardInputSourceChanged,
            ptr::null(),
            CF_NOTIFICATION_DELIVER_IMMEDIATELY,
        );
    });
}

/// Invoked by the OS on its notification-delivery thread, not the thread
/// that initialized the crate. No panic may escape this frame.
extern "C" fn input_source_changed(
    _center: *mut c_void,
    _observer: *mut c_void,
    _name: CFStringRef,
    _object: *const c_void,
    _user_info: *const c_void,
) {
    let outcome = catch_unwind(|| {
        let mut resolver = MacResolver;
        let language = resolver.language_tag();
        let layout = resolver.layout_name();
        crate::notify::registry().notify(&language, &layout);
    });
    if outcome.is_err() {
        error!("layout change handler panicked; notification dropped");
    }
}
