//! Canonical physical-key table
//!
//! One row per physical key, identified by its USB HID usage and carrying the
//! key's native code on each supported platform. The data follows the
//! Chromium USB keycode converter table, which is also where the canonical
//! identifiers (UI Events `code` values such as "KeyA") come from. Rows whose
//! `code` is `None` are USB-HID placeholders with no platform mapping.
//!
//! The table is compiled in, never mutated, and small enough that every
//! lookup is a linear scan.

/// A single physical key and its per-platform native codes.
///
/// Sentinels mean "this key does not exist on this platform": `0x0000` for
/// the XKB and Windows columns, `0xffff` for the macOS column (`kVK_ANSI_A`
/// is 0x00, so zero is a valid macOS code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// USB HID usage (page << 16 | usage).
    pub usb: u32,
    /// X11/XKB keycode.
    pub xkb: u16,
    /// Windows scan code.
    pub win: u16,
    /// macOS virtual key code.
    pub mac: u16,
    /// Canonical key identifier, unique across the table.
    pub code: Option<&'static str>,
}

const NO_XKB_CODE: u16 = 0x0000;
const NO_WIN_SCANCODE: u16 = 0x0000;
const NO_MAC_KEYCODE: u16 = 0xffff;

impl KeyEntry {
    pub fn xkb_code(&self) -> Option<u32> {
        (self.xkb != NO_XKB_CODE).then(|| u32::from(self.xkb))
    }

    pub fn win_scancode(&self) -> Option<u32> {
        (self.win != NO_WIN_SCANCODE).then(|| u32::from(self.win))
    }

    pub fn mac_keycode(&self) -> Option<u32> {
        (self.mac != NO_MAC_KEYCODE).then(|| u32::from(self.mac))
    }

    /// Native code for the platform this crate was compiled for.
    #[cfg(target_os = "linux")]
    pub fn native_code(&self) -> Option<u32> {
        self.xkb_code()
    }

    /// Native code for the platform this crate was compiled for.
    #[cfg(target_os = "macos")]
    pub fn native_code(&self) -> Option<u32> {
        self.mac_keycode()
    }

    /// Native code for the platform this crate was compiled for.
    #[cfg(target_os = "windows")]
    pub fn native_code(&self) -> Option<u32> {
        self.win_scancode()
    }
}

/// Finds the entry owning a canonical key identifier.
pub fn lookup_code(code: &str) -> Option<&'static KeyEntry> {
    CANONICAL_KEYS
        .iter()
        .find(|entry| entry.code == Some(code))
}

/// Finds the entry owning a native code on the compiled platform.
///
/// The first matching row in table order owns the code, which keeps
/// ownership deterministic should two USB usages ever share one native code.
pub fn lookup_native(native: u32) -> Option<&'static KeyEntry> {
    CANONICAL_KEYS
        .iter()
        .find(|entry| entry.native_code() == Some(native))
}

const fn key(usb: u32, xkb: u16, win: u16, mac: u16, code: Option<&'static str>) -> KeyEntry {
    KeyEntry {
        usb,
        xkb,
        win,
        mac,
        code,
    }
}

pub static CANONICAL_KEYS: &[KeyEntry] = &[
    key(0x000000, 0x0000, 0x0000, 0xffff, None), // Invalid
    key(0x000010, 0x0000, 0x0000, 0xffff, Some("Hyper")),
    key(0x000011, 0x0000, 0x0000, 0xffff, Some("Super")),
    key(0x000012, 0x0000, 0x0000, 0xffff, Some("Fn")),
    key(0x000013, 0x0000, 0x0000, 0xffff, Some("FnLock")),
    key(0x000014, 0x0000, 0x0000, 0xffff, Some("Suspend")),
    key(0x000015, 0x0000, 0x0000, 0xffff, Some("Resume")),
    key(0x000016, 0x0000, 0x0000, 0xffff, Some("Turbo")),
    key(0x010082, 0x0096, 0xe05f, 0xffff, Some("Sleep")), // SystemSleep
    key(0x010083, 0x0097, 0xe063, 0xffff, Some("WakeUp")),
    key(0x070000, 0x0000, 0x0000, 0xffff, None),
    key(0x070001, 0x0000, 0x00ff, 0xffff, None),
    key(0x070002, 0x0000, 0x00fc, 0xffff, None),
    key(0x070003, 0x0000, 0x0000, 0xffff, None),
    key(0x070004, 0x0026, 0x001e, 0x0000, Some("KeyA")), // aA
    key(0x070005, 0x0038, 0x0030, 0x000b, Some("KeyB")), // bB
    key(0x070006, 0x0036, 0x002e, 0x0008, Some("KeyC")), // cC
    key(0x070007, 0x0028, 0x0020, 0x0002, Some("KeyD")), // dD
    key(0x070008, 0x001a, 0x0012, 0x000e, Some("KeyE")), // eE
    key(0x070009, 0x0029, 0x0021, 0x0003, Some("KeyF")), // fF
    key(0x07000a, 0x002a, 0x0022, 0x0005, Some("KeyG")), // gG
    key(0x07000b, 0x002b, 0x0023, 0x0004, Some("KeyH")), // hH
    key(0x07000c, 0x001f, 0x0017, 0x0022, Some("KeyI")), // iI
    key(0x07000d, 0x002c, 0x0024, 0x0026, Some("KeyJ")), // jJ
    key(0x07000e, 0x002d, 0x0025, 0x0028, Some("KeyK")), // kK
    key(0x07000f, 0x002e, 0x0026, 0x0025, Some("KeyL")), // lL
    key(0x070010, 0x003a, 0x0032, 0x002e, Some("KeyM")), // mM
    key(0x070011, 0x0039, 0x0031, 0x002d, Some("KeyN")), // nN
    key(0x070012, 0x0020, 0x0018, 0x001f, Some("KeyO")), // oO
    key(0x070013, 0x0021, 0x0019, 0x0023, Some("KeyP")), // pP
    key(0x070014, 0x0018, 0x0010, 0x000c, Some("KeyQ")), // qQ
    key(0x070015, 0x001b, 0x0013, 0x000f, Some("KeyR")), // rR
    key(0x070016, 0x0027, 0x001f, 0x0001, Some("KeyS")), // sS
    key(0x070017, 0x001c, 0x0014, 0x0011, Some("KeyT")), // tT
    key(0x070018, 0x001e, 0x0016, 0x0020, Some("KeyU")), // uU
    key(0x070019, 0x0037, 0x002f, 0x0009, Some("KeyV")), // vV
    key(0x07001a, 0x0019, 0x0011, 0x000d, Some("KeyW")), // wW
    key(0x07001b, 0x0035, 0x002d, 0x0007, Some("KeyX")), // xX
    key(0x07001c, 0x001d, 0x0015, 0x0010, Some("KeyY")), // yY
    key(0x07001d, 0x0034, 0x002c, 0x0006, Some("KeyZ")), // zZ
    key(0x07001e, 0x000a, 0x0002, 0x0012, Some("Digit1")), // 1!
    key(0x07001f, 0x000b, 0x0003, 0x0013, Some("Digit2")), // 2@
    key(0x070020, 0x000c, 0x0004, 0x0014, Some("Digit3")), // 3#
    key(0x070021, 0x000d, 0x0005, 0x0015, Some("Digit4")), // 4$
    key(0x070022, 0x000e, 0x0006, 0x0017, Some("Digit5")), // 5%
    key(0x070023, 0x000f, 0x0007, 0x0016, Some("Digit6")), // 6^
    key(0x070024, 0x0010, 0x0008, 0x001a, Some("Digit7")), // 7&
    key(0x070025, 0x0011, 0x0009, 0x001c, Some("Digit8")), // 8*
    key(0x070026, 0x0012, 0x000a, 0x0019, Some("Digit9")), // 9(
    key(0x070027, 0x0013, 0x000b, 0x001d, Some("Digit0")), // 0)
    key(0x070028, 0x0024, 0x001c, 0x0024, Some("Enter")),
    key(0x070029, 0x0009, 0x0001, 0x0035, Some("Escape")),
    key(0x07002a, 0x0016, 0x000e, 0x0033, Some("Backspace")),
    key(0x07002b, 0x0017, 0x000f, 0x0030, Some("Tab")),
    key(0x07002c, 0x0041, 0x0039, 0x0031, Some("Space")), // Spacebar
    key(0x07002d, 0x0014, 0x000c, 0x001b, Some("Minus")), // -_
    key(0x07002e, 0x0015, 0x000d, 0x0018, Some("Equal")), // =+
    key(0x07002f, 0x0022, 0x001a, 0x0021, Some("BracketLeft")),
    key(0x070030, 0x0023, 0x001b, 0x001e, Some("BracketRight")),
    key(0x070031, 0x0033, 0x002b, 0x002a, Some("Backslash")), // \|
    key(0x070032, 0x0000, 0x0000, 0xffff, Some("IntlHash")),
    key(0x070033, 0x002f, 0x0027, 0x0029, Some("Semicolon")), // ;:
    key(0x070034, 0x0030, 0x0028, 0x0027, Some("Quote")), // '"
    key(0x070035, 0x0031, 0x0029, 0x0032, Some("Backquote")), // `~
    key(0x070036, 0x003b, 0x0033, 0x002b, Some("Comma")), // ,<
    key(0x070037, 0x003c, 0x0034, 0x002f, Some("Period")), // .>
    key(0x070038, 0x003d, 0x0035, 0x002c, Some("Slash")), // /?
    key(0x070039, 0x0042, 0x003a, 0x0039, Some("CapsLock")),
    key(0x07003a, 0x0043, 0x003b, 0x007a, Some("F1")),
    key(0x07003b, 0x0044, 0x003c, 0x0078, Some("F2")),
    key(0x07003c, 0x0045, 0x003d, 0x0063, Some("F3")),
    key(0x07003d, 0x0046, 0x003e, 0x0076, Some("F4")),
    key(0x07003e, 0x0047, 0x003f, 0x0060, Some("F5")),
    key(0x07003f, 0x0048, 0x0040, 0x0061, Some("F6")),
    key(0x070040, 0x0049, 0x0041, 0x0062, Some("F7")),
    key(0x070041, 0x004a, 0x0042, 0x0064, Some("F8")),
    key(0x070042, 0x004b, 0x0043, 0x0065, Some("F9")),
    key(0x070043, 0x004c, 0x0044, 0x006d, Some("F10")),
    key(0x070044, 0x005f, 0x0057, 0x0067, Some("F11")),
    key(0x070045, 0x0060, 0x0058, 0x006f, Some("F12")),
    key(0x070046, 0x006b, 0xe037, 0xffff, Some("PrintScreen")),
    key(0x070047, 0x004e, 0x0046, 0xffff, Some("ScrollLock")),
    // Media Pause (USB 0x0c00b1) also lands on XKB 0x7f; it has no table
    // row because its canonical name does not exist and XKB cannot tell
    // the two apart.
    key(0x070048, 0x007f, 0x0045, 0xffff, Some("Pause")),
    key(0x070049, 0x0076, 0xe052, 0x0072, Some("Insert")),
    key(0x07004a, 0x006e, 0xe047, 0x0073, Some("Home")),
    key(0x07004b, 0x0070, 0xe049, 0x0074, Some("PageUp")),
    key(0x07004c, 0x0077, 0xe053, 0x0075, Some("Delete")),
    key(0x07004d, 0x0073, 0xe04f, 0x0077, Some("End")),
    key(0x07004e, 0x0075, 0xe051, 0x0079, Some("PageDown")),
    key(0x07004f, 0x0072, 0xe04d, 0x007c, Some("ArrowRight")),
    key(0x070050, 0x0071, 0xe04b, 0x007b, Some("ArrowLeft")),
    key(0x070051, 0x0074, 0xe050, 0x007d, Some("ArrowDown")),
    key(0x070052, 0x006f, 0xe048, 0x007e, Some("ArrowUp")),
    key(0x070053, 0x004d, 0xe045, 0x0047, Some("NumLock")),
    key(0x070054, 0x006a, 0xe035, 0x004b, Some("NumpadDivide")),
    key(0x070055, 0x003f, 0x0037, 0x0043, Some("NumpadMultiply")), // Keypad_*
    key(0x070056, 0x0052, 0x004a, 0x004e, Some("NumpadSubtract")), // Keypad_-
    key(0x070057, 0x0056, 0x004e, 0x0045, Some("NumpadAdd")),
    key(0x070058, 0x0068, 0xe01c, 0x004c, Some("NumpadEnter")),
    key(0x070059, 0x0057, 0x004f, 0x0053, Some("Numpad1")), // +End
    key(0x07005a, 0x0058, 0x0050, 0x0054, Some("Numpad2")), // +Down
    key(0x07005b, 0x0059, 0x0051, 0x0055, Some("Numpad3")), // +PageDn
    key(0x07005c, 0x0053, 0x004b, 0x0056, Some("Numpad4")), // +Left
    key(0x07005d, 0x0054, 0x004c, 0x0057, Some("Numpad5")),
    key(0x07005e, 0x0055, 0x004d, 0x0058, Some("Numpad6")), // +Right
    key(0x07005f, 0x004f, 0x0047, 0x0059, Some("Numpad7")), // +Home
    key(0x070060, 0x0050, 0x0048, 0x005b, Some("Numpad8")), // +Up
    key(0x070061, 0x0051, 0x0049, 0x005c, Some("Numpad9")), // +PageUp
    key(0x070062, 0x005a, 0x0052, 0x0052, Some("Numpad0")), // +Insert
    key(0x070063, 0x005b, 0x0053, 0x0041, Some("NumpadDecimal")), // Keypad_. Delete
    key(0x070064, 0x005e, 0x0056, 0x000a, Some("IntlBackslash")),
    key(0x070065, 0x0087, 0xe05d, 0x006e, Some("ContextMenu")),
    key(0x070066, 0x007c, 0xe05e, 0xffff, Some("Power")),
    key(0x070067, 0x007d, 0x0059, 0x0051, Some("NumpadEqual")),
    key(0x070068, 0x00bf, 0x0064, 0x0069, Some("F13")),
    key(0x070069, 0x00c0, 0x0065, 0x006b, Some("F14")),
    key(0x07006a, 0x00c1, 0x0066, 0x0071, Some("F15")),
    key(0x07006b, 0x00c2, 0x0067, 0x006a, Some("F16")),
    key(0x07006c, 0x00c3, 0x0068, 0x0040, Some("F17")),
    key(0x07006d, 0x00c4, 0x0069, 0x004f, Some("F18")),
    key(0x07006e, 0x00c5, 0x006a, 0x0050, Some("F19")),
    key(0x07006f, 0x00c6, 0x006b, 0x005a, Some("F20")),
    key(0x070070, 0x00c7, 0x006c, 0xffff, Some("F21")),
    key(0x070071, 0x00c8, 0x006d, 0xffff, Some("F22")),
    key(0x070072, 0x00c9, 0x006e, 0xffff, Some("F23")),
    key(0x070073, 0x00ca, 0x0076, 0xffff, Some("F24")),
    key(0x070074, 0x008e, 0x0000, 0xffff, Some("Open")), // Execute
    key(0x070075, 0x0092, 0xe03b, 0xffff, Some("Help")),
    key(0x070077, 0x008c, 0x0000, 0xffff, Some("Select")), // Select
    key(0x070079, 0x0089, 0x0000, 0xffff, Some("Again")), // Again
    key(0x07007a, 0x008b, 0xe008, 0xffff, Some("Undo")),
    key(0x07007b, 0x0091, 0xe017, 0xffff, Some("Cut")),
    key(0x07007c, 0x008d, 0xe018, 0xffff, Some("Copy")),
    key(0x07007d, 0x008f, 0xe00a, 0xffff, Some("Paste")),
    key(0x07007e, 0x0090, 0x0000, 0xffff, Some("Find")), // Find
    key(0x07007f, 0x0079, 0xe020, 0x004a, Some("AudioVolumeMute")),
    key(0x070080, 0x007b, 0xe030, 0x0048, Some("AudioVolumeUp")),
    key(0x070081, 0x007a, 0xe02e, 0x0049, Some("AudioVolumeDown")),
    key(0x070085, 0x0081, 0x007e, 0x005f, Some("NumpadComma")),
    key(0x070087, 0x0061, 0x0073, 0x005e, Some("IntlRo")),
    key(0x070088, 0x0065, 0x0070, 0x0068, Some("KanaMode")),
    key(0x070089, 0x0084, 0x007d, 0x005d, Some("IntlYen")),
    key(0x07008a, 0x0064, 0x0079, 0xffff, Some("Convert")),
    key(0x07008b, 0x0066, 0x007b, 0xffff, Some("NonConvert")),
    key(0x070090, 0x0082, 0x0072, 0xffff, Some("Lang1")),
    key(0x070091, 0x0083, 0x0071, 0xffff, Some("Lang2")),
    key(0x070092, 0x0062, 0x0078, 0xffff, Some("Lang3")),
    key(0x070093, 0x0063, 0x0077, 0xffff, Some("Lang4")),
    key(0x070094, 0x005d, 0x0000, 0xffff, Some("Lang5")),
    key(0x07009b, 0x0000, 0x0000, 0xffff, Some("Abort")), // Cancel
    key(0x0700a3, 0x0000, 0x0000, 0xffff, Some("Props")), // CrSel/Props
    key(0x0700b6, 0x00bb, 0x0000, 0xffff, Some("NumpadParenLeft")), // Keypad_(
    key(0x0700b7, 0x00bc, 0x0000, 0xffff, Some("NumpadParenRight")), // Keypad_)
    key(0x0700bb, 0x0000, 0x0000, 0xffff, Some("NumpadBackspace")), // Keypad_Backspace
    key(0x0700d0, 0x0000, 0x0000, 0xffff, Some("NumpadMemoryStore")), // Keypad_MemoryStore
    key(0x0700d1, 0x0000, 0x0000, 0xffff, Some("NumpadMemoryRecall")), // Keypad_MemoryRecall
    key(0x0700d2, 0x0000, 0x0000, 0xffff, Some("NumpadMemoryClear")), // Keypad_MemoryClear
    key(0x0700d3, 0x0000, 0x0000, 0xffff, Some("NumpadMemoryAdd")), // Keypad_MemoryAdd
    key(0x0700d4, 0x0000, 0x0000, 0xffff, Some("NumpadMemorySubtract")), // Keypad_MemorySubtract
    key(0x0700d7, 0x007e, 0x0000, 0xffff, None), // +/-
    key(0x0700d8, 0x0000, 0x0000, 0xffff, Some("NumpadClear")),
    key(0x0700d9, 0x0000, 0x0000, 0xffff, Some("NumpadClearEntry")), // Keypad_ClearEntry
    key(0x0700e0, 0x0025, 0x001d, 0x003b, Some("ControlLeft")),
    key(0x0700e1, 0x0032, 0x002a, 0x0038, Some("ShiftLeft")),
    key(0x0700e2, 0x0040, 0x0038, 0x003a, Some("AltLeft")),
    key(0x0700e3, 0x0085, 0xe05b, 0x0037, Some("MetaLeft")),
    key(0x0700e4, 0x0069, 0xe01d, 0x003e, Some("ControlRight")),
    key(0x0700e5, 0x003e, 0x0036, 0x003c, Some("ShiftRight")),
    key(0x0700e6, 0x006c, 0xe038, 0x003d, Some("AltRight")),
    key(0x0700e7, 0x0086, 0xe05c, 0x0036, Some("MetaRight")),
    key(0x0c0060, 0x016e, 0x0000, 0xffff, None),
    key(0x0c0061, 0x017a, 0x0000, 0xffff, None),
    key(0x0c006f, 0x00e9, 0x0000, 0xffff, Some("BrightnessUp")),
    key(0x0c0070, 0x00e8, 0x0000, 0xffff, Some("BrightnessDown")), // Display Brightness Decrement
    key(0x0c0072, 0x01b7, 0x0000, 0xffff, None),
    key(0x0c0073, 0x0258, 0x0000, 0xffff, None),
    key(0x0c0074, 0x0259, 0x0000, 0xffff, None),
    key(0x0c0075, 0x00fc, 0x0000, 0xffff, None),
    key(0x0c0083, 0x019d, 0x0000, 0xffff, None),
    key(0x0c008c, 0x00b1, 0x0000, 0xffff, None),
    key(0x0c008d, 0x0172, 0x0000, 0xffff, None),
    key(0x0c0094, 0x00b6, 0x0000, 0xffff, None),
    key(0x0c009c, 0x01a2, 0x0000, 0xffff, None),
    key(0x0c009d, 0x01a3, 0x0000, 0xffff, None),
    key(0x0c00b0, 0x00d7, 0x0000, 0xffff, Some("MediaPlay")),
    key(0x0c00b2, 0x00af, 0x0000, 0xffff, Some("MediaRecord")),
    key(0x0c00b3, 0x00d8, 0x0000, 0xffff, Some("MediaFastForward")),
    key(0x0c00b4, 0x00b0, 0x0000, 0xffff, Some("MediaRewind")),
    key(0x0c00b5, 0x00ab, 0xe019, 0xffff, Some("MediaTrackNext")),
    key(0x0c00b6, 0x00ad, 0xe010, 0xffff, Some("MediaTrackPrevious")),
    key(0x0c00b7, 0x00ae, 0xe024, 0xffff, Some("MediaStop")),
    key(0x0c00b8, 0x00a9, 0xe02c, 0xffff, Some("Eject")),
    key(0x0c00cd, 0x00ac, 0xe022, 0xffff, Some("MediaPlayPause")),
    key(0x0c00cf, 0x024e, 0x0000, 0xffff, None),
    key(0x0c00e5, 0x00d9, 0x0000, 0xffff, None),
    key(0x0c0183, 0x00b3, 0xe06d, 0xffff, Some("MediaSelect")),
    key(0x0c0184, 0x01ad, 0x0000, 0xffff, None),
    key(0x0c0186, 0x01af, 0x0000, 0xffff, None),
    key(0x0c018a, 0x00a3, 0xe06c, 0xffff, Some("LaunchMail")),
    key(0x0c018d, 0x01b5, 0x0000, 0xffff, None),
    key(0x0c018e, 0x0195, 0x0000, 0xffff, None),
    key(0x0c0192, 0x0094, 0xe021, 0xffff, Some("LaunchApp2")),
    key(0x0c0194, 0x0098, 0xe06b, 0xffff, Some("LaunchApp1")),
    key(0x0c0196, 0x009e, 0x0000, 0xffff, None),
    key(0x0c019C, 0x01b9, 0x0000, 0xffff, None),
    key(0x0c019e, 0x00a0, 0x0000, 0xffff, None),
    key(0x0c019f, 0x024b, 0x0000, 0xffff, None),
    key(0x0c01a2, 0x024c, 0x0000, 0xffff, Some("SelectTask")),
    key(0x0c01a7, 0x00f3, 0x0000, 0xffff, None),
    key(0x0c01ab, 0x01b8, 0x0000, 0xffff, None),
    key(0x0c01ae, 0x017e, 0x0000, 0xffff, None),
    key(0x0c01b1, 0x024d, 0x0000, 0xffff, Some("LaunchScreenSaver")), // AL Screen Saver
    key(0x0c01b7, 0x0190, 0x0000, 0xffff, None),
    key(0x0c0201, 0x00bd, 0x0000, 0xffff, None),
    key(0x0c0203, 0x00d6, 0x0000, 0xffff, None),
    key(0x0c0207, 0x00f2, 0x0000, 0xffff, None),
    key(0x0c0208, 0x00da, 0x0000, 0xffff, None),
    key(0x0c0221, 0x00e1, 0xe065, 0xffff, Some("BrowserSearch")),
    key(0x0c0223, 0x00b4, 0xe032, 0xffff, Some("BrowserHome")),
    key(0x0c0224, 0x00a6, 0xe06a, 0xffff, Some("BrowserBack")),
    key(0x0c0225, 0x00a7, 0xe069, 0xffff, Some("BrowserForward")),
    key(0x0c0226, 0x0088, 0xe068, 0xffff, Some("BrowserStop")),
    key(0x0c0227, 0x00b5, 0xe067, 0xffff, Some("BrowserRefresh")),
    key(0x0c022a, 0x00a4, 0xe066, 0xffff, Some("BrowserFavorites")),
    key(0x0c022d, 0x01aa, 0x0000, 0xffff, None),
    key(0x0c022e, 0x01ab, 0x0000, 0xffff, None),
    key(0x0c0232, 0x0000, 0x0000, 0xffff, Some("ZoomToggle")),
    key(0x0c0279, 0x00be, 0x0000, 0xffff, None),
    key(0x0c0289, 0x00f0, 0x0000, 0xffff, Some("MailReply")),
    key(0x0c028b, 0x00f1, 0x0000, 0xffff, Some("MailForward")),
    key(0x0c028c, 0x00ef, 0x0000, 0xffff, Some("MailSend")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_ids_are_unique() {
        let mut seen = HashSet::new();
        for entry in CANONICAL_KEYS {
            if let Some(code) = entry.code {
                assert!(seen.insert(code), "duplicate canonical id {code}");
            }
        }
    }

    #[test]
    fn native_codes_are_unique_per_platform() {
        for (name, get) in [
            ("xkb", KeyEntry::xkb_code as fn(&KeyEntry) -> Option<u32>),
            ("win", KeyEntry::win_scancode),
            ("mac", KeyEntry::mac_keycode),
        ] {
            let mut seen = HashSet::new();
            for entry in CANONICAL_KEYS {
                if let Some(native) = get(entry) {
                    assert!(
                        seen.insert(native),
                        "{name} code {native:#x} owned by more than one entry"
                    );
                }
            }
        }
    }

    #[test]
    fn well_known_keys_have_expected_codes() {
        let key_a = lookup_code("KeyA").unwrap();
        assert_eq!(key_a.xkb_code(), Some(0x26));
        assert_eq!(key_a.win_scancode(), Some(0x1e));
        assert_eq!(key_a.mac_keycode(), Some(0x00));

        let digit1 = lookup_code("Digit1").unwrap();
        assert_eq!(digit1.xkb_code(), Some(0x0a));
        assert_eq!(digit1.win_scancode(), Some(0x02));
        assert_eq!(digit1.mac_keycode(), Some(0x12));

        let escape = lookup_code("Escape").unwrap();
        assert_eq!(escape.xkb_code(), Some(0x09));
        assert_eq!(escape.win_scancode(), Some(0x01));
        assert_eq!(escape.mac_keycode(), Some(0x35));
    }

    #[test]
    fn collision_exceptions_resolved_in_table_data() {
        // Windows maps both Lang5 and F24 to scan code 0x76; the table gives
        // the code to F24 and leaves Lang5 without a Windows mapping.
        assert_eq!(lookup_code("F24").unwrap().win_scancode(), Some(0x76));
        assert_eq!(lookup_code("Lang5").unwrap().win_scancode(), None);

        // macOS kVK_Help doubles as Insert on post-2007 keyboards; Insert
        // owns 0x72 and Help has no macOS mapping.
        assert_eq!(lookup_code("Insert").unwrap().mac_keycode(), Some(0x72));
        assert_eq!(lookup_code("Help").unwrap().mac_keycode(), None);

        // Linux flattens Keyboard Pause and Media Pause onto KEY_PAUSE;
        // only Pause exists, a MediaPause entry never will.
        assert_eq!(lookup_code("Pause").unwrap().xkb_code(), Some(0x7f));
        assert!(lookup_code("MediaPause").is_none());
    }

    #[test]
    fn placeholder_rows_have_no_canonical_id() {
        // USB page 0x07 usage 0 is reserved and must stay unnamed.
        let reserved = CANONICAL_KEYS
            .iter()
            .find(|entry| entry.usb == 0x070000)
            .unwrap();
        assert_eq!(reserved.code, None);
    }

    #[test]
    fn lookup_native_returns_first_match() {
        for entry in CANONICAL_KEYS {
            if let Some(native) = entry.native_code() {
                let owner = lookup_native(native).unwrap();
                assert_eq!(owner.usb, entry.usb);
            }
        }
    }
}
