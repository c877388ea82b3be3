use keyboard_layout::key_table::{lookup_code, lookup_native, CANONICAL_KEYS};

#[test]
fn test_table_covers_the_standard_keyboard() {
    let named = CANONICAL_KEYS
        .iter()
        .filter(|entry| entry.code.is_some())
        .count();
    assert!(named > 150, "expected ~200 named keys, found {named}");

    for code in [
        "KeyA", "KeyZ", "Digit0", "Digit9", "Enter", "Escape", "Backspace", "Tab", "Space",
        "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "F1", "F12", "Numpad0", "NumpadEnter",
        "ShiftLeft", "ControlRight", "AltRight",
    ] {
        assert!(lookup_code(code).is_some(), "missing canonical key {code}");
    }
}

#[test]
fn test_native_lookup_round_trips_through_canonical_id() {
    for entry in CANONICAL_KEYS {
        let (Some(code), Some(native)) = (entry.code, entry.native_code()) else {
            continue;
        };
        let owner = lookup_native(native).expect("native code must resolve");
        assert_eq!(owner.code, Some(code));
        assert_eq!(lookup_code(code).unwrap().usb, entry.usb);
    }
}

#[test]
fn test_unknown_identifiers_do_not_match() {
    assert!(lookup_code("NotAKey").is_none());
    assert!(lookup_code("").is_none());
    // 0 is the XKB/Windows "no such key" sentinel and never owned.
    #[cfg(not(target_os = "macos"))]
    assert!(lookup_native(0).is_none());
}
