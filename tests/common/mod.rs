use keyboard_layout::key_table;
use keyboard_layout::{KeyResolver, Modifier};

/// Resolver that mimics a US-English layout without touching any OS API,
/// so builder behavior is testable on headless machines.
pub struct FakeUsLayout {
    pub layout: String,
    pub language: String,
}

impl FakeUsLayout {
    pub fn new() -> Self {
        Self {
            layout: "us[0]".to_string(),
            language: "en-US".to_string(),
        }
    }

    /// A resolver for an environment with no active layout at all.
    pub fn headless() -> Self {
        Self {
            layout: String::new(),
            language: String::new(),
        }
    }
}

impl KeyResolver for FakeUsLayout {
    fn layout_name(&mut self) -> String {
        self.layout.clone()
    }

    fn language_tag(&mut self) -> String {
        self.language.clone()
    }

    fn resolve(&mut self, native_code: u32, modifier: Modifier) -> Option<String> {
        let entry = key_table::lookup_native(native_code)?;
        us_character(entry.code?, modifier)
    }
}

/// US layout characters for a canonical key. The US layout has no AltGr
/// tier, so the AltGraph combinations yield nothing.
pub fn us_character(code: &str, modifier: Modifier) -> Option<String> {
    if modifier.alt_graph() {
        return None;
    }

    if let Some(letter) = code.strip_prefix("Key") {
        if letter.len() == 1 && letter.chars().all(|c| c.is_ascii_uppercase()) {
            let letter = if modifier.shift() {
                letter.to_string()
            } else {
                letter.to_ascii_lowercase()
            };
            return Some(letter);
        }
    }

    let (plain, shifted) = match code {
        "Digit1" => ("1", "!"),
        "Digit2" => ("2", "@"),
        "Digit3" => ("3", "#"),
        "Digit4" => ("4", "$"),
        "Digit5" => ("5", "%"),
        "Digit6" => ("6", "^"),
        "Digit7" => ("7", "&"),
        "Digit8" => ("8", "*"),
        "Digit9" => ("9", "("),
        "Digit0" => ("0", ")"),
        "Minus" => ("-", "_"),
        "Equal" => ("=", "+"),
        "BracketLeft" => ("[", "{"),
        "BracketRight" => ("]", "}"),
        "Backslash" => ("\\", "|"),
        "Semicolon" => (";", ":"),
        "Quote" => ("'", "\""),
        "Backquote" => ("`", "~"),
        "Comma" => (",", "<"),
        "Period" => (".", ">"),
        "Slash" => ("/", "?"),
        "Space" => (" ", " "),
        _ => return None,
    };
    Some(if modifier.shift() { shifted } else { plain }.to_string())
}
