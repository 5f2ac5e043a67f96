/// Number of keys on the hexadecimal keypad.
pub const NUM_KEYS: usize = 16;

/// The physical keys used for the hexadecimal keypad, indexed by CHIP-8 key.
/// The left side of a QWERTY keyboard is laid out like the original keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub const KEYMAP: [char; NUM_KEYS] = [
    'x', '1', '2', '3',
    'q', 'w', 'e', 'a',
    's', 'd', 'z', 'c',
    '4', 'r', 'f', 'v',
];

/// Translate a physical key into a CHIP-8 key, if it is mapped.
pub fn keymap(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    KEYMAP.iter().position(|&k| k == c).map(|key| key as u8)
}

/// The pressed state of the 16 keys.
/// Written by the host between steps, read by the key instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    /// Set the state of a key. Keys above 0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(state) => *state = pressed,
            None => log::warn!("Ignoring state of unknown key {:#x}", key),
        }
    }

    /// Whether a key is held down. Keys above 0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// Scan every key in order and return the last one that is pressed,
    /// so the highest pressed key wins.
    pub fn last_pressed(&self) -> Option<u8> {
        self.keys.iter().rposition(|&pressed| pressed).map(|key| key as u8)
    }
}
