/// How `FX0A` (wait for a key press) behaves when no key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    /// Never block. The highest pressed key is stored, and
    /// if nothing is pressed the instruction does nothing.
    LastPressed,
    /// Re-execute the instruction every cycle until a key is pressed.
    Blocking,
}

/// What happens to sprite pixels that fall outside the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdges {
    /// Wrap around to the opposite edge.
    Wrap,
    /// Drop the pixels.
    Clip,
}

/// Behavioral options of the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub key_wait: KeyWait,
    pub sprite_edges: SpriteEdges,
    /// Seed for the random number instruction. Uses entropy if `None`.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            key_wait: KeyWait::LastPressed,
            sprite_edges: SpriteEdges::Wrap,
            seed: None,
        }
    }
}
