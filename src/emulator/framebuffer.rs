use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// The 64x32 monochrome display, stored row-major with one byte per pixel.
/// Every pixel is either 0 or 1.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            pixels: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; SCREEN_WIDTH * SCREEN_HEIGHT];
    }

    /// Get the pixel at `(x, y)`. Coordinates must be on screen.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Flip the pixel at `(x, y)`, returning true if it was set before,
    /// which is what the draw instruction reports as a collision.
    pub fn xor(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y * SCREEN_WIDTH + x];
        let collision = *pixel == 1;
        *pixel ^= 1;
        collision
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(SCREEN_WIDTH)
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&pixel| pixel == 0)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row {
                write!(f, "{}", if *pixel == 1 { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn starts_blank() {
        let framebuffer = Framebuffer::new();
        assert!(framebuffer.is_blank());
        assert_eq!(framebuffer.rows().count(), SCREEN_HEIGHT);
    }

    #[test]
    fn xor_reports_collisions() {
        let mut framebuffer = Framebuffer::new();
        assert!(!framebuffer.xor(3, 4));
        assert_eq!(framebuffer.get(3, 4), 1);
        assert_eq!(framebuffer.pixels()[4 * SCREEN_WIDTH + 3], 1);
        assert!(framebuffer.xor(3, 4));
        assert_eq!(framebuffer.get(3, 4), 0);
    }

    #[test]
    fn clear_unsets_everything() {
        let mut framebuffer = Framebuffer::new();
        framebuffer.xor(0, 0);
        framebuffer.xor(63, 31);
        framebuffer.clear();
        assert!(framebuffer.is_blank());
    }

    #[test]
    fn displays_set_pixels_as_hashes() {
        let mut framebuffer = Framebuffer::new();
        framebuffer.xor(1, 0);
        let text = framebuffer.to_string();
        let first_line = text.lines().next().unwrap_or_default();
        assert_eq!(&first_line[..3], " # ");
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
    }
}
