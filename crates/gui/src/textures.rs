//! Procedural surface textures for the solar module and the circuit board.

use egui::{Color32, ColorImage};
use rand::Rng;

pub const SOLAR_SIZE: [usize; 2] = [512, 1024];
pub const PCB_SIZE: [usize; 2] = [256, 128];

const SOLAR_BASE: Color32 = Color32::from_rgb(0x0a, 0x0a, 0x1a);
const BUSBAR: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
const FINGER: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
const SOLAR_COLUMNS: usize = 4;
const FINGER_SPACING: usize = 10;

const PCB_BASE: Color32 = Color32::from_rgb(0x06, 0x4e, 0x3b);
const COPPER: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
const CHIP: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
const TRACE_COUNT: usize = 20;
const CHIP_COUNT: usize = 5;

/// Monocrystalline cell sheet: dark base, vertical busbars splitting the
/// sheet into columns, thin horizontal fingers.
pub fn solar_texture() -> ColorImage {
    let [w, h] = SOLAR_SIZE;
    let mut img = ColorImage::new(SOLAR_SIZE, SOLAR_BASE);

    let col_width = w / SOLAR_COLUMNS;
    for i in 1..SOLAR_COLUMNS {
        let x = i * col_width;
        fill_rect(&mut img, x - 1, 0, 2, h, BUSBAR);
    }

    for y in (0..h).step_by(FINGER_SPACING) {
        fill_rect(&mut img, 0, y, w, 1, FINGER);
    }
    img
}

/// Green board with random copper traces and IC packages
pub fn pcb_texture<R: Rng>(rng: &mut R) -> ColorImage {
    let [w, h] = PCB_SIZE;
    let mut img = ColorImage::new(PCB_SIZE, PCB_BASE);

    for _ in 0..TRACE_COUNT {
        let a = (rng.gen_range(0.0..w as f32), rng.gen_range(0.0..h as f32));
        let b = (rng.gen_range(0.0..w as f32), rng.gen_range(0.0..h as f32));
        draw_line(&mut img, a, b, COPPER);
    }

    for _ in 0..CHIP_COUNT {
        let cw = rng.gen_range(20..=50);
        let ch = rng.gen_range(20..=50);
        let x = rng.gen_range(0..=w - cw);
        let y = rng.gen_range(0..=h - ch);
        fill_rect(&mut img, x, y, cw, ch, CHIP);
    }
    img
}

/// Fill a rectangle, clipped to the image
fn fill_rect(img: &mut ColorImage, x: usize, y: usize, w: usize, h: usize, color: Color32) {
    let [iw, ih] = img.size;
    for row in y..(y + h).min(ih) {
        for col in x..(x + w).min(iw) {
            img.pixels[row * iw + col] = color;
        }
    }
}

/// Two pixel wide line between two points
fn draw_line(img: &mut ColorImage, a: (f32, f32), b: (f32, f32), color: Color32) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (a.0 + dx * t).floor() as isize;
        let y = (a.1 + dy * t).floor() as isize;
        for (ox, oy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            put(img, x + ox - 1, y + oy - 1, color);
        }
    }
}

fn put(img: &mut ColorImage, x: isize, y: isize, color: Color32) {
    let [w, h] = img.size;
    if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
        img.pixels[y as usize * w + x as usize] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pixel(img: &ColorImage, x: usize, y: usize) -> Color32 {
        img.pixels[y * img.size[0] + x]
    }

    #[test]
    fn test_solar_layout() {
        let img = solar_texture();
        assert_eq!(img.size, SOLAR_SIZE);
        assert_eq!(pixel(&img, 5, 5), SOLAR_BASE);
        // Busbars at each column boundary
        for x in [128, 256, 384] {
            assert_eq!(pixel(&img, x, 5), BUSBAR);
            assert_eq!(pixel(&img, x - 1, 5), BUSBAR);
        }
        // Fingers every 10 px, over the busbars
        assert_eq!(pixel(&img, 5, 0), FINGER);
        assert_eq!(pixel(&img, 5, 1020), FINGER);
        assert_eq!(pixel(&img, 128, 10), FINGER);
        assert_eq!(pixel(&img, 5, 11), SOLAR_BASE);
    }

    #[test]
    fn test_pcb_is_deterministic_per_seed() {
        let a = pcb_texture(&mut StdRng::seed_from_u64(7));
        let b = pcb_texture(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.size, PCB_SIZE);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_pcb_contains_every_layer() {
        let img = pcb_texture(&mut StdRng::seed_from_u64(42));
        let count = |c: Color32| img.pixels.iter().filter(|p| **p == c).count();
        assert!(count(PCB_BASE) > 0);
        assert!(count(COPPER) > 0);
        // Smallest chip is 20x20
        assert!(count(CHIP) >= 400);
    }
}
