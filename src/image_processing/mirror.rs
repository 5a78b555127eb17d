use image::{imageops, RgbaImage};

use crate::cli::MirrorMode;

/// Mirror the whole pixel grid in place. Runs before pixel remapping, so the
/// remapping rule sees coordinates in mirrored space.
pub fn apply_mirror(img: &mut RgbaImage, mode: MirrorMode) {
    match mode {
        MirrorMode::None => {}
        MirrorMode::Horizontal => imageops::flip_horizontal_in_place(img),
        MirrorMode::Vertical => imageops::flip_vertical_in_place(img),
    }
}
