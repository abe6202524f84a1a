use image::RgbaImage;

/// Blit the whole of `src` into `canvas` with its top-left corner at
/// (dx, dy), clipped to the canvas bounds.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();

    for yy in 0..sh {
        if dy + yy >= ch {
            break;
        }
        for xx in 0..sw {
            if dx + xx >= cw {
                break;
            }
            canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
        }
    }
}
