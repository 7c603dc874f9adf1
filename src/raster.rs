//! Pixel-level drawing primitives used by the tools.
//!
//! Everything here works on an [`RgbImage`] in pixel coordinates and clips
//! silently at the image border.

use image::{DynamicImage, Rgb, RgbImage};

/// Shape of the stamp laid down at each point of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nib {
    Square,
    Round,
}

/// Write one pixel if it lies inside the image
#[inline]
pub fn put_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Read one pixel, `None` outside the image
#[inline]
pub fn sample(img: &RgbImage, x: i32, y: i32) -> Option<Rgb<u8>> {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        Some(*img.get_pixel(x as u32, y as u32))
    } else {
        None
    }
}

/// Stamp a nib of the given width centred on (cx, cy)
pub fn stamp(img: &mut RgbImage, cx: i32, cy: i32, width: u32, nib: Nib, color: Rgb<u8>) {
    let size = width.max(1) as i32;
    let offset = size / 2;
    let radius = size as f32 / 2.0;

    for i in 0..size {
        for j in 0..size {
            if nib == Nib::Round && size > 2 {
                let dx = (i - offset) as f32 + 0.5;
                let dy = (j - offset) as f32 + 0.5;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }
            put_pixel(img, cx + i - offset, cy + j - offset, color);
        }
    }
}

/// Visit every point of the Bresenham line from (x1, y1) to (x2, y2), both ends included
pub fn bresenham_line<F>(mut x1: i32, mut y1: i32, x2: i32, y2: i32, mut callback: F)
where
    F: FnMut(i32, i32),
{
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        callback(x1, y1);
        if x1 == x2 && y1 == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x1 += sx;
        }
        if e2 <= dx {
            err += dx;
            y1 += sy;
        }
    }
}

/// Draw a line of the given width between two pixel positions
pub fn draw_line(
    img: &mut RgbImage,
    from: (i32, i32),
    to: (i32, i32),
    width: u32,
    nib: Nib,
    color: Rgb<u8>,
) {
    bresenham_line(from.0, from.1, to.0, to.1, |x, y| {
        stamp(img, x, y, width, nib, color);
    });
}

/// Normalise two corner points into (min_x, min_y, max_x, max_y)
pub fn span(a: (i32, i32), b: (i32, i32)) -> (i32, i32, i32, i32) {
    (a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
}

/// Outline of the axis-aligned rectangle with corners `a` and `b`
pub fn draw_rect(img: &mut RgbImage, a: (i32, i32), b: (i32, i32), width: u32, color: Rgb<u8>) {
    let (x0, y0, x1, y1) = span(a, b);
    draw_line(img, (x0, y0), (x1, y0), width, Nib::Square, color);
    draw_line(img, (x1, y0), (x1, y1), width, Nib::Square, color);
    draw_line(img, (x1, y1), (x0, y1), width, Nib::Square, color);
    draw_line(img, (x0, y1), (x0, y0), width, Nib::Square, color);
}

/// Outline of the ellipse inscribed in the rectangle with corners `a` and `b`
pub fn draw_ellipse(img: &mut RgbImage, a: (i32, i32), b: (i32, i32), width: u32, color: Rgb<u8>) {
    let (x0, y0, x1, y1) = span(a, b);
    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    let rx = (x1 - x0) as f32 / 2.0;
    let ry = (y1 - y0) as f32 / 2.0;

    // Enough segments that neighbouring points are at most a couple of pixels apart
    let perimeter = std::f32::consts::PI * 2.0 * rx.max(ry);
    let steps = (perimeter / 2.0).ceil().max(16.0) as usize;

    let point = |step: usize| {
        let t = step as f32 / steps as f32 * std::f32::consts::TAU;
        (
            (cx + rx * t.cos()).round() as i32,
            (cy + ry * t.sin()).round() as i32,
        )
    };

    let mut previous = point(0);
    for step in 1..=steps {
        let next = point(step);
        draw_line(img, previous, next, width, Nib::Round, color);
        previous = next;
    }
}

/// Outline of the isosceles triangle inscribed in the rectangle with corners `a` and `b`.
///
/// The apex sits at the middle of the top edge and the base runs along the bottom edge.
pub fn draw_triangle(img: &mut RgbImage, a: (i32, i32), b: (i32, i32), width: u32, color: Rgb<u8>) {
    let (x0, y0, x1, y1) = span(a, b);
    let apex = ((x0 + x1) / 2, y0);
    let left = (x0, y1);
    let right = (x1, y1);
    draw_line(img, apex, right, width, Nib::Square, color);
    draw_line(img, right, left, width, Nib::Square, color);
    draw_line(img, left, apex, width, Nib::Square, color);
}

/// Fill the 4-connected region of same-colored pixels containing (x, y).
///
/// Returns the number of pixels changed.
pub fn flood_fill(img: &mut RgbImage, x: i32, y: i32, fill: Rgb<u8>) -> usize {
    let Some(target) = sample(img, x, y) else {
        return 0;
    };
    if target == fill {
        return 0;
    }

    let width = img.width() as i32;
    let height = img.height() as i32;
    let mut filled = 0;
    let mut stack: Vec<(i32, i32)> = Vec::with_capacity(1024);
    stack.push((x, y));

    while let Some((px, py)) = stack.pop() {
        if sample(img, px, py) != Some(target) {
            continue;
        }

        let mut x1 = px;
        while x1 > 0 && sample(img, x1 - 1, py) == Some(target) {
            x1 -= 1;
        }
        let mut x2 = px;
        while x2 < width - 1 && sample(img, x2 + 1, py) == Some(target) {
            x2 += 1;
        }

        for sx in x1..=x2 {
            img.put_pixel(sx as u32, py as u32, fill);
        }
        filled += (x2 - x1 + 1) as usize;

        if py > 0 {
            scan_line(img, x1, x2, py - 1, target, &mut stack);
        }
        if py < height - 1 {
            scan_line(img, x1, x2, py + 1, target, &mut stack);
        }
    }

    filled
}

/// Push one seed per run of `target` pixels on row `y` between x1 and x2
fn scan_line(img: &RgbImage, x1: i32, x2: i32, y: i32, target: Rgb<u8>, stack: &mut Vec<(i32, i32)>) {
    let mut in_span = false;
    for x in x1..=x2 {
        if sample(img, x, y) == Some(target) {
            if !in_span {
                stack.push((x, y));
                in_span = true;
            }
        } else {
            in_span = false;
        }
    }
}

/// Composite a decoded image over a solid background, dropping alpha
pub fn flatten_onto(image: &DynamicImage, background: Rgb<u8>) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(
            x,
            y,
            Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ]),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn blank(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, WHITE)
    }

    fn count(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_bresenham_includes_both_ends() {
        let mut points = Vec::new();
        bresenham_line(0, 0, 4, 2, |x, y| points.push((x, y)));
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(4, 2)));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_put_pixel_clips() {
        let mut img = blank(4, 4);
        put_pixel(&mut img, -1, 0, BLACK);
        put_pixel(&mut img, 0, 4, BLACK);
        assert_eq!(count(&img, BLACK), 0);
        assert_eq!(sample(&img, 4, 0), None);
    }

    #[test]
    fn test_square_stamp_covers_width() {
        let mut img = blank(10, 10);
        stamp(&mut img, 5, 5, 3, Nib::Square, BLACK);
        assert_eq!(count(&img, BLACK), 9);
    }

    #[test]
    fn test_round_stamp_is_smaller_than_square() {
        let mut img = blank(20, 20);
        stamp(&mut img, 10, 10, 7, Nib::Round, BLACK);
        let round = count(&img, BLACK);
        assert!(round > 0 && round < 49);
    }

    #[test]
    fn test_horizontal_line() {
        let mut img = blank(10, 3);
        draw_line(&mut img, (1, 1), (8, 1), 1, Nib::Square, BLACK);
        assert_eq!(count(&img, BLACK), 8);
        assert_eq!(*img.get_pixel(0, 1), WHITE);
        assert_eq!(*img.get_pixel(9, 1), WHITE);
    }

    #[test]
    fn test_rect_outline_leaves_inside_untouched() {
        let mut img = blank(10, 10);
        draw_rect(&mut img, (7, 7), (2, 2), 1, BLACK);
        assert_eq!(*img.get_pixel(2, 2), BLACK);
        assert_eq!(*img.get_pixel(7, 7), BLACK);
        assert_eq!(*img.get_pixel(4, 4), WHITE);
        // 6x6 outline has 20 border pixels
        assert_eq!(count(&img, BLACK), 20);
    }

    #[test]
    fn test_ellipse_touches_bounding_box_midpoints() {
        let mut img = blank(21, 11);
        draw_ellipse(&mut img, (0, 0), (20, 10), 1, BLACK);
        assert_eq!(*img.get_pixel(0, 5), BLACK);
        assert_eq!(*img.get_pixel(20, 5), BLACK);
        assert_eq!(*img.get_pixel(10, 0), BLACK);
        assert_eq!(*img.get_pixel(10, 10), BLACK);
        assert_eq!(*img.get_pixel(10, 5), WHITE);
    }

    #[test]
    fn test_triangle_apex_and_base() {
        let mut img = blank(11, 11);
        draw_triangle(&mut img, (0, 0), (10, 10), 1, BLACK);
        assert_eq!(*img.get_pixel(5, 0), BLACK);
        assert_eq!(*img.get_pixel(0, 10), BLACK);
        assert_eq!(*img.get_pixel(10, 10), BLACK);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_flood_fill_stops_at_border() {
        let mut img = blank(10, 10);
        draw_rect(&mut img, (2, 2), (7, 7), 1, BLACK);

        let filled = flood_fill(&mut img, 4, 4, RED);
        assert_eq!(filled, 16);
        assert_eq!(*img.get_pixel(4, 4), RED);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(2, 2), BLACK);
    }

    #[test]
    fn test_flood_fill_same_color_is_noop() {
        let mut img = blank(5, 5);
        assert_eq!(flood_fill(&mut img, 2, 2, WHITE), 0);
        assert_eq!(flood_fill(&mut img, 9, 9, RED), 0);
        assert_eq!(count(&img, WHITE), 25);
    }

    #[test]
    fn test_flatten_blends_alpha_over_background() {
        let mut rgba = image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let flat = flatten_onto(&DynamicImage::ImageRgba8(rgba), WHITE);
        assert_eq!(*flat.get_pixel(0, 0), WHITE);
        assert_eq!(*flat.get_pixel(1, 0), Rgb([10, 20, 30]));
    }
}
