//! Renders a short Mandelbrot zoom and writes it as `mandelbrot.gif`.

use std::fs::File;
use std::io::BufWriter;

use giflzw::gif::{Frame, Gif, GifDesc, Palette};

const W: u16 = 256;
const H: u16 = 256;
const FRAMES: u32 = 24;
const MAX_ITER: u32 = 96;

fn palette() -> Palette {
    let mut palette = [[0u8; 3]; 256];
    for (i, rgb) in palette.iter_mut().enumerate() {
        let t = i as f64 / 255.0;
        *rgb = [
            (9.0 * (1.0 - t) * t * t * t * 255.0) as u8,
            (15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0) as u8,
            (8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0) as u8,
        ];
    }
    palette
}

fn render(zoom: f64, indices: &mut [u8]) {
    // Zoom towards a point on the seahorse valley boundary.
    let (cx, cy) = (-0.743_643_887_037_151, 0.131_825_904_205_330);
    let scale = 3.0 * zoom;

    for y in 0..u32::from(H) {
        for x in 0..u32::from(W) {
            let re = cx + (x as f64 / f64::from(W) - 0.5) * scale;
            let im = cy + (y as f64 / f64::from(H) - 0.5) * scale;

            let (mut zr, mut zi) = (0.0f64, 0.0f64);
            let mut iter = 0;
            while iter < MAX_ITER && zr * zr + zi * zi <= 4.0 {
                let next = zr * zr - zi * zi + re;
                zi = 2.0 * zr * zi + im;
                zr = next;
                iter += 1;
            }

            let color = if iter == MAX_ITER {
                0
            } else {
                (iter * 255 / MAX_ITER) as u8
            };
            indices[(y * u32::from(W) + x) as usize] = color;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let file = BufWriter::new(File::create("mandelbrot.gif")?);
    let desc = GifDesc {
        width: W,
        height: H,
        delay: 8,
        palette: palette(),
    };

    let mut gif = Gif::begin(file, &desc)?;
    let mut indices = vec![0u8; usize::from(W) * usize::from(H)];
    for frame in 0..FRAMES {
        let zoom = 0.85f64.powi(frame as i32);
        render(zoom, &mut indices);
        gif.add_frame(&Frame { palette: None, indices: &indices })?;
    }
    gif.end()?;
    Ok(())
}
