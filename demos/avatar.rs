//! Renders a generated photo into a circular avatar and a rounded card.
//!
//! Run with: cargo run --example avatar [output-dir]
//! Set RUST_LOG=debug to see flatten and shader rebuild logs.

use std::path::PathBuf;

use roundview::prelude::*;

const SIZE: i32 = 160;

fn gradient_photo(width: u32, height: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        image::Rgba([r, g, 180, 255])
    })
}

fn render(view: &mut RoundedImageView, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = PixmapCanvas::new(SIZE as u32, SIZE as u32).ok_or("canvas allocation failed")?;
    canvas.clear(Color::rgb(0.1, 0.1, 0.15));

    let outcome = view.paint(&mut canvas);
    canvas.to_rgba_image().save(&path)?;
    log::info!("{outcome:?} -> {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_default();
    let photo = Bitmap::from_rgba_image(&gradient_photo(320, 200))?;

    // Circular avatar with an outer border
    let mut avatar = RoundedImageView::with_attributes(
        Attributes::new()
            .border_width(6)
            .border_color(Color::WHITE)
            .corner_radius(f32::MAX),
    );
    avatar.set_redraw_callback(|| log::debug!("avatar requested a redraw"));
    avatar.on_size_changed(SIZE, SIZE);
    avatar.set_image_bitmap(Some(photo.clone()));
    render(&mut avatar, out_dir.join("avatar_circle.png"))?;

    // Rounded card, border drawn over the image, desaturated
    let mut card = RoundedImageView::with_attributes(
        Attributes::new()
            .border_width(4)
            .border_overlay(true)
            .border_color(Color::from_hex(0xFFB300))
            .corner_radius(24.0),
    );
    card.on_size_changed(SIZE, SIZE);
    card.set_padding(8);
    card.set_image_bitmap(Some(photo));
    card.set_color_filter(Some(ColorFilter::grayscale()));
    render(&mut card, out_dir.join("avatar_card.png"))?;

    // Procedural content that updates itself
    let pulse = std::rc::Rc::new(CustomDrawable::new(None, |target| {
        let (w, h) = (target.width(), target.height());
        for (i, pixel) in target.pixels_mut().iter_mut().enumerate() {
            let x = i as u32 % w;
            let y = i as u32 / w;
            let v = ((x + y) * 255 / (w + h).max(1)) as u8;
            *pixel = resvg::tiny_skia::ColorU8::from_rgba(v, 64, 255 - v, 255).premultiply();
        }
    }));
    let mut badge = RoundedImageView::with_attributes(Attributes::new().corner_radius(f32::MAX));
    badge.on_size_changed(SIZE, SIZE);
    badge.set_circle_background_color(Color::BLACK);
    badge.set_image_drawable(Some(Drawable::Procedural(pulse.clone())));
    pulse.invalidate_self();
    render(&mut badge, out_dir.join("avatar_badge.png"))?;

    let stats = badge.stats();
    log::info!(
        "badge: {} flattens, {} content redraws, {} shader rebuilds",
        stats.flattens,
        stats.content_redraws,
        stats.shader_rebuilds
    );

    Ok(())
}
