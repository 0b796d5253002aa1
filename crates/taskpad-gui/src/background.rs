use std::path::{Path, PathBuf};

use anyhow::Context;
use eframe::egui;
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, warn};

/// Decorative image painted behind the window content.
///
/// Loading is best-effort: every failure is logged and the shell keeps
/// its flat background colour.
pub struct Background {
    texture: egui::TextureHandle,
}

impl Background {
    pub fn load(ctx: &egui::Context, candidates: &[PathBuf]) -> Option<Self> {
        let (path, image) = first_decodable(candidates, texture_bound(ctx))?;
        let texture = ctx.load_texture(
            format!("background:{}", path.display()),
            image,
            egui::TextureOptions::LINEAR,
        );
        Some(Self { texture })
    }

    /// Stretches the image over the whole window, underneath every panel.
    pub fn paint(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        painter.image(
            self.texture.id(),
            ctx.screen_rect(),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

/// Largest image the window can use: the monitor in physical pixels when
/// known, never more than the GPU's texture limit.
fn texture_bound(ctx: &egui::Context) -> [u32; 2] {
    let max_side = ctx.input(|i| i.max_texture_side) as u32;
    let monitor = ctx.input(|i| i.viewport().monitor_size.map(|size| size * i.pixels_per_point));
    match monitor {
        Some(size) if size.x >= 1.0 && size.y >= 1.0 => [
            (size.x as u32).min(max_side),
            (size.y as u32).min(max_side),
        ],
        _ => [max_side, max_side],
    }
}

pub fn first_decodable(
    candidates: &[PathBuf],
    bound: [u32; 2],
) -> Option<(PathBuf, egui::ColorImage)> {
    for path in candidates {
        info!(path = %path.display(), "trying background image");
        if !path.exists() {
            continue;
        }
        match decode(path, bound) {
            Ok(image) => {
                info!(path = %path.display(), "loaded background image");
                return Some((path.clone(), image));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load background image");
            }
        }
    }

    info!("no background image available; using flat background colour");
    None
}

fn decode(path: &Path, bound: [u32; 2]) -> anyhow::Result<egui::ColorImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let rgba = fit_within(decoded, bound).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_raw(),
    ))
}

/// Shrinks `image` to fit inside `bound`, keeping its aspect ratio.
/// Smaller images pass through untouched.
fn fit_within(image: DynamicImage, bound: [u32; 2]) -> DynamicImage {
    let [max_w, max_h] = bound;
    if image.width() <= max_w && image.height() <= max_h {
        return image;
    }

    debug!(
        from_w = image.width(),
        from_h = image.height(),
        max_w,
        max_h,
        "downscaling background image"
    );
    image.resize(max_w.max(1), max_h.max(1), FilterType::Lanczos3)
}
