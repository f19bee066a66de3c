use egui::{Color32, Context, RichText, Sense, Stroke, Vec2};
use image::ImageReader;
use std::sync::{Arc, Mutex};

use super::App;
use crate::plotting::{hit_test, layout::MARKER_RADIUS, PlotSurface, Viewport};
use crate::scenes::{IntroScene, SceneSurface};

/// Offset of the tooltip from the pointer, in points
const TOOLTIP_OFFSET: f32 = 10.0;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    egui::TopBottomPanel::bottom("navigation").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let controls = app.sequencer.controls();
            let idle = !app.is_rendering;

            if ui
                .add_enabled(idle && controls.previous_enabled, egui::Button::new("Previous"))
                .clicked()
            {
                let target = app.sequencer.previous_target();
                navigate(app, ctx, app_arc.clone(), target);
            }
            ui.label(app.format_progress());
            if ui
                .add_enabled(idle && controls.next_enabled, egui::Button::new("Next"))
                .clicked()
            {
                let target = app.sequencer.next_target();
                navigate(app, ctx, app_arc.clone(), target);
            }

            ui.separator();
            if ui
                .add_enabled(app.can_export(), egui::Button::new("Export SVG"))
                .clicked()
            {
                export_current(app, ctx, app_arc.clone());
            }
            if let Some(status) = &app.status_message {
                ui.label(status);
            }
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let viewport = Viewport::new(available.x as u32, available.y as u32);

        // First frame shows the intro; later size changes redraw the current step
        if app.needs_render(viewport) {
            let target = app.resize_target();
            app.viewport = Some(viewport);
            navigate(app, ctx, app_arc.clone(), target);
        }

        let Some(surface) = app.surface.clone() else {
            if let Some(error) = &app.error_message {
                ui.colored_label(Color32::DARK_RED, error);
            } else if app.is_rendering {
                ui.centered_and_justified(|ui| ui.spinner());
            }
            return;
        };

        match surface.as_ref() {
            SceneSurface::Intro(intro) => draw_intro(app, ui, ctx, intro),
            SceneSurface::Plot(plot) => draw_plot_surface(app, ui, ctx, plot),
        }
    });
}

fn draw_intro(app: &mut App, ui: &mut egui::Ui, ctx: &Context, intro: &IntroScene) {
    if !app.intro_image_attempted {
        app.intro_image_attempted = true;
        load_intro_texture(app, ctx);
    }

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() / 2.0 - intro.image_height).max(0.0));
        ui.heading(intro.headline);
        if let Some(texture) = &app.intro_texture {
            let [width, height] = texture.size();
            let scale = intro.image_height / height.max(1) as f32;
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(Vec2::new(width as f32 * scale, intro.image_height)),
            );
        }
    });
}

fn draw_plot_surface(app: &mut App, ui: &mut egui::Ui, ctx: &Context, plot: &PlotSurface) {
    let viewport = plot.viewport();
    let size = Vec2::new(viewport.width as f32, viewport.height as f32);
    let texture = app
        .surface_texture
        .get_or_insert_with(|| {
            ctx.load_texture(
                "scene_surface",
                egui::ColorImage::from_rgb(
                    [viewport.width as usize, viewport.height as usize],
                    &plot.pixels,
                ),
                egui::TextureOptions::LINEAR,
            )
        })
        .clone();

    let response = ui.add(
        egui::Image::new(&texture)
            .fit_to_exact_size(size)
            .sense(Sense::hover()),
    );

    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let local = pointer - response.rect.min;
    let Some(marker) = hit_test(&plot.layout.markers, (local.x as f64, local.y as f64)) else {
        return;
    };

    let center = response.rect.min + Vec2::new(marker.x as f32, marker.y as f32);
    let side = 2.0 * MARKER_RADIUS as f32;
    ui.painter().rect_stroke(
        egui::Rect::from_center_size(center, Vec2::splat(side + 3.0)),
        0.0,
        Stroke::new(3.0, Color32::BLACK),
    );

    egui::Area::new(egui::Id::new("marker_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(pointer + Vec2::splat(TOOLTIP_OFFSET))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for (label, value) in marker.tooltip.iter() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("{}:", label)).strong());
                        ui.label(value);
                    });
                }
            });
        });
}

/// Render `target` in the background and swap it in when done
fn navigate(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>, target: isize) {
    let Some(viewport) = app.viewport else {
        return;
    };
    let Some(step) = app.begin_step(target) else {
        return;
    };
    let renderer = Arc::clone(&app.renderer);
    let ctx = ctx.clone();

    tokio::spawn(async move {
        let result = renderer.render(step.index(), viewport).await;
        if let Ok(mut app) = app_arc.lock() {
            app.finish_step(step, result);
        } else {
            log::error!("Failed to acquire app lock after rendering");
        }
        ctx.request_repaint();
    });
}

fn export_current(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    let Some(viewport) = app.viewport else {
        return;
    };
    let renderer = Arc::clone(&app.renderer);
    let index = app.sequencer.cursor();
    let dir = app.config.export_dir.clone();
    let ctx = ctx.clone();
    app.is_exporting = true;
    app.status_message = Some("Exporting...".to_string());

    tokio::spawn(async move {
        let message = match renderer.export(index, viewport, &dir).await {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Export failed: {}", e);
                format!("Export failed: {}", e)
            }
        };
        if let Ok(mut app) = app_arc.lock() {
            app.is_exporting = false;
            app.status_message = Some(message);
        }
        ctx.request_repaint();
    });
}

fn load_intro_texture(app: &mut App, ctx: &Context) {
    let path = &app.config.intro_image_path;
    match ImageReader::open(path).and_then(|reader| {
        reader
            .decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            let texture = ctx.load_texture(
                "intro_image",
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            );
            app.intro_texture = Some(texture);
        }
        Err(e) => {
            log::warn!("Intro image {} unavailable: {}", path.display(), e);
        }
    }
}
