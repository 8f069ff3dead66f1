use crate::config::WindowConfig;
use crate::decision_maker::core::Msg;
use crate::decision_maker::render::{ImageView, View};
use crate::device_display::interface::DeviceDisplay;
use crate::error::{Error, Result};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use eframe::egui;
use rfd::FileDialog;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];
const PREVIEW_MAX_WIDTH: f32 = 480.0;

struct DecisionWindow {
    view: Arc<Mutex<View>>,
    msg_sender: Sender<Msg>,
    logger: Arc<dyn Logger>,
    texture: Option<(u64, Option<egui::TextureHandle>)>,
}

impl DecisionWindow {
    fn send(&self, msg: Msg) {
        if self.msg_sender.send(msg).is_err() {
            let _ = self.logger.error("Runtime is no longer receiving messages");
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, image: &ImageView) -> Option<egui::TextureHandle> {
        if let Some((generation, texture)) = &self.texture {
            if *generation == image.generation {
                return texture.clone();
            }
        }

        let texture = match load_texture(ctx, &image.data) {
            Ok(texture) => Some(texture),
            Err(e) => {
                let _ = self.logger.error(&format!("Cannot preview image: {}", e));
                None
            }
        };
        self.texture = Some((image.generation, texture.clone()));
        texture
    }
}

fn load_texture(ctx: &egui::Context, data: &ImageData) -> Result<egui::TextureHandle> {
    let rgba = data.decode()?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture("captured-image", color, egui::TextureOptions::LINEAR))
}

impl eframe::App for DecisionWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self
            .view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Decision Maker");
                ui.separator();
                ui.label(&view.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        view.capture_enabled,
                        egui::Button::new("Capture from Webcam"),
                    )
                    .clicked()
                {
                    self.send(Msg::CaptureRequested);
                }

                if ui.button("Choose File").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Images", IMAGE_EXTENSIONS)
                        .pick_file()
                    {
                        self.send(Msg::FileSelected(path));
                    }
                }
            });

            if let Some(result) = &view.result {
                ui.add_space(12.0);
                ui.heading("Classification Result");
                ui.label(format!("Class: {}", result.class_name));
                ui.label(format!("Probability: {}", result.probability));
            }

            if let Some(image) = &view.image {
                ui.add_space(12.0);
                ui.heading("Captured Image");
                match self.texture_for(ctx, image) {
                    Some(texture) => {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                &texture,
                            ))
                            .max_width(PREVIEW_MAX_WIDTH),
                        );
                    }
                    None => {
                        ui.label("Preview unavailable");
                    }
                }
            }
        });
    }
}

pub struct DeviceDisplayGui {
    view: Arc<Mutex<View>>,
    egui_ctx: Arc<Mutex<Option<egui::Context>>>,
    logger: Arc<dyn Logger>,
}

impl DeviceDisplayGui {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            view: Arc::new(Mutex::new(View::default())),
            egui_ctx: Arc::new(Mutex::new(None)),
            logger: logger.with_namespace("display").with_namespace("gui"),
        }
    }

    /// Blocks the calling thread until the window is closed. Must be called
    /// from the main thread.
    pub fn run(&self, config: &WindowConfig, msg_sender: Sender<Msg>) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(config.title.clone())
                .with_inner_size([config.width, config.height]),
            ..Default::default()
        };

        let window = DecisionWindow {
            view: Arc::clone(&self.view),
            msg_sender,
            logger: Arc::clone(&self.logger),
            texture: None,
        };
        let egui_ctx = Arc::clone(&self.egui_ctx);

        eframe::run_native(
            &config.title,
            options,
            Box::new(move |cc| {
                *egui_ctx.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(cc.egui_ctx.clone());
                Box::new(window)
            }),
        )
        .map_err(|e| Error::Display(e.to_string()))
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn render(&self, view: &View) -> Result<()> {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view.clone();

        if let Some(ctx) = self
            .egui_ctx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            ctx.request_repaint();
        }
        Ok(())
    }
}
