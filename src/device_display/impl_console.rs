use crate::decision_maker::render::View;
use crate::device_display::interface::DeviceDisplay;
use crate::error::Result;
use std::sync::{Mutex, PoisonError};

/// Prints a boxed summary of the view whenever its text changes.
#[derive(Default)]
pub struct DeviceDisplayConsole {
    last_lines: Mutex<Vec<String>>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn view_lines(view: &View) -> Vec<String> {
    let mut lines = vec![view.status.clone()];
    if let Some(result) = &view.result {
        lines.push(format!("Class: {}", result.class_name));
        lines.push(format!("Probability: {}", result.probability));
    }
    if let Some(image) = &view.image {
        lines.push(format!("Image: {}", image.data.mime()));
    }
    lines
}

pub fn boxed(lines: &[String]) -> String {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = "─".repeat(width);
    let mut out = format!("┌{}┐\n", border);
    for line in lines {
        let padding = width - line.chars().count();
        out.push_str(&format!("│{}{}│\n", line, " ".repeat(padding)));
    }
    out.push_str(&format!("└{}┘", border));
    out
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn render(&self, view: &View) -> Result<()> {
        let lines = view_lines(view);
        let mut last_lines = self
            .last_lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *last_lines != lines {
            println!("{}", boxed(&lines));
            *last_lines = lines;
        }
        Ok(())
    }
}
