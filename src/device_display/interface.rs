use crate::decision_maker::render::View;
use crate::error::Result;

pub trait DeviceDisplay: Send + Sync {
    /// Replaces whatever is currently shown with `view`.
    fn render(&self, view: &View) -> Result<()>;
}
