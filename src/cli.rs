use crate::error::{Error, Result};
use std::path::PathBuf;

pub const USAGE: &str = "decision-maker [--config CONFIG.toml] [--classify IMAGE...]";

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    /// Classify these files without opening a window.
    pub classify: Vec<PathBuf>,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| Error::Usage(format!("--config needs a path\n{}", USAGE)))?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                "--classify" => {
                    parsed.classify.extend(args.by_ref().map(PathBuf::from));
                    if parsed.classify.is_empty() {
                        return Err(Error::Usage(format!(
                            "--classify needs at least one image\n{}",
                            USAGE
                        )));
                    }
                }
                other => {
                    return Err(Error::Usage(format!("unexpected argument {}\n{}", other, USAGE)))
                }
            }
        }

        Ok(parsed)
    }
}
