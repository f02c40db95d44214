//! Rendering HTML fragments to PNG files.
//!
//! Embedded class-less divs on the site are interactive widgets or drawings
//! that lose their meaning as text, so they are captured as images with an
//! external `wkhtmltoimage` binary. Rendering is best effort: failures are
//! logged and the segment keeps an empty file path.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, error};

/// Image rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Render embedded divs at all.
    pub enabled: bool,
    /// HTML-to-image executable.
    pub binary: String,
    /// Directory receiving the PNG files.
    pub output_dir: PathBuf,
    /// Stylesheet applied while rendering, usually the site's W3.CSS.
    pub stylesheet: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            binary: "wkhtmltoimage".to_string(),
            output_dir: default_output_dir(),
            stylesheet: None,
        }
    }
}

/// `<cache dir>/w3scrape/images`, or `./files` when there is no cache dir.
pub fn default_output_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("w3scrape").join("images"))
        .unwrap_or_else(|| PathBuf::from("files"))
}

/// Turns an HTML fragment into an image file.
pub trait ImageRenderer {
    /// Path of the written image, `None` when rendering failed.
    fn render(&mut self, html: &str) -> Option<PathBuf>;
}

/// Renderer used when image capture is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRenderer;

impl ImageRenderer for DisabledRenderer {
    fn render(&mut self, _html: &str) -> Option<PathBuf> {
        None
    }
}

/// Renders through the `wkhtmltoimage` command line tool.
#[derive(Debug, Clone)]
pub struct WkhtmlRenderer {
    config: RenderConfig,
    counter: usize,
}

impl WkhtmlRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config, counter: 0 }
    }

    /// Path the next successful render writes to.
    pub fn next_path(&self) -> PathBuf {
        self.config.output_dir.join(format!("div{}.png", self.counter))
    }

    fn run(&self, html: &str, target: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let mut command = Command::new(&self.config.binary);
        command.args(["--quiet", "--format", "png", "--encoding", "UTF-8"]);
        if let Some(stylesheet) = &self.config.stylesheet {
            command.arg("--user-style-sheet").arg(stylesheet);
        }
        command
            .arg("-")
            .arg(target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        // The pipe closes at the end of the arm, before waiting.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(html.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        written?;
        if output.status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "{} exited with {}: {}",
                self.config.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

impl ImageRenderer for WkhtmlRenderer {
    fn render(&mut self, html: &str) -> Option<PathBuf> {
        if !self.config.enabled {
            return None;
        }

        let target = self.next_path();
        match self.run(html, &target) {
            Ok(()) => {
                debug!(path = %target.display(), "rendered element to image");
                self.counter += 1;
                Some(target)
            }
            Err(err) => {
                error!(error = %err, "failed to convert to image");
                None
            }
        }
    }
}
