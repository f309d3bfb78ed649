use std::fs;
use std::path::PathBuf;

use crate::app::controllers::preview::PreviewFrame;
use crate::app::infrastructure::error::{AppError, Result};

/// Somewhere a preview frame can be shown.
pub trait RenderSurface {
    fn present(&mut self, frame: &PreviewFrame) -> Result<()>;
}

/// Shows the preview in the system browser through a host page on disk.
///
/// The first present opens the page; later presents only rewrite the file, so
/// the browser tab picks the change up on its next reload.
pub struct BrowserSurface {
    path: PathBuf,
    opened: bool,
}

impl BrowserSurface {
    pub fn new() -> Self {
        Self::at(std::env::temp_dir().join("ferrisfiddle").join("preview.html"))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path, opened: false }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn write(&self, frame: &PreviewFrame) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, frame.host_page())?;
        Ok(())
    }

    /// Write the page and open it in the browser even if it was opened before.
    pub fn show(&mut self, frame: &PreviewFrame) -> Result<()> {
        self.write(frame)?;
        open::that(&self.path)
            .map_err(|e| AppError::Preview(format!("Failed to open browser: {}", e)))?;
        self.opened = true;
        tracing::info!("Opened preview at {}", self.path.display());
        Ok(())
    }

    /// Delete the host page, if one was written.
    pub fn cleanup(&self) {
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::debug!("Could not remove {}: {}", self.path.display(), e);
        }
    }
}

impl Default for BrowserSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for BrowserSurface {
    fn present(&mut self, frame: &PreviewFrame) -> Result<()> {
        if self.opened {
            self.write(frame)
        } else {
            self.show(frame)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controllers::preview::PreviewController;
    use crate::app::domain::device::DeviceKind;
    use tempfile::TempDir;

    #[test]
    fn test_write_host_page() {
        let dir = TempDir::new().unwrap();
        let surface = BrowserSurface::at(dir.path().join("out").join("preview.html"));

        let mut preview = PreviewController::new(DeviceKind::Tablet);
        preview.publish("<p>hi</p>".to_string());
        surface.write(&preview.frame()).unwrap();

        let page = fs::read_to_string(surface.path()).unwrap();
        assert!(page.contains("sandbox=\"allow-scripts\""));
        assert!(page.contains("&lt;p&gt;hi&lt;/p&gt;"));

        surface.cleanup();
        assert!(!surface.path().exists());
    }
}
