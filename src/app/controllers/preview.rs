use std::time::Duration;

use crate::app::domain::device::{DeviceKind, DevicePreset, Dimension};
use crate::app::services::debounce::{Debouncer, Ticket};

/// Capabilities granted to the preview frame: scripts run, nothing else.
pub const SANDBOX_POLICY: &str = "allow-scripts";

/// Container size for the preview frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: Dimension,
    pub height: Dimension,
}

impl Viewport {
    /// Fixed pixel size, or `None` for a fluid viewport.
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        Some((self.width.pixels()?, self.height.pixels()?))
    }
}

/// Everything a render surface needs to show the current preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub document: String,
    pub revision: u64,
    pub device: &'static DevicePreset,
    pub fullscreen: bool,
}

impl PreviewFrame {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.device.width,
            height: self.device.height,
        }
    }

    /// Page that embeds the document in a sandboxed frame sized to the device.
    pub fn host_page(&self) -> String {
        let viewport = self.viewport();
        let padding = if self.fullscreen { "0" } else { "16px" };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>FerrisFiddle Preview ({device})</title>
<style>
  html, body {{ margin: 0; height: 100%; background: #e2e8f0; }}
  .stage {{
    box-sizing: border-box; height: 100%; padding: {padding}; overflow: auto;
    display: flex; justify-content: center; align-items: flex-start;
  }}
  .device {{
    width: {width}; height: {height};
    background: #fff; box-shadow: 0 4px 16px rgba(0,0,0,.2);
  }}
  iframe {{ width: 100%; height: 100%; border: 0; }}
</style>
</head>
<body>
<div class="stage">
  <div class="device">
    <iframe title="output" sandbox="{sandbox}" srcdoc="{srcdoc}"></iframe>
  </div>
</div>
</body>
</html>
"#,
            device = self.device.name,
            padding = padding,
            width = viewport.width,
            height = viewport.height,
            sandbox = SANDBOX_POLICY,
            srcdoc = escape_attribute(&self.document),
        )
    }
}

/// Escape text for a double-quoted HTML attribute value.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Owns the one live preview document plus the device and fullscreen state.
///
/// Publishing replaces the document wholesale and bumps the revision. A manual
/// refresh publishes an empty document first; the new one lands when the
/// refresh ticket comes back on the next loop turn.
pub struct PreviewController {
    document: String,
    revision: u64,
    refresh: Debouncer<String>,
    device: &'static DevicePreset,
    fullscreen: bool,
}

impl PreviewController {
    pub fn new(device: DeviceKind) -> Self {
        Self {
            document: String::new(),
            revision: 0,
            refresh: Debouncer::new(String::new(), Duration::ZERO),
            device: device.preset(),
            fullscreen: false,
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn publish(&mut self, document: String) {
        self.document = document;
        self.revision += 1;
        tracing::debug!("Preview revision {} ({} bytes)", self.revision, self.document.len());
    }

    /// Clear the preview and hold `document` until the returned ticket fires.
    pub fn begin_refresh(&mut self, document: String) -> Ticket {
        self.publish(String::new());
        self.refresh.push(document)
    }

    /// Publish the held refresh document. False if a later refresh superseded it.
    pub fn complete_refresh(&mut self, ticket: Ticket) -> bool {
        if self.refresh.fire(ticket).is_none() {
            return false;
        }
        let document = self.refresh.settled().clone();
        self.publish(document);
        true
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_pending()
    }

    /// Returns true if the device changed. The document is left alone.
    pub fn set_device(&mut self, kind: DeviceKind) -> bool {
        let preset = kind.preset();
        if std::ptr::eq(self.device, preset) {
            return false;
        }
        self.device = preset;
        true
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.device.width,
            height: self.device.height,
        }
    }

    pub fn frame(&self) -> PreviewFrame {
        PreviewFrame {
            document: self.document.clone(),
            revision: self.revision,
            device: self.device,
            fullscreen: self.fullscreen,
        }
    }
}
