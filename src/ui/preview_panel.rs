use fltk::{
    app::Sender,
    button::Button,
    enums::{Color, FrameType},
    frame::Frame,
    group::{Flex, FlexType, Scroll, ScrollType},
    misc::HelpView,
    prelude::*,
};

use super::theme::ThemeColors;
use crate::app::controllers::preview::PreviewFrame;
use crate::app::domain::device::DeviceKind;
use crate::app::domain::messages::Message;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::surface::RenderSurface;

pub const TOOLBAR_HEIGHT: i32 = 34;

/// Markup-only rendition of a composed document for the in-window view.
/// HelpView cannot run scripts and would print style and script text as-is,
/// so those regions are dropped.
pub fn glance_markup(document: &str) -> String {
    let without_styles = strip_region(document, "style");
    strip_region(&without_styles, "script")
}

fn strip_region(text: &str, tag: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(&open) {
        let start = cursor + found;
        out.push_str(&text[cursor..start]);
        match lower[start..].find(&close) {
            Some(end) => cursor = start + end + close.len(),
            None => return out,
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// Toolbar plus a HelpView inside a scroll area sized to the device preset.
pub struct PreviewPanel {
    pub group: Flex,
    scroll: Scroll,
    view: HelpView,
    devices: [Button; 3],
    buttons: Vec<Button>,
    fullscreen_btn: Button,
    size_label: Frame,
    current_device: DeviceKind,
    colors: Option<ThemeColors>,
}

impl PreviewPanel {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut group = Flex::default();
        group.set_type(FlexType::Column);
        group.set_spacing(0);

        let mut toolbar = Flex::default();
        toolbar.set_type(FlexType::Row);
        toolbar.set_margins(6, 4, 6, 4);
        toolbar.set_spacing(4);

        let mut title = Frame::default().with_label("Preview");
        title.set_label_size(13);
        toolbar.fixed(&title, 60);

        let mut refresh_btn = toolbar_button("↻", "Refresh preview");
        refresh_btn.emit(*sender, Message::RefreshPreview);
        toolbar.fixed(&refresh_btn, 32);

        Frame::default();

        let devices = DeviceKind::ALL.map(|kind| {
            let mut btn = toolbar_button(kind.preset().name, "Preview at this size");
            btn.emit(*sender, Message::SetDevice(kind));
            toolbar.fixed(&btn, 70);
            btn
        });

        let mut size_label = Frame::default();
        size_label.set_label_size(11);
        toolbar.fixed(&size_label, 90);

        let mut browser_btn = toolbar_button("Open", "Open the preview in your browser");
        browser_btn.emit(*sender, Message::OpenInBrowser);
        toolbar.fixed(&browser_btn, 50);

        let mut fullscreen_btn = toolbar_button("⤢", "Toggle fullscreen");
        fullscreen_btn.emit(*sender, Message::ToggleFullscreen);
        toolbar.fixed(&fullscreen_btn, 32);

        toolbar.end();
        group.fixed(&toolbar, TOOLBAR_HEIGHT);

        let mut scroll = Scroll::default();
        scroll.set_type(ScrollType::BothAlways);
        scroll.set_frame(FrameType::FlatBox);
        let mut view = HelpView::default();
        view.set_text_size(14);
        scroll.end();

        group.end();

        Self {
            group,
            scroll,
            view,
            devices,
            buttons: vec![refresh_btn, browser_btn],
            fullscreen_btn,
            size_label,
            current_device: DeviceKind::Desktop,
            colors: None,
        }
    }

    /// Fit the view to the device, or to the scroll area for a fluid device.
    fn layout_view(&mut self, frame: &PreviewFrame) {
        let (x, y) = (self.scroll.x(), self.scroll.y());
        match frame.viewport().pixel_size() {
            Some((w, h)) => {
                self.scroll.set_type(ScrollType::BothAlways);
                self.view.resize(x, y, w as i32, h as i32);
                self.size_label.set_label(&format!("{}×{}", w, h));
            }
            None => {
                self.scroll.set_type(ScrollType::None);
                self.view.resize(x, y, self.scroll.w(), self.scroll.h());
                self.size_label.set_label("");
            }
        }
        self.scroll.scroll_to(0, 0);
    }

    pub fn relayout(&mut self, frame: &PreviewFrame) {
        self.layout_view(frame);
        self.scroll.redraw();
    }

    pub fn apply_theme(&mut self, colors: &ThemeColors) {
        self.colors = Some(*colors);
        self.group.set_frame(FrameType::FlatBox);
        self.group.set_color(colors.panel);
        self.scroll.set_color(colors.window);
        self.view.set_color(Color::White);
        self.size_label.set_label_color(colors.muted);
        for btn in self.buttons.iter_mut().chain(std::iter::once(&mut self.fullscreen_btn)) {
            btn.set_color(colors.panel);
            btn.set_label_color(colors.text);
        }
        self.paint_devices();
        self.group.redraw();
    }

    fn paint_devices(&mut self) {
        let Some(colors) = self.colors else {
            return;
        };
        for kind in DeviceKind::ALL {
            let btn = &mut self.devices[kind as usize];
            if kind == self.current_device {
                btn.set_color(colors.accent);
                btn.set_label_color(Color::White);
            } else {
                btn.set_color(colors.panel);
                btn.set_label_color(colors.text);
            }
            btn.redraw();
        }
    }
}

fn toolbar_button(label: &str, tooltip: &str) -> Button {
    let mut btn = Button::default().with_label(label);
    btn.set_frame(FrameType::FlatBox);
    btn.set_label_size(12);
    btn.set_tooltip(tooltip);
    btn.clear_visible_focus();
    btn
}

impl RenderSurface for PreviewPanel {
    fn present(&mut self, frame: &PreviewFrame) -> Result<()> {
        self.current_device = frame.device.kind;
        self.fullscreen_btn
            .set_label(if frame.fullscreen { "⤡" } else { "⤢" });
        self.paint_devices();
        self.layout_view(frame);
        self.view.set_value(&glance_markup(&frame.document));
        self.scroll.redraw();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::compose::compose_preview;

    #[test]
    fn test_glance_drops_style_and_script() {
        let doc = compose_preview("<p>hi</p>", "p{color:red}", "console.log(1)");
        let glance = glance_markup(&doc);
        assert!(glance.contains("<body><p>hi</p></body>"));
        assert!(!glance.contains("color:red"));
        assert!(!glance.contains("console.log"));
    }

    #[test]
    fn test_glance_keeps_text_between_regions() {
        let glance = glance_markup("a<STYLE media=\"x\">b</Style>c<script>d</script>e");
        assert_eq!(glance, "ace");
    }

    #[test]
    fn test_glance_unclosed_region_drops_rest() {
        assert_eq!(glance_markup("<p>x</p><script>let a"), "<p>x</p>");
    }
}
