//! End-to-end checks of the edit → settle → compose → preview path without a UI.

use std::time::Duration;

use ferris_fiddle::app::controllers::editor::EditorSurface;
use ferris_fiddle::app::controllers::palette::{CommandContext, CommandRegistry, PaletteState};
use ferris_fiddle::app::controllers::preview::PreviewController;
use ferris_fiddle::app::domain::{DeviceKind, Message, Pane, SourceSet};
use ferris_fiddle::app::services::compose::{
    ComposePipeline, Settled, compose_preview, compose_sources,
};

fn pipeline(sources: &SourceSet) -> ComposePipeline {
    ComposePipeline::new(sources, Duration::from_millis(500), Duration::from_millis(250))
}

#[test]
fn typing_burst_publishes_one_document_with_final_text() {
    let mut editor = EditorSurface::new(SourceSet::default(), Pane::Html);
    let mut pipeline = pipeline(editor.sources());
    let mut preview = PreviewController::new(DeviceKind::Desktop);

    let mut settle_tickets = Vec::new();
    for text in ["<h", "<h1>", "<h1>Hi", "<h1>Hi</h1>"] {
        editor.replace(Pane::Html, text.to_string());
        settle_tickets.push(pipeline.edit(Pane::Html, text.to_string()));
    }

    let mut compose_tickets = Vec::new();
    for ticket in settle_tickets {
        if let Settled::Changed(compose) = pipeline.settle(Pane::Html, ticket) {
            compose_tickets.push(compose);
        }
    }
    assert_eq!(compose_tickets.len(), 1);

    for ticket in compose_tickets {
        if let Some(doc) = pipeline.compose_due(ticket) {
            preview.publish(doc);
        }
    }
    assert_eq!(preview.revision(), 1);
    assert_eq!(preview.document(), compose_preview("<h1>Hi</h1>", "", ""));
}

#[test]
fn manual_refresh_uses_live_text_while_edits_are_pending() {
    let start = SourceSet::new("<p>old</p>", "", "");
    let mut editor = EditorSurface::new(start.clone(), Pane::Html);
    let mut pipeline = pipeline(&start);
    let mut preview = PreviewController::new(DeviceKind::Desktop);

    editor.replace(Pane::Html, "<p>hi</p>".to_string());
    editor.replace(Pane::Css, "p{color:red}".to_string());
    editor.replace(Pane::Js, "console.log(1)".to_string());
    pipeline.edit(Pane::Html, "<p>hi</p>".to_string());
    assert!(pipeline.is_pending(Pane::Html));

    let ticket = preview.begin_refresh(compose_sources(editor.sources()));
    assert_eq!(preview.document(), "");
    assert!(preview.complete_refresh(ticket));

    let doc = preview.document();
    assert!(doc.contains("<body><p>hi</p></body>"));
    assert!(doc.contains("<style>p{color:red}</style>"));
    assert!(doc.contains("<script>console.log(1)</script>"));
    assert_eq!(pipeline.settled(Pane::Html), "<p>old</p>");
}

#[test]
fn manual_refresh_supersedes_a_compose_in_flight() {
    let mut editor = EditorSurface::new(SourceSet::new("<p>a</p>", "", ""), Pane::Css);
    let mut pipeline = pipeline(editor.sources());
    let mut preview = PreviewController::new(DeviceKind::Desktop);

    editor.replace(Pane::Css, "p{}".to_string());
    let settle = pipeline.edit(Pane::Css, "p{}".to_string());
    let Settled::Changed(compose) = pipeline.settle(Pane::Css, settle) else {
        panic!("css edit should schedule a compose");
    };

    editor.replace(Pane::Html, "<p>b</p>".to_string());
    let refresh = preview.begin_refresh(compose_sources(editor.sources()));
    pipeline.cancel_compose();
    assert!(preview.is_refreshing());

    assert_eq!(pipeline.compose_due(compose), None);
    assert!(preview.complete_refresh(refresh));
    assert!(preview.document().contains("<body><p>b</p></body>"));
    assert_eq!(preview.revision(), 2);
}

#[test]
fn palette_activation_yields_the_device_action() {
    let registry = CommandRegistry::build(&CommandContext { dark_mode: false, fullscreen: false });
    let mut palette = PaletteState::new(registry.into_entries());
    palette.open();
    palette.set_search("Mobile");

    let action = palette.activate_selected();
    assert_eq!(action, Some(Message::SetDevice(DeviceKind::Mobile)));

    let mut preview = PreviewController::new(DeviceKind::Desktop);
    preview.publish("<p>x</p>".to_string());
    if let Some(Message::SetDevice(kind)) = action {
        preview.set_device(kind);
    }
    assert_eq!(preview.viewport().pixel_size(), Some((375, 812)));
    assert_eq!(preview.document(), "<p>x</p>");
}

#[cfg(feature = "zip")]
#[test]
fn archive_export_of_sample_project() {
    use ferris_fiddle::app::services::export::{ArchiveWriter, ZipArchiveWriter, export_archive};

    let writer: &dyn ArchiveWriter = &ZipArchiveWriter;
    let artifact = export_archive(&SourceSet::sample(), Some(writer)).unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(artifact.bytes)).unwrap();
    assert_eq!(archive.len(), 3);
}
