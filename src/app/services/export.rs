//! Export the three panes as a standalone page or a zip archive.

use thiserror::Error;

use crate::app::domain::source::{Pane, SourceSet};

pub const HTML_MIME: &str = "text/html";
pub const ZIP_MIME: &str = "application/zip";
pub const ARCHIVE_FILE_NAME: &str = "project.zip";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("archive support is not available in this build")]
    ArchiverUnavailable,

    #[cfg(feature = "zip")]
    #[error("zip error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Text for the alert shown to the user. The cause goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::ArchiverUnavailable => {
                "Archive support is not available in this build of FerrisFiddle."
            }
            _ => "Failed to generate ZIP file. See the log for details.",
        }
    }
}

/// A finished export, ready to be written wherever the user picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ArchiveEntry<'a> {
    pub name: &'a str,
    pub contents: &'a str,
}

/// Something that can pack named text files into one archive.
pub trait ArchiveWriter {
    fn write_archive(&self, entries: &[ArchiveEntry<'_>]) -> Result<Vec<u8>, ExportError>;
}

#[cfg(feature = "zip")]
pub struct ZipArchiveWriter;

#[cfg(feature = "zip")]
impl ArchiveWriter for ZipArchiveWriter {
    fn write_archive(&self, entries: &[ArchiveEntry<'_>]) -> Result<Vec<u8>, ExportError> {
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for entry in entries {
            let options = SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated);
            writer.start_file(entry.name, options)?;
            writer.write_all(entry.contents.as_bytes())?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

/// The archive backend compiled into this build, if any.
pub fn default_archive_writer() -> Option<Box<dyn ArchiveWriter>> {
    #[cfg(feature = "zip")]
    {
        Some(Box::new(ZipArchiveWriter))
    }
    #[cfg(not(feature = "zip"))]
    {
        None
    }
}

/// One self-contained page: the markup, then the inlined styles, then the script.
pub fn single_file_html(sources: &SourceSet) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Exported Project</title>
</head>
<body>
  {html}
  <style>
    {css}
  </style>
  <script>
    {js}
  </script>
</body>
</html>
"#,
        css = sources.css,
        html = sources.html,
        js = sources.js,
    )
}

/// The archive's `index.html`, linking the stylesheet and script by relative path.
pub fn archive_index_html(html: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Exported Project</title>
    <link rel="stylesheet" href="{style}">
</head>
<body>
    {html}
    <script src="{script}"></script>
</body>
</html>
"#,
        style = Pane::Css.file_name(),
        script = Pane::Js.file_name(),
    )
}

pub fn export_html(sources: &SourceSet) -> Artifact {
    Artifact {
        file_name: Pane::Html.file_name(),
        mime: HTML_MIME,
        bytes: single_file_html(sources).into_bytes(),
    }
}

/// Pack `index.html`, `style.css` and `script.js` into `project.zip`.
///
/// Fails with [`ExportError::ArchiverUnavailable`] when no backend is present;
/// nothing is produced in either failure case.
pub fn export_archive(
    sources: &SourceSet,
    writer: Option<&dyn ArchiveWriter>,
) -> Result<Artifact, ExportError> {
    let writer = writer.ok_or(ExportError::ArchiverUnavailable)?;

    let index = archive_index_html(&sources.html);
    let entries = [
        ArchiveEntry { name: Pane::Html.file_name(), contents: &index },
        ArchiveEntry { name: Pane::Css.file_name(), contents: &sources.css },
        ArchiveEntry { name: Pane::Js.file_name(), contents: &sources.js },
    ];
    let bytes = writer.write_archive(&entries)?;

    Ok(Artifact {
        file_name: ARCHIVE_FILE_NAME,
        mime: ZIP_MIME,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> SourceSet {
        SourceSet::new("<p>hi</p>", "p{color:red}", "console.log(1)")
    }

    struct FailingWriter;

    impl ArchiveWriter for FailingWriter {
        fn write_archive(&self, _entries: &[ArchiveEntry<'_>]) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_single_file_keeps_document_order() {
        let page = single_file_html(&sources());
        let html = page.find("<p>hi</p>").unwrap();
        let style_open = page.find("<style>").unwrap();
        let css = page.find("p{color:red}").unwrap();
        let style_close = page.find("</style>").unwrap();
        let script_open = page.find("<script>").unwrap();
        let js = page.find("console.log(1)").unwrap();
        let script_close = page.find("</script>").unwrap();

        assert!(html < style_open);
        assert!(style_open < css && css < style_close);
        assert!(style_close < script_open);
        assert!(script_open < js && js < script_close);
    }

    #[test]
    fn test_export_html_artifact() {
        let artifact = export_html(&sources());
        assert_eq!(artifact.file_name, "index.html");
        assert_eq!(artifact.mime, "text/html");
        assert!(String::from_utf8(artifact.bytes).unwrap().contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_archive_index_references_assets() {
        let index = archive_index_html("<p>hi</p>");
        assert!(index.contains(r#"href="style.css""#));
        assert!(index.contains(r#"src="script.js""#));
        assert!(index.contains("<p>hi</p>"));
    }

    #[test]
    fn test_missing_archiver_aborts() {
        let err = export_archive(&sources(), None).unwrap_err();
        assert!(matches!(err, ExportError::ArchiverUnavailable));
        assert!(err.user_message().contains("not available"));
    }

    #[test]
    fn test_archiver_failure_is_distinct() {
        let writer: &dyn ArchiveWriter = &FailingWriter;
        let err = export_archive(&sources(), Some(writer)).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(err.user_message().starts_with("Failed to generate ZIP file"));
        assert!(err.to_string().contains("disk full"));
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_zip_has_exactly_three_entries() {
        use std::io::{Cursor, Read};

        let writer: &dyn ArchiveWriter = &ZipArchiveWriter;
        let artifact = export_archive(&sources(), Some(writer)).unwrap();
        assert_eq!(artifact.file_name, "project.zip");
        assert_eq!(artifact.mime, "application/zip");

        let mut archive = zip::ZipArchive::new(Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["index.html", "script.js", "style.css"]);

        let mut index = String::new();
        archive.by_name("index.html").unwrap().read_to_string(&mut index).unwrap();
        assert!(index.contains("style.css"));
        assert!(index.contains("script.js"));

        let mut css = String::new();
        archive.by_name("style.css").unwrap().read_to_string(&mut css).unwrap();
        assert_eq!(css, "p{color:red}");
    }
}
