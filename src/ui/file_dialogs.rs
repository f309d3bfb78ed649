use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

/// Filter for the native chooser, derived from the suggested file name.
pub fn filter_for(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("*.{}", ext),
        _ => "*".to_string(),
    }
}

/// Ask where to save, pre-filled with `file_name`. `None` if cancelled.
pub fn native_save_dialog(file_name: &str, directory: Option<&str>) -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    nfc.set_filter(&filter_for(file_name));
    nfc.set_preset_file(file_name);
    if let Some(dir) = directory
        && let Err(e) = nfc.set_directory(&dir)
    {
        tracing::debug!("Could not preset save directory {}: {}", dir, e);
    }
    nfc.show();
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
