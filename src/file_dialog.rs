//! Native open/save pickers for image files.

use std::path::{Path, PathBuf};

/// Extensions offered in the pickers
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

const DEFAULT_FILE_NAME: &str = "untitled.png";

/// Ask the user for an image to open
pub fn pick_open_path(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open image")
        .add_filter("Image", IMAGE_EXTENSIONS);
    if let Some(dir) = parent_dir(current) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Ask the user where to save the image
pub fn pick_save_path(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save image as")
        .set_file_name(suggested_file_name(current))
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .add_filter("Bitmap", &["bmp"])
        .add_filter("Image", IMAGE_EXTENSIONS);
    if let Some(dir) = parent_dir(current) {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file().map(with_default_extension)
}

fn parent_dir(current: Option<&Path>) -> Option<&Path> {
    current
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// File name pre-filled in the save picker
pub fn suggested_file_name(current: Option<&Path>) -> String {
    current
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned())
}

/// Some platforms return the typed name without an extension; save those as PNG
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_name_follows_current_file() {
        assert_eq!(suggested_file_name(None), "untitled.png");
        assert_eq!(
            suggested_file_name(Some(Path::new("/tmp/pictures/cat.bmp"))),
            "cat.bmp"
        );
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/drawing")),
            PathBuf::from("/tmp/drawing.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/drawing.jpg")),
            PathBuf::from("/tmp/drawing.jpg")
        );
    }

    #[test]
    fn test_offered_extensions_are_readable() {
        for ext in IMAGE_EXTENSIONS {
            let format = image::ImageFormat::from_extension(ext).unwrap();
            assert!(format.reading_enabled(), "{ext}");
        }
    }
}
