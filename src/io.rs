use image::RgbImage;
use rfd::FileDialog;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for map load / export write operations. Either failure is
/// surfaced to the user as a single message; nothing is partially written.
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    Decode(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "I/O error: {}", e),
            MapError::Decode(e) => write!(f, "Image decode error: {}", e),
        }
    }
}

impl std::error::Error for MapError {}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<image::ImageError> for MapError {
    fn from(e: image::ImageError) -> Self {
        MapError::Decode(e.to_string())
    }
}

/// Decode a province map image to an RGB pixel grid. Province identity is
/// RGB-only, so any alpha channel is dropped here.
pub fn load_map(path: &Path) -> Result<RgbImage, MapError> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}

/// Write the concatenated state records to a text file.
pub fn write_export(path: &Path, text: &str) -> Result<(), MapError> {
    fs::write(path, text)?;
    Ok(())
}

pub fn pick_map_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PNG image", &["png"])
        .pick_file()
}

pub fn pick_export_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Text file", &["txt"])
        .set_file_name("states.txt")
        .save_file()
}
