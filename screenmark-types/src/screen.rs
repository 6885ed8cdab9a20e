use std::path::PathBuf;

use image::{DynamicImage, GenericImageView};

/// A screenshot loaded for parsing.
#[derive(Debug, Clone)]
pub struct Screen {
    /// Content hash of the source bytes.
    pub id: String,
    pub path: PathBuf,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub image: DynamicImage,
}

impl Screen {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let bytes = std::fs::read(&path)?;
        Self::from_bytes(path, &bytes)
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> anyhow::Result<Self> {
        let path = path.into();
        let image = image::load_from_memory(bytes)?;
        let (width, height) = image.dimensions();
        let id = blake3::hash(bytes).to_hex().to_string();
        let name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            id,
            path,
            name,
            width,
            height,
            image,
        })
    }

    /// Wraps an in-memory image that has no backing file.
    pub fn from_image(name: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let id = blake3::hash(image.as_bytes()).to_hex().to_string();
        Self {
            id,
            path: PathBuf::new(),
            name: name.into(),
            width,
            height,
            image,
        }
    }
}
