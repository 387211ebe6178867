use serde::Serialize;

/// An uploaded image. Bytes are never serialized; only name, size and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    name: String,
    mime_type: String,
    size: usize,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl Image {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len(),
            bytes,
        }
    }

    /// Builds an image whose content type is inferred from the file name.
    pub fn from_file_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type_for(&name).to_string();
        Self::new(name, mime_type, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Two uploads are the same image when name and byte size match.
    pub fn identity(&self) -> (&str, usize) {
        (&self.name, self.size)
    }
}

pub fn mime_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Images waiting to be submitted, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    images: Vec<Image>,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends images, skipping any whose identity is already selected.
    /// Returns how many were added.
    pub fn add(&mut self, images: impl IntoIterator<Item = Image>) -> usize {
        let mut added = 0;
        for image in images {
            if self.contains(&image) {
                log::debug!("Skipping duplicate image: {}", image.name());
                continue;
            }
            self.images.push(image);
            added += 1;
        }
        added
    }

    pub fn contains(&self, image: &Image) -> bool {
        self.images.iter().any(|i| i.identity() == image.identity())
    }

    pub fn remove(&mut self, index: usize) -> Option<Image> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
