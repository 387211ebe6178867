use std::io;
use std::path::Path;

use shared::{Image, ImageSelection};

pub async fn load_image(path: &Path) -> io::Result<Image> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Image::from_file_name(name, bytes))
}

/// Reads every path into a selection. Duplicates (same file name and size)
/// and empty files are skipped with a warning.
pub async fn load_selection<P: AsRef<Path>>(paths: &[P]) -> io::Result<ImageSelection> {
    let mut selection = ImageSelection::new();
    for path in paths {
        let path = path.as_ref();
        let image = load_image(path).await?;
        if image.is_empty() {
            log::warn!("Skipping empty file: {}", path.display());
            continue;
        }
        if selection.add([image]) == 0 {
            log::warn!("Skipping duplicate image: {}", path.display());
        }
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn duplicates_and_empty_files_are_skipped() {
        let dir = std::env::temp_dir().join(format!("paddy-files-{}", std::process::id()));
        let nested = dir.join("copy");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.join("leaf.jpg"), b"\x01\x02\x03").unwrap();
        std::fs::write(nested.join("leaf.jpg"), b"\x04\x05\x06").unwrap();
        std::fs::write(dir.join("stem.png"), b"\x01").unwrap();
        std::fs::write(dir.join("empty.jpg"), b"").unwrap();

        let selection = load_selection(&[
            dir.join("leaf.jpg"),
            nested.join("leaf.jpg"),
            dir.join("empty.jpg"),
            dir.join("stem.png"),
        ])
        .await
        .unwrap();

        let names: Vec<_> = selection.images().iter().map(Image::name).collect();
        assert_eq!(names, ["leaf.jpg", "stem.png"]);
        assert_eq!(selection.images()[1].mime_type(), "image/png");
    }

    #[actix_web::test]
    async fn missing_file_is_an_error() {
        let outcome = load_selection(&["/definitely/not/here.jpg"]).await;
        assert!(outcome.is_err());
    }
}
