//! Turns the relative image ids found in catalog records into absolute URLs.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Host and path prefix of the catalog's image CDN.
pub const IMAGE_HOST: &str = "https://image.tmdb.org/t/p";

/// Rendition requested from the image CDN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// The full resolution upload
    #[default]
    Original,
    /// 500 pixels wide
    W500,
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSize::Original => write!(f, "original"),
            ImageSize::W500 => write!(f, "w500"),
        }
    }
}

/// Builds the absolute URL of an image.
///
/// An empty `path` means the record has no image and yields an empty string,
/// which the UI renders as a placeholder. The path is not validated.
pub fn make_image_path(path: &str, size: ImageSize) -> String {
    if path.is_empty() {
        return String::new();
    }
    format!("{}/{}/{}", IMAGE_HOST, size, path.trim_start_matches('/'))
}

/// Same as [`make_image_path`] for optional paths, as found in [`CatalogItem`](super::CatalogItem).
pub fn make_optional_image_path(path: Option<&str>, size: ImageSize) -> String {
    make_image_path(path.unwrap_or_default(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_has_no_url() {
        assert_eq!(make_image_path("", ImageSize::W500), "");
        assert_eq!(make_image_path("", ImageSize::Original), "");
        assert_eq!(make_optional_image_path(None, ImageSize::W500), "");
    }

    #[test]
    fn test_path_is_placed_after_size() {
        let url = make_image_path("/abc.jpg", ImageSize::W500);
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc.jpg");
        assert_eq!(&url[IMAGE_HOST.len() + 1..IMAGE_HOST.len() + 5], "w500");
        assert!(url.ends_with("/abc.jpg"));
    }

    #[test]
    fn test_default_size_is_original() {
        assert_eq!(
            make_image_path("/x.png", ImageSize::default()),
            "https://image.tmdb.org/t/p/original/x.png"
        );
    }
}
