//! Image loading for rendered image references.
//!
//! Rendering only resolves where an image comes from; loading is done
//! through an [`ImageSupplier`] so displays can plug in their own source of
//! pixels (icon themes, embedded resources).

mod loader;

pub use loader::{CacheKey, DEFAULT_CACHE_SIZE, FsImageSupplier, ImageCache};

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::document::{DEFAULT_ICON_SIZE, ImageRef, ImageSource};

/// Icon shown in place of an image file that failed to load.
pub const MISSING_IMAGE_ICON: &str = "image-missing";

/// Source of pixels for image files and named icons.
pub trait ImageSupplier {
    /// Load an image file.
    fn load_image(&self, path: &Path) -> Option<DynamicImage>;

    /// Load a named icon at a square pixel size.
    fn load_icon(&self, name: &str, size: u32) -> Option<DynamicImage>;
}

/// A resolved image ready for display.
#[derive(Debug, Clone)]
pub enum Picture {
    Loaded(DynamicImage),
    /// Nothing could be loaded; show a textual placeholder
    Placeholder,
}

impl Picture {
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub const fn image(&self) -> Option<&DynamicImage> {
        match self {
            Self::Loaded(img) => Some(img),
            Self::Placeholder => None,
        }
    }
}

/// Load the picture for a rendered image reference.
///
/// A file that fails to load is replaced by the [`MISSING_IMAGE_ICON`] at
/// the default icon size. Anything still unresolved becomes a placeholder.
pub fn resolve<S: ImageSupplier + ?Sized>(supplier: &S, image: &ImageRef) -> Picture {
    match &image.source {
        ImageSource::Icon { name, size } => {
            if let Some(img) = supplier.load_icon(name, *size) {
                return Picture::Loaded(img);
            }
            debug!(name = %name, size, "icon not found");
            Picture::Placeholder
        }
        ImageSource::File(path) => {
            if let Some(img) = supplier.load_image(path) {
                return Picture::Loaded(img);
            }
            warn!(path = %path.display(), "failed to load image file");
            missing(supplier)
        }
        ImageSource::Missing => {
            warn!(spec = %image.spec, "image spec has no file name");
            missing(supplier)
        }
    }
}

fn missing<S: ImageSupplier + ?Sized>(supplier: &S) -> Picture {
    supplier
        .load_icon(MISSING_IMAGE_ICON, DEFAULT_ICON_SIZE)
        .map_or(Picture::Placeholder, Picture::Loaded)
}
