//! Image loading and caching.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use super::ImageSupplier;

/// Default number of cached images.
pub const DEFAULT_CACHE_SIZE: usize = 50;

/// What a cached image was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    File(PathBuf),
    Icon { name: String, size: u32 },
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, DynamicImage>,
    order: VecDeque<CacheKey>,
}

/// Bounded cache for loaded images; the oldest entry is dropped first.
#[derive(Debug, Default, Clone)]
pub struct ImageCache {
    inner: Arc<Mutex<CacheInner>>,
    max_size: usize,
}

impl ImageCache {
    /// Create a new image cache with the given maximum number of entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
            max_size,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<DynamicImage> {
        let guard = self.inner.lock().ok()?;
        guard.entries.get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, image: DynamicImage) {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if guard.entries.contains_key(&key) {
            guard.entries.insert(key, image);
            return;
        }

        guard.order.push_back(key.clone());
        guard.entries.insert(key, image);

        while guard.entries.len() > self.max_size {
            let Some(oldest) = guard.order.pop_front() else {
                break;
            };
            guard.entries.remove(&oldest);
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        let guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entries.contains_key(key)
    }

    pub fn clear(&self) {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entries.clear();
        guard.order.clear();
    }

    pub fn len(&self) -> usize {
        let guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads image files from disk and icons from a list of icon directories.
///
/// An icon `NAME` is the file `NAME.png` in the first icon directory that
/// has it, scaled to the requested square size.
#[derive(Debug, Clone)]
pub struct FsImageSupplier {
    cache: ImageCache,
    icon_dirs: Vec<PathBuf>,
}

impl Default for FsImageSupplier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FsImageSupplier {
    pub fn new(icon_dirs: Vec<PathBuf>) -> Self {
        Self {
            cache: ImageCache::new(DEFAULT_CACHE_SIZE),
            icon_dirs,
        }
    }

    pub fn icon_dirs(&self) -> &[PathBuf] {
        &self.icon_dirs
    }

    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    fn icon_path(&self, name: &str) -> Option<PathBuf> {
        // Icon names are plain identifiers, never paths
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return None;
        }
        self.icon_dirs
            .iter()
            .map(|dir| dir.join(format!("{name}.png")))
            .find(|path| path.is_file())
    }
}

impl ImageSupplier for FsImageSupplier {
    fn load_image(&self, path: &Path) -> Option<DynamicImage> {
        let key = CacheKey::File(path.to_path_buf());
        if let Some(img) = self.cache.get(&key) {
            return Some(img);
        }

        let img = match image::open(path) {
            Ok(img) => img,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "image open failed");
                return None;
            }
        };
        self.cache.insert(key, img.clone());
        Some(img)
    }

    fn load_icon(&self, name: &str, size: u32) -> Option<DynamicImage> {
        let key = CacheKey::Icon {
            name: name.to_string(),
            size,
        };
        if let Some(img) = self.cache.get(&key) {
            return Some(img);
        }

        let path = self.icon_path(name)?;
        let img = image::open(&path)
            .map_err(|err| debug!(path = %path.display(), error = %err, "icon open failed"))
            .ok()?
            .resize(size, size, FilterType::Triangle);
        self.cache.insert(key, img.clone());
        Some(img)
    }
}
