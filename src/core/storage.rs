//! Blob storage locators.
//!
//! Only paths are computed here. Uploading and downloading bytes is the
//! caller's job.

use std::fmt;

/// Folder holding product images.
pub const PRODUCT_IMAGES: &str = "products";
/// Folder holding profile pictures.
pub const PROFILE_IMAGES: &str = "profile_images";
/// Extension used for every stored image.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Location of one object in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageRef {
    bucket: String,
    path: String,
}

impl StorageRef {
    /// Reference to the root of `bucket`.
    pub fn root(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: String::new(),
        }
    }

    /// Reference to a child path, joined with `/`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let segment = segment.trim_matches('/');
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{segment}", self.path)
        };
        Self {
            bucket: self.bucket.clone(),
            path,
        }
    }

    /// Bucket the object lives in.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object path inside the bucket.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// `gs://bucket/path` form.
    #[must_use]
    pub fn url(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.path)
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// `products/{product_id}.jpg`
#[must_use]
pub fn product_image_ref(bucket: &str, product_id: &str) -> StorageRef {
    StorageRef::root(bucket)
        .child(PRODUCT_IMAGES)
        .child(&format!("{product_id}{IMAGE_EXTENSION}"))
}

/// `profile_images/{user_id}.jpg`
#[must_use]
pub fn user_profile_image_ref(bucket: &str, user_id: &str) -> StorageRef {
    StorageRef::root(bucket)
        .child(PROFILE_IMAGES)
        .child(&format!("{user_id}{IMAGE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_image_path() {
        let r = product_image_ref("shop", "p42");
        assert_eq!(r.path(), "products/p42.jpg");
        assert_eq!(r.name(), "p42.jpg");
        assert_eq!(r.url(), "gs://shop/products/p42.jpg");
    }

    #[test]
    fn test_profile_image_path() {
        let r = user_profile_image_ref("shop", "u7");
        assert_eq!(r.path(), "profile_images/u7.jpg");
        assert_eq!(r.bucket(), "shop");
        assert_eq!(r.to_string(), "gs://shop/profile_images/u7.jpg");
    }

    #[test]
    fn test_child_trims_slashes() {
        let r = StorageRef::root("b").child("/a/").child("c");
        assert_eq!(r.path(), "a/c");
    }
}
