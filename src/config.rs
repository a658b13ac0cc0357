//! Stream cache policy.
//!
//! Stream wrappers over non-seekable inputs may buffer in memory or in a
//! temporary file. The choice is an explicit value handed to whatever builds
//! the stream; nothing here is global.

use alloc::string::String;

use crate::error::{IioError, IioResult};

/// Whether file-backed caching is allowed, and where.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamCacheConfig {
    use_cache: bool,
    cache_directory: Option<String>,
}

/// Where a stream should buffer data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CachePlan {
    Memory,
    /// Temporary file in `directory`, or the system default when `None`.
    File { directory: Option<String> },
}

impl StreamCacheConfig {
    /// Memory-only caching.
    pub const fn new() -> Self {
        Self {
            use_cache: false,
            cache_directory: None,
        }
    }

    pub const fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn cache_directory(&self) -> Option<&str> {
        self.cache_directory.as_deref()
    }

    pub const fn with_use_cache(mut self, v: bool) -> Self {
        self.use_cache = v;
        self
    }

    pub fn with_cache_directory(mut self, dir: impl Into<String>) -> Self {
        self.cache_directory = Some(dir.into());
        self
    }

    /// Decide how a stream provider should buffer.
    ///
    /// `can_use_cache_file` and `needs_cache_file` describe the provider.
    ///
    /// # Errors
    ///
    /// [`IioError::UnsupportedOperation`] if the provider needs a cache file
    /// but caching is off.
    pub fn resolve(&self, can_use_cache_file: bool, needs_cache_file: bool) -> IioResult<CachePlan> {
        if needs_cache_file && !self.use_cache {
            return Err(IioError::unsupported(
                "stream provider needs a cache file but caching is disabled",
            ));
        }
        if self.use_cache && (can_use_cache_file || needs_cache_file) {
            Ok(CachePlan::File {
                directory: self.cache_directory.clone(),
            })
        } else {
            Ok(CachePlan::Memory)
        }
    }
}
