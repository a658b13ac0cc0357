//! Provider lookup.
//!
//! Discovering plug-ins is the host's business. This module only defines
//! what a provider looks like ([`ReaderProvider`], [`WriterProvider`]), the
//! filtered lookup a catalog must offer ([`ProviderCatalog`]), and the
//! name/suffix/MIME helpers built on top of it. [`ProviderList`] is a plain
//! in-memory catalog for hosts that register providers by hand.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::IioResult;
use crate::layout::PixelLayout;
use crate::traits::{ImageReader, ImageWriter};

/// Static description of a provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProviderInfo {
    vendor: &'static str,
    version: &'static str,
    format_names: &'static [&'static str],
    suffixes: &'static [&'static str],
    mime_types: &'static [&'static str],
}

impl ProviderInfo {
    pub const fn new(vendor: &'static str, version: &'static str) -> Self {
        Self {
            vendor,
            version,
            format_names: &[],
            suffixes: &[],
            mime_types: &[],
        }
    }

    pub const fn vendor(&self) -> &'static str {
        self.vendor
    }

    pub const fn version(&self) -> &'static str {
        self.version
    }

    pub const fn format_names(&self) -> &'static [&'static str] {
        self.format_names
    }

    pub const fn suffixes(&self) -> &'static [&'static str] {
        self.suffixes
    }

    pub const fn mime_types(&self) -> &'static [&'static str] {
        self.mime_types
    }

    pub const fn with_format_names(mut self, v: &'static [&'static str]) -> Self {
        self.format_names = v;
        self
    }

    pub const fn with_suffixes(mut self, v: &'static [&'static str]) -> Self {
        self.suffixes = v;
        self
    }

    pub const fn with_mime_types(mut self, v: &'static [&'static str]) -> Self {
        self.mime_types = v;
        self
    }

    pub fn handles_format_name(&self, name: &str) -> bool {
        contains_ignore_case(self.format_names, name)
    }

    pub fn handles_suffix(&self, suffix: &str) -> bool {
        contains_ignore_case(self.suffixes, suffix)
    }

    pub fn handles_mime_type(&self, mime: &str) -> bool {
        contains_ignore_case(self.mime_types, mime)
    }
}

fn contains_ignore_case(list: &[&str], needle: &str) -> bool {
    list.iter().any(|s| s.eq_ignore_ascii_case(needle))
}

/// Creates readers for one format.
pub trait ReaderProvider: Send + Sync {
    fn info(&self) -> &ProviderInfo;

    /// Whether the input starting with `header` looks decodable.
    fn can_decode_input(&self, header: &[u8]) -> IioResult<bool>;

    /// # Errors
    ///
    /// [`IioError::Io`](crate::IioError::Io) or any plug-in error if the
    /// reader cannot be created.
    fn create_reader(&self) -> IioResult<Box<dyn ImageReader>>;
}

/// Creates writers for one format.
pub trait WriterProvider: Send + Sync {
    fn info(&self) -> &ProviderInfo;

    fn can_encode_layout(&self, layout: &PixelLayout) -> bool;

    fn create_writer(&self) -> IioResult<Box<dyn ImageWriter>>;
}

/// Filtered access to registered providers, in registration order.
pub trait ProviderCatalog {
    fn find_readers(&self, filter: &dyn Fn(&dyn ReaderProvider) -> bool) -> Vec<&dyn ReaderProvider>;

    fn find_writers(&self, filter: &dyn Fn(&dyn WriterProvider) -> bool) -> Vec<&dyn WriterProvider>;
}

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

fn instantiate_readers(providers: Vec<&dyn ReaderProvider>) -> Vec<Box<dyn ImageReader>> {
    providers
        .into_iter()
        .filter_map(|p| match p.create_reader() {
            Ok(reader) => Some(reader),
            Err(e) => {
                log::warn!("skipping reader provider {}: {e}", p.info().vendor());
                None
            }
        })
        .collect()
}

fn instantiate_writers(providers: Vec<&dyn WriterProvider>) -> Vec<Box<dyn ImageWriter>> {
    providers
        .into_iter()
        .filter_map(|p| match p.create_writer() {
            Ok(writer) => Some(writer),
            Err(e) => {
                log::warn!("skipping writer provider {}: {e}", p.info().vendor());
                None
            }
        })
        .collect()
}

fn find_and_create_readers(
    catalog: &dyn ProviderCatalog,
    what: &str,
    filter: &dyn Fn(&dyn ReaderProvider) -> bool,
) -> Vec<Box<dyn ImageReader>> {
    let found = catalog.find_readers(filter);
    log::debug!("{} reader providers match {what}", found.len());
    instantiate_readers(found)
}

fn find_and_create_writers(
    catalog: &dyn ProviderCatalog,
    what: &str,
    filter: &dyn Fn(&dyn WriterProvider) -> bool,
) -> Vec<Box<dyn ImageWriter>> {
    let found = catalog.find_writers(filter);
    log::debug!("{} writer providers match {what}", found.len());
    instantiate_writers(found)
}

pub fn readers_by_format_name(catalog: &dyn ProviderCatalog, name: &str) -> Vec<Box<dyn ImageReader>> {
    find_and_create_readers(catalog, name, &|p| p.info().handles_format_name(name))
}

pub fn readers_by_suffix(catalog: &dyn ProviderCatalog, suffix: &str) -> Vec<Box<dyn ImageReader>> {
    find_and_create_readers(catalog, suffix, &|p| p.info().handles_suffix(suffix))
}

pub fn readers_by_mime_type(catalog: &dyn ProviderCatalog, mime: &str) -> Vec<Box<dyn ImageReader>> {
    find_and_create_readers(catalog, mime, &|p| p.info().handles_mime_type(mime))
}

/// Readers whose provider recognizes `header`. Providers that fail while
/// probing are treated as not matching.
pub fn readers_for_input(catalog: &dyn ProviderCatalog, header: &[u8]) -> Vec<Box<dyn ImageReader>> {
    find_and_create_readers(catalog, "input header", &|p| match p.can_decode_input(header) {
        Ok(accepted) => accepted,
        Err(e) => {
            log::warn!("reader provider {} failed to probe input: {e}", p.info().vendor());
            false
        }
    })
}

pub fn writers_by_format_name(catalog: &dyn ProviderCatalog, name: &str) -> Vec<Box<dyn ImageWriter>> {
    find_and_create_writers(catalog, name, &|p| p.info().handles_format_name(name))
}

pub fn writers_by_suffix(catalog: &dyn ProviderCatalog, suffix: &str) -> Vec<Box<dyn ImageWriter>> {
    find_and_create_writers(catalog, suffix, &|p| p.info().handles_suffix(suffix))
}

pub fn writers_by_mime_type(catalog: &dyn ProviderCatalog, mime: &str) -> Vec<Box<dyn ImageWriter>> {
    find_and_create_writers(catalog, mime, &|p| p.info().handles_mime_type(mime))
}

/// Writers able to encode images in `layout`.
pub fn writers_for_layout(catalog: &dyn ProviderCatalog, layout: &PixelLayout) -> Vec<Box<dyn ImageWriter>> {
    find_and_create_writers(catalog, "layout", &|p| p.can_encode_layout(layout))
}

fn unique_names<'a>(infos: impl Iterator<Item = &'a ProviderInfo>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for name in infos.flat_map(|i| i.format_names().iter().copied()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Every format name some reader provider handles, first occurrence first.
pub fn reader_format_names(catalog: &dyn ProviderCatalog) -> Vec<&'static str> {
    unique_names(catalog.find_readers(&|_| true).into_iter().map(|p| p.info()))
}

/// Every format name some writer provider handles, first occurrence first.
pub fn writer_format_names(catalog: &dyn ProviderCatalog) -> Vec<&'static str> {
    unique_names(catalog.find_writers(&|_| true).into_iter().map(|p| p.info()))
}

// ---------------------------------------------------------------------------
// ProviderList
// ---------------------------------------------------------------------------

/// In-memory catalog; providers are searched in registration order.
#[derive(Default)]
pub struct ProviderList {
    readers: Vec<Box<dyn ReaderProvider>>,
    writers: Vec<Box<dyn WriterProvider>>,
}

impl ProviderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_reader(&mut self, provider: impl ReaderProvider + 'static) {
        self.readers.push(Box::new(provider));
    }

    pub fn register_writer(&mut self, provider: impl WriterProvider + 'static) {
        self.writers.push(Box::new(provider));
    }

    pub fn num_readers(&self) -> usize {
        self.readers.len()
    }

    pub fn num_writers(&self) -> usize {
        self.writers.len()
    }
}

impl ProviderCatalog for ProviderList {
    fn find_readers(&self, filter: &dyn Fn(&dyn ReaderProvider) -> bool) -> Vec<&dyn ReaderProvider> {
        self.readers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| filter(*p))
            .collect()
    }

    fn find_writers(&self, filter: &dyn Fn(&dyn WriterProvider) -> bool) -> Vec<&dyn WriterProvider> {
        self.writers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| filter(*p))
            .collect()
    }
}

impl fmt::Debug for ProviderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderList")
            .field("readers", &self.readers.iter().map(|p| p.info()).collect::<Vec<_>>())
            .field("writers", &self.writers.iter().map(|p| p.info()).collect::<Vec<_>>())
            .finish()
    }
}
