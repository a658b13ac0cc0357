//! Shared types for pluggable image reader and writer back ends.
//!
//! This crate is the format-independent core that every reader or writer
//! plug-in builds on:
//!
//! - [`PixelLayout`] / [`StandardLayout`]: how pixels map to samples, plus the 13 common layouts
//! - [`Raster`] / [`SampleModel`] / [`DataBuffer`]: sample storage with bounds-checked access
//! - [`ImageBuffer`] / [`PixelSource`] / [`ImageFrame`]: what gets read and written
//! - [`IioParam`] / [`ImageReadParam`] / [`ImageWriteParam`]: region, subsampling, band, tiling and compression requests
//! - [`compute_regions`]: reconciling a request against the source and destination
//! - [`ImageReader`] / [`ImageWriter`]: the per-format plug-in contracts
//! - [`ProviderCatalog`]: lookup by format name, suffix, MIME type or content
//! - [`ReadListeners`] / [`WriteListeners`]: progress and warning observers
//!
//! Format codecs, metadata trees and stream plumbing live in the plug-ins, not here.
//! Long-running calls take a [`Stop`] token for cooperative cancellation.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bands;
mod capabilities;
mod color_space;
mod config;
mod data_type;
mod error;
mod geometry;
mod image;
mod layout;
mod listeners;
mod mode;
mod palette;
mod param;
mod raster;
mod read_param;
mod region;
mod registry;
mod standard;
mod traits;
mod write_param;

pub use bands::{check_band_settings, validate_band_subset};
pub use capabilities::{CodecCapabilities, CompressionScheme, TileSizeRange};
pub use color_space::{AlphaMode, ColorFamily, ColorSpace};
pub use config::{CachePlan, StreamCacheConfig};
pub use data_type::DataType;
pub use error::{IioError, IioResult};
pub use geometry::{Dimension, Point, Rect};
pub use image::{ImageBuffer, ImageFrame, PixelSource};
pub use layout::{Banded, Grayscale, Indexed, Interleaved, Packed, PixelLayout};
pub use listeners::{
    ListenerList, ReadListeners, ReadProgressListener, WarningListener, WriteListeners,
    WriteProgressListener,
};
pub use mode::{ParamMode, assert_mode, require_capability};
pub use palette::Palette;
pub use param::IioParam;
pub use raster::{DataBuffer, MAX_ELEMENTS, Raster, SampleModel, SampleStorage};
pub use read_param::ImageReadParam;
pub use region::{Regions, Subsampling, compute_regions, source_region};
pub use registry::{
    ProviderCatalog, ProviderInfo, ProviderList, ReaderProvider, WriterProvider,
    reader_format_names, readers_by_format_name, readers_by_mime_type, readers_by_suffix,
    readers_for_input, writer_format_names, writers_by_format_name, writers_by_mime_type,
    writers_by_suffix, writers_for_layout,
};
pub use standard::StandardLayout;
pub use traits::{
    ImageReader, ImageWriter, check_read_param_band_settings, compute_regions_for, destination,
    source_region_for,
};
pub use write_param::{ImageWriteParam, TileGrid};

// Re-exports for plug-in implementors and users.
pub use enough::{Stop, StopReason, Unstoppable};
pub use rgb;
