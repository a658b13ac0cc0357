//! Progress and warning observers.
//!
//! Readers and writers keep a [`ReadListeners`] or [`WriteListeners`] and
//! call its `process_*` methods as work advances. Observers run
//! synchronously, in registration order, on the calling thread.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Ordered list of shared observers.
pub struct ListenerList<L: ?Sized> {
    items: Vec<Arc<L>>,
}

impl<L: ?Sized> Default for ListenerList<L> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<L: ?Sized> Clone for ListenerList<L> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<L: ?Sized> fmt::Debug for ListenerList<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.items.len())
            .finish()
    }
}

impl<L: ?Sized> ListenerList<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer. The same observer may be added more than once.
    pub fn add(&mut self, listener: Arc<L>) {
        self.items.push(listener);
    }

    /// Remove the first registration of `listener`, compared by identity.
    /// Returns whether one was found.
    pub fn remove(&mut self, listener: &Arc<L>) -> bool {
        let target = Arc::as_ptr(listener);
        match self
            .items
            .iter()
            .position(|l| core::ptr::addr_eq(Arc::as_ptr(l), target))
        {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.items.iter().map(|l| &**l)
    }
}

/// Read progress callbacks. All default to doing nothing.
#[allow(unused_variables)]
pub trait ReadProgressListener: Send + Sync {
    fn sequence_started(&self, min_index: u32) {}
    fn sequence_complete(&self) {}
    fn image_started(&self, image_index: u32) {}
    /// `percent` is in `[0, 100]`.
    fn image_progress(&self, percent: f32) {}
    fn image_complete(&self) {}
    fn thumbnail_started(&self, image_index: u32, thumbnail_index: u32) {}
    fn thumbnail_progress(&self, percent: f32) {}
    fn thumbnail_complete(&self) {}
    fn read_aborted(&self) {}
}

/// Write progress callbacks. All default to doing nothing.
#[allow(unused_variables)]
pub trait WriteProgressListener: Send + Sync {
    fn image_started(&self, image_index: u32) {}
    fn image_progress(&self, percent: f32) {}
    fn image_complete(&self) {}
    fn thumbnail_started(&self, image_index: u32, thumbnail_index: u32) {}
    fn thumbnail_progress(&self, percent: f32) {}
    fn thumbnail_complete(&self) {}
    fn write_aborted(&self) {}
}

/// Receives non-fatal problems found while reading or writing.
pub trait WarningListener: Send + Sync {
    fn warning(&self, image_index: Option<u32>, message: &str);
}

/// Observers a reader reports to.
#[derive(Clone, Debug, Default)]
pub struct ReadListeners {
    pub progress: ListenerList<dyn ReadProgressListener>,
    pub warnings: ListenerList<dyn WarningListener>,
}

impl ReadListeners {
    pub fn clear_all(&mut self) {
        self.progress.clear();
        self.warnings.clear();
    }

    pub fn process_sequence_started(&self, min_index: u32) {
        log::trace!("read sequence started at {min_index}");
        self.progress.iter().for_each(|l| l.sequence_started(min_index));
    }

    pub fn process_sequence_complete(&self) {
        self.progress.iter().for_each(|l| l.sequence_complete());
    }

    pub fn process_image_started(&self, image_index: u32) {
        log::trace!("read of image {image_index} started");
        self.progress.iter().for_each(|l| l.image_started(image_index));
    }

    pub fn process_image_progress(&self, percent: f32) {
        self.progress.iter().for_each(|l| l.image_progress(percent));
    }

    pub fn process_image_complete(&self) {
        self.progress.iter().for_each(|l| l.image_complete());
    }

    pub fn process_thumbnail_started(&self, image_index: u32, thumbnail_index: u32) {
        self.progress
            .iter()
            .for_each(|l| l.thumbnail_started(image_index, thumbnail_index));
    }

    pub fn process_thumbnail_progress(&self, percent: f32) {
        self.progress.iter().for_each(|l| l.thumbnail_progress(percent));
    }

    pub fn process_thumbnail_complete(&self) {
        self.progress.iter().for_each(|l| l.thumbnail_complete());
    }

    pub fn process_read_aborted(&self) {
        log::trace!("read aborted");
        self.progress.iter().for_each(|l| l.read_aborted());
    }

    pub fn process_warning(&self, image_index: Option<u32>, message: &str) {
        log::trace!("read warning: {message}");
        self.warnings.iter().for_each(|l| l.warning(image_index, message));
    }
}

/// Observers a writer reports to.
#[derive(Clone, Debug, Default)]
pub struct WriteListeners {
    pub progress: ListenerList<dyn WriteProgressListener>,
    pub warnings: ListenerList<dyn WarningListener>,
}

impl WriteListeners {
    pub fn clear_all(&mut self) {
        self.progress.clear();
        self.warnings.clear();
    }

    pub fn process_image_started(&self, image_index: u32) {
        log::trace!("write of image {image_index} started");
        self.progress.iter().for_each(|l| l.image_started(image_index));
    }

    pub fn process_image_progress(&self, percent: f32) {
        self.progress.iter().for_each(|l| l.image_progress(percent));
    }

    pub fn process_image_complete(&self) {
        self.progress.iter().for_each(|l| l.image_complete());
    }

    pub fn process_thumbnail_started(&self, image_index: u32, thumbnail_index: u32) {
        self.progress
            .iter()
            .for_each(|l| l.thumbnail_started(image_index, thumbnail_index));
    }

    pub fn process_thumbnail_progress(&self, percent: f32) {
        self.progress.iter().for_each(|l| l.thumbnail_progress(percent));
    }

    pub fn process_thumbnail_complete(&self) {
        self.progress.iter().for_each(|l| l.thumbnail_complete());
    }

    pub fn process_write_aborted(&self) {
        log::trace!("write aborted");
        self.progress.iter().for_each(|l| l.write_aborted());
    }

    pub fn process_warning(&self, image_index: Option<u32>, message: &str) {
        log::trace!("write warning: {message}");
        self.warnings.iter().for_each(|l| l.warning(image_index, message));
    }
}
