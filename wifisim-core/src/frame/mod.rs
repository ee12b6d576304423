mod header;
mod id;

pub use self::{
    header::{AddressType, FrameKind, MacHeader, Tid, TidError},
    id::{FrameId, FrameIdGenerator},
};
use crate::data::Data;
use anyhow::{Result, bail};
use std::fmt;

/// # A frame submitted for transmission
///
/// The payload itself plus the identifier that follows it through the
/// queue, the channel and the receiving interface. Once enqueued a frame
/// is shared read-only (`Arc<Frame<T>>`): the channel hands one shared
/// reference to every receiver instead of copying the payload.
pub struct Frame<T> {
    id: FrameId,
    bytes_size: u64,
    data: T,
}

pub struct FrameBuilder<'a, T> {
    generator: &'a FrameIdGenerator,
    data: Option<T>,
}

impl<'a, T> FrameBuilder<'a, T>
where
    T: Data,
{
    pub fn new(generator: &'a FrameIdGenerator) -> Self {
        Self {
            generator,
            data: None,
        }
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn build(self) -> Result<Frame<T>> {
        let Some(data) = self.data else {
            bail!("Missing frame content (`data')")
        };
        let id = self.generator.generate();
        let bytes_size = data.bytes_size();

        Ok(Frame {
            id,
            bytes_size,
            data,
        })
    }
}

impl<T> Frame<T>
where
    T: Data,
{
    pub fn builder(generator: &FrameIdGenerator) -> FrameBuilder<'_, T> {
        FrameBuilder::new(generator)
    }
}

impl<T> Frame<T> {
    #[inline]
    pub fn id(&self) -> FrameId {
        self.id
    }

    #[inline]
    pub fn bytes_size(&self) -> u64 {
        self.bytes_size
    }

    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// consume the frame and get the inner `T`.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> fmt::Debug for Frame<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Frame<{}>", std::any::type_name::<T>()))
            .field("id", &self.id)
            .field("bytes_size", &self.bytes_size)
            .finish_non_exhaustive()
    }
}
