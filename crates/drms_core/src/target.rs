/// Ownership and lifecycle of the single off-screen colour target.
///
/// The GPU side is reached through [`TargetBackend`] so the allocation
/// rules (destroy before create, sample count follows the mode, layout
/// queried on every multisample allocation) can be exercised without a
/// device.  `drms_renderer` provides the wgpu implementation.
use std::fmt;

use thiserror::Error;

use crate::extent::{Extent, RenderTargetExtent};
use crate::sample_layout::{SampleLayout, SampleTable};

/// Colour format of the off-screen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    /// 8-bit unsigned normalised RGBA.
    #[default]
    Rgba8,
}

/// Shape of a render target allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDesc {
    pub extent: RenderTargetExtent,
    /// 1 (plain 2D texture) or 4 (2D multisample texture).
    pub sample_count: u32,
    pub format: TargetFormat,
}

impl TargetDesc {
    #[inline]
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}

impl fmt::Display for TargetDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} x{}", self.extent, self.format, self.sample_count)
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("render target {extent} exceeds the device limit of {max} texels per side")]
    TooLarge { extent: Extent, max: u32 },
    #[error("unsupported sample count {0} (expected 1 or 4)")]
    UnsupportedSampleCount(u32),
    #[error("failed to allocate render target {desc}: {reason}")]
    Allocation { desc: TargetDesc, reason: String },
    #[error("could not determine the {sample_count}x sample layout: {reason}")]
    SampleLayout { sample_count: u32, reason: String },
}

/// GPU operations the manager needs.
pub trait TargetBackend {
    /// Backend handle for one allocated target.
    type Target;

    /// Allocates a fresh target.  Single-sample targets must be read with
    /// nearest filtering and clamp-to-edge addressing.
    fn create_target(&mut self, desc: &TargetDesc) -> Result<Self::Target, TargetError>;

    /// Releases every GPU resource held by `target`.
    fn destroy_target(&mut self, target: Self::Target);

    /// Sub-texel sample offsets used by targets with `sample_count` samples.
    fn query_sample_layout(&mut self, sample_count: u32) -> Result<SampleLayout, TargetError>;
}

struct Allocated<T> {
    desc: TargetDesc,
    target: T,
}

/// Owns at most one render target and recreates it on demand.
pub struct RenderTargetManager<B: TargetBackend> {
    backend: B,
    current: Option<Allocated<B::Target>>,
    layout: Option<SampleLayout>,
    table: SampleTable,
    /// Bumped on every successful allocation; consumers holding views into
    /// the target compare it to know when to rebuild.
    generation: u64,
}

impl<B: TargetBackend> RenderTargetManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            layout: None,
            table: SampleTable::EXPECTED,
            generation: 0,
        }
    }

    /// Replaces the current target with a new one of the given shape.
    ///
    /// The previous target is released before the new one is requested, so
    /// at no point do two targets exist.
    pub fn reconfigure(
        &mut self,
        extent: RenderTargetExtent,
        sample_count: u32,
    ) -> Result<(), TargetError> {
        self.destroy();

        if sample_count != 1 && sample_count != 4 {
            return Err(TargetError::UnsupportedSampleCount(sample_count));
        }

        let desc = TargetDesc {
            extent,
            sample_count,
            format: TargetFormat::Rgba8,
        };
        log::info!("Framebuffer size: {}", desc.extent);

        let target = self.backend.create_target(&desc)?;
        self.current = Some(Allocated { desc, target });
        self.generation += 1;

        if desc.is_multisampled() {
            let layout = self.backend.query_sample_layout(sample_count)?;
            self.adopt_layout(layout);
        }
        Ok(())
    }

    /// Releases the current target, if any.  Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if let Some(Allocated { desc, target }) = self.current.take() {
            log::debug!("releasing render target {desc}");
            self.backend.destroy_target(target);
        }
        self.layout = None;
    }

    fn adopt_layout(&mut self, layout: SampleLayout) {
        log::info!("Sample positions: {layout}");

        let table = SampleTable::from_layout(&layout);
        if !layout.is_clean_quadrant_split() {
            log::warn!(
                "sample layout does not split the texel into quadrants; \
                 using nearest match {table}"
            );
        }
        if table != SampleTable::EXPECTED {
            log::warn!(
                "discovered sample table {table} differs from the reference {}; \
                 DRMS resolve follows the discovered one",
                SampleTable::EXPECTED
            );
        } else {
            log::debug!("sample table {table}");
        }

        self.layout = Some(layout);
        self.table = table;
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn target(&self) -> Option<&B::Target> {
        self.current.as_ref().map(|a| &a.target)
    }

    #[inline]
    pub fn desc(&self) -> Option<TargetDesc> {
        self.current.as_ref().map(|a| a.desc)
    }

    /// Layout of the current target; `None` for single-sample targets.
    #[inline]
    pub fn sample_layout(&self) -> Option<&SampleLayout> {
        self.layout.as_ref()
    }

    /// Quadrant → sample table for DRMS.  Holds the last discovered table,
    /// or [`SampleTable::EXPECTED`] before any multisample allocation.
    #[inline]
    pub fn sample_table(&self) -> SampleTable {
        self.table
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TargetBackend> Drop for RenderTargetManager<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
