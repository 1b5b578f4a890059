//! The geometry output contract and a recording implementation.
//!
//! A trail never talks to a renderer directly. It writes into a [`MeshSink`],
//! which mirrors the immediate-mode surface API most engines expose: clear,
//! begin a strip, then set per-vertex color/UV before each vertex.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

/// Receives triangle-strip geometry.
///
/// Color and UV are sticky: they apply to every vertex added after them
/// until they are set again.
pub trait MeshSink {
    /// Drop all previously emitted geometry.
    fn clear(&mut self);
    /// Start a new triangle strip.
    fn begin_strip(&mut self);
    /// Color for subsequent vertices.
    fn set_color(&mut self, color: Vec4);
    /// Texture coordinate for subsequent vertices.
    fn set_uv(&mut self, uv: Vec2);
    /// Append a vertex (in the emitter's local frame) to the open strip.
    fn add_vertex(&mut self, position: Vec3);
    /// Close the open strip.
    fn end_strip(&mut self);
}

impl<M: MeshSink + ?Sized> MeshSink for &mut M {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn begin_strip(&mut self) {
        (**self).begin_strip()
    }

    fn set_color(&mut self, color: Vec4) {
        (**self).set_color(color)
    }

    fn set_uv(&mut self, uv: Vec2) {
        (**self).set_uv(uv)
    }

    fn add_vertex(&mut self, position: Vec3) {
        (**self).add_vertex(position)
    }

    fn end_strip(&mut self) {
        (**self).end_strip()
    }
}

/// One emitted vertex, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl TrailVertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// A mesh sink that records strips in memory.
///
/// Used as the default trail output and as the staging area for
/// [`TrailRenderer`](crate::gpu::TrailRenderer) uploads.
#[derive(Debug, Clone)]
pub struct ImmediateMesh {
    strips: Vec<Vec<TrailVertex>>,
    open: Option<Vec<TrailVertex>>,
    color: Vec4,
    uv: Vec2,
}

impl Default for ImmediateMesh {
    fn default() -> Self {
        Self {
            strips: Vec::new(),
            open: None,
            color: Vec4::ONE,
            uv: Vec2::ZERO,
        }
    }
}

impl ImmediateMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished strips in emission order.
    pub fn strips(&self) -> &[Vec<TrailVertex>] {
        &self.strips
    }

    /// All vertices of all finished strips, in emission order.
    pub fn vertices(&self) -> impl Iterator<Item = &TrailVertex> + '_ {
        self.strips.iter().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.strips.iter().map(Vec::len).sum()
    }

    /// True when no finished strip holds any vertex.
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

impl MeshSink for ImmediateMesh {
    fn clear(&mut self) {
        self.strips.clear();
        self.open = None;
    }

    fn begin_strip(&mut self) {
        if self.open.is_some() {
            tracing::warn!("begin_strip called with a strip already open; discarding it");
        }
        self.open = Some(Vec::new());
    }

    fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    fn set_uv(&mut self, uv: Vec2) {
        self.uv = uv;
    }

    fn add_vertex(&mut self, position: Vec3) {
        let vertex = TrailVertex {
            position: position.to_array(),
            color: self.color.to_array(),
            uv: self.uv.to_array(),
        };
        match &mut self.open {
            Some(strip) => strip.push(vertex),
            None => tracing::warn!("add_vertex called outside a strip; vertex dropped"),
        }
    }

    fn end_strip(&mut self) {
        match self.open.take() {
            Some(strip) => self.strips.push(strip),
            None => tracing::warn!("end_strip called without a matching begin_strip"),
        }
    }
}
