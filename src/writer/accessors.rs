//! Accessor classification and buffer-view packing.
//!
//! Each buffer yields at most three kinds of views: one concatenated view
//! for index accessors, one interleaved view per primitive for vertex
//! attributes, and one concatenated view for everything else. In GLB and
//! embedded modes, image bytes ride at the tail of output buffer 0.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use byteorder::{ByteOrder, LittleEndian};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::{Accessor, AccessorData, Document, LinkKind, Property, PropertyKey};
use crate::json;

use super::context::{non_empty_name, Packaging, WriterContext};
use super::GLB_BUFFER_URI;

const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

fn pad4(n: usize) -> usize {
    (n + 3) & !3
}

/// One buffer's accessors, split by usage.
#[derive(Default)]
struct BufferPartition {
    indices: Vec<PropertyKey>,
    /// Primitive -> its vertex attribute accessors, in discovery order.
    attributes: IndexMap<PropertyKey, Vec<PropertyKey>>,
    other: Vec<PropertyKey>,
}

impl BufferPartition {
    fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.attributes.is_empty() && self.other.is_empty()
    }
}

/// Classifies every accessor parented on `buffer` by the kinds of the
/// links that consume it. Mixing roles is a fatal input error; so is a
/// buffer parent that is not an accessor.
fn partition_accessors(doc: &Document, buffer: PropertyKey) -> Result<BufferPartition> {
    let root = doc.root_key();
    let mut partition = BufferPartition::default();
    for parent in doc.parents(buffer) {
        if parent == root {
            continue;
        }
        if !matches!(doc.property(parent), Property::Accessor(_)) {
            return Err(Error::UnexpectedBufferParent {
                kind: doc.property(parent).kind_name(),
            });
        }
        let accessor = parent;
        let mut attribute_of = None;
        let mut is_index = false;
        let mut is_other = false;
        for link in doc.links_to(accessor) {
            if link.parent == root {
                continue;
            }
            match link.kind {
                LinkKind::Attribute => {
                    // A shared attribute accessor interleaves with the
                    // first primitive that discovered it.
                    if attribute_of.is_none() {
                        attribute_of = Some(link.parent);
                    }
                }
                LinkKind::Index => is_index = true,
                LinkKind::Generic => is_other = true,
            }
        }
        let roles = usize::from(attribute_of.is_some()) + usize::from(is_index) + usize::from(is_other);
        if roles > 1 {
            return Err(Error::AccessorRoleConflict);
        }
        if let Some(primitive) = attribute_of {
            partition.attributes.entry(primitive).or_default().push(accessor);
        } else if is_index {
            partition.indices.push(accessor);
        } else {
            partition.other.push(accessor);
        }
    }
    Ok(partition)
}

/// Raw little-endian bytes of an accessor's data, unpadded.
fn encode_data(accessor: &Accessor) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(accessor.byte_len());
    match &accessor.data {
        AccessorData::I8(values) => bytes.extend(values.iter().map(|v| *v as u8)),
        AccessorData::U8(values) => bytes.extend_from_slice(values),
        AccessorData::I16(values) => {
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        AccessorData::U16(values) => {
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        AccessorData::U32(values) => {
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        AccessorData::F32(values) => {
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
    }
    bytes
}

/// One little-endian scalar into `dst`, dispatched on the component type.
fn write_scalar(dst: &mut [u8], data: &AccessorData, index: usize) {
    match data {
        AccessorData::I8(values) => dst[0] = values[index] as u8,
        AccessorData::U8(values) => dst[0] = values[index],
        AccessorData::I16(values) => LittleEndian::write_i16(dst, values[index]),
        AccessorData::U16(values) => LittleEndian::write_u16(dst, values[index]),
        AccessorData::U32(values) => LittleEndian::write_u32(dst, values[index]),
        AccessorData::F32(values) => LittleEndian::write_f32(dst, values[index]),
    }
}

fn accessor_def(accessor: &Accessor, buffer_view: usize, byte_offset: usize) -> json::AccessorDef {
    json::AccessorDef {
        buffer_view,
        byte_offset,
        component_type: accessor.component_type().code(),
        normalized: accessor.normalized,
        count: accessor.count(),
        accessor_type: accessor.element_type.name().to_string(),
        max: accessor.max(),
        min: accessor.min(),
        name: non_empty_name(&accessor.name),
        extras: accessor.extras.clone(),
        extensions: accessor.extensions.clone(),
    }
}

/// Packs `accessors` back to back into one view. Each accessor's raw bytes
/// are zero-padded to a 4-byte boundary so every local offset stays
/// aligned.
fn concat_accessors(
    ctx: &mut WriterContext,
    accessors: &[PropertyKey],
    buffer_index: usize,
    byte_offset: &mut usize,
    target: Option<u32>,
    out: &mut Vec<u8>,
) {
    let doc = ctx.doc;
    let view_index = ctx.json.buffer_views.len();
    let mut local = 0usize;
    for &key in accessors {
        let accessor = doc.accessor(key);
        ctx.accessor_indices.insert(key, ctx.json.accessors.len());
        ctx.json.accessors.push(accessor_def(accessor, view_index, local));
        let mut bytes = encode_data(accessor);
        bytes.resize(pad4(bytes.len()), 0);
        local += bytes.len();
        out.extend_from_slice(&bytes);
    }
    ctx.json.buffer_views.push(json::BufferViewDef {
        buffer: buffer_index,
        byte_offset: *byte_offset,
        byte_length: local,
        byte_stride: None,
        target,
    });
    *byte_offset += local;
}

/// Packs one primitive's attribute accessors into a single strided view.
/// The vertex stride is the sum of each accessor's element size padded to
/// 4 bytes; member defs carry their offset within one vertex.
fn interleave_accessors(
    ctx: &mut WriterContext,
    accessors: &[PropertyKey],
    buffer_index: usize,
    byte_offset: &mut usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    let doc = ctx.doc;
    let count = doc.accessor(accessors[0]).count();
    let mut offsets = Vec::with_capacity(accessors.len());
    let mut stride = 0usize;
    for &key in accessors {
        let accessor = doc.accessor(key);
        if accessor.count() != count {
            return Err(Error::InterleaveCountMismatch {
                expected: count,
                found: accessor.count(),
            });
        }
        offsets.push(stride);
        stride += pad4(accessor.element_type.component_count() * accessor.component_type().size());
    }

    let view_index = ctx.json.buffer_views.len();
    let mut bytes = vec![0u8; count * stride];
    for (slot, &key) in accessors.iter().enumerate() {
        let accessor = doc.accessor(key);
        let components = accessor.element_type.component_count();
        let size = accessor.component_type().size();
        for element in 0..count {
            for component in 0..components {
                let dst = element * stride + offsets[slot] + component * size;
                write_scalar(
                    &mut bytes[dst..dst + size],
                    &accessor.data,
                    element * components + component,
                );
            }
        }
        ctx.accessor_indices.insert(key, ctx.json.accessors.len());
        ctx.json.accessors.push(accessor_def(accessor, view_index, offsets[slot]));
    }

    ctx.json.buffer_views.push(json::BufferViewDef {
        buffer: buffer_index,
        byte_offset: *byte_offset,
        byte_length: bytes.len(),
        byte_stride: Some(stride),
        target: Some(ARRAY_BUFFER),
    });
    *byte_offset += bytes.len();
    out.extend_from_slice(&bytes);
    Ok(())
}

/// Runs the per-buffer pipeline for every root buffer: partition, pack
/// index/attribute/other views, append queued image bytes to buffer 0, and
/// assign the buffer's URI per packaging mode.
pub(crate) fn write_buffers(ctx: &mut WriterContext) -> Result<()> {
    let doc = ctx.doc;
    for (position, &buffer_key) in doc.root().buffers.iter().enumerate() {
        let partition = partition_accessors(doc, buffer_key)?;
        let buffer_index = ctx.json.buffers.len();
        let carries_images =
            buffer_index == 0 && ctx.embeds_images() && !ctx.pending_images.is_empty();
        if partition.is_empty() && !carries_images {
            tracing::warn!("skipping empty buffer at root position {position}");
            continue;
        }

        let mut bytes = Vec::new();
        let mut byte_offset = 0usize;
        if !partition.indices.is_empty() {
            concat_accessors(
                ctx,
                &partition.indices,
                buffer_index,
                &mut byte_offset,
                Some(ELEMENT_ARRAY_BUFFER),
                &mut bytes,
            );
        }
        for accessors in partition.attributes.values() {
            interleave_accessors(ctx, accessors, buffer_index, &mut byte_offset, &mut bytes)?;
        }
        if !partition.other.is_empty() {
            concat_accessors(ctx, &partition.other, buffer_index, &mut byte_offset, None, &mut bytes);
        }
        if carries_images {
            for (image_index, image_bytes) in std::mem::take(&mut ctx.pending_images) {
                let view_index = ctx.json.buffer_views.len();
                ctx.json.buffer_views.push(json::BufferViewDef {
                    buffer: buffer_index,
                    byte_offset,
                    byte_length: image_bytes.len(),
                    byte_stride: None,
                    target: None,
                });
                ctx.json.images[image_index].buffer_view = Some(view_index);
                byte_offset += pad4(image_bytes.len());
                bytes.extend_from_slice(&image_bytes);
                bytes.resize(byte_offset, 0);
            }
        }
        if byte_offset == 0 {
            tracing::warn!("skipping empty buffer at root position {position}");
            continue;
        }

        let buffer = doc.buffer(buffer_key);
        let uri = match ctx.packaging {
            Packaging::Glb => {
                if ctx.resources.contains_key(GLB_BUFFER_URI) {
                    // empty buffers were skipped above and don't conflict
                    return Err(Error::GlbMultipleBuffers {
                        count: ctx.json.buffers.len() + 1,
                    });
                }
                ctx.resources.insert(GLB_BUFFER_URI.to_string(), bytes);
                Some(GLB_BUFFER_URI.to_string())
            }
            Packaging::Embedded => Some(format!(
                "data:application/octet-stream;base64,{}",
                BASE64.encode(&bytes)
            )),
            Packaging::External => {
                let uri = ctx.buffer_uris.create(buffer.uri.as_deref(), "bin");
                ctx.resources.insert(uri.clone(), bytes);
                Some(uri)
            }
        };
        ctx.buffer_indices.insert(buffer_key, buffer_index);
        ctx.json.buffers.push(json::BufferDef {
            byte_length: byte_offset,
            uri,
            name: non_empty_name(&buffer.name),
            extras: buffer.extras.clone(),
            extensions: buffer.extensions.clone(),
        });
    }

    if ctx.embeds_images() && !ctx.pending_images.is_empty() {
        return Err(Error::MissingGlbBuffer);
    }
    Ok(())
}
