//! GLB container assembly.

use crate::error::Result;
use crate::writer::{NativeDocument, GLB_BUFFER_URI};

/// Packs a GLB-mode native document into a single glTF-Binary blob: the
/// 12-byte header, the JSON chunk padded to 4 with spaces, and — when the
/// document carries binary data under [`GLB_BUFFER_URI`] — the BIN chunk
/// padded to 4 with zeros.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn to_glb(native: &NativeDocument) -> Result<Vec<u8>> {
    let json = serde_json::to_string(&native.json)?;
    let json_bytes = json.as_bytes();

    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_len = json_bytes.len() + json_padding;

    let bin = native.resources.get(GLB_BUFFER_URI);
    let (bin_chunk_len, bin_padding) = match bin {
        Some(bytes) => {
            let padding = (4 - (bytes.len() % 4)) % 4;
            (bytes.len() + padding, padding)
        }
        None => (0, 0),
    };

    let mut total_len = 12 + 8 + json_chunk_len;
    if bin.is_some() {
        total_len += 8 + bin_chunk_len;
    }

    let mut output = Vec::with_capacity(total_len);

    // GLB header
    output.extend_from_slice(b"glTF");
    output.extend_from_slice(&2u32.to_le_bytes());
    output.extend_from_slice(&(total_len as u32).to_le_bytes());

    // JSON chunk
    output.extend_from_slice(&(json_chunk_len as u32).to_le_bytes());
    output.extend_from_slice(&0x4E4F_534Au32.to_le_bytes()); // "JSON"
    output.extend_from_slice(json_bytes);
    for _ in 0..json_padding {
        output.push(b' ');
    }

    // Binary chunk
    if let Some(bytes) = bin {
        output.extend_from_slice(&(bin_chunk_len as u32).to_le_bytes());
        output.extend_from_slice(&0x004E_4942u32.to_le_bytes()); // "BIN\0"
        output.extend_from_slice(bytes);
        for _ in 0..bin_padding {
            output.push(0u8);
        }
    }

    Ok(output)
}
