use std::path::Path;

use crate::container::header::{ChunkHeader, PIXEL_STRIDE, truncated_name};
use crate::domain::ChunkRow;
use crate::error::{PixError, Result};

/// Largest square side (pixels) the raster tooling is trusted to produce.
pub const DEFAULT_MAX_SIDE: u32 = 4062;
/// Chunk count ceiling imposed by the 1-byte seqnum fields.
pub const MAX_CHUNKS: u64 = u8::MAX as u64;

/// Fixed split of one file into chunks. Every chunk but the last carries
/// `max_body` payload bytes; the last carries the remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    pub last_seqnum: u8,
    pub max_body: u64,
    pub file_size: u64,
}

impl ChunkPlan {
    /// Payload size of chunk `seqnum` (1-based, <= last_seqnum).
    pub fn body_size(&self, seqnum: u8) -> u64 {
        if seqnum == self.last_seqnum {
            self.file_size - (self.last_seqnum as u64 - 1) * self.max_body
        } else {
            self.max_body
        }
    }
}

/// Byte capacity of a square RGBA image.
pub fn image_capacity(side: u32) -> u64 {
    side as u64 * side as u64 * PIXEL_STRIDE as u64
}

/// Payload bytes available per chunk once the header has claimed its share.
pub fn max_body_per_chunk(max_side: u32, header_len: u8) -> Result<u64> {
    let capacity = image_capacity(max_side);
    if capacity <= header_len as u64 {
        return Err(PixError::Capacity(format!(
            "a {header_len}-byte header leaves no payload room in a {max_side}x{max_side} image"
        )));
    }
    Ok(capacity - header_len as u64)
}

/// Fix the chunk count for a file of `file_size` bytes. An empty file still
/// gets one chunk so its name and size survive in a header.
pub fn plan_chunks(file_size: u64, header_len: u8, max_side: u32) -> Result<ChunkPlan> {
    let max_body = max_body_per_chunk(max_side, header_len)?;
    let chunks = if file_size == 0 {
        1
    } else {
        file_size.div_ceil(max_body)
    };
    if chunks > MAX_CHUNKS {
        return Err(PixError::Capacity(format!(
            "{file_size} bytes need {chunks} chunks, over the limit of {MAX_CHUNKS}"
        )));
    }
    Ok(ChunkPlan {
        last_seqnum: chunks as u8,
        max_body,
        file_size,
    })
}

/// Smallest square side whose pixel capacity holds `byte_len` bytes.
pub fn side_len_for(byte_len: u64) -> u32 {
    let pixels = byte_len.div_ceil(PIXEL_STRIDE as u64);
    let mut side = pixels.isqrt();
    if side * side < pixels {
        side += 1;
    }
    side as u32
}

/// Per-chunk view of a plan, sized for display.
pub fn chunk_rows(plan: &ChunkPlan, header_len: u8) -> Vec<ChunkRow> {
    (1..=plan.last_seqnum)
        .map(|seqnum| {
            let body_size = plan.body_size(seqnum);
            let side = side_len_for(header_len as u64 + body_size);
            ChunkRow {
                seqnum,
                body_size,
                side,
                capacity: image_capacity(side),
            }
        })
        .collect()
}

/// Everything a dry run reports for `input`: the plan plus its per-chunk
/// rows, computed from file metadata alone. No image is written.
#[derive(Clone, Debug)]
pub struct PlanSummary {
    pub file_size: u64,
    pub header_len: u8,
    pub last_seqnum: u8,
    pub max_body: u64,
    pub rows: Vec<ChunkRow>,
}

pub fn plan_file(input: &Path, max_side: u32) -> Result<PlanSummary> {
    let file_size = std::fs::metadata(input)?.len();
    let name = truncated_name(input);
    let header_len = ChunkHeader::padded_len(name.len()) as u8;
    let plan = plan_chunks(file_size, header_len, max_side)?;
    Ok(PlanSummary {
        file_size,
        header_len,
        last_seqnum: plan.last_seqnum,
        max_body: plan.max_body,
        rows: chunk_rows(&plan, header_len),
    })
}
