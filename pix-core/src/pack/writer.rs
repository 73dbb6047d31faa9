use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::debug;
use uuid::Uuid;

use crate::container::header::{ChunkHeader, PIXEL_STRIDE, truncated_name};
use crate::error::{PixError, Result};
use crate::pack::plan::{ChunkPlan, DEFAULT_MAX_SIDE, plan_chunks, side_len_for};
use crate::raster::RasterCodec;
use crate::raster::png::PngCodec;

#[derive(Clone, Default)]
pub struct PackOptions {
    /// Largest image side (pixels) to produce.
    /// e.g. 64 caps every chunk image at 64x64 = 16 KiB.
    pub max_side: u32, // default DEFAULT_MAX_SIDE if left as 0
}

fn effective_max_side(opts: Option<&PackOptions>) -> u32 {
    let val = opts.map(|o| o.max_side).unwrap_or(DEFAULT_MAX_SIDE);
    if val == 0 { DEFAULT_MAX_SIDE } else { val }
}

/// Outcome of one pack run: the identity the chunks carry and the images
/// written, in seqnum order.
#[derive(Clone, Debug)]
pub struct PackReport {
    pub uuid: Uuid,
    pub last_seqnum: u8,
    pub file_size: u64,
    pub images: Vec<PathBuf>,
}

/// Encode `input` as square RGBA chunk images under `out_dir`, named
/// `<uuid>_<seqnum>.<ext>`.
pub fn pack(input: &Path, out_dir: &Path, opts: Option<&PackOptions>) -> Result<PackReport> {
    let max_side = effective_max_side(opts);
    let file = File::open(input)?;
    let file_size = file.metadata()?.len();
    let file_name = truncated_name(input);

    let header_len = ChunkHeader::padded_len(file_name.len()) as u8;
    let plan = plan_chunks(file_size, header_len, max_side)?;
    let uuid = Uuid::new_v4();
    debug!(
        "packing {} bytes as {}: {} chunk(s), max body {} bytes",
        file_size,
        uuid.as_simple(),
        plan.last_seqnum,
        plan.max_body
    );

    write_chunks(uuid, file_name, plan, BufReader::new(file), out_dir, &PngCodec)
}

/// Drives the chunk sequence: one forward-only reader threaded through every
/// chunk, seqnum strictly increasing. A failure partway through stops the
/// run and leaves the images already written.
fn write_chunks(
    uuid: Uuid,
    file_name: Vec<u8>,
    plan: ChunkPlan,
    mut input: impl Read,
    out_dir: &Path,
    codec: &dyn RasterCodec,
) -> Result<PackReport> {
    let mut images = Vec::with_capacity(plan.last_seqnum as usize);
    for seqnum in 1..=plan.last_seqnum {
        let header = ChunkHeader {
            uuid,
            seqnum,
            last_seqnum: plan.last_seqnum,
            file_size: plan.file_size,
            body_size: plan.body_size(seqnum),
            file_name: file_name.clone(),
        };
        images.push(write_chunk(&header, &mut input, out_dir, codec)?);
    }
    Ok(PackReport {
        uuid,
        last_seqnum: plan.last_seqnum,
        file_size: plan.file_size,
        images,
    })
}

/// Packs one chunk: serialized header, then exactly `body_size` input bytes,
/// zero-padded up to the smallest square RGBA frame that fits.
fn write_chunk(
    header: &ChunkHeader,
    input: &mut impl Read,
    out_dir: &Path,
    codec: &dyn RasterCodec,
) -> Result<PathBuf> {
    let mut data = Vec::with_capacity(header.encoded_len() as usize + header.body_size as usize);
    header.write_to(&mut data)?;
    let got = input.take(header.body_size).read_to_end(&mut data)? as u64;
    if got != header.body_size {
        return Err(PixError::ShortInput {
            expected: header.body_size,
            got,
        });
    }

    let side = side_len_for(data.len() as u64);
    data.resize(side as usize * side as usize * PIXEL_STRIDE, 0);

    let out = out_dir.join(format!(
        "{}_{}.{}",
        header.uuid.as_simple(),
        header.seqnum,
        codec.extension()
    ));
    debug!(
        "chunk {}/{}: {} body bytes into {}x{} px -> {}",
        header.seqnum,
        header.last_seqnum,
        header.body_size,
        side,
        side,
        out.display()
    );
    codec.encode(side, data, &out)?;
    Ok(out)
}
