use std::io::{Read, Write};
use std::path::Path;

use uuid::Uuid;

/// Serialized bytes taken by the fixed fields:
/// [0..16]=uuid, [16]=seqnum, [17]=last_seqnum, [18..26]=file_size,
/// [26..34]=body_size, [34]=header length (incl. padding), [35]=name_len.
/// The name bytes follow, then zero padding up to a PIXEL_STRIDE multiple.
pub const FIXED_LEN: usize = 36;
/// Names longer than this are truncated before the header is built.
pub const MAX_NAME_LEN: usize = 128;
/// Bytes per RGBA pixel; serialized headers are padded to this stride.
pub const PIXEL_STRIDE: usize = 4;

/// Per-chunk header. One immutable instance per chunk: the identity fields
/// (uuid, file_size, last_seqnum, file_name) repeat across a file's chunks,
/// only seqnum and body_size vary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub uuid: Uuid,
    /// 1-based position of this chunk, <= last_seqnum.
    pub seqnum: u8,
    /// Total chunk count for the file.
    pub last_seqnum: u8,
    /// Size of the whole original file.
    pub file_size: u64,
    /// Size of this chunk's payload.
    pub body_size: u64,
    /// Raw base-name bytes, at most MAX_NAME_LEN, not necessarily valid text.
    pub file_name: Vec<u8>,
}

impl ChunkHeader {
    /// Serialized size of a header carrying `name_len` name bytes, padding
    /// included. Always a multiple of PIXEL_STRIDE.
    pub fn padded_len(name_len: usize) -> usize {
        let raw = FIXED_LEN + name_len;
        raw + (PIXEL_STRIDE - raw % PIXEL_STRIDE) % PIXEL_STRIDE
    }

    /// Serialized size of this header. Fits the 1-byte wire field: the
    /// maximum is FIXED_LEN + MAX_NAME_LEN = 164.
    pub fn encoded_len(&self) -> u8 {
        Self::padded_len(self.file_name.len()) as u8
    }

    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(self.uuid.as_bytes())?;
        w.write_all(&[self.seqnum])?;
        w.write_all(&[self.last_seqnum])?;
        w.write_all(&self.file_size.to_le_bytes())?;
        w.write_all(&self.body_size.to_le_bytes())?;
        w.write_all(&[self.encoded_len()])?;
        w.write_all(&[self.file_name.len() as u8])?;
        w.write_all(&self.file_name)?;
        let padding = Self::padded_len(self.file_name.len()) - FIXED_LEN - self.file_name.len();
        w.write_all(&[0u8; 3][..padding])?;
        Ok(())
    }

    pub fn read_from(mut r: impl Read) -> std::io::Result<Self> {
        let mut uuid = [0u8; 16];
        r.read_exact(&mut uuid)?;
        let mut b1 = [0u8; 1];
        r.read_exact(&mut b1)?;
        let seqnum = b1[0];
        r.read_exact(&mut b1)?;
        let last_seqnum = b1[0];
        let mut b8 = [0u8; 8];
        r.read_exact(&mut b8)?;
        let file_size = u64::from_le_bytes(b8);
        r.read_exact(&mut b8)?;
        let body_size = u64::from_le_bytes(b8);
        r.read_exact(&mut b1)?;
        let header_len = b1[0] as usize;
        r.read_exact(&mut b1)?;
        let name_len = b1[0] as usize;
        if name_len > MAX_NAME_LEN {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("file name length {name_len} exceeds {MAX_NAME_LEN}"),
            ));
        }
        if header_len != Self::padded_len(name_len) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("header length {header_len} does not match a {name_len}-byte name"),
            ));
        }
        let mut file_name = vec![0u8; name_len];
        r.read_exact(&mut file_name)?;
        let mut padding = [0u8; 3];
        r.read_exact(&mut padding[..header_len - FIXED_LEN - name_len])?;
        Ok(Self {
            uuid: Uuid::from_bytes(uuid),
            seqnum,
            last_seqnum,
            file_size,
            body_size,
            file_name,
        })
    }
}

/// Base name of `path` as lossy bytes, truncated to MAX_NAME_LEN. The one
/// place the name-length invariant is enforced; the codec assumes it held.
pub fn truncated_name(path: &Path) -> Vec<u8> {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned().into_bytes())
        .unwrap_or_default();
    name.truncate(MAX_NAME_LEN);
    name
}
