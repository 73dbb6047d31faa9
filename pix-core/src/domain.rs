// pix_core/src/domain.rs
#[derive(Clone, Debug)]
pub struct ChunkRow {
    pub seqnum: u8,
    pub body_size: u64,
    pub side: u32,
    pub capacity: u64,
}
