use std::fs;
use std::path::Path;

use pix_core::container::header::ChunkHeader;
use pix_core::error::PixError;
use pix_core::{PackOptions, PackReport, pack, plan_file};
use tempfile::TempDir;

/// Decode every chunk image of `report` back into (header, body) pairs, in
/// seqnum order, checking the frames are square along the way.
fn decode_chunks(report: &PackReport) -> Vec<(ChunkHeader, Vec<u8>)> {
    report
        .images
        .iter()
        .map(|path| {
            let img = image::open(path).expect("chunk image should decode").to_rgba8();
            let (w, h) = img.dimensions();
            assert_eq!(w, h, "chunk frames are square");
            let raw = img.into_raw();
            assert_eq!(raw.len(), w as usize * h as usize * 4);
            let header = ChunkHeader::read_from(&raw[..]).expect("header should parse");
            let start = header.encoded_len() as usize;
            let body = raw[start..start + header.body_size as usize].to_vec();
            (header, body)
        })
        .collect()
}

#[test]
fn packed_images_rebuild_the_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payload.dat");
    let content: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&input, &content).unwrap();

    let out = TempDir::new().unwrap();
    // 16x16 frames hold 1024 bytes each; "payload.dat" gives a 48-byte header
    let report = pack(&input, out.path(), Some(&PackOptions { max_side: 16 })).unwrap();
    assert_eq!(report.file_size, 5000);
    assert_eq!(report.last_seqnum, 6);
    assert_eq!(report.images.len(), 6);

    let chunks = decode_chunks(&report);
    let mut rebuilt = Vec::new();
    for (i, (header, body)) in chunks.iter().enumerate() {
        assert_eq!(header.uuid, report.uuid);
        assert_eq!(header.seqnum as usize, i + 1);
        assert_eq!(header.last_seqnum, 6);
        assert_eq!(header.file_size, 5000);
        assert_eq!(header.file_name, b"payload.dat");
        assert_eq!(header.encoded_len(), 48);
        assert_eq!(header.body_size as usize, body.len());
        rebuilt.extend_from_slice(body);
    }
    assert_eq!(rebuilt, content);
}

#[test]
fn images_are_named_by_uuid_and_seqnum() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("small.bin");
    fs::write(&input, vec![0xA5u8; 600]).unwrap();

    let out = TempDir::new().unwrap();
    let report = pack(&input, out.path(), Some(&PackOptions { max_side: 10 })).unwrap();
    assert!(report.last_seqnum > 1);
    for (i, path) in report.images.iter().enumerate() {
        assert!(path.is_file());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{}_{}.png", report.uuid.as_simple(), i + 1)
        );
    }
}

#[test]
fn empty_file_still_produces_one_image() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.bin");
    fs::write(&input, b"").unwrap();

    let out = TempDir::new().unwrap();
    let report = pack(&input, out.path(), None).unwrap();
    assert_eq!(report.last_seqnum, 1);

    let chunks = decode_chunks(&report);
    let (header, body) = &chunks[0];
    assert_eq!(header.file_size, 0);
    assert_eq!(header.body_size, 0);
    assert_eq!(header.file_name, b"empty.bin");
    assert!(body.is_empty());
}

#[test]
fn long_names_are_truncated_in_headers() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("n".repeat(200));
    fs::write(&input, b"abc").unwrap();

    let out = TempDir::new().unwrap();
    let report = pack(&input, out.path(), None).unwrap();
    let chunks = decode_chunks(&report);
    assert_eq!(chunks[0].0.file_name, "n".repeat(128).into_bytes());
    assert_eq!(chunks[0].1, b"abc");
}

#[test]
fn plan_matches_pack() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.csv");
    fs::write(&input, vec![7u8; 3000]).unwrap();

    let summary = plan_file(&input, 16).unwrap();
    assert_eq!(summary.file_size, 3000);
    assert_eq!(summary.header_len, 48);
    assert_eq!(summary.max_body, 976);
    assert_eq!(summary.last_seqnum, 4);
    assert_eq!(summary.rows.len(), 4);
    let total: u64 = summary.rows.iter().map(|r| r.body_size).sum();
    assert_eq!(total, 3000);

    let out = TempDir::new().unwrap();
    let report = pack(&input, out.path(), Some(&PackOptions { max_side: 16 })).unwrap();
    assert_eq!(report.last_seqnum, summary.last_seqnum);
}

#[test]
fn missing_input_is_an_io_error() {
    let out = TempDir::new().unwrap();
    let err = pack(Path::new("no-such-file.bin"), out.path(), None).unwrap_err();
    assert!(matches!(err, PixError::Io(_)));
}

#[test]
fn unwritable_out_dir_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("x.bin");
    fs::write(&input, b"1234").unwrap();

    let missing = dir.path().join("no").join("such").join("dir");
    assert!(pack(&input, &missing, None).is_err());
}
