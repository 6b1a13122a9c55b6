#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// DataMashup stream wrapping a package-parts archive that holds `section`.
pub fn data_mashup(section: &str) -> Vec<u8> {
    let parts = zip_bytes(&[("Formulas/Section1.m", section.as_bytes())]);
    let mut stream = Vec::new();
    stream.extend_from_slice(&0u32.to_le_bytes());
    stream.extend_from_slice(&(parts.len() as u32).to_le_bytes());
    stream.extend_from_slice(&parts);
    // Trailing permissions/metadata blocks are ignored by the reader.
    stream.extend_from_slice(&0u32.to_le_bytes());
    stream
}

/// Section document with one `shared` member per `(name, expression)`.
pub fn section_document(queries: &[(&str, &str)]) -> String {
    let mut document = String::from("section Section1;\r\n");
    for (name, expression) in queries {
        document.push_str(&format!("\r\nshared {name} = {expression};\r\n"));
    }
    document
}

/// Write a minimal `.pbix` holding the given queries.
pub fn write_pbix(path: &Path, queries: &[(&str, &str)]) -> PathBuf {
    let mashup = data_mashup(&section_document(queries));
    write_archive(path, &[("Version", &b"1.28"[..]), ("DataMashup", &mashup[..])])
}

/// Write an arbitrary zip archive.
pub fn write_archive(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, zip_bytes(entries)).unwrap();
    path.to_path_buf()
}

pub const ORDERS_NAV: &str = r#"let
    Source = Sql.Database("srv1", "db1"),
    dbo_Orders = Source{[Schema="dbo",Item="Orders"]}[Data]
in
    dbo_Orders"#;

/// Write a one-entry Stored zip64 archive whose headers claim `declared_size`
/// uncompressed bytes while only `data` is actually stored.
pub fn write_archive_with_declared_size(
    path: &Path,
    name: &str,
    data: &[u8],
    declared_size: u64,
) -> PathBuf {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .large_file(true);
    writer.start_file(name, options).unwrap();
    writer.write_all(data).unwrap();
    let mut bytes = writer.finish().unwrap().into_inner();

    // Local header sits at offset 0; the central header is the last PK\x01\x02.
    declare_size(&mut bytes, 0, 30, declared_size);
    let central = bytes
        .windows(4)
        .rposition(|w| w == b"PK\x01\x02")
        .unwrap();
    declare_size(&mut bytes, central, 46, declared_size);

    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

fn read_u16(bytes: &[u8], at: usize) -> usize {
    u16::from_le_bytes([bytes[at], bytes[at + 1]]) as usize
}

/// Overwrite the uncompressed size of one header: the zip64 extra field when
/// present, the 32-bit field otherwise. `fixed_len` is 30 (local) or 46 (central).
fn declare_size(bytes: &mut [u8], header: usize, fixed_len: usize, declared_size: u64) {
    // Name length follows the 32-bit uncompressed size in both header kinds.
    let name_len_at = header + if fixed_len == 46 { 28 } else { 26 };
    let size_at = name_len_at - 4;
    let name_len = read_u16(bytes, name_len_at);
    let extra_len = read_u16(bytes, name_len_at + 2);

    let mut cursor = header + fixed_len + name_len;
    let end = cursor + extra_len;
    let mut patched = false;
    while cursor + 4 <= end {
        let id = read_u16(bytes, cursor);
        let len = read_u16(bytes, cursor + 2);
        if id == 0x0001 && len >= 8 {
            bytes[cursor + 4..cursor + 12].copy_from_slice(&declared_size.to_le_bytes());
            patched = true;
        }
        cursor += 4 + len;
    }

    if !patched {
        let small = declared_size.min(0xFFFF_FFFE) as u32;
        bytes[size_at..size_at + 4].copy_from_slice(&small.to_le_bytes());
    }
}
