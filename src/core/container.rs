use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::parsers::{parse_section_document, QueryRow};

/// Archive entry holding the Power Query package.
pub const DATA_MASHUP_ENTRY: &str = "DataMashup";
/// Section document inside the DataMashup package parts.
pub const SECTION_DOCUMENT_ENTRY: &str = "Formulas/Section1.m";
/// Largest entry the reader will inflate, declared or actual.
pub const MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// Source of the `{table_name, expression}` table for one container file.
///
/// `Ok(None)` means the container simply has no Power Query content. An `Err`
/// means the container could not be read and is reported as an `ERROR` row.
pub trait ContainerReader: Send + Sync {
    fn read_queries(&self, container_path: &Path) -> Result<Option<Vec<QueryRow>>>;
}

/// Reads Power Query definitions from `.pbix` / `.pbit` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PbixReader;

impl PbixReader {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerReader for PbixReader {
    fn read_queries(&self, container_path: &Path) -> Result<Option<Vec<QueryRow>>> {
        let file = File::open(container_path)
            .with_context(|| format!("Failed to open {}", container_path.display()))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("{} is not a valid PBIX archive", container_path.display()))?;

        let Some(mashup) = read_entry(&mut archive, DATA_MASHUP_ENTRY)? else {
            return Ok(None);
        };

        let package_parts = package_parts(&mashup)?;
        let mut parts = ZipArchive::new(Cursor::new(package_parts))
            .context("DataMashup package parts are not a valid archive")?;

        let Some(section) = read_entry(&mut parts, SECTION_DOCUMENT_ENTRY)? else {
            return Ok(None);
        };
        let document = String::from_utf8_lossy(&section);

        Ok(Some(parse_section_document(&document)))
    }
}

/// Slice the package-parts archive out of a DataMashup stream.
///
/// Layout: `u32` version, `u32` package-parts length, then the package parts.
/// Both integers are little-endian.
pub fn package_parts(mashup: &[u8]) -> Result<&[u8]> {
    if mashup.len() < 8 {
        bail!("DataMashup stream is truncated ({} bytes)", mashup.len());
    }

    let version = u32::from_le_bytes([mashup[0], mashup[1], mashup[2], mashup[3]]);
    if version != 0 {
        tracing::debug!(version, "unexpected DataMashup version");
    }

    let length = u32::from_le_bytes([mashup[4], mashup[5], mashup[6], mashup[7]]) as usize;
    let end = 8usize
        .checked_add(length)
        .filter(|end| *end <= mashup.len())
        .with_context(|| {
            format!(
                "DataMashup package parts length {} exceeds stream size {}",
                length,
                mashup.len()
            )
        })?;

    Ok(&mashup[8..end])
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("Failed to open entry {name}")),
    };

    if entry.size() > MAX_ENTRY_SIZE {
        bail!(
            "Entry {name} declares {} bytes, above the {MAX_ENTRY_SIZE} byte limit",
            entry.size()
        );
    }

    // The declared size is untrusted; cap what is actually read as well.
    let mut data = Vec::new();
    (&mut entry)
        .take(MAX_ENTRY_SIZE + 1)
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read entry {name}"))?;
    if data.len() as u64 > MAX_ENTRY_SIZE {
        bail!("Entry {name} exceeds the {MAX_ENTRY_SIZE} byte limit");
    }
    Ok(Some(data))
}
