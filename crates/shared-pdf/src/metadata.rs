//! PDF `Info` dictionary reading

use lopdf::{Dictionary, Document, Object};
use shared_types::{PdfInfo, UNKNOWN};

/// Read title, author and creation date from the trailer's `Info` dictionary.
///
/// Missing or undecodable fields come back as [`UNKNOWN`].
pub fn read_info(doc: &Document, total_pages: u32) -> PdfInfo {
    let Some(info) = info_dictionary(doc) else {
        return PdfInfo::unknown(total_pages);
    };

    PdfInfo {
        total_pages,
        title: string_field(info, b"Title"),
        author: string_field(info, b"Author"),
        creation_date: string_field(info, b"CreationDate"),
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn string_field(dict: &Dictionary, key: &[u8]) -> String {
    dict.get(key)
        .ok()
        .and_then(|obj| match obj {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Decode a PDF text string: UTF-16BE when it carries a byte order mark,
/// otherwise PDFDocEncoding, which matches Latin-1 for printable text.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    bytes.iter().map(|&b| b as char).collect()
}
