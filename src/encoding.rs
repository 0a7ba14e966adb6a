use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::Error;

// Sniff the encoding of `data`. A byte order mark wins; otherwise the
// XML declaration or content is inspected, and nothing found means UTF-8.
pub(crate) fn encoding(data: &[u8]) -> Option<&'static Encoding> {
    if let Some((encoding, _)) = Encoding::for_bom(data) {
        return Some(encoding);
    }
    let charsets = detect(&mut std::io::Cursor::new(data), None).ok()?;
    match charsets.first() {
        Some(label) => Encoding::for_label(label.as_bytes()),
        None => Some(encoding_rs::UTF_8),
    }
}

// decode bytes into a string, dropping any byte order mark. The XML
// declaration goes too, as its encoding no longer describes the result.
pub(crate) fn decode(data: &[u8]) -> Result<String, Error> {
    let encoding = encoding(data).ok_or(Error::UnknownEncoding)?;
    let (decoded, _, _) = encoding.decode(data);
    Ok(strip_declaration(&decoded).to_string())
}

fn strip_declaration(xml: &str) -> &str {
    if !xml.starts_with("<?xml ") {
        return xml;
    }
    match xml.find("?>") {
        Some(end) => xml[end + 2..].trim_start(),
        None => xml,
    }
}
