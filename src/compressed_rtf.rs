//! Decompression of Outlook's compressed RTF body property (MS-OXRTFCP)

use crate::error::{ExtractError, Result};

const HEADER_LEN: usize = 16;
const DICTIONARY_LEN: usize = 4096;

/// `LZFu` little-endian
const COMPRESSED: u32 = 0x7546_5A4C;
/// `MELA` little-endian
const UNCOMPRESSED: u32 = 0x414C_454D;

/// Initial dictionary contents
const PREBUFFER: &[u8] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \\fdecor MS Sans SerifSymbolArialTimes New RomanCourier{\\colortbl\\red0\\green0\\blue0\r\n\\par \\pard\\plain\\f0\\fs20\\b\\i\\u\\tab\\tx";

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Decompress an RTF stream. The CRC is not verified; a truncated stream
/// yields whatever was decoded before the data ran out.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_LEN {
        return Err(ExtractError::decode("compressed RTF", "stream shorter than header"));
    }

    let comp_size = read_u32(data, 0) as usize;
    let raw_size = read_u32(data, 4) as usize;
    let comp_type = read_u32(data, 8);
    // comp_size counts everything after its own field
    let end = comp_size.saturating_add(4).clamp(HEADER_LEN, data.len());

    match comp_type {
        UNCOMPRESSED => Ok(data[HEADER_LEN..end].to_vec()),
        COMPRESSED => Ok(decompress_lzfu(&data[HEADER_LEN..end], raw_size)),
        other => Err(ExtractError::decode(
            "compressed RTF",
            format!("unknown compression type {other:#010x}"),
        )),
    }
}

fn decompress_lzfu(body: &[u8], raw_size: usize) -> Vec<u8> {
    let mut dictionary = [0u8; DICTIONARY_LEN];
    dictionary[..PREBUFFER.len()].copy_from_slice(PREBUFFER);
    let mut write_pos = PREBUFFER.len();

    let mut out = Vec::with_capacity(raw_size.min(body.len().saturating_mul(8)));
    let mut pos = 0;

    while pos < body.len() {
        let control = body[pos];
        pos += 1;

        for bit in 0..8 {
            if control & (1 << bit) == 0 {
                let Some(&byte) = body.get(pos) else {
                    return out;
                };
                pos += 1;
                out.push(byte);
                dictionary[write_pos] = byte;
                write_pos = (write_pos + 1) % DICTIONARY_LEN;
            } else {
                let (Some(&high), Some(&low)) = (body.get(pos), body.get(pos + 1)) else {
                    return out;
                };
                pos += 2;

                let reference = u16::from_be_bytes([high, low]);
                let offset = usize::from(reference >> 4);
                let length = usize::from(reference & 0x0F) + 2;

                if offset == write_pos {
                    return out;
                }

                for i in 0..length {
                    let byte = dictionary[(offset + i) % DICTIONARY_LEN];
                    out.push(byte);
                    dictionary[write_pos] = byte;
                    write_pos = (write_pos + 1) % DICTIONARY_LEN;
                }
            }
        }
    }

    out
}
