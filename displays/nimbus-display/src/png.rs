//! PNG codec for cached icons
//!
//! Decodes non-interlaced 8-bit PNGs (grayscale, RGB, palette, gray+alpha,
//! RGBA) and encodes RGBA8. Deflate is provided by `miniz_oxide`; this
//! module only handles chunk framing, CRCs and scanline filters.

use alloc::vec::Vec;

use miniz_oxide::deflate::compress_to_vec_zlib;
use miniz_oxide::inflate::decompress_to_vec_zlib_with_limit;

use crate::image::{CodecError, Image, ImageCodec, MAX_IMAGE_PIXELS};

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Deflate level used when encoding (0-10)
const COMPRESSION_LEVEL: u8 = 6;

const COLOR_GRAY: u8 = 0;
const COLOR_RGB: u8 = 2;
const COLOR_PALETTE: u8 = 3;
const COLOR_GRAY_ALPHA: u8 = 4;
const COLOR_RGBA: u8 = 6;

/// PNG image codec
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Image, CodecError> {
        decode(bytes)
    }

    fn encode(&self, image: &Image) -> Result<Vec<u8>, CodecError> {
        encode(image)
    }
}

/// CRC-32 (ISO-HDLC) over several slices
fn crc32(parts: &[&[u8]]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for part in parts {
        for &byte in *part {
            crc ^= byte as u32;
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
            }
        }
    }
    !crc
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc32(&[kind, data]).to_be_bytes());
}

/// Encode an image as RGBA8 PNG with no scanline filtering
pub fn encode(image: &Image) -> Result<Vec<u8>, CodecError> {
    let mut header = [0u8; 13];
    header[0..4].copy_from_slice(&image.width().to_be_bytes());
    header[4..8].copy_from_slice(&image.height().to_be_bytes());
    header[8] = 8;
    header[9] = COLOR_RGBA;

    let mut raw = Vec::with_capacity(image.as_rgba().len() + image.height() as usize);
    for row in image.rows() {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    let compressed = compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);
    if compressed.is_empty() {
        return Err(CodecError::Compression);
    }

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&PNG_SIGNATURE);
    push_chunk(&mut out, b"IHDR", &header);
    push_chunk(&mut out, b"IDAT", &compressed);
    push_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

struct Header {
    width: u32,
    height: u32,
    color: u8,
}

impl Header {
    fn parse(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() != 13 {
            return Err(CodecError::InvalidFormat);
        }
        let width = read_u32(&data[0..4]);
        let height = read_u32(&data[4..8]);
        let (depth, color, interlace) = (data[8], data[9], data[12]);

        if depth != 8 || interlace != 0 || data[10] != 0 || data[11] != 0 {
            return Err(CodecError::Unsupported);
        }
        if !matches!(
            color,
            COLOR_GRAY | COLOR_RGB | COLOR_PALETTE | COLOR_GRAY_ALPHA | COLOR_RGBA
        ) {
            return Err(CodecError::Unsupported);
        }
        let pixels = (width as usize).saturating_mul(height as usize);
        if width == 0 || height == 0 || pixels > MAX_IMAGE_PIXELS {
            return Err(CodecError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            color,
        })
    }

    fn channels(&self) -> usize {
        match self.color {
            COLOR_GRAY | COLOR_PALETTE => 1,
            COLOR_GRAY_ALPHA => 2,
            COLOR_RGB => 3,
            _ => 4,
        }
    }
}

/// Decode a PNG into RGBA8
pub fn decode(bytes: &[u8]) -> Result<Image, CodecError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
        return Err(CodecError::InvalidFormat);
    }

    let mut header: Option<Header> = None;
    let mut palette: &[u8] = &[];
    let mut transparency: &[u8] = &[];
    let mut idat = Vec::new();
    let mut ended = false;
    let mut rest = &bytes[8..];

    while !rest.is_empty() {
        if rest.len() < 12 {
            return Err(CodecError::InvalidFormat);
        }
        let len = read_u32(&rest[0..4]) as usize;
        if rest.len() < 12 + len {
            return Err(CodecError::InvalidFormat);
        }
        let kind = &rest[4..8];
        let data = &rest[8..8 + len];
        let crc = read_u32(&rest[8 + len..12 + len]);
        if crc32(&[kind, data]) != crc {
            return Err(CodecError::Corrupted);
        }

        match kind {
            b"IHDR" => header = Some(Header::parse(data)?),
            b"PLTE" => palette = data,
            b"tRNS" => transparency = data,
            b"IDAT" => idat.extend_from_slice(data),
            b"IEND" => {
                ended = true;
                break;
            }
            // Ancillary chunks are skipped; unknown critical chunks are not
            _ if kind[0] & 0x20 == 0 => return Err(CodecError::Unsupported),
            _ => {}
        }
        rest = &rest[12 + len..];
    }

    let header = header.ok_or(CodecError::InvalidFormat)?;
    if !ended || idat.is_empty() {
        return Err(CodecError::InvalidFormat);
    }
    if header.color == COLOR_PALETTE && palette.is_empty() {
        return Err(CodecError::InvalidFormat);
    }

    let bpp = header.channels();
    let stride = header.width as usize * bpp;
    let expected = (stride + 1) * header.height as usize;
    let raw = decompress_to_vec_zlib_with_limit(&idat, expected)
        .map_err(|_| CodecError::Corrupted)?;
    if raw.len() != expected {
        return Err(CodecError::Corrupted);
    }

    let scanlines = unfilter(&raw, stride, bpp, header.height as usize)?;
    let rgba = expand(&header, &scanlines, palette, transparency)?;
    Image::from_rgba(header.width, header.height, rgba)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Reverse per-scanline filters, dropping the filter bytes
fn unfilter(raw: &[u8], stride: usize, bpp: usize, height: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = alloc::vec![0u8; stride * height];
    for y in 0..height {
        let line = &raw[y * (stride + 1)..(y + 1) * (stride + 1)];
        let filter = line[0];
        let src = &line[1..];
        let (done, current) = out.split_at_mut(y * stride);
        let current = &mut current[..stride];
        let prev = if y > 0 { Some(&done[(y - 1) * stride..]) } else { None };

        for x in 0..stride {
            let left = if x >= bpp { current[x - bpp] } else { 0 };
            let up = prev.map_or(0, |p| p[x]);
            let up_left = match prev {
                Some(p) if x >= bpp => p[x - bpp],
                _ => 0,
            };
            let predicted = match filter {
                0 => 0,
                1 => left,
                2 => up,
                3 => ((left as u16 + up as u16) / 2) as u8,
                4 => paeth(left, up, up_left),
                _ => return Err(CodecError::Corrupted),
            };
            current[x] = src[x].wrapping_add(predicted);
        }
    }
    Ok(out)
}

/// Convert unfiltered samples to RGBA8
fn expand(
    header: &Header,
    samples: &[u8],
    palette: &[u8],
    transparency: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let pixels = header.width as usize * header.height as usize;
    let mut rgba = Vec::with_capacity(pixels * 4);
    match header.color {
        COLOR_GRAY => {
            for &g in samples {
                rgba.extend_from_slice(&[g, g, g, 0xFF]);
            }
        }
        COLOR_GRAY_ALPHA => {
            for ga in samples.chunks_exact(2) {
                rgba.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
            }
        }
        COLOR_RGB => {
            for rgb in samples.chunks_exact(3) {
                rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 0xFF]);
            }
        }
        COLOR_PALETTE => {
            for &index in samples {
                let i = index as usize;
                let entry = palette
                    .get(i * 3..i * 3 + 3)
                    .ok_or(CodecError::Corrupted)?;
                let alpha = transparency.get(i).copied().unwrap_or(0xFF);
                rgba.extend_from_slice(&[entry[0], entry[1], entry[2], alpha]);
            }
        }
        _ => rgba.extend_from_slice(samples),
    }
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn checker(width: u32, height: u32) -> Image {
        let mut rgba = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let on = (x + y) % 2 == 0;
                rgba.extend_from_slice(&[if on { 0xFF } else { 0 }, x as u8, y as u8, 0x80]);
            }
        }
        Image::from_rgba(width, height, rgba).unwrap()
    }

    #[test]
    fn test_encode_then_decode_preserves_pixels() {
        let img = checker(7, 5);
        let png = PngCodec.encode(&img).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
        assert_eq!(PngCodec.decode(&png).unwrap(), img);
    }

    #[test]
    fn test_crc_reference_value() {
        // CRC of the IEND chunk type is fixed by the format
        assert_eq!(crc32(&[b"IEND"]), 0xAE42_6082);
    }

    #[test]
    fn test_rejects_bad_signature() {
        assert_eq!(decode(b"GIF89a..."), Err(CodecError::InvalidFormat));
    }

    #[test]
    fn test_detects_corrupted_chunk() {
        let mut png = encode(&checker(3, 3)).unwrap();
        // Flip a byte inside the IHDR data
        png[17] ^= 0x01;
        assert_eq!(decode(&png), Err(CodecError::Corrupted));
    }

    #[test]
    fn test_truncated_stream() {
        let png = encode(&checker(4, 4)).unwrap();
        assert!(decode(&png[..png.len() - 12]).is_err());
    }

    #[test]
    fn test_decodes_filtered_rgb() {
        // 2x2 RGB, row 0 filter Sub, row 1 filter Up
        let raw = vec![
            1, 10, 20, 30, 5, 5, 5, // Sub: second pixel = first + 5
            2, 1, 1, 1, 1, 1, 1, // Up: each sample = above + 1
        ];
        let mut header = [0u8; 13];
        header[3] = 2;
        header[7] = 2;
        header[8] = 8;
        header[9] = COLOR_RGB;

        let mut png = Vec::new();
        png.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut png, b"IHDR", &header);
        push_chunk(&mut png, b"IDAT", &compress_to_vec_zlib(&raw, 6));
        push_chunk(&mut png, b"IEND", &[]);

        let img = decode(&png).unwrap();
        assert_eq!(img.pixel(0, 0), Some([10, 20, 30, 0xFF]));
        assert_eq!(img.pixel(1, 0), Some([15, 25, 35, 0xFF]));
        assert_eq!(img.pixel(0, 1), Some([11, 21, 31, 0xFF]));
        assert_eq!(img.pixel(1, 1), Some([16, 26, 36, 0xFF]));
    }

    #[test]
    fn test_decodes_palette_with_transparency() {
        let raw = vec![0, 0, 1];
        let mut header = [0u8; 13];
        header[3] = 2;
        header[7] = 1;
        header[8] = 8;
        header[9] = COLOR_PALETTE;

        let mut png = Vec::new();
        png.extend_from_slice(&PNG_SIGNATURE);
        push_chunk(&mut png, b"IHDR", &header);
        push_chunk(&mut png, b"PLTE", &[1, 2, 3, 4, 5, 6]);
        push_chunk(&mut png, b"tRNS", &[0]);
        push_chunk(&mut png, b"IDAT", &compress_to_vec_zlib(&raw, 6));
        push_chunk(&mut png, b"IEND", &[]);

        let img = decode(&png).unwrap();
        assert_eq!(img.pixel(0, 0), Some([1, 2, 3, 0]));
        assert_eq!(img.pixel(1, 0), Some([4, 5, 6, 0xFF]));
    }
}
