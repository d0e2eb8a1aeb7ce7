//! Minimal reader for the subset of the NumPy `.npy` format this crate
//! consumes: row-major, non-Fortran-ordered 2-D arrays of `uint8` or
//! `int32`.
//!
//! This is intentionally narrow — no pickle support, no structured dtypes,
//! no Fortran order — since the only producer of these files is the
//! upstream rasterizer, which always emits row-major `uint8`/`int32` dumps.

use std::io::Read;

use crate::error::{GridError, GridResult};

const MAGIC: &[u8] = b"\x93NUMPY";

/// A decoded `.npy` array: raw little-endian bytes plus its declared shape
/// and element size in bytes (1 for `uint8`, 4 for `int32`).
pub struct NpyArray {
    pub shape: (usize, usize),
    pub itemsize: usize,
    pub data: Vec<u8>,
}

/// Parse a `.npy` file from `path`, verifying the dtype matches `expect_descr`
/// (e.g. `"|u1"` for uint8, `"<i4"` for little-endian int32).
pub fn read_npy(path: &std::path::Path, expect_descr: &str) -> GridResult<NpyArray> {
    let mut file = std::fs::File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    parse_npy(&buf, expect_descr, &path.display().to_string())
}

fn npy_err(path: &str, reason: impl Into<String>) -> GridError {
    GridError::NpyHeader {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn parse_npy(buf: &[u8], expect_descr: &str, path: &str) -> GridResult<NpyArray> {
    if buf.len() < 10 || &buf[0..6] != MAGIC {
        return Err(npy_err(path, "missing NUMPY magic bytes"));
    }
    let major = buf[6];
    let (header_len, header_start): (usize, usize) = if major == 1 {
        let len = u16::from_le_bytes([buf[8], buf[9]]) as usize;
        (len, 10)
    } else {
        if buf.len() < 12 {
            return Err(npy_err(path, "truncated v2 header"));
        }
        let len = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]) as usize;
        (len, 12)
    };
    let header_end = header_start + header_len;
    if buf.len() < header_end {
        return Err(npy_err(path, "header length exceeds file size"));
    }
    let header = std::str::from_utf8(&buf[header_start..header_end])
        .map_err(|_| npy_err(path, "header is not valid UTF-8"))?;

    let descr = extract_literal(header, "'descr':").ok_or_else(|| npy_err(path, "missing descr"))?;
    if descr != expect_descr {
        return Err(npy_err(
            path,
            format!("dtype {descr} does not match expected {expect_descr}"),
        ));
    }

    let fortran = extract_literal(header, "'fortran_order':")
        .map(|v| v == "True")
        .unwrap_or(false);
    if fortran {
        return Err(npy_err(path, "Fortran-ordered arrays are not supported"));
    }

    let shape_str =
        extract_tuple(header, "'shape':").ok_or_else(|| npy_err(path, "missing shape"))?;
    let dims: Vec<usize> = shape_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| npy_err(path, "non-integer shape entry"))?;
    if dims.len() != 2 {
        return Err(npy_err(path, "only 2-D arrays are supported"));
    }
    let shape = (dims[0], dims[1]);

    let itemsize = match expect_descr {
        "|u1" => 1,
        "<i4" => 4,
        other => return Err(npy_err(path, format!("unsupported descr {other}"))),
    };

    let expected_bytes = shape.0 * shape.1 * itemsize;
    let data = buf[header_end..].to_vec();
    if data.len() < expected_bytes {
        return Err(npy_err(path, "data shorter than shape implies"));
    }

    Ok(NpyArray {
        shape,
        itemsize,
        data: data[..expected_bytes].to_vec(),
    })
}

/// Extract a quoted-or-bare literal value following `key` up to the next
/// comma or closing brace (e.g. `'descr': '|u1',` → `|u1`).
fn extract_literal<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let idx = header.find(key)? + key.len();
    let rest = header[idx..].trim_start();
    let end = rest.find(',').unwrap_or(rest.len());
    let end = end.min(rest.find('}').unwrap_or(usize::MAX));
    Some(rest[..end].trim().trim_matches('\''))
}

/// Extract the contents of a `(...)` tuple following `key`.
fn extract_tuple<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let idx = header.find(key)? + key.len();
    let rest = &header[idx..];
    let open = rest.find('(')?;
    let close = rest[open..].find(')')? + open;
    Some(&rest[open + 1..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_u8_npy(shape: (usize, usize), data: &[u8]) -> Vec<u8> {
        let header = format!(
            "{{'descr': '|u1', 'fortran_order': False, 'shape': ({}, {}), }}",
            shape.0, shape.1
        );
        let mut padded = header.into_bytes();
        // pad so that MAGIC(6) + version(2) + header_len(2) + header is a multiple of 64
        while (10 + padded.len() + 1) % 64 != 0 {
            padded.push(b' ');
        }
        padded.push(b'\n');

        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.push(1);
        buf.push(0);
        buf.extend_from_slice(&(padded.len() as u16).to_le_bytes());
        buf.extend_from_slice(&padded);
        buf.extend_from_slice(data);
        buf
    }

    #[test]
    fn roundtrip_u8() {
        let data = vec![1u8, 2, 3, 4, 5, 6];
        let buf = build_u8_npy((2, 3), &data);
        let arr = parse_npy(&buf, "|u1", "test").unwrap();
        assert_eq!(arr.shape, (2, 3));
        assert_eq!(arr.data, data);
    }

    #[test]
    fn rejects_bad_magic() {
        let buf = vec![0u8; 20];
        assert!(parse_npy(&buf, "|u1", "test").is_err());
    }

    #[test]
    fn rejects_dtype_mismatch() {
        let buf = build_u8_npy((1, 1), &[0]);
        assert!(parse_npy(&buf, "<i4", "test").is_err());
    }
}
