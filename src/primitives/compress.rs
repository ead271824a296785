use std::io::{Read, Write};

use bzip2::read::BzDecoder;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use weezl::{decode::Decoder as LzwDecoder, encode::Encoder as LzwEncoder, BitOrder};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

fn pop_data(e: &mut Engine) -> Vec<u8> {
    e.stack.pop().unwrap_or_default()
}

fn level_from(level: i32) -> EngineResult<Compression> {
    match level {
        -1 => Ok(Compression::default()),
        0..=9 => Ok(Compression::new(level as u32)),
        _ => Err(EngineError::Codec(format!(
            "invalid compression level {level}"
        ))),
    }
}

pub fn snappy(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let compressed = snap::raw::Encoder::new()
        .compress_vec(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(compressed);
    Ok(())
}

pub fn unsnappy(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let decompressed = snap::raw::Decoder::new()
        .decompress_vec(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(decompressed);
    Ok(())
}

pub fn zlib(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    let out = enc
        .finish()
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn unzlib(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let mut dec = ZlibDecoder::new(&data[..]);
    let mut out = Vec::new();
    dec.read_to_end(&mut out)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn deflate(e: &mut Engine) -> EngineResult<()> {
    let level = e.stack.pop_int()?;
    let data = pop_data(e);
    let compression = level_from(level)?;
    let mut enc = DeflateEncoder::new(Vec::new(), compression);
    enc.write_all(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    let out = enc
        .finish()
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn inflate(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let mut dec = DeflateDecoder::new(&data[..]);
    let mut out = Vec::new();
    dec.read_to_end(&mut out)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn gzip(e: &mut Engine) -> EngineResult<()> {
    let level = e.stack.pop_int()?;
    let data = pop_data(e);
    let compression = level_from(level)?;
    let mut enc = GzEncoder::new(Vec::new(), compression);
    enc.write_all(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    let out = enc
        .finish()
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn ungzip(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let mut dec = GzDecoder::new(&data[..]);
    let mut out = Vec::new();
    dec.read_to_end(&mut out)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn unbzip2(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let mut dec = BzDecoder::new(&data[..]);
    let mut out = Vec::new();
    dec.read_to_end(&mut out)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

fn lit_width(e: &mut Engine) -> EngineResult<u8> {
    let n = e.stack.pop_int()?;
    if !(2..=8).contains(&n) {
        return Err(EngineError::Codec(format!(
            "lzw literal width {n} out of range 2-8"
        )));
    }
    Ok(n as u8)
}

pub fn lzw_msb(e: &mut Engine) -> EngineResult<()> {
    let width = lit_width(e)?;
    let data = pop_data(e);
    let out = LzwEncoder::new(BitOrder::Msb, width)
        .encode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn lzw_lsb(e: &mut Engine) -> EngineResult<()> {
    let width = lit_width(e)?;
    let data = pop_data(e);
    let out = LzwEncoder::new(BitOrder::Lsb, width)
        .encode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn unlzw_msb(e: &mut Engine) -> EngineResult<()> {
    let width = lit_width(e)?;
    let data = pop_data(e);
    let out = LzwDecoder::new(BitOrder::Msb, width)
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}

pub fn unlzw_lsb(e: &mut Engine) -> EngineResult<()> {
    let width = lit_width(e)?;
    let data = pop_data(e);
    let out = LzwDecoder::new(BitOrder::Lsb, width)
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(out);
    Ok(())
}
