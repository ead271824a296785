use crc::{Algorithm, Crc, CRC_32_ISCSI, CRC_32_ISO_HDLC, CRC_64_GO_ISO, CRC_64_XZ};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

const IEEE: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);
const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

// Not in the crc-catalog crate; the Koopman polynomial used by Go's
// hash/crc32 package (reflected form 0xeb31d82e).
const KOOPMAN_ALG: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x741b8cd7,
    init: 0xffffffff,
    refin: true,
    refout: true,
    xorout: 0xffffffff,
    check: 0x2d3dd0ae,
    residue: 0x0,
};
const KOOPMAN: Crc<u32> = Crc::<u32>::new(&KOOPMAN_ALG);

const CRC64_ISO: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);
const CRC64_ECMA: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

fn pop_data(e: &mut Engine) -> EngineResult<Vec<u8>> {
    e.stack.pop().ok_or(EngineError::NoDataToHash)
}

pub fn adler32(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    let sum = adler::adler32_slice(&data);
    e.stack.push(sum.to_be_bytes().to_vec());
    Ok(())
}

pub fn crc32(e: &mut Engine) -> EngineResult<()> {
    crc32_ieee(e)
}

pub fn crc32_ieee(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    e.stack.push(IEEE.checksum(&data).to_be_bytes().to_vec());
    Ok(())
}

pub fn crc32_castagnoli(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    e.stack
        .push(CASTAGNOLI.checksum(&data).to_be_bytes().to_vec());
    Ok(())
}

pub fn crc32_koopman(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    e.stack.push(KOOPMAN.checksum(&data).to_be_bytes().to_vec());
    Ok(())
}

pub fn crc64_iso(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    e.stack
        .push(CRC64_ISO.checksum(&data).to_be_bytes().to_vec());
    Ok(())
}

pub fn crc64_ecma(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    e.stack
        .push(CRC64_ECMA.checksum(&data).to_be_bytes().to_vec());
    Ok(())
}

const FNV32_OFFSET: u32 = 0x811c9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;
const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

pub fn fnv32(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    let mut h = FNV32_OFFSET;
    for b in &data {
        h = h.wrapping_mul(FNV32_PRIME);
        h ^= *b as u32;
    }
    e.stack.push(h.to_be_bytes().to_vec());
    Ok(())
}

pub fn fnv32a(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    let mut h = FNV32_OFFSET;
    for b in &data {
        h ^= *b as u32;
        h = h.wrapping_mul(FNV32_PRIME);
    }
    e.stack.push(h.to_be_bytes().to_vec());
    Ok(())
}

pub fn fnv64(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    let mut h = FNV64_OFFSET;
    for b in &data {
        h = h.wrapping_mul(FNV64_PRIME);
        h ^= *b as u64;
    }
    e.stack.push(h.to_be_bytes().to_vec());
    Ok(())
}

pub fn fnv64a(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e)?;
    let mut h = FNV64_OFFSET;
    for b in &data {
        h ^= *b as u64;
        h = h.wrapping_mul(FNV64_PRIME);
    }
    e.stack.push(h.to_be_bytes().to_vec());
    Ok(())
}
