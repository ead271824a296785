use digest::Digest;
use hmac::{Hmac, Mac};
use md5::Md5;
use rand::{rngs::OsRng, RngCore};
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

type HmacMd5 = Hmac<Md5>;
type HmacSha1 = Hmac<Sha1>;
type HmacSha224 = Hmac<Sha224>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;
type HmacRipemd160 = Hmac<Ripemd160>;

fn hash_generic<D: Digest>(e: &mut Engine) -> EngineResult<()> {
    let data = e.stack.pop().ok_or(EngineError::NoDataToHash)?;
    e.stack.push(D::digest(&data).to_vec());
    Ok(())
}

fn compute_hmac<M: Mac + digest::KeyInit>(key: &[u8], data: &[u8]) -> EngineResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| EngineError::Cipher(format!("invalid hmac key: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hmac_generic<M: Mac + digest::KeyInit>(e: &mut Engine) -> EngineResult<()> {
    let key = e.stack.pop().ok_or(EngineError::NoKeyForHmac)?;
    let data = e.stack.pop().ok_or(EngineError::NoDataToHash)?;
    let out = compute_hmac::<M>(&key, &data)?;
    e.stack.push(out);
    Ok(())
}

pub fn md5(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Md5>(e)
}

pub fn sha1(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Sha1>(e)
}

pub fn sha224(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Sha224>(e)
}

pub fn sha256(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Sha256>(e)
}

pub fn sha384(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Sha384>(e)
}

pub fn sha512(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Sha512>(e)
}

pub fn ripemd160(e: &mut Engine) -> EngineResult<()> {
    hash_generic::<Ripemd160>(e)
}

pub fn hmac_md5(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacMd5>(e)
}

pub fn hmac_sha1(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacSha1>(e)
}

pub fn hmac_sha224(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacSha224>(e)
}

pub fn hmac_sha256(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacSha256>(e)
}

pub fn hmac_sha384(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacSha384>(e)
}

pub fn hmac_sha512(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacSha512>(e)
}

pub fn hmac_ripemd160(e: &mut Engine) -> EngineResult<()> {
    hmac_generic::<HmacRipemd160>(e)
}

pub fn md5_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"16".to_vec());
    Ok(())
}

pub fn sha1_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"20".to_vec());
    Ok(())
}

pub fn sha224_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"28".to_vec());
    Ok(())
}

pub fn sha256_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"32".to_vec());
    Ok(())
}

pub fn sha384_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"48".to_vec());
    Ok(())
}

pub fn sha512_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"64".to_vec());
    Ok(())
}

pub fn ripemd160_len(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"20".to_vec());
    Ok(())
}

pub fn rand(e: &mut Engine) -> EngineResult<()> {
    let sz = e.stack.pop_int()?;
    if sz < 0 {
        return Err(EngineError::OutOfRange);
    }
    let mut data = vec![0u8; sz as usize];
    OsRng.fill_bytes(&mut data);
    e.stack.push(data);
    Ok(())
}
