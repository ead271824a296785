use data_encoding::{BASE32, BASE32HEX, BASE64, BASE64URL, HEXLOWER};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

fn pop_data(e: &mut Engine) -> Vec<u8> {
    e.stack.pop().unwrap_or_default()
}

pub fn hex(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(HEXLOWER.encode(&data).into_bytes());
    Ok(())
}

pub fn unhex(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let dec = HEXLOWER
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(dec);
    Ok(())
}

pub fn ascii85(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(::ascii85::encode(&data).into_bytes());
    Ok(())
}

pub fn unascii85(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let text = String::from_utf8_lossy(&data);
    let dec =
        ::ascii85::decode(&text).map_err(|err| EngineError::Codec(format!("{:?}", err)))?;
    e.stack.push(dec);
    Ok(())
}

pub fn base32(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(BASE32.encode(&data).into_bytes());
    Ok(())
}

pub fn unbase32(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let dec = BASE32
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(dec);
    Ok(())
}

pub fn base32_hex(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(BASE32HEX.encode(&data).into_bytes());
    Ok(())
}

pub fn unbase32_hex(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let dec = BASE32HEX
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(dec);
    Ok(())
}

pub fn base64(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(BASE64.encode(&data).into_bytes());
    Ok(())
}

pub fn unbase64(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let dec = BASE64
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(dec);
    Ok(())
}

pub fn base64_url(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    e.stack.push(BASE64URL.encode(&data).into_bytes());
    Ok(())
}

pub fn unbase64_url(e: &mut Engine) -> EngineResult<()> {
    let data = pop_data(e);
    let dec = BASE64URL
        .decode(&data)
        .map_err(|err| EngineError::Codec(err.to_string()))?;
    e.stack.push(dec);
    Ok(())
}
