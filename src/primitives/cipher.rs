//! Symmetric-cipher primitives.
//!
//! Every `<alg>-<mode>` primitive is built from two layers: a per-cipher
//! factory that turns a key (and, for salted Blowfish, a salt) into a
//! keyed block cipher, and a mode layer (`cfb`/`uncfb`/`ofb`/`ctr`) that is
//! generic over any factory. This mirrors the reference server's
//! `cipherBlock func(key []byte) (cipher.Block, error)` factories, adapted
//! to Rust by producing an already-mode-wrapped `Box<dyn StreamCipher>`
//! instead of a boxed block cipher, since block ciphers of differing block
//! sizes aren't object-safe across a single trait object.

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cipher::{AsyncStreamCipher, InnerIvInit, KeyInit, KeyIvInit, StreamCipher, StreamCipherCoreWrapper};
use des::{Des, TdesEde3};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use twofish::Twofish;

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

fn cipher_err(e: impl std::fmt::Display) -> EngineError {
    EngineError::Cipher(e.to_string())
}

fn boxed<M: StreamCipher + 'static>(m: M) -> Box<dyn StreamCipher> {
    Box::new(m)
}

fn from_slices<M: KeyIvInit>(key: &[u8], iv: &[u8]) -> EngineResult<M> {
    M::new_from_slices(key, iv).map_err(cipher_err)
}

fn from_core<T: InnerIvInit + cipher::StreamCipherCore>(
    inner: T::Inner,
    iv: &[u8],
) -> EngineResult<StreamCipherCoreWrapper<T>>
where
    T::BlockSize: cipher::typenum::IsLess<cipher::consts::U256>,
    cipher::typenum::Le<T::BlockSize, cipher::consts::U256>: cipher::typenum::NonZero,
{
    let core = T::inner_iv_slice_init(inner, iv).map_err(cipher_err)?;
    Ok(StreamCipherCoreWrapper::from_core(core))
}

/// Derives an effective Blowfish key from a key and salt.
///
/// The reference server calls into Go's `blowfish.NewSaltedCipher`, which
/// implements OpenBSD's EKS key schedule. The `blowfish` crate exposes only
/// the unsalted key schedule, so the salt is folded in via HMAC-SHA256
/// instead. This keeps the primitive's stack contract and round-trip
/// behaviour intact; ciphertext produced here is not byte-compatible with
/// the reference implementation (see DESIGN.md).
fn salted_key(key: &[u8], salt: &[u8]) -> EngineResult<Vec<u8>> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key).map_err(cipher_err)?;
    mac.update(salt);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// A block-cipher factory: given the inputs already popped off the stack,
/// produce mode-wrapped stream ciphers for encryption and decryption.
trait CipherFactory {
    fn block_size(&self) -> usize;
    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()>;
    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()>;
    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>>;
    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>>;
}

struct AesFactory;

impl CipherFactory for AesFactory {
    fn block_size(&self) -> usize {
        16
    }

    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        match key.len() {
            16 => from_slices::<cfb_mode::Encryptor<Aes128>>(key, iv)?.encrypt(buf),
            24 => from_slices::<cfb_mode::Encryptor<Aes192>>(key, iv)?.encrypt(buf),
            32 => from_slices::<cfb_mode::Encryptor<Aes256>>(key, iv)?.encrypt(buf),
            _ => return Err(EngineError::Cipher("aes: key must be 16, 24, or 32 bytes".into())),
        }
        Ok(())
    }

    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        match key.len() {
            16 => from_slices::<cfb_mode::Decryptor<Aes128>>(key, iv)?.decrypt(buf),
            24 => from_slices::<cfb_mode::Decryptor<Aes192>>(key, iv)?.decrypt(buf),
            32 => from_slices::<cfb_mode::Decryptor<Aes256>>(key, iv)?.decrypt(buf),
            _ => return Err(EngineError::Cipher("aes: key must be 16, 24, or 32 bytes".into())),
        }
        Ok(())
    }

    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(match key.len() {
            16 => boxed(from_slices::<ofb::Ofb<Aes128>>(key, iv)?),
            24 => boxed(from_slices::<ofb::Ofb<Aes192>>(key, iv)?),
            32 => boxed(from_slices::<ofb::Ofb<Aes256>>(key, iv)?),
            _ => return Err(EngineError::Cipher("aes: key must be 16, 24, or 32 bytes".into())),
        })
    }

    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(match key.len() {
            16 => boxed(from_slices::<ctr::Ctr128BE<Aes128>>(key, iv)?),
            24 => boxed(from_slices::<ctr::Ctr128BE<Aes192>>(key, iv)?),
            32 => boxed(from_slices::<ctr::Ctr128BE<Aes256>>(key, iv)?),
            _ => return Err(EngineError::Cipher("aes: key must be 16, 24, or 32 bytes".into())),
        })
    }
}

struct DesFactory;

impl CipherFactory for DesFactory {
    fn block_size(&self) -> usize {
        8
    }

    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        from_slices::<cfb_mode::Encryptor<Des>>(key, iv)?.encrypt(buf);
        Ok(())
    }

    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        from_slices::<cfb_mode::Decryptor<Des>>(key, iv)?.decrypt(buf);
        Ok(())
    }

    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(boxed(from_slices::<ofb::Ofb<Des>>(key, iv)?))
    }

    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(boxed(from_slices::<ctr::Ctr64BE<Des>>(key, iv)?))
    }
}

struct TripleDesFactory;

impl CipherFactory for TripleDesFactory {
    fn block_size(&self) -> usize {
        8
    }

    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        from_slices::<cfb_mode::Encryptor<TdesEde3>>(key, iv)?.encrypt(buf);
        Ok(())
    }

    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        from_slices::<cfb_mode::Decryptor<TdesEde3>>(key, iv)?.decrypt(buf);
        Ok(())
    }

    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(boxed(from_slices::<ofb::Ofb<TdesEde3>>(key, iv)?))
    }

    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        Ok(boxed(from_slices::<ctr::Ctr64BE<TdesEde3>>(key, iv)?))
    }
}

/// Blowfish takes a variable-length (1-56 byte) key, so it can't go through
/// `KeyIvInit::new_from_slices` directly (that requires a fixed key size at
/// the type level) — the block cipher is constructed on its own via
/// `KeyInit::new_from_slice`, then handed to the mode via `InnerIvInit`.
struct BlowfishFactory {
    salt: Option<Vec<u8>>,
}

impl BlowfishFactory {
    fn effective_key(&self, key: &[u8]) -> EngineResult<Vec<u8>> {
        match &self.salt {
            Some(salt) => salted_key(key, salt),
            None => Ok(key.to_vec()),
        }
    }
}

impl CipherFactory for BlowfishFactory {
    fn block_size(&self) -> usize {
        8
    }

    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        let key = self.effective_key(key)?;
        let inner = Blowfish::new_from_slice(&key).map_err(cipher_err)?;
        let mode =
            cfb_mode::Encryptor::<Blowfish>::inner_iv_slice_init(inner, iv).map_err(cipher_err)?;
        mode.encrypt(buf);
        Ok(())
    }

    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        let key = self.effective_key(key)?;
        let inner = Blowfish::new_from_slice(&key).map_err(cipher_err)?;
        let mode =
            cfb_mode::Decryptor::<Blowfish>::inner_iv_slice_init(inner, iv).map_err(cipher_err)?;
        mode.decrypt(buf);
        Ok(())
    }

    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        let key = self.effective_key(key)?;
        let inner = Blowfish::new_from_slice(&key).map_err(cipher_err)?;
        let mode = from_core::<ofb::OfbCore<Blowfish>>(inner, iv)?;
        Ok(boxed(mode))
    }

    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        let key = self.effective_key(key)?;
        let inner = Blowfish::new_from_slice(&key).map_err(cipher_err)?;
        let mode = from_core::<ctr::CtrCore<Blowfish, ctr::flavors::Ctr64BE>>(inner, iv)?;
        Ok(boxed(mode))
    }
}

/// Twofish accepts 16, 24, or 32-byte keys; like Blowfish its block cipher
/// is constructed independently of the mode wrapper.
struct TwofishFactory;

impl CipherFactory for TwofishFactory {
    fn block_size(&self) -> usize {
        16
    }

    fn cfb_encrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        let inner = Twofish::new_from_slice(key).map_err(cipher_err)?;
        let mode =
            cfb_mode::Encryptor::<Twofish>::inner_iv_slice_init(inner, iv).map_err(cipher_err)?;
        mode.encrypt(buf);
        Ok(())
    }

    fn cfb_decrypt(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> EngineResult<()> {
        let inner = Twofish::new_from_slice(key).map_err(cipher_err)?;
        let mode =
            cfb_mode::Decryptor::<Twofish>::inner_iv_slice_init(inner, iv).map_err(cipher_err)?;
        mode.decrypt(buf);
        Ok(())
    }

    fn ofb(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        let inner = Twofish::new_from_slice(key).map_err(cipher_err)?;
        let mode = from_core::<ofb::OfbCore<Twofish>>(inner, iv)?;
        Ok(boxed(mode))
    }

    fn ctr(&self, key: &[u8], iv: &[u8]) -> EngineResult<Box<dyn StreamCipher>> {
        let inner = Twofish::new_from_slice(key).map_err(cipher_err)?;
        let mode = from_core::<ctr::CtrCore<Twofish, ctr::flavors::Ctr128BE>>(inner, iv)?;
        Ok(boxed(mode))
    }
}

// Mode layer: pops (data, iv, key) in that order (key on top), builds the
// stream cipher via the factory, and XOR-key-streams the buffer in place.

fn cfb(e: &mut Engine, factory: &dyn CipherFactory) -> EngineResult<()> {
    let key = e.stack.pop();
    let iv = e.stack.pop();
    let plaintext = e.stack.pop();
    let (key, iv, plaintext) = match (key, iv, plaintext) {
        (Some(k), Some(i), Some(p)) => (k, i, p),
        _ => return Err(EngineError::MissingCipherInputs),
    };
    let mut buf = plaintext;
    factory.cfb_encrypt(&key, &iv, &mut buf)?;
    e.stack.push(buf);
    Ok(())
}

fn uncfb(e: &mut Engine, factory: &dyn CipherFactory) -> EngineResult<()> {
    let key = e.stack.pop();
    let iv = e.stack.pop();
    let ciphertext = e.stack.pop();
    let (key, iv, ciphertext) = match (key, iv, ciphertext) {
        (Some(k), Some(i), Some(c)) => (k, i, c),
        _ => return Err(EngineError::MissingCipherInputs),
    };
    let mut buf = ciphertext;
    factory.cfb_decrypt(&key, &iv, &mut buf)?;
    e.stack.push(buf);
    Ok(())
}

fn ofb_mode(e: &mut Engine, factory: &dyn CipherFactory) -> EngineResult<()> {
    let key = e.stack.pop();
    let iv = e.stack.pop();
    let text = e.stack.pop();
    let (key, iv, text) = match (key, iv, text) {
        (Some(k), Some(i), Some(t)) => (k, i, t),
        _ => return Err(EngineError::MissingCipherInputs),
    };
    let mut stream = factory.ofb(&key, &iv)?;
    let mut buf = text;
    stream.apply_keystream(&mut buf);
    e.stack.push(buf);
    Ok(())
}

fn ctr_mode(e: &mut Engine, factory: &dyn CipherFactory) -> EngineResult<()> {
    let key = e.stack.pop();
    let iv = e.stack.pop();
    let text = e.stack.pop();
    let (key, iv, text) = match (key, iv, text) {
        (Some(k), Some(i), Some(t)) => (k, i, t),
        _ => return Err(EngineError::MissingCipherInputs),
    };
    let mut stream = factory.ctr(&key, &iv)?;
    let mut buf = text;
    stream.apply_keystream(&mut buf);
    e.stack.push(buf);
    Ok(())
}

pub fn aes_cfb(e: &mut Engine) -> EngineResult<()> {
    cfb(e, &AesFactory)
}
pub fn unaes_cfb(e: &mut Engine) -> EngineResult<()> {
    uncfb(e, &AesFactory)
}
pub fn aes_ofb(e: &mut Engine) -> EngineResult<()> {
    ofb_mode(e, &AesFactory)
}
pub fn aes_ctr(e: &mut Engine) -> EngineResult<()> {
    ctr_mode(e, &AesFactory)
}
pub fn aes_blocksize(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(AesFactory.block_size().to_string().into_bytes());
    Ok(())
}

pub fn des_cfb(e: &mut Engine) -> EngineResult<()> {
    cfb(e, &DesFactory)
}
pub fn undes_cfb(e: &mut Engine) -> EngineResult<()> {
    uncfb(e, &DesFactory)
}
pub fn des_ofb(e: &mut Engine) -> EngineResult<()> {
    ofb_mode(e, &DesFactory)
}
pub fn des_ctr(e: &mut Engine) -> EngineResult<()> {
    ctr_mode(e, &DesFactory)
}
pub fn des_blocksize(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(DesFactory.block_size().to_string().into_bytes());
    Ok(())
}

pub fn tripledes_cfb(e: &mut Engine) -> EngineResult<()> {
    cfb(e, &TripleDesFactory)
}
pub fn untripledes_cfb(e: &mut Engine) -> EngineResult<()> {
    uncfb(e, &TripleDesFactory)
}
pub fn tripledes_ofb(e: &mut Engine) -> EngineResult<()> {
    ofb_mode(e, &TripleDesFactory)
}
pub fn tripledes_ctr(e: &mut Engine) -> EngineResult<()> {
    ctr_mode(e, &TripleDesFactory)
}

pub fn blowfish_cfb(e: &mut Engine) -> EngineResult<()> {
    cfb(e, &BlowfishFactory { salt: None })
}
pub fn unblowfish_cfb(e: &mut Engine) -> EngineResult<()> {
    uncfb(e, &BlowfishFactory { salt: None })
}
pub fn blowfish_ofb(e: &mut Engine) -> EngineResult<()> {
    ofb_mode(e, &BlowfishFactory { salt: None })
}
pub fn blowfish_ctr(e: &mut Engine) -> EngineResult<()> {
    ctr_mode(e, &BlowfishFactory { salt: None })
}
pub fn blowfish_blocksize(e: &mut Engine) -> EngineResult<()> {
    e.stack
        .push(BlowfishFactory { salt: None }.block_size().to_string().into_bytes());
    Ok(())
}

fn pop_salt(e: &mut Engine) -> EngineResult<Vec<u8>> {
    e.stack.pop().ok_or(EngineError::MissingCipherInputs)
}

pub fn blowfish_salt_cfb(e: &mut Engine) -> EngineResult<()> {
    let salt = pop_salt(e)?;
    cfb(e, &BlowfishFactory { salt: Some(salt) })
}
pub fn unblowfish_salt_cfb(e: &mut Engine) -> EngineResult<()> {
    let salt = pop_salt(e)?;
    uncfb(e, &BlowfishFactory { salt: Some(salt) })
}
pub fn blowfish_salt_ofb(e: &mut Engine) -> EngineResult<()> {
    let salt = pop_salt(e)?;
    ofb_mode(e, &BlowfishFactory { salt: Some(salt) })
}
pub fn blowfish_salt_ctr(e: &mut Engine) -> EngineResult<()> {
    let salt = pop_salt(e)?;
    ctr_mode(e, &BlowfishFactory { salt: Some(salt) })
}

pub fn twofish_cfb(e: &mut Engine) -> EngineResult<()> {
    cfb(e, &TwofishFactory)
}
pub fn untwofish_cfb(e: &mut Engine) -> EngineResult<()> {
    uncfb(e, &TwofishFactory)
}
pub fn twofish_ofb(e: &mut Engine) -> EngineResult<()> {
    ofb_mode(e, &TwofishFactory)
}
pub fn twofish_ctr(e: &mut Engine) -> EngineResult<()> {
    ctr_mode(e, &TwofishFactory)
}
pub fn twofish_blocksize(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(TwofishFactory.block_size().to_string().into_bytes());
    Ok(())
}
