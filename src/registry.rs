//! The primitive dispatch table: name -> (stack-shape docs, implementation).
//!
//! Built once as a process-wide static; every engine instance dispatches
//! against the same table rather than rebuilding it per token or per
//! request.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::engine::Engine;
use crate::error::EngineResult;
use crate::primitives::{checksum, cipher, compress, control, encode, hash};

pub struct PrimitiveInfo {
    pub input: &'static str,
    pub output: &'static str,
    pub desc: &'static str,
    pub run: fn(&mut Engine) -> EngineResult<()>,
}

macro_rules! prim {
    ($map:expr, $name:expr, $f:expr, $in:expr, $out:expr, $desc:expr) => {
        $map.insert(
            $name,
            PrimitiveInfo {
                input: $in,
                output: $out,
                desc: $desc,
                run: $f,
            },
        );
    };
}

lazy_static! {
    pub static ref REGISTRY: HashMap<&'static str, PrimitiveInfo> = {
        let mut m = HashMap::new();

        // hashing
        prim!(m, "md5", hash::md5, "Data", "Hash", "Hashes data using MD5");
        prim!(m, "sha1", hash::sha1, "Data", "Hash", "Hashes data using SHA1");
        prim!(m, "sha224", hash::sha224, "Data", "Hash", "Hashes data using SHA224");
        prim!(m, "sha256", hash::sha256, "Data", "Hash", "Hashes data using SHA256");
        prim!(m, "sha384", hash::sha384, "Data", "Hash", "Hashes data using SHA384");
        prim!(m, "sha512", hash::sha512, "Data", "Hash", "Hashes data using SHA512");
        prim!(m, "ripemd160", hash::ripemd160, "Data", "Hash", "Hashes data using RIPEMD160");
        prim!(m, "rand", hash::rand, "Count", "Data", "Generates cryptographically random bytes given the count on the stack");

        prim!(m, "md5-len", hash::md5_len, "", "16", "Returns the number of bytes for MD5");
        prim!(m, "sha1-len", hash::sha1_len, "", "20", "Returns the number of bytes for SHA1");
        prim!(m, "sha224-len", hash::sha224_len, "", "28", "Returns the number of bytes for SHA224");
        prim!(m, "sha256-len", hash::sha256_len, "", "32", "Returns the number of bytes for SHA256");
        prim!(m, "sha384-len", hash::sha384_len, "", "48", "Returns the number of bytes for SHA384");
        prim!(m, "sha512-len", hash::sha512_len, "", "64", "Returns the number of bytes for SHA512");
        prim!(m, "ripemd160-len", hash::ripemd160_len, "", "20", "Returns the number of bytes for RIPEMD160");

        // HMAC
        prim!(m, "hmac-md5", hash::hmac_md5, "Data, Key", "Hash", "HMAC hashes data using MD5");
        prim!(m, "hmac-sha1", hash::hmac_sha1, "Data, Key", "Hash", "HMAC hashes data using SHA1");
        prim!(m, "hmac-sha224", hash::hmac_sha224, "Data, Key", "Hash", "HMAC hashes data using SHA224");
        prim!(m, "hmac-sha256", hash::hmac_sha256, "Data, Key", "Hash", "HMAC hashes data using SHA256");
        prim!(m, "hmac-sha384", hash::hmac_sha384, "Data, Key", "Hash", "HMAC hashes data using SHA384");
        prim!(m, "hmac-sha512", hash::hmac_sha512, "Data, Key", "Hash", "HMAC hashes data using SHA512");
        prim!(m, "hmac-ripemd160", hash::hmac_ripemd160, "Data, Key", "Hash", "HMAC hashes data using RIPEMD160");

        // encoding
        prim!(m, "hex", encode::hex, "Data", "EncodedData", "Encode the data to hex");
        prim!(m, "unhex", encode::unhex, "EncodedData", "Data", "Decode the data from hex");
        prim!(m, "ascii85", encode::ascii85, "Data", "EncodedData", "Encode the data to ascii-85");
        prim!(m, "unascii85", encode::unascii85, "EncodedData", "Data", "Decode the data from ascii-85");
        prim!(m, "base32", encode::base32, "Data", "EncodedData", "Encode the data to base32");
        prim!(m, "unbase32", encode::unbase32, "EncodedData", "Data", "Decode the data from base32");
        prim!(m, "base32-hex", encode::base32_hex, "Data", "EncodedData", "Encode the data to base32 hex");
        prim!(m, "unbase32-hex", encode::unbase32_hex, "EncodedData", "Data", "Decode the data from base32 hex");
        prim!(m, "base64", encode::base64, "Data", "EncodedData", "Encode the data to base64");
        prim!(m, "unbase64", encode::unbase64, "EncodedData", "Data", "Decode the data from base64");
        prim!(m, "base64-url", encode::base64_url, "Data", "EncodedData", "Encode the data to base64 url");
        prim!(m, "unbase64-url", encode::unbase64_url, "EncodedData", "Data", "Decode the data from base64 url");

        // checksums
        prim!(m, "adler32", checksum::adler32, "Data", "Checksum", "Compute the Adler-32 checksum");
        prim!(m, "crc32", checksum::crc32, "Data", "Checksum", "Compute the CRC-32 checksum using the IEEE polynomial");
        prim!(m, "crc32-ieee", checksum::crc32_ieee, "Data", "Checksum", "Compute the CRC-32 checksum using the IEEE polynomial");
        prim!(m, "crc32-castagnoli", checksum::crc32_castagnoli, "Data", "Checksum", "Compute the CRC-32 checksum using the Castagnoli polynomial");
        prim!(m, "crc32-koopman", checksum::crc32_koopman, "Data", "Checksum", "Compute the CRC-32 checksum using the Koopman polynomial");
        prim!(m, "crc64-iso", checksum::crc64_iso, "Data", "Checksum", "Compute the CRC-64 checksum using the ISO polynomial");
        prim!(m, "crc64-ecma", checksum::crc64_ecma, "Data", "Checksum", "Compute the CRC-64 checksum using the ECMA polynomial");
        prim!(m, "fnv32", checksum::fnv32, "Data", "Hash", "Compute the FNV-1 non-cryptographic hash for 32-bits");
        prim!(m, "fnv32a", checksum::fnv32a, "Data", "Hash", "Compute the FNV-1a non-cryptographic hash for 32-bits");
        prim!(m, "fnv64", checksum::fnv64, "Data", "Hash", "Compute the FNV-1 non-cryptographic hash for 64-bits");
        prim!(m, "fnv64a", checksum::fnv64a, "Data", "Hash", "Compute the FNV-1a non-cryptographic hash for 64-bits");

        // compression
        prim!(m, "snappy", compress::snappy, "Data", "Compressed", "Compresses data using the Snappy algorithm");
        prim!(m, "unsnappy", compress::unsnappy, "Compressed", "Data", "Decompresses data using the Snappy algorithm");
        prim!(m, "zlib", compress::zlib, "Data", "Compressed", "Compresses data using the zlib algorithm");
        prim!(m, "unzlib", compress::unzlib, "Compressed", "Data", "Decompresses data using the zlib algorithm");
        prim!(m, "deflate", compress::deflate, "Data, Factor", "Compressed", "Compresses data using the flate algorithm - stack contains a compression factor where -1 is default and 0-9 controls compression (0 is none, and 9 is the most)");
        prim!(m, "inflate", compress::inflate, "Compressed", "Data", "Decompresses data using the flate algorithm");
        prim!(m, "gzip", compress::gzip, "Data, Factor", "Compressed", "Compresses data using the gzip algorithm - stack contains a compression factor where -1 is default, 0 is none, 1 is best speed, and 9 is best size");
        prim!(m, "ungzip", compress::ungzip, "Compressed", "Data", "Decompresses data using the gzip algorithm");
        prim!(m, "unbzip2", compress::unbzip2, "Compressed", "Data", "Decompresses data using the bzip2 algorithm");
        prim!(m, "lzw-msb", compress::lzw_msb, "Data, Bits", "Compressed", "Compresses data using the lzw algorithm with most significant bit ordering, as used in TIFF and PDF");
        prim!(m, "lzw-lsb", compress::lzw_lsb, "Data, Bits", "Compressed", "Compresses data using the lzw algorithm with least significant bit ordering, as used in GIF");
        prim!(m, "unlzw-msb", compress::unlzw_msb, "Compressed, Bits", "Data", "Decompresses data using the lzw algorithm with most significant bit ordering, as used in TIFF and PDF");
        prim!(m, "unlzw-lsb", compress::unlzw_lsb, "Compressed, Bits", "Data", "Decompresses data using the lzw algorithm with least significant bit ordering, as used in GIF");

        // control
        prim!(m, "push", control::push, "Data", "Data, Data", "Duplicates the value on the top of the stack");
        prim!(m, "pop", control::pop, "Data", "", "Pops the value off the top of the stack (effectively discarding)");
        prim!(m, "load", control::load, "Name", "Value", "Pushes a named value from the dictionary onto the stack");
        prim!(m, "save", control::save, "Value, Name", "", "Pops a value from the stack and places it into the dictionary");
        prim!(m, "swap", control::swap, "Val1, Val2", "Val2, Val1", "Swaps the two values at the top of the stack");
        prim!(m, "append", control::append, "Val1, Val2", "Appended", "Appends the value on the top of the stack to the previous value on the stack");
        prim!(m, "slice", control::slice, "Data, Start, End", "SliceOfData", "Slices the value on the stack, taking elements from start to end. Use -1 for values from the beginning or end.");
        prim!(m, "len", control::len, "Data", "Data, Length", "Pushes the length of the value on the stack in bytes onto the stack");
        prim!(m, "left", control::left, "Data, Count", "SliceOfData", "Takes the leftmost bytes of data");
        prim!(m, "right", control::right, "Data, Count", "SliceOfData", "Takes the rightmost bytes of data");
        prim!(m, "snip", control::snip, "Data, Position", "Data1, Data2", "Snips the data in two at the given position, resulting in two values on the stack");
        prim!(m, "eq", control::eq, "Data1, Data2", "", "Fails the command unless the two data elements are equal");
        prim!(m, "neq", control::neq, "Data1, Data2", "", "Fails the command unless the two data elements are not equal");
        prim!(m, "call", control::call, "Name", "(varies)", "Loads the named recipe from the dictionary and executes the pipeline contained there");

        // ciphers
        prim!(m, "aes-cfb", cipher::aes_cfb, "PlainData, IV, Key", "CipherData", "Encrypts data using AES in CFB mode with a 16, 24, or 32-byte key");
        prim!(m, "unaes-cfb", cipher::unaes_cfb, "CipherData, IV, Key", "PlainData", "Decrypts data using AES in CFB mode with a 16, 24, or 32-byte key");
        prim!(m, "aes-ofb", cipher::aes_ofb, "Data, IV, Key", "RData", "Encrypts or decrypts data using AES in OFB mode");
        prim!(m, "aes-ctr", cipher::aes_ctr, "Data, IV, Key", "RData", "Encrypts or decrypts data using AES in CTR mode");
        prim!(m, "aes-blocksize", cipher::aes_blocksize, "", "16", "Pushes the AES block size on the stack");

        prim!(m, "des-cfb", cipher::des_cfb, "PlainData, IV, Key", "CipherData", "Encrypts data using DES in CFB mode with an 8-byte key");
        prim!(m, "undes-cfb", cipher::undes_cfb, "CipherData, IV, Key", "PlainData", "Decrypts data using DES in CFB mode with an 8-byte key");
        prim!(m, "des-ofb", cipher::des_ofb, "Data, IV, Key", "RData", "Encrypts or decrypts data using DES in OFB mode");
        prim!(m, "des-ctr", cipher::des_ctr, "Data, IV, Key", "RData", "Encrypts or decrypts data using DES in CTR mode");
        prim!(m, "des-blocksize", cipher::des_blocksize, "", "8", "Pushes the DES block size on the stack");

        prim!(m, "3des-cfb", cipher::tripledes_cfb, "PlainData, IV, Key", "CipherData", "Encrypts data using Triple DES in CFB mode with a 24-byte key");
        prim!(m, "un3des-cfb", cipher::untripledes_cfb, "CipherData, IV, Key", "PlainData", "Decrypts data using Triple DES in CFB mode with a 24-byte key");
        prim!(m, "3des-ofb", cipher::tripledes_ofb, "Data, IV, Key", "RData", "Encrypts or decrypts data using Triple DES in OFB mode");
        prim!(m, "3des-ctr", cipher::tripledes_ctr, "Data, IV, Key", "RData", "Encrypts or decrypts data using Triple DES in CTR mode");
        prim!(m, "3des-blocksize", cipher::des_blocksize, "", "8", "Pushes the Triple DES block size on the stack");

        prim!(m, "blowfish-cfb", cipher::blowfish_cfb, "PlainData, IV, Key", "CipherData", "Encrypts data using Blowfish in CFB mode with a 1 to 56-byte key");
        prim!(m, "unblowfish-cfb", cipher::unblowfish_cfb, "CipherData, IV, Key", "PlainData", "Decrypts data using Blowfish in CFB mode with a 1 to 56-byte key");
        prim!(m, "blowfish-ofb", cipher::blowfish_ofb, "Data, IV, Key", "RData", "Encrypts or decrypts data using Blowfish in OFB mode");
        prim!(m, "blowfish-ctr", cipher::blowfish_ctr, "Data, IV, Key", "RData", "Encrypts or decrypts data using Blowfish in CTR mode");
        prim!(m, "blowfish-blocksize", cipher::blowfish_blocksize, "", "8", "Pushes the Blowfish block size on the stack");

        prim!(m, "blowfish-salt-cfb", cipher::blowfish_salt_cfb, "PlainData, IV, Key, Salt", "CipherData", "Encrypts data using salted Blowfish in CFB mode");
        prim!(m, "unblowfish-salt-cfb", cipher::unblowfish_salt_cfb, "CipherData, IV, Key, Salt", "PlainData", "Decrypts data using salted Blowfish in CFB mode");
        prim!(m, "blowfish-salt-ofb", cipher::blowfish_salt_ofb, "Data, IV, Key, Salt", "RData", "Encrypts or decrypts data using salted Blowfish in OFB mode");
        prim!(m, "blowfish-salt-ctr", cipher::blowfish_salt_ctr, "Data, IV, Key, Salt", "RData", "Encrypts or decrypts data using salted Blowfish in CTR mode");

        prim!(m, "twofish-cfb", cipher::twofish_cfb, "PlainData, IV, Key", "CipherData", "Encrypts data using Twofish in CFB mode with a 16, 24, or 32-byte key");
        prim!(m, "untwofish-cfb", cipher::untwofish_cfb, "CipherData, IV, Key", "PlainData", "Decrypts data using Twofish in CFB mode with a 16, 24, or 32-byte key");
        prim!(m, "twofish-ofb", cipher::twofish_ofb, "Data, IV, Key", "RData", "Encrypts or decrypts data using Twofish in OFB mode");
        prim!(m, "twofish-ctr", cipher::twofish_ctr, "Data, IV, Key", "RData", "Encrypts or decrypts data using Twofish in CTR mode");
        prim!(m, "twofish-blocksize", cipher::twofish_blocksize, "", "16", "Pushes the Twofish block size on the stack");

        m
    };
}

pub fn lookup(name: &str) -> Option<&'static PrimitiveInfo> {
    REGISTRY.get(name)
}
