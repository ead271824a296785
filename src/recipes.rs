//! Populates the variable store with the built-in recipes that higher-level
//! operations (signing, encryption) are composed from. The exact token
//! sequences are part of the wire contract: clients may depend on the
//! resulting ciphertext/signature layout, so these strings must match the
//! reference implementation byte-for-byte.

use crate::store::VariableStore;

const DEFAULT_KEY: &str = "& fri3d Gr33n tomat0s wiTh g0rill4_glu3 sauce!";

const HASHES: &[&str] = &[
    "md5",
    "sha1",
    "sha224",
    "sha256",
    "sha384",
    "sha512",
    "ripemd160",
];

const CIPHERS: &[(&str, &str)] = &[
    ("twofish", "sha256"),
    ("blowfish", "sha256"),
    ("aes", "md5"),
    ("des", "crc64-iso"),
    ("3des", "push/md5/swap/crc64-iso/append"),
];

fn hmac_recipe(alg: &str) -> Vec<u8> {
    format!("/key/load/{alg}/hmac-{alg}").into_bytes()
}

fn encrypt_recipe(alg: &str, hash: &str) -> Vec<u8> {
    format!("/{alg}-blocksize/rand/push/iv/save/key/load/{hash}/{alg}-cfb/iv/load/swap/append")
        .into_bytes()
}

fn decrypt_recipe(alg: &str, hash: &str) -> Vec<u8> {
    format!("/{alg}-blocksize/snip/swap/key/load/{hash}/un{alg}-cfb").into_bytes()
}

fn sign_recipe(alg: &str) -> Vec<u8> {
    format!("/push/hash-hmac-{alg}/call/swap/append").into_bytes()
}

fn checksig_recipe(alg: &str) -> Vec<u8> {
    format!("/{alg}-len/snip/swap/temp/save/push/hash-hmac-{alg}/call/temp/load/eq").into_bytes()
}

pub fn seed(store: &mut VariableStore) {
    store.set("key", DEFAULT_KEY.as_bytes().to_vec());

    for &(alg, hash) in CIPHERS {
        store.set(&format!("encrypt-{alg}"), encrypt_recipe(alg, hash));
        store.set(&format!("decrypt-{alg}"), decrypt_recipe(alg, hash));
    }

    for &alg in HASHES {
        store.set(&format!("hash-hmac-{alg}"), hmac_recipe(alg));
        store.set(&format!("sign-{alg}"), sign_recipe(alg));
        store.set(&format!("checksig-{alg}"), checksig_recipe(alg));
    }

    for &(alg, _) in CIPHERS {
        store.set(
            &format!("encrypt-sign-{alg}"),
            format!("/encrypt-{alg}/call/sign-sha256/call").into_bytes(),
        );
        store.set(
            &format!("decrypt-sign-{alg}"),
            format!("/checksig-sha256/call/decrypt-{alg}/call").into_bytes(),
        );
    }
}
