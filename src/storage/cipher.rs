// Keystream Cipher Module
//
// Byte-wise XOR of data against a cyclically repeated key. The transform is
// its own inverse, so the same call encrypts and decrypts.
//
// This is obfuscation, NOT cryptography: a repeating-key XOR offers no
// real confidentiality and must not be relied on to protect sensitive data.

/// XOR `data` in place against the key, repeating the key cyclically:
/// `data[i] ^= key[i % key.len()]`.
///
/// The key must be non-empty; callers validate this before invoking.
pub fn apply_keystream(data: &mut [u8], key: &[u8]) {
    debug_assert!(!key.is_empty(), "keystream key must be non-empty");
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}
