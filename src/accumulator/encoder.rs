//! Maps arbitrary byte-strings to [Num3072] group elements.
//!
//! The element is hashed with SHA-256, and the digest is used as a ChaCha20 key. The first 384
//! bytes of keystream (zero nonce, block counter starting at zero) are read as a little-endian
//! 3072-bit integer. Every 3072-bit integer is an acceptable representative, so there is nothing
//! to reject and the mapping always finishes after one pass. The only residue without an inverse
//! is zero, which would need a keystream equal to `0` or `M`.
//!
//! This is consensus critical: a node comparing its UTXO set hash with ours runs exactly
//! these steps.
use bitcoin_hashes::sha256;
use bitcoin_hashes::Hash;
use rand_chacha::rand_core::RngCore;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::num3072::Num3072;
use super::num3072::BYTE_SIZE;

/// Maps `element` to its group element. Any length is accepted, including empty input.
/// # Example
/// ```
/// use muhash::accumulator::encoder::encode;
/// let a = encode(b"some utxo");
/// assert_eq!(a, encode(b"some utxo"));
/// assert_ne!(a, encode(b"another utxo"));
/// ```
pub fn encode(element: &[u8]) -> Num3072 {
    let key = sha256::Hash::hash(element).to_byte_array();
    Num3072::from_le_bytes(&keystream(key))
}

/// 384 bytes of ChaCha20 keystream under `key`. [ChaCha20Rng] seeded with a key and left on
/// stream zero emits exactly the cipher's keystream, word by word in little-endian order.
fn keystream(key: [u8; 32]) -> [u8; BYTE_SIZE] {
    let mut cipher = ChaCha20Rng::from_seed(key);
    let mut bytes = [0; BYTE_SIZE];
    cipher.fill_bytes(&mut bytes);
    bytes
}
