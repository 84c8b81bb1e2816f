/* src/server/engine/rust/src/hash.rs */

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Standard FNV-1a 64-bit hash.
pub fn fnv1a_64(input: &str) -> u64 {
  let mut hash = FNV_OFFSET;
  for byte in input.bytes() {
    hash ^= u64::from(byte);
    hash = hash.wrapping_mul(FNV_PRIME);
  }
  hash
}

/// Serialized content -> 16 hex chars.
pub fn content_hash(serialized: &str) -> String {
  format!("{:016x}", fnv1a_64(serialized))
}
