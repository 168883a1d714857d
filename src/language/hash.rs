//! Deterministic structural hashing.
//!
//! These hashes are used as map keys and as the equality test when matching
//! patterns by value, so they must come out the same in every process: no
//! addresses, no random seeds, and the order of children matters.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const CHILD_MIX: u64 = 0xabcd_ef01_2345_6789;
const VALUE_MIX: u64 = 0x3141_5926_5358_9793;

/// FNV-1a over the bytes of a string.
pub fn hash_str(text: &str) -> u64 {
    text.bytes()
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
        })
}

/// Fold one child's hash into the running hash. Not commutative, so
/// swapping two children changes the result.
pub fn mix_child(hash: u64, child: u64) -> u64 {
    (hash ^ CHILD_MIX)
        .rotate_left(29)
        .wrapping_mul(FNV_PRIME)
        .wrapping_add(child)
}

pub fn mix_value(hash: u64, value: u64) -> u64 {
    hash ^ (hash ^ VALUE_MIX)
        .rotate_right(7)
        .wrapping_add(value)
}

/// Combining step for sequences of already-hashed items, used for automaton
/// substates.
pub fn mix_pair(a: u64, b: u64) -> u64 {
    (a.wrapping_add(0x1a2b_3c4d_5e6f_7081) ^ b)
        .wrapping_mul(b.rotate_left(23) | 1)
}
