//! Parsing of the hex words found in struct logs.
//!
//! Clients disagree on formatting: some emit `0x`-prefixed compact words, others 64 unprefixed
//! digits. Everything here accepts both, in any case.

use alloy_primitives::{Address, B256, U256};

pub(crate) fn strip_0x(word: &str) -> &str {
    word.strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word)
}

fn is_hex(digits: &str) -> bool {
    digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Word as a byte count/offset, saturating at `usize::MAX`.
pub(crate) fn word_to_usize(word: &str) -> Option<usize> {
    let digits = strip_0x(word);
    if !is_hex(digits) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(0);
    }
    if significant.len() > 16 {
        return Some(usize::MAX);
    }
    let value = u64::from_str_radix(significant, 16).ok()?;
    Some(usize::try_from(value).unwrap_or(usize::MAX))
}

pub(crate) fn word_to_u256(word: &str) -> Option<U256> {
    let digits = strip_0x(word);
    if !is_hex(digits) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(significant, 16).ok()
}

/// Lowest `N` bytes of a word, left-padded with zeros when the word is shorter.
fn low_bytes<const N: usize>(word: &str) -> Option<[u8; N]> {
    let digits = strip_0x(word);
    if !is_hex(digits) {
        return None;
    }
    let tail = &digits[digits.len().saturating_sub(N * 2)..];
    let padded = format!("{tail:0>width$}", width = N * 2);
    let mut out = [0u8; N];
    hex::decode_to_slice(padded, &mut out).ok()?;
    Some(out)
}

/// Last 20 bytes of a word.
pub(crate) fn word_to_address(word: &str) -> Option<Address> {
    low_bytes::<20>(word).map(Address::from)
}

pub(crate) fn word_to_b256(word: &str) -> Option<B256> {
    low_bytes::<32>(word).map(B256::from)
}

/// Concatenates memory words into one lowercase hex string, or returns the first bad word.
pub(crate) fn concat_memory(words: &[String]) -> Result<String, &str> {
    let mut memory = String::with_capacity(words.len() * 64);
    for word in words {
        let digits = strip_0x(word);
        if !is_hex(digits) {
            return Err(word.as_str());
        }
        memory.push_str(&digits.to_ascii_lowercase());
    }
    Ok(memory)
}

/// `[offset*2, offset*2 + size*2)` of a hex string, clamped to its length.
pub(crate) fn slice_hex(memory: &str, offset: usize, size: usize) -> &str {
    let start = offset.saturating_mul(2).min(memory.len());
    let end = start.saturating_add(size.saturating_mul(2)).min(memory.len());
    &memory[start..end]
}

/// `0x`-prefixed, or empty for empty input.
pub(crate) fn prefixed(digits: &str) -> String {
    if digits.is_empty() {
        String::new()
    } else {
        format!("0x{digits}")
    }
}
