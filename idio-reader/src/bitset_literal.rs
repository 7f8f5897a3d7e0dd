//! `#B{ size block* }` bitset literal grammar (spec §4.7 "Bitset literal
//! syntax"). The reader hands this module the whitespace-split tokens
//! between the braces; it owns none of the character-level scanning.

use idio_bitset::Bitset;

/// Parse `#B{ size block* }`'s token list (the first element must be the
/// decimal size) into a [`Bitset`].
pub fn parse(tokens: &[&str]) -> Result<Bitset, String> {
    let (size_tok, blocks) = tokens.split_first().ok_or_else(|| "empty bitset literal".to_string())?;
    let size: usize = size_tok
        .parse()
        .map_err(|_| format!("invalid bitset size {size_tok:?}"))?;
    let mut bitset = Bitset::new(size);
    let mut offset = 0usize;
    for block in blocks {
        offset = apply_block(&mut bitset, block, offset)?;
    }
    Ok(bitset)
}

fn apply_block(bitset: &mut Bitset, block: &str, running_offset: usize) -> Result<usize, String> {
    if let Some(dash) = block.find('-') {
        let (first, last) = (&block[..dash], &block[dash + 1..]);
        let first = usize::from_str_radix(first, 16).map_err(|_| format!("invalid range start {first:?}"))?;
        let last = usize::from_str_radix(last, 16).map_err(|_| format!("invalid range end {last:?}"))?;
        if first > last {
            return Err("range start > range end".to_string());
        }
        if last > bitset.size() {
            return Err(format!("range end {last} exceeds bitset size {}", bitset.size()));
        }
        for bit in first..=last.min(bitset.size().saturating_sub(1)) {
            bitset.set(bit).map_err(|e| e.to_string())?;
        }
        return Ok(last + 1);
    }
    if let Some(colon) = block.find(':') {
        let (offset_tok, bits) = (&block[..colon], &block[colon + 1..]);
        let offset = usize::from_str_radix(offset_tok, 16)
            .map_err(|_| format!("invalid bitset offset {offset_tok:?}"))?;
        if offset % 8 != 0 {
            return Err(format!("offset {offset} is not a byte boundary"));
        }
        set_bits_msb_first(bitset, offset, bits)?;
        return Ok(offset + bits.len());
    }
    set_bits_msb_first(bitset, running_offset, block)?;
    Ok(running_offset + block.len())
}

/// Interpret `bits` (1-8 `0`/`1` characters) as a most-significant-bit-first
/// byte value and set the corresponding bits starting at `base`.
fn set_bits_msb_first(bitset: &mut Bitset, base: usize, bits: &str) -> Result<(), String> {
    if bits.is_empty() || bits.len() > 8 {
        return Err(format!("bitset block {bits:?} must be 1-8 bits"));
    }
    let len = bits.len();
    for (j, c) in bits.chars().enumerate() {
        let set = match c {
            '0' => false,
            '1' => true,
            _ => return Err(format!("invalid bit character {c:?}")),
        };
        if set {
            let target = base + (len - 1 - j);
            bitset.set(target).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_example_sets_expected_bits() {
        let bitset = parse(&["16", "0:10101010", "8-F"]).unwrap();
        let mut seen = Vec::new();
        bitset.for_each_set(|i| seen.push(i));
        assert_eq!(seen, vec![1, 3, 5, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn reversed_range_is_an_error() {
        let err = parse(&["3", "1-0"]).unwrap_err();
        assert_eq!(err, "range start > range end");
    }

    #[test]
    fn running_offset_default_block_advances() {
        let bitset = parse(&["8", "1111"]).unwrap();
        let mut seen = Vec::new();
        bitset.for_each_set(|i| seen.push(i));
        // "1111" MSB-first over 4 bits starting at offset 0 -> bits 3,2,1,0.
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
