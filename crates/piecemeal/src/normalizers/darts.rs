//! # Precompiled Character Map
//!
//! Models ship their normalization rules as a serialized double-array trie:
//!
//! ```text
//! [u32 LE: trie_len] [trie_len bytes: u32 LE units] [NUL-terminated replacements...]
//! ```
//!
//! Each trie key maps to a byte offset into the replacement blob.
//! The whole trie is walked once at load time, and every key, offset and
//! replacement is validated; the rules are then held in our own trie.

use crate::{
    alloc::{format, string::String, vec, vec::Vec},
    errors::{PMError, PMResult},
};

/// The longest rule key accepted, in bytes.
///
/// Real maps key on a few code points; a deeper walk means a corrupt trie.
pub const MAX_KEY_LEN: usize = 64;

#[inline(always)]
fn has_leaf(unit: u32) -> bool {
    (unit >> 8) & 1 == 1
}

#[inline(always)]
fn value(unit: u32) -> u32 {
    unit & ((1 << 31) - 1)
}

#[inline(always)]
fn label(unit: u32) -> u32 {
    unit & ((1 << 31) | 0xFF)
}

#[inline(always)]
fn offset(unit: u32) -> u32 {
    (unit >> 10) << ((unit & (1 << 9)) >> 6)
}

/// Decode a precompiled character map into ``(source, replacement)`` rules.
///
/// ## Arguments
/// * `blob` - The ``precompiled_charsmap`` bytes of a normalizer spec.
///
/// ## Returns
/// Every rule in the map, in key order; or
/// [`PMError::MalformedModel`] if any part of the map is out of bounds,
/// cyclic, or not UTF-8; or if any key exceeds [`MAX_KEY_LEN`].
pub fn decode_charsmap(blob: &[u8]) -> PMResult<Vec<(String, String)>> {
    let header: [u8; 4] = blob
        .get(..4)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| PMError::malformed("charsmap: missing trie size header"))?;
    let trie_len = u32::from_le_bytes(header) as usize;

    let body = &blob[4..];
    if trie_len > body.len() || trie_len % 4 != 0 || trie_len == 0 {
        return Err(PMError::malformed(format!(
            "charsmap: trie size {trie_len} is invalid for a {} byte blob",
            blob.len()
        )));
    }

    let units: Vec<u32> = body[..trie_len]
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let strings = &body[trie_len..];

    let mut rules = Vec::new();

    // Each unit is the child of at most one node; so a sound trie pushes
    // at most `units.len()` nodes.
    let mut pushes = 1_usize;

    // (base, key)
    let mut stack: Vec<(usize, Vec<u8>)> = vec![(offset(units[0]) as usize, Vec::new())];
    while let Some((base, key)) = stack.pop() {
        // Reverse order, so that the stack pops children in ascending byte order.
        for byte in (1..=255_u8).rev() {
            let pos = base ^ byte as usize;
            let Some(&unit) = units.get(pos) else {
                continue;
            };
            if label(unit) != byte as u32 {
                continue;
            }

            pushes += 1;
            if pushes > units.len() {
                return Err(PMError::malformed("charsmap: trie contains a cycle"));
            }
            if key.len() >= MAX_KEY_LEN {
                return Err(PMError::malformed(format!(
                    "charsmap: rule key exceeds {MAX_KEY_LEN} bytes"
                )));
            }

            let child_base = pos ^ offset(unit) as usize;
            let mut child_key = key.clone();
            child_key.push(byte);

            if has_leaf(unit) {
                let leaf = units.get(child_base).copied().ok_or_else(|| {
                    PMError::malformed(format!("charsmap: leaf index {child_base} out of bounds"))
                })?;
                let replacement = read_replacement(strings, value(leaf) as usize)?;
                let source = String::from_utf8(child_key.clone())
                    .map_err(|_| PMError::malformed("charsmap: rule key is not UTF-8"))?;
                rules.push((source, replacement));
            }

            stack.push((child_base, child_key));
        }
    }

    rules.sort();
    Ok(rules)
}

fn read_replacement(
    strings: &[u8],
    start: usize,
) -> PMResult<String> {
    let tail = strings.get(start..).ok_or_else(|| {
        PMError::malformed(format!(
            "charsmap: replacement offset {start} out of bounds"
        ))
    })?;
    let end = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| PMError::malformed("charsmap: replacement is not NUL-terminated"))?;
    core::str::from_utf8(&tail[..end])
        .map(String::from)
        .map_err(|_| PMError::malformed("charsmap: replacement is not UTF-8"))
}

/// Compile rules into a precompiled character map.
///
/// This builds a plain (non-minimized) double array; it is the inverse of
/// [`decode_charsmap`], and is used to build models in memory.
///
/// ## Arguments
/// * `rules` - ``(source, replacement)`` pairs; sources must be non-empty
///   and must not contain NUL.
#[cfg(any(test, feature = "testing"))]
pub fn compile_charsmap(rules: &[(&str, &str)]) -> Vec<u8> {
    use crate::alloc::collections::BTreeMap;

    #[derive(Default)]
    struct Node {
        children: BTreeMap<u8, usize>,
        value: Option<u32>,
    }

    // Replacement blob, and the key trie.
    let mut strings: Vec<u8> = Vec::new();
    let mut nodes: Vec<Node> = vec![Node::default()];
    for (source, replacement) in rules {
        assert!(!source.is_empty() && !source.as_bytes().contains(&0));
        let value = strings.len() as u32;
        strings.extend_from_slice(replacement.as_bytes());
        strings.push(0);

        let mut node = 0;
        for &b in source.as_bytes() {
            node = match nodes[node].children.get(&b) {
                Some(&next) => next,
                None => {
                    nodes.push(Node::default());
                    let next = nodes.len() - 1;
                    nodes[node].children.insert(b, next);
                    next
                }
            };
        }
        nodes[node].value = Some(value);
    }

    // Place each node's children (and its leaf, at label 0) at ``base ^ label``.
    let mut units: Vec<u32> = vec![0];
    let mut used: Vec<bool> = vec![true];
    // Bases must be unique, or one node's probe could hit another's child.
    let mut used_bases: Vec<usize> = Vec::new();
    let mut queue: Vec<(usize, usize)> = vec![(0, 0)];
    while let Some((node_idx, pos)) = queue.pop() {
        let node = &nodes[node_idx];
        let mut labels: Vec<usize> = node.children.keys().map(|&b| b as usize).collect();
        if node.value.is_some() {
            labels.push(0);
        }
        if labels.is_empty() {
            continue;
        }

        let base = (1..)
            .find(|&base: &usize| {
                !used_bases.contains(&base)
                    && labels
                        .iter()
                        .all(|&l| !used.get(base ^ l).copied().unwrap_or(false))
            })
            .unwrap();
        used_bases.push(base);

        let needed = labels.iter().map(|&l| base ^ l).max().unwrap() + 1;
        if needed > units.len() {
            units.resize(needed, 0);
            used.resize(needed, false);
        }

        let node_offset = (pos ^ base) as u32;
        assert!(node_offset < (1 << 21));
        units[pos] |= node_offset << 10;

        if let Some(value) = node.value {
            units[base] = value | (1 << 31);
            used[base] = true;
        }
        for (&b, &child) in &node.children {
            let child_pos = base ^ b as usize;
            let mut unit = b as u32;
            if nodes[child].value.is_some() {
                unit |= 1 << 8;
            }
            units[child_pos] = unit;
            used[child_pos] = true;
            queue.push((child, child_pos));
        }
    }

    let mut blob = Vec::new();
    blob.extend_from_slice(&((units.len() * 4) as u32).to_le_bytes());
    for unit in units {
        blob.extend_from_slice(&unit.to_le_bytes());
    }
    blob.extend_from_slice(&strings);
    blob
}
