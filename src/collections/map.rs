//! Immutable hash-ordered map.
//!
//! A map is a Node of kind Map whose children are KeyValuePair nodes kept
//! sorted by the structural hash of their keys. Keys with equal hashes sit
//! next to each other and are told apart by structural comparison.

use crate::language::{Fragments, Kind, Location, Node, RuntimeError, Value};

pub fn empty_map(location: Location) -> Node {
    Node::with_hashing(
        Kind::Map,
        vec![],
        Value::None,
        Fragments::new("[", "]").joined(", "),
        location,
        false,
        true,
    )
}

pub fn is_map(node: &Node) -> bool {
    node.kind() == Kind::Map
}

fn pair(key: Node, value: Node) -> Node {
    let location = key
        .location()
        .clone();
    Node::with_hashing(
        Kind::KeyValuePair,
        vec![key, value],
        Value::None,
        Fragments::default().joined(": "),
        location,
        true,
        false,
    )
}

fn key_of(entry: &Node) -> &Node {
    &entry.children()[0]
}

fn checked<'m>(map: &'m Node, operation: &'static str) -> Result<&'m [Node], RuntimeError> {
    if is_map(map) {
        Ok(map.children())
    } else {
        Err(RuntimeError::NotAMap(
            map.location()
                .clone(),
            operation,
        ))
    }
}

fn key_hash(key: &Node) -> Result<u64, RuntimeError> {
    key.hash()
        .ok_or_else(|| {
            RuntimeError::Unhashable(
                key.location()
                    .clone(),
            )
        })
}

/// Index of the entry for `key`, or where it would be inserted.
fn locate(entries: &[Node], key: &Node, hash: u64) -> Result<usize, usize> {
    let first = entries.partition_point(|entry| {
        key_of(entry)
            .hash()
            .unwrap_or(0)
            < hash
    });

    let mut index = first;
    while let Some(entry) = entries.get(index) {
        let candidate = key_of(entry);
        if candidate.hash() != Some(hash) {
            break;
        }
        if candidate.same_structure(key) {
            return Ok(index);
        }
        index += 1;
    }
    Err(index)
}

/// Look up `key`, returning the stored value if present.
pub fn get<'m>(map: &'m Node, key: &Node) -> Result<Option<&'m Node>, RuntimeError> {
    let entries = checked(map, "get from")?;
    let hash = key_hash(key)?;

    Ok(locate(entries, key, hash)
        .ok()
        .map(|index| &entries[index].children()[1]))
}

/// A copy of `map` with `key` bound to `value`, replacing any previous
/// binding for a structurally equal key.
pub fn insert(map: &Node, key: Node, value: Node) -> Result<Node, RuntimeError> {
    let entries = checked(map, "insert into")?;
    let hash = key_hash(&key)?;

    let mut updated = entries.to_vec();
    match locate(entries, &key, hash) {
        Ok(index) => updated[index] = pair(key, value),
        Err(index) => updated.insert(index, pair(key, value)),
    }

    let mut result = map.clone();
    result.replace_children(updated);
    Ok(result)
}

pub fn insert_in_place(map: &mut Node, key: Node, value: Node) -> Result<(), RuntimeError> {
    *map = insert(map, key, value)?;
    Ok(())
}

/// A copy of `map` without `key`. Removing an absent key is not an error.
pub fn remove(map: &Node, key: &Node) -> Result<Node, RuntimeError> {
    let entries = checked(map, "remove from")?;
    let hash = key_hash(key)?;

    let mut result = map.clone();
    if let Ok(index) = locate(entries, key, hash) {
        let mut updated = entries.to_vec();
        updated.remove(index);
        result.replace_children(updated);
    }
    Ok(result)
}

pub fn remove_in_place(map: &mut Node, key: &Node) -> Result<(), RuntimeError> {
    *map = remove(map, key)?;
    Ok(())
}
