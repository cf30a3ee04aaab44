//! Keyed-list reorder engine.
//!
//! Given two sequences of items, computes a realigned version of the new
//! sequence whose positions maximize reuse of matched old items, plus the
//! move-set (removes and inserts) needed to turn the old order into the new
//! one. Runs in linear time over the common case; it deliberately trades
//! globally minimal edit scripts for single-pass behavior, which suits
//! frequent re-diffing of large lists.

use crate::value::Value;
use serde::Serialize;
use std::collections::HashMap;

/// A single removal in a move-set.
///
/// `from` is the index in the simulated intermediate array at the time of
/// removal; `key` is the removed item's key, or `None` for holes and free
/// items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveMove {
    pub from: usize,
    pub key: Option<String>,
}

/// A single insertion in a move-set. `to` is the target index in the final
/// array; the item is identified by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertMove {
    pub key: String,
    pub to: usize,
}

/// The removals and insertions transforming an old sequence's physical order
/// into the realigned order. Removes apply first, then inserts, in emitted
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveSet {
    pub removes: Vec<RemoveMove>,
    pub inserts: Vec<InsertMove>,
}

/// Result of [`reorder`]: the realigned new sequence and the optional
/// move-set.
///
/// `array` borrows items from the new sequence; `None` marks a hole, a
/// position whose old item was deleted. `moves` is `None` when the realigned
/// array alone expresses the change (no keys on either side, or deletions
/// only).
#[derive(Debug)]
pub struct Reordered<'a> {
    pub array: Vec<Option<&'a Value>>,
    pub moves: Option<MoveSet>,
}

struct KeyIndex<'a> {
    /// Key to item index. Keys must be unique within one sequence; that is a
    /// caller precondition, not checked here.
    keys: HashMap<&'a str, usize>,
    /// Indices of free (unkeyed) items, in order.
    free: Vec<usize>,
}

fn key_index(items: &[Value]) -> KeyIndex<'_> {
    let mut keys = HashMap::new();
    let mut free = Vec::new();

    for (i, item) in items.iter().enumerate() {
        match item.item_key() {
            Some(key) => {
                keys.insert(key, i);
            }
            None => free.push(i),
        }
    }

    KeyIndex { keys, free }
}

/// Reorders `b` against `a`, never mutating either input.
pub fn reorder<'a>(a: &'a [Value], b: &'a [Value]) -> Reordered<'a> {
    let b_index = key_index(b);
    if b_index.free.len() == b.len() {
        return Reordered {
            array: b.iter().map(Some).collect(),
            moves: None,
        };
    }

    let a_index = key_index(a);
    if a_index.free.len() == a.len() {
        return Reordered {
            array: b.iter().map(Some).collect(),
            moves: None,
        };
    }

    // Realign: walk the old order, pulling each matched new item into the
    // old item's position. Unmatched old positions become holes. Free items
    // pair up by availability order, never by value.
    let mut array: Vec<Option<&Value>> = Vec::with_capacity(a.len().max(b.len()));
    let mut free_index = 0;
    let free_count = b_index.free.len();
    let mut deleted_items = 0;

    for item in a {
        match item.item_key() {
            Some(key) => match b_index.keys.get(key) {
                Some(&idx) => array.push(Some(&b[idx])),
                None => {
                    deleted_items += 1;
                    array.push(None);
                }
            },
            None => {
                if free_index < free_count {
                    array.push(Some(&b[b_index.free[free_index]]));
                    free_index += 1;
                } else {
                    deleted_items += 1;
                    array.push(None);
                }
            }
        }
    }

    // Append new keyed items and the free items not consumed above. New
    // items land at the end here; the simulation below produces the inserts
    // that put them at their true positions.
    let last_free_index = if free_index >= b_index.free.len() {
        b.len()
    } else {
        b_index.free[free_index]
    };

    for (j, item) in b.iter().enumerate() {
        match item.item_key() {
            Some(key) => {
                if !a_index.keys.contains_key(key) {
                    array.push(Some(item));
                }
            }
            None => {
                if j >= last_free_index {
                    array.push(Some(item));
                }
            }
        }
    }

    // Simulate: replay the realigned array against b's order, recording the
    // removes and inserts needed to make the positions line up.
    let mut simulate = array.clone();
    let mut simulate_index = 0;
    let mut removes: Vec<RemoveMove> = Vec::new();
    let mut inserts: Vec<InsertMove> = Vec::new();
    let mut k = 0;

    while k < b.len() {
        let wanted_key = b[k].item_key();

        // Holes ahead of the cursor are plain removals.
        while simulate_index < simulate.len() && simulate[simulate_index].is_none() {
            removes.push(splice(&mut simulate, simulate_index, None));
        }

        let sim_item = simulate.get(simulate_index).copied().flatten();
        let sim_key = sim_item.and_then(Value::item_key);

        if sim_item.is_none() || sim_key != wanted_key {
            if let Some(wanted) = wanted_key {
                if let Some(sim) = sim_key {
                    // A keyed item is in the way. If a single insert here
                    // leaves it at its destination (k + 1) it can stay;
                    // otherwise it has to move.
                    if b_index.keys.get(sim) != Some(&(k + 1)) {
                        removes.push(splice(
                            &mut simulate,
                            simulate_index,
                            Some(sim.to_string()),
                        ));
                        let next = simulate.get(simulate_index).copied().flatten();
                        if next.and_then(Value::item_key) != Some(wanted) {
                            inserts.push(InsertMove {
                                key: wanted.to_string(),
                                to: k,
                            });
                        } else {
                            // The removal exposed the wanted item.
                            simulate_index += 1;
                        }
                    } else {
                        inserts.push(InsertMove {
                            key: wanted.to_string(),
                            to: k,
                        });
                    }
                } else {
                    inserts.push(InsertMove {
                        key: wanted.to_string(),
                        to: k,
                    });
                }
                k += 1;
            } else if let Some(sim) = sim_key {
                // Keyless target position: the keyed item sitting here must
                // move out; the next free item absorbs the position.
                removes.push(splice(&mut simulate, simulate_index, Some(sim.to_string())));
            } else {
                // Keyless target with an exhausted scratch array. Cannot be
                // reached when keys are unique: the append pass supplies
                // every unconsumed free item.
                break;
            }
        } else {
            simulate_index += 1;
            k += 1;
        }
    }

    // Drain whatever the walk left behind.
    while simulate_index < simulate.len() {
        let key = simulate[simulate_index]
            .and_then(Value::item_key)
            .map(str::to_string);
        removes.push(splice(&mut simulate, simulate_index, key));
    }

    // If the removals only account for the holes, the realigned array alone
    // already expresses the change.
    if removes.len() == deleted_items && inserts.is_empty() {
        return Reordered { array, moves: None };
    }

    Reordered {
        array,
        moves: Some(MoveSet { removes, inserts }),
    }
}

fn splice<'a>(
    simulate: &mut Vec<Option<&'a Value>>,
    index: usize,
    key: Option<String>,
) -> RemoveMove {
    simulate.remove(index);
    RemoveMove { from: index, key }
}
