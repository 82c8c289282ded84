//! Spreading Activation
//!
//! Bounded-depth propagation of activation from a starting memory across
//! associations (Collins & Loftus, 1975).
//!
//! Each round takes a snapshot of every node activated so far and pushes
//! `activation × association strength` to neighbours that have never been
//! reached. A neighbour is marked visited the moment it is first reached, so
//! within a round the first contributing edge wins and later edges into the
//! same node add nothing. Activation values are never revised once set.
//!
//! ## Iteration order
//!
//! Because the first writer wins, the result depends on traversal order.
//! Round-start nodes are walked in the order they were activated (the start
//! node, then nodes in order of first arrival), and each node's associations
//! in the order they were created. Final results are sorted by activation,
//! descending, with ties kept in activation order.

use std::collections::HashSet;

use serde::Serialize;

use crate::memory::{MemoryEntry, MemoryKey};

/// Activation given to the starting memory
pub const INITIAL_ACTIVATION: f64 = 1.0;

/// A key reached during spreading, with its activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationTrace {
    pub key: MemoryKey,
    pub activation: f64,
    /// Round in which the key was first reached (0 = start)
    pub depth: usize,
}

/// A memory reached by spreading activation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivatedMemory<'a, C> {
    pub entry: &'a MemoryEntry<C>,
    pub activation: f64,
    /// Hops from the starting memory
    pub depth: usize,
}

/// Spread activation outward from `start` for `depth` rounds
///
/// `neighbours` lists, for a key, every `(other endpoint, edge strength)`
/// touching it, in association creation order. Terminates after at most
/// `depth` rounds and reports every reached key exactly once.
pub fn spread<N, I>(start: MemoryKey, depth: usize, mut neighbours: N) -> Vec<ActivationTrace>
where
    N: FnMut(MemoryKey) -> I,
    I: IntoIterator<Item = (MemoryKey, f64)>,
{
    let mut activation = vec![ActivationTrace {
        key: start,
        activation: INITIAL_ACTIVATION,
        depth: 0,
    }];
    let mut visited: HashSet<MemoryKey> = HashSet::from([start]);

    for round in 1..=depth {
        let snapshot: Vec<(MemoryKey, f64)> =
            activation.iter().map(|t| (t.key, t.activation)).collect();
        let mut next = Vec::new();

        for (node, value) in snapshot {
            for (other, strength) in neighbours(node) {
                if visited.insert(other) {
                    next.push(ActivationTrace {
                        key: other,
                        activation: value * strength,
                        depth: round,
                    });
                }
            }
        }

        // Nothing new can be reached in later rounds either
        if next.is_empty() {
            break;
        }
        activation.extend(next);
    }

    activation.sort_by(|a, b| b.activation.total_cmp(&a.activation));
    activation
}
