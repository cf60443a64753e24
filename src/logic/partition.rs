//! Dependency ordering of option writes.
//!
//! Two strategies are available. [`OrderingStrategy::TwoBucket`] puts every
//! root option before every child option and trusts the input to list parents
//! before children. [`OrderingStrategy::Resolved`] sweeps the children
//! repeatedly until every parent is placed, which handles hierarchies of any
//! depth in any input order and reports cycles and dangling references.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::SpecError;
use crate::model::{LookupKey, MissingParentPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    TwoBucket,
    #[default]
    Resolved,
}

/// An item to order, identified by its lookup key and its parent's
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub key: LookupKey,
    pub parent: Option<LookupKey>,
    pub item: T,
}

/// Splits nodes into (roots, children), keeping input order in both
pub fn partition_by_parent<T>(nodes: Vec<Node<T>>) -> (Vec<Node<T>>, Vec<Node<T>>) {
    nodes.into_iter().partition(|node| node.parent.is_none())
}

pub fn order_nodes<T>(
    nodes: Vec<Node<T>>,
    strategy: OrderingStrategy,
    missing_parent: MissingParentPolicy,
) -> Result<Vec<Node<T>>, SpecError> {
    match strategy {
        OrderingStrategy::TwoBucket => Ok(order_two_bucket(nodes)),
        OrderingStrategy::Resolved => order_resolved(nodes, missing_parent),
    }
}

/// Roots first, then children, no verification
pub fn order_two_bucket<T>(nodes: Vec<Node<T>>) -> Vec<Node<T>> {
    let (mut roots, children) = partition_by_parent(nodes);
    roots.extend(children);
    roots
}

/// Roots first, then children in sweeps, each sweep in input order.
///
/// A child is placed once its parent has been placed. When a sweep places
/// nothing, children whose parent is not defined anywhere are either reported
/// or (with [`MissingParentPolicy::TreatAsRoot`]) placed as-is; anything left
/// after that is blocked by a cycle.
pub fn order_resolved<T>(
    nodes: Vec<Node<T>>,
    missing_parent: MissingParentPolicy,
) -> Result<Vec<Node<T>>, SpecError> {
    let defined: HashSet<LookupKey> = nodes.iter().map(|node| node.key.clone()).collect();
    let (mut ordered, mut pending) = partition_by_parent(nodes);
    let mut placed: HashSet<LookupKey> = ordered.iter().map(|node| node.key.clone()).collect();

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::with_capacity(before);

        for node in pending {
            let ready = node.parent.as_ref().map_or(true, |parent| placed.contains(parent));
            if ready {
                placed.insert(node.key.clone());
                ordered.push(node);
            } else {
                waiting.push(node);
            }
        }
        pending = waiting;

        if pending.len() < before {
            continue;
        }

        let (dangling, blocked): (Vec<_>, Vec<_>) = pending.into_iter().partition(|node| {
            node.parent
                .as_ref()
                .map_or(false, |parent| !defined.contains(parent))
        });

        if dangling.is_empty() {
            return Err(SpecError::Cycle {
                options: blocked.into_iter().map(|node| node.key).collect(),
            });
        }

        if missing_parent == MissingParentPolicy::Fail {
            return Err(SpecError::UnresolvedParents {
                missing: dangling
                    .into_iter()
                    .filter_map(|node| node.parent.map(|parent| (node.key, parent)))
                    .collect(),
            });
        }

        for node in dangling {
            if let Some(parent) = &node.parent {
                warn!("parent {} of {} is not defined, keeping it for root-level fallback", parent, node.key);
            }
            placed.insert(node.key.clone());
            ordered.push(node);
        }
        pending = blocked;
    }

    Ok(ordered)
}
