use std::{borrow::Borrow, collections::BTreeMap};

use thiserror::Error;

use crate::levenshtein::{Levenshtein, Metric};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot build a BK-tree from an empty word list")]
    EmptyInput,
    #[error("query radius must be non-negative, got {0}")]
    InvalidRadius(i64),
}

/// One indexed word. `children` maps a distance bucket to the arena slot of
/// the child whose key sits exactly that far from `key`.
#[derive(Debug)]
struct Node<K, P> {
    key: K,
    payload: P,
    children: BTreeMap<usize, usize>,
}

/// A hit returned by [`BkTree::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a, K, P> {
    pub distance: usize,
    pub key: &'a K,
    pub payload: &'a P,
}

/// Burkhard-Keller tree over an arena of nodes. Slot 0 is the root.
#[derive(Debug)]
pub struct BkTree<K, P, M = Levenshtein> {
    nodes: Vec<Node<K, P>>,
    metric: M,
    max_depth: usize,
}

impl<K, P> BkTree<K, P, Levenshtein>
where
    Levenshtein: Metric<K>,
{
    pub fn build<I>(words: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, P)>,
    {
        Self::build_with_metric(Levenshtein, words)
    }
}

impl<K, P, M: Metric<K>> BkTree<K, P, M> {
    /// Builds a tree whose root is the first pair; the rest are inserted in
    /// order, so the input order decides the shape of the tree.
    pub fn build_with_metric<I>(metric: M, words: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, P)>,
    {
        let mut words = words.into_iter();
        let (key, payload) = words.next().ok_or(TreeError::EmptyInput)?;

        let mut tree = Self {
            nodes: vec![Node {
                key,
                payload,
                children: BTreeMap::new(),
            }],
            metric,
            max_depth: 0,
        };
        for (key, payload) in words {
            tree.insert(key, payload);
        }
        Ok(tree)
    }

    /// Walks down the buckets until one is free and hangs a new leaf there.
    /// Duplicate keys are not rejected; they land under bucket 0.
    pub fn insert(&mut self, key: K, payload: P) {
        let mut current = 0;
        let mut depth = 0;
        loop {
            let d = self.metric.distance(&key, &self.nodes[current].key);
            depth += 1;
            match self.nodes[current].children.get(&d) {
                Some(&child) => current = child,
                None => {
                    let slot = self.nodes.len();
                    self.nodes.push(Node {
                        key,
                        payload,
                        children: BTreeMap::new(),
                    });
                    self.nodes[current].children.insert(d, slot);
                    self.max_depth = self.max_depth.max(depth);
                    return;
                }
            }
        }
    }

    /// Returns every entry within `radius` of `key` (inclusive), ordered by
    /// distance, then key, then payload.
    pub fn query<Q>(&self, key: &Q, radius: i64) -> Result<Vec<Match<'_, K, P>>, TreeError>
    where
        Q: ?Sized,
        K: Borrow<Q> + Ord,
        P: Ord,
        M: Metric<Q>,
    {
        if radius < 0 {
            return Err(TreeError::InvalidRadius(radius));
        }
        let radius = radius as usize;

        let mut matches = Vec::new();
        let mut stack = vec![0];
        while let Some(slot) = stack.pop() {
            let node = &self.nodes[slot];
            let d = <M as Metric<Q>>::distance(&self.metric, key, node.key.borrow());
            if d <= radius {
                matches.push(Match {
                    distance: d,
                    key: &node.key,
                    payload: &node.payload,
                });
            }
            // Anything under bucket i is exactly i away from this node, so by
            // the triangle inequality it can only match when |d - i| <= radius.
            let low = d.saturating_sub(radius);
            let high = d.saturating_add(radius);
            stack.extend(node.children.range(low..=high).rev().map(|(_, &child)| child));
        }

        matches.sort_by(|a, b| {
            (a.distance, a.key, a.payload).cmp(&(b.distance, b.key, b.payload))
        });
        Ok(matches)
    }

    /// Length of the longest root-to-leaf path; 0 when only the root exists.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree cannot exist without its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

/// Linear scan over `words`, keeping those within `radius` of `key`. Used to
/// cross-check and benchmark [`BkTree::query`].
pub fn brute_query<'a, K, Q, M>(
    key: &Q,
    words: impl IntoIterator<Item = &'a K>,
    metric: &M,
    radius: usize,
) -> Vec<&'a K>
where
    Q: ?Sized,
    K: Borrow<Q> + 'a,
    M: Metric<Q>,
{
    words
        .into_iter()
        .filter(|word| metric.distance(Borrow::<Q>::borrow(*word), key) <= radius)
        .collect()
}
