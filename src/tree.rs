//! Prefix-code tree construction and code generation
//!
//! Trees are stored in an arena of index-addressed nodes rather than linked
//! boxes: the arena exclusively owns every node, traversals are iterative,
//! and deep codes on skewed inputs cannot exhaust the call stack.
//!
//! Construction is the classical greedy merge: the two minimum-weight nodes
//! are popped and re-pushed under a fresh internal node until one root
//! remains. Leaves enter the queue in ascending symbol order and ties break
//! by insertion sequence (see [`MinHeap`]), so for equal weights the
//! effective order is symbol ordinal for leaves and creation order for
//! merged nodes. The first-popped node becomes the left child.

use std::collections::HashMap;

use crate::error::{HuffzipError, Result};
use crate::frequency::FrequencyTable;
use crate::heap::MinHeap;

/// Index of a node inside a tree arena
pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Leaf { symbol: u8 },
    Internal { left: NodeId, right: NodeId },
}

/// Contiguous node storage; the arena owns every node exclusively
#[derive(Debug, Clone, Default)]
struct TreeArena {
    nodes: Vec<Node>,
}

impl TreeArena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }
}

/// A prefix-code tree built from a frequency table with two or more
/// distinct symbols
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    arena: TreeArena,
    root: NodeId,
}

/// Result of triaging a frequency table for tree construction
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// No symbols counted; nothing to build
    Empty,
    /// Exactly one distinct symbol; the count is carried separately and no
    /// tree is built
    Single {
        /// The sole symbol present in the input
        symbol: u8,
        /// Its occurrence count
        count: u64,
    },
    /// Two or more distinct symbols; a full tree was built
    Tree(HuffmanTree),
}

/// Build a prefix-code tree from `frequencies`
pub fn build_tree(frequencies: &FrequencyTable) -> BuildOutcome {
    let distinct = frequencies.distinct_symbols();

    if distinct == 0 {
        return BuildOutcome::Empty;
    }

    if distinct == 1 {
        // iter_present is non-empty here by the distinct count
        let (symbol, count) = frequencies
            .iter_present()
            .next()
            .unwrap_or((0, 0));
        return BuildOutcome::Single { symbol, count };
    }

    let mut arena = TreeArena::with_capacity(2 * distinct - 1);
    let mut heap = MinHeap::with_capacity(distinct);

    for (symbol, weight) in frequencies.iter_present() {
        let id = arena.push(Node::Leaf { symbol });
        heap.push(weight, id);
    }

    while heap.len() > 1 {
        // The loop guard keeps both pops from ever failing
        let (left_weight, left) = heap.pop_min().unwrap();
        let (right_weight, right) = heap.pop_min().unwrap();

        let merged = arena.push(Node::Internal { left, right });
        heap.push(left_weight + right_weight, merged);
    }

    let (_, root) = heap.pop_min().unwrap();
    BuildOutcome::Tree(HuffmanTree { arena, root })
}

impl HuffmanTree {
    /// Walk the tree and assign a bitstring to every leaf: `0` descends
    /// left, `1` descends right. Only leaves receive codes, so the
    /// resulting set is prefix-free by construction.
    pub fn assign_codes(&self) -> CodeTable {
        let mut table = CodeTable::default();
        let mut stack: Vec<(NodeId, Vec<bool>)> = vec![(self.root, Vec::new())];

        while let Some((id, path)) = stack.pop() {
            match self.arena.node(id) {
                Node::Leaf { symbol } => {
                    table.insert(*symbol, path);
                }
                Node::Internal { left, right } => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    let mut right_path = path;
                    right_path.push(true);
                    stack.push((*right, right_path));
                    stack.push((*left, left_path));
                }
            }
        }

        table
    }

    /// Number of leaves in the tree
    pub fn symbol_count(&self) -> usize {
        self.arena
            .nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }
}

/// Symbol-to-bitstring mapping produced by tree traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<u8, Vec<bool>>,
}

impl CodeTable {
    pub(crate) fn insert(&mut self, symbol: u8, code: Vec<bool>) {
        self.codes.insert(symbol, code);
    }

    /// The code assigned to `symbol`, if any
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Number of symbols with an assigned code
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no symbol has a code
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> {
        self.codes.iter().map(|(&s, c)| (s, c.as_slice()))
    }
}

/// Decode-side tree rebuilt from a serialized codebook
///
/// Built by inserting one code path at a time; insertion rejects colliding
/// codes and [`DecodeTree::validate_complete`] rejects under-subscribed
/// ones, so a validated tree resolves every possible bit path to a leaf.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

#[derive(Debug, Clone)]
enum DecodeNode {
    Internal { children: [Option<NodeId>; 2] },
    Leaf { symbol: u8 },
}

impl DecodeTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![DecodeNode::Internal {
                children: [None, None],
            }],
        }
    }

    fn push(&mut self, node: DecodeNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    fn set_child(&mut self, parent: NodeId, slot: usize, child: NodeId) {
        if let DecodeNode::Internal { children } = &mut self.nodes[parent as usize] {
            children[slot] = Some(child);
        }
    }

    /// Insert one symbol under its code path
    pub(crate) fn insert(&mut self, symbol: u8, code: &[bool]) -> Result<()> {
        if code.is_empty() {
            return Err(HuffzipError::tree_deserialization(
                "empty code assigned to a symbol",
            ));
        }

        let mut current: NodeId = 0;
        for (i, &bit) in code.iter().enumerate() {
            let slot = usize::from(bit);
            let existing = match self.nodes[current as usize] {
                DecodeNode::Leaf { .. } => {
                    return Err(HuffzipError::tree_deserialization(format!(
                        "code for symbol 0x{symbol:02x} passes through another symbol's code",
                    )));
                }
                DecodeNode::Internal { children } => children[slot],
            };

            if i + 1 == code.len() {
                if existing.is_some() {
                    return Err(HuffzipError::tree_deserialization(format!(
                        "code for symbol 0x{symbol:02x} collides with an existing code",
                    )));
                }
                let leaf = self.push(DecodeNode::Leaf { symbol });
                self.set_child(current, slot, leaf);
            } else {
                current = match existing {
                    Some(child) => child,
                    None => {
                        let child = self.push(DecodeNode::Internal {
                            children: [None, None],
                        });
                        self.set_child(current, slot, child);
                        child
                    }
                };
            }
        }

        Ok(())
    }

    /// Verify every internal node has both children, i.e. the code set
    /// saturates the tree and every bit path resolves
    pub(crate) fn validate_complete(&self) -> Result<()> {
        for node in &self.nodes {
            if let DecodeNode::Internal { children } = node {
                if children[0].is_none() || children[1].is_none() {
                    return Err(HuffzipError::tree_deserialization(
                        "code lengths leave the tree incomplete",
                    ));
                }
            }
        }
        Ok(())
    }

    /// The root node; always an internal node
    pub fn root(&self) -> NodeId {
        0
    }

    /// Follow one bit from `from`. Returns `None` if `from` is a leaf or
    /// the child slot is vacant; neither occurs on a validated tree.
    pub fn step(&self, from: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes.get(from as usize)? {
            DecodeNode::Leaf { .. } => None,
            DecodeNode::Internal { children } => children[usize::from(bit)],
        }
    }

    /// The symbol at `id`, if it is a leaf
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes.get(id as usize)? {
            DecodeNode::Leaf { symbol } => Some(*symbol),
            DecodeNode::Internal { .. } => None,
        }
    }
}
