//! Compressed trie over key sequences, so multi-key mappings (`dd`, `gg`,
//! `r<c>`) share prefixes with their single-key counterparts. Grounded on
//! the teacher's `MappingTrie`/`Resolution` shape, trimmed to this crate's
//! `Action` token set.

use smallvec::SmallVec;

use crate::action::{Action, KeyPattern, MappingSpec};

#[derive(Debug, Clone)]
struct Edge {
    pat: KeyPattern,
    next: usize,
}

#[derive(Debug, Clone, Default)]
struct Node {
    terminal: Option<usize>,
    edges: SmallVec<[Edge; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `consumed` characters from the front of the pending buffer form a
    /// complete mapping. `ambiguous` is true when the matched node also
    /// has outgoing edges (a longer mapping could still complete).
    Matched {
        consumed: usize,
        action: Action,
        ambiguous: bool,
    },
    /// A strict prefix of one or more mappings; wait for another byte.
    NeedMore,
    /// No mapping starts with the buffer's first character; the caller
    /// should treat it as a literal and drop it from the pending buffer.
    FallbackLiteral(char),
}

pub struct MappingTrie {
    nodes: Vec<Node>,
    mappings: Vec<MappingSpec>,
}

impl MappingTrie {
    pub fn build(specs: Vec<MappingSpec>) -> Self {
        let mut trie = MappingTrie {
            nodes: vec![Node::default()],
            mappings: specs,
        };
        for (idx, spec) in trie.mappings.iter().enumerate() {
            let mut cur = 0usize;
            for pat in &spec.sequence {
                let next = if let Some(edge) = trie.nodes[cur].edges.iter().find(|e| e.pat == *pat)
                {
                    edge.next
                } else {
                    let new_idx = trie.nodes.len();
                    trie.nodes.push(Node::default());
                    trie.nodes[cur].edges.push(Edge { pat: *pat, next: new_idx });
                    new_idx
                };
                cur = next;
            }
            trie.nodes[cur].terminal = Some(idx);
        }
        trie
    }

    pub fn resolve(&self, buffer: &[char]) -> Resolution {
        let mut node_idx = 0usize;
        let mut last_terminal: Option<(usize, usize)> = None;
        for (i, ch) in buffer.iter().enumerate() {
            let mut advanced = false;
            for edge in &self.nodes[node_idx].edges {
                if edge.pat.matches(*ch) {
                    node_idx = edge.next;
                    if let Some(mi) = self.nodes[node_idx].terminal {
                        last_terminal = Some((i + 1, mi));
                    }
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                break;
            }
        }
        if let Some((consumed, mi)) = last_terminal {
            return Resolution::Matched {
                consumed,
                action: self.mappings[mi].action.clone(),
                ambiguous: !self.nodes[node_idx].edges.is_empty(),
            };
        }
        if buffer.is_empty() {
            return Resolution::NeedMore;
        }
        if node_idx == 0 {
            Resolution::FallbackLiteral(buffer[0])
        } else {
            Resolution::NeedMore
        }
    }
}
