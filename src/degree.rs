// src/degree.rs
use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::types::DegreeChange;

/// Maps node id to its current degree, multi-edges counted with
/// multiplicity. A node exists only while its degree is at least 1.
#[derive(Debug, Default)]
pub struct DegreeTable {
    degrees: HashMap<String, u32>,
}

impl DegreeTable {
    pub fn new() -> Self {
        Self {
            degrees: HashMap::new(),
        }
    }

    /// Creates the node at degree 1 if absent, otherwise bumps its degree.
    pub fn increment(&mut self, node: &str) -> DegreeChange {
        match self.degrees.get_mut(node) {
            Some(degree) => {
                let old = *degree;
                *degree += 1;
                DegreeChange {
                    old: Some(old),
                    new: Some(*degree),
                }
            }
            None => {
                self.degrees.insert(node.to_string(), 1);
                DegreeChange {
                    old: None,
                    new: Some(1),
                }
            }
        }
    }

    /// Drops the degree by one, removing the node when it reaches 0.
    /// Decrementing an absent node means an edge was destroyed twice, a
    /// bookkeeping bug, never clamped.
    pub fn decrement(&mut self, node: &str) -> GraphResult<DegreeChange> {
        match self.degrees.get_mut(node) {
            Some(degree) if *degree > 1 => {
                let old = *degree;
                *degree -= 1;
                Ok(DegreeChange {
                    old: Some(old),
                    new: Some(*degree),
                })
            }
            Some(_) => {
                self.degrees.remove(node);
                Ok(DegreeChange {
                    old: Some(1),
                    new: None,
                })
            }
            None => Err(GraphError::DegreeUnderflow(node.to_string())),
        }
    }

    pub fn degree(&self, node: &str) -> Option<u32> {
        self.degrees.get(node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.degrees.iter().map(|(node, degree)| (node.as_str(), *degree))
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }
}
