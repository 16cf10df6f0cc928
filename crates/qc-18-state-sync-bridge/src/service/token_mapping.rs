//! Token Mapping Registry
//!
//! Bidirectional root <-> child token map. Both directions change together;
//! a pair that contradicts an existing mapping is rejected, never merged.

use crate::domain::{invariant_mapping_free, Address, BridgeError, BridgeResult};
use std::collections::HashMap;

/// Root <-> child token registry.
#[derive(Clone, Debug, Default)]
pub struct TokenMappingRegistry {
    root_to_child: HashMap<Address, Address>,
    child_to_root: HashMap<Address, Address>,
}

impl TokenMappingRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child token for `root`, zero if unmapped.
    pub fn root_to_child_token(&self, root: &Address) -> Address {
        self.root_to_child.get(root).copied().unwrap_or_default()
    }

    /// Root token for `child`, zero if unmapped.
    pub fn child_to_root_token(&self, child: &Address) -> Address {
        self.child_to_root.get(child).copied().unwrap_or_default()
    }

    /// Map `root <-> child`. Returns false when the identical pair already exists.
    pub fn map(&mut self, root: Address, child: Address) -> BridgeResult<bool> {
        if root.is_zero() || child.is_zero() {
            return Err(BridgeError::MappingConflict { root, child });
        }
        invariant_mapping_free(
            root,
            child,
            self.root_to_child_token(&root),
            self.child_to_root_token(&child),
        )?;
        if self.root_to_child_token(&root) == child {
            return Ok(false);
        }
        self.root_to_child.insert(root, child);
        self.child_to_root.insert(child, root);
        Ok(true)
    }

    /// Remove the mapping for `root`, returning the child it pointed to.
    pub fn unmap(&mut self, root: &Address) -> BridgeResult<Address> {
        let child = self
            .root_to_child
            .remove(root)
            .ok_or(BridgeError::UnmappedToken(*root))?;
        self.child_to_root.remove(&child);
        Ok(child)
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.root_to_child.len()
    }

    /// True if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.root_to_child.is_empty()
    }
}
