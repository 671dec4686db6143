//! Address allocator: one symbolic base address per allocation site.

use std::collections::HashMap;

use symem_smtlib::term::Term;

use crate::symbols::SymbolTable;

/// Symbol prefix for object base addresses.
const ADDRESS_PREFIX: &str = "addr";

/// A simulated heap allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryObject {
    /// Allocation-site tag, e.g. `"malloc1"`.
    pub tag: String,
    /// Base address term.
    pub address: Term,
}

/// Result of asking for an object's address.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub address: Term,
    /// Disequalities against every earlier object; empty for a known tag.
    pub disjointness: Vec<Term>,
}

/// Mints base addresses and the constraints that keep them apart.
#[derive(Debug, Default, Clone)]
pub struct AddressAllocator {
    objects: Vec<MemoryObject>,
    by_tag: HashMap<String, usize>,
}

impl AddressAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base address for `tag`.
    ///
    /// A new tag gets a fresh symbol plus one `addr != prev` constraint per
    /// previously allocated object; the caller is responsible for asserting
    /// them. Object sizes are not modelled, so only base addresses are kept
    /// apart.
    pub fn object_address(&mut self, tag: &str, symbols: &mut SymbolTable) -> Allocation {
        if let Some(&idx) = self.by_tag.get(tag) {
            return Allocation {
                address: self.objects[idx].address.clone(),
                disjointness: Vec::new(),
            };
        }

        let address = Term::Const(symbols.fresh(&format!("{ADDRESS_PREFIX}.{tag}")));
        let disjointness: Vec<Term> = self
            .objects
            .iter()
            .map(|prev| address.clone().not_equals(prev.address.clone()))
            .collect();

        tracing::trace!(
            "allocated object {tag} at {address} ({} disjointness constraints)",
            disjointness.len()
        );

        self.by_tag.insert(tag.to_string(), self.objects.len());
        self.objects.push(MemoryObject {
            tag: tag.to_string(),
            address: address.clone(),
        });

        Allocation {
            address,
            disjointness,
        }
    }

    /// Allocated objects in allocation order.
    pub fn objects(&self) -> &[MemoryObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
