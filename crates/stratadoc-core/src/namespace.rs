//! Namespace hierarchy
//!
//! Parent/child relationships are computed purely from namespace names:
//! `n` is an immediate child of `ns` when `n` starts with `ns` followed by a
//! separator and the rest of `n` contains no further separator.

use serde::Serialize;

use crate::constants::{ConstantSet, ConstantStore};
use crate::index::SymbolIndex;
use crate::model::{ClassDescriptor, FunctionDescriptor};

/// Sentinel name of the global namespace
pub const ROOT_NAMESPACE: &str = "none";

/// Characters that delimit namespace segments
pub const SEPARATORS: [char; 2] = ['\\', '.'];

fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Immediate children of `namespace` among `all`, in the order of `all`
pub fn children_of<'a, I>(namespace: &str, all: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    all.into_iter()
        .filter(|candidate| is_child(namespace, candidate))
        .collect()
}

fn is_child(namespace: &str, candidate: &str) -> bool {
    let Some(rest) = candidate.strip_prefix(namespace) else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if is_separator(c) => {
            let tail = chars.as_str();
            !tail.is_empty() && !tail.contains(is_separator)
        }
        _ => false,
    }
}

/// Last segment of a namespace; a name without separators is its own
/// display name
pub fn display_name(namespace: &str) -> &str {
    namespace.rsplit(is_separator).next().unwrap_or(namespace)
}

/// Enclosing namespace, or `None` for a top-level namespace
pub fn parent_of(namespace: &str) -> Option<&str> {
    namespace.rfind(is_separator).map(|pos| &namespace[..pos])
}

/// Every proper ancestor of `namespace`, outermost first
pub fn ancestors(namespace: &str) -> impl Iterator<Item = &str> {
    namespace
        .char_indices()
        .filter(|(_, c)| is_separator(*c))
        .map(move |(pos, _)| &namespace[..pos])
        .filter(|prefix| !prefix.is_empty())
}

/// Segments of a namespace name
pub fn segments(namespace: &str) -> impl Iterator<Item = &str> {
    namespace.split(is_separator).filter(|s| !s.is_empty())
}

/// A namespace and its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceNode {
    pub name: String,
    pub simple_name: String,
    pub children: Vec<NamespaceNode>,
}

/// Everything a namespace page lists
#[derive(Debug, Clone, Serialize)]
pub struct NamespaceContents<'a> {
    pub name: &'a str,
    pub simple_name: &'a str,
    pub classes: Vec<&'a ClassDescriptor>,
    pub exceptions: Vec<&'a ClassDescriptor>,
    pub interfaces: Vec<&'a ClassDescriptor>,
    pub traits: Vec<&'a ClassDescriptor>,
    pub functions: Vec<&'a FunctionDescriptor>,
    pub constants: ConstantSet,
    pub child_namespaces: Vec<&'a str>,
}

/// Resolves the namespace tree and per-namespace listings over a read-only
/// index and constant store
pub struct NamespaceResolver<'a> {
    index: &'a SymbolIndex<'a>,
    constants: &'a dyn ConstantStore,
    namespaces: Vec<&'a str>,
}

impl<'a> NamespaceResolver<'a> {
    pub fn new(index: &'a SymbolIndex<'a>, constants: &'a dyn ConstantStore) -> Self {
        Self {
            index,
            constants,
            namespaces: index.namespaces().collect(),
        }
    }

    /// Every known namespace, sorted
    pub fn namespaces(&self) -> &[&'a str] {
        &self.namespaces
    }

    /// Immediate children of `namespace`
    pub fn children_of(&self, namespace: &str) -> Vec<&'a str> {
        children_of(namespace, self.namespaces.iter().copied())
    }

    /// Top-level namespaces with their descendants, the root namespace
    /// included
    pub fn tree(&self) -> Vec<NamespaceNode> {
        self.namespaces
            .iter()
            .filter(|ns| parent_of(ns).is_none())
            .map(|ns| self.node(ns))
            .collect()
    }

    fn node(&self, namespace: &str) -> NamespaceNode {
        NamespaceNode {
            name: namespace.to_string(),
            simple_name: display_name(namespace).to_string(),
            children: self
                .children_of(namespace)
                .into_iter()
                .map(|child| self.node(child))
                .collect(),
        }
    }

    /// Symbols, constants and child namespaces of `namespace`. A namespace
    /// with no stored constants gets an empty constant set.
    pub fn page_data_for(&self, namespace: &'a str) -> NamespaceContents<'a> {
        let members = self.index.members_of(namespace);
        let constants = self
            .constants
            .constants_for(namespace)
            .cloned()
            .unwrap_or_default();

        NamespaceContents {
            name: namespace,
            simple_name: display_name(namespace),
            classes: members.classes,
            exceptions: members.exceptions,
            interfaces: members.interfaces,
            traits: members.traits,
            functions: members.functions,
            constants,
            child_namespaces: self.children_of(namespace),
        }
    }
}
