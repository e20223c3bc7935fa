//! Symbol index for cross-referencing
//!
//! Indexes every class-like symbol and function of a [`SymbolModel`] by its
//! qualified name, and groups them by declaring namespace.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::model::{normalize_name, ClassDescriptor, ClassKind, FunctionDescriptor, SymbolModel, SymbolRef};
use crate::namespace::{ancestors, ROOT_NAMESPACE};

/// Name lookups used while auto-linking
pub trait SymbolLookup: Sync {
    /// Find a class or interface by qualified name
    fn class_or_interface(&self, name: &str) -> Option<SymbolRef<'_>>;

    /// Find a trait by qualified name
    fn trait_named(&self, name: &str) -> Option<SymbolRef<'_>>;

    /// Find a free-standing function by qualified name
    fn function(&self, name: &str) -> Option<SymbolRef<'_>>;
}

/// Symbols declared directly in one namespace, in declaration order
#[derive(Debug, Clone, Default)]
pub struct NamespaceMembers<'a> {
    pub classes: Vec<&'a ClassDescriptor>,
    pub exceptions: Vec<&'a ClassDescriptor>,
    pub interfaces: Vec<&'a ClassDescriptor>,
    pub traits: Vec<&'a ClassDescriptor>,
    pub functions: Vec<&'a FunctionDescriptor>,
}

/// Read-only index over a symbol model
#[derive(Debug, Clone)]
pub struct SymbolIndex<'a> {
    model: &'a SymbolModel,
    classes: HashMap<&'a str, &'a ClassDescriptor>,
    functions: HashMap<&'a str, &'a FunctionDescriptor>,
    namespaces: BTreeSet<&'a str>,
}

impl<'a> SymbolIndex<'a> {
    /// Index every symbol of `model`
    pub fn new(model: &'a SymbolModel) -> Self {
        let mut classes = HashMap::with_capacity(model.classes.len());
        let mut functions = HashMap::with_capacity(model.functions.len());
        let mut namespaces = BTreeSet::new();

        for class in &model.classes {
            if classes.insert(class.name.as_str(), class).is_some() {
                tracing::warn!(class = %class.name, "duplicate class in symbol model, last one wins");
            }
            add_namespace(&mut namespaces, &class.namespace);
        }
        for function in &model.functions {
            if functions.insert(function.name.as_str(), function).is_some() {
                tracing::warn!(function = %function.name, "duplicate function in symbol model, last one wins");
            }
            add_namespace(&mut namespaces, &function.namespace);
        }

        tracing::debug!(
            classes = classes.len(),
            functions = functions.len(),
            namespaces = namespaces.len(),
            "indexed symbol model"
        );

        Self {
            model,
            classes,
            functions,
            namespaces,
        }
    }

    pub fn model(&self) -> &'a SymbolModel {
        self.model
    }

    /// Find any class-like symbol by qualified name
    pub fn class(&self, name: &str) -> Option<&'a ClassDescriptor> {
        self.classes.get(normalize_name(name)).copied()
    }

    /// Every known namespace, including ancestors that declare nothing
    /// themselves, sorted by name
    pub fn namespaces(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.namespaces.iter().copied()
    }

    /// Symbols declared directly in `namespace`
    pub fn members_of(&self, namespace: &str) -> NamespaceMembers<'a> {
        let mut members = NamespaceMembers::default();
        for class in self.model.classes.iter().filter(|c| c.namespace == namespace) {
            match class.kind {
                ClassKind::Class if class.exception => members.exceptions.push(class),
                ClassKind::Class => members.classes.push(class),
                ClassKind::Interface => members.interfaces.push(class),
                ClassKind::Trait => members.traits.push(class),
            }
        }
        members.functions = self
            .model
            .functions
            .iter()
            .filter(|f| f.namespace == namespace)
            .collect();
        members
    }

    /// Distinct source files of all documented symbols, sorted
    pub fn source_files(&self) -> BTreeSet<&'a Path> {
        self.model
            .classes
            .iter()
            .filter_map(|c| c.file.as_deref())
            .chain(self.model.functions.iter().filter_map(|f| f.file.as_deref()))
            .collect()
    }
}

impl SymbolLookup for SymbolIndex<'_> {
    fn class_or_interface(&self, name: &str) -> Option<SymbolRef<'_>> {
        self.class(name)
            .filter(|c| matches!(c.kind, ClassKind::Class | ClassKind::Interface))
            .map(ClassDescriptor::as_symbol)
    }

    fn trait_named(&self, name: &str) -> Option<SymbolRef<'_>> {
        self.class(name)
            .filter(|c| c.kind == ClassKind::Trait)
            .map(ClassDescriptor::as_symbol)
    }

    fn function(&self, name: &str) -> Option<SymbolRef<'_>> {
        self.functions
            .get(normalize_name(name))
            .map(|f| SymbolRef::Function(f))
    }
}

fn add_namespace<'a>(namespaces: &mut BTreeSet<&'a str>, namespace: &'a str) {
    namespaces.insert(namespace);
    if namespace != ROOT_NAMESPACE {
        namespaces.extend(ancestors(namespace));
    }
}
