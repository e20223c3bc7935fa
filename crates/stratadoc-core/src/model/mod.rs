//! Symbol descriptors supplied by the reflection front end
//!
//! Everything here is a read-only snapshot built once per generation run.
//! The engine only borrows these values; nothing downstream mutates them.

mod reflect;

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::namespace::ROOT_NAMESPACE;

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a property or method belongs to the class or to its instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Staticness {
    Static,
    Instance,
}

/// Kind of class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constant,
    Property,
    Method,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Property => "property",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constant, property or method of a class or trait
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    /// Always `None` for constants
    pub staticness: Option<Staticness>,
    /// The class or trait that declares this member
    pub declaring: String,
    /// Constant value or property default, as written in source
    pub value: Option<String>,
    /// Declared return type of a method
    pub return_type: Option<String>,
    pub description: String,
    pub line: Option<u32>,
}

impl Member {
    /// Create a member with no value, return type, description or line
    pub fn new(
        name: impl Into<String>,
        kind: MemberKind,
        visibility: Visibility,
        staticness: Option<Staticness>,
        declaring: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            staticness,
            declaring: declaring.into(),
            value: None,
            return_type: None,
            description: String::new(),
            line: None,
        }
    }

    pub fn constant(name: impl Into<String>, visibility: Visibility, declaring: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Constant, visibility, None, declaring)
    }

    pub fn property(
        name: impl Into<String>,
        visibility: Visibility,
        staticness: Staticness,
        declaring: impl Into<String>,
    ) -> Self {
        Self::new(name, MemberKind::Property, visibility, Some(staticness), declaring)
    }

    pub fn method(
        name: impl Into<String>,
        visibility: Visibility,
        staticness: Staticness,
        declaring: impl Into<String>,
    ) -> Self {
        Self::new(name, MemberKind::Method, visibility, Some(staticness), declaring)
    }

    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Kind of class-like symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

/// A trait used by a class, with the members the trait itself declares
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitUse {
    pub name: String,
    pub properties: Vec<Member>,
    pub methods: Vec<Member>,
}

impl TraitUse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// A class, interface or trait
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDescriptor {
    /// Fully qualified name without a leading `\`
    pub name: String,
    pub kind: ClassKind,
    /// Declaring namespace, [`ROOT_NAMESPACE`] when global
    pub namespace: String,
    pub file: Option<PathBuf>,
    /// Throwable classes are listed apart on namespace pages
    pub exception: bool,
    pub description: String,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
    pub constants: Vec<Member>,
    pub properties: Vec<Member>,
    pub methods: Vec<Member>,
    /// Ancestor name -> members inherited from it, in ancestor chain order
    pub inherited_constants: IndexMap<String, Vec<Member>>,
    pub inherited_properties: IndexMap<String, Vec<Member>>,
    pub inherited_methods: IndexMap<String, Vec<Member>>,
    pub traits: Vec<TraitUse>,
}

impl ClassDescriptor {
    /// Create an empty descriptor; the namespace is derived from the name
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        let name = normalize_name(&name.into()).to_string();
        let namespace = namespace_of(&name).to_string();
        Self {
            name,
            kind,
            namespace,
            file: None,
            exception: false,
            description: String::new(),
            parent: None,
            interfaces: Vec::new(),
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            inherited_constants: IndexMap::new(),
            inherited_properties: IndexMap::new(),
            inherited_methods: IndexMap::new(),
            traits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Last segment of the qualified name
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// View this descriptor as a routable symbol reference
    pub fn as_symbol(&self) -> SymbolRef<'_> {
        match self.kind {
            ClassKind::Class => SymbolRef::Class(self),
            ClassKind::Interface => SymbolRef::Interface(self),
            ClassKind::Trait => SymbolRef::Trait(self),
        }
    }
}

/// A free-standing function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub namespace: String,
    pub file: Option<PathBuf>,
    pub return_type: Option<String>,
    pub description: String,
    pub line: Option<u32>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = normalize_name(&name.into()).to_string();
        let namespace = namespace_of(&name).to_string();
        Self {
            name,
            namespace,
            file: None,
            return_type: None,
            description: String::new(),
            line: None,
        }
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }
}

/// Anything a link can point at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolRef<'a> {
    Namespace(&'a str),
    Class(&'a ClassDescriptor),
    Interface(&'a ClassDescriptor),
    Trait(&'a ClassDescriptor),
    Function(&'a FunctionDescriptor),
    SourceLocation(&'a Path),
}

impl<'a> SymbolRef<'a> {
    /// Human-readable variant name, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Namespace(_) => "namespace",
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Trait(_) => "trait",
            Self::Function(_) => "function",
            Self::SourceLocation(_) => "source location",
        }
    }

    /// Identity: the qualified name, or the file path for source locations
    pub fn name(&self) -> String {
        match self {
            Self::Namespace(name) => (*name).to_string(),
            Self::Class(class) | Self::Interface(class) | Self::Trait(class) => class.name.clone(),
            Self::Function(function) => function.name.clone(),
            Self::SourceLocation(path) => path.display().to_string(),
        }
    }

    /// File the symbol was declared in, if known
    pub fn file(&self) -> Option<&'a Path> {
        match *self {
            Self::Namespace(_) => None,
            Self::Class(class) | Self::Interface(class) | Self::Trait(class) => class.file.as_deref(),
            Self::Function(function) => function.file.as_deref(),
            Self::SourceLocation(path) => Some(path),
        }
    }
}

/// Every symbol handed over by the reflection front end
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolModel {
    pub classes: Vec<ClassDescriptor>,
    pub functions: Vec<FunctionDescriptor>,
}

impl SymbolModel {
    /// Load a model from a JSON file written by the reflection front end.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// reports a member with invalid visibility flags.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a model from its JSON representation.
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let raw: reflect::RawModel = serde_json::from_str(content)?;
        raw.into_model().map_err(ModelError::from)
    }
}

/// Strip the leading namespace-root marker from a qualified name
pub fn normalize_name(name: &str) -> &str {
    name.trim_start_matches('\\')
}

/// Namespace part of a qualified name, [`ROOT_NAMESPACE`] if unqualified
pub fn namespace_of(name: &str) -> &str {
    match normalize_name(name).rfind('\\') {
        Some(pos) => &normalize_name(name)[..pos],
        None => ROOT_NAMESPACE,
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_derived_from_name() {
        let class = ClassDescriptor::new("\\App\\Model\\User", ClassKind::Class);
        assert_eq!(class.name, "App\\Model\\User");
        assert_eq!(class.namespace, "App\\Model");
        assert_eq!(class.short_name(), "User");

        let global = FunctionDescriptor::new("strlen");
        assert_eq!(global.namespace, ROOT_NAMESPACE);
    }

    #[test]
    fn test_symbol_ref_kind_follows_class_kind() {
        let class = ClassDescriptor::new("A\\Loggable", ClassKind::Trait);
        let symbol = class.as_symbol();
        assert!(matches!(symbol, SymbolRef::Trait(_)));
        assert_eq!(symbol.kind_name(), "trait");
        assert_eq!(symbol.name(), "A\\Loggable");
        assert!(symbol.file().is_none());
    }

    #[test]
    fn test_symbol_ref_file() {
        let class = ClassDescriptor::new("A\\Foo", ClassKind::Class).with_file("src/Foo.php");
        assert_eq!(class.as_symbol().file(), Some(Path::new("src/Foo.php")));
    }
}
