//! Cross-linking for documentation
//!
//! Resolves bare names found in signatures and prose to links to the pages
//! that document them. Names that do not resolve are left as plain text:
//! prose routinely mentions built-in or external names.

use crate::html::escape_html;
use crate::index::SymbolLookup;
use crate::model::{normalize_name, SymbolRef};
use crate::namespace::ROOT_NAMESPACE;
use crate::routing::Router;

/// Which symbol table a bare name is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    ClassOrInterface,
    Trait,
    Function,
}

/// Links bare names against the known symbol set
#[derive(Clone, Copy)]
pub struct Linker<'a> {
    router: &'a Router,
    lookup: &'a dyn SymbolLookup,
    /// Namespace used to resolve unqualified names in prose
    current_namespace: Option<&'a str>,
}

impl<'a> Linker<'a> {
    pub fn new(router: &'a Router, lookup: &'a dyn SymbolLookup) -> Self {
        Self {
            router,
            lookup,
            current_namespace: None,
        }
    }

    /// A linker that resolves unqualified prose names relative to
    /// `namespace` first
    #[must_use]
    pub fn in_namespace<'b>(&self, namespace: &'b str) -> Linker<'b>
    where
        'a: 'b,
    {
        Linker {
            router: self.router,
            lookup: self.lookup,
            current_namespace: (namespace != ROOT_NAMESPACE).then_some(namespace),
        }
    }

    pub fn router(&self) -> &'a Router {
        self.router
    }

    /// Link `name` if it names a known symbol of `kind`; otherwise return it
    /// unchanged. A trailing `[]` (array of the element type) is kept
    /// outside the link.
    pub fn auto_link(&self, name: &str, kind: LookupKind) -> String {
        let (element, suffix) = split_container(name);
        match self.resolve(element, kind) {
            Some(symbol) => match self.anchor(element, symbol) {
                Some(anchor) => format!("{anchor}{suffix}"),
                None => name.to_string(),
            },
            None => {
                tracing::debug!(name, ?kind, "unresolved reference left as text");
                name.to_string()
            }
        }
    }

    /// [`Linker::auto_link`] for class and interface names
    pub fn link_if_found(&self, name: &str) -> String {
        self.auto_link(name, LookupKind::ClassOrInterface)
    }

    /// [`Linker::auto_link`] for trait names
    pub fn link_trait_if_found(&self, name: &str) -> String {
        self.auto_link(name, LookupKind::Trait)
    }

    /// Format a declared return type. Union members are split on `|`, stripped
    /// of a leading `\`, linked independently and joined again; a missing or
    /// empty type renders as `void`.
    pub fn format_return_type(&self, return_type: Option<&str>) -> String {
        let parts: Vec<&str> = return_type
            .unwrap_or_default()
            .split('|')
            .map(|part| normalize_name(part.trim()))
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return "void".to_string();
        }

        parts
            .into_iter()
            .map(|part| {
                let linked = self.link_if_found(part);
                if linked == part {
                    escape_html(part)
                } else {
                    linked
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Link every known class, interface or trait name in free text. The
    /// rest of the text is HTML-escaped and otherwise copied verbatim.
    pub fn link_prose(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if !(c.is_alphabetic() || c == '_' || c == '\\') {
                result.push_str(&escape_html(c.encode_utf8(&mut [0; 4])));
                continue;
            }

            let mut end = start + c.len_utf8();
            while let Some(&(pos, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' || next == '\\' {
                    end = pos + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let word = &text[start..end];
            match self.resolve_in_context(word) {
                Some((qualified, symbol)) => match self.anchor_with_title(word, &qualified, symbol) {
                    Some(anchor) => result.push_str(&anchor),
                    None => result.push_str(&escape_html(word)),
                },
                None => result.push_str(&escape_html(word)),
            }
        }

        result
    }

    fn resolve(&self, name: &str, kind: LookupKind) -> Option<SymbolRef<'a>> {
        let name = normalize_name(name);
        if name.is_empty() {
            return None;
        }
        match kind {
            LookupKind::ClassOrInterface => self.lookup.class_or_interface(name),
            LookupKind::Trait => self.lookup.trait_named(name),
            LookupKind::Function => self.lookup.function(name),
        }
    }

    /// Prose lookup: names relative to the current namespace win over
    /// global ones, then traits are tried after classes.
    fn resolve_in_context(&self, word: &str) -> Option<(String, SymbolRef<'a>)> {
        let bare = normalize_name(word);
        if bare.is_empty() || bare.ends_with('\\') {
            return None;
        }

        let mut candidates = Vec::with_capacity(2);
        if let Some(ns) = self.current_namespace {
            if !word.starts_with('\\') {
                candidates.push(format!("{ns}\\{bare}"));
            }
        }
        candidates.push(bare.to_string());

        candidates.into_iter().find_map(|candidate| {
            self.resolve(&candidate, LookupKind::ClassOrInterface)
                .or_else(|| self.resolve(&candidate, LookupKind::Trait))
                .map(|symbol| (candidate, symbol))
        })
    }

    fn anchor(&self, text: &str, symbol: SymbolRef<'_>) -> Option<String> {
        match self.router.link_symbol(symbol) {
            Ok(href) => Some(format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&href),
                escape_html(text)
            )),
            Err(err) => {
                tracing::debug!(text, error = %err, "symbol resolved but has no route");
                None
            }
        }
    }

    fn anchor_with_title(&self, text: &str, qualified: &str, symbol: SymbolRef<'_>) -> Option<String> {
        if normalize_name(text) == qualified {
            return self.anchor(text, symbol);
        }
        let href = self.router.link_symbol(symbol).ok()?;
        Some(format!(
            "<a href=\"{}\" title=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(qualified),
            escape_html(text)
        ))
    }
}

/// Split `Foo[]` into the element type and the container suffix
fn split_container(name: &str) -> (&str, &str) {
    match name.find("[]") {
        Some(pos) if pos > 0 && name[pos..].chars().all(|c| c == '[' || c == ']') => {
            (&name[..pos], &name[pos..])
        }
        _ => (name, ""),
    }
}
