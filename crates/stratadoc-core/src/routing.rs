//! Symbol routing
//!
//! Maps a symbol reference to the output path of the page that documents
//! it. Route computation is a pure function of (kind, key): the same symbol
//! always resolves to the same path within a run, so a page can link to
//! pages that have not been rendered yet.

use std::path::Path;

use serde::Serialize;

use crate::error::RouteError;
use crate::model::{normalize_name, ClassKind, Member, MemberKind, SymbolRef};

/// Kind of page a route points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Namespace,
    Symbol,
    SourceView,
}

impl RouteKind {
    fn operation(self) -> &'static str {
        match self {
            Self::Namespace => "link_namespace",
            Self::Symbol => "link_symbol",
            Self::SourceView => "link_source",
        }
    }
}

/// A resolved route: page prefix plus key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    /// Page name prefix, e.g. `class` or `namespace`
    pub prefix: &'static str,
    /// Filesystem-safe key derived from the symbol identity
    pub key: String,
}

/// Builds output paths for routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    base_url: String,
    extension: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("", "html")
    }
}

impl Router {
    /// Create a router. `base_url` is prepended verbatim to every path.
    pub fn new(base_url: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            extension: extension.into(),
        }
    }

    /// Resolve `target` into a route of the given kind.
    ///
    /// # Errors
    ///
    /// Fails when `target` is not a valid argument for `kind`, or when a
    /// source route is requested for a symbol without a file location.
    pub fn route(&self, kind: RouteKind, target: SymbolRef<'_>) -> Result<Route, RouteError> {
        let (prefix, key) = match (kind, target) {
            (RouteKind::Namespace, SymbolRef::Namespace(name)) => ("namespace", file_key(name)),
            // the descriptor's own kind picks the prefix, whichever variant wraps it
            (RouteKind::Symbol, SymbolRef::Class(class) | SymbolRef::Interface(class) | SymbolRef::Trait(class)) => {
                (class_prefix(class.kind), file_key(&class.name))
            }
            (RouteKind::Symbol, SymbolRef::Function(function)) => ("function", file_key(&function.name)),
            (RouteKind::SourceView, SymbolRef::Namespace(_)) => {
                return Err(invalid_argument(kind, "a symbol with a source location", target));
            }
            (RouteKind::SourceView, symbol) => {
                let file = symbol.file().ok_or_else(|| RouteError::MissingSourceLocation {
                    symbol: symbol.name(),
                })?;
                ("source", source_key(file))
            }
            (RouteKind::Namespace, _) => return Err(invalid_argument(kind, "a namespace", target)),
            (RouteKind::Symbol, _) => {
                return Err(invalid_argument(kind, "a class, interface, trait or function", target));
            }
        };
        Ok(Route { prefix, key })
    }

    /// Output path of a resolved route
    pub fn path(&self, route: &Route) -> String {
        format!("{}{}-{}.{}", self.base_url, route.prefix, route.key, self.extension)
    }

    /// Resolve and format in one step
    pub fn build_route(&self, kind: RouteKind, target: SymbolRef<'_>) -> Result<String, RouteError> {
        self.route(kind, target).map(|route| self.path(&route))
    }

    /// Path of a namespace page
    pub fn link_namespace(&self, namespace: &str) -> String {
        let route = Route {
            prefix: "namespace",
            key: file_key(namespace),
        };
        self.path(&route)
    }

    /// Path of the page documenting a class, interface, trait or function
    pub fn link_symbol(&self, symbol: SymbolRef<'_>) -> Result<String, RouteError> {
        self.build_route(RouteKind::Symbol, symbol)
    }

    /// Path of the annotated source page of a symbol's file
    pub fn link_source(&self, symbol: SymbolRef<'_>) -> Result<String, RouteError> {
        self.build_route(RouteKind::SourceView, symbol)
    }

    /// Output file of a path produced by this router, relative to the
    /// destination directory
    pub fn file_path<'p>(&self, path: &'p str) -> &'p str {
        path.strip_prefix(self.base_url.as_str()).unwrap_or(path)
    }

    /// Path of the globals page
    pub fn globals(&self) -> String {
        format!("{}globals.{}", self.base_url, self.extension)
    }

    /// Path of the site entry page
    pub fn index(&self) -> String {
        format!("{}index.{}", self.base_url, self.extension)
    }

    /// In-page anchor of a member on its class page
    pub fn anchor(member: &Member) -> String {
        let prefix = match member.kind {
            MemberKind::Constant => "constant",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        };
        format!("{}-{}", prefix, file_key(&member.name))
    }
}

fn class_prefix(kind: ClassKind) -> &'static str {
    match kind {
        ClassKind::Class => "class",
        ClassKind::Interface => "interface",
        ClassKind::Trait => "trait",
    }
}

fn invalid_argument(kind: RouteKind, expected: &'static str, target: SymbolRef<'_>) -> RouteError {
    RouteError::InvalidArgument {
        operation: kind.operation(),
        expected,
        found: target.kind_name(),
    }
}

/// Filesystem-safe form of a qualified name. Namespace separators become
/// `.` so they never collide with path separators.
fn file_key(name: &str) -> String {
    normalize_name(name)
        .chars()
        .map(|c| match c {
            '\\' | '/' => '.',
            c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') => c,
            _ => '_',
        })
        .collect()
}

fn source_key(file: &Path) -> String {
    let display = file.to_string_lossy();
    let trimmed = display.trim_start_matches("./").trim_start_matches('/');
    file_key(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassDescriptor, ClassKind, FunctionDescriptor, Staticness, Visibility};

    #[test]
    fn test_namespace_route_is_deterministic() {
        let router = Router::default();
        let first = router.build_route(RouteKind::Namespace, SymbolRef::Namespace("A\\B")).unwrap();
        let second = router.build_route(RouteKind::Namespace, SymbolRef::Namespace("A\\B")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "namespace-A.B.html");
        assert_eq!(router.link_namespace("A\\B"), first);
    }

    #[test]
    fn test_symbol_routes_by_kind() {
        let router = Router::default();
        let class = ClassDescriptor::new("App\\Http\\Client", ClassKind::Class);
        let interface = ClassDescriptor::new("App\\Http\\Transport", ClassKind::Interface);
        let used = ClassDescriptor::new("App\\Http\\Retries", ClassKind::Trait);
        let function = FunctionDescriptor::new("App\\Http\\get");

        assert_eq!(router.link_symbol(class.as_symbol()).unwrap(), "class-App.Http.Client.html");
        assert_eq!(
            router.link_symbol(interface.as_symbol()).unwrap(),
            "interface-App.Http.Transport.html"
        );
        assert_eq!(router.link_symbol(used.as_symbol()).unwrap(), "trait-App.Http.Retries.html");
        assert_eq!(
            router.link_symbol(SymbolRef::Function(&function)).unwrap(),
            "function-App.Http.get.html"
        );
    }

    #[test]
    fn test_base_url_and_extension() {
        let router = Router::new("/api/", "htm");
        assert_eq!(router.link_namespace("none"), "/api/namespace-none.htm");
        assert_eq!(router.globals(), "/api/globals.htm");
        assert_eq!(router.index(), "/api/index.htm");
        assert_eq!(router.file_path(&router.link_namespace("App")), "namespace-App.htm");
    }

    #[test]
    fn test_symbol_route_follows_descriptor_kind() {
        let router = Router::default();
        let interface = ClassDescriptor::new("App\\Transport", ClassKind::Interface);
        let used = ClassDescriptor::new("App\\Retries", ClassKind::Trait);

        let canonical = router.link_symbol(interface.as_symbol()).unwrap();
        assert_eq!(canonical, "interface-App.Transport.html");
        assert_eq!(router.link_symbol(SymbolRef::Class(&interface)).unwrap(), canonical);
        assert_eq!(router.link_symbol(SymbolRef::Trait(&interface)).unwrap(), canonical);
        assert_eq!(
            router.link_symbol(SymbolRef::Class(&used)).unwrap(),
            router.link_symbol(used.as_symbol()).unwrap()
        );
        assert_eq!(
            router.route(RouteKind::Symbol, SymbolRef::Class(&used)).unwrap(),
            Route {
                prefix: "trait",
                key: "App.Retries".to_string(),
            }
        );
    }

    #[test]
    fn test_source_route() {
        let router = Router::default();
        let class = ClassDescriptor::new("App\\Foo", ClassKind::Class).with_file("./src/Foo.php");
        assert_eq!(router.link_source(class.as_symbol()).unwrap(), "source-src.Foo.php.html");

        let path = Path::new("src/Foo.php");
        assert_eq!(
            router.link_source(SymbolRef::SourceLocation(path)).unwrap(),
            "source-src.Foo.php.html"
        );
    }

    #[test]
    fn test_source_route_without_location_fails() {
        let router = Router::default();
        let builtin = ClassDescriptor::new("ArrayObject", ClassKind::Class);
        assert_eq!(
            router.link_source(builtin.as_symbol()),
            Err(RouteError::MissingSourceLocation {
                symbol: "ArrayObject".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_argument_kind_is_rejected() {
        let router = Router::default();
        let err = router.link_symbol(SymbolRef::Namespace("App")).unwrap_err();
        assert_eq!(
            err,
            RouteError::InvalidArgument {
                operation: "link_symbol",
                expected: "a class, interface, trait or function",
                found: "namespace",
            }
        );

        let class = ClassDescriptor::new("App\\Foo", ClassKind::Class);
        let err = router.build_route(RouteKind::Namespace, class.as_symbol()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidArgument { operation: "link_namespace", found: "class", .. }));

        let err = router.link_source(SymbolRef::Namespace("App")).unwrap_err();
        assert!(matches!(err, RouteError::InvalidArgument { operation: "link_source", .. }));

        let path = Path::new("a.php");
        assert!(router.link_symbol(SymbolRef::SourceLocation(path)).is_err());
    }

    #[test]
    fn test_member_anchor() {
        let method = Member::method("__construct", Visibility::Public, Staticness::Instance, "A");
        assert_eq!(Router::anchor(&method), "method-__construct");
        let constant = Member::constant("MAX", Visibility::Public, "A");
        assert_eq!(Router::anchor(&constant), "constant-MAX");
    }
}
