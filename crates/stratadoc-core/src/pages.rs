//! Page data
//!
//! Every page is a plain serializable bag of borrowed model data so that a
//! renderer (the built-in HTML one or an external template engine) never
//! needs access to the index or the router to lay it out.

use std::path::Path;

use serde::Serialize;

use crate::classify::MemberBucket;
use crate::config::Config;
use crate::model::{ClassDescriptor, FunctionDescriptor};
use crate::namespace::{NamespaceContents, NamespaceNode};

/// Which section of the site a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePage {
    Overview,
    Namespace,
    Class,
    Function,
    Globals,
    Source,
}

impl ActivePage {
    /// Catalog listing the page is part of
    fn catalog_key(self) -> Option<&'static str> {
        match self {
            Self::Namespace => Some("namespaces"),
            Self::Class | Self::Source => Some("classes"),
            Self::Function => Some("functions"),
            Self::Overview | Self::Globals => None,
        }
    }
}

/// Fields shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext<'a> {
    pub title: &'a str,
    pub active_page: ActivePage,
    pub api_catalog_key: Option<&'static str>,
    pub site_category: Option<&'a str>,
    pub api_catalog: Option<&'a str>,
    /// Namespace tree for site navigation
    pub navigation: &'a [NamespaceNode],
    pub index_link: String,
    pub globals_link: String,
}

impl<'a> SiteContext<'a> {
    pub fn new(
        config: &'a Config,
        active_page: ActivePage,
        navigation: &'a [NamespaceNode],
        index_link: String,
        globals_link: String,
    ) -> Self {
        Self {
            title: &config.site.title,
            active_page,
            api_catalog_key: active_page.catalog_key(),
            site_category: config.site.category.as_deref(),
            api_catalog: config.site.catalog.as_deref(),
            navigation,
            index_link,
            globals_link,
        }
    }
}

/// Site entry page
#[derive(Debug, Clone, Serialize)]
pub struct OverviewPage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
}

/// A class, interface or trait page
#[derive(Debug, Clone, Serialize)]
pub struct ClassPage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
    pub class: &'a ClassDescriptor,
    pub members: MemberBucket<'a>,
    pub namespace_link: String,
    /// Link to the source page of the declaring file, when source pages
    /// are generated and the file is known
    pub source_link: Option<String>,
}

/// A free-standing function page
#[derive(Debug, Clone, Serialize)]
pub struct FunctionPage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
    pub function: &'a FunctionDescriptor,
    pub namespace_link: String,
    pub source_link: Option<String>,
}

/// A namespace page
#[derive(Debug, Clone, Serialize)]
pub struct NamespacePage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
    #[serde(flatten)]
    pub contents: NamespaceContents<'a>,
}

/// Symbols declared outside of any namespace
#[derive(Debug, Clone, Serialize)]
pub struct GlobalsPage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
    #[serde(flatten)]
    pub contents: NamespaceContents<'a>,
}

/// A highlighted source file
#[derive(Debug, Clone, Serialize)]
pub struct SourcePage<'a> {
    #[serde(flatten)]
    pub site: SiteContext<'a>,
    pub file: &'a Path,
    /// Symbols declared in the file
    pub declared: Vec<&'a str>,
    /// Highlighted HTML
    pub source: String,
}

/// Any page the generator produces
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "template", rename_all = "lowercase")]
pub enum Page<'a> {
    Overview(OverviewPage<'a>),
    Class(ClassPage<'a>),
    Function(FunctionPage<'a>),
    Namespace(NamespacePage<'a>),
    Globals(GlobalsPage<'a>),
    Source(SourcePage<'a>),
}

impl<'a> Page<'a> {
    pub fn site(&self) -> &SiteContext<'a> {
        match self {
            Self::Overview(page) => &page.site,
            Self::Class(page) => &page.site,
            Self::Function(page) => &page.site,
            Self::Namespace(page) => &page.site,
            Self::Globals(page) => &page.site,
            Self::Source(page) => &page.site,
        }
    }
}
