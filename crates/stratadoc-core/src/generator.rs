//! Page generation
//!
//! Builds the data of every page, renders the pages in parallel with Rayon
//! and hands the complete set back to the caller. Nothing is written here:
//! the caller decides what to do with a partial result.

use std::collections::HashSet;
use std::path::Path;

use rayon::prelude::*;

use crate::classify::classify;
use crate::config::Config;
use crate::constants::ConstantStore;
use crate::error::{GenerateError, RouteError};
use crate::html::{HtmlRenderer, Renderer};
use crate::index::SymbolIndex;
use crate::linking::Linker;
use crate::model::{ClassDescriptor, FunctionDescriptor, SymbolRef};
use crate::namespace::{NamespaceNode, NamespaceResolver, ROOT_NAMESPACE};
use crate::pages::{
    ActivePage, ClassPage, FunctionPage, GlobalsPage, NamespacePage, OverviewPage, Page, SiteContext, SourcePage,
};
use crate::routing::Router;
use crate::source::{FsSourceReader, PlainHighlighter, SourceHighlighter, SourceReader};

/// What to do when a page fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the run on the first failing page
    #[default]
    Halt,
    /// Skip failing pages and report them
    Continue,
}

/// A fully rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output file, relative to the destination directory
    pub path: String,
    pub contents: String,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub pages: Vec<RenderedPage>,
    /// Pages skipped under [`ErrorPolicy::Continue`]
    pub failures: Vec<GenerateError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Find a rendered page by output path
    pub fn page(&self, path: &str) -> Option<&RenderedPage> {
        self.pages.iter().find(|page| page.path == path)
    }
}

/// One page to produce
#[derive(Debug, Clone, Copy)]
enum Job<'a> {
    Overview,
    Globals,
    Namespace(&'a str),
    Class(&'a ClassDescriptor),
    Function(&'a FunctionDescriptor),
    Source(&'a Path),
}

impl Job<'_> {
    /// Identity used in error reports before the page path is known
    fn label(&self) -> String {
        match self {
            Self::Overview => "overview".to_string(),
            Self::Globals => "globals".to_string(),
            Self::Namespace(name) => format!("namespace {name}"),
            Self::Class(class) => format!("{} {}", class.as_symbol().kind_name(), class.name),
            Self::Function(function) => format!("function {}", function.name),
            Self::Source(file) => format!("source {}", file.display()),
        }
    }
}

/// Shared, read-only state of one run
struct RunContext<'r> {
    resolver: NamespaceResolver<'r>,
    tree: Vec<NamespaceNode>,
}

/// Renders the documentation site for one symbol model
pub struct Generator<'a> {
    config: &'a Config,
    index: &'a SymbolIndex<'a>,
    constants: &'a dyn ConstantStore,
    router: Router,
    renderer: Box<dyn Renderer + 'a>,
    highlighter: Box<dyn SourceHighlighter + 'a>,
    sources: Box<dyn SourceReader + 'a>,
    threads: Option<usize>,
}

impl<'a> Generator<'a> {
    /// Generator with the built-in HTML renderer, plain highlighting and
    /// sources read from the configured source root
    pub fn new(config: &'a Config, index: &'a SymbolIndex<'a>, constants: &'a dyn ConstantStore) -> Self {
        Self {
            config,
            index,
            constants,
            router: config.router(),
            renderer: Box::new(HtmlRenderer),
            highlighter: Box::new(PlainHighlighter),
            sources: Box::new(FsSourceReader::new(config.source.root.clone())),
            threads: None,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'a) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl SourceHighlighter + 'a) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: impl SourceReader + 'a) -> Self {
        self.sources = Box::new(sources);
        self
    }

    /// Render on a dedicated pool of `threads` workers instead of the
    /// global Rayon pool
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Render every page of the site.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::Halt`] the first failing page aborts the run
    /// and no pages are returned. Under [`ErrorPolicy::Continue`] this never
    /// fails; failures are listed in the report instead.
    pub fn generate(&self, policy: ErrorPolicy) -> Result<GenerationReport, GenerateError> {
        let resolver = NamespaceResolver::new(self.index, self.constants);
        let tree = resolver.tree();
        let context = RunContext { resolver, tree };
        let jobs = self.jobs(&context);

        tracing::info!(pages = jobs.len(), ?policy, "generating documentation");

        let report = match self.threads.map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build()) {
            Some(Ok(pool)) => pool.install(|| self.run(&jobs, &context, policy))?,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "failed to build thread pool, using the global pool");
                self.run(&jobs, &context, policy)?
            }
            None => self.run(&jobs, &context, policy)?,
        };

        warn_on_collisions(&report.pages);
        tracing::info!(
            pages = report.pages.len(),
            failures = report.failures.len(),
            "generation finished"
        );
        Ok(report)
    }

    fn run(
        &self,
        jobs: &[Job<'_>],
        context: &RunContext<'_>,
        policy: ErrorPolicy,
    ) -> Result<GenerationReport, GenerateError> {
        match policy {
            ErrorPolicy::Halt => {
                let pages = jobs
                    .par_iter()
                    .map(|job| self.render_job(*job, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GenerationReport {
                    pages,
                    failures: Vec::new(),
                })
            }
            ErrorPolicy::Continue => {
                let results: Vec<_> = jobs
                    .par_iter()
                    .map(|job| self.render_job(*job, context))
                    .collect();

                let mut report = GenerationReport::default();
                for result in results {
                    match result {
                        Ok(page) => report.pages.push(page),
                        Err(err) => {
                            tracing::warn!(page = err.page(), error = %err, "skipping page");
                            report.failures.push(err);
                        }
                    }
                }
                Ok(report)
            }
        }
    }

    fn jobs<'j>(&'j self, context: &'j RunContext<'j>) -> Vec<Job<'j>> {
        let model = self.index.model();
        let mut jobs = vec![Job::Overview, Job::Globals];
        jobs.extend(context.resolver.namespaces().iter().copied().map(Job::Namespace));
        jobs.extend(model.classes.iter().map(Job::Class));
        jobs.extend(model.functions.iter().map(Job::Function));
        if self.config.output.source_code {
            jobs.extend(self.index.source_files().into_iter().map(Job::Source));
        }
        jobs
    }

    fn render_job(&self, job: Job<'_>, context: &RunContext<'_>) -> Result<RenderedPage, GenerateError> {
        let link = self.page_path(job).map_err(|source| GenerateError::Route {
            page: job.label(),
            source,
        })?;
        let path = self.router.file_path(&link).to_string();
        let page = self.build_page(job, context, &path)?;

        let linker = Linker::new(&self.router, self.index);
        let contents = self
            .renderer
            .render(&page, &linker)
            .map_err(|source| GenerateError::Render {
                page: path.clone(),
                source,
            })?;

        tracing::trace!(page = %path, bytes = contents.len(), "rendered page");
        Ok(RenderedPage { path, contents })
    }

    fn page_path(&self, job: Job<'_>) -> Result<String, RouteError> {
        match job {
            Job::Overview => Ok(self.router.index()),
            Job::Globals => Ok(self.router.globals()),
            Job::Namespace(name) => Ok(self.router.link_namespace(name)),
            Job::Class(class) => self.router.link_symbol(class.as_symbol()),
            Job::Function(function) => self.router.link_symbol(SymbolRef::Function(function)),
            Job::Source(file) => self.router.link_source(SymbolRef::SourceLocation(file)),
        }
    }

    fn site<'p>(&'p self, context: &'p RunContext<'_>, active: ActivePage) -> SiteContext<'p> {
        SiteContext::new(
            self.config,
            active,
            &context.tree,
            self.router.index(),
            self.router.globals(),
        )
    }

    /// Source page link for a symbol, when source pages are generated
    fn source_link(&self, symbol: SymbolRef<'_>, page: &str) -> Result<Option<String>, GenerateError> {
        if !self.config.output.source_code || symbol.file().is_none() {
            return Ok(None);
        }
        self.router
            .link_source(symbol)
            .map(Some)
            .map_err(|source| GenerateError::Route {
                page: page.to_string(),
                source,
            })
    }

    fn build_page<'p>(
        &'p self,
        job: Job<'p>,
        context: &'p RunContext<'p>,
        path: &str,
    ) -> Result<Page<'p>, GenerateError> {
        let page = match job {
            Job::Overview => Page::Overview(OverviewPage {
                site: self.site(context, ActivePage::Overview),
            }),
            Job::Globals => Page::Globals(GlobalsPage {
                site: self.site(context, ActivePage::Globals),
                contents: context.resolver.page_data_for(ROOT_NAMESPACE),
            }),
            Job::Namespace(name) => Page::Namespace(NamespacePage {
                site: self.site(context, ActivePage::Namespace),
                contents: context.resolver.page_data_for(name),
            }),
            Job::Class(class) => Page::Class(ClassPage {
                site: self.site(context, ActivePage::Class),
                class,
                members: classify(class).map_err(|source| GenerateError::Classify {
                    page: path.to_string(),
                    source,
                })?,
                namespace_link: self.router.link_namespace(&class.namespace),
                source_link: self.source_link(class.as_symbol(), path)?,
            }),
            Job::Function(function) => Page::Function(FunctionPage {
                site: self.site(context, ActivePage::Function),
                function,
                namespace_link: self.router.link_namespace(&function.namespace),
                source_link: self.source_link(SymbolRef::Function(function), path)?,
            }),
            Job::Source(file) => {
                let content = self.sources.read(file).map_err(|err| GenerateError::Source {
                    page: path.to_string(),
                    file: file.to_path_buf(),
                    reason: err.to_string(),
                })?;
                Page::Source(SourcePage {
                    site: self.site(context, ActivePage::Source),
                    file,
                    declared: self.declared_in(file),
                    source: self.highlighter.highlight(&content),
                })
            }
        };
        Ok(page)
    }

    fn declared_in(&self, file: &Path) -> Vec<&'a str> {
        let model = self.index.model();
        let classes = model
            .classes
            .iter()
            .filter(|c| c.file.as_deref() == Some(file))
            .map(|c| c.name.as_str());
        let functions = model
            .functions
            .iter()
            .filter(|f| f.file.as_deref() == Some(file))
            .map(|f| f.name.as_str());
        classes.chain(functions).collect()
    }
}

/// Distinct symbols whose keys sanitize to the same path overwrite each
/// other on disk
fn warn_on_collisions(pages: &[RenderedPage]) {
    let mut seen = HashSet::with_capacity(pages.len());
    for page in pages {
        if !seen.insert(page.path.as_str()) {
            tracing::warn!(page = %page.path, "two pages share one output path");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ConstantSet, MemoryConstantStore};
    use crate::error::RenderError;
    use crate::model::{ClassKind, Member, Staticness, SymbolModel, Visibility};
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    struct MemorySources(HashMap<PathBuf, String>);

    impl SourceReader for MemorySources {
        fn read(&self, file: &Path) -> io::Result<String> {
            self.0
                .get(file)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn sources() -> MemorySources {
        MemorySources(HashMap::from([(
            PathBuf::from("src/Client.php"),
            "<?php\nclass Client {}\n".to_string(),
        )]))
    }

    fn model() -> SymbolModel {
        let mut client = ClassDescriptor::new("App\\Http\\Client", ClassKind::Class).with_file("src/Client.php");
        client
            .methods
            .push(Member::method("send", Visibility::Public, Staticness::Instance, "App\\Http\\Client"));
        SymbolModel {
            classes: vec![client, ClassDescriptor::new("Kernel", ClassKind::Class)],
            functions: vec![FunctionDescriptor::new("App\\boot")],
        }
    }

    #[test]
    fn test_generates_every_page() {
        let model = model();
        let index = SymbolIndex::new(&model);
        let mut set = ConstantSet::new();
        set.insert("VERSION".to_string(), "'2.0'".to_string());
        let store = MemoryConstantStore::new().with("App", set);
        let config = Config::with_title("Demo");

        let report = Generator::new(&config, &index, &store)
            .with_sources(sources())
            .generate(ErrorPolicy::Halt)
            .unwrap();

        assert!(report.is_success());
        let mut paths: Vec<_> = report.pages.iter().map(|p| p.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(
            paths,
            vec![
                "class-App.Http.Client.html",
                "class-Kernel.html",
                "function-App.boot.html",
                "globals.html",
                "index.html",
                "namespace-App.Http.html",
                "namespace-App.html",
                "namespace-none.html",
                "source-src.Client.php.html",
            ]
        );

        let namespace = report.page("namespace-App.html").unwrap();
        assert!(namespace.contents.contains("constant-VERSION"));
        let class = report.page("class-App.Http.Client.html").unwrap();
        assert!(class.contents.contains("href=\"source-src.Client.php.html\""));
        let source = report.page("source-src.Client.php.html").unwrap();
        assert!(source.contents.contains("class Client {}"));
    }

    #[test]
    fn test_source_pages_can_be_disabled() {
        let model = model();
        let index = SymbolIndex::new(&model);
        let store = MemoryConstantStore::new();
        let mut config = Config::with_title("Demo");
        config.output.source_code = false;

        let report = Generator::new(&config, &index, &store)
            .generate(ErrorPolicy::Halt)
            .unwrap();

        assert!(report.pages.iter().all(|p| !p.path.starts_with("source-")));
        let class = report.page("class-App.Http.Client.html").unwrap();
        assert!(!class.contents.contains("source-src.Client.php.html"));
    }

    fn broken_model() -> SymbolModel {
        let mut model = model();
        // private members are never inherited
        model.classes[1].inherited_constants.insert(
            "Base".to_string(),
            vec![Member::constant("SECRET", Visibility::Private, "Base")],
        );
        model
    }

    #[test]
    fn test_halt_policy_stops_on_failure() {
        let model = broken_model();
        let index = SymbolIndex::new(&model);
        let store = MemoryConstantStore::new();
        let config = Config::with_title("Demo");

        let err = Generator::new(&config, &index, &store)
            .with_sources(sources())
            .generate(ErrorPolicy::Halt)
            .unwrap_err();
        assert!(matches!(err, GenerateError::Classify { .. }));
        assert_eq!(err.page(), "class-Kernel.html");
    }

    #[test]
    fn test_continue_policy_collects_failures() {
        let model = broken_model();
        let index = SymbolIndex::new(&model);
        let store = MemoryConstantStore::new();
        let config = Config::with_title("Demo");

        let report = Generator::new(&config, &index, &store)
            .with_sources(MemorySources(HashMap::new()))
            .generate(ErrorPolicy::Continue)
            .unwrap();

        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f, GenerateError::Source { page, .. } if page == "source-src.Client.php.html")));
        assert!(report.page("class-Kernel.html").is_none());
        assert!(report.page("class-App.Http.Client.html").is_some());
    }

    struct JsonRenderer;

    impl Renderer for JsonRenderer {
        fn render(&self, page: &Page<'_>, _linker: &Linker<'_>) -> Result<String, RenderError> {
            serde_json::to_string(page).map_err(|err| RenderError::Template(err.to_string()))
        }
    }

    #[test]
    fn test_custom_renderer_receives_page_data() {
        let model = model();
        let index = SymbolIndex::new(&model);
        let store = MemoryConstantStore::new();
        let mut config = Config::with_title("Demo");
        config.site.catalog = Some("core".to_string());

        let report = Generator::new(&config, &index, &store)
            .with_renderer(JsonRenderer)
            .with_sources(sources())
            .with_threads(2)
            .generate(ErrorPolicy::Halt)
            .unwrap();

        let page = report.page("namespace-App.Http.html").unwrap();
        let json: serde_json::Value = serde_json::from_str(&page.contents).unwrap();
        assert_eq!(json["template"], "namespace");
        assert_eq!(json["api_catalog_key"], "namespaces");
        assert_eq!(json["api_catalog"], "core");
        assert_eq!(json["simple_name"], "Http");
        assert_eq!(json["classes"][0]["name"], "App\\Http\\Client");
    }
}
