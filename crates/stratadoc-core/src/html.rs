//! HTML documentation renderer

use std::fmt::Write;

use crate::classify::{InheritedBuckets, MemberBucket, VisibilityBuckets};
use crate::error::RenderError;
use crate::linking::{Linker, LookupKind};
use crate::model::{ClassDescriptor, ClassKind, FunctionDescriptor, Member, MemberKind, Staticness, SymbolRef};
use crate::namespace::{NamespaceContents, NamespaceNode, ROOT_NAMESPACE};
use crate::pages::{ClassPage, FunctionPage, NamespacePage, Page, SiteContext, SourcePage};
use crate::routing::Router;

/// Lays out a page as a string
pub trait Renderer: Send + Sync {
    /// Render `page`. `linker` resolves names mentioned on the page.
    fn render(&self, page: &Page<'_>, linker: &Linker<'_>) -> Result<String, RenderError>;
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Self-contained HTML pages with an embedded stylesheet
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, page: &Page<'_>, linker: &Linker<'_>) -> Result<String, RenderError> {
        let mut output = String::new();
        let site = page.site();

        let heading = match page {
            Page::Overview(_) => "Overview".to_string(),
            Page::Class(page) => page.class.name.clone(),
            Page::Function(page) => page.function.name.clone(),
            Page::Namespace(page) => page.contents.name.to_string(),
            Page::Globals(_) => "Global symbols".to_string(),
            Page::Source(page) => page.file.display().to_string(),
        };

        Self::write_head(&mut output, site, &heading)?;
        writeln!(output, "<body>")?;
        Self::write_nav(&mut output, site, linker.router())?;
        writeln!(output, "<main class=\"content\">")?;

        match page {
            Page::Overview(page) => Self::write_overview(&mut output, &page.site, linker.router())?,
            Page::Class(page) => Self::write_class(&mut output, page, linker)?,
            Page::Function(page) => Self::write_function(&mut output, page, linker)?,
            Page::Namespace(page) => Self::write_namespace(&mut output, page, linker)?,
            Page::Globals(page) => Self::write_listing(&mut output, &page.contents, linker)?,
            Page::Source(page) => Self::write_source(&mut output, page, linker)?,
        }

        writeln!(output, "</main>")?;
        writeln!(output, "<footer>")?;
        writeln!(output, "  <p>Generated by stratadoc {}</p>", crate::VERSION)?;
        writeln!(output, "</footer>")?;
        writeln!(output, "</body>")?;
        writeln!(output, "</html>")?;

        Ok(output)
    }
}

impl HtmlRenderer {
    fn write_head(output: &mut String, site: &SiteContext<'_>, heading: &str) -> std::fmt::Result {
        writeln!(output, "<!DOCTYPE html>")?;
        writeln!(output, "<html lang=\"en\">")?;
        writeln!(output, "<head>")?;
        writeln!(output, "  <meta charset=\"UTF-8\">")?;
        writeln!(
            output,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(
            output,
            "  <title>{} - {}</title>",
            escape_html(heading),
            escape_html(site.title)
        )?;
        if let Some(category) = site.site_category {
            writeln!(output, "  <meta name=\"category\" content=\"{}\">", escape_html(category))?;
        }
        if let Some(catalog) = site.api_catalog {
            writeln!(output, "  <meta name=\"catalog\" content=\"{}\">", escape_html(catalog))?;
        }
        Self::write_styles(output)?;
        writeln!(output, "</head>")
    }

    fn write_styles(output: &mut String) -> std::fmt::Result {
        writeln!(output, "<style>")?;
        writeln!(
            output,
            r#"
:root {{
  --bg-color: #fdfdfd;
  --text-color: #1f2328;
  --accent-color: #3b5bdb;
  --code-bg: #f3f4f6;
  --sidebar-bg: #f6f8fa;
  --border-color: #d0d7de;
}}

* {{
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}}

body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
  background-color: var(--bg-color);
  color: var(--text-color);
  line-height: 1.6;
  display: flex;
}}

a {{
  color: var(--accent-color);
  text-decoration: none;
}}

.sidebar {{
  width: 280px;
  background-color: var(--sidebar-bg);
  height: 100vh;
  position: fixed;
  overflow-y: auto;
  border-right: 1px solid var(--border-color);
  padding: 1.5rem;
}}

.sidebar ul {{
  list-style: none;
  padding-left: 0.75rem;
}}

.content {{
  margin-left: 280px;
  padding: 2rem 3rem;
  max-width: 960px;
}}

header h1 {{
  font-size: 2rem;
  margin-bottom: 1rem;
  word-break: break-all;
}}

section {{
  margin: 2rem 0;
}}

section h2 {{
  font-size: 1.4rem;
  border-bottom: 2px solid var(--border-color);
  padding-bottom: 0.5rem;
  margin-bottom: 1rem;
}}

section h3 {{
  font-size: 1rem;
  color: #57606a;
  margin: 1rem 0 0.5rem;
}}

.member {{
  margin: 0.75rem 0;
  padding: 0.75rem 1rem;
  background: var(--code-bg);
  border-radius: 6px;
}}

.signature, code, pre {{
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: 0.9rem;
}}

.description {{
  color: #444c56;
  margin: 0.5rem 0;
}}

pre.source .line-number {{
  color: #8c959f;
  margin-right: 1rem;
  user-select: none;
}}

footer {{
  position: fixed;
  bottom: 0;
  right: 0;
  padding: 0.5rem 1rem;
  font-size: 0.75rem;
  color: #8c959f;
}}
"#
        )?;
        writeln!(output, "</style>")
    }

    fn write_nav(output: &mut String, site: &SiteContext<'_>, router: &Router) -> std::fmt::Result {
        writeln!(output, "<nav class=\"sidebar\">")?;
        writeln!(
            output,
            "  <h2><a href=\"{}\">{}</a></h2>",
            escape_html(&site.index_link),
            escape_html(site.title)
        )?;
        writeln!(output, "  <p><a href=\"{}\">Globals</a></p>", escape_html(&site.globals_link))?;
        Self::write_tree(output, site.navigation, router)?;
        writeln!(output, "</nav>")
    }

    fn write_tree(output: &mut String, nodes: &[NamespaceNode], router: &Router) -> std::fmt::Result {
        if nodes.is_empty() {
            return Ok(());
        }
        writeln!(output, "<ul>")?;
        for node in nodes {
            write!(
                output,
                "<li><a href=\"{}\">{}</a>",
                escape_html(&router.link_namespace(&node.name)),
                escape_html(&node.simple_name)
            )?;
            Self::write_tree(output, &node.children, router)?;
            writeln!(output, "</li>")?;
        }
        writeln!(output, "</ul>")
    }

    fn write_overview(output: &mut String, site: &SiteContext<'_>, router: &Router) -> std::fmt::Result {
        writeln!(output, "<header>")?;
        writeln!(output, "  <h1>{}</h1>", escape_html(site.title))?;
        writeln!(output, "</header>")?;
        writeln!(output, "<section id=\"namespaces\">")?;
        writeln!(output, "  <h2>Namespaces</h2>")?;
        Self::write_tree(output, site.navigation, router)?;
        writeln!(output, "</section>")
    }

    fn write_class(output: &mut String, page: &ClassPage<'_>, linker: &Linker<'_>) -> Result<(), RenderError> {
        let class = page.class;
        let kind = match class.kind {
            ClassKind::Class if class.exception => "Exception",
            ClassKind::Class => "Class",
            ClassKind::Interface => "Interface",
            ClassKind::Trait => "Trait",
        };

        writeln!(output, "<header>")?;
        writeln!(output, "  <h1>{} {}</h1>", kind, escape_html(class.short_name()))?;
        writeln!(
            output,
            "  <p>Namespace: <a href=\"{}\">{}</a></p>",
            escape_html(&page.namespace_link),
            escape_html(&class.namespace)
        )?;
        if let Some(parent) = &class.parent {
            writeln!(output, "  <p>Extends: {}</p>", linker.link_if_found(parent))?;
        }
        if !class.interfaces.is_empty() {
            let linked: Vec<String> = class.interfaces.iter().map(|i| linker.link_if_found(i)).collect();
            writeln!(output, "  <p>Implements: {}</p>", linked.join(", "))?;
        }
        if !page.members.traits.is_empty() {
            let linked: Vec<String> = page
                .members
                .traits
                .iter()
                .map(|t| linker.link_trait_if_found(t))
                .collect();
            writeln!(output, "  <p>Uses: {}</p>", linked.join(", "))?;
        }
        if let Some(source) = &page.source_link {
            writeln!(output, "  <p>Located at <a href=\"{}\">source</a></p>", escape_html(source))?;
        }
        writeln!(output, "</header>")?;

        // prose on a class page is read relative to the class's namespace
        let linker = &linker.in_namespace(&class.namespace);
        if !class.description.is_empty() {
            writeln!(
                output,
                "<section class=\"description\">{}</section>",
                linker.link_prose(&class.description)
            )?;
        }

        Self::write_members(output, page, linker)?;
        Ok(())
    }

    fn write_members(output: &mut String, page: &ClassPage<'_>, linker: &Linker<'_>) -> std::fmt::Result {
        let members: &MemberBucket<'_> = &page.members;
        let source = page.source_link.as_deref();

        if !members.constants.is_empty() || !members.inherited_constants.is_empty() {
            writeln!(output, "<section id=\"constants\">")?;
            writeln!(output, "  <h2>Constants</h2>")?;
            Self::write_visibility(output, &members.constants, None, linker, source)?;
            Self::write_inherited(output, &members.inherited_constants, linker)?;
            writeln!(output, "</section>")?;
        }

        for (id, heading, own, inherited) in [
            ("properties", "Properties", &members.properties, &members.inherited_properties),
            ("methods", "Methods", &members.methods, &members.inherited_methods),
        ] {
            let trait_members = if id == "properties" {
                &members.trait_properties
            } else {
                &members.trait_methods
            };
            let empty = own.static_members.is_empty()
                && own.instance.is_empty()
                && inherited.static_members.is_empty()
                && inherited.instance.is_empty()
                && trait_members.is_empty();
            if empty {
                continue;
            }

            writeln!(output, "<section id=\"{id}\">")?;
            writeln!(output, "  <h2>{heading}</h2>")?;
            Self::write_visibility(output, &own.static_members, Some(Staticness::Static), linker, source)?;
            Self::write_visibility(output, &own.instance, Some(Staticness::Instance), linker, source)?;
            for (name, list) in trait_members {
                writeln!(output, "  <h3>From trait {}</h3>", linker.link_trait_if_found(name))?;
                for member in list {
                    Self::write_member(output, member, linker, None)?;
                }
            }
            Self::write_inherited(output, &inherited.static_members, linker)?;
            Self::write_inherited(output, &inherited.instance, linker)?;
            writeln!(output, "</section>")?;
        }

        Ok(())
    }

    fn write_visibility(
        output: &mut String,
        buckets: &VisibilityBuckets<'_>,
        staticness: Option<Staticness>,
        linker: &Linker<'_>,
        source: Option<&str>,
    ) -> std::fmt::Result {
        let scope = match staticness {
            Some(Staticness::Static) => " static",
            Some(Staticness::Instance) | None => "",
        };
        for (label, list) in [
            ("Public", &buckets.public),
            ("Protected", &buckets.protected),
            ("Private", &buckets.private),
        ] {
            if list.is_empty() {
                continue;
            }
            writeln!(output, "  <h3>{label}{scope}</h3>")?;
            for member in list {
                Self::write_member(output, member, linker, source)?;
            }
        }
        Ok(())
    }

    fn write_inherited(output: &mut String, buckets: &InheritedBuckets<'_>, linker: &Linker<'_>) -> std::fmt::Result {
        // grouped by declaring ancestor, first-seen order
        let mut groups: Vec<(&str, Vec<&Member>)> = Vec::new();
        for &member in buckets.public.iter().chain(&buckets.protected) {
            match groups.iter_mut().find(|(ancestor, _)| *ancestor == member.declaring) {
                Some((_, list)) => list.push(member),
                None => groups.push((member.declaring.as_str(), vec![member])),
            }
        }

        for (ancestor, list) in groups {
            let names: Vec<String> = list
                .iter()
                .map(|m| format!("<code>{}</code>", escape_html(&m.name)))
                .collect();
            writeln!(
                output,
                "  <p class=\"inherited\">Inherited from {}: {}</p>",
                linker.link_if_found(ancestor),
                names.join(", ")
            )?;
        }
        Ok(())
    }

    fn write_member(
        output: &mut String,
        member: &Member,
        linker: &Linker<'_>,
        source: Option<&str>,
    ) -> std::fmt::Result {
        writeln!(output, "  <div class=\"member\" id=\"{}\">", Router::anchor(member))?;

        let modifiers = match member.staticness {
            Some(Staticness::Static) => format!("{} static", member.visibility),
            _ => member.visibility.to_string(),
        };
        let signature = match member.kind {
            MemberKind::Constant => format!(
                "{modifiers} const {}{}",
                escape_html(&member.name),
                Self::value_suffix(member)
            ),
            MemberKind::Property => format!(
                "{modifiers} ${}{}",
                escape_html(&member.name),
                Self::value_suffix(member)
            ),
            MemberKind::Method => format!(
                "{modifiers} function {}(): {}",
                escape_html(&member.name),
                linker.format_return_type(member.return_type.as_deref())
            ),
        };
        writeln!(output, "    <div class=\"signature\">{signature}</div>")?;

        if !member.description.is_empty() {
            writeln!(
                output,
                "    <div class=\"description\">{}</div>",
                linker.link_prose(&member.description)
            )?;
        }
        if let (Some(source), Some(line)) = (source, member.line) {
            writeln!(
                output,
                "    <p><a href=\"{}#{}\">line {}</a></p>",
                escape_html(source),
                line,
                line
            )?;
        }

        writeln!(output, "  </div>")
    }

    fn value_suffix(member: &Member) -> String {
        member
            .value
            .as_deref()
            .map(|value| format!(" = {}", escape_html(value)))
            .unwrap_or_default()
    }

    fn write_function(output: &mut String, page: &FunctionPage<'_>, linker: &Linker<'_>) -> std::fmt::Result {
        let function: &FunctionDescriptor = page.function;

        writeln!(output, "<header>")?;
        writeln!(output, "  <h1>Function {}</h1>", escape_html(function.short_name()))?;
        writeln!(
            output,
            "  <p>Namespace: <a href=\"{}\">{}</a></p>",
            escape_html(&page.namespace_link),
            escape_html(&function.namespace)
        )?;
        writeln!(output, "</header>")?;

        writeln!(output, "<section>")?;
        writeln!(
            output,
            "  <div class=\"signature\">function {}(): {}</div>",
            escape_html(function.short_name()),
            linker.format_return_type(function.return_type.as_deref())
        )?;
        if !function.description.is_empty() {
            writeln!(
                output,
                "  <div class=\"description\">{}</div>",
                linker.link_prose(&function.description)
            )?;
        }
        if let Some(source) = &page.source_link {
            match function.line {
                Some(line) => writeln!(
                    output,
                    "  <p>Located at <a href=\"{}#{line}\">line {line}</a></p>",
                    escape_html(source)
                )?,
                None => writeln!(output, "  <p>Located at <a href=\"{}\">source</a></p>", escape_html(source))?,
            }
        }
        writeln!(output, "</section>")
    }

    fn write_namespace(output: &mut String, page: &NamespacePage<'_>, linker: &Linker<'_>) -> Result<(), RenderError> {
        let contents = &page.contents;
        let router = linker.router();

        writeln!(output, "<header>")?;
        writeln!(output, "  <h1>Namespace {}</h1>", escape_html(contents.simple_name))?;
        if contents.name != contents.simple_name {
            writeln!(output, "  <p><code>{}</code></p>", escape_html(contents.name))?;
        }
        writeln!(output, "</header>")?;

        if !contents.child_namespaces.is_empty() {
            writeln!(output, "<section id=\"namespaces\">")?;
            writeln!(output, "  <h2>Namespaces</h2>")?;
            writeln!(output, "  <ul>")?;
            for child in &contents.child_namespaces {
                writeln!(
                    output,
                    "    <li><a href=\"{}\">{}</a></li>",
                    escape_html(&router.link_namespace(child)),
                    escape_html(child)
                )?;
            }
            writeln!(output, "  </ul>")?;
            writeln!(output, "</section>")?;
        }

        Self::write_listing(output, contents, linker)
    }

    /// Symbol tables shared by namespace and globals pages
    fn write_listing(
        output: &mut String,
        contents: &NamespaceContents<'_>,
        linker: &Linker<'_>,
    ) -> Result<(), RenderError> {
        let router = linker.router();

        for (id, heading, classes) in [
            ("classes", "Classes", &contents.classes),
            ("exceptions", "Exceptions", &contents.exceptions),
            ("interfaces", "Interfaces", &contents.interfaces),
            ("traits", "Traits", &contents.traits),
        ] {
            if classes.is_empty() {
                continue;
            }
            writeln!(output, "<section id=\"{id}\">")?;
            writeln!(output, "  <h2>{heading}</h2>")?;
            writeln!(output, "  <ul>")?;
            for class in classes {
                Self::write_summary_row(output, router, class)?;
            }
            writeln!(output, "  </ul>")?;
            writeln!(output, "</section>")?;
        }

        if !contents.functions.is_empty() {
            writeln!(output, "<section id=\"functions\">")?;
            writeln!(output, "  <h2>Functions</h2>")?;
            writeln!(output, "  <ul>")?;
            for &function in &contents.functions {
                let href = router.link_symbol(SymbolRef::Function(function))?;
                writeln!(
                    output,
                    "    <li><a href=\"{}\">{}</a>(): {}</li>",
                    escape_html(&href),
                    escape_html(function.short_name()),
                    linker.format_return_type(function.return_type.as_deref())
                )?;
            }
            writeln!(output, "  </ul>")?;
            writeln!(output, "</section>")?;
        }

        if !contents.constants.is_empty() {
            writeln!(output, "<section id=\"constants\">")?;
            writeln!(output, "  <h2>Constants</h2>")?;
            writeln!(output, "  <table>")?;
            for (name, value) in &contents.constants {
                writeln!(
                    output,
                    "    <tr id=\"constant-{}\"><td><code>{}</code></td><td><code>{}</code></td></tr>",
                    escape_html(name),
                    escape_html(name),
                    escape_html(value)
                )?;
            }
            writeln!(output, "  </table>")?;
            writeln!(output, "</section>")?;
        }

        if contents.name == ROOT_NAMESPACE
            && contents.classes.is_empty()
            && contents.exceptions.is_empty()
            && contents.interfaces.is_empty()
            && contents.traits.is_empty()
            && contents.functions.is_empty()
            && contents.constants.is_empty()
        {
            writeln!(output, "<p>No global symbols.</p>")?;
        }

        Ok(())
    }

    fn write_summary_row(output: &mut String, router: &Router, class: &ClassDescriptor) -> Result<(), RenderError> {
        let summary = class.description.lines().next().unwrap_or_default();
        let href = router.link_symbol(class.as_symbol())?;
        writeln!(
            output,
            "    <li><a href=\"{}\">{}</a> {}</li>",
            escape_html(&href),
            escape_html(class.short_name()),
            escape_html(summary)
        )?;
        Ok(())
    }

    fn write_source(output: &mut String, page: &SourcePage<'_>, linker: &Linker<'_>) -> std::fmt::Result {
        writeln!(output, "<header>")?;
        writeln!(output, "  <h1>{}</h1>", escape_html(&page.file.display().to_string()))?;
        if !page.declared.is_empty() {
            let linked: Vec<String> = page
                .declared
                .iter()
                .map(|name| {
                    let class = linker.link_if_found(name);
                    if class != *name {
                        return class;
                    }
                    let used = linker.link_trait_if_found(name);
                    if used != *name {
                        return used;
                    }
                    linker.auto_link(name, LookupKind::Function)
                })
                .collect();
            writeln!(output, "  <p>Declares: {}</p>", linked.join(", "))?;
        }
        writeln!(output, "</header>")?;
        writeln!(output, "{}", page.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::Config;
    use crate::index::SymbolIndex;
    use crate::model::{SymbolModel, TraitUse, Visibility};
    use crate::pages::ActivePage;

    fn model() -> SymbolModel {
        let mut base = ClassDescriptor::new("App\\Base", ClassKind::Class);
        base.methods
            .push(Member::method("boot", Visibility::Public, Staticness::Instance, "App\\Base"));

        let mut client = ClassDescriptor::new("App\\Client", ClassKind::Class).with_file("src/Client.php");
        client.parent = Some("App\\Base".to_string());
        client.description = "Talks to the <remote> Base.".to_string();
        client
            .constants
            .push(Member::constant("TIMEOUT", Visibility::Public, "App\\Client").with_value("30"));
        let mut send = Member::method("send", Visibility::Public, Staticness::Instance, "App\\Client")
            .with_return_type("\\App\\Base|null");
        send.line = Some(12);
        client.methods.push(send);
        client.inherited_methods.insert(
            "App\\Base".to_string(),
            vec![Member::method("boot", Visibility::Public, Staticness::Instance, "App\\Base")],
        );
        let mut retries = TraitUse::new("App\\Retries");
        retries
            .methods
            .push(Member::method("retry", Visibility::Protected, Staticness::Instance, "App\\Retries"));
        client.traits.push(retries);

        SymbolModel {
            classes: vec![base, client, ClassDescriptor::new("App\\Retries", ClassKind::Trait)],
            functions: vec![FunctionDescriptor::new("App\\connect")],
        }
    }

    fn site<'a>(config: &'a Config, active: ActivePage) -> SiteContext<'a> {
        SiteContext::new(config, active, &[], "index.html".into(), "globals.html".into())
    }

    #[test]
    fn test_render_class_page() {
        let model = model();
        let index = SymbolIndex::new(&model);
        let router = Router::default();
        let linker = Linker::new(&router, &index);
        let config = Config::with_title("Demo");
        let class = index.class("App\\Client").unwrap();

        let page = Page::Class(ClassPage {
            site: site(&config, ActivePage::Class),
            class,
            members: classify(class).unwrap(),
            namespace_link: router.link_namespace("App"),
            source_link: Some("source-src.Client.php.html".to_string()),
        });
        let html = HtmlRenderer.render(&page, &linker).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>App\\Client - Demo</title>"));
        assert!(html.contains("<h1>Class Client</h1>"));
        assert!(html.contains("Extends: <a href=\"class-App.Base.html\">App\\Base</a>"));
        assert!(html.contains("Uses: <a href=\"trait-App.Retries.html\">App\\Retries</a>"));
        assert!(html.contains("id=\"constant-TIMEOUT\""));
        assert!(html.contains("public const TIMEOUT = 30"));
        assert!(html.contains("public function send(): <a href=\"class-App.Base.html\">App\\Base</a>|null"));
        assert!(html.contains("href=\"source-src.Client.php.html#12\""));
        assert!(html.contains("From trait <a href=\"trait-App.Retries.html\">App\\Retries</a>"));
        assert!(html.contains("Inherited from <a href=\"class-App.Base.html\">App\\Base</a>: <code>boot</code>"));
        assert!(html.contains("Talks to the &lt;remote&gt; <a href=\"class-App.Base.html\" title=\"App\\Base\">Base</a>."));
    }

    #[test]
    fn test_render_namespace_page() {
        let model = model();
        let index = SymbolIndex::new(&model);
        let router = Router::default();
        let linker = Linker::new(&router, &index);
        let config = Config::with_title("Demo");

        let members = index.members_of("App");
        let contents = NamespaceContents {
            name: "App",
            simple_name: "App",
            classes: members.classes,
            exceptions: members.exceptions,
            interfaces: members.interfaces,
            traits: members.traits,
            functions: members.functions,
            constants: [("VERSION".to_string(), "'1.0'".to_string())].into_iter().collect(),
            child_namespaces: vec!["App\\Http"],
        };
        let page = Page::Namespace(NamespacePage {
            site: site(&config, ActivePage::Namespace),
            contents,
        });
        let html = HtmlRenderer.render(&page, &linker).unwrap();

        assert!(html.contains("<h1>Namespace App</h1>"));
        assert!(html.contains("<a href=\"namespace-App.Http.html\">App\\Http</a>"));
        assert!(html.contains("<a href=\"class-App.Client.html\">Client</a>"));
        assert!(html.contains("<a href=\"trait-App.Retries.html\">Retries</a>"));
        assert!(html.contains("<a href=\"function-App.connect.html\">connect</a>(): void"));
        assert!(html.contains("<tr id=\"constant-VERSION\">"));
    }

    #[test]
    fn test_globals_page_with_only_an_interface() {
        let model = SymbolModel {
            classes: vec![ClassDescriptor::new("Countable", ClassKind::Interface)],
            functions: Vec::new(),
        };
        let index = SymbolIndex::new(&model);
        let router = Router::default();
        let linker = Linker::new(&router, &index);
        let config = Config::with_title("Demo");

        let members = index.members_of(ROOT_NAMESPACE);
        let contents = NamespaceContents {
            name: ROOT_NAMESPACE,
            simple_name: ROOT_NAMESPACE,
            classes: members.classes,
            exceptions: members.exceptions,
            interfaces: members.interfaces,
            traits: members.traits,
            functions: members.functions,
            constants: crate::constants::ConstantSet::new(),
            child_namespaces: Vec::new(),
        };
        let page = Page::Globals(crate::pages::GlobalsPage {
            site: site(&config, ActivePage::Globals),
            contents,
        });
        let html = HtmlRenderer.render(&page, &linker).unwrap();

        assert!(html.contains("<section id=\"interfaces\">"));
        assert!(html.contains("<a href=\"interface-Countable.html\">Countable</a>"));
        assert!(!html.contains("No global symbols."));
    }

    #[test]
    fn test_empty_globals_page() {
        let model = SymbolModel::default();
        let index = SymbolIndex::new(&model);
        let router = Router::default();
        let linker = Linker::new(&router, &index);
        let config = Config::with_title("Demo");

        let members = index.members_of(ROOT_NAMESPACE);
        let page = Page::Globals(crate::pages::GlobalsPage {
            site: site(&config, ActivePage::Globals),
            contents: NamespaceContents {
                name: ROOT_NAMESPACE,
                simple_name: ROOT_NAMESPACE,
                classes: members.classes,
                exceptions: members.exceptions,
                interfaces: members.interfaces,
                traits: members.traits,
                functions: members.functions,
                constants: crate::constants::ConstantSet::new(),
                child_namespaces: Vec::new(),
            },
        });
        let html = HtmlRenderer.render(&page, &linker).unwrap();
        assert!(html.contains("<p>No global symbols.</p>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
