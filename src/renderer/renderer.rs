use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::renders::*;
use crate::renderer::traits::*;
use std::slice;
use tracing::{debug, trace};

/// Renders a whole collection: title, description, collection-level auth,
/// then the node tree.
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn render(&self, collection: &Collection) -> String {
        let mut fragments = Vec::new();

        // Render collection header
        fragments.push(format!("# {}\n", or_undefined(collection.info.name.as_deref())));

        if let Some(description) = &collection.info.description {
            fragments.push(format!("{}\n", description.as_str()));
        }

        fragments.push(collection.auth.render(&RenderContext::new().with_depth(0)));

        TreeWalker.walk_top_level(&collection.item, &mut fragments);

        fragments.concat()
    }
}

/// Walks folders and requests in document order. Only folders increase
/// the depth their children render at.
pub struct TreeWalker;

impl TreeWalker {
    pub fn render(&self, nodes: &[Node], context: &RenderContext) -> String {
        let mut fragments = Vec::new();
        self.walk(nodes, context, &mut fragments);
        fragments.concat()
    }

    /// Entries of the collection root: folders open at `TOP_LEVEL_DEPTH`,
    /// requests keep the default depth.
    pub fn walk_top_level(&self, nodes: &[Node], fragments: &mut Vec<String>) {
        let folders = RenderContext::new().with_depth(TOP_LEVEL_DEPTH);
        let requests = RenderContext::default();
        for node in nodes {
            match node {
                Node::Folder(folder) => self.walk_folder(folder, &folders, fragments),
                Node::Request(request) => self.walk_request(request, &requests, fragments),
            }
        }
    }

    pub fn walk(&self, nodes: &[Node], context: &RenderContext, fragments: &mut Vec<String>) {
        for node in nodes {
            match node {
                Node::Folder(folder) => self.walk_folder(folder, context, fragments),
                Node::Request(request) => self.walk_request(request, context, fragments),
            }
        }
    }

    fn walk_request(&self, request: &RequestNode, context: &RenderContext, fragments: &mut Vec<String>) {
        trace!(depth = context.depth, name = request.name.as_deref(), "rendering request");
        fragments.push(request.render(context));
    }

    fn walk_folder(&self, folder: &Folder, context: &RenderContext, fragments: &mut Vec<String>) {
        debug!(
            depth = context.depth,
            name = folder.name.as_deref(),
            children = folder.item.len(),
            "rendering folder"
        );

        let title = format!("{} {}", FOLDER_GLYPH, or_undefined(folder.name.as_deref()));
        fragments.push(HeadingKind::Folder.line(context.depth, &title));

        if let Some(description) = &folder.description {
            fragments.push(format!("{}\n", description.as_str()));
        }

        fragments.push(folder.auth.render(context));
        fragments.push("\n".to_string());

        self.walk(&folder.item, &context.nested(), fragments);
    }
}

impl Render for Node {
    fn render(&self, context: &RenderContext) -> String {
        TreeWalker.render(slice::from_ref(self), context)
    }
}

/// One request block: heading, description, URL, the optional field
/// sections, sample responses and the closing separator.
impl Render for RequestNode {
    fn render(&self, context: &RenderContext) -> String {
        let spec = self.request.as_ref();
        let url = spec.and_then(|spec| spec.url.as_ref());
        let mut output = String::new();

        let method = or_undefined(spec.and_then(|spec| spec.method.as_deref()));
        let name = or_undefined(self.name.as_deref());
        output.push('\n');
        output.push_str(&HeadingKind::Request.line(context.depth, &format!("`{}` {}", method, name)));

        if let Some(description) = spec.and_then(|spec| spec.description.as_ref()) {
            output.push_str(description.as_str());
            output.push('\n');
        }

        // The URL block is always present
        output.push_str(">```\n");
        output.push_str(&format!(">{}\n", or_undefined(url.and_then(|url| url.raw.as_deref()))));
        output.push_str(">```\n");

        if let Some(spec) = spec {
            output.push_str(&Headers(&spec.header).render(context));
            output.push_str(&spec.body.render(context));
        }

        if let Some(url) = url {
            output.push_str(&url.query.as_deref().map(QueryParams).render(context));
            output.push_str(&url.variable.as_deref().map(PathVariables).render(context));
        }

        if let Some(spec) = spec {
            output.push_str(&spec.auth.render(context));
        }

        output.push_str(&Responses(&self.response).render(context));

        output.push('\n');
        output.push_str(&separator());
        output.push('\n');
        output
    }
}
