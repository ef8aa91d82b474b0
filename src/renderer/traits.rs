/// Heading depth a lone request renders at when no walker supplies one.
pub const DEFAULT_DEPTH: usize = 1;

/// Heading depth of the collection's top-level nodes.
pub const TOP_LEVEL_DEPTH: usize = 2;

/// Context carried through rendering operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub depth: usize,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self { depth }
    }

    /// Context for the children of a folder rendered at this depth.
    pub fn nested(&self) -> Self {
        self.with_depth(self.depth + 1)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Core rendering trait for collection parts. Implementations are pure:
/// the same value and context always produce the same text.
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}

/// An absent optional field renders nothing.
impl<T: Render> Render for Option<T> {
    fn render(&self, context: &RenderContext) -> String {
        match self {
            Some(inner) => inner.render(context),
            None => String::new(),
        }
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, context: &RenderContext) -> String {
        (**self).render(context)
    }
}
