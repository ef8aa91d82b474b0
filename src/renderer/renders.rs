use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;

impl Render for Auth {
    fn render(&self, context: &RenderContext) -> String {
        if self.is_noauth() {
            return String::new();
        }

        let mut table = Table::new(&["Key", "Value", "Type"]);
        match &self.params {
            // A lone token is shown as one row rather than iterated
            Some(AuthParams::Token(token)) => {
                table.row(["token", token.as_str(), "string"]);
            }
            Some(AuthParams::Entries(entries)) => {
                for entry in entries {
                    table.row([
                        entry.key.as_str(),
                        entry.value.as_str(),
                        entry.kind.as_deref().unwrap_or_default(),
                    ]);
                }
            }
            None => {}
        }

        let kind = or_undefined(self.kind.as_deref());
        let title = format!("{} Authorization ({})", AUTH_GLYPH, kind);
        table_section(context.depth, &title, &table)
    }
}

/// Request headers, rendered as a single table.
pub struct Headers<'a>(pub &'a [Header]);

impl Render for Headers<'_> {
    fn render(&self, context: &RenderContext) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let mut table = Table::new(&["Key", "Value"]);
        for header in self.0 {
            table.row([header.key.as_str(), header.value.as_str()]);
        }
        table_section(context.depth, "Headers", &table)
    }
}

impl Render for Body {
    fn render(&self, context: &RenderContext) -> String {
        match self {
            Body::Raw { language, text } => {
                let title = format!("Body (**{}**)", language.as_deref().unwrap_or(self.mode()));
                let mut output = HeadingKind::Section.line(context.depth, &title);
                output.push('\n');
                output.push_str(&fenced(
                    language.as_deref().unwrap_or_default(),
                    or_undefined(text.as_deref()),
                ));
                output.push('\n');
                output
            }
            Body::FormData(fields) | Body::UrlEncoded(fields) => {
                if fields.is_empty() {
                    return String::new();
                }

                let mut table = Table::new(&["Param", "value", "Type"]);
                for field in fields {
                    table.row([field.key.clone(), field.display_value(), field.kind().to_string()]);
                }
                table_section(context.depth, &format!("Body {}", self.mode()), &table)
            }
            Body::GraphQl(graphql) => {
                let title = format!("Body (**{}**)", self.mode());
                let mut output = HeadingKind::Section.line(context.depth, &title);
                output.push('\n');
                output.push_str(&fenced("graphql", &graphql.query));
                if let Some(variables) = graphql.variables_text() {
                    output.push_str(&fenced("json", &variables));
                }
                output.push('\n');
                output
            }
            Body::Other(_) => String::new(),
        }
    }
}

pub struct QueryParams<'a>(pub &'a [Param]);

impl Render for QueryParams<'_> {
    fn render(&self, context: &RenderContext) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let mut table = Table::new(&["Key", "Description", "Example"]);
        for param in self.0 {
            table.row(param_cells(param));
        }
        table_section(context.depth, "Query Params", &table)
    }
}

/// Path variables; entries without a key are skipped.
pub struct PathVariables<'a>(pub &'a [Param]);

impl Render for PathVariables<'_> {
    fn render(&self, context: &RenderContext) -> String {
        let mut table = Table::new(&["Key", "Description", "Example"]);
        for variable in self.0.iter().filter(|variable| variable.key.is_some()) {
            table.row(param_cells(variable));
        }

        if table.is_empty() {
            return String::new();
        }
        table_section(context.depth, "Path Params", &table)
    }
}

fn param_cells(param: &Param) -> [&str; 3] {
    [
        param.key.as_deref().unwrap_or_default(),
        param
            .description
            .as_ref()
            .map(Description::as_str)
            .unwrap_or_default(),
        param.value.as_deref().unwrap_or_default(),
    ]
}

/// Sample responses, each as a status heading and the body verbatim.
pub struct Responses<'a>(pub &'a [ResponseSample]);

impl Render for Responses<'_> {
    fn render(&self, context: &RenderContext) -> String {
        let mut output = String::new();
        for response in self.0 {
            let code = response
                .code
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| UNDEFINED.to_string());
            output.push_str(
                &HeadingKind::Section.line(context.depth, &format!("Example Response (HTTP {})", code)),
            );
            output.push_str(&fenced("json", response.body.as_deref().unwrap_or_default()));
            output.push('\n');
        }
        output
    }
}
