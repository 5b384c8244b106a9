use crate::vdom::{CssRule, VNode, VirtualDomDocument};

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// Standalone page wrapping a rendered preview
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub title: String,
    /// Inline script appended to the body
    pub script: Option<String>,
    pub html: HtmlOptions,
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize the rendered nodes (no stylesheet, no page wrapper)
pub fn render_fragment(vdom: &VirtualDomDocument, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in &vdom.nodes {
        render_node(node, &mut ctx);
    }
    ctx.get_output()
}

/// Serialize a full HTML page with the preview stylesheet inlined
pub fn render_page(vdom: &VirtualDomDocument, options: PageOptions) -> String {
    let mut ctx = Context::new(options.html);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&options.title)));
    if !vdom.styles.is_empty() {
        ctx.add_line("<style>");
        ctx.indent();
        for rule in &vdom.styles {
            render_rule(rule, &mut ctx);
        }
        ctx.dedent();
        ctx.add_line("</style>");
    }
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in &vdom.nodes {
        render_node(node, &mut ctx);
    }
    if let Some(script) = &options.script {
        ctx.add_line("<script>");
        ctx.add(script);
        if ctx.options.pretty {
            ctx.add("\n");
        }
        ctx.add_line("</script>");
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn render_rule(rule: &CssRule, ctx: &mut Context) {
    let body: Vec<String> = rule
        .properties
        .iter()
        .map(|(key, value)| format!("{}: {};", key, value))
        .collect();
    ctx.add_line(&format!("{} {{ {} }}", rule.selector, body.join(" ")));
}

fn render_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                if !is_attribute_name(name) {
                    tracing::warn!(attribute = %name, "skipping invalid attribute name");
                    continue;
                }
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }

            if !styles.is_empty() {
                let inline: Vec<String> = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {};", key, value))
                    .collect();
                ctx.add(&format!(" style=\"{}\"", escape_html(&inline.join(" "))));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                if ctx.options.pretty {
                    ctx.add("\n");
                }
                return;
            }

            ctx.add(">");

            let block = has_element_children(children);
            if block && ctx.options.pretty {
                ctx.add("\n");
            }
            ctx.indent();
            for child in children {
                render_node(child, ctx);
            }
            ctx.dedent();
            if block && ctx.options.pretty {
                ctx.add_indent();
            }

            ctx.add(&format!("</{}>", tag));
            if ctx.options.pretty {
                ctx.add("\n");
            }
        }
        VNode::Text { content } => {
            ctx.add(&escape_html(content));
        }
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Names the HTML tokenizer reads back as a single attribute
pub fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '&' | '`')
        })
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
