//! Nested text views over a [`StructuralCopy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::debug;

use crate::domain::entities::{StructuralCopy, StructuralNode};

/// Deeper copies are drawn without building a `termtree::Tree`, whose
/// construction and drop recurse once per level.
const TERMTREE_MAX_DEPTH: usize = 256;

/// Output flavour of the text view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// `- name` lines, two spaces of indent per level
    #[default]
    Bullets,
    /// Nested `<ul>`/`<li>` markup
    Html,
    /// Box-drawing tree, one per root
    Tree,
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextFormat::Bullets => "bullets",
            TextFormat::Html => "html",
            TextFormat::Tree => "tree",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bullets" => Ok(TextFormat::Bullets),
            "html" => Ok(TextFormat::Html),
            "tree" => Ok(TextFormat::Tree),
            other => Err(format!(
                "unknown text format '{}' (expected bullets, html or tree)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextRenderer {
    format: TextFormat,
}

impl TextRenderer {
    pub fn new(format: TextFormat) -> Self {
        Self { format }
    }

    /// Render every record of `copy`. An empty copy renders as an empty string.
    pub fn render(&self, copy: &StructuralCopy) -> String {
        if copy.is_empty() {
            return String::new();
        }
        match self.format {
            TextFormat::Bullets => render_bullets(copy),
            TextFormat::Html => render_html(&copy.roots),
            TextFormat::Tree => render_tree(copy),
        }
    }
}

fn render_bullets(copy: &StructuralCopy) -> String {
    let mut out = String::new();
    for (depth, node) in copy.iter() {
        out.push_str(&"  ".repeat(depth));
        out.push_str("- ");
        out.push_str(&node.name);
        out.push('\n');
    }
    out
}

fn render_html(roots: &[StructuralNode]) -> String {
    let mut out = String::from("<ul>");
    // (siblings, index of the next sibling to open)
    let mut stack: Vec<(&[StructuralNode], usize)> = vec![(roots, 0)];

    while let Some(frame) = stack.last_mut() {
        let siblings = frame.0;
        match siblings.get(frame.1) {
            Some(node) => {
                frame.1 += 1;
                out.push_str("<li class=\"pl-6\">- ");
                out.push_str(&escape_html(&node.name));
                if node.children.is_empty() {
                    out.push_str("</li>");
                } else {
                    out.push_str("<ul>");
                    stack.push((node.children.as_slice(), 0));
                }
            }
            None => {
                stack.pop();
                out.push_str("</ul>");
                if !stack.is_empty() {
                    out.push_str("</li>");
                }
            }
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_tree(copy: &StructuralCopy) -> String {
    let max_depth = copy.iter().map(|(depth, _)| depth).max().unwrap_or(0);
    if max_depth > TERMTREE_MAX_DEPTH {
        debug!("copy is {} levels deep, drawing tree without termtree", max_depth);
        return copy.roots.iter().map(draw_tree).collect();
    }
    copy.roots
        .iter()
        .map(|root| to_termtree(root).to_string())
        .collect()
}

fn to_termtree(node: &StructuralNode) -> Tree<String> {
    Tree::new(node.name.clone()).with_leaves(node.children.iter().map(to_termtree))
}

struct DrawFrame<'a> {
    node: &'a StructuralNode,
    next_child: usize,
    /// length of the line prefix shared by this node's children
    prefix_len: usize,
}

/// Same output as termtree's default glyph palette, without recursion.
fn draw_tree(root: &StructuralNode) -> String {
    let mut out = format!("{}\n", root.name);
    let mut prefix = String::new();
    let mut stack = vec![DrawFrame {
        node: root,
        next_child: 0,
        prefix_len: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        let Some(child) = node.children.get(frame.next_child) else {
            stack.pop();
            continue;
        };
        let last = frame.next_child + 1 == node.children.len();
        frame.next_child += 1;

        prefix.truncate(frame.prefix_len);
        out.push_str(&prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&child.name);
        out.push('\n');

        if !child.children.is_empty() {
            prefix.push_str(if last { "    " } else { "│   " });
            stack.push(DrawFrame {
                node: child,
                next_child: 0,
                prefix_len: prefix.len(),
            });
        }
    }
    out
}
