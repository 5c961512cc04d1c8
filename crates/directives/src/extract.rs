use crate::error::{DirectiveError, Result};
use tree_sitter::{Node, Parser};

/// A comment segment lifted from a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSegment {
    /// Raw comment text, delimiters included
    pub text: String,

    /// Line of the first character (1-indexed)
    pub line: usize,
}

/// Extracts comment segments from Rust source via tree-sitter
pub struct CommentExtractor {
    parser: Parser,
}

impl CommentExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| DirectiveError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    /// Extract every comment in `source` with its start line.
    pub fn extract(&mut self, source: &str) -> Result<Vec<CommentSegment>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| DirectiveError::parse("tree-sitter produced no tree"))?;

        let mut comments = Vec::new();
        collect_comments(tree.root_node(), source, &mut comments);
        Ok(comments)
    }
}

/// Traverse the parse tree for comment nodes
fn collect_comments(node: Node, source: &str, out: &mut Vec<CommentSegment>) {
    if matches!(node.kind(), "line_comment" | "block_comment") {
        out.push(CommentSegment {
            text: source[node.start_byte()..node.end_byte()].to_string(),
            line: node.start_position().row + 1,
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, source, out);
    }
}
