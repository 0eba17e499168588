use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, SourceMapper, Span,
    comments::{Comment, CommentKind, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::Location;

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Thread-safe extracted comments from SingleThreadedComments.
/// Extracted during parsing and stored independently of swc types.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// The JSDoc block (`/** ... */`) directly preceding `pos`, if any.
    ///
    /// Only the last doc block is considered, matching how editors attach
    /// documentation to the following declaration.
    pub fn leading_doc(&self, pos: BytePos) -> Option<&Comment> {
        self.leading
            .get(&pos)?
            .iter()
            .rev()
            .find(|c| c.kind == CommentKind::Block && c.text.starts_with('*'))
    }
}

pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

impl ParsedJSX {
    /// Line (1-based) and column (0-based) of the start of `span`.
    ///
    /// The column counts characters, so wide characters earlier on the line
    /// count once. Synthetic nodes without a position map to `{0, 0}`.
    pub fn location(&self, span: Span) -> Location {
        if span.is_dummy() {
            return Location::default();
        }
        let loc = self.source_map.lookup_char_pos(span.lo);
        Location::new(loc.line, loc.col.0)
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> Option<String> {
        if span.is_dummy() {
            return None;
        }
        self.source_map.span_to_snippet(span).ok()
    }
}

/// Parse component source code into an AST.
///
/// The syntax is fixed for every file: TypeScript with JSX and legacy
/// decorators enabled. Plain `.js`/`.jsx` sources parse under the same
/// configuration, so no dialect detection is done up front.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJSX> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e.kind()))?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedJSX {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}

/// Parse source text with a fresh SourceMap.
pub fn parse_source(code: &str, file_path: &str) -> Result<ParsedJSX> {
    parse_jsx_source(code.to_string(), file_path, Arc::new(SourceMap::default()))
}
