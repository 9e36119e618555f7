use std::io::{self, BufRead, Cursor, ErrorKind};

use arbor_common::warning::warn_once;
use arbor_dom::{DomTree, NodeId, NodeKind, NodeType, is_void_element};

use crate::error::{ParseError, ParseIssue};
use crate::input::CharReader;
use crate::tokenizer::TokenizerState;
use crate::tree_builder::InsertionMode;

/// [§ 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html)
///
/// A single-pass parser: the tokenizer writes straight into the tree, and the
/// tree-construction rules run when a start tag, end tag, comment or doctype
/// is complete. There is no token stream and no stack of open elements; the
/// current node and its ancestors play that role.
pub struct Parser<R> {
    pub(crate) input: CharReader<R>,

    /// `NodeId::ROOT` is the Document node.
    pub(crate) tree: DomTree,

    /// The node being filled: the open element, or the text, comment or
    /// doctype node currently receiving characters.
    pub(crate) current: NodeId,

    pub(crate) state: TokenizerState,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(crate) insertion_mode: InsertionMode,

    /// [§ 13.2.4.2 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    pub(crate) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    ///
    /// Holds end tag names, keyword prefixes and end tag candidates in text
    /// elements.
    pub(crate) buffer: String,

    issues: Vec<ParseIssue>,
    strict_mode: bool,
    parsed: bool,
}

impl<R: BufRead> Parser<R> {
    /// Create a parser reading from `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            input: CharReader::new(reader),
            tree: DomTree::new(),
            current: NodeId::ROOT,
            state: TokenizerState::Data,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            buffer: String::new(),
            issues: Vec::new(),
            strict_mode: false,
            parsed: false,
        }
    }

    /// Enable strict mode: the first tolerated parse error aborts the parse
    /// with [`ParseError::Strict`].
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Consume the whole input and build the tree.
    ///
    /// Calling `parse` again after it has returned does nothing.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Io`] if reading fails, or if the input ends inside an
    ///   end tag or a quoted doctype identifier.
    /// - [`ParseError::MismatchedEndTag`] if an end tag does not match the
    ///   open element.
    /// - [`ParseError::Strict`] in strict mode, on the first parse error.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        if self.parsed {
            return Ok(());
        }
        self.parsed = true;

        while let Some(c) = self.input.next_char()? {
            log::trace!(target: "arbor::tokenizer", "{} {c:?}", self.state);
            self.step(c)?;
            if self.strict_mode
                && let Some(issue) = self.issues.first()
            {
                return Err(ParseError::Strict(issue.clone()));
            }
        }
        self.finish()
    }

    /// The tree built so far, once [`parse`](Self::parse) has been called.
    ///
    /// After an error this is the partial tree up to the failure point.
    #[must_use]
    pub const fn tree(&self) -> Option<&DomTree> {
        if self.parsed { Some(&self.tree) } else { None }
    }

    /// Take the tree, once [`parse`](Self::parse) has been called.
    #[must_use]
    pub fn into_tree(self) -> Option<DomTree> {
        self.parsed.then_some(self.tree)
    }

    /// Parse errors the parser recovered from, in input order.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The node currently being filled.
    #[must_use]
    pub const fn current_node(&self) -> NodeId {
        self.current
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The current tokenizer state.
    #[must_use]
    pub const fn tokenizer_state(&self) -> TokenizerState {
        self.state
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a malformation the parser recovers from.
    pub(crate) fn parse_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        let position = self.input.position();
        log::debug!(target: "arbor::parser", "parse error at {position}: {message}");
        self.issues.push(ParseIssue { message, position });
    }

    /// Note input the parser deliberately passes through unchanged.
    pub(crate) fn unsupported(message: &str) {
        warn_once("HTML parser", message);
    }

    /// End of input. Only end tags and quoted doctype identifiers are
    /// unfinished constructs; everything else keeps what was read so far.
    fn finish(&mut self) -> Result<(), ParseError> {
        match self.state {
            state if state.is_inside_end_tag() => Err(unexpected_eof(state)),
            state @ TokenizerState::DoctypeIdentifierQuoted(_) => Err(unexpected_eof(state)),
            TokenizerState::TagOpen | TokenizerState::RcDataLessThanSign | TokenizerState::ScriptDataLessThanSign => {
                self.append_text("<");
                Ok(())
            }
            TokenizerState::RcDataEndTagOpen | TokenizerState::ScriptDataEndTagOpen => {
                self.append_text("</");
                Ok(())
            }
            TokenizerState::RcDataEndTagName | TokenizerState::ScriptDataEndTagName => {
                self.flush_end_tag_candidate();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Tree editing
    // =========================================================================

    /// Create a node as the last child of the current node and make it current.
    pub(crate) fn push_node(&mut self, node_type: NodeType) {
        let id = self.tree.alloc(node_type);
        self.tree.append_child(self.current, id);
        self.current = id;
    }

    /// Make the parent of the current node current. At the root this does
    /// nothing.
    pub(crate) fn pop_node(&mut self) {
        if let Some(parent) = self.tree.parent(self.current) {
            self.current = parent;
        }
    }

    /// Append character data, starting a new text node unless the current
    /// node already is one.
    pub(crate) fn append_text(&mut self, text: &str) {
        if self.tree.kind(self.current) != Some(NodeKind::Text) {
            self.push_node(NodeType::Text(String::new()));
        }
        self.tree.push_str(self.current, text);
    }

    /// Single-character form of [`append_text`](Self::append_text).
    pub(crate) fn append_char(&mut self, c: char) {
        if self.tree.kind(self.current) != Some(NodeKind::Text) {
            self.push_node(NodeType::Text(String::new()));
        }
        self.tree.push_data(self.current, c);
    }

    /// Append to the data of the current node: tag name, comment text or
    /// doctype name.
    pub(crate) fn push_current_data(&mut self, c: char) {
        self.tree.push_data(self.current, c);
    }

    /// Close a pending text run so the next node becomes its sibling.
    pub(crate) fn close_text_run(&mut self) {
        if self.tree.kind(self.current) == Some(NodeKind::Text) {
            self.pop_node();
        }
    }

    /// Tag name of the current node, or `""` if it is not an element.
    pub(crate) fn current_tag_name(&self) -> &str {
        self.tree.tag_name(self.current).unwrap_or("")
    }

    /// Name used for the current node in error messages.
    pub(crate) fn current_node_name(&self) -> String {
        match self.tree.kind(self.current) {
            Some(NodeKind::Element) => self.current_tag_name().to_string(),
            Some(kind) => format!("#{}", kind.to_string().to_ascii_lowercase()),
            None => String::new(),
        }
    }

    /// Return to the data state. A void element is closed on the way, since
    /// it can never receive content.
    pub(crate) fn enter_data_state(&mut self) {
        if is_void_element(self.current_tag_name()) {
            self.pop_node();
        }
        self.switch_to(TokenizerState::Data);
    }
}

impl Parser<Cursor<String>> {
    /// Create a parser over an in-memory document.
    #[must_use]
    pub fn from_string(html: impl Into<String>) -> Self {
        Self::new(Cursor::new(html.into()))
    }
}

fn unexpected_eof(state: TokenizerState) -> ParseError {
    ParseError::Io(io::Error::new(
        ErrorKind::UnexpectedEof,
        format!("input ended in the {state} state"),
    ))
}
