use std::io;

use thiserror::Error;

///
/// Any error a handler callback may raise.
///
/// Callback implementations are free to return their own error types; the parser wraps
/// whatever comes back in [`ErrorKind::Handler`] together with the offset at which the
/// callback fired and aborts the parse.
///
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

///
/// Errors from the low-level decoders in [`tools`][crate::tools].
///
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("error reading from source")]
    Io(#[from] io::Error),

    #[error("Unrepresentable vint length descriptor encountered.")]
    ReadVintOverflow,

    #[error("Could not read unsigned int from array: {0:?}")]
    ReadU64Overflow(Vec<u8>),

    #[error("Could not read int from array: {0:?}")]
    ReadI64Overflow(Vec<u8>),

    #[error("Could not read float from array: {0:?}")]
    ReadF64Mismatch(Vec<u8>),

    #[error("Could not read date from array: {0:?}")]
    ReadDateMismatch(Vec<u8>),

    #[error("Element data is not valid utf-8.")]
    ReadUtf8Mismatch(#[source] std::string::FromUtf8Error),
}

///
/// The condition that stopped (or, for recoverable kinds, interrupted) a parse.
///
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("error reading from source")]
    Read(#[source] io::Error),

    ///
    /// The source ended inside an element header or inside a declared data span.
    ///
    #[error("unexpected end of stream")]
    UnexpectedEof,

    ///
    /// The leading byte of a vint or element id carried no length marker.
    ///
    #[error("malformed variable-length integer")]
    CorruptVarint,

    ///
    /// The element id is not defined in the schema.
    ///
    /// This is the one kind a recovery hook will typically downgrade to "skip and
    /// continue" - see [`EbmlHandler::on_parse_error`][crate::EbmlHandler::on_parse_error].
    ///
    #[error("element id {id:#x} is not defined in the schema")]
    InvalidElement { id: u64 },

    ///
    /// An unknown data size was declared on an element that cannot carry one.
    ///
    /// Only master elements may leave their size undeclared.
    ///
    #[error("unknown data size on element {id:#x}")]
    UnknownSizeNotAllowed { id: u64 },

    ///
    /// A child element's declared span crosses the end of its parent.
    ///
    #[error("element {id:#x} extends past the end of its parent")]
    OversizedChild { id: u64 },

    ///
    /// The element's data span could not be decoded as its schema-declared type.
    ///
    #[error("data of element {id:#x} does not match its declared type")]
    ValueMismatch {
        id: u64,
        #[source]
        source: ToolError,
    },

    ///
    /// An error raised by a handler callback.  Never routed through the recovery hook.
    ///
    #[error("handler error")]
    Handler(#[source] HandlerError),
}

///
/// A parse failure, carrying the byte offset in the source at which it occurred.
///
/// For header-level problems (unknown ids, malformed vints) the offset points at the
/// start of the offending element; for data-level problems it points at the start of
/// the element's data span.
///
#[derive(Debug, Error)]
#[error("parse error at offset {offset}: {kind}")]
pub struct ParseError {
    pub offset: u64,
    #[source]
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(offset: u64, kind: ErrorKind) -> Self {
        ParseError { offset, kind }
    }

    ///
    /// Whether this error denotes an element id missing from the schema.
    ///
    /// Convenient in recovery hooks that want to suppress exactly this kind:
    ///
    /// ```
    /// use ebml_pushable::{ParseError, ErrorKind};
    ///
    /// fn on_parse_error(error: ParseError) -> Result<(), ParseError> {
    ///     if error.is_invalid_element() {
    ///         Ok(())
    ///     } else {
    ///         Err(error)
    ///     }
    /// }
    /// # let err = ParseError::new(0, ErrorKind::InvalidElement { id: 0xf2 });
    /// # assert!(on_parse_error(err).is_ok());
    /// ```
    ///
    pub fn is_invalid_element(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidElement { .. })
    }
}
