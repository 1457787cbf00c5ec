//! This crate provides a streaming push parser for [EBML][EBML] files.  Its primary goal is to
//! let callers observe the element tree of arbitrarily large documents through callbacks,
//! without the document ever being materialized in memory.
//!
//! [EBML][EBML] stands for Extensible Binary Meta-Language and is somewhat of a
//! binary version of XML. It's used for container formats like [WebM][webm] or
//! [MKV][mkv].
//!
//! # Important - Handlers
//! The parser contained in this crate pushes events rather than returning data: callers
//! implement the [`EbmlHandler`] trait, overriding only the callbacks they care about, and the
//! parser invokes them in document order.  A master element's begin callback decides whether
//! the parser descends into it at all, and the [`EbmlHandler::on_parse_error`] hook decides
//! whether elements missing from the schema abort the parse or are skipped.
//!
//! # Schemas
//! Decoding is driven by a schema implementing the [`specs::EbmlSchema`] trait.  The bundled
//! [`matroska::MatroskaSchema`] covers Matroska and WebM; the [`parse`] and [`parse_path`]
//! entry points use it.  Documents based on a different EBML schema can be parsed by
//! implementing the trait and constructing an [`EbmlParser`] with it.
//!
//! Elements with an "Unknown Data Size" as defined in [RFC8794][rfc8794] are supported: the
//! parser resolves the end of such an element structurally, from the schema's parent
//! relation, so streamed recordings with open-ended segments and clusters parse fine.
//!
//! [EBML]: http://ebml.sourceforge.net/
//! [webm]: https://www.webmproject.org/
//! [mkv]: http://www.matroska.org/technical/specs/index.html
//! [rfc8794]: https://datatracker.ietf.org/doc/rfc8794/
//!

mod ebml_parser;
mod handler;
pub mod errors;
pub mod matroska;
pub mod specs;
pub mod tools;

pub use self::ebml_parser::{parse, parse_path, EbmlParser};
pub use self::errors::{ErrorKind, HandlerError, ParseError};
pub use self::handler::{EbmlHandler, ElementInfo};
pub use self::specs::{EbmlSchema, ElementSize, ElementType};
