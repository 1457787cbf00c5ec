use std::fs::File;
use std::io::{self, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, trace};

use super::errors::{ErrorKind, ParseError, ToolError};
use super::handler::{EbmlHandler, ElementInfo};
use super::matroska::MatroskaSchema;
use super::specs::{EbmlSchema, ElementSize, ElementType};
use super::tools;

///
/// Why a pass over one region of the document stopped.
///
enum RegionEnd {
    /// The region's declared byte count was consumed exactly.
    Exhausted,
    /// The underlying stream ended.
    Eof,
    /// An element that is not a permitted child of the open unknown-size master was
    /// encountered; its header is held for the enclosing region.
    Unwound,
}

struct ElementHeader {
    id: u64,
    size: ElementSize,
    /// Offset of the element's first id byte.
    start: u64,
}

enum Value {
    Int(i64),
    Float(f64),
    Date(DateTime<Utc>),
    Text(String),
    Bin,
}

///
/// A streaming push parser over EBML data read from a source implementing the
/// [`std::io::Read`] trait.
///
/// This is a generic struct that requires a schema implementing [`EbmlSchema`]; the
/// bundled [`MatroskaSchema`] covers Matroska and WebM files.  The parser walks the
/// element tree in document order and reports every element to an [`EbmlHandler`],
/// recursing into master elements when the handler asks it to.  Nothing is buffered
/// beyond the element currently being decoded, so arbitrarily large documents can be
/// parsed in constant memory.  The parser reads the source one element at a time -
/// hand it something buffered (a [`BufReader`], a [`Cursor`][std::io::Cursor]) when
/// reading from a file or socket.
///
/// ## Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
/// use ebml_pushable::{EbmlHandler, EbmlParser, ElementInfo, HandlerError};
/// use ebml_pushable::matroska::MatroskaSchema;
///
/// struct NamePrinter;
///
/// impl EbmlHandler for NamePrinter {
///     fn on_master_begin(&mut self, id: u64, _info: &ElementInfo) -> Result<bool, HandlerError> {
///         println!("{id:#x}");
///         Ok(true)
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("my_file.mkv")?;
/// let mut parser: EbmlParser<_, MatroskaSchema> = EbmlParser::new(BufReader::new(file));
/// parser.parse(&mut NamePrinter)?;
/// # Ok(())
/// # }
/// ```
///
pub struct EbmlParser<R, S>
where
    R: Read,
    S: EbmlSchema,
{
    source: R,
    position: u64,
    pending: Option<ElementHeader>,
    _schema: PhantomData<S>,
}

impl<R, S> EbmlParser<R, S>
where
    R: Read,
    S: EbmlSchema,
{
    ///
    /// Returns a new `EbmlParser` reading from `source`.
    ///
    pub fn new(source: R) -> Self {
        EbmlParser {
            source,
            position: 0,
            pending: None,
            _schema: PhantomData,
        }
    }

    ///
    /// Walks the document, pushing every element to `handler`.
    ///
    /// Returns when the source is exhausted, or with the first error that neither the
    /// handler's recovery hook nor the walker itself could get past.  Events already
    /// delivered stay delivered; there is no rollback on failure.
    ///
    pub fn parse<H: EbmlHandler>(&mut self, handler: &mut H) -> Result<(), ParseError> {
        self.parse_region(handler, None, None, false, 0, true)?;
        Ok(())
    }

    ///
    /// Parses one region: the document root, or the content span of a master element.
    ///
    /// `end` is the nearest enclosing byte bound, if any.  `undeclared` marks a region
    /// whose own size is unknown; such a region ends structurally, at the first element
    /// that is not a permitted child of `parent`.  `emit` gates all handler events for
    /// the region - skipped subtrees of unknown size are walked with `emit` off, since
    /// their extent is only discoverable by parsing.
    ///
    fn parse_region<H: EbmlHandler>(
        &mut self,
        handler: &mut H,
        parent: Option<u64>,
        end: Option<u64>,
        undeclared: bool,
        level: usize,
        emit: bool,
    ) -> Result<RegionEnd, ParseError> {
        loop {
            if let Some(end) = end {
                if self.position >= end {
                    return Ok(RegionEnd::Exhausted);
                }
            }

            let header = match self.take_header(end.is_none())? {
                Some(header) => header,
                None => return Ok(RegionEnd::Eof),
            };

            if undeclared && !Self::permitted_child(parent, header.id) {
                trace!(
                    "element {:#x} at offset {} ends the open unknown-size region",
                    header.id,
                    header.start
                );
                self.pending = Some(header);
                return Ok(RegionEnd::Unwound);
            }

            self.parse_element(handler, header, end, level, emit)?;
        }
    }

    ///
    /// Whether `id` may appear directly inside the master element `parent`.
    ///
    fn permitted_child(parent: Option<u64>, id: u64) -> bool {
        match parent {
            Some(parent) => {
                S::element_type(id).is_some()
                    && (S::is_global(id) || S::parent_id(id) == Some(parent))
            }
            None => true,
        }
    }

    ///
    /// Produces the next element header: the one held back by an unknown-size unwind
    /// if there is one, otherwise freshly decoded from the source.
    ///
    /// `eof_is_end` distinguishes regions that may legally run to the end of the
    /// stream from regions with a declared byte count still outstanding.
    ///
    fn take_header(&mut self, eof_is_end: bool) -> Result<Option<ElementHeader>, ParseError> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }

        let start = self.position;
        let id = match tools::read_element_id(&mut self.source)
            .map_err(|e| Self::header_error(start, e))?
        {
            Some((id, length)) => {
                self.position += length as u64;
                id
            }
            None if eof_is_end => return Ok(None),
            None => return Err(ParseError::new(start, ErrorKind::UnexpectedEof)),
        };

        let size_start = self.position;
        let size = match tools::read_vint(&mut self.source)
            .map_err(|e| Self::header_error(size_start, e))?
        {
            Some((value, length)) => {
                self.position += length as u64;
                ElementSize::new(value, length)
            }
            None => return Err(ParseError::new(size_start, ErrorKind::UnexpectedEof)),
        };

        Ok(Some(ElementHeader { id, size, start }))
    }

    fn header_error(offset: u64, err: ToolError) -> ParseError {
        match err {
            ToolError::Io(source) if source.kind() == io::ErrorKind::UnexpectedEof => {
                ParseError::new(offset, ErrorKind::UnexpectedEof)
            }
            ToolError::Io(source) => ParseError::new(offset, ErrorKind::Read(source)),
            _ => ParseError::new(offset, ErrorKind::CorruptVarint),
        }
    }

    ///
    /// Consumes one element whose header has been read: dispatches a master element's
    /// begin/descend/end cycle, or decodes and emits a leaf value.
    ///
    fn parse_element<H: EbmlHandler>(
        &mut self,
        handler: &mut H,
        header: ElementHeader,
        outer_end: Option<u64>,
        level: usize,
        emit: bool,
    ) -> Result<(), ParseError> {
        let ElementHeader { id, size, start } = header;

        if let (Some(outer_end), ElementSize::Known(data_size)) = (outer_end, size) {
            if self.position + data_size > outer_end {
                return Err(ParseError::new(start, ErrorKind::OversizedChild { id }));
            }
        }

        let element_type = match S::element_type(id) {
            Some(element_type) => element_type,
            None => {
                if emit {
                    let err = ParseError::new(start, ErrorKind::InvalidElement { id });
                    handler.on_parse_error(err)?;
                }
                let data_size = match size {
                    ElementSize::Known(data_size) => data_size,
                    ElementSize::Unknown => {
                        return Err(ParseError::new(start, ErrorKind::UnknownSizeNotAllowed { id }))
                    }
                };
                debug!("skipping unknown element {id:#x} ({data_size} bytes) at offset {start}");
                self.skip(data_size)?;
                return Ok(());
            }
        };

        let info = ElementInfo {
            offset: self.position,
            size,
            level,
        };
        trace!(
            "element {:#x} ({}) at offset {}, size {:?}, level {}",
            id,
            S::element_name(id).unwrap_or("?"),
            info.offset,
            size,
            level
        );

        if element_type == ElementType::Master {
            let descend = if emit {
                handler
                    .on_master_begin(id, &info)
                    .map_err(|e| ParseError::new(info.offset, ErrorKind::Handler(e)))?
            } else {
                false
            };

            match size {
                ElementSize::Known(data_size) => {
                    if emit && descend {
                        let end = self.position + data_size;
                        self.parse_region(handler, Some(id), Some(end), false, level + 1, true)?;
                    } else {
                        self.skip(data_size)?;
                    }
                }
                ElementSize::Unknown => {
                    // An undeclared extent is only discoverable by parsing, so the
                    // children are walked even when the handler declined to descend.
                    self.parse_region(handler, Some(id), outer_end, true, level + 1, emit && descend)?;
                }
            }

            if emit {
                handler
                    .on_master_end(id, &info)
                    .map_err(|e| ParseError::new(info.offset, ErrorKind::Handler(e)))?;
            }
            return Ok(());
        }

        let data_size = match size {
            ElementSize::Known(data_size) => data_size,
            ElementSize::Unknown => {
                return Err(ParseError::new(start, ErrorKind::UnknownSizeNotAllowed { id }))
            }
        };

        if !emit {
            return self.skip(data_size);
        }

        let data = self.read_data(data_size)?;
        self.emit_leaf(handler, id, element_type, data, &info)
    }

    ///
    /// Decodes a leaf element's data span according to its schema type and invokes the
    /// matching callback.  Decode failures are offered to the recovery hook; the data
    /// span has already been consumed, so recovery simply continues behind it.
    ///
    fn emit_leaf<H: EbmlHandler>(
        &mut self,
        handler: &mut H,
        id: u64,
        element_type: ElementType,
        data: Vec<u8>,
        info: &ElementInfo,
    ) -> Result<(), ParseError> {
        let decoded = match element_type {
            ElementType::UnsignedInt => tools::arr_to_u64(&data).map(|v| Value::Int(v as i64)),
            ElementType::Integer => tools::arr_to_i64(&data).map(Value::Int),
            ElementType::Float => tools::arr_to_f64(&data).map(Value::Float),
            ElementType::Date => tools::arr_to_date(&data).map(Value::Date),
            ElementType::String => {
                // Fixed-width strings are padded with NULs; everything from the first
                // NUL on is padding.
                let printable = &data[..data.iter().position(|b| *b == 0).unwrap_or(data.len())];
                String::from_utf8(printable.to_vec())
                    .map(Value::Text)
                    .map_err(ToolError::ReadUtf8Mismatch)
            }
            ElementType::Utf8 => {
                let trimmed = &data[..data.len() - data.iter().rev().take_while(|b| **b == 0).count()];
                String::from_utf8(trimmed.to_vec())
                    .map(Value::Text)
                    .map_err(ToolError::ReadUtf8Mismatch)
            }
            ElementType::Binary => Ok(Value::Bin),
            ElementType::Master => {
                unreachable!("master elements are dispatched before value decoding")
            }
        };

        let value = match decoded {
            Ok(value) => value,
            Err(source) => {
                let err = ParseError::new(info.offset, ErrorKind::ValueMismatch { id, source });
                handler.on_parse_error(err)?;
                debug!("handler recovered from mismatched data in element {id:#x}, continuing");
                return Ok(());
            }
        };

        let result = match value {
            Value::Int(v) => handler.on_integer(id, v, info),
            Value::Float(v) => handler.on_float(id, v, info),
            Value::Date(v) => handler.on_date(id, v, info),
            Value::Text(v) => handler.on_string(id, v, info),
            Value::Bin => handler.on_binary(id, &data, info),
        };
        result.map_err(|e| ParseError::new(info.offset, ErrorKind::Handler(e)))
    }

    ///
    /// Reads exactly `data_size` bytes, failing with `UnexpectedEof` if the stream
    /// ends short of the declared span.
    ///
    fn read_data(&mut self, data_size: u64) -> Result<Vec<u8>, ParseError> {
        let offset = self.position;
        let mut data = vec![0u8; data_size as usize];
        self.source.read_exact(&mut data).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ParseError::new(offset, ErrorKind::UnexpectedEof),
            _ => ParseError::new(offset, ErrorKind::Read(e)),
        })?;
        self.position += data_size;
        Ok(data)
    }

    ///
    /// Advances past `data_size` bytes without interpreting them.
    ///
    fn skip(&mut self, data_size: u64) -> Result<(), ParseError> {
        let offset = self.position;
        let copied = io::copy(&mut self.source.by_ref().take(data_size), &mut io::sink())
            .map_err(|e| ParseError::new(offset, ErrorKind::Read(e)))?;
        if copied < data_size {
            return Err(ParseError::new(offset + copied, ErrorKind::UnexpectedEof));
        }
        self.position += data_size;
        Ok(())
    }
}

///
/// Parses EBML data from `source` against the Matroska/WebM schema, pushing every
/// element to `handler`.
///
pub fn parse<R: Read, H: EbmlHandler>(source: R, handler: &mut H) -> Result<(), ParseError> {
    EbmlParser::<R, MatroskaSchema>::new(source).parse(handler)
}

///
/// Opens the file at `path` and parses it against the Matroska/WebM schema, pushing
/// every element to `handler`.
///
pub fn parse_path<P: AsRef<Path>, H: EbmlHandler>(path: P, handler: &mut H) -> Result<(), ParseError> {
    let file = File::open(path.as_ref()).map_err(|source| ParseError::new(0, ErrorKind::Read(source)))?;
    parse(BufReader::new(file), handler)
}
