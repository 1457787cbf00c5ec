//!
//! Provides the schema types consumed by the parser.
//!
//! Most users will rely on the bundled [`MatroskaSchema`][crate::matroska::MatroskaSchema].
//! Implement [`EbmlSchema`] to parse other EBML based formats.
//!

///
/// Different data types defined in the EBML specification.
///
/// `String` holds printable ASCII and may be padded to a fixed width with NUL bytes;
/// `Utf8` holds arbitrary unicode text.  Both are reported through the same handler
/// callback after padding is removed.
///
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ElementType {
    Master,
    UnsignedInt,
    Integer,
    String,
    Utf8,
    Binary,
    Float,
    Date,
}

///
/// The declared size of an element's data region.
///
/// EBML reserves the all-ones vint value to mean the size was not declared up front.
/// That sentinel is only legal on master elements; the end of such a region is found
/// structurally, by parsing children until one no longer fits.
///
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElementSize {
    Known(u64),
    Unknown,
}

impl ElementSize {
    ///
    /// Interprets a decoded size vint, given the length of its encoding.
    ///
    pub fn new(size: u64, vint_length: usize) -> Self {
        if size == (1 << (7 * vint_length)) - 1 {
            ElementSize::Unknown
        } else {
            ElementSize::Known(size)
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ElementSize::Known(_))
    }
}

///
/// This trait should be implemented to define a specification so that EBML can be parsed
/// correctly.  Typically implemented on a unit struct passed to
/// [`EbmlParser`][crate::EbmlParser] as a type parameter.
///
/// The schema is a read-only mapping from element ids (raw bit patterns, length marker
/// included) to what the parser needs to know about them.  Absence from the mapping is
/// meaningful - it makes the parser raise
/// [`ErrorKind::InvalidElement`][crate::ErrorKind::InvalidElement] - so `element_type`
/// *must* return [`None`] for ids the format does not define.
///
pub trait EbmlSchema {
    ///
    /// Pulls the data type for an element from the schema, based on the element id.
    ///
    fn element_type(id: u64) -> Option<ElementType>;

    ///
    /// Gets the display name of an element, based on the element id.
    ///
    fn element_name(id: u64) -> Option<&'static str>;

    ///
    /// Gets the id of the master element the schema defines as the parent of `id`.
    ///
    /// Root level and global elements return [`None`].  This relation decides which
    /// elements can terminate a master of undeclared size: any id that is not a
    /// permitted child of the open master ends it.
    ///
    fn parent_id(id: u64) -> Option<u64>;

    ///
    /// Whether the element may appear at any point in the document, regardless of its
    /// surrounding master element.  `Void` and `CRC-32` are global in most schemas.
    ///
    fn is_global(_id: u64) -> bool {
        false
    }
}
