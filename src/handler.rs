//!
//! The callback protocol through which parsed elements are reported.
//!

use chrono::{DateTime, Utc};

use super::errors::{HandlerError, ParseError};
use super::specs::ElementSize;

///
/// Per-occurrence metadata attached to every event.
///
/// `offset` is the absolute position of the first byte of the element's *data* within
/// the source stream (the element id and size field sit immediately before it).
/// `level` is the nesting depth; children of the document root are level 0.
///
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ElementInfo {
    pub offset: u64,
    pub size: ElementSize,
    pub level: usize,
}

///
/// The capability set implemented by callers to receive parse events.
///
/// Every method has a default body, so implementations override only the events they
/// care about.  Callbacks run synchronously on the parsing thread, in document order:
/// begin events pre-order, end events post-order.  Any callback returning an error
/// aborts the parse immediately and surfaces that error to the caller of
/// [`parse`][crate::parse].
///
/// ## Example
///
/// ```
/// use ebml_pushable::{matroska, EbmlHandler, ElementInfo, HandlerError};
///
/// #[derive(Default)]
/// struct TitleFinder {
///     title: Option<String>,
/// }
///
/// impl EbmlHandler for TitleFinder {
///     fn on_master_begin(&mut self, _id: u64, _info: &ElementInfo) -> Result<bool, HandlerError> {
///         Ok(true)
///     }
///
///     fn on_string(&mut self, id: u64, value: String, _info: &ElementInfo) -> Result<(), HandlerError> {
///         if id == matroska::TITLE {
///             self.title = Some(value);
///         }
///         Ok(())
///     }
/// }
/// ```
///
pub trait EbmlHandler {
    ///
    /// Called when a master element opens.  The returned boolean decides whether the
    /// parser descends into the element's children; when `false`, the element's data
    /// region is passed over without producing events, though
    /// [`on_master_end`][Self::on_master_end] still fires once the region has been
    /// consumed.
    ///
    /// The default implementation declines to descend.
    ///
    fn on_master_begin(&mut self, _id: u64, _info: &ElementInfo) -> Result<bool, HandlerError> {
        Ok(false)
    }

    ///
    /// Called when a master element closes.  Fires exactly once for every begin event,
    /// with the same id and info, after all events from the element's descendants.
    ///
    fn on_master_end(&mut self, _id: u64, _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called for `String` and `Utf8` elements, after NUL padding removal.
    fn on_string(&mut self, _id: u64, _value: String, _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    ///
    /// Called for signed and unsigned integer elements.  Unsigned values are reported
    /// through the same callback after widening.
    ///
    fn on_integer(&mut self, _id: u64, _value: i64, _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    fn on_float(&mut self, _id: u64, _value: f64, _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    fn on_date(&mut self, _id: u64, _value: DateTime<Utc>, _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    ///
    /// Called for binary elements.  The data is only valid for the duration of the
    /// callback; copy it out if it needs to outlive the event.
    ///
    fn on_binary(&mut self, _id: u64, _value: &[u8], _info: &ElementInfo) -> Result<(), HandlerError> {
        Ok(())
    }

    ///
    /// The recovery hook.  Called when the parser detects a recoverable problem -
    /// notably an element id missing from the schema - while still holding a valid
    /// stream position.
    ///
    /// Returning `Ok(())` resumes parsing: an unknown element is skipped as opaque
    /// bytes, a value that failed to decode is passed over.  Returning an error (the
    /// one received, or a different one) aborts the parse with it.  The default
    /// implementation fails closed, returning the error unchanged.
    ///
    /// Errors raised by the other callbacks are never routed through this hook.
    ///
    fn on_parse_error(&mut self, error: ParseError) -> Result<(), ParseError> {
        Err(error)
    }
}
