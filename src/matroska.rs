//!
//! A compiled-in schema covering the commonly encountered parts of the Matroska and
//! WebM specifications.
//!
//! Ids are the raw bit patterns as they appear in the stream, length marker included.
//!

use super::specs::{EbmlSchema, ElementType};

// EBML header
pub const EBML: u64 = 0x1a45dfa3;
pub const EBML_VERSION: u64 = 0x4286;
pub const EBML_READ_VERSION: u64 = 0x42f7;
pub const EBML_MAX_ID_LENGTH: u64 = 0x42f2;
pub const EBML_MAX_SIZE_LENGTH: u64 = 0x42f3;
pub const DOC_TYPE: u64 = 0x4282;
pub const DOC_TYPE_VERSION: u64 = 0x4287;
pub const DOC_TYPE_READ_VERSION: u64 = 0x4285;

// Global elements, valid anywhere in the document
pub const VOID: u64 = 0xec;
pub const CRC32: u64 = 0xbf;

// Segment
pub const SEGMENT: u64 = 0x18538067;

// Meta seek information
pub const SEEK_HEAD: u64 = 0x114d9b74;
pub const SEEK: u64 = 0x4dbb;
pub const SEEK_ID: u64 = 0x53ab;
pub const SEEK_POSITION: u64 = 0x53ac;

// Segment information
pub const INFO: u64 = 0x1549a966;
pub const SEGMENT_UID: u64 = 0x73a4;
pub const SEGMENT_FILENAME: u64 = 0x7384;
pub const TIMECODE_SCALE: u64 = 0x2ad7b1;
pub const DURATION: u64 = 0x4489;
pub const DATE_UTC: u64 = 0x4461;
pub const TITLE: u64 = 0x7ba9;
pub const MUXING_APP: u64 = 0x4d80;
pub const WRITING_APP: u64 = 0x5741;

// Cluster
pub const CLUSTER: u64 = 0x1f43b675;
pub const TIMECODE: u64 = 0xe7;
pub const POSITION: u64 = 0xa7;
pub const PREV_SIZE: u64 = 0xab;
pub const SIMPLE_BLOCK: u64 = 0xa3;
pub const BLOCK_GROUP: u64 = 0xa0;
pub const BLOCK: u64 = 0xa1;
pub const BLOCK_DURATION: u64 = 0x9b;
pub const REFERENCE_BLOCK: u64 = 0xfb;
pub const CODEC_STATE: u64 = 0xa4;
pub const DISCARD_PADDING: u64 = 0x75a2;

// Track
pub const TRACKS: u64 = 0x1654ae6b;
pub const TRACK_ENTRY: u64 = 0xae;
pub const TRACK_NUMBER: u64 = 0xd7;
pub const TRACK_UID: u64 = 0x73c5;
pub const TRACK_TYPE: u64 = 0x83;
pub const FLAG_ENABLED: u64 = 0xb9;
pub const FLAG_DEFAULT: u64 = 0x88;
pub const FLAG_FORCED: u64 = 0x55aa;
pub const FLAG_LACING: u64 = 0x9c;
pub const MIN_CACHE: u64 = 0x6de7;
pub const DEFAULT_DURATION: u64 = 0x23e383;
pub const NAME: u64 = 0x536e;
pub const LANGUAGE: u64 = 0x22b59c;
pub const CODEC_ID: u64 = 0x86;
pub const CODEC_PRIVATE: u64 = 0x63a2;
pub const CODEC_NAME: u64 = 0x258688;
pub const VIDEO: u64 = 0xe0;
pub const FLAG_INTERLACED: u64 = 0x9a;
pub const PIXEL_WIDTH: u64 = 0xb0;
pub const PIXEL_HEIGHT: u64 = 0xba;
pub const DISPLAY_WIDTH: u64 = 0x54b0;
pub const DISPLAY_HEIGHT: u64 = 0x54ba;
pub const AUDIO: u64 = 0xe1;
pub const SAMPLING_FREQUENCY: u64 = 0xb5;
pub const OUTPUT_SAMPLING_FREQUENCY: u64 = 0x78b5;
pub const CHANNELS: u64 = 0x9f;
pub const BIT_DEPTH: u64 = 0x6264;

// Cueing data
pub const CUES: u64 = 0x1c53bb6b;
pub const CUE_POINT: u64 = 0xbb;
pub const CUE_TIME: u64 = 0xb3;
pub const CUE_TRACK_POSITIONS: u64 = 0xb7;
pub const CUE_TRACK: u64 = 0xf7;
pub const CUE_CLUSTER_POSITION: u64 = 0xf1;
pub const CUE_RELATIVE_POSITION: u64 = 0xf0;
pub const CUE_DURATION: u64 = 0xb2;
pub const CUE_BLOCK_NUMBER: u64 = 0x5378;

// Attachment
pub const ATTACHMENTS: u64 = 0x1941a469;
pub const ATTACHED_FILE: u64 = 0x61a7;
pub const FILE_DESCRIPTION: u64 = 0x467e;
pub const FILE_NAME: u64 = 0x466e;
pub const FILE_MIME_TYPE: u64 = 0x4660;
pub const FILE_DATA: u64 = 0x465c;
pub const FILE_UID: u64 = 0x46ae;

// Chapters
pub const CHAPTERS: u64 = 0x1043a770;
pub const EDITION_ENTRY: u64 = 0x45b9;
pub const EDITION_UID: u64 = 0x45bc;
pub const EDITION_FLAG_HIDDEN: u64 = 0x45bd;
pub const EDITION_FLAG_DEFAULT: u64 = 0x45db;
pub const CHAPTER_ATOM: u64 = 0xb6;
pub const CHAPTER_UID: u64 = 0x73c4;
pub const CHAPTER_TIME_START: u64 = 0x91;
pub const CHAPTER_TIME_END: u64 = 0x92;
pub const CHAPTER_DISPLAY: u64 = 0x80;
pub const CHAP_STRING: u64 = 0x85;
pub const CHAP_LANGUAGE: u64 = 0x437c;
pub const CHAP_COUNTRY: u64 = 0x437e;

// Tagging
pub const TAGS: u64 = 0x1254c367;
pub const TAG: u64 = 0x7373;
pub const TARGETS: u64 = 0x63c0;
pub const TARGET_TYPE_VALUE: u64 = 0x68ca;
pub const TARGET_TYPE: u64 = 0x63ca;
pub const TAG_TRACK_UID: u64 = 0x63c5;
pub const SIMPLE_TAG: u64 = 0x67c8;
pub const TAG_NAME: u64 = 0x45a3;
pub const TAG_LANGUAGE: u64 = 0x447a;
pub const TAG_DEFAULT: u64 = 0x4484;
pub const TAG_STRING: u64 = 0x4487;
pub const TAG_BINARY: u64 = 0x4485;

///
/// The Matroska/WebM schema.  Pass as the schema type parameter of
/// [`EbmlParser`][crate::EbmlParser]; this is what the [`parse`][crate::parse] and
/// [`parse_path`][crate::parse_path] entry points use.
///
#[derive(Copy, Clone, Debug, Default)]
pub struct MatroskaSchema;

type ElementDef = (&'static str, ElementType, Option<u64>);

fn element_def(id: u64) -> Option<ElementDef> {
    use ElementType::{Binary, Date, Float, Integer, Master, String, UnsignedInt, Utf8};

    match id {
        EBML => Some(("EBML", Master, None)),
        EBML_VERSION => Some(("EBMLVersion", UnsignedInt, Some(EBML))),
        EBML_READ_VERSION => Some(("EBMLReadVersion", UnsignedInt, Some(EBML))),
        EBML_MAX_ID_LENGTH => Some(("EBMLMaxIDLength", UnsignedInt, Some(EBML))),
        EBML_MAX_SIZE_LENGTH => Some(("EBMLMaxSizeLength", UnsignedInt, Some(EBML))),
        DOC_TYPE => Some(("DocType", String, Some(EBML))),
        DOC_TYPE_VERSION => Some(("DocTypeVersion", UnsignedInt, Some(EBML))),
        DOC_TYPE_READ_VERSION => Some(("DocTypeReadVersion", UnsignedInt, Some(EBML))),

        VOID => Some(("Void", Binary, None)),
        CRC32 => Some(("CRC-32", Binary, None)),

        SEGMENT => Some(("Segment", Master, None)),

        SEEK_HEAD => Some(("SeekHead", Master, Some(SEGMENT))),
        SEEK => Some(("Seek", Master, Some(SEEK_HEAD))),
        SEEK_ID => Some(("SeekID", Binary, Some(SEEK))),
        SEEK_POSITION => Some(("SeekPosition", UnsignedInt, Some(SEEK))),

        INFO => Some(("Info", Master, Some(SEGMENT))),
        SEGMENT_UID => Some(("SegmentUID", Binary, Some(INFO))),
        SEGMENT_FILENAME => Some(("SegmentFilename", Utf8, Some(INFO))),
        TIMECODE_SCALE => Some(("TimecodeScale", UnsignedInt, Some(INFO))),
        DURATION => Some(("Duration", Float, Some(INFO))),
        DATE_UTC => Some(("DateUTC", Date, Some(INFO))),
        TITLE => Some(("Title", Utf8, Some(INFO))),
        MUXING_APP => Some(("MuxingApp", Utf8, Some(INFO))),
        WRITING_APP => Some(("WritingApp", Utf8, Some(INFO))),

        CLUSTER => Some(("Cluster", Master, Some(SEGMENT))),
        TIMECODE => Some(("Timecode", UnsignedInt, Some(CLUSTER))),
        POSITION => Some(("Position", UnsignedInt, Some(CLUSTER))),
        PREV_SIZE => Some(("PrevSize", UnsignedInt, Some(CLUSTER))),
        SIMPLE_BLOCK => Some(("SimpleBlock", Binary, Some(CLUSTER))),
        BLOCK_GROUP => Some(("BlockGroup", Master, Some(CLUSTER))),
        BLOCK => Some(("Block", Binary, Some(BLOCK_GROUP))),
        BLOCK_DURATION => Some(("BlockDuration", UnsignedInt, Some(BLOCK_GROUP))),
        REFERENCE_BLOCK => Some(("ReferenceBlock", Integer, Some(BLOCK_GROUP))),
        CODEC_STATE => Some(("CodecState", Binary, Some(BLOCK_GROUP))),
        DISCARD_PADDING => Some(("DiscardPadding", Integer, Some(BLOCK_GROUP))),

        TRACKS => Some(("Tracks", Master, Some(SEGMENT))),
        TRACK_ENTRY => Some(("TrackEntry", Master, Some(TRACKS))),
        TRACK_NUMBER => Some(("TrackNumber", UnsignedInt, Some(TRACK_ENTRY))),
        TRACK_UID => Some(("TrackUID", UnsignedInt, Some(TRACK_ENTRY))),
        TRACK_TYPE => Some(("TrackType", UnsignedInt, Some(TRACK_ENTRY))),
        FLAG_ENABLED => Some(("FlagEnabled", UnsignedInt, Some(TRACK_ENTRY))),
        FLAG_DEFAULT => Some(("FlagDefault", UnsignedInt, Some(TRACK_ENTRY))),
        FLAG_FORCED => Some(("FlagForced", UnsignedInt, Some(TRACK_ENTRY))),
        FLAG_LACING => Some(("FlagLacing", UnsignedInt, Some(TRACK_ENTRY))),
        MIN_CACHE => Some(("MinCache", UnsignedInt, Some(TRACK_ENTRY))),
        DEFAULT_DURATION => Some(("DefaultDuration", UnsignedInt, Some(TRACK_ENTRY))),
        NAME => Some(("Name", Utf8, Some(TRACK_ENTRY))),
        LANGUAGE => Some(("Language", String, Some(TRACK_ENTRY))),
        CODEC_ID => Some(("CodecID", String, Some(TRACK_ENTRY))),
        CODEC_PRIVATE => Some(("CodecPrivate", Binary, Some(TRACK_ENTRY))),
        CODEC_NAME => Some(("CodecName", Utf8, Some(TRACK_ENTRY))),
        VIDEO => Some(("Video", Master, Some(TRACK_ENTRY))),
        FLAG_INTERLACED => Some(("FlagInterlaced", UnsignedInt, Some(VIDEO))),
        PIXEL_WIDTH => Some(("PixelWidth", UnsignedInt, Some(VIDEO))),
        PIXEL_HEIGHT => Some(("PixelHeight", UnsignedInt, Some(VIDEO))),
        DISPLAY_WIDTH => Some(("DisplayWidth", UnsignedInt, Some(VIDEO))),
        DISPLAY_HEIGHT => Some(("DisplayHeight", UnsignedInt, Some(VIDEO))),
        AUDIO => Some(("Audio", Master, Some(TRACK_ENTRY))),
        SAMPLING_FREQUENCY => Some(("SamplingFrequency", Float, Some(AUDIO))),
        OUTPUT_SAMPLING_FREQUENCY => Some(("OutputSamplingFrequency", Float, Some(AUDIO))),
        CHANNELS => Some(("Channels", UnsignedInt, Some(AUDIO))),
        BIT_DEPTH => Some(("BitDepth", UnsignedInt, Some(AUDIO))),

        CUES => Some(("Cues", Master, Some(SEGMENT))),
        CUE_POINT => Some(("CuePoint", Master, Some(CUES))),
        CUE_TIME => Some(("CueTime", UnsignedInt, Some(CUE_POINT))),
        CUE_TRACK_POSITIONS => Some(("CueTrackPositions", Master, Some(CUE_POINT))),
        CUE_TRACK => Some(("CueTrack", UnsignedInt, Some(CUE_TRACK_POSITIONS))),
        CUE_CLUSTER_POSITION => Some(("CueClusterPosition", UnsignedInt, Some(CUE_TRACK_POSITIONS))),
        CUE_RELATIVE_POSITION => Some(("CueRelativePosition", UnsignedInt, Some(CUE_TRACK_POSITIONS))),
        CUE_DURATION => Some(("CueDuration", UnsignedInt, Some(CUE_TRACK_POSITIONS))),
        CUE_BLOCK_NUMBER => Some(("CueBlockNumber", UnsignedInt, Some(CUE_TRACK_POSITIONS))),

        ATTACHMENTS => Some(("Attachments", Master, Some(SEGMENT))),
        ATTACHED_FILE => Some(("AttachedFile", Master, Some(ATTACHMENTS))),
        FILE_DESCRIPTION => Some(("FileDescription", Utf8, Some(ATTACHED_FILE))),
        FILE_NAME => Some(("FileName", Utf8, Some(ATTACHED_FILE))),
        FILE_MIME_TYPE => Some(("FileMimeType", String, Some(ATTACHED_FILE))),
        FILE_DATA => Some(("FileData", Binary, Some(ATTACHED_FILE))),
        FILE_UID => Some(("FileUID", UnsignedInt, Some(ATTACHED_FILE))),

        CHAPTERS => Some(("Chapters", Master, Some(SEGMENT))),
        EDITION_ENTRY => Some(("EditionEntry", Master, Some(CHAPTERS))),
        EDITION_UID => Some(("EditionUID", UnsignedInt, Some(EDITION_ENTRY))),
        EDITION_FLAG_HIDDEN => Some(("EditionFlagHidden", UnsignedInt, Some(EDITION_ENTRY))),
        EDITION_FLAG_DEFAULT => Some(("EditionFlagDefault", UnsignedInt, Some(EDITION_ENTRY))),
        CHAPTER_ATOM => Some(("ChapterAtom", Master, Some(EDITION_ENTRY))),
        CHAPTER_UID => Some(("ChapterUID", UnsignedInt, Some(CHAPTER_ATOM))),
        CHAPTER_TIME_START => Some(("ChapterTimeStart", UnsignedInt, Some(CHAPTER_ATOM))),
        CHAPTER_TIME_END => Some(("ChapterTimeEnd", UnsignedInt, Some(CHAPTER_ATOM))),
        CHAPTER_DISPLAY => Some(("ChapterDisplay", Master, Some(CHAPTER_ATOM))),
        CHAP_STRING => Some(("ChapString", Utf8, Some(CHAPTER_DISPLAY))),
        CHAP_LANGUAGE => Some(("ChapLanguage", String, Some(CHAPTER_DISPLAY))),
        CHAP_COUNTRY => Some(("ChapCountry", String, Some(CHAPTER_DISPLAY))),

        TAGS => Some(("Tags", Master, Some(SEGMENT))),
        TAG => Some(("Tag", Master, Some(TAGS))),
        TARGETS => Some(("Targets", Master, Some(TAG))),
        TARGET_TYPE_VALUE => Some(("TargetTypeValue", UnsignedInt, Some(TARGETS))),
        TARGET_TYPE => Some(("TargetType", String, Some(TARGETS))),
        TAG_TRACK_UID => Some(("TagTrackUID", UnsignedInt, Some(TARGETS))),
        SIMPLE_TAG => Some(("SimpleTag", Master, Some(TAG))),
        TAG_NAME => Some(("TagName", Utf8, Some(SIMPLE_TAG))),
        TAG_LANGUAGE => Some(("TagLanguage", String, Some(SIMPLE_TAG))),
        TAG_DEFAULT => Some(("TagDefault", UnsignedInt, Some(SIMPLE_TAG))),
        TAG_STRING => Some(("TagString", Utf8, Some(SIMPLE_TAG))),
        TAG_BINARY => Some(("TagBinary", Binary, Some(SIMPLE_TAG))),

        _ => None,
    }
}

impl EbmlSchema for MatroskaSchema {
    fn element_type(id: u64) -> Option<ElementType> {
        element_def(id).map(|def| def.1)
    }

    fn element_name(id: u64) -> Option<&'static str> {
        element_def(id).map(|def| def.0)
    }

    fn parent_id(id: u64) -> Option<u64> {
        element_def(id).and_then(|def| def.2)
    }

    fn is_global(id: u64) -> bool {
        matches!(id, VOID | CRC32)
    }
}
