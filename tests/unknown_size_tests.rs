
pub mod unknown_size_tests {
    use std::io::Cursor;

    use ebml_pushable::{matroska, parse, ElementInfo, ElementSize};

    use super::recording::{assert_master_pairing, elem, Event, RecordingHandler};

    fn known(offset: u64, size: u64, level: usize) -> ElementInfo {
        ElementInfo {
            offset,
            size: ElementSize::Known(size),
            level,
        }
    }

    fn unknown(offset: u64, level: usize) -> ElementInfo {
        ElementInfo {
            offset,
            size: ElementSize::Unknown,
            level,
        }
    }

    #[test]
    fn unknown_size_master_runs_to_end_of_stream() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut data = vec![0x18, 0x53, 0x80, 0x67, 0xff];
        data.extend(elem(&[0x15, 0x49, 0xa9, 0x66], &elem(&[0x7b, 0xa9], b"T")));

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterBegin { id: matroska::INFO, info: known(10, 4, 1) },
                Event::String {
                    id: matroska::TITLE,
                    value: String::from("T"),
                    info: known(13, 1, 2),
                },
                Event::MasterEnd { id: matroska::INFO, info: known(10, 4, 1) },
                Event::MasterEnd { id: matroska::SEGMENT, info: unknown(5, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }

    #[test]
    fn unknown_size_master_ended_by_sibling() {
        let data = vec![
            0x18, 0x53, 0x80, 0x67, 0xff, // Segment, size unknown
            0x1f, 0x43, 0xb6, 0x75, 0xff, // Cluster, size unknown
            0xe7, 0x81, 0x01, //             Timecode 1
            0x1f, 0x43, 0xb6, 0x75, 0xff, // a sibling Cluster ends the first one
            0xe7, 0x81, 0x02, //             Timecode 2
        ];

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterBegin { id: matroska::CLUSTER, info: unknown(10, 1) },
                Event::Integer { id: matroska::TIMECODE, value: 1, info: known(12, 1, 2) },
                Event::MasterEnd { id: matroska::CLUSTER, info: unknown(10, 1) },
                Event::MasterBegin { id: matroska::CLUSTER, info: unknown(18, 1) },
                Event::Integer { id: matroska::TIMECODE, value: 2, info: known(20, 1, 2) },
                Event::MasterEnd { id: matroska::CLUSTER, info: unknown(18, 1) },
                Event::MasterEnd { id: matroska::SEGMENT, info: unknown(5, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }

    #[test]
    fn unknown_size_master_ended_by_parent_boundary() {
        let data = vec![
            0x18, 0x53, 0x80, 0x67, 0x88, // Segment, 8 content bytes
            0x1f, 0x43, 0xb6, 0x75, 0xff, // Cluster, size unknown
            0xe7, 0x81, 0x01, //             Timecode
        ];

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: known(5, 8, 0) },
                Event::MasterBegin { id: matroska::CLUSTER, info: unknown(10, 1) },
                Event::Integer { id: matroska::TIMECODE, value: 1, info: known(12, 1, 2) },
                Event::MasterEnd { id: matroska::CLUSTER, info: unknown(10, 1) },
                Event::MasterEnd { id: matroska::SEGMENT, info: known(5, 8, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }

    #[test]
    fn unknown_size_master_ended_by_root_element() {
        let data = vec![
            0x18, 0x53, 0x80, 0x67, 0xff, // Segment, size unknown
            0x15, 0x49, 0xa9, 0x66, 0x80, // Info, empty
            0x1a, 0x45, 0xdf, 0xa3, 0x80, // EBML at root level ends the Segment
        ];

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterBegin { id: matroska::INFO, info: known(10, 0, 1) },
                Event::MasterEnd { id: matroska::INFO, info: known(10, 0, 1) },
                Event::MasterEnd { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterBegin { id: matroska::EBML, info: known(15, 0, 0) },
                Event::MasterEnd { id: matroska::EBML, info: known(15, 0, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }

    #[test]
    fn unknown_size_master_ended_by_out_of_place_element() {
        // A Timecode is only defined inside a Cluster, so it cannot continue the open
        // Segment; it unwinds to the root and is reported there.
        let data = vec![
            0x18, 0x53, 0x80, 0x67, 0xff, // Segment, size unknown
            0xe7, 0x81, 0x07, //             Timecode
        ];

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterEnd { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::Integer { id: matroska::TIMECODE, value: 7, info: known(7, 1, 0) },
            ],
            handler.events
        );
    }

    #[test]
    fn global_element_continues_unknown_size_region() {
        let data = vec![
            0x1f, 0x43, 0xb6, 0x75, 0xff, // Cluster, size unknown
            0xec, 0x81, 0x00, //             Void is global, so it does not end the region
            0xe7, 0x81, 0x05, //             Timecode
        ];

        let mut handler = RecordingHandler::new();
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::CLUSTER, info: unknown(5, 0) },
                Event::Binary { id: matroska::VOID, value: vec![0x00], info: known(7, 1, 1) },
                Event::Integer { id: matroska::TIMECODE, value: 5, info: known(10, 1, 1) },
                Event::MasterEnd { id: matroska::CLUSTER, info: unknown(5, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }

    #[test]
    fn declined_unknown_size_master_is_walked_silently() {
        let data = vec![
            0x18, 0x53, 0x80, 0x67, 0xff, // Segment, size unknown
            0x1f, 0x43, 0xb6, 0x75, 0xff, // Cluster, size unknown
            0xe7, 0x81, 0x01, //             Timecode
            0x1a, 0x45, 0xdf, 0xa3, 0x80, // EBML at root level ends the Segment
        ];

        let mut handler = RecordingHandler::new();
        handler.skip_ids.push(matroska::SEGMENT);
        parse(Cursor::new(data), &mut handler).expect("parse shouldn't error");

        // The Segment's extent is undeclared, so its children are still walked to find
        // where it ends, but none of them produce events.
        assert_eq!(
            vec![
                Event::MasterBegin { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterEnd { id: matroska::SEGMENT, info: unknown(5, 0) },
                Event::MasterBegin { id: matroska::EBML, info: known(18, 0, 0) },
                Event::MasterEnd { id: matroska::EBML, info: known(18, 0, 0) },
            ],
            handler.events
        );
        assert_master_pairing(&handler.events);
    }
}
