//! Property tests for the threshold gate and field selection.

mod common;

use common::Capture;
use proptest::prelude::*;
use sevlog::format::{Origin, Record, render};
use sevlog::{FormatMask, Level, Logger, Outcome};

proptest! {
    #[test]
    fn writes_iff_level_at_or_above_threshold(level in -5_i32..15, threshold in -5_i32..15) {
        let capture = Capture::new();
        let logger = Logger::builder()
            .threshold(Level::from_raw(threshold))
            .format(FormatMask::MESSAGE)
            .sink(capture.sink("mem"))
            .on_fatal(|| {})
            .build();

        let outcome = logger.emit(
            Origin::new("p.rs", 1),
            Level::from_raw(level),
            format_args!("m"),
        );

        let written = !capture.contents().is_empty();
        prop_assert_eq!(written, level >= threshold);
        prop_assert_eq!(outcome == Outcome::Suppressed, level < threshold);
    }

    #[test]
    fn rendered_fields_match_the_mask(bits in 0_u32..0x40) {
        let mask = FormatMask::from_bits_retain(bits);
        let line = render(
            mask,
            &Record {
                timestamp: fixed_timestamp(),
                origin: Origin::new("zz_origin.rs", 77),
                level: Level::WARN,
                message: format_args!("qq_message"),
            },
        );

        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert_eq!(line.contains("1999-12-31"), mask.contains(FormatMask::DATE));
        prop_assert_eq!(line.contains("23:59:58"), mask.contains(FormatMask::TIME));
        prop_assert_eq!(line.contains("zz_origin.rs:77"), mask.contains(FormatMask::ORIGIN));
        prop_assert_eq!(line.contains("WARN "), mask.contains(FormatMask::TAG));
        prop_assert_eq!(line.contains("qq_message"), mask.contains(FormatMask::MESSAGE));

        let fields = (mask & FormatMask::ALL).bits().count_ones() as usize;
        prop_assert_eq!(line.matches(" - ").count(), fields.saturating_sub(1));
    }

    #[test]
    fn set_then_get_round_trips(threshold: i32, bits: u32) {
        let logger = Logger::new();
        logger.set_threshold(Level::from_raw(threshold));
        logger.set_format(FormatMask::from_bits_retain(bits));
        prop_assert_eq!(logger.threshold().raw(), threshold);
        prop_assert_eq!(logger.threshold().raw(), threshold);
        prop_assert_eq!(logger.format().bits(), bits);
    }
}

fn fixed_timestamp() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(1999, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 58))
        .unwrap()
}
