//! Threshold gating and record layout through the public API.

use tintlog::console::{Arg, Attribute, Color};
use tintlog::{ColorMode, Logger, LoggerConfig, Severity};

mod common;
use common::SharedBuffer;

fn logger_at(threshold: Severity) -> (Logger<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(buffer.clone());
    logger.set_threshold(threshold);
    (logger, buffer)
}

#[test]
fn test_info_threshold_scenario() {
    let (logger, buffer) = logger_at(Severity::Info);

    tintlog::trace!(logger, "trace {}", 1);
    tintlog::debug!(logger, "debug {}", 2);
    assert_eq!(buffer.contents(), "", "trace and debug must write nothing");

    tintlog::info!(logger, "info {}", 3);
    tintlog::warn!(logger, "warn {}", 4);
    tintlog::error!(logger, "error {}", 5);

    assert_eq!(
        buffer.lines(),
        vec![
            "\x1b[37m[INFO ] info 3\x1b[0m",
            "\x1b[33m[WARN ] warn 4\x1b[0m",
            "\x1b[31m[ERROR] error 5\x1b[0m",
        ]
    );
}

#[test]
fn test_every_severity_against_every_threshold() {
    for threshold in Severity::ALL {
        let (logger, buffer) = logger_at(threshold);
        for severity in Severity::ALL {
            tintlog::log!(logger, severity, "{}", severity);
        }

        let expected: Vec<String> = Severity::ALL
            .into_iter()
            .filter(|severity| *severity >= threshold)
            .map(|severity| logger.render(severity, format_args!("{}", severity)))
            .collect();
        assert_eq!(buffer.contents(), expected.concat(), "threshold {threshold}");
    }
}

#[test]
fn test_records_are_framed() {
    let (logger, buffer) = logger_at(Severity::Trace);
    let bold_magenta = Color::new([Attribute::BOLD, Attribute::FG_MAGENTA]);
    logger.set_color(Severity::Trace, bold_magenta);

    tintlog::trace!(logger, "{}", "\x1b[4mnested\x1b[0m and 100% literal");
    let record = buffer.contents();

    assert!(record.starts_with("\x1b[1;35m[TRACE] "));
    assert!(record.ends_with("\x1b[0m\n"));
    assert_eq!(record.matches('\n').count(), 1);
}

#[test]
fn test_threshold_changes_apply_immediately() {
    let (logger, buffer) = logger_at(Severity::Error);
    tintlog::warn!(logger, "hidden");
    logger.set_threshold(Severity::Warn);
    tintlog::warn!(logger, "shown");
    assert_eq!(buffer.lines(), vec!["\x1b[33m[WARN ] shown\x1b[0m"]);
}

#[test]
fn test_palette_override_after_construction() {
    let (logger, buffer) = logger_at(Severity::Info);
    logger.set_color(Severity::Info, Color::from(Attribute::FG_GREEN));
    tintlog::info!(logger, "ok");
    assert_eq!(buffer.contents(), "\x1b[32m[INFO ] ok\x1b[0m\n");
}

#[test]
fn test_from_config() {
    let config = tintlog::config::parse_config(
        r#"
        level = "debug"
        color = "always"

        [colors]
        debug = ["faint", "cyan"]
        "#,
    )
    .unwrap();

    let buffer = SharedBuffer::new();
    let logger = Logger::from_config(buffer.clone(), &config);
    tintlog::trace!(logger, "no");
    tintlog::debug!(logger, "yes");
    assert_eq!(buffer.contents(), "\x1b[2;36m[DEBUG] yes\x1b[0m\n");
}

#[test]
fn test_uncolored_mode() {
    let mut config = LoggerConfig::default();
    config.color = ColorMode::Never;
    let buffer = SharedBuffer::new();
    let logger = Logger::from_config(buffer.clone(), &config);

    tintlog::warn!(logger, "plain {}", "text");
    logger.log_template(Severity::Error, "%s: %d%%", &[Arg::Str("load"), Arg::Int(97)]);
    assert_eq!(buffer.lines(), vec!["[WARN ] plain text", "[ERROR] load: 97%"]);
}

#[test]
fn test_write_line_is_not_gated_or_colored() {
    let (logger, buffer) = logger_at(Severity::Fatal);
    tintlog::write_line!(logger, "status: {}", "ok");
    tintlog::write_line!(logger);
    assert_eq!(buffer.contents(), "status: ok\n\n");
}
