//! End-to-end conversion tests.
//!
//! Drives `Converter::run` over realistic script fragments and checks the
//! rendered output byte for byte.

use ass_dialog_core::{
    convert::{ConvertOptions, Converter},
    parser::{FieldLimits, ParseStep},
    template::{SubstitutionMode, Template},
    time::FrameRateRatio,
};

fn convert(input: &[u8], options: ConvertOptions) -> String {
    let (output, _) = Converter::new(options)
        .convert_bytes(input)
        .expect("in-memory conversion should not fail");
    String::from_utf8(output).expect("test output should be UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Reference line with the default template and no rescaling
    #[test]
    fn test_reference_line_default_template() {
        let input = b"Dialogue: 0,0:01:02.50,0:01:05.75,Default,Bob,0,0,0,,Hello, world!\n";
        assert_eq!(
            convert(input, ConvertOptions::default()),
            "0:01:02.50-0:01:05.75\tBob\tHello, world!\n"
        );
    }

    /// Identity ratio reproduces every input timestamp exactly
    #[test]
    fn test_identity_ratio_preserves_times() {
        let input = b"Dialogue: 0,0:00:00.00,0:00:00.01,S,A,0,0,0,,a
Dialogue: 0,0:59:59.99,1:00:00.00,S,A,0,0,0,,b
Dialogue: 0,12:34:56.78,23:59:59.99,S,A,0,0,0,,c
";
        let options = ConvertOptions::default().with_template(Template::compile(r"!start !end\n"));
        assert_eq!(
            convert(input, options),
            "0:00:00.00 0:00:00.01\n0:59:59.99 1:00:00.00\n12:34:56.78 23:59:59.99\n"
        );
    }

    /// A malformed header line is dropped and does not stop the stream
    #[test]
    fn test_malformed_line_does_not_abort() {
        let input = b"Dialogue: 0,0:00:01.00,0:00:02.00,S,First,0,0,0,,one
Dialogue: not,a,valid,header
Dialogue: 0,0:00:03.00,0:00:04.00,S,Second,0,0,0,,two
";
        let (output, report) = Converter::default().convert_bytes(input).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "0:00:01.00-0:00:02.00\tFirst\tone\n0:00:03.00-0:00:04.00\tSecond\ttwo\n"
        );
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped_at(ParseStep::Recognition), 1);
    }

    /// Lines failing at every parser step are each skipped
    #[test]
    fn test_every_failure_step_is_skipped() {
        let input = b"Comment: 0,0:00:00.00,0:00:01.00,S,A,0,0,0,,c
Dialogue: 0,0:00:00.00,0:00:01.00
Dialogue: 0,0:00:00.00,0:00:01.00,Style
Dialogue: 0,0:00:00.00,0:00:01.00,Style,Actor
Dialogue: 0,0:00:00.00,0:00:01.00,Style,Actor,0,0
Dialogue: 0,0:00:00.00,0:00:01.00,Style,Actor,0,0,0,effect-without-comma
Dialogue: 0,0:00:00.00,0:00:01.00,Style,Actor,0,0,0,,kept
";
        let (output, report) = Converter::default().convert_bytes(input).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "0:00:00.00-0:00:01.00\tActor\tkept\n"
        );
        assert_eq!(
            report.skipped_by_step(),
            vec![
                (ParseStep::Recognition, 1),
                (ParseStep::HeaderSkip, 1),
                (ParseStep::Style, 1),
                (ParseStep::Actor, 1),
                (ParseStep::MarginSkip, 1),
                (ParseStep::Effect, 1),
            ]
        );
    }

    /// 24 fps script retimed for 25 fps playback
    #[test]
    fn test_film_to_pal_retiming() {
        let input = b"Dialogue: 0,0:00:36.00,0:01:00.00,S,A,0,0,0,,T\n";
        let options =
            ConvertOptions::default().with_ratio(FrameRateRatio::from_fps(Some(24.0), Some(25.0)));
        assert_eq!(convert(input, options), "0:00:34.56-0:00:57.60\tA\tT\n");
    }

    /// NTSC film rate to PAL truncates fractional centiseconds
    #[test]
    fn test_ntsc_to_pal_truncates() {
        // 1:00:00.00 * 23.976 / 25 = 345254.4 centiseconds
        let input = b"Dialogue: 0,1:00:00.00,1:00:00.00,S,A,0,0,0,,T\n";
        let options = ConvertOptions::default()
            .with_ratio(FrameRateRatio::from_fps(Some(23.976), Some(25.0)))
            .with_template(Template::compile("!start"));
        assert_eq!(convert(input, options), "0:57:32.54");
    }

    /// Every token substituted, some more than once
    #[test]
    fn test_all_tokens_and_repeats() {
        let input = b"Dialogue: 5,0:00:01.00,0:00:02.00,Sign,Narrator,10,20,30,Scroll up;10;20,Text, with, commas\n";
        let template = Template::compile(r"[!layer] !style/!actor/!effect\t!text (!actor)\n");
        let options = ConvertOptions::default().with_template(template);
        assert_eq!(
            convert(input, options),
            "[5] Sign/Narrator/Scroll up;10;20\tText, with, commas (Narrator)\n"
        );
    }

    /// Actor containing `!text` shows the re-substitution hazard
    #[test]
    fn test_sequential_resubstitution_hazard() {
        let input = b"Dialogue: 0,0:00:00.00,0:00:01.00,S,!text,0,0,0,,payload\n";
        let template = Template::compile(r"!actor|!text");

        let sequential = ConvertOptions::default().with_template(template.clone());
        assert_eq!(convert(input, sequential), "payload|payload");

        let simultaneous = ConvertOptions::default()
            .with_template(template)
            .with_mode(SubstitutionMode::Simultaneous);
        assert_eq!(convert(input, simultaneous), "!text|payload");
    }

    /// Truncation keeps the line and cuts the field
    #[test]
    fn test_long_fields_truncated_not_rejected() {
        let long_actor = "x".repeat(500);
        let line = format!("Dialogue: 0,0:00:00.00,0:00:01.00,S,{long_actor},0,0,0,,T\n");
        let options = ConvertOptions::default().with_template(Template::compile("!actor"));
        assert_eq!(convert(line.as_bytes(), options), "x".repeat(127));
    }

    /// A line longer than the read limit is cut, and its tail is skipped
    #[test]
    fn test_line_limit_splits_physical_lines() {
        let line = format!(
            "Dialogue: 0,0:00:00.00,0:00:01.00,S,A,0,0,0,,{}\nDialogue: 0,0:00:02.00,0:00:03.00,S,B,0,0,0,,short\n",
            "y".repeat(100)
        );
        let options = ConvertOptions::default()
            .with_limits(FieldLimits::default().with_line(60))
            .with_template(Template::compile(r"!actor:!text\n"));
        let (output, report) = Converter::new(options)
            .convert_bytes(line.as_bytes())
            .unwrap();

        // Everything up to the effect comma is 45 bytes, leaving 15 bytes of text
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("A:{}\nB:short\n", "y".repeat(15))
        );
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped_at(ParseStep::Recognition), 2);
    }

    /// CRLF scripts do not leak carriage returns into the output
    #[test]
    fn test_crlf_input() {
        let input = b"[Events]\r\nDialogue: 0,0:00:00.00,0:00:01.00,S,A,0,0,0,,T\r\n";
        assert_eq!(
            convert(input, ConvertOptions::default()),
            "0:00:00.00-0:00:01.00\tA\tT\n"
        );
    }

    /// Final line without a newline is still converted
    #[test]
    fn test_last_line_without_newline() {
        let input = b"Dialogue: 0,0:00:00.00,0:00:01.00,S,A,0,0,0,,end of file";
        assert_eq!(
            convert(input, ConvertOptions::default()),
            "0:00:00.00-0:00:01.00\tA\tend of file\n"
        );
    }
}
