//! Model-level unit tests.

#[cfg(test)]
mod model_tests {
    use super::super::*;
    use crate::constants::{DEFAULT_INDENT_WIDTH, DEFAULT_NOTE_TEMPLATE};

    fn parse(source: &str) -> Document {
        Document::parse(source, DEFAULT_INDENT_WIDTH)
    }

    #[test]
    fn parses_heading_plain_and_indented_lines() {
        let doc = parse("# Title\nhello\n  world\n");
        assert_eq!(doc.line_count(), 3);

        let title = doc.line(0).expect("line 0");
        assert!(title.is_heading);
        assert_eq!(title.section_level, 1);
        assert_eq!(title.inner_text, "Title");

        let hello = doc.line(1).expect("line 1");
        assert!(!hello.is_heading);
        assert_eq!(hello.inner_text, "hello");
        assert_eq!(hello.indentation, 0);

        let world = doc.line(2).expect("line 2");
        assert_eq!(world.inner_text, "world");
        assert_eq!(world.indentation, 2);

        assert_eq!(doc.draft_text(), "# Title\nhello\n  world");
    }

    #[test]
    fn file_text_roundtrips_verbatim() {
        let cases = [
            "",
            "\n",
            "single",
            "# Title\nhello\n  world\n",
            "a\n\n\nb\n\n",
            "\tTabbed\n  \t mixed indent\n",
            "###### Six\n####### seven is not a heading\n#nospace\n# \n",
            "crlf line\r\nnext\r\n",
            "bell \u{7} inside\nünïcödé ✓\n",
        ];
        for source in cases {
            assert_eq!(parse(source).file_text(), source, "source: {:?}", source);
        }
    }

    #[test]
    fn heading_grammar_limits() {
        for level in 1..=6u8 {
            let raw = format!("{} Section", "#".repeat(level as usize));
            let line = Line::parse(&raw, DEFAULT_INDENT_WIDTH);
            assert!(line.is_heading, "raw: {}", raw);
            assert_eq!(line.section_level, level);
            assert_eq!(line.inner_text, "Section");
        }
        for raw in ["####### Seven", "#nospace", "# ", "#"] {
            let line = Line::parse(raw, DEFAULT_INDENT_WIDTH);
            assert!(!line.is_heading, "raw: {}", raw);
            assert_eq!(line.inner_text, raw);
            assert!(!line.is_format_needed);
        }
    }

    #[test]
    fn leading_tabs_expand_in_formatted_form_only() {
        let doc = parse("\tindented\n");
        let line = doc.line(0).expect("line");
        assert_eq!(line.indentation, DEFAULT_INDENT_WIDTH);
        assert_eq!(line.inner_text, "indented");
        assert_eq!(doc.draft_text(), "    indented");
        assert_eq!(doc.file_text(), "\tindented\n");
    }

    #[test]
    fn control_characters_force_passthrough() {
        let line = Line::parse("  a\tb", DEFAULT_INDENT_WIDTH);
        assert!(line.is_format_needed);
        assert_eq!(line.file_raw, "  a\tb");
        assert_eq!(line.draft_text(), "  a\tb");

        let crlf = Line::parse("# Title\r", DEFAULT_INDENT_WIDTH);
        assert!(crlf.is_format_needed);
        assert!(!crlf.is_heading);
    }

    #[test]
    fn passthrough_lines_survive_edits_elsewhere() {
        let mut doc = parse("plain\nraw\tline\n## Heading\n");
        doc.line_mut(0)
            .expect("line 0")
            .set_content("plain edited", DEFAULT_INDENT_WIDTH);
        doc.line_mut(2).expect("line 2").set_heading(Some(3));

        let file = doc.file_text();
        let lines: Vec<&str> = file.lines().collect();
        assert_eq!(lines, vec!["plain edited", "raw\tline", "### Heading"]);
    }

    #[test]
    fn structured_edits_rederive_raw() {
        let mut line = Line::parse("\tnote", DEFAULT_INDENT_WIDTH);
        assert_eq!(line.file_raw, "\tnote");
        line.set_indentation(2);
        assert_eq!(line.file_raw, "  note");
        assert!(line.set_heading(Some(9)));
        assert_eq!(line.file_raw, "  ###### note");
        line.set_heading(None);
        assert_eq!(line.file_raw, "  note");

        let mut raw = Line::passthrough("x\ty");
        assert!(!raw.set_heading(Some(1)));
        assert!(!raw.set_indentation(4));
        assert_eq!(raw.file_raw, "x\ty");
    }

    #[test]
    fn edited_lines_read_back_like_their_file_text() {
        let mut typed_marker = Line::parse("hello", DEFAULT_INDENT_WIDTH);
        typed_marker.set_content("# hello", DEFAULT_INDENT_WIDTH);
        assert!(typed_marker.is_heading);
        assert_eq!(typed_marker.section_level, 1);
        assert_eq!(typed_marker.inner_text, "hello");

        let mut typed_spaces = Line::parse("milk", DEFAULT_INDENT_WIDTH);
        typed_spaces.set_content("  milk", DEFAULT_INDENT_WIDTH);
        assert_eq!(typed_spaces.indentation, 2);
        assert_eq!(typed_spaces.inner_text, "milk");

        let mut emptied = Line::parse("# a", DEFAULT_INDENT_WIDTH);
        emptied.set_content("", DEFAULT_INDENT_WIDTH);
        assert!(!emptied.is_heading);
        assert_eq!(emptied.section_level, 0);
        assert_eq!(emptied.file_raw, "# ");

        let mut tabbed = Line::parse("ab", DEFAULT_INDENT_WIDTH);
        tabbed.set_content("a\tb", DEFAULT_INDENT_WIDTH);
        assert!(tabbed.is_format_needed);

        let mut cleaned = Line::parse("a\tb", DEFAULT_INDENT_WIDTH);
        cleaned.set_content("  ab", DEFAULT_INDENT_WIDTH);
        assert!(!cleaned.is_format_needed);
        assert_eq!((cleaned.indentation, cleaned.inner_text.as_str()), (2, "ab"));

        for line in [typed_marker, typed_spaces, emptied, tabbed, cleaned] {
            assert_eq!(Line::parse(&line.file_raw, DEFAULT_INDENT_WIDTH), line);
        }
    }

    #[test]
    fn heading_changes_that_would_not_read_back_are_refused() {
        let mut empty = Line::parse("", DEFAULT_INDENT_WIDTH);
        assert!(!empty.set_heading(Some(1)));
        assert_eq!(empty.file_raw, "");

        let mut spaced_title = Line::parse("#  padded", DEFAULT_INDENT_WIDTH);
        assert_eq!(spaced_title.inner_text, " padded");
        assert!(!spaced_title.set_heading(None));
        assert!(spaced_title.set_heading(Some(2)));
        assert_eq!(spaced_title.file_raw, "##  padded");
    }

    #[test]
    fn empty_source_has_one_empty_line() {
        let doc = parse("");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_len(0), 0);
        assert_eq!(doc.draft_text(), "");
    }

    #[test]
    fn template_substitutes_title() {
        let doc = Document::from_template(DEFAULT_NOTE_TEMPLATE, "  Groceries ", 4);
        assert_eq!(doc.file_text(), "# Groceries\n");
        assert_eq!(doc.line(0).and_then(Line::heading_level), Some(1));
    }

    #[test]
    fn logical_position_clamps_to_document() {
        let doc = parse("abc\nde");
        assert_eq!(
            LogicalPosition::new(9, 9).clamped_to(&doc),
            LogicalPosition::new(1, 2)
        );
        assert_eq!(
            LogicalPosition::new(0, 7).clamped_to(&doc),
            LogicalPosition::new(0, 3)
        );
    }
}
