//! Section Parser: segments raw résumé text into named sections.
//!
//! Lines are scanned in order with a "current section" cursor. A line that
//! matches a section header moves the cursor and is itself dropped; any other
//! line is appended (trimmed) to the section under the cursor. Lines seen
//! before the first header are discarded.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// The fixed set of résumé sections, in matching order.
///
/// The derived `Ord` follows declaration order, so section maps iterate in
/// the same order the header patterns are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Projects,
    LeadershipAwards,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::LeadershipAwards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::LeadershipAwards => "leadership_awards",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header patterns, tested in this order; the first match wins.
/// A line matches if the pattern occurs anywhere in it, case-insensitively.
static SECTION_PATTERNS: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    [
        (SectionKind::Experience, r"(?i)(experience|work history|employment)"),
        (SectionKind::Education, r"(?i)(education|academic background)"),
        (SectionKind::Skills, r"(?i)(skills|technical skills|abilities)"),
        (SectionKind::Projects, r"(?i)(projects|personal projects|academic projects)"),
        (SectionKind::LeadershipAwards, r"(?i)(leadership|awards|honors|scholarship)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
    .collect()
});

/// Returns the section a line introduces, if it is a header.
pub fn classify_header(line: &str) -> Option<SectionKind> {
    SECTION_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(kind, _)| *kind)
}

/// Parsed résumé sections. Sections without content are never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeSections {
    sections: BTreeMap<SectionKind, Vec<String>>,
}

impl ResumeSections {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    /// Lines of a section, in résumé order.
    pub fn lines(&self, kind: SectionKind) -> Option<&[String]> {
        self.sections.get(&kind).map(Vec::as_slice)
    }

    /// Newline-joined content of a section.
    pub fn text(&self, kind: SectionKind) -> Option<String> {
        self.lines(kind).map(|lines| lines.join("\n"))
    }

    /// Present sections in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &[String])> {
        self.sections
            .iter()
            .map(|(kind, lines)| (*kind, lines.as_slice()))
    }

    /// Recombines all sections into one text, sections separated by a blank line.
    pub fn full_text(&self) -> String {
        self.iter()
            .map(|(_, lines)| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Line boundaries: `\n`, a lone `\r`, vertical tab, form feed, the file/group/
/// record separators, NEL and the Unicode line and paragraph separators.
/// `\r\n` splits twice; the empty fragment between is skipped like any blank line.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Segments raw résumé text into sections. Never fails; unrecognised input
/// yields an empty result.
pub fn parse_sections(raw_text: &str) -> ResumeSections {
    let mut sections: BTreeMap<SectionKind, Vec<String>> = BTreeMap::new();
    let mut current: Option<SectionKind> = None;

    for line in raw_text.split(LINE_BREAKS) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(kind) = classify_header(line) {
            current = Some(kind);
            continue;
        }

        // Preamble before the first header is dropped.
        if let Some(kind) = current {
            sections.entry(kind).or_default().push(line.to_string());
        }
    }

    ResumeSections { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_sections() {
        let text = "
            EXPERIENCE
            Worked at Google

            EDUCATION
            SIUE

            SKILLS
            Python, C++
        ";
        let sections = parse_sections(text);

        assert_eq!(sections.len(), 3);
        assert_eq!(
            sections.text(SectionKind::Experience).as_deref(),
            Some("Worked at Google")
        );
        assert_eq!(sections.text(SectionKind::Education).as_deref(), Some("SIUE"));
        assert_eq!(
            sections.text(SectionKind::Skills).as_deref(),
            Some("Python, C++")
        );
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("   \n\n  \t\n").is_empty());
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        let sections = parse_sections("Just some random text with no section headers at all.");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_mixed_case_and_alias_headers() {
        let text = "
            work history
            Did stuff

              Education
            School Name

              skills
            Python, C++
        ";
        let sections = parse_sections(text);

        assert_eq!(sections.lines(SectionKind::Experience).unwrap(), ["Did stuff"]);
        assert_eq!(sections.lines(SectionKind::Education).unwrap(), ["School Name"]);
        assert_eq!(sections.lines(SectionKind::Skills).unwrap(), ["Python, C++"]);
    }

    #[test]
    fn test_multi_line_section_joined_with_newlines() {
        let text = "EXPERIENCE\nLine one at job\n   Line two at job   \n";
        let sections = parse_sections(text);
        assert_eq!(
            sections.text(SectionKind::Experience).as_deref(),
            Some("Line one at job\nLine two at job")
        );
    }

    #[test]
    fn test_preamble_before_first_header_is_dropped() {
        let text = "Jane Doe\njane@example.com\nSKILLS\nRust";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.lines(SectionKind::Skills).unwrap(), ["Rust"]);
    }

    #[test]
    fn test_header_lines_are_not_content() {
        let text = "Projects\nCompiler in Rust\nAwards\nDean's list";
        let sections = parse_sections(text);
        assert_eq!(sections.lines(SectionKind::Projects).unwrap(), ["Compiler in Rust"]);
        assert_eq!(
            sections.lines(SectionKind::LeadershipAwards).unwrap(),
            ["Dean's list"]
        );
    }

    #[test]
    fn test_ambiguous_header_takes_first_pattern_in_order() {
        // Matches both education and experience; experience is tested first.
        assert_eq!(
            classify_header("Education and Experience"),
            Some(SectionKind::Experience)
        );
        // Matches projects and leadership; projects is tested first.
        assert_eq!(
            classify_header("Leadership Projects"),
            Some(SectionKind::Projects)
        );
        assert_eq!(
            classify_header("Honors & Scholarship"),
            Some(SectionKind::LeadershipAwards)
        );
        assert_eq!(classify_header("Built a search engine"), None);
    }

    #[test]
    fn test_most_recent_header_wins_and_sections_accumulate() {
        let text = "Experience\nA\nEducation\nB\nEmployment\nC";
        let sections = parse_sections(text);
        assert_eq!(sections.lines(SectionKind::Experience).unwrap(), ["A", "C"]);
        assert_eq!(sections.lines(SectionKind::Education).unwrap(), ["B"]);
    }

    #[test]
    fn test_header_without_content_is_omitted() {
        let sections = parse_sections("Skills\nEducation\nMIT");
        assert!(!sections.contains(SectionKind::Skills));
        assert!(sections.contains(SectionKind::Education));
    }

    #[test]
    fn test_content_is_subsequence_of_trimmed_input_lines() {
        let text = "Intro\nExperience\n  Acme Corp  \nBuilt things\n\nSkills\nRust\nGo\nAcme Corp";
        let input: Vec<&str> = text.lines().map(str::trim).collect();
        let sections = parse_sections(text);

        for (_, lines) in sections.iter() {
            let mut cursor = 0;
            for line in lines {
                let pos = input[cursor..]
                    .iter()
                    .position(|l| l == line)
                    .expect("content line must come from the input");
                cursor += pos + 1;
            }
        }
        let total: usize = sections.iter().map(|(_, l)| l.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_full_text_follows_enumeration_order() {
        let text = "Skills\nRust\nExperience\nAcme";
        let sections = parse_sections(text);
        assert_eq!(sections.full_text(), "Acme\n\nRust");
    }

    #[test]
    fn test_carriage_return_and_form_feed_split_lines() {
        let sections = parse_sections("EXPERIENCE\rAcme Corp\rEDUCATION\rMIT");
        assert_eq!(sections.lines(SectionKind::Experience).unwrap(), ["Acme Corp"]);
        assert_eq!(sections.lines(SectionKind::Education).unwrap(), ["MIT"]);

        let paged = parse_sections("Skills\r\nRust\x0cProjects\u{2028}Compiler\u{85}Linker");
        assert_eq!(paged.lines(SectionKind::Skills).unwrap(), ["Rust"]);
        assert_eq!(paged.lines(SectionKind::Projects).unwrap(), ["Compiler", "Linker"]);
    }

    #[test]
    fn test_section_names() {
        let names: Vec<&str> = SectionKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            ["experience", "education", "skills", "projects", "leadership_awards"]
        );
    }
}
