//! The drafted complaint and its addressable sections
//!
//! A [`DraftedComplaint`] is an ordered set of [`ComplaintSection`]s: caption,
//! introduction, one section per count, jury demand, signature. Section text
//! keeps its placeholder tokens (`[PLAINTIFF NAME]`, ...) for manual completion.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::generator::ordinal_word;

/// Matches numbered paragraphs ("12. Plaintiff ...") at the start of a line
static PARAGRAPH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\d+)\. ").expect("Invalid paragraph number regex"));

/// Matches unresolved placeholder tokens such as `[PLAINTIFF NAME]`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[A-Z][A-Z0-9 /.'-]*\]").expect("Invalid placeholder regex"));

/// Kind of block within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Caption,
    Introduction,
    Count,
    JuryDemand,
    Signature,
}

/// Stable address of a section
///
/// Count sections are addressed by their 1-based position, which is also the
/// source of their ordinal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SectionId {
    Caption,
    Introduction,
    Count(usize),
    JuryDemand,
    Signature,
}

impl SectionId {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionId::Caption => SectionKind::Caption,
            SectionId::Introduction => SectionKind::Introduction,
            SectionId::Count(_) => SectionKind::Count,
            SectionId::JuryDemand => SectionKind::JuryDemand,
            SectionId::Signature => SectionKind::Signature,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Caption => f.write_str("caption"),
            SectionId::Introduction => f.write_str("introduction"),
            SectionId::Count(n) => write!(f, "count-{n}"),
            SectionId::JuryDemand => f.write_str("jury-demand"),
            SectionId::Signature => f.write_str("signature"),
        }
    }
}

impl FromStr for SectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caption" => Ok(SectionId::Caption),
            "introduction" => Ok(SectionId::Introduction),
            "jury-demand" => Ok(SectionId::JuryDemand),
            "signature" => Ok(SectionId::Signature),
            other => other
                .strip_prefix("count-")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .map(SectionId::Count)
                .ok_or_else(|| Error::section_not_found(other)),
        }
    }
}

impl TryFrom<String> for SectionId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}

/// AI-derived support data carried through from the originating count
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportingInfo {
    pub key_facts: Vec<String>,
    pub documents: Vec<String>,
}

/// Inclusive range of paragraph numbers a count section occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphSpan {
    pub first: u32,
    pub last: u32,
}

/// One renderable, independently editable block of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintSection {
    pub id: SectionId,
    pub kind: SectionKind,
    pub content: String,
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_info: Option<SupportingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<ParagraphSpan>,
}

impl ComplaintSection {
    /// A fixed boilerplate block (caption, introduction, jury demand, signature)
    pub fn boilerplate(id: SectionId, content: impl Into<String>) -> Self {
        Self {
            id,
            kind: id.kind(),
            content: content.into(),
            editable: true,
            number: None,
            title: None,
            supporting_info: None,
            paragraphs: None,
        }
    }

    /// "FIRST COUNT", "SECOND COUNT", ... for count sections
    pub fn ordinal_label(&self) -> Option<String> {
        self.number
            .map(|n| format!("{} COUNT", ordinal_word(n).to_uppercase()))
    }

    /// Numbers of every numbered paragraph in this section, in text order
    pub fn paragraph_numbers(&self) -> Vec<u32> {
        paragraph_numbers(&self.content)
    }
}

/// Numbers of every numbered paragraph in `text`, in order of appearance
pub fn paragraph_numbers(text: &str) -> Vec<u32> {
    PARAGRAPH_NUMBER
        .captures_iter(text)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect()
}

/// Adjacent count sections whose paragraph spans do not line up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingIssue {
    pub after: SectionId,
    pub before: SectionId,
    pub expected_first: u32,
    pub found_first: u32,
}

impl fmt::Display for NumberingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} should start at paragraph {} (follows {}) but starts at {}",
            self.before, self.expected_first, self.after, self.found_first
        )
    }
}

/// The assembled complaint produced by the content generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftedComplaint {
    pub caption: ComplaintSection,
    pub introduction: ComplaintSection,
    pub counts: Vec<ComplaintSection>,
    pub jury_demand: ComplaintSection,
    pub signature: ComplaintSection,
}

impl DraftedComplaint {
    /// All sections in document order
    pub fn sections(&self) -> Vec<&ComplaintSection> {
        let mut sections = Vec::with_capacity(self.counts.len() + 4);
        sections.push(&self.caption);
        sections.push(&self.introduction);
        sections.extend(self.counts.iter());
        sections.push(&self.jury_demand);
        sections.push(&self.signature);
        sections
    }

    /// Section ids in document order
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections().into_iter().map(|s| s.id).collect()
    }

    pub fn section(&self, id: SectionId) -> Option<&ComplaintSection> {
        match id {
            SectionId::Caption => Some(&self.caption),
            SectionId::Introduction => Some(&self.introduction),
            SectionId::Count(n) => self.counts.get(n.checked_sub(1)?),
            SectionId::JuryDemand => Some(&self.jury_demand),
            SectionId::Signature => Some(&self.signature),
        }
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut ComplaintSection> {
        match id {
            SectionId::Caption => Some(&mut self.caption),
            SectionId::Introduction => Some(&mut self.introduction),
            SectionId::Count(n) => self.counts.get_mut(n.checked_sub(1)?),
            SectionId::JuryDemand => Some(&mut self.jury_demand),
            SectionId::Signature => Some(&mut self.signature),
        }
    }

    /// Paragraph numbers across all count sections, concatenated in order
    pub fn count_paragraph_numbers(&self) -> Vec<u32> {
        self.counts
            .iter()
            .flat_map(|s| s.paragraph_numbers())
            .collect()
    }

    /// Places where a count does not continue from its predecessor
    ///
    /// Empty for a freshly generated document. A title edit regenerates one
    /// count in place without renumbering its siblings, which can introduce
    /// gaps or overlaps reported here.
    pub fn numbering_issues(&self) -> Vec<NumberingIssue> {
        self.counts
            .windows(2)
            .filter_map(|pair| {
                let prev = pair[0].paragraphs?;
                let next = pair[1].paragraphs?;
                let expected = prev.last + 1;
                (next.first != expected).then(|| NumberingIssue {
                    after: pair[0].id,
                    before: pair[1].id,
                    expected_first: expected,
                    found_first: next.first,
                })
            })
            .collect()
    }

    /// Sorted, de-duplicated placeholder tokens still present in the text
    pub fn placeholders(&self) -> Vec<String> {
        let mut found = BTreeSet::new();
        for section in self.sections() {
            for m in PLACEHOLDER.find_iter(&section.content) {
                found.insert(m.as_str().to_string());
            }
        }
        found.into_iter().collect()
    }

    /// Render as plain text, sections separated by blank lines
    pub fn render_plain_text(&self) -> String {
        let mut blocks = Vec::new();
        for section in self.sections() {
            match (section.ordinal_label(), section.title.as_deref()) {
                (Some(label), Some(title)) => blocks.push(format!(
                    "{label}\n({})\n\n{}",
                    title.to_uppercase(),
                    section.content
                )),
                _ => blocks.push(section.content.clone()),
            }
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    /// Render as Markdown with one heading per count
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        for section in self.sections() {
            match section.kind {
                SectionKind::Caption => {
                    out.push_str("```text\n");
                    out.push_str(&section.content);
                    out.push_str("\n```\n\n");
                }
                SectionKind::Count => {
                    let label = section.ordinal_label().unwrap_or_default();
                    match section.title.as_deref() {
                        Some(title) => out.push_str(&format!("## {label}: {title}\n\n")),
                        None => out.push_str(&format!("## {label}\n\n")),
                    }
                    out.push_str(&section.content);
                    out.push_str("\n\n");
                }
                SectionKind::JuryDemand => {
                    out.push_str("## JURY DEMAND\n\n");
                    out.push_str(&section.content);
                    out.push_str("\n\n");
                }
                SectionKind::Introduction | SectionKind::Signature => {
                    out.push_str(&section.content);
                    out.push_str("\n\n");
                }
            }
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
        out
    }
}
