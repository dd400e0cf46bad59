//! Content generator: selected counts in, drafted complaint out
//!
//! Paragraphs are numbered from a single running counter that starts at 1
//! with the first count's body. Every later count opens with an incorporation
//! paragraph taking the next number, so numbers are strictly increasing and
//! unique across the whole document regardless of which claim types appear
//! or how many paragraphs each template contributes.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::claims::{generic_paragraphs, ClaimType, GENERIC_PRAYER};
use crate::document::{
    ComplaintSection, DraftedComplaint, ParagraphSpan, SectionId, SectionKind, SupportingInfo,
};
use crate::error::{Error, Result};
use crate::types::Count;

/// Default signature date format, e.g. "October 18, 2026"
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

const CAPTION: &str = "\
[ATTORNEY NAME], ESQ.
[LAW FIRM NAME]
[FIRM ADDRESS]
Attorneys for Plaintiff

[PLAINTIFF NAME],
        Plaintiff,
v.
[DEFENDANT NAME],
        Defendant.

SUPERIOR COURT OF [STATE]
LAW DIVISION, [COUNTY] COUNTY
DOCKET NO.: [DOCKET NUMBER]

CIVIL ACTION

COMPLAINT AND JURY DEMAND";

const INTRODUCTION: &str = "Plaintiff [PLAINTIFF NAME], residing at [PLAINTIFF ADDRESS], by way of Complaint against Defendant [DEFENDANT NAME], residing at [DEFENDANT ADDRESS], says:";

const JURY_DEMAND: &str = "Plaintiff hereby demands a trial by jury on all issues so triable.";

/// Source of "today" for the signature block
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Assembles a [`DraftedComplaint`] from counts
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    date_format: String,
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ContentGenerator {
    /// Create a generator with a custom strftime date format
    ///
    /// The format is validated up front; chrono panics when rendering an
    /// invalid format.
    pub fn new(date_format: impl Into<String>) -> Result<Self> {
        let date_format = date_format.into();
        validate_date_format(&date_format)?;
        Ok(Self { date_format })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Generate the complaint for `counts`, signed on `date`
    ///
    /// Callers pass only the selected counts; output order follows input order.
    pub fn generate(&self, counts: &[Count], date: NaiveDate) -> DraftedComplaint {
        let mut next_paragraph = 1;
        let mut sections = Vec::with_capacity(counts.len());

        for (index, count) in counts.iter().enumerate() {
            let position = index + 1;
            let (content, span) = build_count_body(position, next_paragraph, &count.title);
            next_paragraph = span.last + 1;

            sections.push(ComplaintSection {
                id: SectionId::Count(position),
                kind: SectionKind::Count,
                content,
                editable: true,
                number: Some(position),
                title: Some(count.title.clone()),
                supporting_info: Some(SupportingInfo {
                    key_facts: count.key_facts.clone(),
                    documents: count.supporting_docs.clone(),
                }),
                paragraphs: Some(span),
            });
        }

        tracing::debug!(
            "Generated complaint with {} counts, {} paragraphs",
            sections.len(),
            next_paragraph - 1
        );

        DraftedComplaint {
            caption: ComplaintSection::boilerplate(SectionId::Caption, CAPTION),
            introduction: ComplaintSection::boilerplate(SectionId::Introduction, INTRODUCTION),
            counts: sections,
            jury_demand: ComplaintSection::boilerplate(SectionId::JuryDemand, JURY_DEMAND),
            signature: ComplaintSection::boilerplate(
                SectionId::Signature,
                self.signature_block(date),
            ),
        }
    }

    /// Generate using `clock` for the signature date
    pub fn generate_with_clock(&self, counts: &[Count], clock: &dyn Clock) -> DraftedComplaint {
        self.generate(counts, clock.today())
    }

    fn signature_block(&self, date: NaiveDate) -> String {
        format!(
            "[LAW FIRM NAME]\nAttorneys for Plaintiff\n\nBy: ______________________\n    [ATTORNEY NAME], ESQ.\n\nDated: {}",
            date.format(&self.date_format)
        )
    }
}

/// Generate with the default date format
pub fn generate(counts: &[Count], date: NaiveDate) -> DraftedComplaint {
    ContentGenerator::default().generate(counts, date)
}

/// Rebuild one count section's text for a new legal theory
///
/// The section keeps its position, its first paragraph number and its
/// supporting info. Sibling counts are not renumbered, so a template with a
/// different paragraph count leaves a gap or overlap with the next count
/// (see [`DraftedComplaint::numbering_issues`]).
pub fn regenerate_count(section: &mut ComplaintSection, title: &str) -> Result<()> {
    let position = match (section.kind, section.number) {
        (SectionKind::Count, Some(n)) => n,
        _ => {
            return Err(Error::not_allowed(
                "Regenerate section",
                format!("'{}' is not a count", section.id),
            ))
        }
    };

    let first = section
        .paragraphs
        .map(|span| span.first)
        .or_else(|| section.paragraph_numbers().first().copied())
        .unwrap_or(1);

    let (content, span) = build_count_body(position, first, title);
    section.content = content;
    section.paragraphs = Some(span);
    section.title = Some(title.to_string());
    Ok(())
}

/// Build a count's text starting at paragraph `first`
fn build_count_body(position: usize, first: u32, title: &str) -> (String, ParagraphSpan) {
    let (body, prayer): (Vec<String>, &str) = match ClaimType::from_title(title) {
        Some(claim) => (
            claim.paragraphs().iter().map(|p| p.to_string()).collect(),
            claim.prayer(),
        ),
        None => (generic_paragraphs(title), GENERIC_PRAYER),
    };

    let mut next = first;
    let mut blocks = Vec::with_capacity(body.len() + 2);

    if position > 1 {
        blocks.push(format!("{next}. {}", incorporation_paragraph(position)));
        next += 1;
    }
    for paragraph in body {
        blocks.push(format!("{next}. {paragraph}"));
        next += 1;
    }
    blocks.push(prayer.to_string());

    (
        blocks.join("\n\n"),
        ParagraphSpan {
            first,
            last: next - 1,
        },
    )
}

/// Text of the re-allegation paragraph opening the count at `position`
pub fn incorporation_paragraph(position: usize) -> String {
    let prior = match position {
        0..=2 => "the First Count".to_string(),
        3 => "the First and Second Counts".to_string(),
        n => format!("the First through {} Counts", ordinal_word(n - 1)),
    };
    format!(
        "Plaintiff repeats and realleges each and every allegation contained in {prior} as if fully set forth herein."
    )
}

const ORDINAL_ONES: [&str; 20] = [
    "", "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth",
    "Tenth", "Eleventh", "Twelfth", "Thirteenth", "Fourteenth", "Fifteenth", "Sixteenth",
    "Seventeenth", "Eighteenth", "Nineteenth",
];

const CARDINAL_TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const ORDINAL_TENS: [&str; 10] = [
    "",
    "",
    "Twentieth",
    "Thirtieth",
    "Fortieth",
    "Fiftieth",
    "Sixtieth",
    "Seventieth",
    "Eightieth",
    "Ninetieth",
];

/// Ordinal in words ("First", "Twenty-Second"); numeric beyond ninety-nine
pub fn ordinal_word(n: usize) -> String {
    match n {
        1..=19 => ORDINAL_ONES[n].to_string(),
        20..=99 if n % 10 == 0 => ORDINAL_TENS[n / 10].to_string(),
        20..=99 => format!("{}-{}", CARDINAL_TENS[n / 10], ORDINAL_ONES[n % 10]),
        _ => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::config(format!("Invalid date format: {format}")));
    }
    Ok(())
}
