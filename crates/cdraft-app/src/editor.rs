//! Section editor for the draft-editor view
//!
//! Wraps the generated [`DraftedComplaint`] with selection, scroll requests and
//! a single in-place edit session. Title edits on a count regenerate that
//! count's text; content edits overwrite the text verbatim.

use cdraft_core::prelude::*;
use cdraft_core::{
    paragraph_numbers, regenerate_count, DraftedComplaint, NumberingIssue, ParagraphSpan,
    SectionId, SectionKind,
};

/// What an edit session is changing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Free text of any editable section
    Content(SectionId),
    /// Legal-theory title of the count with this 1-based number
    CountTitle(usize),
}

impl EditTarget {
    pub fn section(&self) -> SectionId {
        match self {
            EditTarget::Content(id) => *id,
            EditTarget::CountTitle(n) => SectionId::Count(*n),
        }
    }
}

/// An open edit: the target and the uncommitted buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: EditTarget,
    pub buffer: String,
}

/// Result of committing an edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub section: SectionId,
    /// True when a title change rebuilt the count text
    pub regenerated: bool,
    /// Numbering problems present after the commit
    pub numbering_issues: Vec<NumberingIssue>,
}

#[derive(Debug, Clone)]
pub struct SectionEditor {
    draft: DraftedComplaint,
    selected: Option<SectionId>,
    scroll_to: Option<SectionId>,
    editing: Option<EditSession>,
    revision: u64,
    last_changed: Option<SectionId>,
}

impl SectionEditor {
    pub fn new(draft: DraftedComplaint) -> Self {
        Self {
            draft,
            selected: None,
            scroll_to: None,
            editing: None,
            revision: 0,
            last_changed: None,
        }
    }

    pub fn draft(&self) -> &DraftedComplaint {
        &self.draft
    }

    pub fn selected(&self) -> Option<SectionId> {
        self.selected
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Bumped on every committed change to the draft
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Section touched by the most recent commit
    pub fn last_changed(&self) -> Option<SectionId> {
        self.last_changed
    }

    /// Select a section and request that it be scrolled into view
    pub fn select(&mut self, id: SectionId) -> Result<()> {
        if self.draft.section(id).is_none() {
            return Err(Error::section_not_found(id.to_string()));
        }
        self.selected = Some(id);
        self.scroll_to = Some(id);
        Ok(())
    }

    /// Pending scroll-into-view request, cleared once taken
    pub fn take_scroll_request(&mut self) -> Option<SectionId> {
        self.scroll_to.take()
    }

    /// Open an edit session on `target`
    ///
    /// Only one session exists at a time. An open session is committed before
    /// the new one starts and its outcome is returned.
    pub fn begin_edit(&mut self, target: EditTarget) -> Result<Option<EditOutcome>> {
        let buffer = self.initial_buffer(target)?;

        let previous = match self.editing.as_ref().map(|open| open.target == target) {
            Some(true) => {
                debug!("Edit session for {:?} already open", target);
                return Ok(None);
            }
            Some(false) => Some(self.commit_edit()?),
            None => None,
        };

        self.selected = Some(target.section());
        self.scroll_to = Some(target.section());
        self.editing = Some(EditSession { target, buffer });
        Ok(previous)
    }

    pub fn update_buffer(&mut self, text: impl Into<String>) -> Result<()> {
        let session = self.editing.as_mut().ok_or(Error::NoEditInProgress)?;
        session.buffer = text.into();
        Ok(())
    }

    /// Discard the open session without touching the draft
    pub fn cancel_edit(&mut self) -> Result<EditSession> {
        self.editing.take().ok_or(Error::NoEditInProgress)
    }

    /// Apply the open session to the draft
    ///
    /// An empty title is rejected and the session stays open.
    pub fn commit_edit(&mut self) -> Result<EditOutcome> {
        let session = self.editing.take().ok_or(Error::NoEditInProgress)?;

        let applied = match session.target {
            EditTarget::Content(id) => self.apply_content(id, &session.buffer).map(|_| false),
            EditTarget::CountTitle(n) => self.apply_title(n, &session.buffer),
        };

        let regenerated = match applied {
            Ok(regenerated) => regenerated,
            Err(e) => {
                self.editing = Some(session);
                return Err(e);
            }
        };

        let section = session.target.section();
        self.revision += 1;
        self.last_changed = Some(section);

        let numbering_issues = self.draft.numbering_issues();
        for issue in &numbering_issues {
            warn!("Paragraph numbering drift: {}", issue);
        }

        Ok(EditOutcome {
            section,
            regenerated,
            numbering_issues,
        })
    }

    /// Current gaps or overlaps between adjacent count sections
    pub fn numbering_drift(&self) -> Vec<NumberingIssue> {
        self.draft.numbering_issues()
    }

    fn initial_buffer(&self, target: EditTarget) -> Result<String> {
        let id = target.section();
        let section = self
            .draft
            .section(id)
            .ok_or_else(|| Error::section_not_found(id.to_string()))?;

        if !section.editable {
            return Err(Error::not_editable(id.to_string()));
        }

        match target {
            EditTarget::Content(_) => Ok(section.content.clone()),
            EditTarget::CountTitle(_) => Ok(section.title.clone().unwrap_or_default()),
        }
    }

    fn apply_content(&mut self, id: SectionId, text: &str) -> Result<()> {
        let section = self
            .draft
            .section_mut(id)
            .ok_or_else(|| Error::section_not_found(id.to_string()))?;

        section.content = text.to_string();

        if section.kind == SectionKind::Count {
            let numbers = paragraph_numbers(text);
            section.paragraphs = match (numbers.first(), numbers.last()) {
                (Some(&first), Some(&last)) => Some(ParagraphSpan { first, last }),
                _ => None,
            };
        }

        debug!("Committed content edit for {}", id);
        Ok(())
    }

    fn apply_title(&mut self, number: usize, title: &str) -> Result<bool> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::not_allowed("Edit count title", "title cannot be empty"));
        }

        // A count with no numbered paragraphs continues after the previous one
        let seed_first = match number.checked_sub(2) {
            Some(prev) => self
                .draft
                .counts
                .get(prev)
                .and_then(|s| s.paragraphs)
                .map(|span| span.last + 1),
            None => Some(1),
        };

        let id = SectionId::Count(number);
        let section = self
            .draft
            .section_mut(id)
            .ok_or_else(|| Error::section_not_found(id.to_string()))?;

        if section.title.as_deref() == Some(title) {
            debug!("Title of {} unchanged, skipping regeneration", id);
            return Ok(false);
        }

        if section.paragraphs.is_none() {
            if let Some(first) = seed_first {
                section.paragraphs = Some(ParagraphSpan { first, last: first });
            }
        }

        regenerate_count(section, title)?;
        info!("Regenerated {} as '{}'", id, title);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdraft_core::fixtures::sample_counts;
    use cdraft_core::{generate, Count};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn editor() -> SectionEditor {
        let counts: Vec<Count> = sample_counts().into_iter().filter(|c| c.selected).collect();
        SectionEditor::new(generate(&counts, date()))
    }

    #[test]
    fn test_select_sets_scroll_request() {
        let mut editor = editor();
        editor.select(SectionId::Count(2)).unwrap();

        assert_eq!(editor.selected(), Some(SectionId::Count(2)));
        assert_eq!(editor.take_scroll_request(), Some(SectionId::Count(2)));
        assert_eq!(editor.take_scroll_request(), None);
    }

    #[test]
    fn test_select_unknown_section() {
        let mut editor = editor();
        let err = editor.select(SectionId::Count(9)).unwrap_err();
        assert!(matches!(err, Error::SectionNotFound { .. }));
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_content_edit_overwrites_verbatim() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::JuryDemand))
            .unwrap();
        editor.update_buffer("Plaintiff demands a jury of twelve.").unwrap();

        let outcome = editor.commit_edit().unwrap();

        assert!(!outcome.regenerated);
        assert_eq!(
            editor.draft().jury_demand.content,
            "Plaintiff demands a jury of twelve."
        );
        assert!(!editor.is_editing());
        assert_eq!(editor.revision(), 1);
    }

    #[test]
    fn test_cancel_leaves_draft_untouched() {
        let mut editor = editor();
        let before = editor.draft().clone();

        editor
            .begin_edit(EditTarget::Content(SectionId::Caption))
            .unwrap();
        editor.update_buffer("scratch").unwrap();
        editor.cancel_edit().unwrap();

        assert_eq!(editor.draft(), &before);
        assert!(matches!(editor.cancel_edit(), Err(Error::NoEditInProgress)));
    }

    #[test]
    fn test_title_edit_regenerates_and_preserves_support() {
        let mut editor = editor();
        let before = editor.draft().counts[1].supporting_info.clone();
        assert!(before.is_some());

        editor.begin_edit(EditTarget::CountTitle(2)).unwrap();
        assert_eq!(
            editor.editing().unwrap().buffer,
            "Vicarious Liability / Respondeat Superior"
        );
        editor.update_buffer("Premises Liability").unwrap();
        let outcome = editor.commit_edit().unwrap();

        let section = &editor.draft().counts[1];
        assert!(outcome.regenerated);
        assert_eq!(section.title.as_deref(), Some("Premises Liability"));
        assert_eq!(section.supporting_info, before);
        assert!(section.content.starts_with("12. Plaintiff repeats"));
    }

    #[test]
    fn test_title_edit_reports_drift() {
        let mut editor = editor();
        // Negligence -> Gross Negligence shrinks count one, leaving a gap
        editor.begin_edit(EditTarget::CountTitle(1)).unwrap();
        editor.update_buffer("Gross Negligence").unwrap();
        let outcome = editor.commit_edit().unwrap();

        assert_eq!(outcome.numbering_issues.len(), 1);
        assert_eq!(outcome.numbering_issues[0].expected_first, 6);
        assert_eq!(outcome.numbering_issues[0].found_first, 12);
        assert_eq!(editor.numbering_drift(), outcome.numbering_issues);
    }

    #[test]
    fn test_unchanged_title_skips_regeneration() {
        let mut editor = editor();
        let before = editor.draft().clone();

        editor.begin_edit(EditTarget::CountTitle(1)).unwrap();
        let outcome = editor.commit_edit().unwrap();

        assert!(!outcome.regenerated);
        assert_eq!(editor.draft(), &before);
    }

    #[test]
    fn test_empty_title_rejected_keeps_session() {
        let mut editor = editor();
        editor.begin_edit(EditTarget::CountTitle(1)).unwrap();
        editor.update_buffer("   ").unwrap();

        assert!(matches!(
            editor.commit_edit(),
            Err(Error::NotAllowed { .. })
        ));
        assert!(editor.is_editing());
    }

    #[test]
    fn test_begin_edit_commits_open_session() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::Introduction))
            .unwrap();
        editor.update_buffer("New introduction").unwrap();

        let previous = editor
            .begin_edit(EditTarget::Content(SectionId::Signature))
            .unwrap();

        assert_eq!(previous.unwrap().section, SectionId::Introduction);
        assert_eq!(editor.draft().introduction.content, "New introduction");
        assert_eq!(
            editor.editing().unwrap().target,
            EditTarget::Content(SectionId::Signature)
        );
    }

    #[test]
    fn test_begin_edit_on_missing_section_keeps_open_session() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::Caption))
            .unwrap();
        editor.update_buffer("draft caption").unwrap();

        assert!(editor.begin_edit(EditTarget::CountTitle(7)).is_err());
        assert_eq!(editor.editing().unwrap().buffer, "draft caption");
    }

    #[test]
    fn test_non_editable_section_rejected() {
        let mut draft = editor().draft().clone();
        draft.signature.editable = false;
        let mut editor = SectionEditor::new(draft);

        let err = editor
            .begin_edit(EditTarget::Content(SectionId::Signature))
            .unwrap_err();
        assert!(matches!(err, Error::NotEditable { .. }));
    }

    #[test]
    fn test_content_edit_of_count_updates_span() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::Count(2)))
            .unwrap();
        editor
            .update_buffer("12. Plaintiff repeats.\n\n13. Defendant employed the driver.")
            .unwrap();
        editor.commit_edit().unwrap();

        let span = editor.draft().counts[1].paragraphs.unwrap();
        assert_eq!((span.first, span.last), (12, 13));
    }

    #[test]
    fn test_unnumbered_content_clears_span_then_title_edit_reseeds() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::Count(2)))
            .unwrap();
        editor
            .update_buffer("Defendant employer is liable for the acts of its driver.")
            .unwrap();
        let outcome = editor.commit_edit().unwrap();

        assert_eq!(editor.draft().counts[1].paragraphs, None);
        assert!(outcome.numbering_issues.is_empty());

        editor.begin_edit(EditTarget::CountTitle(2)).unwrap();
        editor.update_buffer("Negligent Entrustment").unwrap();
        editor.commit_edit().unwrap();

        let prev = editor.draft().counts[0].paragraphs.unwrap();
        let span = editor.draft().counts[1].paragraphs.unwrap();
        assert_eq!(span.first, prev.last + 1);
        assert!(editor.numbering_drift().is_empty());
    }

    #[test]
    fn test_begin_edit_requests_scroll() {
        let mut editor = editor();
        editor
            .begin_edit(EditTarget::Content(SectionId::Count(1)))
            .unwrap();

        assert_eq!(editor.selected(), Some(SectionId::Count(1)));
        assert_eq!(editor.take_scroll_request(), Some(SectionId::Count(1)));
    }

    #[test]
    fn test_update_buffer_without_session() {
        let mut editor = editor();
        assert!(matches!(
            editor.update_buffer("text"),
            Err(Error::NoEditInProgress)
        ));
    }
}
