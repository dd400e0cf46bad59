//! Count selection model for the counts-review view

use std::collections::BTreeSet;

use cdraft_core::prelude::*;
use cdraft_core::Count;

/// Editable list of proposed counts plus the set of hand-edited ids
///
/// Ids for custom counts come from a high-water mark, so a new id is always
/// greater than every id this list has ever held, deleted ones included.
#[derive(Debug, Clone, Default)]
pub struct CountList {
    counts: Vec<Count>,
    edited: BTreeSet<u32>,
    high_water: u32,
    revision: u64,
}

impl CountList {
    pub fn from_counts(counts: Vec<Count>) -> Self {
        let high_water = counts.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            counts,
            edited: BTreeSet::new(),
            high_water,
            revision: 0,
        }
    }

    pub fn counts(&self) -> &[Count] {
        &self.counts
    }

    pub fn get(&self, id: u32) -> Option<&Count> {
        self.counts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bumped on every mutation; used for change detection
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Ids whose description was edited by hand
    pub fn edited_ids(&self) -> Vec<u32> {
        self.edited.iter().copied().collect()
    }

    pub fn is_edited(&self, id: u32) -> bool {
        self.edited.contains(&id)
    }

    /// Whether key facts and supporting docs should be shown for a count
    ///
    /// A hand-edited description no longer matches the AI-derived support
    /// data, so that data is suppressed.
    pub fn shows_support(&self, id: u32) -> bool {
        !self.is_edited(id)
    }

    pub fn any_selected(&self) -> bool {
        self.counts.iter().any(|c| c.selected)
    }

    pub fn selected_len(&self) -> usize {
        self.counts.iter().filter(|c| c.selected).count()
    }

    /// Selected counts in list order
    pub fn selected_counts(&self) -> Vec<Count> {
        self.counts.iter().filter(|c| c.selected).cloned().collect()
    }

    /// Counts as presented for review
    ///
    /// Key facts and supporting docs are cleared for counts whose support is
    /// suppressed. The stored counts keep them.
    pub fn review_counts(&self) -> Vec<Count> {
        self.counts
            .iter()
            .map(|count| {
                let mut shown = count.clone();
                if !self.shows_support(count.id) {
                    shown.key_facts.clear();
                    shown.supporting_docs.clear();
                }
                shown
            })
            .collect()
    }

    /// Flip the selection flag; returns the new value
    pub fn toggle_selection(&mut self, id: u32) -> Result<bool> {
        let count = self.get_mut(id)?;
        count.selected = !count.selected;
        let selected = count.selected;
        self.revision += 1;
        debug!("Count {} selected={}", id, selected);
        Ok(selected)
    }

    /// Append a selected custom count; returns its id
    pub fn add_custom_count(&mut self) -> u32 {
        self.high_water += 1;
        let id = self.high_water;
        self.counts.push(Count::custom(id));
        self.revision += 1;
        debug!("Added custom count {}", id);
        id
    }

    /// Remove a custom count
    ///
    /// Counts proposed by analysis cannot be deleted, only deselected.
    pub fn delete_count(&mut self, id: u32) -> Result<Count> {
        let index = self
            .counts
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::CountNotFound { id })?;

        if !self.counts[index].is_custom {
            return Err(Error::not_allowed(
                "Delete count",
                format!("count {id} was proposed by analysis; deselect it instead"),
            ));
        }

        self.edited.remove(&id);
        self.revision += 1;
        debug!("Deleted custom count {}", id);
        Ok(self.counts.remove(index))
    }

    pub fn edit_title(&mut self, id: u32, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::not_allowed("Edit count title", "title cannot be empty"));
        }
        self.get_mut(id)?.title = title;
        self.revision += 1;
        Ok(())
    }

    /// Overwrite the description and mark the count as hand-edited
    pub fn edit_description(&mut self, id: u32, description: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.description = description.into();
        self.edited.insert(id);
        self.revision += 1;
        Ok(())
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Count> {
        self.counts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::CountNotFound { id })
    }
}
