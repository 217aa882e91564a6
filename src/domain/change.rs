/// One staged file together with its cached diff text.
#[derive(Debug, Clone)]
pub struct StagedChange {
    pub path: String,
    pub diff_text: String,
}

/// Staged changes in collection order, one entry per file.
#[derive(Debug, Clone, Default)]
pub struct StagedChanges {
    entries: Vec<StagedChange>,
}

impl StagedChanges {
    pub fn new(entries: Vec<StagedChange>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedChange> {
        self.entries.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.path.as_str()).collect()
    }
}
