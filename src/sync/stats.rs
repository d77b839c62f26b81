use std::fmt;

/// Copy/skip/delete counters for one tracked extension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistic {
    pub extension: String,
    pub copied: usize,
    pub skipped: usize,
    pub deleted: usize,
}

impl Statistic {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.copied + self.skipped + self.deleted
    }

    /// Progress line, e.g. `copied 2, skipped 1, deleted 0`
    pub fn message(&self) -> String {
        format!(
            "copied {}, skipped {}, deleted {}",
            self.copied, self.skipped, self.deleted
        )
    }

    /// Add another extension's counters into this one
    pub fn absorb(&mut self, other: &Statistic) {
        self.copied += other.copied;
        self.skipped += other.skipped;
        self.deleted += other.deleted;
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.extension, self.message())
    }
}

/// Result of one sync call: per-extension counters in processing order
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub extensions: Vec<Statistic>,
}

impl SyncReport {
    #[cfg(test)]
    pub fn get(&self, extension: &str) -> Option<&Statistic> {
        self.extensions.iter().find(|s| s.extension == extension)
    }

    /// Sum of every extension's counters
    pub fn merged(&self) -> Statistic {
        let mut total = Statistic::new("total");
        for stat in &self.extensions {
            total.absorb(stat);
        }
        total
    }
}
