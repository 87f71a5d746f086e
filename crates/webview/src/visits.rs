use core_types::HistoryEntry;

/// Visit log fed by page-load and title events. The system web view keeps
/// its own back/forward list but does not expose it, so this is what the
/// History action reads.
#[derive(Debug, Default)]
pub struct VisitLog {
    entries: Vec<HistoryEntry>,
}

impl VisitLog {
    pub fn record_visit(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        // reloads and duplicate finish events report the same url twice
        if self.entries.last().is_some_and(|e| e.url == url) {
            return;
        }
        self.entries.push(HistoryEntry::new(url, ""));
    }

    /// Titles arrive after the load finished; they belong to the newest entry.
    pub fn record_title(&mut self, title: &str) {
        if let Some(last) = self.entries.last_mut() {
            last.title = title.to_owned();
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
