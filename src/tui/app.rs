use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::text::Text;
use ratatui::widgets::ListState;

/// What Enter returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Choose one of the entries; the query only filters.
    Select,
    /// Free text; the query itself is the answer.
    Input,
}

/// One visible entry: its position in arrival order plus the matched chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub score: i64,
    pub positions: Vec<usize>,
}

/// State of one picker session.
pub struct PickerApp {
    pub mode: Mode,
    pub prompt: String,
    pub header: Option<Text<'static>>,
    pub entries: Vec<String>,
    pub query: String,
    pub matches: Vec<Match>,
    pub list_state: ListState,
    pub loading: bool,
    pub status_message: Option<String>,
    matcher: SkimMatcherV2,
}

impl PickerApp {
    pub fn new(mode: Mode, prompt: impl Into<String>) -> Self {
        Self {
            mode,
            prompt: prompt.into(),
            header: None,
            entries: Vec::new(),
            query: String::new(),
            matches: Vec::new(),
            list_state: ListState::default(),
            loading: mode == Mode::Select,
            status_message: None,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn with_header(mut self, header: Text<'static>) -> Self {
        self.header = Some(header);
        self
    }

    /// Append entries as they arrive, keeping the highlighted entry in place.
    pub fn push_entries(&mut self, entries: Vec<String>) {
        if entries.is_empty() {
            return;
        }
        let selected = self.selected();
        self.entries.extend(entries);
        self.refilter();
        if let Some(index) = selected {
            if let Some(pos) = self.matches.iter().position(|m| m.index == index) {
                self.list_state.select(Some(pos));
            }
        }
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.set_status(message.into());
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn insert_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
        self.reset_selection();
    }

    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
            self.reset_selection();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
            self.reset_selection();
        }
    }

    pub fn move_up(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            if pos > 0 {
                self.list_state.select(Some(pos - 1));
            }
        }
    }

    pub fn move_down(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            if pos + 1 < self.matches.len() {
                self.list_state.select(Some(pos + 1));
            }
        }
    }

    /// Arrival index of the highlighted entry.
    pub fn selected(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|pos| self.matches.get(pos))
            .map(|m| m.index)
    }

    /// Recompute visible entries: arrival order for an empty query, otherwise
    /// best score first with arrival order breaking ties.
    fn refilter(&mut self) {
        if self.mode == Mode::Input {
            return;
        }

        if self.query.is_empty() {
            self.matches = (0..self.entries.len())
                .map(|index| Match {
                    index,
                    score: 0,
                    positions: Vec::new(),
                })
                .collect();
        } else {
            let mut matches: Vec<Match> = self
                .entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    self.matcher
                        .fuzzy_indices(entry, &self.query)
                        .map(|(score, positions)| Match {
                            index,
                            score,
                            positions,
                        })
                })
                .collect();
            matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
            self.matches = matches;
        }

        if self.matches.is_empty() {
            self.list_state.select(None);
        } else if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
    }

    fn reset_selection(&mut self) {
        if self.matches.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}
