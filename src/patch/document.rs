use std::borrow::Cow;

/// One line of the document, split from its terminator so it can be
/// rewritten and rejoined without touching the original line endings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record<'a> {
    pub text: Cow<'a, str>,
    pub ending: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, ending: &'a str) -> Self {
        Self { text: text.into(), ending }
    }

    /// First whitespace-delimited token, e.g. `v`, `vn` or `f`.
    pub fn keyword(&self) -> Option<&str> {
        self.text.split_whitespace().next()
    }

    /// Empty line; spaces or tabs make it content.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// The whole file as an ordered list of line records.
#[derive(Debug, Clone)]
pub(crate) struct Document<'a> {
    pub records: Vec<Record<'a>>,
    /// Terminator used for inserted lines.
    pub eol: &'a str,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a str) -> Self {
        let records: Vec<Record<'a>> = source
            .split_inclusive('\n')
            .map(|line| {
                let body_len = line
                    .strip_suffix("\r\n")
                    .or_else(|| line.strip_suffix('\n'))
                    .map_or(line.len(), str::len);
                let (text, ending) = line.split_at(body_len);
                Record::new(text, ending)
            })
            .collect();

        let eol = records
            .iter()
            .map(|record| record.ending)
            .find(|ending| !ending.is_empty())
            .unwrap_or("\n");

        Self { records, eol }
    }

    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.records.iter().any(|record| record.keyword() == Some(keyword))
    }

    pub fn rposition_keyword(&self, keyword: &str) -> Option<usize> {
        self.records.iter().rposition(|record| record.keyword() == Some(keyword))
    }

    /// Indices of every record starting with `keyword`, in document order.
    pub fn positions_of(&self, keyword: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.keyword() == Some(keyword))
            .map(|(index, _)| index)
            .collect()
    }

    /// A line record built from generated text, terminated like the rest of the file.
    pub fn line(&self, text: impl Into<Cow<'a, str>>) -> Record<'a> {
        Record::new(text, self.eol)
    }

    pub fn render(&self) -> String {
        let len = self.records.iter().map(|r| r.text.len() + r.ending.len()).sum();
        let mut out = String::with_capacity(len);
        for record in &self.records {
            out.push_str(&record.text);
            out.push_str(record.ending);
        }
        out
    }
}
