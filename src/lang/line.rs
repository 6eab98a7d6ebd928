use std::rc::Rc;

/// ## One line of source text
///
/// Carries both positions a diagnostic reports: the forward line number and
/// the distance from the end. Both are fixed when the source is split and
/// travel with the text through pre-processing and reversal.

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: usize,
    from_bottom: usize,
    text: Rc<str>,
}

impl Line {
    /// `number` is 1-based; `line_count` is the total number of source lines.
    pub fn new(number: usize, line_count: usize, text: &str) -> Line {
        debug_assert!(number >= 1 && number <= line_count);
        Line {
            number,
            from_bottom: line_count + 1 - number,
            text: text.into(),
        }
    }

    /// Split a whole source into numbered lines.
    pub fn split_source(source: &str) -> Vec<Line> {
        let count = source.lines().count();
        source
            .lines()
            .enumerate()
            .map(|(index, text)| Line::new(index + 1, count, text))
            .collect()
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn from_bottom(&self) -> usize {
        self.from_bottom
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn text_rc(&self) -> Rc<str> {
        self.text.clone()
    }

    /// The executable part of the line.
    ///
    /// Everything before the first `/` is commentary. The code is the field
    /// between the first and second `/`, or the whole line when there is
    /// no `/` at all.
    pub fn code(&self) -> &str {
        let text = self.text.trim();
        match text.find('/') {
            None => text,
            Some(_) => text.split('/').nth(1).unwrap_or("").trim(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.code().is_empty()
    }

    pub fn first_word(&self) -> Option<&str> {
        self.code().split_whitespace().next()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        let lines = Line::split_source("a\nb\r\nc\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number(), 1);
        assert_eq!(lines[0].from_bottom(), 3);
        assert_eq!(lines[2].number(), 3);
        assert_eq!(lines[2].from_bottom(), 1);
        assert_eq!(lines[1].text(), "b");
    }

    #[test]
    fn test_comment() {
        let l = Line::new(1, 1, "  says hello / read to x ");
        assert_eq!(l.code(), "read to x");
        let l = Line::new(1, 1, "note/define x/trailing");
        assert_eq!(l.code(), "define x");
        let l = Line::new(1, 1, "only a comment /");
        assert!(l.is_blank());
        let l = Line::new(1, 1, "\tdefine  y");
        assert_eq!(l.first_word(), Some("define"));
    }
}
