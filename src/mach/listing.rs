use super::Stack;
use crate::lang::{Error, ErrorCode, Line, Phase};

type Result<T> = std::result::Result<T, Error>;

/// ## Source lines prepared for reversed execution
///
/// Programs run bottom to top, so an `if` written above its `fi` would be
/// reached after it. Loading exchanges every matching `if`/`fi` pair of
/// lines; read backwards the listing then opens each block before closing
/// it, and nesting is preserved.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<Line>,
}

impl Listing {
    pub fn load_str(source: &str) -> Result<Listing> {
        let mut lines = Line::split_source(source);
        let mut open: Stack<usize> = Stack::new(ErrorCode::NoMatchingIf, "no open block");
        for index in 0..lines.len() {
            let first = lines[index].first_word();
            let (opens, closes) = (first == Some("if"), first == Some("fi"));
            if opens {
                if let Err(e) = open.push(index) {
                    return Err(e.in_line(&lines[index]).in_phase(Phase::PreProcessing));
                }
            } else if closes {
                match open.pop() {
                    Ok(start) => lines.swap(start, index),
                    Err(e) => return Err(e.in_line(&lines[index]).in_phase(Phase::PreProcessing)),
                }
            }
        }
        if let Ok(start) = open.pop() {
            return Err(Error::new(ErrorCode::NoMatchingFi)
                .message("block is never closed")
                .in_line(&lines[start])
                .in_phase(Phase::PreProcessing));
        }
        log::debug!("pre-processed {} lines", lines.len());
        Ok(Listing { lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(listing: &Listing) -> Vec<&str> {
        listing.lines().iter().map(|l| l.text()).collect()
    }

    #[test]
    fn test_swap_nested() {
        let l = Listing::load_str("if a equal to b\nif c equal to d\nread to x\nfi\nfi").unwrap();
        assert_eq!(
            texts(&l),
            ["fi", "fi", "read to x", "if c equal to d", "if a equal to b"]
        );
        assert_eq!(l.lines()[4].number(), 1);
        assert_eq!(l.lines()[3].number(), 2);
    }

    #[test]
    fn test_swap_sequential() {
        let l = Listing::load_str("if a equal to b\nfi\nif c equal to d\nfi").unwrap();
        assert_eq!(
            texts(&l),
            ["fi", "if a equal to b", "fi", "if c equal to d"]
        );
    }

    #[test]
    fn test_untouched() {
        let l = Listing::load_str("undefine x\n\n  note / define x").unwrap();
        assert_eq!(texts(&l), ["undefine x", "", "  note / define x"]);
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn test_comment_is_not_a_block() {
        let l = Listing::load_str("if it rains / undefine x\nfinal / define x").unwrap();
        assert_eq!(l.lines()[0].text(), "if it rains / undefine x");
    }

    #[test]
    fn test_fi_without_if() {
        let e = Listing::load_str("undefine x\nfi\ndefine x").unwrap_err();
        assert_eq!(e.code(), ErrorCode::NoMatchingIf);
        assert_eq!(e.phase(), Some(Phase::PreProcessing));
        assert_eq!(e.line_number(), Some(2));
        assert_eq!(e.from_bottom(), Some(2));
    }

    #[test]
    fn test_if_without_fi() {
        let e = Listing::load_str("if a equal to b\nif 1 equal to 1\nfi\n").unwrap_err();
        assert_eq!(e.code(), ErrorCode::NoMatchingFi);
        assert_eq!(e.line_number(), Some(1));
        assert_eq!(e.text(), Some("if a equal to b"));
    }
}
