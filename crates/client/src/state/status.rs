/// Oldest lines are dropped past this count
const MAX_LINES: usize = 200;

/// Kind of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Reply from the server
    Server,
    /// Local failure (channel closed, bad payload)
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// Rolling log of status and chat replies
#[derive(Debug, Default)]
pub struct StatusLog {
    lines: Vec<StatusLine>,
}

impl StatusLog {
    pub fn push(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.lines.push(StatusLine {
            kind,
            text: text.into(),
        });
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }

    /// Most recent line
    pub fn last(&self) -> Option<&StatusLine> {
        self.lines.last()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = StatusLog::default();
        for i in 0..MAX_LINES + 5 {
            log.push(StatusKind::Server, format!("line {i}"));
        }
        assert_eq!(log.lines().len(), MAX_LINES);
        assert_eq!(log.lines()[0].text, "line 5");
        assert_eq!(log.last().unwrap().text, format!("line {}", MAX_LINES + 4));
    }
}
