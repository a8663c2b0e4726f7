//! Plain-text rendering of classified test data

use std::fmt;

use serde_json::Value;

use super::classify::{classify, Field, Link, TestCard, TestDataView};

/// Classify `value` and render it as plain text
pub fn render(value: &Value) -> String {
    classify(value).to_string()
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label == self.url {
            write!(f, "- {}", self.url)
        } else {
            write!(f, "- {}: {}", self.label, self.url)
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl TestCard {
    fn write_to(&self, f: &mut fmt::Formatter<'_>, position: usize) -> fmt::Result {
        match &self.title {
            Some(title) => writeln!(f, "## {title}")?,
            None => writeln!(f, "## Item {position}")?,
        }
        if let Some(summary) = &self.summary {
            writeln!(f, "{summary}")?;
        }
        if !self.reports.is_empty() {
            writeln!(f, "Reports:")?;
            for link in &self.reports {
                writeln!(f, "{link}")?;
            }
        }
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TestDataView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::StructuredNote { text, links } => {
                if let Some(text) = text {
                    writeln!(f, "{text}")?;
                }
                for link in links {
                    writeln!(f, "{link}")?;
                }
                Ok(())
            }
            Self::LinkList(links) => {
                for link in links {
                    writeln!(f, "{link}")?;
                }
                Ok(())
            }
            Self::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    card.write_to(f, i + 1)?;
                }
                Ok(())
            }
            Self::RawObject(fields) => {
                for field in fields {
                    writeln!(f, "{field}")?;
                }
                Ok(())
            }
        }
    }
}
