//! Heading outline of the main content.

use serde::Serialize;

use crate::dom::{self, Document};

/// One heading in content order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1 to 4.
    pub level: u8,
    /// Trimmed heading text.
    pub text: String,
}

/// H1 through H4 of the main-content region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingOutline {
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

impl HeadingOutline {
    /// Number of headings at `level`.
    #[must_use]
    pub fn count(&self, level: u8) -> usize {
        self.headings.iter().filter(|h| h.level == level).count()
    }

    /// Texts of the headings at `level`.
    pub fn texts(&self, level: u8) -> impl Iterator<Item = &str> {
        self.headings
            .iter()
            .filter(move |h| h.level == level)
            .map(|h| h.text.as_str())
    }

    /// Text of the first H1, empty when there is none.
    #[must_use]
    pub fn first_h1(&self) -> &str {
        self.texts(1).next().unwrap_or_default()
    }
}

#[must_use]
pub fn collect(content: &Document) -> HeadingOutline {
    let headings = content
        .select("h1, h2, h3, h4")
        .iter()
        .filter_map(|heading| {
            let level = match dom::tag_name(&heading)?.as_str() {
                "h1" => 1,
                "h2" => 2,
                "h3" => 3,
                "h4" => 4,
                _ => return None,
            };
            Some(Heading {
                level,
                text: dom::trimmed_text(&heading),
            })
        })
        .collect();

    HeadingOutline { headings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_keeps_document_order() {
        let doc = dom::parse(
            "<h2>Giới thiệu</h2><h1> Máy tính </h1><h3>Chi tiết</h3><h2>Kết luận</h2><h5>skip</h5>",
        );
        let outline = collect(&doc);

        let levels: Vec<u8> = outline.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 1, 3, 2]);
        assert_eq!(outline.count(2), 2);
        assert_eq!(outline.first_h1(), "Máy tính");
    }

    #[test]
    fn test_no_h1() {
        let outline = collect(&dom::parse("<p>text</p>"));
        assert_eq!(outline.count(1), 0);
        assert_eq!(outline.first_h1(), "");
    }
}
