//! Flattens nested `<section>` trees into classified content records.

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId, inner_html, outer_html};

use super::role_map::{ContentKind, TagRole, classify};

/// A content-bearing element captured during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: ContentKind,
    /// The element serialized with its own tags.
    pub markup: String,
    /// The element's children serialized, without its own tags.
    pub inner_markup: String,
    /// All descendant text.
    pub text: String,
    /// Section nesting depth, 1 for children of the top-level section.
    pub level: u32,
    pub attrs: BTreeMap<String, String>,
}

impl Record {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Walk the children of `node`, recursing into sections.
///
/// Sections contribute no record; their children are walked at `level + 1`.
/// Content elements become one record at the current `level`, regardless of
/// the digit in a heading's tag name. Text, comments and unclassified
/// elements are dropped without descending into them.
pub fn walk(dom: &Dom, node: NodeId, level: u32) -> Vec<Record> {
    let mut records = Vec::new();

    for child in dom.children(node) {
        let Some(name) = dom.element_name(child) else {
            continue;
        };

        match classify(name.as_ref()) {
            TagRole::Container => records.extend(walk(dom, child, level + 1)),
            TagRole::Content(kind) => records.push(Record {
                kind,
                markup: outer_html(dom, child),
                inner_markup: inner_html(dom, child),
                text: dom.text_content(child),
                level,
                attrs: dom
                    .attrs(child)
                    .iter()
                    .map(|a| (a.qualified_name(), a.value.clone()))
                    .collect(),
            }),
            TagRole::Ignore => {}
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dom::parse_html;

    fn walk_first_section(html: &str) -> Vec<Record> {
        let dom = parse_html(html);
        let section = dom.find_by_tag("section").expect("section");
        walk(&dom, section, 1)
    }

    fn summary(records: &[Record]) -> Vec<(ContentKind, u32)> {
        records.iter().map(|r| (r.kind, r.level)).collect()
    }

    #[test]
    fn test_chapter_scenario() {
        let records = walk_first_section(
            r#"<section><h1>Chapter One</h1><section><p>Hello <b>world</b></p><pre data-code-language="go">fmt.Println(1)</pre></section></section>"#,
        );

        assert_eq!(
            summary(&records),
            vec![
                (ContentKind::Heading, 1),
                (ContentKind::Markdown, 2),
                (ContentKind::Code, 2),
            ]
        );
        assert_eq!(records[0].text, "Chapter One");
        assert_eq!(records[1].markup, "<p>Hello <b>world</b></p>");
        assert_eq!(records[2].text, "fmt.Println(1)");
        assert_eq!(records[2].attr("data-code-language"), Some("go"));
    }

    #[test]
    fn test_heading_level_is_nesting_depth() {
        let records = walk_first_section(
            "<section><h3>A</h3><section><section><h1>B</h1></section></section><h2>C</h2></section>",
        );
        let levels: Vec<_> = records.iter().map(|r| (r.text.as_str(), r.level)).collect();
        assert_eq!(levels, vec![("A", 1), ("B", 3), ("C", 1)]);
    }

    #[test]
    fn test_document_order_preserved() {
        let records = walk_first_section(
            "<section><p>1</p><section><p>2</p><section><p>3</p></section><p>4</p></section><p>5</p></section>",
        );
        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_ignored_nodes_produce_nothing() {
        let records = walk_first_section(
            "<section>\n  <!-- comment -->\n  <span>skip</span>\n  <aside><p>hidden</p></aside>\n  <p>kept</p>\n</section>",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "kept");
    }

    #[test]
    fn test_passthrough_not_descended() {
        let records = walk_first_section(
            "<section><div><p>inside</p><section><h1>deep</h1></section></div></section>",
        );
        assert_eq!(summary(&records), vec![(ContentKind::Passthrough, 1)]);
        assert!(records[0].markup.starts_with("<div><p>inside</p>"));
    }

    #[test]
    fn test_empty_section() {
        assert!(walk_first_section("<section></section>").is_empty());
    }

    #[derive(Debug, Clone)]
    enum Tree {
        Para(u32),
        Section(Vec<Tree>),
    }

    fn tree() -> impl Strategy<Value = Tree> {
        let leaf = any::<u32>().prop_map(Tree::Para);
        leaf.prop_recursive(4, 48, 6, |inner| {
            proptest::collection::vec(inner, 0..6).prop_map(Tree::Section)
        })
    }

    fn render(tree: &Tree, html: &mut String) {
        match tree {
            Tree::Para(n) => html.push_str(&format!("<p>{n}</p>")),
            Tree::Section(children) => {
                html.push_str("<section>");
                for child in children {
                    render(child, html);
                }
                html.push_str("</section>");
            }
        }
    }

    fn expected(trees: &[Tree], level: u32, out: &mut Vec<(String, u32)>) {
        for tree in trees {
            match tree {
                Tree::Para(n) => out.push((n.to_string(), level)),
                Tree::Section(children) => expected(children, level + 1, out),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_order_and_depth(children in proptest::collection::vec(tree(), 0..6)) {
            let mut html = String::new();
            render(&Tree::Section(children.clone()), &mut html);

            let records = walk_first_section(&html);
            let actual: Vec<_> = records.iter().map(|r| (r.text.clone(), r.level)).collect();

            let mut want = Vec::new();
            expected(&children, 1, &mut want);
            prop_assert_eq!(actual, want);
        }
    }
}
