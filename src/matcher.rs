//! Field name to node resolution.
//!
//! Convention priority, short-circuiting:
//! 1. Tag: first descendant element named after the field.
//! 2. Id: every descendant element whose `id` is the field name.
//! 3. Class: every descendant element whose `class` is exactly the field name,
//!    only consulted when tiers 1 and 2 found nothing.
//!
//! Names are lower-cased before lookup. All tiers search the descendants of the
//! scope; at the top level the scope is the whole document.

use std::rc::Rc;

use markup5ever_rcdom::Handle;

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Tag,
    Id,
    Class,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub node: Handle,
    pub kind: MatchKind,
}

/// Resolve `field_name` to its target nodes within `scope`.
pub fn match_field(scope: &Handle, field_name: &str) -> Vec<Match> {
    let name = field_name.to_lowercase();
    let mut matches = Vec::new();

    if let Some(node) = dom::select_first_by_tag(scope, &name) {
        matches.push(Match {
            node,
            kind: MatchKind::Tag,
        });
    }

    for node in dom::select_all_by_id(scope, &name) {
        if !matches.iter().any(|m| Rc::ptr_eq(&m.node, &node)) {
            matches.push(Match {
                node,
                kind: MatchKind::Id,
            });
        }
    }

    if !matches.is_empty() {
        return matches;
    }

    dom::select_all_by_class(scope, &name)
        .into_iter()
        .map(|node| Match {
            node,
            kind: MatchKind::Class,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::options::ParseMode;

    fn kinds(matches: &[Match]) -> Vec<MatchKind> {
        matches.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_tag_beats_class() {
        let doc = Document::parse(
            r#"<html><head><title></title></head><body><h1 class="title"></h1></body></html>"#,
            ParseMode::Auto,
        );
        let matches = match_field(doc.root(), "Title");
        assert_eq!(kinds(&matches), vec![MatchKind::Tag]);
        assert_eq!(dom::tag_name(&matches[0].node), Some("title"));
    }

    #[test]
    fn test_tag_and_id_union() {
        let doc = Document::parse(
            r#"<html><head><title></title></head><body><h1 id="title"></h1></body></html>"#,
            ParseMode::Auto,
        );
        let matches = match_field(doc.root(), "TITLE");
        assert_eq!(kinds(&matches), vec![MatchKind::Tag, MatchKind::Id]);
    }

    #[test]
    fn test_tag_with_same_id_is_not_duplicated() {
        let doc = Document::parse(r#"<section id="section"></section>"#, ParseMode::Fragment);
        let matches = match_field(doc.root(), "Section");
        assert_eq!(kinds(&matches), vec![MatchKind::Tag]);
    }

    #[test]
    fn test_all_ids_are_collected() {
        let doc = Document::parse(r#"<h1 id="title"></h1><h2 id="title"></h2>"#, ParseMode::Fragment);
        let matches = match_field(doc.root(), "Title");
        assert_eq!(kinds(&matches), vec![MatchKind::Id, MatchKind::Id]);
    }

    #[test]
    fn test_id_suppresses_class() {
        let doc = Document::parse(
            r#"<p id="name"></p><p class="name"></p>"#,
            ParseMode::Fragment,
        );
        let matches = match_field(doc.root(), "Name");
        assert_eq!(kinds(&matches), vec![MatchKind::Id]);
    }

    #[test]
    fn test_class_fallback() {
        let doc = Document::parse(
            r#"<p class="name"></p><div><p class="name"></p></div>"#,
            ParseMode::Fragment,
        );
        let matches = match_field(doc.root(), "Name");
        assert_eq!(kinds(&matches), vec![MatchKind::Class, MatchKind::Class]);
    }

    #[test]
    fn test_no_match() {
        let doc = Document::parse(r#"<p class="other"></p>"#, ParseMode::Fragment);
        assert!(match_field(doc.root(), "Name").is_empty());
    }

    #[test]
    fn test_scope_node_itself_never_matches() {
        let doc = Document::parse(r#"<name id="name" class="name"></name>"#, ParseMode::Fragment);
        let scope = dom::select_first_by_tag(doc.root(), "name").unwrap();
        assert!(match_field(&scope, "Name").is_empty());
    }
}
