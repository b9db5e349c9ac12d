//! Per-item template discovery for collection containers.

use markup5ever_rcdom::Handle;
use tracing::debug;

use crate::dom;

/// Find, clean and detach the template child of `container`.
///
/// The first child carrying `template_class` wins and loses that class token.
/// Without one, the first child that is neither a comment nor whitespace-only
/// text is used as is. Once a template is found the container's whitespace-only
/// text children are dropped, so the expanded items are the only element content.
/// Returns `None` when the container has nothing to use; the container is left
/// untouched in that case.
pub fn resolve_template(container: &Handle, template_class: &str) -> Option<Handle> {
    let explicit = dom::children(container)
        .into_iter()
        .find(|child| dom::has_class_token(child, template_class));

    let template = match explicit {
        Some(node) => {
            dom::remove_class_token(&node, template_class);
            node
        }
        None => dom::first_significant_child(container)?,
    };

    debug!(
        container = %dom::describe(container),
        template = %dom::describe(&template),
        "resolved collection template"
    );

    dom::remove_node(&template);
    dom::remove_blank_text_children(container);
    Some(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::options::ParseMode;

    fn container(doc: &Document) -> Handle {
        dom::select_first_by_tag(doc.root(), "ul").unwrap()
    }

    #[test]
    fn test_explicit_template_is_cleaned_and_detached() {
        let doc = Document::parse(
            r#"<ul><li class="header"></li><li class="template"><b></b></li></ul>"#,
            ParseMode::Fragment,
        );
        let template = resolve_template(&container(&doc), "template").unwrap();
        assert!(dom::parent(&template).is_none());
        assert_eq!(dom::get_attribute(&template, "class"), None);
        assert_eq!(doc.serialize().unwrap(), r#"<ul><li class="header"></li></ul>"#);
    }

    #[test]
    fn test_explicit_template_keeps_other_tokens() {
        let doc = Document::parse(
            r#"<ul><li class="row  template odd"></li></ul>"#,
            ParseMode::Fragment,
        );
        let template = resolve_template(&container(&doc), "template").unwrap();
        assert_eq!(dom::get_attribute(&template, "class").as_deref(), Some("row odd"));
    }

    #[test]
    fn test_implicit_template_is_first_child() {
        let doc = Document::parse(
            r#"<ul><li class="first"></li><li class="second"></li></ul>"#,
            ParseMode::Fragment,
        );
        let template = resolve_template(&container(&doc), "template").unwrap();
        assert_eq!(dom::get_attribute(&template, "class").as_deref(), Some("first"));
        assert_eq!(doc.serialize().unwrap(), r#"<ul><li class="second"></li></ul>"#);
    }

    #[test]
    fn test_implicit_template_skips_whitespace() {
        let doc = Document::parse("<ul>\n  <li></li>\n</ul>", ParseMode::Fragment);
        let template = resolve_template(&container(&doc), "template").unwrap();
        assert_eq!(dom::tag_name(&template), Some("li"));
        assert_eq!(doc.serialize().unwrap(), "<ul></ul>");
    }

    #[test]
    fn test_implicit_template_skips_comments() {
        let doc = Document::parse(
            r#"<ul><!-- rows --><li class="row"></li></ul>"#,
            ParseMode::Fragment,
        );
        let template = resolve_template(&container(&doc), "template").unwrap();
        assert_eq!(dom::tag_name(&template), Some("li"));
        assert_eq!(doc.serialize().unwrap(), "<ul><!-- rows --></ul>");
    }

    #[test]
    fn test_comment_only_container() {
        let doc = Document::parse("<ul><!-- empty --></ul>", ParseMode::Fragment);
        assert!(resolve_template(&container(&doc), "template").is_none());
    }

    #[test]
    fn test_custom_template_class() {
        let doc = Document::parse(
            r#"<ul><li></li><li class="proto"></li></ul>"#,
            ParseMode::Fragment,
        );
        let template = resolve_template(&container(&doc), "proto").unwrap();
        assert_eq!(dom::get_attribute(&template, "class"), None);
        assert_eq!(doc.serialize().unwrap(), "<ul><li></li></ul>");
    }

    #[test]
    fn test_childless_container() {
        let doc = Document::parse("<ul></ul>", ParseMode::Fragment);
        assert!(resolve_template(&container(&doc), "template").is_none());

        let doc = Document::parse("<ul>   </ul>", ParseMode::Fragment);
        assert!(resolve_template(&container(&doc), "template").is_none());
        assert_eq!(doc.serialize().unwrap(), "<ul>   </ul>");
    }
}
