//! Rendering resolution outcomes into the host page.
//!
//! The page is reached through the [`HostPage`] trait. The annotation is a
//! single paragraph inserted before the first child of the anchor element:
//!
//! ```html
//! <p id="npm-package-support"><span style="color:green">TYPE: </span>...</p>
//! ```

use crate::config::PresentationConfig;
use crate::error::PresentationError;
use crate::outcome::{ResolutionOutcome, TypeSupport};
use types_probe_npm::package_page_path;

/// One piece of annotation content after the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { text: String, href: String },
}

/// A rendered status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub id: String,
    pub label: String,
    pub label_style: String,
    pub segments: Vec<Segment>,
}

impl Annotation {
    /// Builds the annotation describing `outcome`.
    ///
    /// # Examples
    ///
    /// ```
    /// use types_probe::config::PresentationConfig;
    /// use types_probe::outcome::TypeSupport;
    /// use types_probe::presentation::Annotation;
    ///
    /// let annotation = Annotation::from_outcome(
    ///     &Ok(TypeSupport::OwnDeclarations),
    ///     &PresentationConfig::default(),
    /// );
    /// assert_eq!(annotation.to_text(), "TYPE: Package contains type definitions");
    /// ```
    pub fn from_outcome(outcome: &ResolutionOutcome, config: &PresentationConfig) -> Self {
        let segments = match outcome {
            Ok(TypeSupport::OwnDeclarations) => {
                vec![Segment::Text("Package contains type definitions".into())]
            }
            Ok(TypeSupport::DependsOn { type_package }) => vec![
                Segment::Text("Package depends on ".into()),
                Segment::Link {
                    text: type_package.clone(),
                    href: package_page_path(type_package),
                },
            ],
            Ok(TypeSupport::External {
                type_package,
                release_id,
            }) => vec![Segment::Link {
                text: release_id.clone(),
                href: package_page_path(type_package),
            }],
            Err(failure) => vec![Segment::Text(failure.to_string())],
        };

        Self {
            id: config.element_id.clone(),
            label: config.label.clone(),
            label_style: config.label_style.clone(),
            segments,
        }
    }

    /// Plain-text form: label followed by the segment texts.
    pub fn to_text(&self) -> String {
        let mut text = self.label.clone();
        for segment in &self.segments {
            match segment {
                Segment::Text(content) => text.push_str(content),
                Segment::Link { text: content, .. } => text.push_str(content),
            }
        }
        text
    }

    /// HTML form, with all text and attribute values escaped.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<p id="{}"><span style="{}">{}</span>"#,
            html_escape::encode_double_quoted_attribute(&self.id),
            html_escape::encode_double_quoted_attribute(&self.label_style),
            html_escape::encode_text(&self.label),
        );
        for segment in &self.segments {
            match segment {
                Segment::Text(content) => html.push_str(&html_escape::encode_text(content)),
                Segment::Link { text, href } => html.push_str(&format!(
                    r#"<a href="{}">{}</a>"#,
                    html_escape::encode_double_quoted_attribute(href),
                    html_escape::encode_text(text),
                )),
            }
        }
        html.push_str("</p>");
        html
    }
}

/// The page the annotation is written into.
pub trait HostPage: Send {
    /// Removes the element with `id`. Returns `true` if one was removed.
    fn remove_element(&mut self, id: &str) -> bool;

    /// Inserts `element` before the first child element of `anchor_selector`.
    ///
    /// # Errors
    ///
    /// Returns `AnchorNotFound` if no element matches the selector and
    /// `AnchorEmpty` if it has no child to insert before.
    fn insert_before_first_child(
        &mut self,
        anchor_selector: &str,
        element: PageElement,
    ) -> Result<(), PresentationError>;
}

/// Element stored in an [`InMemoryPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    pub id: Option<String>,
    pub html: String,
}

impl PageElement {
    pub fn new(id: Option<&str>, html: impl Into<String>) -> Self {
        Self {
            id: id.map(String::from),
            html: html.into(),
        }
    }
}

/// Page model holding a single anchor element and its children.
///
/// # Examples
///
/// ```
/// use types_probe::presentation::{HostPage, InMemoryPage, PageElement};
///
/// let mut page = InMemoryPage::with_anchor("#top", vec![PageElement::new(None, "<h1>foo</h1>")]);
/// page.insert_before_first_child("#top", PageElement::new(Some("note"), "<p>hi</p>"))
///     .unwrap();
/// assert_eq!(page.children().len(), 2);
/// assert!(page.remove_element("note"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPage {
    anchor: Option<(String, Vec<PageElement>)>,
}

impl InMemoryPage {
    /// A page with no anchor element.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_anchor(selector: &str, children: Vec<PageElement>) -> Self {
        Self {
            anchor: Some((selector.to_string(), children)),
        }
    }

    /// Children of the anchor element, in document order.
    pub fn children(&self) -> &[PageElement] {
        self.anchor
            .as_ref()
            .map(|(_, children)| children.as_slice())
            .unwrap_or_default()
    }

    pub fn find_element(&self, id: &str) -> Option<&PageElement> {
        self.children()
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
    }
}

impl HostPage for InMemoryPage {
    fn remove_element(&mut self, id: &str) -> bool {
        let Some((_, children)) = self.anchor.as_mut() else {
            return false;
        };
        let before = children.len();
        children.retain(|element| element.id.as_deref() != Some(id));
        children.len() != before
    }

    fn insert_before_first_child(
        &mut self,
        anchor_selector: &str,
        element: PageElement,
    ) -> Result<(), PresentationError> {
        let children = match self.anchor.as_mut() {
            Some((selector, children)) if selector == anchor_selector => children,
            _ => return Err(PresentationError::AnchorNotFound(anchor_selector.to_string())),
        };
        if children.is_empty() {
            return Err(PresentationError::AnchorEmpty(anchor_selector.to_string()));
        }
        children.insert(0, element);
        Ok(())
    }
}

/// Writes annotations into a page, replacing any earlier one.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    config: PresentationConfig,
}

impl Presenter {
    pub fn new(config: PresentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    /// Removes a previously rendered annotation.
    pub fn clear<P: HostPage + ?Sized>(&self, page: &mut P) -> bool {
        page.remove_element(&self.config.element_id)
    }

    /// Replaces the page's annotation with one describing `outcome`.
    ///
    /// # Errors
    ///
    /// Fails if the anchor element is missing or empty. The stale annotation
    /// has already been removed at that point.
    pub fn render<P: HostPage + ?Sized>(
        &self,
        page: &mut P,
        outcome: &ResolutionOutcome,
    ) -> Result<Annotation, PresentationError> {
        self.clear(page);

        let annotation = Annotation::from_outcome(outcome, &self.config);
        page.insert_before_first_child(
            &self.config.anchor_selector,
            PageElement::new(Some(&annotation.id), annotation.to_html()),
        )
        .inspect_err(|e| tracing::warn!("cannot render annotation: {}", e))?;

        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ResolutionFailure;

    fn page() -> InMemoryPage {
        InMemoryPage::with_anchor("#top", vec![PageElement::new(None, "<h2>foo</h2>")])
    }

    #[test]
    fn test_own_declarations_text() {
        let annotation = Annotation::from_outcome(
            &Ok(TypeSupport::OwnDeclarations),
            &PresentationConfig::default(),
        );
        assert_eq!(annotation.to_text(), "TYPE: Package contains type definitions");
    }

    #[test]
    fn test_depends_on_links_types_package() {
        let annotation = Annotation::from_outcome(
            &Ok(TypeSupport::DependsOn {
                type_package: "@types/foo".into(),
            }),
            &PresentationConfig::default(),
        );

        assert_eq!(annotation.to_text(), "TYPE: Package depends on @types/foo");
        assert_eq!(
            annotation.segments[1],
            Segment::Link {
                text: "@types/foo".into(),
                href: "/package/@types/foo".into(),
            }
        );
    }

    #[test]
    fn test_external_links_release_id() {
        let annotation = Annotation::from_outcome(
            &Ok(TypeSupport::External {
                type_package: "@types/scope__pkg".into(),
                release_id: "@types/scope__pkg@2.0.1".into(),
            }),
            &PresentationConfig::default(),
        );

        assert_eq!(
            annotation.to_html(),
            r#"<p id="npm-package-support"><span style="color:green">TYPE: </span><a href="/package/@types/scope__pkg">@types/scope__pkg@2.0.1</a></p>"#
        );
    }

    #[test]
    fn test_failure_text() {
        let annotation = Annotation::from_outcome(
            &Err(ResolutionFailure::NoTypeSupport),
            &PresentationConfig::default(),
        );
        assert_eq!(annotation.to_text(), "TYPE: Does not support types");
        assert_eq!(
            annotation.to_html(),
            r#"<p id="npm-package-support"><span style="color:green">TYPE: </span>Does not support types</p>"#
        );
    }

    #[test]
    fn test_html_is_escaped() {
        let annotation = Annotation {
            id: "x".into(),
            label: "<b>".into(),
            label_style: "a\"b".into(),
            segments: vec![Segment::Text("1 < 2 & 3".into())],
        };
        let html = annotation.to_html();
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("1 &lt; 2 &amp; 3"));
        assert!(!html.contains("a\"b"));
    }

    #[test]
    fn test_render_inserts_first() {
        let presenter = Presenter::default();
        let mut page = page();

        presenter
            .render(&mut page, &Ok(TypeSupport::OwnDeclarations))
            .unwrap();

        assert_eq!(page.children().len(), 2);
        assert_eq!(
            page.children()[0].id.as_deref(),
            Some("npm-package-support")
        );
    }

    #[test]
    fn test_render_replaces_previous_annotation() {
        let presenter = Presenter::default();
        let mut page = page();

        presenter
            .render(&mut page, &Err(ResolutionFailure::PackageUnavailable))
            .unwrap();
        presenter
            .render(&mut page, &Ok(TypeSupport::OwnDeclarations))
            .unwrap();

        assert_eq!(page.children().len(), 2);
        let element = page.find_element("npm-package-support").unwrap();
        assert!(element.html.contains("Package contains type definitions"));
    }

    #[test]
    fn test_render_without_anchor_fails() {
        let presenter = Presenter::default();
        let mut page = InMemoryPage::empty();

        let err = presenter
            .render(&mut page, &Ok(TypeSupport::OwnDeclarations))
            .unwrap_err();
        assert_eq!(err, PresentationError::AnchorNotFound("#top".into()));
        assert_eq!(err.to_string(), "Not found #top");
    }

    #[test]
    fn test_render_into_empty_anchor_fails() {
        let presenter = Presenter::default();
        let mut page = InMemoryPage::with_anchor("#top", Vec::new());

        let err = presenter
            .render(&mut page, &Ok(TypeSupport::OwnDeclarations))
            .unwrap_err();
        assert_eq!(err, PresentationError::AnchorEmpty("#top".into()));
        assert!(page.children().is_empty());
    }

    #[test]
    fn test_clear() {
        let presenter = Presenter::default();
        let mut page = page();
        assert!(!presenter.clear(&mut page));

        presenter
            .render(&mut page, &Ok(TypeSupport::OwnDeclarations))
            .unwrap();
        assert!(presenter.clear(&mut page));
        assert_eq!(page.children().len(), 1);
    }
}
