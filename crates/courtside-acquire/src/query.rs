use scraper::{ElementRef, Html, Node};

/// How a structural query matches an element's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch {
    /// `id` attribute equals the value.
    Id(&'static str),
    /// The whole `class` attribute equals the value, or one of its
    /// space-separated classes does.
    Class(&'static str),
}

/// A tag name plus attribute match, used to locate the node holding an
/// attribute's text.
///
/// Class values can contain characters a CSS selector would need escaped
/// (`md:t2`) or several classes at once (`t11 md:t2`), so matching is done
/// on the element directly rather than through `scraper::Selector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralQuery {
    pub tag: &'static str,
    pub attr: AttrMatch,
}

impl StructuralQuery {
    pub const fn id(tag: &'static str, id: &'static str) -> Self {
        Self {
            tag,
            attr: AttrMatch::Id(id),
        }
    }

    pub const fn class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            attr: AttrMatch::Class(class),
        }
    }

    pub fn matches(&self, element: &ElementRef) -> bool {
        let elem = element.value();
        if !elem.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }
        match self.attr {
            AttrMatch::Id(id) => elem.attr("id") == Some(id),
            AttrMatch::Class(class) => {
                elem.attr("class") == Some(class) || elem.classes().any(|c| c == class)
            }
        }
    }

    /// All matching elements in document order.
    pub fn find_all<'a>(&self, html: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let query = *self;
        html.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |el| query.matches(el))
    }

    /// First matching element in document order.
    pub fn find_first<'a>(&self, html: &'a Html) -> Option<ElementRef<'a>> {
        self.find_all(html).next()
    }
}

impl std::fmt::Display for StructuralQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attr {
            AttrMatch::Id(id) => write!(f, "{}#{id}", self.tag),
            AttrMatch::Class(class) => write!(f, "{}[class~=\"{class}\"]", self.tag),
        }
    }
}

/// The node that follows `node` in document order: its first child,
/// otherwise the next sibling of it or of its nearest ancestor that has one.
pub fn next_in_document<'a>(
    node: ego_tree::NodeRef<'a, Node>,
) -> Option<ego_tree::NodeRef<'a, Node>> {
    if let Some(child) = node.first_child() {
        return Some(child);
    }
    let mut current = Some(node);
    while let Some(n) = current {
        if let Some(sibling) = n.next_sibling() {
            return Some(sibling);
        }
        current = n.parent();
    }
    None
}

/// First descendant element of `element` with the given tag name.
pub fn first_descendant<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name().eq_ignore_ascii_case(tag))
}
