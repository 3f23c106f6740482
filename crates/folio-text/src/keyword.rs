#![forbid(unsafe_code)]

//! Keyword descriptors: which words become interactive, and what they do.

/// What activating a keyword does.
///
/// Exactly one kind per keyword; the variant carries its own target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeywordAction {
    /// In-app navigation to a route path.
    Navigate(String),
    /// Open an external URL in a new browsing context.
    OpenExternal(String),
    /// Highlighted but inert.
    None,
}

impl KeywordAction {
    /// In-app navigation to `path`.
    #[must_use]
    pub fn navigate(path: impl Into<String>) -> Self {
        Self::Navigate(path.into())
    }

    /// External link to `url`.
    #[must_use]
    pub fn open_external(url: impl Into<String>) -> Self {
        Self::OpenExternal(url.into())
    }

    /// Classify an anchor href the way the site's link tables are written:
    /// `http…` opens externally, `/…` navigates in-app, and `#` or an empty
    /// href is inert. Anything else (`mailto:`, relative paths) is treated
    /// as external.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            Self::None
        } else if href.starts_with('/') {
            Self::Navigate(href.to_owned())
        } else {
            Self::OpenExternal(href.to_owned())
        }
    }

    /// Whether activating this action does anything.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A keyword to recognize in revealed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeywordDescriptor {
    /// Match key, compared case-insensitively.
    pub word: String,
    /// Action performed on activation.
    pub action: KeywordAction,
    /// Presentation class the host attaches to the link element.
    pub class_name: Option<String>,
}

impl KeywordDescriptor {
    /// Create a descriptor without a presentation class.
    #[must_use]
    pub fn new(word: impl Into<String>, action: KeywordAction) -> Self {
        Self {
            word: word.into(),
            action,
            class_name: None,
        }
    }

    /// Attach a presentation class.
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Whether the keyword shows up in a links list: it either does
    /// something or is styled as a link.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.action.is_actionable() || self.class_name.is_some()
    }
}

/// An ordered keyword table. Declaration order breaks ties in the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<KeywordDescriptor>,
}

impl KeywordSet {
    /// Create a set from descriptors in declaration order.
    #[must_use]
    pub fn new(keywords: Vec<KeywordDescriptor>) -> Self {
        Self { keywords }
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Descriptor at declaration index `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&KeywordDescriptor> {
        self.keywords.get(idx)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeywordDescriptor> {
        self.keywords.iter()
    }

    /// Descriptors that belong in a links list, in declaration order.
    pub fn listed(&self) -> impl Iterator<Item = (usize, &KeywordDescriptor)> {
        self.keywords.iter().enumerate().filter(|(_, k)| k.is_listed())
    }
}

impl From<Vec<KeywordDescriptor>> for KeywordSet {
    fn from(keywords: Vec<KeywordDescriptor>) -> Self {
        Self::new(keywords)
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a KeywordDescriptor;
    type IntoIter = std::slice::Iter<'a, KeywordDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_classification() {
        assert_eq!(
            KeywordAction::from_href("https://htl-donaustadt.at"),
            KeywordAction::open_external("https://htl-donaustadt.at")
        );
        assert_eq!(
            KeywordAction::from_href("/socials"),
            KeywordAction::navigate("/socials")
        );
        assert_eq!(KeywordAction::from_href("#"), KeywordAction::None);
        assert_eq!(KeywordAction::from_href("  "), KeywordAction::None);
        assert_eq!(
            KeywordAction::from_href("mailto:someone@example.com"),
            KeywordAction::open_external("mailto:someone@example.com")
        );
    }

    #[test]
    fn listed_keeps_styled_inert_links() {
        let set = KeywordSet::new(vec![
            KeywordDescriptor::new("watching tv", KeywordAction::None),
            KeywordDescriptor::new("drawing", KeywordAction::None).with_class("about-link-drawing"),
            KeywordDescriptor::new("social", KeywordAction::navigate("/socials")),
        ]);
        let listed: Vec<_> = set.listed().map(|(i, k)| (i, k.word.as_str())).collect();
        assert_eq!(listed, vec![(1, "drawing"), (2, "social")]);
    }
}
