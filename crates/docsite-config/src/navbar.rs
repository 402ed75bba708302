//! Navbar definition types.
//!
//! The navbar is an ordered sequence of items, each of which is either a
//! logo descriptor or a link descriptor. Link descriptors point either to an
//! internal route (resolved against `base_url` by the renderer) or to an
//! external URL.

use serde::Deserialize;

use crate::ConfigError;

/// Navbar definition: ordered items rendered in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Navbar {
    /// Navbar items in declaration order.
    #[serde(default)]
    pub items: Vec<NavbarItem>,
}

/// Horizontal placement of a navbar link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Right-aligned.
    Right,
}

/// A single navbar item.
///
/// Distinguished by shape: a logo carries `alt`/`src`, a link carries a
/// `label` plus its target.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NavbarItem {
    /// Brand image descriptor.
    Logo(LogoItem),
    /// Link descriptor.
    Link(LinkItem),
}

/// Brand image shown in the navbar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LogoItem {
    /// Alternative text for the image.
    pub alt: String,
    /// Image path.
    pub src: String,
    /// Optional image path used in dark mode.
    #[serde(default)]
    pub src_dark: Option<String>,
}

/// Labelled navbar link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkItem {
    /// Display label.
    pub label: String,
    /// Horizontal placement.
    #[serde(default)]
    pub position: NavbarPosition,
    /// Link target.
    #[serde(flatten)]
    pub target: LinkTarget,
}

/// Target of a navbar link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LinkTarget {
    /// Internal route, resolved against `base_url`.
    Internal {
        /// Route path (e.g., `docs/`).
        to: String,
        /// Base path that marks the link active.
        #[serde(default)]
        active_base_path: Option<String>,
    },
    /// External URL.
    External {
        /// Absolute URL.
        href: String,
    },
}

impl Navbar {
    /// Validate navbar items.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, item) in self.items.iter().enumerate() {
            match item {
                NavbarItem::Logo(logo) => {
                    if logo.src.is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "navbar.items[{i}].src cannot be empty"
                        )));
                    }
                }
                NavbarItem::Link(link) => {
                    if link.label.is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "navbar.items[{i}].label cannot be empty"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Iterate over link items, skipping logos.
    pub fn links(&self) -> impl Iterator<Item = &LinkItem> {
        self.items.iter().filter_map(|item| match item {
            NavbarItem::Link(link) => Some(link),
            NavbarItem::Logo(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_logo_item() {
        let toml = r#"
[[items]]
alt = "Annotell Logo"
src = "img/annotell-logo.svg"
"#;
        let navbar: Navbar = toml::from_str(toml).unwrap();
        assert_eq!(
            navbar.items,
            vec![NavbarItem::Logo(LogoItem {
                alt: "Annotell Logo".to_owned(),
                src: "img/annotell-logo.svg".to_owned(),
                src_dark: None,
            })]
        );
    }

    #[test]
    fn test_parse_internal_link() {
        let toml = r#"
[[items]]
label = "API"
to = "docs/"
active_base_path = "docs"
position = "left"
"#;
        let navbar: Navbar = toml::from_str(toml).unwrap();
        assert_eq!(
            navbar.items,
            vec![NavbarItem::Link(LinkItem {
                label: "API".to_owned(),
                position: NavbarPosition::Left,
                target: LinkTarget::Internal {
                    to: "docs/".to_owned(),
                    active_base_path: Some("docs".to_owned()),
                },
            })]
        );
    }

    #[test]
    fn test_parse_external_link() {
        let toml = r#"
[[items]]
label = "GitHub"
href = "https://github.com/annotell/annotell-python"
position = "right"
"#;
        let navbar: Navbar = toml::from_str(toml).unwrap();
        assert_eq!(
            navbar.items,
            vec![NavbarItem::Link(LinkItem {
                label: "GitHub".to_owned(),
                position: NavbarPosition::Right,
                target: LinkTarget::External {
                    href: "https://github.com/annotell/annotell-python".to_owned(),
                },
            })]
        );
    }

    #[test]
    fn test_parse_preserves_item_order() {
        let toml = r#"
[[items]]
alt = "Logo"
src = "img/logo.svg"

[[items]]
label = "API"
to = "docs/"

[[items]]
label = "GitHub"
href = "https://github.com/annotell/annotell-python"
"#;
        let navbar: Navbar = toml::from_str(toml).unwrap();
        assert_eq!(navbar.items.len(), 3);
        assert!(matches!(navbar.items[0], NavbarItem::Logo(_)));
        assert!(matches!(
            &navbar.items[1],
            NavbarItem::Link(LinkItem {
                target: LinkTarget::Internal { .. },
                ..
            })
        ));
        assert!(matches!(
            &navbar.items[2],
            NavbarItem::Link(LinkItem {
                target: LinkTarget::External { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_position_defaults_to_left() {
        let toml = r#"
[[items]]
label = "API"
to = "docs/"
"#;
        let navbar: Navbar = toml::from_str(toml).unwrap();
        let NavbarItem::Link(link) = &navbar.items[0] else {
            panic!("expected link item");
        };
        assert_eq!(link.position, NavbarPosition::Left);
    }

    #[test]
    fn test_validate_empty_label() {
        let navbar = Navbar {
            items: vec![NavbarItem::Link(LinkItem {
                label: String::new(),
                position: NavbarPosition::Left,
                target: LinkTarget::Internal {
                    to: "docs/".to_owned(),
                    active_base_path: None,
                },
            })],
        };
        let err = navbar.validate().unwrap_err();
        assert!(err.to_string().contains("navbar.items[0].label"));
    }

    #[test]
    fn test_validate_empty_logo_src() {
        let navbar = Navbar {
            items: vec![NavbarItem::Logo(LogoItem {
                alt: "Logo".to_owned(),
                src: String::new(),
                src_dark: None,
            })],
        };
        let err = navbar.validate().unwrap_err();
        assert!(err.to_string().contains("navbar.items[0].src"));
    }

    #[test]
    fn test_links_skips_logos() {
        let navbar = Navbar {
            items: vec![
                NavbarItem::Logo(LogoItem {
                    alt: "Logo".to_owned(),
                    src: "img/logo.svg".to_owned(),
                    src_dark: None,
                }),
                NavbarItem::Link(LinkItem {
                    label: "API".to_owned(),
                    position: NavbarPosition::Left,
                    target: LinkTarget::Internal {
                        to: "docs/".to_owned(),
                        active_base_path: None,
                    },
                }),
            ],
        };
        assert_eq!(navbar.links().count(), 1);
    }
}
