//! Navigation export for the rendering collaborator.
//!
//! Flattens the navbar and sidebar trees of a [`Profile`] into a
//! serializable structure. Internal routes are resolved against `base_url`
//! here; titles for page leaves are placeholders (the final segment of the
//! page identifier) which the renderer replaces with page-derived titles.

use docsite_config::{LinkTarget, NavbarItem};
use docsite_sidebar::SidebarNode;
use serde::Serialize;

use crate::Profile;

/// Navigation item with children for the UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path. `None` for group headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// One sidebar flattened to navigation items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarNav {
    /// Sidebar name.
    pub name: String,
    /// Navigation items in declaration order.
    pub items: Vec<NavItem>,
}

/// Complete navigation structure handed to the renderer.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Navigation {
    /// Navbar links in declaration order. Logos are omitted: they carry no
    /// route and are rendered from the config directly.
    pub navbar: Vec<NavItem>,
    /// Sidebars in declaration order.
    pub sidebars: Vec<SidebarNav>,
}

impl Navigation {
    /// Build the navigation structure for a profile.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        let config = &profile.config;

        let navbar = config
            .navbar
            .items
            .iter()
            .filter_map(|item| match item {
                NavbarItem::Logo(_) => None,
                NavbarItem::Link(link) => {
                    let path = match &link.target {
                        LinkTarget::Internal { to, .. } => config.route(to),
                        LinkTarget::External { href } => href.clone(),
                    };
                    Some(NavItem {
                        title: link.label.clone(),
                        path: Some(path),
                        children: Vec::new(),
                    })
                }
            })
            .collect();

        let sidebars = profile
            .sidebars
            .iter()
            .map(|sidebar| SidebarNav {
                name: sidebar.name.clone(),
                items: sidebar
                    .nodes
                    .iter()
                    .map(|node| nav_item(node, profile))
                    .collect(),
            })
            .collect();

        Self { navbar, sidebars }
    }
}

/// Convert one sidebar node to a navigation item.
fn nav_item(node: &SidebarNode, profile: &Profile) -> NavItem {
    match node {
        SidebarNode::Leaf(page_id) => NavItem {
            title: leaf_title(page_id).to_owned(),
            path: Some(profile.config.route(page_id)),
            children: Vec::new(),
        },
        SidebarNode::Group { label, children } => NavItem {
            title: label.clone(),
            path: None,
            children: children.iter().map(|c| nav_item(c, profile)).collect(),
        },
    }
}

/// Placeholder title for a page leaf: the final identifier segment.
fn leaf_title(page_id: &str) -> &str {
    page_id.rsplit('/').next().unwrap_or(page_id)
}
