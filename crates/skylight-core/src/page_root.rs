//! PageRoot - the page shell: a heading above the scene view

use crate::fragment::{PageFragment, PageNode};
use crate::scene_view::scene_view;

/// CSS class of the page container
pub const PAGE_CLASS: &str = "App";

/// Text of the page heading
pub const PAGE_HEADING: &str = "Welcome to the 3D Web Application";

/// Build the page fragment: a container with a level-1 heading followed by
/// one embedded scene view.
pub fn page_root() -> PageFragment {
    PageFragment::new(PageNode::Container {
        class: PAGE_CLASS.to_string(),
        children: vec![
            PageNode::Heading {
                level: 1,
                text: PAGE_HEADING.to_string(),
            },
            PageNode::Scene(scene_view()),
        ],
    })
}
