//! DOM page shell
//!
//! Realizes a page fragment as elements under `<body>`: containers become
//! `div`s, headings become `h1`-`h6`, and the scene becomes the `canvas` the
//! Bevy window binds to.

use skylight_core::config::WindowConfig;
use skylight_core::{PageFragment, PageNode};
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

#[derive(Error, Debug)]
pub enum DomError {
    #[error("no window object")]
    NoWindow,
    #[error("no document object")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("invalid heading level {0}")]
    InvalidHeadingLevel(u8),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(format!("{:?}", value))
    }
}

/// Element tag for a page node
pub fn tag_name(node: &PageNode) -> Result<String, DomError> {
    match node {
        PageNode::Container { .. } => Ok("div".to_string()),
        PageNode::Heading { level, .. } if (1..=6).contains(level) => Ok(format!("h{}", level)),
        PageNode::Heading { level, .. } => Err(DomError::InvalidHeadingLevel(*level)),
        PageNode::Scene(_) => Ok("canvas".to_string()),
    }
}

/// Build `page` under the document body and return its root element
pub fn mount_page(page: &PageFragment, window_config: &WindowConfig) -> Result<Element, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;
    let body = document.body().ok_or(DomError::NoBody)?;

    let mut canvas_assigned = false;
    let root = build_element(&document, &page.root, window_config, &mut canvas_assigned)?;
    body.append_child(&root)?;

    tracing::info!(canvas = %window_config.canvas, "Page shell mounted");
    Ok(root)
}

fn build_element(
    document: &Document,
    node: &PageNode,
    window_config: &WindowConfig,
    canvas_assigned: &mut bool,
) -> Result<Element, DomError> {
    let element = document.create_element(&tag_name(node)?)?;

    match node {
        PageNode::Container { class, children } => {
            element.set_class_name(class);
            for child in children {
                let child = build_element(document, child, window_config, canvas_assigned)?;
                element.append_child(&child)?;
            }
        }
        PageNode::Heading { text, .. } => {
            element.set_text_content(Some(text.as_str()));
        }
        PageNode::Scene(scene) => {
            // Only one window exists, so only the first canvas is bound
            if *canvas_assigned {
                tracing::warn!("Additional scene canvas will not be rendered");
            } else {
                element.set_id(window_config.canvas_id());
                *canvas_assigned = true;
            }
            element.set_attribute("style", "display: block; width: 100%; height: 100%;")?;
            tracing::debug!(children = scene.children.len(), "Scene canvas created");
        }
    }

    Ok(element)
}
