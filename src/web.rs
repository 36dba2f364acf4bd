//! Browser-backed [`Dom`]/[`Element`] implementations over
//! [***web-sys***](https://docs.rs/web-sys).
//!
//! This module compiles on every target but is only functional inside a
//! browser (or another host that provides
//! [***Window***](https://developer.mozilla.org/en-US/docs/Web/API/Window)).

use crate::{
	dom::{Dom, Element},
	error::CogError,
};
use core::any::Any;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// The browser document, addressed through [`web_sys::window`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WebDom;

impl WebDom {
	#[must_use]
	pub fn new() -> Self {
		Self
	}
}

impl Dom for WebDom {
	fn element_by_id(&self, id: &str) -> Option<Rc<dyn Element>> {
		let document = web_sys::window()?.document()?;
		document
			.get_element_by_id(id)
			.map(|element| Rc::new(WebElement(element)) as Rc<dyn Element>)
	}
}

/// A live [`web_sys::Element`].
///
/// [`ChangeSet::apply`](crate::sync::ChangeSet::apply) implementations that
/// need the browser element back can recover it through
/// [`Element::as_any`].
#[derive(Clone, Debug)]
pub struct WebElement(pub web_sys::Element);

impl Element for WebElement {
	fn attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}

	fn first_element_child(&self) -> Result<Rc<dyn Element>, CogError> {
		let node = self
			.0
			.first_child()
			.ok_or_else(|| CogError::Dom(format!("<{}> has no children to patch", self.0.tag_name())))?;
		node.dyn_into::<web_sys::Element>()
			.map(|element| Rc::new(WebElement(element)) as Rc<dyn Element>)
			.map_err(|node| CogError::Dom(format!("expected the first child of <{}> to be an element but found {:?}", self.0.tag_name(), node)))
	}

	fn inner_html(&self) -> String {
		self.0.inner_html()
	}

	fn set_inner_html(&self, markup: &str) {
		self.0.set_inner_html(markup);
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
