use crate::error::CogError;
use core::{any::Any, fmt::Debug};
use std::rc::Rc;

/// Element lookup in whatever document the backend is bound to.
///
/// See [`crate::web::WebDom`] for the browser implementation.
pub trait Dom: Debug {
	/// Resolves `id` to a live element, or [`None`] once no such element is in
	/// the document any more.
	fn element_by_id(&self, id: &str) -> Option<Rc<dyn Element>>;
}

/// The slice of [***Element***](https://developer.mozilla.org/en-US/docs/Web/API/Element)
/// functionality the cog lifecycle consumes: attribute reads, first-child
/// traversal and inner-markup access.
pub trait Element: Debug {
	/// The value of the attribute `name`, if present.
	fn attribute(&self, name: &str) -> Option<String>;

	/// The element's first child, which must itself be an element.
	///
	/// Backends must validate this instead of asserting: a missing child, text
	/// or comment is reported as [`CogError::Dom`].
	fn first_element_child(&self) -> Result<Rc<dyn Element>, CogError>;

	/// The element's inner markup, serialised.
	fn inner_html(&self) -> String;

	/// Replaces the element's inner contents with `markup`.
	fn set_inner_html(&self, markup: &str);

	/// Backend escape hatch, mainly for
	/// [`ChangeSet::apply`](crate::sync::ChangeSet::apply) implementations that
	/// need their concrete element type back.
	fn as_any(&self) -> &dyn Any;
}
