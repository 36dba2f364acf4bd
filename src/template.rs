use crate::{cog::Props, dom::Element, error::CogError};
use core::fmt::Debug;
use std::rc::Rc;

/// Where rendered markup lands relative to the target element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
	/// Replace the target's inner contents. The only mode the cog lifecycle
	/// itself uses.
	ReplaceInnerContents,
	/// Append as the target's last child.
	AppendTo,
	/// Insert immediately before the target.
	InsertBefore,
}

/// Per-render instructions handed to a [`TemplateSet`].
///
/// `rendered_content` is an out-parameter: renderers store the markup they
/// produced there when [`RenderParams::capture_rendered`] is set, so callers
/// can diff it without touching the document.
#[derive(Debug)]
pub struct RenderParams<'a> {
	/// The data the template is rendered against.
	pub data: &'a Props,
	/// Target element of the final DOM write. Unused when
	/// [`RenderParams::skip_render_step`] is set.
	pub element: Option<Rc<dyn Element>>,
	pub placement: Placement,
	/// Capture the rendered markup into [`RenderParams::rendered_content`].
	pub capture_rendered: bool,
	/// Skip the final DOM write; the caller intends to patch the live subtree
	/// itself instead of replacing it.
	pub skip_render_step: bool,
	/// Markup captured during the render, when requested.
	pub rendered_content: Option<String>,
}

impl<'a> RenderParams<'a> {
	/// Parameters for a full render into `element`, replacing its inner contents.
	#[must_use]
	pub fn full(data: &'a Props, element: Rc<dyn Element>) -> Self {
		Self {
			data,
			element: Some(element),
			placement: Placement::ReplaceInnerContents,
			capture_rendered: false,
			skip_render_step: false,
			rendered_content: None,
		}
	}

	/// Parameters for an off-tree render: the markup is captured as a string
	/// and the final DOM write is skipped.
	#[must_use]
	pub fn off_tree(data: &'a Props, element: Rc<dyn Element>) -> Self {
		Self {
			data,
			element: Some(element),
			placement: Placement::ReplaceInnerContents,
			capture_rendered: true,
			skip_render_step: true,
			rendered_content: None,
		}
	}
}

/// A named-template renderer.
///
/// Cogs address templates as `cog:<group>/<group>`; how the set resolves that
/// name to a template is its own business.
pub trait TemplateSet: Debug {
	/// Renders the template `name` according to `params`: writing into the
	/// target element unless [`RenderParams::skip_render_step`] is set, and
	/// capturing the produced markup when [`RenderParams::capture_rendered`]
	/// is set.
	fn render(&self, name: &str, params: &mut RenderParams<'_>) -> Result<(), CogError>;
}
