use crate::{
	dom::{Dom, Element},
	error::CogError,
	settings::Settings,
	sync::{ParseTree, TreeSync},
	template::{RenderParams, TemplateSet},
};
use hashbrown::HashMap;
use serde_json::Value;
use std::rc::Rc;
use tracing::{error, trace, warn};

/// Marker attribute every managed cog container must carry.
pub const COG_ATTRIBUTE: &str = "data-component";
/// Required value of [`COG_ATTRIBUTE`], compared ASCII-case-insensitively.
pub const COG_ATTRIBUTE_VALUE: &str = "cog";

const MISSING_CONTAINER: &str = "no element with this id is in the document";
const MISSING_MARKER: &str = "the container must have a \"data-component\" attribute with a value specified as \"cog\"";

/// The property bag a cog renders its template against.
pub type Props = HashMap<String, Value>;

/// The cog capability: anything that can (re-)render itself.
pub trait Cog {
	fn render(&mut self) -> Result<(), CogError>;

	/// Lifecycle entry hook. Concrete cogs override this to set up event
	/// wiring or timers; by default it simply renders.
	fn start(&mut self) -> Result<(), CogError> {
		self.render()
	}
}

/// The collaborators a [`UxCog`] renders through.
///
/// Cloning is shallow: clones share the same collaborators and the same
/// [`Settings`], so one toolkit's toggles govern every cog built from it.
#[derive(Clone, Debug)]
pub struct Toolkit {
	pub templates: Rc<dyn TemplateSet>,
	pub dom: Rc<dyn Dom>,
	pub sync: Rc<dyn TreeSync>,
	pub settings: Rc<Settings>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
	Unrendered,
	Rendered,
	/// Terminal: the container left the document and cleanup has run.
	Detached,
}

/// The reusable cog lifecycle controller.
///
/// A `UxCog` owns a [`Props`] bag and a cached [`ParseTree`] snapshot of its
/// last rendered output. The first [`render`](UxCog::render) binds the
/// container element and renders the template into it wholesale; subsequent
/// renders are produced off-tree, diffed against the cached snapshot and
/// applied to the live subtree as a minimal patch set.
///
/// Concrete cog types hold a `UxCog` and delegate [`Cog::render`] to it:
///
/// ```
/// # use cog_dom::{Cog, CogError, UxCog};
/// struct Clock {
/// 	cog: UxCog,
/// }
///
/// impl Cog for Clock {
/// 	fn render(&mut self) -> Result<(), CogError> {
/// 		self.cog.render()
/// 	}
/// }
/// ```
pub struct UxCog {
	toolkit: Toolkit,
	id: String,
	prefix_name: String,
	simple_name: String,
	props: Props,
	element: Option<Rc<dyn Element>>,
	phase: Phase,
	parse_tree: Option<Box<dyn ParseTree>>,
	cleanup: Option<Box<dyn FnOnce()>>,
}

impl UxCog {
	/// Creates an unrendered cog for the container element `id`, rendering
	/// templates from the group `group`.
	///
	/// The group name doubles as the template namespace: a cog constructed
	/// with the group `"clock"` renders the template `"cog:clock/clock"`.
	#[must_use]
	pub fn new(toolkit: Toolkit, group: &str, id: &str) -> Self {
		Self {
			toolkit,
			id: id.to_owned(),
			prefix_name: format!("cog:{}", group),
			simple_name: group.to_owned(),
			props: Props::new(),
			element: None,
			phase: Phase::Unrendered,
			parse_tree: None,
			cleanup: None,
		}
	}

	#[must_use]
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn set_id(&mut self, id: &str) {
		self.id = id.to_owned();
	}

	/// The namespaced template-group prefix, `cog:<group>`.
	#[must_use]
	pub fn prefix_name(&self) -> &str {
		&self.prefix_name
	}

	/// The name of the template this cog renders, `cog:<group>/<group>`.
	#[must_use]
	pub fn template_name(&self) -> String {
		format!("{}/{}", self.prefix_name, self.simple_name)
	}

	/// The bound container element. Present exactly while the cog is rendered
	/// (or mid-render).
	#[must_use]
	pub fn element(&self) -> Option<&Rc<dyn Element>> {
		self.element.as_ref()
	}

	pub fn set_element(&mut self, element: Rc<dyn Element>) {
		self.element = Some(element);
	}

	/// Registers the callback run once the cog's container has left the
	/// document. Replaces any previously registered callback.
	pub fn set_cleanup(&mut self, cleanup: impl FnOnce() + 'static) {
		self.cleanup = Some(Box::new(cleanup));
	}

	/// `true` from the first successful render until teardown.
	#[must_use]
	pub fn has_been_rendered(&self) -> bool {
		self.phase == Phase::Rendered
	}

	/// `true` once the container has left the document and the cog has become
	/// inert.
	#[must_use]
	pub fn is_detached(&self) -> bool {
		self.phase == Phase::Detached
	}

	/// The live property store. Entries written here directly bypass
	/// reactivity; use [`set_prop`](UxCog::set_prop) or
	/// [`batch_prop_update`](UxCog::batch_prop_update) to trigger re-renders.
	#[must_use]
	pub fn props(&self) -> &Props {
		&self.props
	}

	#[must_use]
	pub fn props_mut(&mut self) -> &mut Props {
		&mut self.props
	}

	/// The cached snapshot of the last rendered output, present exactly while
	/// the cog is rendered (unless an earlier snapshot parse failed).
	#[must_use]
	pub fn parse_tree(&self) -> Option<&dyn ParseTree> {
		self.parse_tree.as_deref()
	}

	/// Inserts or overwrites one property. If reactivity is enabled and the
	/// cog has completed its first render, a re-render runs synchronously
	/// before this returns.
	pub fn set_prop(&mut self, key: impl Into<String>, value: Value) {
		self.props.insert(key.into(), value);
		self.rerender_if_reactive();
	}

	/// Applies every entry of `updates` to the property store, then triggers
	/// at most one re-render (under the same conditions as
	/// [`set_prop`](UxCog::set_prop)) rather than one per key.
	pub fn batch_prop_update(&mut self, updates: impl IntoIterator<Item = (String, Value)>) {
		for (key, value) in updates {
			self.props.insert(key, value);
		}
		self.rerender_if_reactive();
	}

	fn rerender_if_reactive(&mut self) {
		if self.toolkit.settings.reactivity() && self.has_been_rendered() {
			// Mutation-triggered renders have no caller to report to.
			if let Err(err) = self.render() {
				error!("reactive re-render of cog {:?} failed: {}", self.id, err);
			}
		}
	}

	/// Renders the cog.
	///
	/// - First call: validates that the container element exists and carries
	///   [`COG_ATTRIBUTE`]`=`[`COG_ATTRIBUTE_VALUE`], binds it, renders the
	///   template into it and caches a snapshot of the result.
	/// - Subsequent calls: render off-tree, diff against the cached snapshot
	///   and patch the live subtree, or fully re-render while reconciliation
	///   is disabled.
	/// - Once the container id no longer resolves, runs the registered cleanup
	///   callback (at most once) and detaches; a detached cog's `render` is a
	///   no-op returning `Ok`.
	pub fn render(&mut self) -> Result<(), CogError> {
		if self.phase == Phase::Detached {
			trace!("render of detached cog {:?} is a no-op", self.id);
			return Ok(());
		}

		let element = match self.toolkit.dom.element_by_id(&self.id) {
			Some(element) => element,
			None if self.has_been_rendered() => return self.detach(),
			None => {
				return Err(CogError::Configuration {
					id: self.id.clone(),
					reason: MISSING_CONTAINER,
				})
			}
		};

		let marker = element.attribute(COG_ATTRIBUTE).unwrap_or_default();
		if !marker.eq_ignore_ascii_case(COG_ATTRIBUTE_VALUE) {
			return Err(CogError::Configuration {
				id: self.id.clone(),
				reason: MISSING_MARKER,
			});
		}

		if self.phase == Phase::Unrendered {
			// Initial render: bind, render wholesale, snapshot.
			self.set_element(Rc::clone(&element));
			if let Err(err) = self.render_template(&element) {
				self.element = None;
				return Err(err);
			}
			self.phase = Phase::Rendered;
			trace!("cog {:?} rendered for the first time", self.id);
			self.snapshot(&element);
			Ok(())
		} else if self.toolkit.settings.reconciliation() {
			self.reconcile(&element)
		} else {
			self.render_template(&element)
		}
	}

	/// Tears the cog down after its container has left the document.
	fn detach(&mut self) -> Result<(), CogError> {
		self.phase = Phase::Detached;
		self.element = None;
		self.parse_tree = None;
		trace!("cog {:?} detached", self.id);
		if let Some(cleanup) = self.cleanup.take() {
			cleanup();
		}
		Ok(())
	}

	/// Full template render into the container, as on first render or with
	/// reconciliation disabled.
	fn render_template(&self, element: &Rc<dyn Element>) -> Result<(), CogError> {
		let mut params = RenderParams::full(&self.props, Rc::clone(element));
		self.toolkit.templates.render(&self.template_name(), &mut params)
	}

	/// Caches a parse of the container's current inner markup for future diffs.
	///
	/// A parse failure is logged and leaves the cache empty; the next
	/// reconciling render falls back to a full render and retries.
	fn snapshot(&mut self, element: &Rc<dyn Element>) {
		let contents = element.inner_html();
		match self.toolkit.sync.parse(contents.as_bytes()) {
			Ok(tree) => self.parse_tree = Some(tree),
			Err(err) => error!("failed to snapshot cog {:?}: {}", self.id, err),
		}
	}

	/// Re-render through the parse/compare/apply path.
	fn reconcile(&mut self, element: &Rc<dyn Element>) -> Result<(), CogError> {
		let old_tree = match self.parse_tree.as_deref() {
			Some(old_tree) => old_tree,
			None => {
				// An earlier snapshot was lost to a parse failure, so there is
				// nothing to diff against. Recover through a full render.
				warn!("cog {:?} has no cached snapshot, falling back to a full render", self.id);
				self.render_template(element)?;
				self.snapshot(element);
				return Ok(());
			}
		};

		let mut params = RenderParams::off_tree(&self.props, Rc::clone(element));
		let outcome = self.toolkit.templates.render(&self.template_name(), &mut params);
		let rendered = params.rendered_content.take().unwrap_or_default();
		drop(params);
		outcome?;

		let new_tree = match self.toolkit.sync.parse(rendered.as_bytes()) {
			Ok(new_tree) => new_tree,
			Err(err) => {
				error!("failed to parse the re-rendered markup of cog {:?}: {}", self.id, err);
				return Ok(());
			}
		};

		let changes = match self.toolkit.sync.compare(old_tree, new_tree.as_ref()) {
			Ok(changes) => changes,
			Err(err) => {
				error!("failed to compare render snapshots of cog {:?}: {}", self.id, err);
				return Ok(());
			}
		};

		if changes.is_empty() {
			trace!("re-render of cog {:?} produced no changes", self.id);
		} else {
			let cog_root = element.first_element_child()?;
			if let Err(err) = changes.apply(cog_root.as_ref()) {
				// Partially applied sets are not rolled back; the old snapshot
				// is kept so the next diff starts from the last known tree.
				error!("failed to apply {} change(s) to cog {:?}: {}", changes.len(), self.id, err);
				return Ok(());
			}
			trace!("applied {} change(s) to cog {:?}", changes.len(), self.id);
		}

		self.parse_tree = Some(new_tree);
		Ok(())
	}
}

impl Cog for UxCog {
	fn render(&mut self) -> Result<(), CogError> {
		UxCog::render(self)
	}
}
