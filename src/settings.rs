use core::cell::Cell;

/// Render switches shared by every cog constructed from the same
/// [`Toolkit`](crate::cog::Toolkit).
///
/// Both switches default to on and are read at render time rather than captured
/// per cog, so flipping one affects all subsequent renders of all sharing cogs
/// uniformly.
#[derive(Debug)]
pub struct Settings {
	reactivity: Cell<bool>,
	reconciliation: Cell<bool>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			reactivity: Cell::new(true),
			reconciliation: Cell::new(true),
		}
	}
}

impl Settings {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether property mutations on an already-rendered cog trigger a synchronous re-render.
	#[must_use]
	pub fn reactivity(&self) -> bool {
		self.reactivity.get()
	}

	pub fn set_reactivity(&self, enabled: bool) {
		self.reactivity.set(enabled);
	}

	/// Whether re-renders go through the parse/compare/apply path instead of a
	/// full template render.
	#[must_use]
	pub fn reconciliation(&self) -> bool {
		self.reconciliation.get()
	}

	pub fn set_reconciliation(&self, enabled: bool) {
		self.reconciliation.set(enabled);
	}
}
