use thiserror::Error;

/// Failures surfaced by the cog lifecycle.
///
/// Only [`CogError::Configuration`] and [`CogError::Dom`] abort a render outright.
/// [`CogError::Parse`] and [`CogError::Diff`] raised by a [`TreeSync`](crate::sync::TreeSync)
/// during a re-render are logged and swallowed, leaving the cached snapshot stale;
/// the next reconciling render recovers through a full template render.
#[derive(Debug, Error)]
pub enum CogError {
	/// The container element named by the cog's id is missing or is not marked
	/// as a managed cog container.
	#[error("cog container {id:?}: {reason}")]
	Configuration {
		id: String,
		reason: &'static str,
	},

	/// The template renderer rejected the render request.
	#[error("template render failed: {0}")]
	Template(String),

	/// The tree parser rejected rendered markup.
	#[error("markup parse failed: {0}")]
	Parse(String),

	/// The tree differ could not compare two snapshots.
	#[error("tree compare failed: {0}")]
	Diff(String),

	/// The live DOM did not have the shape the lifecycle expected.
	#[error("unexpected DOM structure: {0}")]
	Dom(String),

	/// A [`ParseTree`](crate::sync::ParseTree) or [`ChangeSet`](crate::sync::ChangeSet)
	/// was handed to a [`TreeSync`](crate::sync::TreeSync) implementation other than
	/// the one that produced it.
	#[error("snapshot does not belong to this tree sync implementation")]
	ForeignTree,
}
