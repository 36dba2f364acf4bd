use crate::{dom::Element, error::CogError};
use core::{any::Any, fmt::Debug};

/// An immutable structural parse of rendered markup.
///
/// Opaque to the lifecycle: a tree is only ever handed back to the [`TreeSync`]
/// that produced it, never inspected or mutated in place. Cogs replace their
/// cached tree wholesale after each successful diff cycle.
pub trait ParseTree: Debug {
	/// The concrete tree, for the producing [`TreeSync`] to recover through a
	/// checked downcast.
	fn as_any(&self) -> &dyn Any;
}

/// An ordered set of patches produced by [`TreeSync::compare`].
///
/// An empty set is a valid, common outcome and simply means the two snapshots
/// were structurally equal.
pub trait ChangeSet {
	/// The number of patches in the set.
	fn len(&self) -> usize;

	#[must_use]
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Applies every patch, in order, to the live subtree rooted at `target`.
	///
	/// Partially applied sets are not rolled back by the caller.
	fn apply(&self, target: &dyn Element) -> Result<(), CogError>;
}

/// The parser/differ pair a cog reconciles through.
///
/// `parse` turns rendered markup with a single element root into a
/// [`ParseTree`]; `compare` computes the patches that turn the subtree
/// described by `old` into the one described by `new`. Implementations should
/// report trees they did not produce themselves as [`CogError::ForeignTree`]
/// rather than asserting on the downcast.
pub trait TreeSync: Debug {
	fn parse(&self, markup: &[u8]) -> Result<Box<dyn ParseTree>, CogError>;

	fn compare(&self, old: &dyn ParseTree, new: &dyn ParseTree) -> Result<Box<dyn ChangeSet>, CogError>;
}
