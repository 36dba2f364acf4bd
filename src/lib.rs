#![doc(html_root_url = "https://docs.rs/cog-dom/0.1.0")]
#![warn(clippy::pedantic)]

//! A reconciling "cog" component layer for the DOM.
//!
//! A cog binds a templated fragment to a container element (any element with a
//! `data-component="cog"` attribute) and a property bag. The first render
//! writes the template into the container wholesale; every later render is
//! produced off-tree, parsed, diffed against a cached snapshot of the previous
//! output and applied to the live subtree as a minimal patch set.
//!
//! Templating, parsing and diffing are pluggable: the lifecycle only talks to
//! the [`TemplateSet`], [`TreeSync`] and [`Dom`] traits, bundled in a
//! [`Toolkit`]. [`web::WebDom`] backs the [`Dom`] side with
//! [***web-sys***](https://docs.rs/web-sys) in the browser.

pub mod cog;
pub mod dom;
pub mod error;
pub mod settings;
pub mod sync;
pub mod template;
pub mod web;

pub use self::{
	cog::{Cog, Props, Toolkit, UxCog, COG_ATTRIBUTE, COG_ATTRIBUTE_VALUE},
	dom::{Dom, Element},
	error::CogError,
	settings::Settings,
	sync::{ChangeSet, ParseTree, TreeSync},
	template::{Placement, RenderParams, TemplateSet},
};

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}
