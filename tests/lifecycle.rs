
use cog_dom::{Cog, CogError, Element, ParseTree, TreeSync, UxCog};
use fakes_::{fixture, FakeTree, Fixture};
use serde_json::json;
use std::{cell::Cell, rc::Rc};

const GREETING: &str = "<div class=\"greeting\">Hello {name}</div>";

fn greeter(fx: &Fixture) -> UxCog {
	fx.templates.insert("cog:greeter/greeter", GREETING);
	UxCog::new(fx.toolkit.clone(), "greeter", "c1")
}

#[test]
fn template_naming() {
	let fx = fixture();
	let cog = greeter(&fx);
	assert_eq!(cog.id(), "c1");
	assert_eq!(cog.prefix_name(), "cog:greeter");
	assert_eq!(cog.template_name(), "cog:greeter/greeter");
}

#[test]
fn initial_render_binds_and_populates_the_container() {
	let fx = fixture();
	let container = fx.dom.insert("c1", &[("data-component", "cog")]);
	let mut cog = greeter(&fx);

	cog.set_prop("name", json!("Ann"));
	assert!(!cog.has_been_rendered());
	assert_eq!(fx.templates.renders.get(), 0, "mutations before the first render must not render");

	cog.render().unwrap();
	assert!(cog.has_been_rendered());
	assert!(cog.element().is_some());
	assert_eq!(container.inner_html(), "<div class=\"greeting\">Hello Ann</div>");
}

#[test]
fn initial_snapshot_matches_the_live_markup() {
	let fx = fixture();
	let container = fx.dom.insert("c1", &[("data-component", "cog")]);
	let mut cog = greeter(&fx);
	cog.set_prop("name", json!("Ann"));
	cog.render().unwrap();

	let cached = cog.parse_tree().unwrap().as_any().downcast_ref::<FakeTree>().unwrap();
	let reparsed = fx.sync.parse(container.inner_html().as_bytes()).unwrap();
	let reparsed = reparsed.as_any().downcast_ref::<FakeTree>().unwrap();
	assert_eq!(cached.open, reparsed.open);
	assert_eq!(cached.inner, reparsed.inner);
	assert_eq!(cached.inner, "Hello Ann");
}

#[test]
fn a_container_without_the_marker_fails_configuration() {
	let fx = fixture();
	let container = fx.dom.insert("c1", &[]);
	let mut cog = greeter(&fx);

	let err = cog.render().unwrap_err();
	assert!(matches!(err, CogError::Configuration { .. }), "got {:?}", err);
	assert!(!cog.has_been_rendered());
	assert!(cog.parse_tree().is_none());
	assert_eq!(container.writes.get(), 0, "a failed precondition must not mutate the DOM");
	assert_eq!(fx.templates.renders.get(), 0);
}

#[test]
fn a_container_with_the_wrong_marker_value_fails_configuration() {
	let fx = fixture();
	fx.dom.insert("c1", &[("data-component", "widget")]);
	let mut cog = greeter(&fx);
	assert!(matches!(cog.render().unwrap_err(), CogError::Configuration { .. }));
}

#[test]
fn the_marker_value_is_case_insensitive() {
	let fx = fixture();
	fx.dom.insert("c1", &[("data-component", "CoG")]);
	let mut cog = greeter(&fx);
	cog.set_prop("name", json!("Ann"));
	cog.render().unwrap();
	assert!(cog.has_been_rendered());
}

#[test]
fn a_missing_container_fails_configuration_before_the_first_render() {
	let fx = fixture();
	let mut cog = greeter(&fx);
	assert!(matches!(cog.render().unwrap_err(), CogError::Configuration { .. }));
	assert!(!cog.has_been_rendered());
}

#[test]
fn a_template_failure_leaves_the_cog_unrendered() {
	let fx = fixture();
	fx.dom.insert("c1", &[("data-component", "cog")]);
	// No template registered for this group.
	let mut cog = UxCog::new(fx.toolkit.clone(), "ghost", "c1");

	assert!(matches!(cog.render().unwrap_err(), CogError::Template(_)));
	assert!(!cog.has_been_rendered());
	assert!(cog.element().is_none());
	assert!(cog.parse_tree().is_none());
}

#[test]
fn teardown_runs_the_cleanup_callback_exactly_once() {
	let fx = fixture();
	fx.dom.insert("c1", &[("data-component", "cog")]);
	let mut cog = greeter(&fx);
	cog.set_prop("name", json!("Ann"));
	cog.render().unwrap();

	let runs = Rc::new(Cell::new(0));
	cog.set_cleanup({
		let runs = Rc::clone(&runs);
		move || runs.set(runs.get() + 1)
	});

	fx.dom.remove("c1");
	let parses = fx.sync.parses.get();
	let compares = fx.sync.compares.get();
	cog.render().unwrap();

	assert_eq!(runs.get(), 1);
	assert!(cog.is_detached());
	assert!(!cog.has_been_rendered());
	assert!(cog.element().is_none());
	assert!(cog.parse_tree().is_none());
	assert_eq!(fx.sync.parses.get(), parses, "teardown must not parse");
	assert_eq!(fx.sync.compares.get(), compares, "teardown must not diff");

	// Detached cogs are inert.
	let renders = fx.templates.renders.get();
	cog.render().unwrap();
	cog.set_prop("name", json!("Bob"));
	assert_eq!(runs.get(), 1);
	assert_eq!(fx.templates.renders.get(), renders);
}

#[test]
fn teardown_without_a_cleanup_callback_is_a_noop() {
	let fx = fixture();
	fx.dom.insert("c1", &[("data-component", "cog")]);
	let mut cog = greeter(&fx);
	cog.set_prop("name", json!("Ann"));
	cog.render().unwrap();

	fx.dom.remove("c1");
	cog.render().unwrap();
	assert!(cog.is_detached());
}

#[test]
fn start_defaults_to_render() {
	let fx = fixture();
	let container = fx.dom.insert("c1", &[("data-component", "cog")]);
	let mut cog = greeter(&fx);
	cog.set_prop("name", json!("Ann"));

	Cog::start(&mut cog).unwrap();
	assert!(cog.has_been_rendered());
	assert_eq!(container.inner_html(), "<div class=\"greeting\">Hello Ann</div>");
}
