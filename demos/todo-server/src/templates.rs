//! HTML templates, embedded at compile time.

use htmx_view::UrlResolver;
use minijinja::value::{Rest, Value};
use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;

pub const TODO_PAGE: &str = "todo/todo.html";
pub const TODO_ITEM: &str = "todo/todo_item.html";

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        env.add_template(TODO_PAGE, include_str!("../templates/todo/todo.html"))?;
        env.add_template(TODO_ITEM, include_str!("../templates/todo/todo_item.html"))?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Render a single `{% block %}` of a template.
    pub fn render_block<S: Serialize>(&self, name: &str, block: &str, ctx: S) -> Result<String, Error> {
        let template = self.env.get_template(name)?;
        let mut state = template.eval_to_state(ctx)?;
        state.render_block(block)
    }
}

/// `url(name, *args)` for templates, backed by the application's route table.
///
/// Reversed paths are percent-encoded already, so they skip HTML escaping.
pub fn url_function(resolver: UrlResolver) -> Value {
    Value::from_function(move |name: String, args: Rest<Value>| -> Result<Value, Error> {
        resolver
            .reverse(&name, args.iter().map(|arg| arg.to_string()))
            .map(Value::from_safe_string)
            .map_err(|err| Error::new(ErrorKind::InvalidOperation, err.to_string()))
    })
}
