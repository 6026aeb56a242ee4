//! HTML pages rendered with minijinja
//!
//! Templates are compiled into the binary. File names end in `.html`, so
//! minijinja auto-escapes everything interpolated into them, including the
//! logged user input.

use minijinja::{Environment, context};

use crate::error::Result;
use crate::store::StoredChatLog;

const INDEX_TEMPLATE: &str = "index.html";
const LOGS_TEMPLATE: &str = "logs.html";

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile the built-in templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        env.add_template(LOGS_TEMPLATE, include_str!("../templates/logs.html"))?;
        Ok(Self { env })
    }

    /// The chat page
    pub fn render_index(&self, app_name: &str) -> Result<String> {
        let html = self
            .env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { app_name => app_name })?;
        Ok(html)
    }

    /// The chat log page
    pub fn render_logs(&self, logs: &[StoredChatLog]) -> Result<String> {
        let html = self
            .env
            .get_template(LOGS_TEMPLATE)?
            .render(context! { logs => logs })?;
        Ok(html)
    }
}
