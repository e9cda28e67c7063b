//! Controller base.
//!
//! A controller exposes its actions through an explicit lookup instead of
//! method-name reflection: [`Controller::action`] maps an action name to a
//! function pointer. [`dispatch`] wraps the call in the `before`/`after`
//! hooks.

use crate::error::Result;
use crate::http::{HttpException, Request, Response};

/// Signature of a controller action.
pub type Action<C> = fn(&mut C, &Request) -> Result<Response>;

/// Action used when the route names none.
pub const DEFAULT_ACTION: &str = "index";

pub trait Controller: Sized {
    /// Looks up an action by name.
    ///
    /// Verb-specific actions are named `<verb>_<action>` (`post_save`);
    /// [`dispatch`] asks for those first.
    fn action(&self, name: &str) -> Option<Action<Self>>;

    /// Runs before every action.
    fn before(&mut self, _request: &Request) -> Result<()> {
        Ok(())
    }

    /// Runs after every action and may rewrite its response.
    fn after(&mut self, response: Response) -> Result<Response> {
        Ok(response)
    }
}

/// Executes `action` (or [`DEFAULT_ACTION`]) on `controller`.
///
/// # Errors
///
/// Returns `FuelError::Http(HttpException::NotFound)` if neither the
/// verb-specific nor the plain action exists, or if the action name starts
/// with `_`. Errors from hooks and the action itself propagate unchanged.
pub fn dispatch<C: Controller>(
    controller: &mut C,
    action: Option<&str>,
    request: &Request,
) -> Result<Response> {
    let name = action.unwrap_or(DEFAULT_ACTION);
    let handler = if name.starts_with('_') {
        None
    } else {
        let verb_specific = format!("{}_{}", request.method.to_lowercase(), name);
        controller
            .action(&verb_specific)
            .or_else(|| controller.action(name))
    };

    let Some(handler) = handler else {
        tracing::debug!(action = name, uri = %request.uri, "no such action");
        return Err(HttpException::NotFound(request.uri.clone()).into());
    };

    controller.before(request)?;
    let response = handler(controller, request)?;
    controller.after(response)
}
