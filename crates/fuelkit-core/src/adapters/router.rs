//! Router collaborator: an ordered, named route table.

use std::sync::Mutex;

/// One named route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Unique route name, e.g. `blog/about`.
    pub name: String,

    /// URI pattern matched by the router. Defaults to the name.
    pub path: String,

    /// Controller/action the route translates to.
    pub target: String,

    /// Restricts the route to one HTTP verb when set.
    pub verb: Option<String>,
}

impl Route {
    /// Creates a verb-less route whose path equals its name.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            target: target.into(),
            verb: None,
        }
    }
}

/// Merges and deletes named routes.
pub trait Router: Send + Sync {
    /// Adds `routes`, replacing same-named entries. With `prepend` the new
    /// routes are placed ahead of existing ones, preserving their own order.
    fn add(&self, routes: Vec<Route>, prepend: bool);

    /// Deletes exactly the named routes. Returns how many were removed.
    fn delete(&self, names: &[String]) -> usize;

    /// Snapshot of the table in match order.
    fn routes(&self) -> Vec<Route>;

    /// Looks up a route by name.
    fn get(&self, name: &str) -> Option<Route> {
        self.routes().into_iter().find(|r| r.name == name)
    }
}

/// In-process route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Mutex<Vec<Route>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Router for RouteTable {
    fn add(&self, routes: Vec<Route>, prepend: bool) {
        let mut table = self.routes.lock().unwrap();
        table.retain(|existing| !routes.iter().any(|r| r.name == existing.name));
        if prepend {
            let rest = std::mem::take(&mut *table);
            table.extend(routes);
            table.extend(rest);
        } else {
            table.extend(routes);
        }
    }

    fn delete(&self, names: &[String]) -> usize {
        let mut table = self.routes.lock().unwrap();
        let before = table.len();
        table.retain(|r| !names.contains(&r.name));
        before - table.len()
    }

    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}
