//! Render context: parameter-name registry, subquery-namespacing prefix
//! stack, and depth counter (§4.4).

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{RenderError, Result};

#[derive(Debug, Default)]
struct ParamRegistry {
    used: HashSet<String>,
    ordered: Vec<String>,
}

impl ParamRegistry {
    fn register(&mut self, effective_name: String) {
        if self.used.insert(effective_name.clone()) {
            self.ordered.push(effective_name);
        }
    }
}

/// Per-call scratchpad threaded through one render pass. Cheap to clone the
/// registry handle (an `Rc`); a fresh top-level [`RenderContext`] is created
/// once per [`super::Dialect::render`]/[`super::Dialect::render_compound`]
/// call and discarded afterward.
#[derive(Debug, Clone)]
pub struct RenderContext {
    prefix: String,
    depth: u8,
    max_depth: u8,
    registry: Rc<RefCell<ParamRegistry>>,
}

impl RenderContext {
    /// A fresh, unprefixed, depth-zero context with its own registry.
    #[must_use]
    pub fn new(max_depth: u8) -> Self {
        Self {
            prefix: String::new(),
            depth: 0,
            max_depth,
            registry: Rc::new(RefCell::new(ParamRegistry::default())),
        }
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Registers a raw parameter name, applying the current prefix, and
    /// returns the placeholder string (`:prefix_name`) to emit in SQL.
    pub fn register_param(&self, raw_name: &str) -> String {
        let effective = format!("{}{}", self.prefix, raw_name);
        self.registry.borrow_mut().register(effective.clone());
        format!(":{effective}")
    }

    /// Creates a child context for a subquery: shares the registry with
    /// `self`, advances the prefix to `sqN_`, and increments depth. Errors
    /// if the new depth would exceed the configured maximum.
    pub fn enter_subquery(&self) -> Result<Self> {
        let next_depth = self.depth + 1;
        if next_depth > self.max_depth {
            return Err(RenderError::DepthExceeded {
                depth: next_depth,
                max: self.max_depth,
            });
        }
        Ok(Self {
            prefix: format!("sq{next_depth}_"),
            depth: next_depth,
            max_depth: self.max_depth,
            registry: Rc::clone(&self.registry),
        })
    }

    /// Creates a sibling context at depth zero with a new prefix, sharing
    /// the registry — used for compound-query operands (`qI_`) and the
    /// compound's trailing, unprefixed `ORDER BY`/pagination context.
    #[must_use]
    pub fn sibling_with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            depth: 0,
            max_depth: self.max_depth,
            registry: Rc::clone(&self.registry),
        }
    }

    /// The ordered, deduplicated list of every effective parameter name
    /// registered so far, in first-occurrence order.
    #[must_use]
    pub fn required_params(&self) -> Vec<String> {
        self.registry.borrow().ordered.clone()
    }
}
