use std::sync::Arc;

use crate::enums::{HttpMethod, RouteMethod};
use crate::errors::{RouterError, RouterResult};

use super::Controller;

/// Resolves which action serves each method.
///
/// A mapping reads `get,post:Create;*:List`: `;` separates rules, each rule
/// is a comma separated method list (or `*`) and an action name. Without a
/// mapping every method whose default action the controller implements is
/// registered.
pub(crate) fn resolve_actions(
    controller: &dyn Controller,
    mapping: Option<&str>,
) -> RouterResult<Vec<(RouteMethod, Arc<str>)>> {
    let actions = controller.actions();

    let Some(mapping) = mapping else {
        return Ok(HttpMethod::ALL
            .iter()
            .filter(|m| actions.contains(&m.default_action()))
            .map(|m| (RouteMethod::Only(*m), Arc::from(m.default_action())))
            .collect());
    };

    let mut resolved = Vec::new();
    for rule in mapping.split(';').map(str::trim).filter(|r| !r.is_empty()) {
        let Some((methods, action)) = rule.split_once(':') else {
            return Err(RouterError::MalformedMapping {
                mapping: mapping.to_string(),
            });
        };
        let action = action.trim();
        if !actions.iter().any(|known| *known == action) {
            return Err(RouterError::UnknownAction {
                action: action.to_string(),
                mapping: mapping.to_string(),
            });
        }
        let action: Arc<str> = Arc::from(action);
        for method in methods.split(',').map(str::trim).filter(|m| !m.is_empty()) {
            resolved.push((method.parse::<RouteMethod>()?, action.clone()));
        }
    }

    if resolved.is_empty() {
        return Err(RouterError::MalformedMapping {
            mapping: mapping.to_string(),
        });
    }
    Ok(resolved)
}
