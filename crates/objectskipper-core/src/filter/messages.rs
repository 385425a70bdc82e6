//! Operator-facing response text

const LIST_SEPARATOR: &str = ", ";

/// Reply to a pattern listing request
pub fn pattern_listing(patterns: &[&str]) -> String {
    if patterns.is_empty() {
        "No identifier patterns defined.".to_string()
    } else {
        format!("Active identifier patterns: {}", patterns.join(LIST_SEPARATOR))
    }
}

/// Reply to an object id listing request
pub fn object_listing(ids: &[&str]) -> String {
    if ids.is_empty() {
        "No objectIds defined.".to_string()
    } else {
        format!("Current active objectIds: {}", ids.join(LIST_SEPARATOR))
    }
}

/// Reply to a current-object query
pub fn current_object_report(current: Option<&str>, known: &[&str]) -> String {
    let mut report = match current {
        Some(id) => format!("Current objectId:{}.", id),
        None => "Current objectId unknown.".to_string(),
    };
    if !known.is_empty() {
        report.push_str(" Known objectIds: ");
        report.push_str(&known.join(LIST_SEPARATOR));
    }
    report
}

/// Reply to a disable request
pub fn filtering_disabled(registries_cleared: bool) -> String {
    if registries_cleared {
        "Filtering disabled, all patterns and objectIds deleted.".to_string()
    } else {
        "Filtering disabled".to_string()
    }
}
