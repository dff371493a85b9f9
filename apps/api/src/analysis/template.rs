//! Named-slot prompt templates.
//!
//! A slot is `{name}` with a lowercase identifier. Binding is single-pass:
//! bound values are never rescanned, so a location containing braces is
//! inserted literally. Every slot is mandatory.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::errors::AppError;

static SLOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("slot pattern is a valid regex"));

/// Substitutes every slot in `template`. Fails on the first slot with no value.
pub fn bind_template(template: &str, values: &HashMap<&str, String>) -> Result<String, AppError> {
    let mut unbound: Option<String> = None;

    let rendered = SLOT_PATTERN.replace_all(template, |caps: &Captures| {
        let slot = &caps[1];
        match values.get(slot) {
            Some(value) => value.clone(),
            None => {
                unbound.get_or_insert_with(|| slot.to_string());
                String::new()
            }
        }
    });

    match unbound {
        Some(slot) => Err(AppError::TemplateBinding(slot)),
        None => Ok(rendered.into_owned()),
    }
}

/// Slot names in order of first appearance.
#[cfg(test)]
pub fn template_slots(template: &str) -> Vec<String> {
    let mut slots: Vec<String> = Vec::new();
    for caps in SLOT_PATTERN.captures_iter(template) {
        let slot = caps[1].to_string();
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }
    slots
}
