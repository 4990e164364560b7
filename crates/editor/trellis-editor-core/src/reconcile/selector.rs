//! Selector widget sync: keep a family's companion selector widget offering
//! exactly the connected slots, and its value a member of those options.

use crate::kinds::FamilySpec;
use crate::types::{Node, Widget, WidgetValue};

/// Option text for one connected slot: `<index>: <label>`.
fn option_text(family: &FamilySpec, name: &str, label: Option<&str>) -> String {
    let idx = family.slot_index(name);
    let label = label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| family.slot_name(idx));
    format!("{}: {}", idx, label)
}

/// Leading numeric prefix of a selector value, read up to the first `:`.
/// Anything unparseable falls back to 1.
fn leading_index(value: &str) -> usize {
    let head = value.split(':').next().unwrap_or(value);
    let digits: String = head
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(1)
}

fn repair_value(current: &str, options: &[String]) -> String {
    if options.iter().any(|o| o == current) {
        return current.to_string();
    }
    // The old option text is gone; try to stay on the same slot index before
    // giving up and taking the first option.
    let prefix = format!("{}:", leading_index(current));
    options
        .iter()
        .find(|option| option.starts_with(&prefix))
        .or_else(|| options.first())
        .cloned()
        .unwrap_or_default()
}

/// Bring the companion selector widget in line with the family's connected
/// slots. Labels are read as-is, so this runs after label resolution.
///
/// A widget of the wrong shape (hosts restore it as plain text) is replaced
/// in place at the same position, carrying its stringified value over as the
/// repair seed. A node without the widget is left alone.
pub fn sync_selector(node: &mut Node, family: &FamilySpec) -> bool {
    let Some(spec) = family.selector else {
        return false;
    };
    let Some(pos) = node.widget_position(spec.widget) else {
        return false;
    };

    let mut changed = false;
    if !node.widgets[pos].is_select() {
        let seed = node.widgets[pos].value.as_text();
        node.widgets[pos] =
            Widget::select(spec.widget, seed, vec![spec.placeholder.to_string()]);
        changed = true;
    }

    let mut options: Vec<String> = node
        .inputs
        .iter()
        .filter(|slot| family.owns(&slot.name) && slot.is_connected())
        .map(|slot| option_text(family, &slot.name, slot.label.as_deref()))
        .collect();
    if options.is_empty() {
        options.push(spec.placeholder.to_string());
    }

    let widget = &mut node.widgets[pos];
    if widget.options != options {
        widget.options = options;
        changed = true;
    }

    let current = widget.value.as_text();
    let repaired = repair_value(&current, &widget.options);
    if widget.value != WidgetValue::Select(repaired.clone()) {
        widget.value = WidgetValue::Select(repaired);
        changed = true;
    }

    changed
}
