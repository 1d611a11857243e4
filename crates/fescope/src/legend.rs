//! Legend text assembly.

use fescope_core::Component;

/// Short label for a field component: the field name's uppercase initials
/// plus the component index ("Displacement", 0 -> "D0").
///
/// Names without uppercase letters are used whole.
pub fn component_label(field: &str, component: Component) -> String {
    let initials: String = field.chars().filter(char::is_ascii_uppercase).collect();
    let prefix = if initials.is_empty() { field } else { &initials };
    match component {
        Component::Index(i) => format!("{prefix}{i}"),
        Component::Mean => format!("{prefix} mean"),
    }
}

/// Builds the legend text for one bound step: component label, substep
/// line, and optional min/max lines for the color range.
pub fn legend_text(
    field: &str,
    component: Component,
    step: usize,
    color_range: (f32, f32),
    show_min_max: bool,
) -> String {
    let mut text = format!("{}\nSubstep: {step}", component_label(field, component));
    if show_min_max {
        text.push_str(&format!(
            "\nmin: {:.1e}\nmax: {:.1e}",
            color_range.0, color_range.1
        ));
    }
    text
}
