use regex::{Captures, Regex, RegexBuilder};

use crate::menu::catalog::MenuTemplate;
use crate::menu::resolver::ResolvedSelection;

/// Stands in for a role that nothing in stock could fill.
pub const NOT_AVAILABLE_MARKER: &str = "[NOT AVAILABLE]";

fn role_pattern(template: &MenuTemplate) -> Option<Regex> {
    if template.roles.is_empty() {
        return None;
    }
    let alternation = template
        .roles
        .iter()
        .map(|role| regex::escape(role.token()))
        .collect::<Vec<_>>()
        .join("|");
    // Tokens come from a fixed table and are always valid once escaped.
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .ok()
}

/// Step text for `template` with each role token replaced by the bound item
/// name, or [`NOT_AVAILABLE_MARKER`] when the role is unbound. Salad steps
/// follow unchanged when the template asks for a salad.
pub fn render_steps(template: &MenuTemplate, resolved: &ResolvedSelection) -> Vec<String> {
    let pattern = role_pattern(template);
    let mut steps: Vec<String> = template
        .steps
        .iter()
        .map(|step| match &pattern {
            Some(pattern) => pattern
                .replace_all(step, |caps: &Captures| {
                    let matched = caps[0].to_lowercase();
                    template
                        .roles
                        .iter()
                        .find(|role| role.token() == matched)
                        .and_then(|role| resolved.item_for(*role))
                        .map(|item| item.name.clone())
                        .unwrap_or_else(|| NOT_AVAILABLE_MARKER.to_string())
                })
                .into_owned(),
            None => step.to_string(),
        })
        .collect();

    if template.requires_salad {
        if let Some(salad) = &resolved.salad {
            steps.extend(salad.steps.iter().cloned());
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::item::{Category, Item};
    use crate::menu::resolver::RoleBinding;
    use crate::menu::roles::RoleTag;
    use crate::menu::salad::{Salad, SaladStyle};

    const TEMPLATE: MenuTemplate = MenuTemplate {
        name: "test plate",
        roles: &[RoleTag::Protein, RoleTag::SideStarch],
        requires_salad: true,
        steps: &["Cook the PROTEIN next to the starch, then rest the Protein."],
    };

    fn selection(protein: Option<Item>, salad: Option<Salad>) -> ResolvedSelection {
        ResolvedSelection {
            template: TEMPLATE.name,
            bindings: vec![
                RoleBinding { role: RoleTag::Protein, item: protein },
                RoleBinding {
                    role: RoleTag::SideStarch,
                    item: Some(Item::new(2, "Arroz", Category::Otros, 1.0)),
                },
            ],
            salad,
            complete: false,
            missing_roles: vec![],
        }
    }

    #[test]
    fn test_replaces_every_occurrence_case_insensitively() {
        let resolved = selection(Some(Item::new(1, "Pollo", Category::Proteinas, 1.0)), None);
        let steps = render_steps(&TEMPLATE, &resolved);
        assert_eq!(steps, vec!["Cook the Pollo next to the Arroz, then rest the Pollo."]);
    }

    #[test]
    fn test_unbound_role_gets_marker() {
        let resolved = selection(None, None);
        let steps = render_steps(&TEMPLATE, &resolved);
        assert_eq!(
            steps[0],
            "Cook the [NOT AVAILABLE] next to the Arroz, then rest the [NOT AVAILABLE]."
        );
        assert!(!steps[0].to_lowercase().contains("protein"));
    }

    #[test]
    fn test_salad_steps_are_appended_verbatim() {
        let salad = Salad {
            style: SaladStyle::Classic,
            ingredients: vec!["tomate".to_string(), "cebolla".to_string()],
            steps: vec!["slice the protein-free tomate".to_string()],
        };
        let resolved = selection(None, Some(salad));
        let steps = render_steps(&TEMPLATE, &resolved);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1], "slice the protein-free tomate");
    }
}
