use serde::Serialize;
use tracing::debug;

use crate::inventory::availability::available;
use crate::inventory::item::Item;
use crate::menu::catalog::MenuTemplate;
use crate::menu::chooser::Chooser;
use crate::menu::roles::RoleTag;
use crate::menu::salad::{select_salad, Salad};

const MIN_SALAD_INGREDIENTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleBinding {
    pub role: RoleTag,
    pub item: Option<Item>,
}

/// Outcome of binding one template against one inventory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSelection {
    pub template: &'static str,
    pub bindings: Vec<RoleBinding>,
    pub salad: Option<Salad>,
    pub complete: bool,
    pub missing_roles: Vec<RoleTag>,
}

impl ResolvedSelection {
    pub fn item_for(&self, role: RoleTag) -> Option<&Item> {
        self.bindings
            .iter()
            .find(|binding| binding.role == role)
            .and_then(|binding| binding.item.as_ref())
    }
}

/// Binds every required role of `template` to a random in-stock candidate,
/// picks a salad when the template wants one, and reports what is missing.
///
/// The same item may fill several roles; roles are resolved independently.
pub fn resolve_menu<C: Chooser>(
    template: &MenuTemplate,
    items: &[Item],
    chooser: &mut C,
) -> ResolvedSelection {
    let bindings: Vec<RoleBinding> = template
        .roles
        .iter()
        .map(|&role| {
            let candidates = available(items, role);
            let item = chooser.pick_one(&candidates).map(|item| (*item).clone());
            if item.is_none() {
                debug!(template = template.name, role = %role, "No candidates for role");
            }
            RoleBinding { role, item }
        })
        .collect();

    let salad = if template.requires_salad {
        select_salad(items, chooser)
    } else {
        None
    };

    let missing_roles: Vec<RoleTag> = bindings
        .iter()
        .filter(|binding| binding.item.is_none())
        .map(|binding| binding.role)
        .collect();

    let salad_ok = !template.requires_salad
        || salad
            .as_ref()
            .is_some_and(|s| s.ingredients.len() >= MIN_SALAD_INGREDIENTS);

    ResolvedSelection {
        template: template.name,
        complete: missing_roles.is_empty() && salad_ok,
        bindings,
        salad,
        missing_roles,
    }
}

/// Resolves every template independently against the same snapshot.
pub fn resolve_catalog<C: Chooser>(
    catalog: &[MenuTemplate],
    items: &[Item],
    chooser: &mut C,
) -> Vec<ResolvedSelection> {
    catalog
        .iter()
        .map(|template| resolve_menu(template, items, chooser))
        .collect()
}

/// Display filter over resolved menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeFilter {
    #[default]
    All,
    Complete,
    Incomplete,
}

impl OutcomeFilter {
    pub fn accepts(&self, selection: &ResolvedSelection) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Complete => selection.complete,
            OutcomeFilter::Incomplete => !selection.complete,
        }
    }
}
