pub mod catalog;
pub mod chooser;
pub mod render;
pub mod resolver;
pub mod roles;
pub mod salad;

pub use catalog::{find_template, MenuTemplate, MENU_CATALOG};
pub use chooser::{Chooser, RandomChooser};
pub use render::{render_steps, NOT_AVAILABLE_MARKER};
pub use resolver::{resolve_catalog, resolve_menu, OutcomeFilter, ResolvedSelection, RoleBinding};
pub use roles::{role_members, role_members_by_name, RoleTag};
pub use salad::{generate_salad_steps, select_salad, Salad, SaladStyle, CLASSIC_COMBINATIONS};
