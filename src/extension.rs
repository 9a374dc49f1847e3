//! Plugin identity and registration with the host.
use crate::host::{ActionRegistration, DockArea, DockRegistration, PluginHost};
use crate::panel::{image_generation, segmentation};

pub const EXTENSION_ID: &str = "arcane_illusion";
pub const EXTENSION_NAME: &str = "Arcane Illusion";
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn action_id(action: &str) -> String {
    format!("{}_{}", EXTENSION_ID, action)
}

pub fn menu_location() -> String {
    format!("tools/{}", EXTENSION_ID)
}

pub fn docks() -> [DockRegistration; 2] {
    [
        DockRegistration {
            id: image_generation::PANEL_ID,
            title: image_generation::PANEL_TITLE,
            area: DockArea::Left,
        },
        DockRegistration {
            id: segmentation::PANEL_ID,
            title: segmentation::PANEL_TITLE,
            area: DockArea::Right,
        },
    ]
}

/// Register both docks, the extension menu and its "About" action.
pub fn register(host: &mut dyn PluginHost) {
    for dock in docks() {
        host.add_dock_widget(dock);
    }
    host.create_action(ActionRegistration {
        id: EXTENSION_ID.to_string(),
        text: EXTENSION_NAME.to_string(),
        menu_location: "tools".to_string(),
    });
    host.create_action(ActionRegistration {
        id: action_id("about"),
        text: "About".to_string(),
        menu_location: menu_location(),
    });
    tracing::debug!("Registered {} {}", EXTENSION_NAME, EXTENSION_VERSION);
}

pub fn about_text(host_version: &str) -> String {
    format!(
        "{} version: {}\nTarget: {}-{}\nHost version: {}",
        EXTENSION_NAME,
        EXTENSION_VERSION,
        std::env::consts::ARCH,
        std::env::consts::OS,
        host_version
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CanvasHost;

    #[test]
    fn registers_docks_and_about_action() {
        let mut host = CanvasHost::new();
        register(&mut host);

        let ids: Vec<_> = host.docks.iter().map(|d| (d.id, d.area)).collect();
        assert_eq!(
            ids,
            [("image_generation", DockArea::Left), ("segmentation_palette", DockArea::Right)]
        );
        let about = host.actions.iter().find(|a| a.text == "About").unwrap();
        assert_eq!(about.id, "arcane_illusion_about");
        assert_eq!(about.menu_location, "tools/arcane_illusion");
    }

    #[test]
    fn about_mentions_versions() {
        let text = about_text("5.2.1");
        assert!(text.starts_with("Arcane Illusion version: "));
        assert!(text.contains(EXTENSION_VERSION));
        assert!(text.ends_with("Host version: 5.2.1"));
    }
}
