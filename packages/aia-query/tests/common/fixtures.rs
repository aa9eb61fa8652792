//! Project fixtures built through the public API
//!
//! Component types come from a small descriptor document in the
//! `simple_components.json` shape; blocks use the standard catalog.

use aia_query::prelude::*;
use std::sync::Arc;

/// Descriptor document for the designer types the fixtures use.
pub const DESCRIPTOR_JSON: &str = r#"[
  {
    "name": "Form", "type": "com.google.appinventor.components.runtime.Form",
    "categoryString": "LAYOUT", "version": "31",
    "properties": [
      {"name": "Title", "editorType": "string", "defaultValue": "Screen1"},
      {"name": "AppName", "editorType": "string"}
    ],
    "events": [{"name": "Initialize", "params": []}]
  },
  {
    "name": "HorizontalArrangement", "type": "com.google.appinventor.components.runtime.HorizontalArrangement",
    "categoryString": "LAYOUT", "version": "4",
    "properties": [{"name": "Width", "defaultValue": "-1"}]
  },
  {
    "name": "Button", "type": "com.google.appinventor.components.runtime.Button",
    "categoryString": "USERINTERFACE", "version": "7",
    "helpString": "Button with the ability to detect clicks.", "iconName": "images/button.png",
    "properties": [
      {"name": "Text", "defaultValue": "Text for Button"},
      {"name": "FontSize", "defaultValue": "14.0"}
    ],
    "events": [
      {"name": "Click", "params": []},
      {"name": "LongClick", "params": []}
    ]
  },
  {
    "name": "Label", "type": "com.google.appinventor.components.runtime.Label",
    "categoryString": "USERINTERFACE", "version": "5",
    "properties": [
      {"name": "Text", "defaultValue": ""},
      {"name": "FontSize", "defaultValue": "14.0"}
    ]
  },
  {
    "name": "Notifier", "type": "com.google.appinventor.components.runtime.Notifier",
    "categoryString": "USERINTERFACE", "nonVisible": "true", "version": "6",
    "methods": [
      {"name": "ShowAlert", "params": [{"name": "notice", "type": "text"}]},
      {"name": "LogError", "params": [{"name": "message", "type": "text"}], "returnType": "boolean"}
    ]
  },
  {
    "name": "BluetoothClient", "type": "edu.mit.appinventor.ble.BluetoothLE",
    "categoryString": "CONNECTIVITY", "external": "true", "nonVisible": "true", "version": "2",
    "showOnPalette": "false"
  }
]"#;

/// Component and block catalogs shared by every fixture project.
pub struct Catalogs {
    pub components: Arc<ComponentCatalog>,
    pub blocks: Arc<BlockCatalog>,
}

impl Catalogs {
    pub fn load() -> Self {
        Self {
            components: Arc::new(
                ComponentCatalog::from_descriptor_json(DESCRIPTOR_JSON).expect("descriptor json"),
            ),
            blocks: Arc::new(BlockCatalog::standard()),
        }
    }

    pub fn component(&self, name: &str) -> Arc<ComponentType> {
        self.components.get(name).expect("component type")
    }

    pub fn block(&self, name: &str) -> Arc<BlockType> {
        self.blocks.get(name).expect("block type")
    }

    pub fn form(&self, screen: &str) -> ComponentDef {
        ComponentDef::new(screen, self.component("Form"))
    }

    pub fn event(&self, id: &str, ty: &str, instance: &str, event: &str) -> BlockDef {
        BlockDef::new(id, self.block("component_event"))
            .mutation("component_type", ty)
            .mutation("instance_name", instance)
            .mutation("event_name", event)
            .mutation("is_generic", "false")
    }

    pub fn setter(&self, id: &str, ty: &str, instance: &str, property: &str) -> BlockDef {
        BlockDef::new(id, self.block("component_set_get"))
            .mutation("component_type", ty)
            .mutation("instance_name", instance)
            .mutation("property_name", property)
            .mutation("set_or_get", "set")
            .mutation("is_generic", "false")
    }

    pub fn method(&self, id: &str, ty: &str, instance: &str, method: &str) -> BlockDef {
        BlockDef::new(id, self.block("component_method"))
            .mutation("component_type", ty)
            .mutation("instance_name", instance)
            .mutation("method_name", method)
            .mutation("is_generic", "false")
    }

    pub fn procedure(&self, id: &str, name: &str) -> BlockDef {
        BlockDef::new(id, self.block("procedures_defnoreturn")).field("NAME", name)
    }

    pub fn call(&self, id: &str, procedure: &str) -> BlockDef {
        BlockDef::new(id, self.block("procedures_callnoreturn")).field("PROCNAME", procedure)
    }

    pub fn number(&self, id: &str, n: i64) -> BlockDef {
        BlockDef::new(id, self.block("math_number")).field("NUM", n.to_string())
    }

    pub fn project(&self, name: &str, screens: Vec<Screen>) -> Project {
        screens
            .into_iter()
            .try_fold(
                ProjectBuilder::new(name, Arc::clone(&self.components), Arc::clone(&self.blocks)),
                |builder, screen| builder.screen(screen),
            )
            .and_then(ProjectBuilder::build)
            .expect("fixture project")
    }
}

/// Screen1 form → HorizontalArrangement1 → Button1
pub fn nested_button_project() -> Project {
    let c = Catalogs::load();
    let mut screen = ScreenBuilder::new("Screen1", c.form("Screen1"));
    screen
        .add_component(
            "Screen1",
            ComponentDef::new("HorizontalArrangement1", c.component("HorizontalArrangement")),
        )
        .unwrap()
        .add_component("HorizontalArrangement1", ComponentDef::new("Button1", c.component("Button")))
        .unwrap();
    c.project("Nested", vec![screen.build().unwrap()])
}

/// Two Click handlers and one LongClick handler on one screen.
pub fn event_handlers_project() -> Project {
    let c = Catalogs::load();
    let mut screen = ScreenBuilder::new("Screen1", c.form("Screen1"));
    screen
        .add_component("Screen1", ComponentDef::new("Button1", c.component("Button")))
        .unwrap()
        .add_component("Screen1", ComponentDef::new("Button2", c.component("Button")))
        .unwrap();
    screen
        .add_block(None, c.event("e1", "Button", "Button1", "Click"))
        .unwrap()
        .add_block(None, c.event("e2", "Button", "Button2", "Click"))
        .unwrap()
        .add_block(None, c.event("e3", "Button", "Button1", "LongClick"))
        .unwrap();
    c.project("Handlers", vec![screen.build().unwrap()])
}

/// Two-screen app with procedures, mutated blocks and an extension.
///
/// ```text
/// Main
///   Main (Form)
///     Toolbar (HorizontalArrangement)
///       Start (Button)
///       Stop (Button)
///     Status (Label)
///     Alerts (Notifier)
///     Ble (BluetoothClient)
///   m1  Start.Click
///     m2  controls_if [else]
///       m3  call refresh
///       m4  set Status.Text
///         m5  text
///   m6  Stop.Click
///     m7  call refresh
///   m8  to refresh
///     m9  call Alerts.ShowAlert
///       m10 text
///   m11 Main.Initialize (disabled)
///     m12 call refresh
/// Settings
///   Settings (Form)
///     Back (Button)
///   s1  Back.Click
///     s2  controls_if [elseif, elseif, else]
///   s3  call refresh
/// ```
pub fn app_project() -> Project {
    let c = Catalogs::load();

    let mut main = ScreenBuilder::new("Main", c.form("Main").property("Title", "Remote"));
    main.add_component(
        "Main",
        ComponentDef::new("Toolbar", c.component("HorizontalArrangement")),
    )
    .unwrap()
    .add_component(
        "Toolbar",
        ComponentDef::new("Start", c.component("Button")).property("Text", "Start"),
    )
    .unwrap()
    .add_component("Toolbar", ComponentDef::new("Stop", c.component("Button")))
    .unwrap()
    .add_component("Main", ComponentDef::new("Status", c.component("Label")))
    .unwrap()
    .add_component("Main", ComponentDef::new("Alerts", c.component("Notifier")))
    .unwrap()
    .add_component("Main", ComponentDef::new("Ble", c.component("BluetoothClient")))
    .unwrap();

    main.add_block(None, c.event("m1", "Button", "Start", "Click"))
        .unwrap()
        .add_block(Some("m1"), BlockDef::new("m2", c.block("controls_if")).mutator("else"))
        .unwrap()
        .add_block(Some("m2"), c.call("m3", "refresh"))
        .unwrap()
        .add_block(Some("m2"), c.setter("m4", "Label", "Status", "Text"))
        .unwrap()
        .add_block(Some("m4"), BlockDef::new("m5", c.block("text")).field("TEXT", "started"))
        .unwrap()
        .add_block(None, c.event("m6", "Button", "Stop", "Click"))
        .unwrap()
        .add_block(Some("m6"), c.call("m7", "refresh"))
        .unwrap()
        .add_block(None, c.procedure("m8", "refresh"))
        .unwrap()
        .add_block(
            Some("m8"),
            BlockDef::new("m9", c.block("component_method"))
                .mutation("component_type", "Notifier")
                .mutation("instance_name", "Alerts")
                .mutation("method_name", "ShowAlert")
                .mutation("is_generic", "false"),
        )
        .unwrap()
        .add_block(Some("m9"), BlockDef::new("m10", c.block("text")).field("TEXT", "refreshed"))
        .unwrap()
        .add_block(None, c.event("m11", "Form", "Main", "Initialize").disabled(true))
        .unwrap()
        .add_block(Some("m11"), c.call("m12", "refresh"))
        .unwrap();

    let mut settings = ScreenBuilder::new("Settings", c.form("Settings"));
    settings
        .add_component("Settings", ComponentDef::new("Back", c.component("Button")))
        .unwrap();
    settings
        .add_block(None, c.event("s1", "Button", "Back", "Click"))
        .unwrap()
        .add_block(
            Some("s1"),
            BlockDef::new("s2", c.block("controls_if"))
                .mutator("elseif")
                .mutator("elseif")
                .mutator("else"),
        )
        .unwrap()
        .add_block(None, c.call("s3", "refresh"))
        .unwrap();

    c.project("Remote", vec![main.build().unwrap(), settings.build().unwrap()])
}

/// `screens` screens, each with `buttons` buttons in one arrangement and a
/// Click handler per button whose body is a chain of `chain` numbers.
pub fn generated_project(screens: usize, buttons: usize, chain: usize) -> Project {
    let c = Catalogs::load();
    let built = (0..screens)
        .map(|s| {
            let screen_name = format!("Screen{}", s + 1);
            let mut screen = ScreenBuilder::new(screen_name.clone(), c.form(&screen_name));
            screen
                .add_component(
                    &screen_name,
                    ComponentDef::new("Row", c.component("HorizontalArrangement")),
                )
                .unwrap();
            for b in 0..buttons {
                let button = format!("Button{b}");
                screen
                    .add_component("Row", ComponentDef::new(button.clone(), c.component("Button")))
                    .unwrap();
                let handler = format!("h{b}");
                screen
                    .add_block(None, c.event(&handler, "Button", &button, "Click"))
                    .unwrap();
                let mut parent = handler;
                for n in 0..chain {
                    let id = format!("h{b}_{n}");
                    screen
                        .add_block(Some(parent.as_str()), c.setter(&id, "Button", &button, "Text"))
                        .unwrap();
                    parent = id;
                }
            }
            screen.build().unwrap()
        })
        .collect();
    c.project("Generated", built)
}
