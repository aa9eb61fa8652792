// Shared in-crate test project
//
// Screen1
//   Screen1 (Form)
//     HorizontalArrangement1
//       Button1
//       Button2
//     Button3
//     Label1
//     Notifier1
//   b1  Button1.Click
//     b2  controls_if [elseif, else]
//       b3  set Label1.Text
//         b4  text
//       b5  call greet
//   b6  Button2.LongClick
//     b7  call Notifier1.ShowAlert
//   b8  to greet
//     b9  set global counter
//       b10 number
//   b11 global counter
//     b12 number
//   b13 Button3.Click (disabled)
//     b14 call greet
// Screen2
//   Screen2 (Form)
//     Label2
//   c1  Screen2.Initialize
//     c2  set Label2.Text
//       c3  text
//   c4  call greet

use super::builder::{BlockDef, ComponentDef, ProjectBuilder, ScreenBuilder};
use super::project::Project;
use crate::features::catalog::{
    BlockCatalog, BlockType, ComponentCatalog, ComponentType, EventDecl, MethodDecl, Parameter,
    PropertyDecl,
};
use std::sync::Arc;

pub(crate) struct Types {
    components: Arc<ComponentCatalog>,
    blocks: Arc<BlockCatalog>,
    pub form: Arc<ComponentType>,
    pub arrangement: Arc<ComponentType>,
    pub button: Arc<ComponentType>,
    pub label: Arc<ComponentType>,
    pub notifier: Arc<ComponentType>,
}

impl Types {
    pub fn new() -> Self {
        let mut catalog = ComponentCatalog::new();
        let form = catalog
            .register(
                ComponentType::new("Form", "x.Form")
                    .with_category("LAYOUT")
                    .with_property(PropertyDecl::new("Title"))
                    .with_property(PropertyDecl::new("AppName"))
                    .with_event(EventDecl::new("Initialize")),
            )
            .unwrap();
        let arrangement = catalog
            .register(
                ComponentType::new("HorizontalArrangement", "x.HorizontalArrangement")
                    .with_category("LAYOUT")
                    .with_property(PropertyDecl::new("Width").with_default("-1")),
            )
            .unwrap();
        let button = catalog
            .register(
                ComponentType::new("Button", "x.Button")
                    .with_category("USERINTERFACE")
                    .with_version(7)
                    .with_property(PropertyDecl::new("Text").with_default("Text for Button"))
                    .with_property(PropertyDecl::new("FontSize").with_default("14.0"))
                    .with_event(EventDecl::new("Click"))
                    .with_event(EventDecl::new("LongClick")),
            )
            .unwrap();
        let label = catalog
            .register(
                ComponentType::new("Label", "x.Label")
                    .with_category("USERINTERFACE")
                    .with_property(PropertyDecl::new("Text").with_default(""))
                    .with_property(PropertyDecl::new("FontSize").with_default("14.0")),
            )
            .unwrap();
        let notifier = catalog
            .register(
                ComponentType::new("Notifier", "x.Notifier")
                    .with_category("USERINTERFACE")
                    .with_visible(false)
                    .with_method(
                        MethodDecl::new("ShowAlert").param(Parameter::new("notice", "text")),
                    )
                    .with_method(MethodDecl::new("LogError").returning("boolean")),
            )
            .unwrap();

        Self {
            components: Arc::new(catalog),
            blocks: Arc::new(BlockCatalog::standard()),
            form,
            arrangement,
            button,
            label,
            notifier,
        }
    }

    pub fn components(&self) -> Arc<ComponentCatalog> {
        Arc::clone(&self.components)
    }

    pub fn blocks(&self) -> Arc<BlockCatalog> {
        Arc::clone(&self.blocks)
    }

    pub fn block(&self, name: &str) -> Arc<BlockType> {
        self.blocks.get(name).unwrap()
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

    pub fn call(&self, id: &str, procedure: &str) -> BlockDef {
        BlockDef::new(id, self.block("procedures_callnoreturn")).field("PROCNAME", procedure)
    }
}

pub(crate) fn sample_project() -> Project {
    let t = Types::new();

    let mut s1 = ScreenBuilder::new(
        "Screen1",
        ComponentDef::new("Screen1", Arc::clone(&t.form)).property("Title", "Main"),
    );
    s1.add_component(
        "Screen1",
        ComponentDef::new("HorizontalArrangement1", Arc::clone(&t.arrangement)),
    )
    .unwrap()
    .add_component(
        "HorizontalArrangement1",
        ComponentDef::new("Button1", Arc::clone(&t.button)).property("Text", "Go"),
    )
    .unwrap()
    .add_component(
        "HorizontalArrangement1",
        ComponentDef::new("Button2", Arc::clone(&t.button)),
    )
    .unwrap()
    .add_component("Screen1", ComponentDef::new("Button3", Arc::clone(&t.button)))
    .unwrap()
    .add_component("Screen1", ComponentDef::new("Label1", Arc::clone(&t.label)))
    .unwrap()
    .add_component("Screen1", ComponentDef::new("Notifier1", Arc::clone(&t.notifier)))
    .unwrap();

    s1.add_block(None, t.event("b1", "Button", "Button1", "Click"))
        .unwrap()
        .add_block(
            Some("b1"),
            BlockDef::new("b2", t.block("controls_if"))
                .mutator("elseif")
                .mutator("else"),
        )
        .unwrap()
        .add_block(Some("b2"), t.setter("b3", "Label", "Label1", "Text"))
        .unwrap()
        .add_block(Some("b3"), BlockDef::new("b4", t.block("text")).field("TEXT", "hi"))
        .unwrap()
        .add_block(Some("b2"), t.call("b5", "greet"))
        .unwrap()
        .add_block(None, t.event("b6", "Button", "Button2", "LongClick"))
        .unwrap()
        .add_block(
            Some("b6"),
            BlockDef::new("b7", t.block("component_method"))
                .mutation("component_type", "Notifier")
                .mutation("instance_name", "Notifier1")
                .mutation("method_name", "ShowAlert")
                .mutation("is_generic", "false"),
        )
        .unwrap()
        .add_block(
            None,
            BlockDef::new("b8", t.block("procedures_defnoreturn")).field("NAME", "greet"),
        )
        .unwrap()
        .add_block(
            Some("b8"),
            BlockDef::new("b9", t.block("lexical_variable_set")).field("VAR", "global counter"),
        )
        .unwrap()
        .add_block(Some("b9"), BlockDef::new("b10", t.block("math_number")).field("NUM", "1"))
        .unwrap()
        .add_block(
            None,
            BlockDef::new("b11", t.block("global_declaration")).field("NAME", "counter"),
        )
        .unwrap()
        .add_block(Some("b11"), BlockDef::new("b12", t.block("math_number")).field("NUM", "0"))
        .unwrap()
        .add_block(None, t.event("b13", "Button", "Button3", "Click").disabled(true))
        .unwrap()
        .add_block(Some("b13"), t.call("b14", "greet"))
        .unwrap();

    let mut s2 = ScreenBuilder::new("Screen2", ComponentDef::new("Screen2", Arc::clone(&t.form)));
    s2.add_component("Screen2", ComponentDef::new("Label2", Arc::clone(&t.label)))
        .unwrap();
    s2.add_block(None, t.event("c1", "Form", "Screen2", "Initialize"))
        .unwrap()
        .add_block(Some("c1"), t.setter("c2", "Label", "Label2", "Text"))
        .unwrap()
        .add_block(Some("c2"), BlockDef::new("c3", t.block("text")).field("TEXT", "two"))
        .unwrap()
        .add_block(None, t.call("c4", "greet"))
        .unwrap();

    ProjectBuilder::new("Sample", t.components(), t.blocks())
        .property("AppName", "Sample")
        .screen(s1.build().unwrap())
        .unwrap()
        .screen(s2.build().unwrap())
        .unwrap()
        .build()
        .unwrap()
}
