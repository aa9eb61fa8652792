// Infrastructure: AttributeResolver - (entity kind × attribute) dispatch
//
// One table maps every supported (kind, attribute) pair to a resolver
// function. A pair missing from the table is UnsupportedAttribute; there is
// no fallback to null or zero. The table is enumerable through
// `supported_attributes`.

use super::traversal;
use crate::errors::{QueryError, Result};
use crate::features::catalog::BlockKind;
use crate::features::entity_model::{Block, Component, EntityKind, EntityRef, Project};
use crate::features::query_engine::domain::{Attribute, AttributeSlot, Value};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// What resolver functions may consult beyond the entity itself
pub trait ResolverEnv<'p> {
    fn project(&self) -> &'p Project;

    /// Referring blocks, honouring the configured caller scope.
    fn callers(&self, entity: EntityRef<'p>) -> Result<Vec<EntityRef<'p>>>;

    fn depth(&self, entity: EntityRef<'p>) -> usize {
        traversal::depth(entity)
    }
}

type Handler = for<'p> fn(&dyn ResolverEnv<'p>, EntityRef<'p>, &Attribute) -> Result<Value>;

static DISPATCH: Lazy<FxHashMap<(EntityKind, AttributeSlot), Handler>> = Lazy::new(|| {
    use AttributeSlot as S;
    use EntityKind::{Block as B, Component as C, Screen as Scr};

    let mut table: FxHashMap<(EntityKind, AttributeSlot), Handler> = FxHashMap::default();
    let mut add = |kinds: &[EntityKind], slot: AttributeSlot, handler: Handler| {
        for kind in kinds {
            table.insert((*kind, slot), handler);
        }
    };

    // Structure, shared by every kind
    add(&[Scr, C, B], S::Type, resolve_type);
    add(&[Scr, C, B], S::Id, resolve_id);
    add(&[Scr, C, B], S::Depth, resolve_depth);
    add(&[Scr, C, B], S::Length, resolve_length);
    add(&[Scr, C, B], S::Children, resolve_children);
    add(&[Scr, C, B], S::Level, resolve_level);
    add(&[Scr, C, B], S::Leaf, resolve_leaf);
    add(&[Scr, C], S::Name, resolve_name);
    add(&[C, B], S::Callers, resolve_callers);
    add(&[C, B], S::Category, resolve_category);

    // Components
    add(&[C], S::External, resolve_external);
    add(&[C], S::Visible, resolve_visible);
    add(&[C], S::Version, resolve_version);
    add(&[C], S::Property, resolve_property);
    add(&[C], S::HelpString, resolve_help_string);
    add(&[C], S::ShowOnPalette, resolve_show_on_palette);
    add(&[C], S::IconName, resolve_icon_name);

    // Blocks
    add(&[B], S::Mutators, resolve_mutators);
    add(&[B], S::TopLevel, resolve_top_level);
    add(&[B], S::Kind, resolve_kind);
    add(&[B], S::Disabled, resolve_disabled);
    add(&[B], S::LogicallyDisabled, resolve_logically_disabled);
    add(&[B], S::Generic, resolve_generic);
    add(&[B], S::Field, resolve_field);
    add(&[B], S::Mutation, resolve_mutation);
    add(&[B], S::ReturnType, resolve_return_type);
    add(&[B], S::RootBlock, resolve_root_block);

    table
});

/// Attribute resolver - stateless entry point to the dispatch table
pub struct AttributeResolver;

impl AttributeResolver {
    pub fn resolve<'p>(
        env: &dyn ResolverEnv<'p>,
        entity: EntityRef<'p>,
        attribute: &Attribute,
    ) -> Result<Value> {
        let handler = DISPATCH
            .get(&(entity.kind(), attribute.slot()))
            .ok_or_else(|| unsupported(entity, attribute))?;
        handler(env, entity, attribute)
    }

    pub fn supports(kind: EntityKind, slot: AttributeSlot) -> bool {
        DISPATCH.contains_key(&(kind, slot))
    }

    /// Attributes defined for `kind`, in declaration order.
    pub fn supported_attributes(kind: EntityKind) -> Vec<AttributeSlot> {
        let mut slots: Vec<AttributeSlot> = DISPATCH
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, slot)| *slot)
            .collect();
        slots.sort();
        slots
    }
}

fn unsupported(entity: EntityRef<'_>, attribute: &Attribute) -> QueryError {
    QueryError::unsupported(attribute, entity.kind())
}

fn component<'p>(entity: EntityRef<'p>, attribute: &Attribute) -> Result<&'p Component> {
    entity.as_component().ok_or_else(|| unsupported(entity, attribute))
}

fn block<'p>(entity: EntityRef<'p>, attribute: &Attribute) -> Result<&'p Block> {
    entity.as_block().ok_or_else(|| unsupported(entity, attribute))
}

// ============================================================================
// Shared attributes
// ============================================================================

fn resolve_type<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    match entity {
        EntityRef::Screen(screen) => Ok(Value::from(screen.root_component()?.component_type())),
        EntityRef::Component { component, .. } => Ok(Value::from(component.component_type())),
        EntityRef::Block { block, .. } => Ok(Value::from(block.block_type())),
    }
}

fn resolve_id<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    match entity {
        EntityRef::Component { component, .. } => Ok(Value::from(component.uuid())),
        other => Ok(Value::from(other.id())),
    }
}

fn resolve_name<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    match entity {
        EntityRef::Screen(screen) => Ok(Value::from(screen.name())),
        EntityRef::Component { component, .. } => Ok(Value::from(component.name())),
        EntityRef::Block { .. } => Err(unsupported(entity, attribute)),
    }
}

fn resolve_depth<'p>(env: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::from(env.depth(entity)))
}

fn resolve_length<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::from(entity.child_count()))
}

fn resolve_children<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::List(
        entity
            .children()
            .iter()
            .map(|child| Value::Entity(child.key()))
            .collect(),
    ))
}

fn resolve_level<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::from(entity.ancestors().count()))
}

fn resolve_leaf<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::Bool(entity.child_count() == 0))
}

fn resolve_callers<'p>(env: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, _: &Attribute) -> Result<Value> {
    Ok(Value::from(env.callers(entity)?.len()))
}

fn resolve_category<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    match entity {
        EntityRef::Component { component, .. } => {
            Ok(Value::from(component.component_type().category.as_str()))
        }
        EntityRef::Block { block, .. } => Ok(Value::from(block.block_type().category.as_str())),
        EntityRef::Screen(_) => Err(unsupported(entity, attribute)),
    }
}

// ============================================================================
// Component attributes
// ============================================================================

fn resolve_external<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Bool(component(entity, attribute)?.component_type().external))
}

fn resolve_visible<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Bool(component(entity, attribute)?.component_type().visible))
}

fn resolve_version<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Int(i64::from(component(entity, attribute)?.component_type().version)))
}

fn resolve_help_string<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::from(component(entity, attribute)?.component_type().help.as_str()))
}

fn resolve_show_on_palette<'p>(
    _: &dyn ResolverEnv<'p>,
    entity: EntityRef<'p>,
    attribute: &Attribute,
) -> Result<Value> {
    Ok(Value::Bool(component(entity, attribute)?.component_type().show_on_palette))
}

fn resolve_icon_name<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(component(entity, attribute)?
        .component_type()
        .icon_name
        .as_deref()
        .map_or(Value::Null, Value::from))
}

/// Instance value, then catalog default; a declared property without a
/// default resolves to Null.
fn resolve_property<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    let component = component(entity, attribute)?;
    let Attribute::Property(name) = attribute else {
        return Err(unsupported(entity, attribute));
    };
    match component.property(name) {
        Some(value) => Ok(Value::from(value)),
        None if component.component_type().property(name).is_some() => Ok(Value::Null),
        None => Err(unsupported(entity, attribute)),
    }
}

// ============================================================================
// Block attributes
// ============================================================================

fn resolve_mutators<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::List(
        block(entity, attribute)?
            .mutators()
            .iter()
            .map(|tag| Value::from(tag.as_str()))
            .collect(),
    ))
}

fn resolve_top_level<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Bool(block(entity, attribute)?.is_top_level()))
}

fn resolve_kind<'p>(env: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    let block = block(entity, attribute)?;
    let kind = match block.block_type().kind {
        BlockKind::Mutation => mutation_dependent_kind(env.project(), entity, block)?,
        fixed => fixed,
    };
    Ok(Value::from(kind.as_str()))
}

/// Getters are values; methods are values when the catalog declares a
/// return type.
fn mutation_dependent_kind(project: &Project, entity: EntityRef<'_>, block: &Block) -> Result<BlockKind> {
    match block.block_type().name.as_str() {
        "component_set_get" => Ok(match block.mutation("set_or_get") {
            Some("get") => BlockKind::Value,
            _ => BlockKind::Statement,
        }),
        "component_method" => Ok(if method_return_type(project, entity, block)?.is_some() {
            BlockKind::Value
        } else {
            BlockKind::Statement
        }),
        _ => Ok(BlockKind::Statement),
    }
}

/// Catalog return type of the method a `component_method` block calls.
fn method_return_type(project: &Project, entity: EntityRef<'_>, block: &Block) -> Result<Option<String>> {
    let component_type = match block.mutation("component_type") {
        Some(name) => project.component_type(name)?,
        None => {
            let name = block
                .component_name()
                .ok_or_else(|| QueryError::not_found("component", entity.key().to_string()))?;
            entity.screen().component(name)?.component_type().clone()
        }
    };
    let method_name = block.mutation("method_name").unwrap_or_default();
    let method = component_type.method(method_name).ok_or_else(|| {
        QueryError::not_found("method", format!("{}.{}", component_type.name, method_name))
    })?;
    Ok(method.return_type.clone())
}

fn resolve_return_type<'p>(env: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    let block = block(entity, attribute)?;
    if block.block_type().name != "component_method" {
        return Err(unsupported(entity, attribute));
    }
    Ok(method_return_type(env.project(), entity, block)?.map_or(Value::Null, Value::from))
}

fn resolve_root_block<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    block(entity, attribute)?;
    let root = entity.ancestors().last().unwrap_or(entity);
    Ok(Value::Entity(root.key()))
}

fn resolve_disabled<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Bool(block(entity, attribute)?.is_disabled()))
}

fn resolve_logically_disabled<'p>(
    _: &dyn ResolverEnv<'p>,
    entity: EntityRef<'p>,
    attribute: &Attribute,
) -> Result<Value> {
    let own = block(entity, attribute)?.is_disabled();
    let inherited = entity
        .ancestors()
        .filter_map(|ancestor| ancestor.as_block())
        .any(Block::is_disabled);
    Ok(Value::Bool(own || inherited))
}

fn resolve_generic<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    Ok(Value::Bool(block(entity, attribute)?.is_generic()))
}

fn resolve_field<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    let block = block(entity, attribute)?;
    match attribute {
        Attribute::Field(name) => block
            .field(name)
            .map(Value::from)
            .ok_or_else(|| unsupported(entity, attribute)),
        _ => Err(unsupported(entity, attribute)),
    }
}

fn resolve_mutation<'p>(_: &dyn ResolverEnv<'p>, entity: EntityRef<'p>, attribute: &Attribute) -> Result<Value> {
    let block = block(entity, attribute)?;
    match attribute {
        Attribute::Mutation(key) => block
            .mutation(key)
            .map(Value::from)
            .ok_or_else(|| unsupported(entity, attribute)),
        _ => Err(unsupported(entity, attribute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CallerScope;
    use crate::features::entity_model::fixtures::{sample_project, Types};
    use crate::features::entity_model::{BlockDef, ComponentDef, ProjectBuilder, ScreenBuilder};
    use crate::features::query_engine::infrastructure::CallerIndex;
    use std::sync::Arc;

    struct Env<'p> {
        project: &'p Project,
        index: CallerIndex<'p>,
    }

    impl<'p> Env<'p> {
        fn new(project: &'p Project) -> Self {
            Self {
                project,
                index: CallerIndex::build(project),
            }
        }

        fn get(&self, entity: EntityRef<'p>, name: &str) -> Result<Value> {
            AttributeResolver::resolve(self, entity, &Attribute::parse(name)?)
        }
    }

    impl<'p> ResolverEnv<'p> for Env<'p> {
        fn project(&self) -> &'p Project {
            self.project
        }

        fn callers(&self, entity: EntityRef<'p>) -> Result<Vec<EntityRef<'p>>> {
            self.index.callers_of(entity, CallerScope::Screen)
        }
    }

    #[test]
    fn test_type_compares_by_identity() {
        let project = sample_project();
        let env = Env::new(&project);
        let button_type = project.component_type("Button").unwrap();
        let ty = env.get(project.component("Button1").unwrap(), "type").unwrap();
        assert_eq!(ty, Value::from(&button_type));
        assert!(ty.loose_eq(&Value::from("Button")));

        let screen = project.screen("Screen1").unwrap().as_entity();
        assert!(env.get(screen, "type").unwrap().loose_eq(&Value::from("Form")));
    }

    #[test]
    fn test_structural_attributes() {
        let project = sample_project();
        let env = Env::new(&project);
        let arrangement = project.component("HorizontalArrangement1").unwrap();

        assert_eq!(env.get(arrangement, "depth").unwrap(), Value::Int(2));
        assert_eq!(env.get(arrangement, "length").unwrap(), Value::Int(2));
        assert_eq!(env.get(arrangement, "level").unwrap(), Value::Int(1));
        assert_eq!(env.get(arrangement, "leaf").unwrap(), Value::Bool(false));
        match env.get(arrangement, "children").unwrap() {
            Value::List(items) => assert_eq!(items.len(), 2),
            other => panic!("unexpected {other}"),
        }

        let screen = project.screen("Screen1").unwrap().as_entity();
        assert_eq!(env.get(screen, "depth").unwrap(), Value::Int(4));
        assert_eq!(env.get(screen, "level").unwrap(), Value::Int(0));
        assert_eq!(env.get(screen, "length").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_name_is_unsupported_on_blocks() {
        let project = sample_project();
        let env = Env::new(&project);
        let err = env.get(project.block("b1").unwrap(), "name").unwrap_err();
        assert!(err.is_unsupported_attribute());
        assert!(env.get(project.component("Button1").unwrap(), "mutators").is_err());
        assert!(env.get(project.screen("Screen1").unwrap().as_entity(), "callers").is_err());
    }

    #[test]
    fn test_block_attributes() {
        let project = sample_project();
        let env = Env::new(&project);
        let controls_if = project.block("b2").unwrap();

        assert_eq!(
            env.get(controls_if, "mutators").unwrap(),
            Value::from(vec![Value::from("elseif"), Value::from("else")])
        );
        assert_eq!(env.get(controls_if, "top_level").unwrap(), Value::Bool(false));
        assert_eq!(env.get(controls_if, "category").unwrap(), Value::from("Control"));
        assert_eq!(env.get(controls_if, "kind").unwrap(), Value::from("statement"));
        assert_eq!(
            env.get(project.block("b4").unwrap(), "mutators").unwrap(),
            Value::List(vec![])
        );
        assert_eq!(
            env.get(project.block("b1").unwrap(), "event_name").unwrap(),
            Value::from("Click")
        );
        assert_eq!(
            env.get(project.block("b5").unwrap(), "field.PROCNAME").unwrap(),
            Value::from("greet")
        );
        assert!(env.get(project.block("b5").unwrap(), "field.NAME").is_err());
    }

    #[test]
    fn test_callers() {
        let project = sample_project();
        let env = Env::new(&project);
        assert_eq!(env.get(project.block("b8").unwrap(), "callers").unwrap(), Value::Int(2));
        assert_eq!(env.get(project.block("b11").unwrap(), "callers").unwrap(), Value::Int(1));
        assert_eq!(
            env.get(project.component("Screen1/Label1").unwrap(), "callers").unwrap(),
            Value::Int(1)
        );
        assert!(env.get(project.block("b1").unwrap(), "callers").is_err());
    }

    #[test]
    fn test_logically_disabled_inherits() {
        let project = sample_project();
        let env = Env::new(&project);
        let call = project.block("b14").unwrap();
        assert_eq!(env.get(call, "disabled").unwrap(), Value::Bool(false));
        assert_eq!(env.get(call, "logically_disabled").unwrap(), Value::Bool(true));
        assert_eq!(
            env.get(project.block("b5").unwrap(), "logically_disabled").unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_property_defaults() {
        let project = sample_project();
        let env = Env::new(&project);
        let button1 = project.component("Button1").unwrap();
        let button2 = project.component("Button2").unwrap();

        assert_eq!(env.get(button1, "property.Text").unwrap(), Value::from("Go"));
        assert_eq!(env.get(button2, "property.Text").unwrap(), Value::from("Text for Button"));
        assert!(env.get(button1, "property.Title").unwrap_err().is_unsupported_attribute());

        let form = project.component("Screen2/Screen2").unwrap();
        assert_eq!(env.get(form, "property.Title").unwrap(), Value::Null);
    }

    #[test]
    fn test_component_metadata() {
        let project = sample_project();
        let env = Env::new(&project);
        let notifier = project.component("Notifier1").unwrap();
        assert_eq!(env.get(notifier, "visible").unwrap(), Value::Bool(false));
        assert_eq!(env.get(notifier, "external").unwrap(), Value::Bool(false));
        assert_eq!(
            env.get(project.component("Button1").unwrap(), "version").unwrap(),
            Value::Int(7)
        );
        assert_eq!(env.get(notifier, "category").unwrap(), Value::from("USERINTERFACE"));
    }

    #[test]
    fn test_mutation_dependent_kind() {
        let t = Types::new();
        let mut screen = ScreenBuilder::new("Screen1", ComponentDef::new("Screen1", Arc::clone(&t.form)));
        screen
            .add_component("Screen1", ComponentDef::new("Notifier1", Arc::clone(&t.notifier)))
            .unwrap();
        let method = |id: &str, name: &str| {
            BlockDef::new(id, t.block("component_method"))
                .mutation("component_type", "Notifier")
                .mutation("instance_name", "Notifier1")
                .mutation("method_name", name)
        };
        screen
            .add_block(None, method("m1", "ShowAlert"))
            .unwrap()
            .add_block(None, method("m2", "LogError"))
            .unwrap()
            .add_block(None, method("m3", "Vibrate"))
            .unwrap()
            .add_block(
                None,
                BlockDef::new("g1", t.block("component_set_get"))
                    .mutation("component_type", "Notifier")
                    .mutation("instance_name", "Notifier1")
                    .mutation("property_name", "BackgroundColor")
                    .mutation("set_or_get", "get"),
            )
            .unwrap();
        let project = ProjectBuilder::new("P", t.components(), t.blocks())
            .screen(screen.build().unwrap())
            .unwrap()
            .build()
            .unwrap();
        let env = Env::new(&project);

        assert_eq!(env.get(project.block("m1").unwrap(), "kind").unwrap(), Value::from("statement"));
        assert_eq!(env.get(project.block("m2").unwrap(), "kind").unwrap(), Value::from("value"));
        assert!(matches!(
            env.get(project.block("m3").unwrap(), "kind"),
            Err(QueryError::NotFound { what: "method", .. })
        ));
        assert_eq!(env.get(project.block("g1").unwrap(), "kind").unwrap(), Value::from("value"));
    }

    #[test]
    fn test_supported_attributes_enumerable() {
        let screen = AttributeResolver::supported_attributes(EntityKind::Screen);
        assert!(screen.contains(&AttributeSlot::Depth));
        assert!(!screen.contains(&AttributeSlot::Callers));

        let block = AttributeResolver::supported_attributes(EntityKind::Block);
        assert!(block.contains(&AttributeSlot::Mutators));
        assert!(!block.contains(&AttributeSlot::Name));
        assert!(AttributeResolver::supports(EntityKind::Component, AttributeSlot::Property));
    }
}
