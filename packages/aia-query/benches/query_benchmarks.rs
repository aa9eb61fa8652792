//! Performance benchmarks for the query engine
//!
//! Projects are generated in-process: `screens` screens, each with a row of
//! buttons and one Click handler per button whose body is a setter chain.
//! - Filtered selection over every block
//! - Descendant traversal from the designer roots
//! - Callers index build + lookup
//! - Grouped aggregation

use aia_query::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

const DESCRIPTOR_JSON: &str = r#"[
  {"name": "Form", "type": "x.Form", "events": [{"name": "Initialize", "params": []}]},
  {"name": "HorizontalArrangement", "type": "x.HorizontalArrangement"},
  {"name": "Button", "type": "x.Button",
   "properties": [{"name": "Text", "defaultValue": "Text for Button"}],
   "events": [{"name": "Click", "params": []}, {"name": "LongClick", "params": []}]}
]"#;

fn generate(screens: usize, buttons: usize, chain: usize) -> Project {
    let components = Arc::new(ComponentCatalog::from_descriptor_json(DESCRIPTOR_JSON).unwrap());
    let blocks = Arc::new(BlockCatalog::standard());
    let form = components.get("Form").unwrap();
    let row = components.get("HorizontalArrangement").unwrap();
    let button = components.get("Button").unwrap();
    let event = blocks.get("component_event").unwrap();
    let setter = blocks.get("component_set_get").unwrap();

    let mut builder = ProjectBuilder::new("Bench", Arc::clone(&components), Arc::clone(&blocks));
    for s in 0..screens {
        let name = format!("Screen{}", s + 1);
        let mut screen = ScreenBuilder::new(name.clone(), ComponentDef::new(name.clone(), Arc::clone(&form)));
        screen.add_component(&name, ComponentDef::new("Row", Arc::clone(&row))).unwrap();
        for b in 0..buttons {
            let instance = format!("Button{b}");
            let click = if b % 3 == 0 { "LongClick" } else { "Click" };
            screen
                .add_component("Row", ComponentDef::new(instance.clone(), Arc::clone(&button)))
                .unwrap();
            let handler = format!("h{b}");
            screen
                .add_block(
                    None,
                    BlockDef::new(handler.clone(), Arc::clone(&event))
                        .mutation("component_type", "Button")
                        .mutation("instance_name", instance.clone())
                        .mutation("event_name", click),
                )
                .unwrap();
            let mut parent = handler;
            for n in 0..chain {
                let id = format!("h{b}_{n}");
                screen
                    .add_block(
                        Some(parent.as_str()),
                        BlockDef::new(id.clone(), Arc::clone(&setter))
                            .mutation("component_type", "Button")
                            .mutation("instance_name", instance.clone())
                            .mutation("property_name", "Text")
                            .mutation("set_or_get", "set"),
                    )
                    .unwrap();
                parent = id;
            }
        }
        builder = builder.screen(screen.build().unwrap()).unwrap();
    }
    builder.build().unwrap()
}

// ============================================================================
// Selection
// ============================================================================

fn bench_filtered_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_select");

    for screens in [1, 10, 50] {
        let project = generate(screens, 20, 5);
        group.throughput(Throughput::Elements(project.block_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(screens), &project, |b, project| {
            let ctx = QueryContext::new(project);
            let filter = A::top_level().eq(true) & A::event_name().eq("Click");
            b.iter(|| black_box(ctx.blocks().select(filter.clone()).count().unwrap()));
        });
    }

    group.finish();
}

fn bench_descendants(c: &mut Criterion) {
    let project = generate(10, 20, 5);
    let ctx = QueryContext::new(&project);
    let row = project.component_type("HorizontalArrangement").unwrap();
    let button = project.component_type("Button").unwrap();

    c.bench_function("descendants_matching", |b| {
        b.iter(|| {
            let nested = ctx
                .components()
                .select(A::type_().eq(&row))
                .descendants_matching(&button)
                .count()
                .unwrap();
            black_box(nested)
        });
    });

    c.bench_function("max_block_depth", |b| {
        b.iter(|| black_box(ctx.top_level_blocks("Screen1").unwrap().max(A::depth()).unwrap()));
    });
}

// ============================================================================
// Callers
// ============================================================================

fn bench_callers(c: &mut Criterion) {
    let project = generate(10, 20, 5);

    c.bench_function("callers_index_build", |b| {
        b.iter(|| {
            let ctx = QueryContext::new(&project);
            black_box(ctx.caller_index().reference_count())
        });
    });

    let ctx = QueryContext::new(&project);
    c.bench_function("component_callers", |b| {
        b.iter(|| black_box(ctx.components().select(A::callers().gt(0)).count().unwrap()));
    });
}

// ============================================================================
// Aggregation
// ============================================================================

fn bench_grouping(c: &mut Criterion) {
    let project = generate(10, 20, 5);
    let ctx = QueryContext::new(&project);

    c.bench_function("count_by_event_name", |b| {
        b.iter(|| black_box(ctx.blocks().count_by(A::event_name()).unwrap()));
    });

    c.bench_function("aggregate_depth", |b| {
        b.iter(|| {
            let stats = ctx
                .blocks()
                .select(A::top_level().eq(true))
                .aggregate()
                .count()
                .avg(A::depth())
                .median(A::depth())
                .max(A::depth())
                .execute()
                .unwrap();
            black_box(stats)
        });
    });
}

criterion_group!(benches, bench_filtered_select, bench_descendants, bench_callers, bench_grouping);
criterion_main!(benches);
