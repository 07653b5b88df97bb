//! Benchmarks for element building and rendering.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tagtree::{Child, Dom, EngineKind, Node, NodeType, Props, Rendered};

/// Build a list descriptor with `items` entries, each a styled link.
fn generate_list(items: usize) -> Node {
    let link = NodeType::function(|_, props| {
        Ok(Rendered::Node(
            Node::tag("a")
                .with_prop("href", props.get_str("url").unwrap_or("#").to_owned())
                .with_child(props.children()),
        ))
    });

    let children = (0..items)
        .map(|i| {
            let item = Node::new(
                link.clone(),
                Props::new().with("url", format!("/page/{i}")),
                vec![Child::from(format!("Page {i}"))],
            );
            Child::from(
                Node::tag("li")
                    .with_prop("className", "item")
                    .with_prop("style", [("fontWeight", "bold"), ("marginTop", "2px")])
                    .with_child(item),
            )
        })
        .collect();

    Node::new("ul", Props::new(), children)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_list");

    for kind in EngineKind::ALL {
        let dom = Dom::with_engine(kind).unwrap();
        for size in [10, 100, 1000] {
            let node = generate_list(size);
            group.bench_with_input(BenchmarkId::new(kind.as_str(), size), &node, |b, node| {
                b.iter(|| dom.create_element(node.clone()).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_list");

    for kind in EngineKind::ALL {
        let dom = Dom::with_engine(kind).unwrap();
        let element = dom.create_element(generate_list(1000)).unwrap();
        group.bench_function(kind.as_str(), |b| b.iter(|| dom.render(&element).unwrap()));
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
