//! Layout benchmarks.

use aether_core::{Constraints, ElementId, Fixed, Orientation, Size, Unit};
use aether_layout::{Element, ElementTree, LayoutEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Rows of cells: one vertical root, `rows` horizontal rows of `columns` leaves.
fn grid(rows: usize, columns: usize) -> (ElementTree, ElementId, ElementId) {
    let mut tree = ElementTree::new();
    let root = tree.insert(Element::container(Orientation::Vertical));
    let mut last = root;
    for _ in 0..rows {
        let row = tree.insert(Element::container(Orientation::Horizontal));
        tree.attach(root, row).expect("attach row");
        for column in 0..columns {
            let desired = if column % 3 == 0 { Unit::fill() } else { Unit::scalar(40) };
            let cell = tree.insert(Element::leaf().with_constraints(
                Constraints::new()
                    .with_minimum(Fixed::scalar(10), Fixed::scalar(10))
                    .with_desired(desired, Unit::scalar(20)),
            ));
            tree.attach(row, cell).expect("attach cell");
            last = cell;
        }
    }
    (tree, root, last)
}

fn deep_chain(depth: usize) -> (ElementTree, ElementId) {
    let mut tree = ElementTree::new();
    let root = tree.insert(Element::container(Orientation::Vertical));
    let mut parent = root;
    for level in 0..depth {
        let orientation = if level % 2 == 0 { Orientation::Horizontal } else { Orientation::Vertical };
        let child = tree.insert(Element::container(orientation));
        tree.attach(parent, child).expect("attach level");
        parent = child;
    }
    (tree, root)
}

fn pack_grid(c: &mut Criterion) {
    let (tree, root, _) = grid(50, 40);
    c.bench_function("pack_grid_cold", |b| {
        b.iter(|| LayoutEngine::new().pack(black_box(&tree), root))
    });

    let mut engine = LayoutEngine::new();
    engine.pack(&tree, root).expect("pack");
    c.bench_function("pack_grid_cached", |b| {
        b.iter(|| engine.pack(black_box(&tree), root))
    });
}

fn repack_after_edit(c: &mut Criterion) {
    let (mut tree, root, last) = grid(50, 40);
    let mut engine = LayoutEngine::new();
    engine.pack(&tree, root).expect("pack");
    c.bench_function("repack_single_edit", |b| {
        b.iter(|| {
            tree.request_repack(last).expect("repack");
            engine.pack(black_box(&tree), root)
        })
    });
}

fn layout_grid(c: &mut Criterion) {
    let (mut tree, root, _) = grid(50, 40);
    let mut engine = LayoutEngine::new();
    c.bench_function("layout_grid", |b| {
        b.iter(|| engine.layout(&mut tree, root, black_box(Size::new(1920, 1080))))
    });
}

fn layout_deep(c: &mut Criterion) {
    let (mut tree, root) = deep_chain(200);
    c.bench_function("layout_deep_chain", |b| {
        b.iter(|| LayoutEngine::new().layout(&mut tree, root, black_box(Size::new(800, 600))))
    });
}

criterion_group!(benches, pack_grid, repack_after_edit, layout_grid, layout_deep);
criterion_main!(benches);
