//! Benchmarks for catalog and navigation operations.

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docsite_site::{NavigationBuilder, Page, PageCatalog, Project, Version};

/// Section names for `breadth` children.
fn section_names(breadth: usize) -> Vec<String> {
    (0..breadth).map(|i| format!("section-{i}")).collect()
}

/// Catalog of a versioned project with `depth` levels of `breadth` sections.
fn build_catalog(depth: usize, breadth: usize) -> PageCatalog {
    fn add_level(pages: &mut Vec<Page>, url: &str, depth: usize, max_depth: usize, breadth: usize) {
        let mut page = Page::new(url, format!("Level {depth}"));
        if depth < max_depth {
            page = page.with_sections(section_names(breadth));
        }
        pages.push(page);

        if depth < max_depth {
            for i in 0..breadth {
                add_level(pages, &format!("{url}section-{i}/"), depth + 1, max_depth, breadth);
            }
        }
    }

    let mut pages = Vec::new();
    add_level(&mut pages, "/gems/dry-types/1.2/", 0, depth, breadth);
    PageCatalog::from_pages(pages)
}

fn project() -> Project {
    Project::new("dry-types")
        .with_versions(vec![
            Version::Bare("1.2".to_owned()),
            Version::Bare("1.1".to_owned()),
        ])
        .with_fallback("1.2")
}

/// Write a source tree of markdown pages mirroring [`build_catalog`].
fn create_source_tree(root: &Path, depth: usize, breadth: usize) {
    fn create_level(dir: &Path, current_depth: usize, max_depth: usize, breadth: usize) {
        fs::create_dir_all(dir).unwrap();
        let sections = if current_depth < max_depth {
            section_names(breadth)
                .iter()
                .map(|s| format!("  - {s}\n"))
                .collect::<String>()
        } else {
            String::new()
        };
        let front_matter = if sections.is_empty() {
            format!("---\ntitle: Level {current_depth}\n---\n")
        } else {
            format!("---\ntitle: Level {current_depth}\nsections:\n{sections}---\n")
        };
        fs::write(dir.join("index.html.md"), front_matter).unwrap();

        if current_depth < max_depth {
            for i in 0..breadth {
                create_level(&dir.join(format!("section-{i}")), current_depth + 1, max_depth, breadth);
            }
        }
    }

    create_level(&root.join("gems/dry-types/1.2"), 0, depth, breadth);
}

fn bench_build_navigation(c: &mut Criterion) {
    let project = project();
    let mut group = c.benchmark_group("navigation_build");

    for (depth, breadth) in [(2, 5), (3, 5), (4, 3)] {
        let catalog = build_catalog(depth, breadth);
        let builder = NavigationBuilder::new(&catalog, Some(&project));

        group.bench_with_input(
            BenchmarkId::new("tree", format!("{depth}x{breadth}")),
            &builder,
            |b, builder| b.iter(|| builder.build_for_url("/gems/dry-types/1.2/section-0/")),
        );
    }

    group.finish();
}

fn bench_catalog_lookup(c: &mut Criterion) {
    let catalog = build_catalog(3, 5);
    let mut group = c.benchmark_group("catalog_lookup");

    group.bench_function("get_hit", |b| {
        b.iter(|| catalog.get("/gems/dry-types/1.2/section-2/section-3/"));
    });

    group.bench_function("display_name", |b| {
        b.iter(|| catalog.display_name("/gems/dry-types/1.2/section-2/section-3/section-4/"));
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    create_source_tree(temp_dir.path(), 3, 4);

    c.bench_function("catalog_scan", |b| {
        b.iter(|| PageCatalog::scan(temp_dir.path()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_build_navigation,
    bench_catalog_lookup,
    bench_scan
);
criterion_main!(benches);
