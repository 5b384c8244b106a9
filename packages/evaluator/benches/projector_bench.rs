use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagebuilder_evaluator::{project, render_page, PageOptions, ProjectOptions};
use pagebuilder_model::{Document, IdGenerator};

fn sample_document(sections: usize) -> Document {
    let mut home_page = Vec::new();
    for i in 0..sections {
        home_page.push(match i % 4 {
            0 => serde_json::json!({ "type": "topbar", "text": format!("Promo {}", i) }),
            1 => serde_json::json!({
                "type": "carousel",
                "images": [
                    { "src": "https://cdn.example.com/a.png", "label": "A" },
                    { "src": "https://cdn.example.com/b.png", "label": "B" },
                    { "src": "https://cdn.example.com/c.png", "label": "C" }
                ]
            }),
            2 => serde_json::json!({
                "type": "heading",
                "text": "New in",
                "font-size": 24,
                "background-color": ["#fff", "#eee"]
            }),
            _ => serde_json::json!({
                "type": "banner",
                "images": [{ "src": "https://cdn.example.com/banner.png" }]
            }),
        });
    }
    let json = serde_json::json!({ "home_page": home_page }).to_string();
    let mut doc = Document::from_json(&json).unwrap();
    doc.assign_ids(&mut IdGenerator::new("bench"));
    doc
}

fn bench_project(c: &mut Criterion) {
    let doc = sample_document(40);
    let selected = doc.home_page[5].id.clone();

    c.bench_function("project_40_sections", |b| {
        b.iter(|| {
            project(
                black_box(&doc),
                &ProjectOptions {
                    collections: &[],
                    selected: Some(&selected),
                },
            )
        })
    });

    let vdom = project(&doc, &ProjectOptions::default());
    c.bench_function("render_page_40_sections", |b| {
        b.iter(|| render_page(black_box(&vdom), PageOptions::default()))
    });
}

criterion_group!(benches, bench_project);
criterion_main!(benches);
