use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowcodec::escape::split;
use rowcodec::{analyze, Mode, PromptOptions, RowCodec, SchemaNode};

fn product_schema() -> SchemaNode {
    SchemaNode::object([
        ("sku", SchemaNode::string()),
        ("name", SchemaNode::string()),
        ("price", SchemaNode::number()),
        ("quantity", SchemaNode::number()),
        ("in_stock", SchemaNode::boolean()),
        ("tags", SchemaNode::array(SchemaNode::string())),
    ])
}

fn flat_schema(fields: usize) -> SchemaNode {
    SchemaNode::object((0..fields).map(|i| (format!("f{}", i), SchemaNode::string())))
}

fn product_rows(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "SKU{}|Product {}|{:.2}|{}|true|a;b;c",
                i,
                i,
                9.99 + i as f64,
                i % 10
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn product_json(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"sku":"SKU{}","name":"Product {}","price":{:.2},"quantity":{},"in_stock":true,"tags":["a","b","c"]}}"#,
                i,
                i,
                9.99 + i as f64,
                i % 10
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn benchmark_analyze(c: &mut Criterion) {
    let schema = product_schema();
    c.bench_function("analyze_product_schema", |b| {
        b.iter(|| analyze(black_box(&schema)))
    });

    let mut group = c.benchmark_group("analyze_flat");
    for size in [10, 50, 100].iter() {
        let schema = flat_schema(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &schema, |b, schema| {
            b.iter(|| analyze(black_box(schema)))
        });
    }
    group.finish();
}

fn benchmark_decode_single_row(c: &mut Criterion) {
    let codec = RowCodec::new(&product_schema()).unwrap();
    let row = product_rows(1);

    c.bench_function("decode_single_row", |b| {
        b.iter(|| codec.decode(black_box(&row), Mode::Single))
    });
}

fn benchmark_decode_rows(c: &mut Criterion) {
    let codec = RowCodec::new(&product_schema()).unwrap();
    let mut group = c.benchmark_group("decode_rows");

    for size in [10, 50, 100, 500].iter() {
        let text = product_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| codec.decode(black_box(text), Mode::Multi))
        });
    }
    group.finish();
}

fn benchmark_decode_validated(c: &mut Criterion) {
    let codec = RowCodec::new(&product_schema()).unwrap();
    let validator = codec.validator();
    let text = product_rows(100);

    c.bench_function("decode_validated_100_rows", |b| {
        b.iter(|| codec.decode_validated(black_box(&text), Mode::Multi, &validator))
    });
}

fn benchmark_escape_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_split");

    let plain = "alpha|beta|gamma|delta|epsilon";
    let escaped = "alpha\\|beta|gamma\\\\delta|epsilon";

    group.bench_function("plain_row", |b| {
        b.iter(|| split(black_box(plain), "|", '\\'))
    });
    group.bench_function("escaped_row", |b| {
        b.iter(|| split(black_box(escaped), "|", '\\'))
    });
    group.finish();
}

fn benchmark_render_prompt(c: &mut Criterion) {
    let codec = RowCodec::new(&product_schema()).unwrap();
    let prompt = PromptOptions::new().with_mode(Mode::Multi).with_max_rows(50);

    c.bench_function("render_prompt", |b| b.iter(|| codec.prompt(black_box(&prompt))));
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let codec = RowCodec::new(&product_schema()).unwrap();
    let rows = product_rows(100);
    let json = product_json(100);

    let mut group = c.benchmark_group("comparison");

    group.bench_function("row_decode", |b| {
        b.iter(|| codec.decode(black_box(&rows), Mode::Multi))
    });
    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_analyze,
    benchmark_decode_single_row,
    benchmark_decode_rows,
    benchmark_decode_validated,
    benchmark_escape_split,
    benchmark_render_prompt,
    benchmark_comparison_with_json
);
criterion_main!(benches);
