use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protoview_analyzer::{analyze, analyze_comments_only};

fn analyze_small_file(c: &mut Criterion) {
    let source = r#"
        syntax = "proto2";
        package demo.store;

        import "common.proto";

        message Order {
            required string id = 1;
            optional uint32 quantity = 2 [default = 1];
            repeated Item items = 3;

            enum Status {
                PENDING = 0;
                SHIPPED = 1;
            }
            optional Status status = 4 [default = PENDING];
        }
    "#;

    c.bench_function("analyze_small_file", |b| {
        b.iter(|| analyze(black_box(source)))
    });
}

fn analyze_broken_file(c: &mut Criterion) {
    // mid-edit text: unterminated string, missing brace, junk statement
    let source = r#"
        syntax = "proto2
        package demo..store
        messag Order {
        message Order {
            required string id =
            optional uint32 quantity = 2 [default = 1.2345E+
    "#;

    c.bench_function("analyze_broken_file", |b| {
        b.iter(|| analyze(black_box(source)))
    });
}

fn comments_only(c: &mut Criterion) {
    let source = "// header\nmessage M { /* body\ncomment */ required int32 x = 1; }";

    c.bench_function("comments_only", |b| {
        b.iter(|| analyze_comments_only(black_box(source)))
    });
}

criterion_group!(
    benches,
    analyze_small_file,
    analyze_broken_file,
    comments_only
);
criterion_main!(benches);
