use criterion::{black_box, criterion_group, criterion_main, Criterion};
use objectskipper_core::{Code, ControlCodes, ObjectFilter};

fn print_stream(objects: usize, moves_per_object: usize) -> Vec<Code> {
    let mut codes = Vec::with_capacity(objects * (moves_per_object + 1));
    for object in 0..objects {
        codes.push(Code::comment(format!(" printing object part_{}", object)));
        for step in 0..moves_per_object {
            codes.push(
                Code::gcode(1)
                    .with_parameter('X', step as u64)
                    .with_parameter('Y', object as u64),
            );
        }
    }
    codes
}

fn configured_filter() -> ObjectFilter {
    let mut filter = ObjectFilter::new(ControlCodes::default());
    for prefix in ["printing object", "; object", "EXCLUDE_OBJECT_START NAME="] {
        filter.handle(&Code::mcode(50).with_parameter('P', prefix));
    }
    for id in ["part_3", "part_7"] {
        filter.handle(&Code::mcode(51).with_parameter('P', id));
    }
    filter
}

fn bench_dispatch(c: &mut Criterion) {
    let stream = print_stream(10, 500);

    c.bench_function("dispatch_print_stream", |b| {
        b.iter(|| {
            let mut filter = configured_filter();
            let mut suppressed = 0usize;
            for code in &stream {
                if !filter.handle(black_box(code)).passes_through() {
                    suppressed += 1;
                }
            }
            suppressed
        })
    });

    c.bench_function("match_boundary_comment", |b| {
        let mut filter = configured_filter();
        let comment = Code::comment(" printing object part_7");
        b.iter(|| filter.handle(black_box(&comment)))
    });
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
