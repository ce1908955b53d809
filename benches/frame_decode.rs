use criterion::{Criterion, black_box, criterion_group, criterion_main};
use outdoor_th::encoder::FrameBuilder;
use outdoor_th::output::OutputRecord;
use outdoor_th::{FrameDecoder, RawFrame, decode_hex};

mod common;

fn bench_decode_valid(c: &mut Criterion) {
    let frame = RawFrame::new(common::SAMPLE);
    c.bench_function("decode_valid_frame", |b| {
        b.iter(|| FrameDecoder::decode(black_box(&frame)))
    });
}

fn bench_decode_rejected(c: &mut Criterion) {
    let zero = RawFrame::default();
    let corrupt = RawFrame::new(common::SAMPLE).with_bit_flipped(17);

    c.bench_function("decode_all_zero", |b| {
        b.iter(|| FrameDecoder::decode(black_box(&zero)))
    });
    c.bench_function("decode_checksum_mismatch", |b| {
        b.iter(|| FrameDecoder::decode(black_box(&corrupt)))
    });
}

fn bench_decode_hex(c: &mut Criterion) {
    c.bench_function("decode_hex_frame", |b| {
        b.iter(|| decode_hex(black_box("{42} 0e 20 cd 80 0c 40")))
    });
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("frame_builder", |b| {
        b.iter(|| {
            FrameBuilder::new(black_box(0x0e))
                .channel(3)
                .temperature_tenths(black_box(205))
                .humidity(64)
                .build()
        })
    });
}

fn bench_output_json(c: &mut Criterion) {
    let reading = FrameDecoder::decode(&RawFrame::new(common::SAMPLE)).unwrap();
    c.bench_function("output_record_json", |b| {
        b.iter(|| OutputRecord::from(black_box(&reading)).to_json())
    });
}

criterion_group!(
    benches,
    bench_decode_valid,
    bench_decode_rejected,
    bench_decode_hex,
    bench_encode,
    bench_output_json
);
criterion_main!(benches);
