use aquarium_analyzer::calibration::Parameter;
use aquarium_analyzer::color::{Region, RegionExtractor};
use aquarium_analyzer::{AnalyzerConfig, WaterTestAnalyzer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};

/// Strip photo with noisy pads, so the fences actually drop pixels
fn strip_photo() -> RgbImage {
    RgbImage::from_fn(1200, 300, |x, y| {
        let noise = ((x * 31 + y * 17) % 23) as u8;
        if (x * 7 + y * 13) % 97 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([200 + noise / 2, 120 + noise, 60 + noise])
        }
    })
}

fn benchmark_region_extraction(c: &mut Criterion) {
    let img = strip_photo();
    let extractor = RegionExtractor::new();
    let region = Region::new(100, 100, 200, 200).unwrap();

    c.bench_function("extract_100x100_region", |b| {
        b.iter(|| extractor.extract(black_box(&img), black_box(region)))
    });
}

fn benchmark_chart_matching(c: &mut Criterion) {
    let config = AnalyzerConfig::default_calibration();
    let chart = config.kits.strip.chart(Parameter::Ph).unwrap().clone();
    let color = aquarium_analyzer::Color::new(205, 118, 66);

    c.bench_function("match_ph_chart", |b| {
        b.iter(|| chart.match_color(black_box(color)))
    });
}

fn benchmark_water_test(c: &mut Criterion) {
    let config = AnalyzerConfig::default_calibration();
    let img = strip_photo();
    let analyzer = WaterTestAnalyzer::new(&config);

    c.bench_function("analyze_strip_photo", |b| {
        b.iter(|| analyzer.analyze(black_box(&img), Some("api")))
    });
}

criterion_group!(
    benches,
    benchmark_region_extraction,
    benchmark_chart_matching,
    benchmark_water_test
);
criterion_main!(benches);
