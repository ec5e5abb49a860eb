use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docbin::{BinarizeConfig, Method, binarize, binarize_into};
use docbin::models::GrayImage;
use docbin::utils::memory_pool::BufferPool;

/// Deterministic synthetic page: strokes on a shaded background.
fn synthetic_page(width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![220u8; width * height];
    for y in 0..height {
        for x in 0..width {
            if x % 8 < 2 && y % 11 != 0 {
                gray[y * width + x] = 40;
            }
            let shade = (x * 20 / width) as u8;
            gray[y * width + x] = gray[y * width + x].saturating_sub(shade);
        }
    }
    gray
}

fn config(method: Method) -> BinarizeConfig {
    BinarizeConfig {
        window_width: Some(40),
        window_height: Some(40),
        ..BinarizeConfig::with_method(method)
    }
}

fn bench_niblack_medium(c: &mut Criterion) {
    let gray = synthetic_page(640, 480);
    let cfg = config(Method::Niblack);
    c.bench_function("niblack_640x480", |b| {
        b.iter(|| binarize(black_box(&gray), 640, 480, black_box(&cfg)))
    });
}

fn bench_sauvola_medium(c: &mut Criterion) {
    let gray = synthetic_page(640, 480);
    let cfg = config(Method::Sauvola);
    c.bench_function("sauvola_640x480", |b| {
        b.iter(|| binarize(black_box(&gray), 640, 480, black_box(&cfg)))
    });
}

fn bench_wolfjolion_medium(c: &mut Criterion) {
    let gray = synthetic_page(640, 480);
    let cfg = config(Method::WolfJolion);
    c.bench_function("wolfjolion_640x480", |b| {
        b.iter(|| binarize(black_box(&gray), 640, 480, black_box(&cfg)))
    });
}

fn bench_wolfjolion_large(c: &mut Criterion) {
    let gray = synthetic_page(1920, 1080);
    let cfg = config(Method::WolfJolion);
    c.bench_function("wolfjolion_1920x1080", |b| {
        b.iter(|| binarize(black_box(&gray), 1920, 1080, black_box(&cfg)))
    });
}

fn bench_wolfjolion_pooled(c: &mut Criterion) {
    let gray = synthetic_page(1920, 1080);
    let cfg = config(Method::WolfJolion);
    let mut pool = BufferPool::new();
    let mut out = GrayImage::default();
    c.bench_function("wolfjolion_1920x1080_pooled", |b| {
        b.iter(|| {
            binarize_into(
                black_box(&gray),
                1920,
                1080,
                black_box(&cfg),
                &mut pool,
                &mut out,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_niblack_medium,
    bench_sauvola_medium,
    bench_wolfjolion_medium,
    bench_wolfjolion_large,
    bench_wolfjolion_pooled
);
criterion_main!(benches);
