use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tapered_posit::{p32, p64, q32, q64, Decoded, RoundFrom};

// Establish a baseline by comparing with a single fpu add

fn baseline_fpu_add_f32(c: &mut Criterion) {
  c.bench_function("baseline_fpu_add_f32", |b| {
    b.iter(|| black_box(3.14_f32) + black_box(69.420_f32));
  });
}

fn baseline_fpu_add_f64(c: &mut Criterion) {
  c.bench_function("baseline_fpu_add_f64", |b| {
    b.iter(|| black_box(3.14_f64) + black_box(69.420_f64));
  });
}

// Time decoding and encoding 1 posit

const NUMS_32: [i32; 4] = [
  0b00101011100101110110111101100011u32 as i32,
  0b00000000010101010100111100100101u32 as i32,
  0b11010100001001010100101000101110u32 as i32,
  0b01110010011111001111001001110000u32 as i32,
];

const NUMS_64: [i64; 4] = [
  0b0010101110010111011011110110001100101001101111011111000111100111u64 as i64,
  0b0000000001010101010011110010010100011000100101110110100010000011u64 as i64,
  0b1101010000100101010010100010111011010010011010111001111111001011u64 as i64,
  0b0111001001111100111100100111000011010111000101000001001101001111u64 as i64,
];

fn decode_p32(c: &mut Criterion) {
  let mut g = c.benchmark_group("decode_p32");
  for num in NUMS_32.map(p32::from_bits) {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{num:b}")), &num, |b, &num| {
      b.iter(|| black_box(num).decode());
    });
  }
  g.finish();
}

fn encode_p32(c: &mut Criterion) {
  let mut g = c.benchmark_group("encode_p32");
  for num in NUMS_32.map(p32::from_bits) {
    let Decoded::Fields(fields) = num.decode() else { unreachable!() };
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{num:b}")), &fields, |b, &fields| {
      b.iter(|| black_box(fields).encode::<i32>());
    });
  }
  g.finish();
}

fn decode_p64(c: &mut Criterion) {
  let mut g = c.benchmark_group("decode_p64");
  for num in NUMS_64.map(p64::from_bits) {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{num:b}")), &num, |b, &num| {
      b.iter(|| black_box(num).decode());
    });
  }
  g.finish();
}

fn encode_p64(c: &mut Criterion) {
  let mut g = c.benchmark_group("encode_p64");
  for num in NUMS_64.map(p64::from_bits) {
    let Decoded::Fields(fields) = num.decode() else { unreachable!() };
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{num:b}")), &fields, |b, &fields| {
      b.iter(|| black_box(fields).encode::<i64>());
    });
  }
  g.finish();
}

// Time the arithmetic kernels alone, the rounding alone, and the whole operation

fn arith_p32(c: &mut Criterion) {
  let mut g = c.benchmark_group("arith_p32");
  let x = p32::from_bits(NUMS_32[0]);
  let y = p32::from_bits(NUMS_32[3]);
  g.throughput(Throughput::Elements(1));
  g.bench_function("add_kernel", |b| b.iter(|| black_box(x).bench_add_kernel(black_box(y))));
  g.bench_function("mul_kernel", |b| b.iter(|| black_box(x).bench_mul_kernel(black_box(y))));
  g.bench_function("div_kernel", |b| b.iter(|| black_box(x).bench_div_kernel(black_box(y))));
  if let Some(product) = x.bench_mul_kernel(y) {
    g.bench_function("round", |b| b.iter(|| p32::bench_round(black_box(product))));
  }
  g.bench_function("add", |b| b.iter(|| black_box(x) + black_box(y)));
  g.bench_function("mul", |b| b.iter(|| black_box(x) * black_box(y)));
  g.bench_function("div", |b| b.iter(|| black_box(x) / black_box(y)));
  g.bench_function("sqrt", |b| b.iter(|| black_box(y).sqrt()));
  g.bench_function("mul_add", |b| b.iter(|| black_box(x).mul_add(black_box(y), black_box(x))));
  g.finish();
}

fn arith_p64(c: &mut Criterion) {
  let mut g = c.benchmark_group("arith_p64");
  let x = p64::from_bits(NUMS_64[0]);
  let y = p64::from_bits(NUMS_64[3]);
  g.throughput(Throughput::Elements(1));
  g.bench_function("add", |b| b.iter(|| black_box(x) + black_box(y)));
  g.bench_function("mul", |b| b.iter(|| black_box(x) * black_box(y)));
  g.bench_function("div", |b| b.iter(|| black_box(x) / black_box(y)));
  g.bench_function("sqrt", |b| b.iter(|| black_box(y).sqrt()));
  g.finish();
}

// Time a dot product: naive (rounding at each step) vs. in the quire

fn dot(c: &mut Criterion) {
  let mut g = c.benchmark_group("dot");
  for len in [16, 256] {
    let a32: Vec<p32> = (0 .. len).map(|i| p32::round_from(1. / (i as f64 + 1.))).collect();
    let b32: Vec<p32> = (0 .. len).map(|i| p32::round_from(i as f64 - 100.)).collect();
    let a64: Vec<p64> = a32.iter().map(|x| x.convert()).collect();
    let b64: Vec<p64> = b32.iter().map(|x| x.convert()).collect();
    g.throughput(Throughput::Elements(len));

    g.bench_with_input(BenchmarkId::new("naive_p32", len), &(&a32, &b32), |b, (a, c)| {
      b.iter(|| a.iter().zip(c.iter()).fold(p32::ZERO, |acc, (x, y)| acc + x * y))
    });
    g.bench_with_input(BenchmarkId::new("quire_p32", len), &(&a32, &b32), |b, (a, c)| {
      b.iter(|| q32::fused_dot(a.iter().copied().zip(c.iter().copied())))
    });
    g.bench_with_input(BenchmarkId::new("quire_p64", len), &(&a64, &b64), |b, (a, c)| {
      b.iter(|| q64::fused_dot(a.iter().copied().zip(c.iter().copied())))
    });
    g.bench_with_input(BenchmarkId::new("naive_f64", len), &len, |b, &len| {
      let a: Vec<f64> = a32.iter().map(|&x| f64::round_from(x)).collect();
      let c: Vec<f64> = b32.iter().map(|&x| f64::round_from(x)).collect();
      b.iter(|| black_box(&a).iter().zip(&c).take(len as usize).fold(0., |acc, (x, y)| acc + x * y))
    });
  }
  g.finish();
}

criterion_group!(baseline_fpu,
  baseline_fpu_add_f32,
  baseline_fpu_add_f64,
);

criterion_group!(codec,
  decode_p32,
  encode_p32,
  decode_p64,
  encode_p64,
);

criterion_group!(arith,
  arith_p32,
  arith_p64,
);

criterion_group!(quire,
  dot,
);

criterion_main!(baseline_fpu, codec, arith, quire);
